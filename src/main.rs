// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tidelist CLI entrypoint.
//!
//! By default this runs the terminal widget and serves the widget session API plus MCP over
//! streamable HTTP at `http://127.0.0.1:<port>/mcp`.
//!
//! Use `--mcp` to run the MCP server over stdio instead (intended for tool integrations), or
//! `--headless` to serve HTTP without the terminal widget.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rmcp::transport::StreamableHttpServerConfig;
use tokio::sync::mpsc;

use tidelist::client::{InProcessTransport, Reconciler, WidgetController};
use tidelist::config::{Cli, Mode};
use tidelist::http::{app_router, WidgetRegistry};
use tidelist::mcp::TodoMcp;
use tidelist::model::TodoList;
use tidelist::session::{spawn_push_forwarder, PUSH_QUEUE_CAPACITY};
use tidelist::store::TodoStore;
use tidelist::tools::TodoTools;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tidelist::logging::init_tracing(&cli.log_target())?;

    let store = TodoStore::with_titles(cli.list_titles());
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    match cli.mode() {
        Mode::Stdio => {
            tracing::info!("serving MCP over stdio");
            runtime.block_on(TodoMcp::new(store).serve_stdio())?;
        }
        Mode::Headless => runtime.block_on(serve_http(&cli, store, None))?,
        Mode::Interactive => {
            let fallback = cli.fallback_list()?;
            runtime.block_on(serve_http(&cli, store, Some(fallback)))?;
        }
    }

    Ok(())
}

/// Serves HTTP until the terminal widget quits, or forever without one.
async fn serve_http(
    cli: &Cli,
    store: TodoStore,
    widget_fallback: Option<TodoList>,
) -> anyhow::Result<()> {
    let addr = cli.socket_addr();
    let listener =
        tokio::net::TcpListener::bind(addr).await.with_context(|| format!("binding {addr}"))?;
    let local_addr = listener.local_addr()?;

    let config =
        StreamableHttpServerConfig { stateful_mode: true, ..StreamableHttpServerConfig::default() };
    let shutdown_token = config.cancellation_token.clone();
    let server_shutdown = shutdown_token.clone();

    let registry = Arc::new(WidgetRegistry::new(TodoTools::new(store.clone())));
    let forwarder = spawn_push_forwarder(registry.clone());
    let router = app_router(registry.clone(), TodoMcp::new(store.clone()), config);
    tracing::info!(%local_addr, "serving widget API at /widget and MCP at /mcp");

    let server_handle = tokio::spawn(async move {
        let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
            server_shutdown.cancelled().await;
        });
        if let Err(err) = serve.await {
            tracing::error!(error = %err, "HTTP server error");
        }
    });

    let Some(fallback) = widget_fallback else {
        server_handle.await?;
        return Ok(());
    };

    let (tx, rx) = mpsc::channel(PUSH_QUEUE_CAPACITY);
    let transport = InProcessTransport::open(registry.clone(), tx);
    let controller = WidgetController::new(Reconciler::new(fallback), Arc::new(transport));
    let push_listener = controller.spawn_push_listener(rx);
    controller.apply_push(Some(store.snapshot(None).await)).await;

    let runtime = tokio::runtime::Handle::current();
    let tui_join = tokio::task::spawn_blocking(move || {
        tidelist::tui::run_widget(controller, runtime).map_err(|err| err.to_string())
    })
    .await;

    push_listener.abort();
    forwarder.abort();
    shutdown_token.cancel();
    let _ = server_handle.await;

    tui_join?.map_err(anyhow::Error::msg)?;
    Ok(())
}
