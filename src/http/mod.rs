// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP surface: the widget session API plus MCP over streamable HTTP.
//!
//! A widget opens `GET /widget/events` and receives a `session` event carrying its session id,
//! then one `list` event per store change. Tool calls go to
//! `POST /widget/messages?sessionId=<id>`; `DELETE /widget/sessions/<id>` ends the session.
//! Dropping the event stream ends the session as well.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use futures::Stream;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tower_http::cors::CorsLayer;

use crate::mcp::TodoMcp;
use crate::model::{IdError, SessionId};
use crate::session::{SessionError, SessionRegistry, PUSH_QUEUE_CAPACITY};
use crate::tools::{ToolCall, ToolError, ToolResponse};

pub const SESSION_EVENT: &str = "session";
pub const LIST_EVENT: &str = "list";

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Registry of widget sessions whose pushes travel over an SSE stream.
pub type WidgetRegistry = SessionRegistry<mpsc::Sender<ToolResponse>>;

#[derive(Clone)]
struct AppState {
    registry: Arc<WidgetRegistry>,
}

/// Widget session routes only.
pub fn widget_router(registry: Arc<WidgetRegistry>) -> Router {
    Router::new()
        .route("/widget/events", get(open_events))
        .route("/widget/messages", post(post_message))
        .route("/widget/sessions/{session_id}", delete(close_session))
        .with_state(AppState { registry })
}

/// Widget routes plus the MCP service nested at `/mcp`, with permissive CORS.
pub fn app_router(
    registry: Arc<WidgetRegistry>,
    mcp: TodoMcp,
    config: StreamableHttpServerConfig,
) -> Router {
    let session_manager = Arc::new(LocalSessionManager::default());
    let mcp_service = StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config);

    widget_router(registry).nest_service("/mcp", mcp_service).layer(CorsLayer::permissive())
}

/// Closes its session when the event stream that owns it is dropped.
struct SessionGuard {
    registry: Arc<WidgetRegistry>,
    session_id: SessionId,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.registry.close(&self.session_id);
    }
}

async fn open_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel(PUSH_QUEUE_CAPACITY);
    let session_id = state.registry.open(tx);

    let hello = Event::default()
        .event(SESSION_EVENT)
        .data(serde_json::json!({ "sessionId": session_id.as_str() }).to_string());
    let guard = SessionGuard { registry: state.registry.clone(), session_id };

    let updates = ReceiverStream::new(rx).filter_map(move |update| {
        let _session = &guard;
        list_event(&update)
    });
    let stream = tokio_stream::once(hello).chain(updates).map(Ok::<Event, Infallible>);

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL))
}

fn list_event(update: &ToolResponse) -> Option<Event> {
    match Event::default().event(LIST_EVENT).json_data(update) {
        Ok(event) => Some(event),
        Err(err) => {
            tracing::warn!(error = %err, "failed to encode list event");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageQuery {
    session_id: Option<String>,
}

async fn post_message(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
    Json(call): Json<ToolCall>,
) -> Result<Json<ToolResponse>, WidgetError> {
    let raw = query.session_id.filter(|raw| !raw.is_empty()).ok_or(WidgetError::MissingSession)?;
    let session_id = SessionId::new(raw).map_err(WidgetError::InvalidSession)?;

    let response = state.registry.dispatch(&session_id, &call).await.map_err(|err| {
        tracing::debug!(
            session_id = %session_id,
            tool = %call.name,
            error = %err,
            "widget call failed"
        );
        WidgetError::from(err)
    })?;
    Ok(Json(response))
}

async fn close_session(State(state): State<AppState>, Path(raw): Path<String>) -> StatusCode {
    if let Ok(session_id) = SessionId::new(raw) {
        state.registry.close(&session_id);
    }
    StatusCode::NO_CONTENT
}

#[derive(Debug, thiserror::Error)]
enum WidgetError {
    #[error("Missing sessionId query parameter")]
    MissingSession,
    #[error("invalid sessionId: {0}")]
    InvalidSession(IdError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl WidgetError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingSession | Self::InvalidSession(_) => StatusCode::BAD_REQUEST,
            Self::Session(SessionError::UnknownSession(_)) => StatusCode::NOT_FOUND,
            Self::Session(SessionError::Tool(ToolError::NotFound { .. })) => StatusCode::NOT_FOUND,
            Self::Session(SessionError::Tool(_)) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WidgetError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
