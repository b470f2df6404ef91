// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::model::{TodoId, TodoList};
use crate::tools::{ToolCall, ToolResponse};

use super::reconciler::{Reconciler, SyncKind, SyncState};
use super::transport::ToolTransport;

/// Drives a [`Reconciler`] against a [`ToolTransport`].
///
/// Mutators commit the optimistic list before returning and spawn the tool call in the
/// background. The returned handle completes once the response has been reconciled; dropping
/// it does not cancel the call.
#[derive(Clone)]
pub struct WidgetController {
    reconciler: Arc<Mutex<Reconciler>>,
    transport: Arc<dyn ToolTransport>,
}

impl WidgetController {
    pub fn new(reconciler: Reconciler, transport: Arc<dyn ToolTransport>) -> Self {
        Self { reconciler: Arc::new(Mutex::new(reconciler)), transport }
    }

    pub async fn resolved(&self) -> TodoList {
        self.reconciler.lock().await.resolved().clone()
    }

    pub async fn state(&self) -> SyncState {
        self.reconciler.lock().await.state().clone()
    }

    /// Resolved list plus sync state, for callers outside the runtime.
    pub fn blocking_view(&self) -> (TodoList, SyncKind) {
        let reconciler = self.reconciler.blocking_lock();
        (reconciler.resolved().clone(), reconciler.state().kind())
    }

    pub async fn apply_push(&self, props: Option<TodoList>) -> bool {
        self.reconciler.lock().await.apply_push(props)
    }

    pub async fn add(&self, title: &str) -> JoinHandle<()> {
        let call = self.reconciler.lock().await.add(title);
        self.dispatch(call)
    }

    pub async fn toggle(&self, todo_id: &TodoId) -> JoinHandle<()> {
        let call = self.reconciler.lock().await.toggle(todo_id);
        self.dispatch(call)
    }

    pub async fn delete(&self, todo_id: &TodoId) -> JoinHandle<()> {
        let call = self.reconciler.lock().await.delete(todo_id);
        self.dispatch(call)
    }

    /// Feeds server pushes into the reconciler until the sender side is dropped.
    pub fn spawn_push_listener(
        &self,
        mut updates: mpsc::Receiver<ToolResponse>,
    ) -> JoinHandle<()> {
        let reconciler = self.reconciler.clone();
        tokio::spawn(async move {
            while let Some(update) = updates.recv().await {
                let adopted = reconciler.lock().await.apply_push(Some(update.list));
                tracing::debug!(adopted, "server push reconciled");
            }
        })
    }

    fn dispatch(&self, call: ToolCall) -> JoinHandle<()> {
        let reconciler = self.reconciler.clone();
        let transport = self.transport.clone();
        tokio::spawn(async move {
            let tool = call.name.clone();
            match transport.call(call).await {
                Ok(response) => {
                    let adopted = reconciler.lock().await.apply_response(response);
                    tracing::debug!(tool = %tool, adopted, "tool response reconciled");
                }
                Err(err) => {
                    tracing::warn!(
                        tool = %tool,
                        error = %err,
                        "tool call failed; keeping local state"
                    );
                }
            }
        })
    }
}
