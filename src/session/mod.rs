// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Widget session registry.
//!
//! Each live widget connection gets an opaque session id bound to its own handler instance and
//! its push transport. Calls for one session are processed one at a time; all sessions share
//! the process-wide store.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::model::SessionId;
use crate::store::TodoStore;
use crate::tools::{TodoTools, ToolCall, ToolError, ToolResponse};

/// Message attached to list snapshots pushed after a store change.
pub const PUSH_MESSAGE: &str = "Todo list updated.";

/// Pushes a session may have queued before it counts as stalled.
pub const PUSH_QUEUE_CAPACITY: usize = 64;

/// Push side of a session's connection.
pub trait SessionTransport: Send + Sync + 'static {
    /// Delivers a pushed envelope. Returns `false` once the peer is gone or stalled.
    fn push(&self, update: &ToolResponse) -> bool;
}

impl SessionTransport for mpsc::Sender<ToolResponse> {
    fn push(&self, update: &ToolResponse) -> bool {
        match self.try_send(update.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(capacity = PUSH_QUEUE_CAPACITY, "push queue full");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unknown session: {0}")]
    UnknownSession(SessionId),
    #[error(transparent)]
    Tool(#[from] ToolError),
}

struct SessionRecord<T> {
    handler: Mutex<TodoTools>,
    transport: T,
}

pub struct SessionRegistry<T> {
    tools: TodoTools,
    sessions: RwLock<HashMap<SessionId, Arc<SessionRecord<T>>>>,
}

impl<T: SessionTransport> SessionRegistry<T> {
    pub fn new(tools: TodoTools) -> Self {
        Self { tools, sessions: RwLock::new(HashMap::new()) }
    }

    pub fn store(&self) -> &TodoStore {
        self.tools.store()
    }

    /// Registers `transport` under a fresh session id.
    pub fn open(&self, transport: T) -> SessionId {
        let session_id = SessionId::random_uuid();
        let record = Arc::new(SessionRecord { handler: Mutex::new(self.tools.clone()), transport });
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.insert(session_id.clone(), record);
        tracing::info!(session_id = %session_id, open = sessions.len(), "widget session opened");
        session_id
    }

    /// Routes `call` to the session's handler. Calls for the same session never interleave.
    pub async fn dispatch(
        &self,
        session_id: &SessionId,
        call: &ToolCall,
    ) -> Result<ToolResponse, SessionError> {
        let record = self
            .record(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.clone()))?;
        let handler = record.handler.lock().await;
        tracing::debug!(session_id = %session_id, tool = %call.name, "session dispatch");
        Ok(handler.call(call).await?)
    }

    /// Removes the session and drops its transport once no call is in flight. Returns whether
    /// the session was still open; closing twice is a no-op.
    pub fn close(&self, session_id: &SessionId) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id)
            .is_some();
        if removed {
            tracing::info!(session_id = %session_id, "widget session closed");
        }
        removed
    }

    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pushes `update` to every session. Sessions whose transport is gone are torn down.
    /// Returns the number of sessions that received the update.
    pub fn publish(&self, update: &ToolResponse) -> usize {
        let records = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(session_id, record)| (session_id.clone(), record.clone()))
            .collect::<Vec<_>>();

        let mut delivered = 0;
        for (session_id, record) in records {
            if record.transport.push(update) {
                delivered += 1;
            } else {
                tracing::warn!(session_id = %session_id, "push failed; dropping session");
                self.close(&session_id);
            }
        }
        delivered
    }

    fn record(&self, session_id: &SessionId) -> Option<Arc<SessionRecord<T>>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).get(session_id).cloned()
    }
}

/// Forwards every committed store snapshot to all sessions of `registry` until the store's
/// change feed closes.
pub fn spawn_push_forwarder<T: SessionTransport>(
    registry: Arc<SessionRegistry<T>>,
) -> JoinHandle<()> {
    let mut changes = registry.store().subscribe();
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(list) => {
                    registry.publish(&ToolResponse { message: PUSH_MESSAGE.to_owned(), list });
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "push forwarder lagged behind store changes");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
