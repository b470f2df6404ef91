// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use async_trait::async_trait;

use crate::model::SessionId;
use crate::session::{SessionError, SessionRegistry, SessionTransport};
use crate::tools::{ToolCall, ToolResponse};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("widget session is closed")]
    Closed,
}

/// Session-scoped channel a widget uses to invoke tools.
#[async_trait]
pub trait ToolTransport: Send + Sync {
    async fn call(&self, call: ToolCall) -> Result<ToolResponse, TransportError>;
}

/// Routes calls through a session of an in-process [`SessionRegistry`].
///
/// The session is closed when the transport is dropped.
pub struct InProcessTransport<T: SessionTransport> {
    registry: Arc<SessionRegistry<T>>,
    session_id: SessionId,
}

impl<T: SessionTransport> InProcessTransport<T> {
    pub fn open(registry: Arc<SessionRegistry<T>>, push: T) -> Self {
        let session_id = registry.open(push);
        Self { registry, session_id }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }
}

#[async_trait]
impl<T: SessionTransport> ToolTransport for InProcessTransport<T> {
    async fn call(&self, call: ToolCall) -> Result<ToolResponse, TransportError> {
        match self.registry.dispatch(&self.session_id, &call).await {
            Ok(response) => Ok(response),
            Err(SessionError::UnknownSession(_)) => Err(TransportError::Closed),
            Err(err) => Err(err.into()),
        }
    }
}

impl<T: SessionTransport> Drop for InProcessTransport<T> {
    fn drop(&mut self) {
        self.registry.close(&self.session_id);
    }
}
