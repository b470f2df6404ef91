// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Widget-side client: optimistic local state reconciled against the server.

pub mod controller;
pub mod reconciler;
pub mod transport;

pub use controller::WidgetController;
pub use reconciler::{default_fallback_list, Reconciler, SyncKind, SyncState};
pub use transport::{InProcessTransport, ToolTransport, TransportError};
