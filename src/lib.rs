// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tidelist: a todo widget backend (MCP + widget session API) with a terminal front-end.
//!
//! The server owns the todo lists; widgets render them optimistically and reconcile against
//! tool responses and server pushes.

pub mod client;
pub mod config;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod model;
pub mod ops;
pub mod session;
pub mod store;
pub mod tools;
pub mod tui;
