// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A store holds one or more todo lists; each list owns an ordered sequence of items.

pub(crate) mod fixtures;
pub mod ids;
pub mod todo;

pub use ids::{Id, IdError, ListId, SessionId, TodoId};
pub use todo::{TodoItem, TodoList, DEFAULT_LIST_TITLE, ROOT_LIST_ID};
