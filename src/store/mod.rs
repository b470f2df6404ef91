// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Process-wide todo storage.
//!
//! The store lives for the whole process and is not persisted. It is constructed at startup and
//! handed to every tool handler and session that needs it.

pub mod todo_store;

pub use todo_store::TodoStore;
