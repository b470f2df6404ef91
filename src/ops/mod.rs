// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for todo lists.
//!
//! These are pure list transformations shared by the server-side tool handlers and the widget's
//! optimistic updates, so both sides normalize titles and order items the same way.

use crate::model::{TodoId, TodoItem, TodoList};

/// Title substituted when an added item has no usable title.
pub const DEFAULT_TODO_TITLE: &str = "New item";

/// Id prefix for items created by the server.
pub const SERVER_TODO_ID_PREFIX: &str = "todo";

/// Id prefix for optimistic items created by a widget before the server answers.
pub const LOCAL_TODO_ID_PREFIX: &str = "local";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoOp {
    Add { todo_id: TodoId, title: String },
    Toggle { todo_id: TodoId },
    Delete { todo_id: TodoId },
}

/// What an applied op did to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Added { todo_id: TodoId, title: String },
    Toggled { todo_id: TodoId, completed: bool },
    Deleted { todo_id: TodoId, title: String },
    /// Delete of an id that is not in the list.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error("todo already exists (id={todo_id})")]
    AlreadyExists { todo_id: TodoId },
    #[error("todo not found (id={todo_id})")]
    NotFound { todo_id: TodoId },
}

/// Trims `title`; blank or missing titles become [`DEFAULT_TODO_TITLE`].
pub fn normalize_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_owned(),
        _ => DEFAULT_TODO_TITLE.to_owned(),
    }
}

/// Generates an id with `prefix` that is not yet used in `list`.
pub fn allocate_todo_id(list: &TodoList, prefix: &str) -> TodoId {
    loop {
        let candidate = TodoId::generate(prefix);
        if !list.contains(&candidate) {
            return candidate;
        }
    }
}

/// Applies `op` to `list` in place.
///
/// On error the list is left untouched.
pub fn apply_op(list: &mut TodoList, op: &TodoOp) -> Result<Applied, ApplyError> {
    match op {
        TodoOp::Add { todo_id, title } => {
            if list.contains(todo_id) {
                return Err(ApplyError::AlreadyExists { todo_id: todo_id.clone() });
            }
            let title = normalize_title(Some(title));
            list.items_mut().insert(0, TodoItem::new(todo_id.clone(), title.clone()));
            Ok(Applied::Added { todo_id: todo_id.clone(), title })
        }
        TodoOp::Toggle { todo_id } => {
            let item = list
                .find_mut(todo_id)
                .ok_or_else(|| ApplyError::NotFound { todo_id: todo_id.clone() })?;
            item.flip();
            Ok(Applied::Toggled { todo_id: todo_id.clone(), completed: item.completed() })
        }
        TodoOp::Delete { todo_id } => {
            let Some(idx) = list.items().iter().position(|item| item.id() == todo_id) else {
                return Ok(Applied::Unchanged);
            };
            let removed = list.items_mut().remove(idx);
            Ok(Applied::Deleted { todo_id: todo_id.clone(), title: removed.title().to_owned() })
        }
    }
}
