// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{ListId, TodoId};

/// Title used for the list a fresh store starts with.
pub const DEFAULT_LIST_TITLE: &str = "My List";

/// Id of the first list in a store.
pub const ROOT_LIST_ID: &str = "list-root";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TodoItem {
    id: TodoId,
    title: String,
    completed: bool,
}

impl TodoItem {
    pub fn new(id: TodoId, title: impl Into<String>) -> Self {
        Self { id, title: title.into(), completed: false }
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub(crate) fn flip(&mut self) {
        self.completed = !self.completed;
    }
}

/// An ordered todo list. Items are kept newest-first.
///
/// Equality is structural: same id, same title, same items in the same order with equal
/// id/title/completed. The reconciler relies on this to recognize echoes of lists it has
/// already adopted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TodoList {
    id: ListId,
    title: String,
    #[serde(default)]
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new(id: ListId, title: impl Into<String>) -> Self {
        Self { id, title: title.into(), items: Vec::new() }
    }

    pub fn id(&self) -> &ListId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<TodoItem> {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, todo_id: &TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id() == todo_id)
    }

    pub fn contains(&self, todo_id: &TodoId) -> bool {
        self.find(todo_id).is_some()
    }

    pub(crate) fn find_mut(&mut self, todo_id: &TodoId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id() == todo_id)
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = TodoItem>) -> Self {
        self.items = items.into_iter().collect();
        self
    }
}
