// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![cfg(test)]

use super::ids::{ListId, TodoId};
use super::todo::{TodoItem, TodoList, DEFAULT_LIST_TITLE, ROOT_LIST_ID};

pub(crate) fn tid(value: &str) -> TodoId {
    TodoId::new(value).expect("todo id")
}

pub(crate) fn lid(value: &str) -> ListId {
    ListId::new(value).expect("list id")
}

pub(crate) fn empty_root_list() -> TodoList {
    TodoList::new(lid(ROOT_LIST_ID), DEFAULT_LIST_TITLE)
}

/// `Walk dog` (open) above `Buy milk` (done), newest-first.
pub(crate) fn errands_list() -> TodoList {
    let mut milk = TodoItem::new(tid("todo-milk"), "Buy milk");
    milk.set_completed(true);
    empty_root_list().with_items([TodoItem::new(tid("todo-dog"), "Walk dog"), milk])
}
