// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::{ListId, TodoId, TodoList};
use crate::ops::{allocate_todo_id, apply_op, normalize_title, TodoOp, LOCAL_TODO_ID_PREFIX};
use crate::tools::{ToolArguments, ToolCall, ToolName, ToolResponse};

pub const FALLBACK_LIST_ID: &str = "list-local";
pub const FALLBACK_LIST_TITLE: &str = "My Todo List";

/// The empty list shown before any server data arrived.
pub fn default_fallback_list() -> TodoList {
    let list_id = ListId::new(FALLBACK_LIST_ID).unwrap_or_else(|_| ListId::generate("list"));
    TodoList::new(list_id, FALLBACK_LIST_TITLE)
}

/// Where the widget's local list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    /// No local list yet; the view resolves to pushed props or the static fallback.
    Fallback,
    /// A local mutation has not been confirmed by the server yet.
    OptimisticLocal(TodoList),
    /// The local list was adopted from a server response or push.
    ServerSynced(TodoList),
}

impl SyncState {
    pub fn kind(&self) -> SyncKind {
        match self {
            Self::Fallback => SyncKind::Fallback,
            Self::OptimisticLocal(_) => SyncKind::Pending,
            Self::ServerSynced(_) => SyncKind::Synced,
        }
    }

    fn local(&self) -> Option<&TodoList> {
        match self {
            Self::Fallback => None,
            Self::OptimisticLocal(list) | Self::ServerSynced(list) => Some(list),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    Fallback,
    Pending,
    Synced,
}

impl fmt::Display for SyncKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fallback => "offline preview",
            Self::Pending => "syncing",
            Self::Synced => "synced",
        })
    }
}

/// Widget-side state machine reconciling optimistic edits with server responses and pushes.
///
/// The view resolves, in priority order, to the local list, the latest pushed props and the
/// static fallback.
///
/// Two trackers guard against echoes. `last_pushed` holds the last list adopted from a push
/// and is only touched by [`Reconciler::apply_push`]. `last_synced` holds the last list
/// adopted from any server source. A push equal to either one, or a response equal to
/// `last_synced`, never overwrites newer optimistic edits.
#[derive(Debug, Clone)]
pub struct Reconciler {
    fallback: TodoList,
    pushed: Option<TodoList>,
    state: SyncState,
    last_synced: Option<TodoList>,
    last_pushed: Option<TodoList>,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(default_fallback_list())
    }
}

impl Reconciler {
    pub fn new(fallback: TodoList) -> Self {
        Self {
            fallback,
            pushed: None,
            state: SyncState::Fallback,
            last_synced: None,
            last_pushed: None,
        }
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn last_synced(&self) -> Option<&TodoList> {
        self.last_synced.as_ref()
    }

    pub fn last_pushed(&self) -> Option<&TodoList> {
        self.last_pushed.as_ref()
    }

    pub fn resolved(&self) -> &TodoList {
        self.state.local().or(self.pushed.as_ref()).unwrap_or(&self.fallback)
    }

    /// Optimistically adds an item at the head of the resolved list.
    pub fn add(&mut self, title: &str) -> ToolCall {
        let title = normalize_title(Some(title));
        let mut list = self.resolved().clone();
        let todo_id = allocate_todo_id(&list, LOCAL_TODO_ID_PREFIX);
        apply_optimistic(&mut list, &TodoOp::Add { todo_id, title: title.clone() });

        let arguments = ToolArguments {
            title: Some(title),
            list_id: Some(list.id().to_string()),
            todo_id: None,
        };
        self.state = SyncState::OptimisticLocal(list);
        ToolCall::new(ToolName::Add, arguments)
    }

    pub fn toggle(&mut self, todo_id: &TodoId) -> ToolCall {
        self.commit_item_op(ToolName::Toggle, TodoOp::Toggle { todo_id: todo_id.clone() })
    }

    pub fn delete(&mut self, todo_id: &TodoId) -> ToolCall {
        self.commit_item_op(ToolName::Delete, TodoOp::Delete { todo_id: todo_id.clone() })
    }

    /// Reconciles a tool response. Returns `true` when the response replaced local state.
    pub fn apply_response(&mut self, response: ToolResponse) -> bool {
        if self.last_synced.as_ref() == Some(&response.list) {
            tracing::debug!(list_id = %response.list.id(), "response matches last synced list");
            return false;
        }
        self.adopt(response.list);
        true
    }

    /// Reconciles pushed props. Returns `true` when the push replaced local state.
    ///
    /// Absent props reset both trackers. While the widget holds a local list, pushes for a list
    /// other than the last server-adopted one are only remembered as props; a local list that
    /// never came from the server (fallback or preview seed) yields to the first push.
    pub fn apply_push(&mut self, props: Option<TodoList>) -> bool {
        let Some(list) = props else {
            self.pushed = None;
            self.last_pushed = None;
            self.last_synced = None;
            return false;
        };
        self.pushed = Some(list.clone());

        if self.last_pushed.as_ref() == Some(&list) {
            return false;
        }
        if self.last_synced.as_ref() == Some(&list) {
            // Echo of an adopted response; it counts as the last push from here on.
            self.last_pushed = Some(list);
            return false;
        }
        if let (Some(local), Some(synced)) = (self.state.local(), self.last_synced.as_ref()) {
            if synced.id() != list.id() {
                tracing::debug!(
                    pushed = %list.id(),
                    local = %local.id(),
                    "ignoring push for other list"
                );
                return false;
            }
        }
        self.last_pushed = Some(list.clone());
        self.adopt(list);
        true
    }

    /// Reconciles a raw envelope-shaped payload; payloads without a valid list count as absent.
    pub fn apply_push_payload(&mut self, payload: &serde_json::Value) -> bool {
        self.apply_push(ToolResponse::list_from_payload(payload))
    }

    fn commit_item_op(&mut self, tool: ToolName, op: TodoOp) -> ToolCall {
        let mut list = self.resolved().clone();
        apply_optimistic(&mut list, &op);

        let todo_id = match &op {
            TodoOp::Add { todo_id, .. }
            | TodoOp::Toggle { todo_id }
            | TodoOp::Delete { todo_id } => todo_id.to_string(),
        };
        let arguments = ToolArguments {
            title: None,
            list_id: Some(list.id().to_string()),
            todo_id: Some(todo_id),
        };
        self.state = SyncState::OptimisticLocal(list);
        ToolCall::new(tool, arguments)
    }

    fn adopt(&mut self, list: TodoList) {
        tracing::debug!(list_id = %list.id(), items = list.len(), "adopted server list");
        self.last_synced = Some(list.clone());
        self.state = SyncState::ServerSynced(list);
    }
}

/// A local miss leaves the list as is; the call still goes out and the server answers.
fn apply_optimistic(list: &mut TodoList, op: &TodoOp) {
    if let Err(err) = apply_op(list, op) {
        tracing::debug!(error = %err, "optimistic update skipped");
    }
}
