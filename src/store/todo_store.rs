// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use crate::model::{ListId, TodoList, DEFAULT_LIST_TITLE, ROOT_LIST_ID};

/// Capacity of the change feed; slow subscribers skip to the newest snapshot.
const CHANGE_FEED_CAPACITY: usize = 64;

#[derive(Debug)]
struct StoreState {
    lists: Vec<TodoList>,
    rev: u64,
}

impl StoreState {
    /// Index of the addressed list; unknown or absent ids fall back to the first list, and an
    /// empty store gets a fresh default list.
    fn resolve_index(&mut self, list_id: Option<&ListId>) -> usize {
        if let Some(list_id) = list_id {
            if let Some(idx) = self.lists.iter().position(|list| list.id() == list_id) {
                return idx;
            }
        }
        if self.lists.is_empty() {
            self.lists.push(TodoList::new(ListId::generate("list"), DEFAULT_LIST_TITLE));
        }
        0
    }
}

/// The authoritative in-memory todo lists.
///
/// Cheap to clone; clones share the same lists. Readers only ever get deep copies, and every
/// mutation goes through [`TodoStore::mutate`].
#[derive(Debug, Clone)]
pub struct TodoStore {
    state: Arc<Mutex<StoreState>>,
    changes: broadcast::Sender<TodoList>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::with_titles([DEFAULT_LIST_TITLE])
    }
}

impl TodoStore {
    pub fn new(lists: Vec<TodoList>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self { state: Arc::new(Mutex::new(StoreState { lists, rev: 0 })), changes }
    }

    /// One empty list per title. The first list gets the stable root id.
    pub fn with_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lists = titles
            .into_iter()
            .enumerate()
            .map(|(idx, title)| {
                let list_id = if idx == 0 {
                    ListId::new(ROOT_LIST_ID).unwrap_or_else(|_| ListId::generate("list"))
                } else {
                    ListId::generate("list")
                };
                TodoList::new(list_id, title)
            })
            .collect();
        Self::new(lists)
    }

    pub async fn snapshot(&self, list_id: Option<&ListId>) -> TodoList {
        let mut state = self.state.lock().await;
        let idx = state.resolve_index(list_id);
        state.lists[idx].clone()
    }

    pub async fn lists(&self) -> Vec<TodoList> {
        self.state.lock().await.lists.clone()
    }

    pub async fn rev(&self) -> u64 {
        self.state.lock().await.rev
    }

    /// Runs `f` against a candidate copy of the addressed list and commits the copy only when
    /// `f` succeeds. Returns `f`'s output plus a snapshot of the committed list.
    pub async fn mutate<R, E>(
        &self,
        list_id: Option<&ListId>,
        f: impl FnOnce(&mut TodoList) -> Result<R, E>,
    ) -> Result<(R, TodoList), E> {
        let mut state = self.state.lock().await;
        let idx = state.resolve_index(list_id);
        let mut candidate = state.lists[idx].clone();
        let output = f(&mut candidate)?;

        let snapshot = candidate.clone();
        state.lists[idx] = candidate;
        state.rev = state.rev.wrapping_add(1);
        let rev = state.rev;
        drop(state);

        // No subscribers is fine; the send only fails when nobody listens.
        let _ = self.changes.send(snapshot.clone());
        tracing::debug!(list_id = %snapshot.id(), rev, items = snapshot.len(), "store mutated");
        Ok((output, snapshot))
    }

    /// Change feed of committed list snapshots.
    pub fn subscribe(&self) -> broadcast::Receiver<TodoList> {
        self.changes.subscribe()
    }
}
