// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::*;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyCode;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::{InProcessTransport, Reconciler, SyncKind, WidgetController};
use crate::model::TodoList;
use crate::session::{spawn_push_forwarder, SessionRegistry, PUSH_QUEUE_CAPACITY};
use crate::tools::TodoTools;
use crate::tui::testing::HeadlessTui;
use crate::tui::ControllerActions;

fn new_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().enable_all().build().expect("tokio runtime")
}

/// An assistant (MCP) and a terminal widget sharing one store.
struct CollabHarness {
    runtime: tokio::runtime::Runtime,
    mcp: TodoMcp,
    controller: WidgetController,
    tui: HeadlessTui<ControllerActions>,
    tasks: Vec<JoinHandle<()>>,
}

impl CollabHarness {
    fn new() -> Self {
        let runtime = new_runtime();
        let store = TodoStore::default();
        let mcp = TodoMcp::new(store.clone());
        let registry = Arc::new(SessionRegistry::new(TodoTools::new(store)));

        let (controller, tasks) = runtime.block_on(async {
            let forwarder = spawn_push_forwarder(registry.clone());
            let (tx, rx) = mpsc::channel(PUSH_QUEUE_CAPACITY);
            let transport = InProcessTransport::open(registry.clone(), tx);
            let controller = WidgetController::new(Reconciler::default(), Arc::new(transport));
            let listener = controller.spawn_push_listener(rx);
            (controller, vec![forwarder, listener])
        });

        let actions = ControllerActions::new(controller.clone(), runtime.handle().clone());
        let (list, sync) = controller.blocking_view();
        let tui = HeadlessTui::new(actions, list, sync);
        Self { runtime, mcp, controller, tui, tasks }
    }

    /// Lets in-flight calls and pushes land, then re-renders the widget.
    fn settle(&mut self) {
        // The timer must be created inside the runtime context.
        self.runtime.block_on(async { tokio::time::sleep(Duration::from_millis(20)).await });
        let (list, sync) = self.controller.blocking_view();
        self.tui.show(list, sync);
    }

    fn widget_add(&mut self, title: &str) {
        self.tui.press(KeyCode::Char('a'));
        self.tui.type_text(title);
        self.tui.press(KeyCode::Enter);
        self.tui.press(KeyCode::Esc);
    }

    fn assistant_list(&self) -> TodoList {
        let Json(result) = self
            .runtime
            .block_on(self.mcp.todo_list(Parameters(TodoListParams::default())))
            .expect("todo-list");
        result.list
    }

    fn assistant_add(&self, title: &str) -> ToolResponse {
        let params = AddTodoParams { list_id: None, title: Some(title.to_owned()) };
        let Json(result) =
            self.runtime.block_on(self.mcp.add_todo(Parameters(params))).expect("add_todo");
        result
    }

    fn assistant_delete(&self, todo_id: &str) -> ToolResponse {
        let params = TodoItemParams { list_id: None, todo_id: todo_id.to_owned() };
        let Json(result) =
            self.runtime.block_on(self.mcp.delete_todo(Parameters(params))).expect("delete_todo");
        result
    }

    fn widget_list(&self) -> TodoList {
        self.controller.blocking_view().0
    }
}

impl Drop for CollabHarness {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

#[test]
fn widget_add_reaches_the_assistant() {
    let mut harness = CollabHarness::new();
    harness.widget_add("Buy milk");
    harness.settle();

    let list = harness.assistant_list();
    assert_eq!(list.len(), 1);
    assert_eq!(list.items()[0].title(), "Buy milk");
    assert!(list.items()[0].id().as_str().starts_with("todo-"));

    assert_eq!(harness.widget_list(), list);
    let screen = harness.tui.render(80, 12);
    assert!(screen.contains("[ ] Buy milk"), "{screen}");
    assert!(screen.contains("synced"), "{screen}");
}

#[test]
fn assistant_changes_are_pushed_to_the_widget() {
    let mut harness = CollabHarness::new();
    let response = harness.assistant_add("Walk dog");
    harness.settle();

    assert_eq!(harness.widget_list(), response.list);
    assert!(harness.tui.render(80, 12).contains("[ ] Walk dog"));
}

#[test]
fn mixed_edits_converge_on_one_list() {
    let mut harness = CollabHarness::new();

    harness.widget_add("Buy milk");
    harness.settle();
    let dog = harness.assistant_add("Walk dog").list.items()[0].id().clone();
    harness.settle();

    // Walk dog sits on top; move down to Buy milk and toggle it.
    harness.tui.press(KeyCode::Char('j'));
    harness.tui.press(KeyCode::Char(' '));
    harness.settle();
    harness.assistant_delete(dog.as_str());
    harness.settle();

    let list = harness.assistant_list();
    assert_eq!(list.len(), 1);
    assert_eq!(list.items()[0].title(), "Buy milk");
    assert!(list.items()[0].completed());
    assert_eq!(harness.widget_list(), list);
    assert_eq!(harness.controller.blocking_view().1, SyncKind::Synced);

    let screen = harness.tui.render(80, 12);
    assert!(screen.contains("[x] Buy milk"), "{screen}");
    assert!(!screen.contains("Walk dog"), "{screen}");
}

#[test]
fn widget_delete_removes_item_everywhere() {
    let mut harness = CollabHarness::new();
    harness.assistant_add("Walk dog");
    harness.settle();

    harness.tui.press(KeyCode::Char('d'));
    harness.settle();

    assert!(harness.assistant_list().is_empty());
    assert!(harness.tui.render(80, 12).contains("No items yet"));
}
