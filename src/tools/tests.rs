// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use rstest::rstest;
use serde_json::json;

use crate::model::fixtures::tid;
use crate::ops::DEFAULT_TODO_TITLE;
use crate::store::TodoStore;

use super::{TodoTools, ToolArguments, ToolCall, ToolError, ToolName, ToolResponse};

fn new_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().enable_all().build().expect("tokio runtime")
}

fn tools() -> TodoTools {
    TodoTools::new(TodoStore::default())
}

#[rstest]
#[case("todo-list", ToolName::List)]
#[case("add_todo", ToolName::Add)]
#[case("toggle_todo", ToolName::Toggle)]
#[case("delete_todo", ToolName::Delete)]
fn tool_names_round_trip(#[case] raw: &str, #[case] expected: ToolName) {
    assert_eq!(raw.parse::<ToolName>().expect("tool name"), expected);
    assert_eq!(expected.as_str(), raw);
}

#[test]
fn list_twice_without_mutation_is_identical() {
    let runtime = new_runtime();
    let tools = tools();
    runtime.block_on(async {
        let first = tools.list(None).await.expect("list");
        let second = tools.list(None).await.expect("list");
        assert_eq!(first, second);
        assert_eq!(tools.store().rev().await, 0);
    });
}

#[test]
fn end_to_end_scenario_over_wire_calls() {
    let runtime = new_runtime();
    let tools = tools();
    runtime.block_on(async {
        let call = |name: ToolName, arguments: serde_json::Value| ToolCall {
            name: name.as_str().to_owned(),
            arguments,
        };

        let empty = tools.call(&call(ToolName::List, json!({}))).await.expect("list");
        assert_eq!(empty.list.title(), "My List");
        assert!(empty.list.is_empty());

        let after_milk =
            tools.call(&call(ToolName::Add, json!({ "title": "Buy milk" }))).await.expect("add");
        assert_eq!(after_milk.list.len(), 1);
        let milk = after_milk.list.items()[0].clone();
        assert_eq!(milk.title(), "Buy milk");
        assert!(!milk.completed());

        let after_dog =
            tools.call(&call(ToolName::Add, json!({ "title": "Walk dog" }))).await.expect("add");
        let titles = after_dog.list.items().iter().map(|item| item.title()).collect::<Vec<_>>();
        assert_eq!(titles, ["Walk dog", "Buy milk"]);
        let dog = after_dog.list.items()[0].clone();

        let after_toggle = tools
            .call(&call(ToolName::Toggle, json!({ "todoId": milk.id().as_str() })))
            .await
            .expect("toggle");
        let titles = after_toggle.list.items().iter().map(|item| item.title()).collect::<Vec<_>>();
        assert_eq!(titles, ["Walk dog", "Buy milk"]);
        assert!(after_toggle.list.items()[1].completed());

        let after_delete = tools
            .call(&call(ToolName::Delete, json!({ "todoId": dog.id().as_str() })))
            .await
            .expect("delete");
        assert_eq!(after_delete.list.len(), 1);
        assert_eq!(after_delete.list.items()[0].title(), "Buy milk");
        assert!(after_delete.list.items()[0].completed());
    });
}

#[test]
fn whitespace_title_becomes_placeholder() {
    let runtime = new_runtime();
    let tools = tools();
    let response = runtime.block_on(tools.add(None, Some("   "))).expect("add");
    assert_eq!(response.list.items()[0].title(), DEFAULT_TODO_TITLE);
}

#[test]
fn sequential_adds_produce_distinct_ids() {
    let runtime = new_runtime();
    let tools = tools();
    let list = runtime.block_on(async {
        for idx in 0..50 {
            let title = format!("item {idx}");
            tools.add(None, Some(title.as_str())).await.expect("add");
        }
        tools.list(None).await.expect("list").list
    });
    let ids = list.items().iter().map(|item| item.id().clone()).collect::<HashSet<_>>();
    assert_eq!(ids.len(), 50);
}

#[rstest]
#[case::toggle_missing(ToolName::Toggle, json!({}))]
#[case::toggle_empty(ToolName::Toggle, json!({ "todoId": "" }))]
#[case::delete_missing(ToolName::Delete, json!({}))]
#[case::delete_null_arguments(ToolName::Delete, serde_json::Value::Null)]
fn missing_todo_id_is_a_validation_error(
    #[case] name: ToolName,
    #[case] arguments: serde_json::Value,
) {
    let runtime = new_runtime();
    let tools = tools();
    let err = runtime
        .block_on(tools.call(&ToolCall { name: name.as_str().to_owned(), arguments }))
        .unwrap_err();
    assert!(
        matches!(err, ToolError::Validation(ref message) if message.starts_with("Missing todoId"))
    );
}

#[test]
fn toggle_unknown_id_is_not_found_and_leaves_store_untouched() {
    let runtime = new_runtime();
    let tools = tools();
    runtime.block_on(async {
        tools.add(None, Some("Keep")).await.expect("add");
        let rev = tools.store().rev().await;

        let err = tools.toggle(None, Some("todo-nope")).await.unwrap_err();
        assert_eq!(err, ToolError::NotFound { tool: ToolName::Toggle, todo_id: tid("todo-nope") });
        assert_eq!(tools.store().rev().await, rev);
    });
}

#[test]
fn delete_unknown_id_returns_unchanged_list() {
    let runtime = new_runtime();
    let tools = tools();
    runtime.block_on(async {
        let seeded = tools.add(None, Some("Keep")).await.expect("add");
        let response = tools.delete(None, Some("todo-nope")).await.expect("delete");
        assert_eq!(response.list, seeded.list);
    });
}

#[test]
fn unknown_tool_and_bad_arguments_are_rejected() {
    let runtime = new_runtime();
    let tools = tools();
    runtime.block_on(async {
        let err = tools
            .call(&ToolCall { name: "rename_todo".to_owned(), arguments: json!({}) })
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::UnknownTool("rename_todo".to_owned()));

        let err = tools
            .call(&ToolCall { name: "add_todo".to_owned(), arguments: json!(["nope"]) })
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    });
}

#[rstest]
#[case::array(json!(["Buy milk"]))]
#[case::string(json!("Buy milk"))]
#[case::number(json!(7))]
#[case::boolean(json!(true))]
fn non_object_arguments_are_rejected_without_mutation(#[case] arguments: serde_json::Value) {
    let runtime = new_runtime();
    let tools = tools();
    runtime.block_on(async {
        let err =
            tools.call(&ToolCall { name: "add_todo".to_owned(), arguments }).await.unwrap_err();
        assert!(
            matches!(&err, ToolError::InvalidArguments(msg) if msg.contains("must be an object")),
            "{err:?}"
        );
        assert!(tools.store().snapshot(None).await.is_empty());
    });
}

#[test]
fn calls_address_lists_by_id() {
    let runtime = new_runtime();
    let tools = TodoTools::new(TodoStore::with_titles(["Home", "Work"]));
    runtime.block_on(async {
        let work_id = tools.store().lists().await[1].id().clone();
        let call = ToolCall::new(
            ToolName::Add,
            ToolArguments {
                title: Some("Ship it".to_owned()),
                list_id: Some(work_id.as_str().to_owned()),
                todo_id: None,
            },
        );
        let response = tools.call(&call).await.expect("add");
        assert_eq!(response.list.title(), "Work");
        assert!(tools.list(None).await.expect("list").list.is_empty());
    });
}

#[test]
fn envelope_lookup_ignores_unknown_fields() {
    let payload = json!({
        "message": "hi",
        "_meta": { "openai/toolInvocation/invoked": "Rendered" },
        "list": { "id": "list-root", "title": "My List", "items": [] },
    });
    let list = ToolResponse::list_from_payload(&payload).expect("list");
    assert_eq!(list.title(), "My List");

    assert!(ToolResponse::list_from_payload(&json!({ "todoList": {} })).is_none());
    assert!(ToolResponse::list_from_payload(&json!({ "list": { "items": "nope" } })).is_none());
}
