// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Transport-agnostic todo tool handlers.
//!
//! Every surface (MCP, widget sessions, the embedded terminal widget) ends up here. A handler
//! validates its arguments, applies one op through the store and answers with a
//! [`ToolResponse`] envelope carrying a confirmation message and the list snapshot.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{ListId, TodoId, TodoList};
use crate::ops::{allocate_todo_id, apply_op, Applied, ApplyError, TodoOp, SERVER_TODO_ID_PREFIX};
use crate::store::TodoStore;

/// Field of the response envelope that carries the list snapshot.
pub const LIST_FIELD: &str = "list";

const LIST_MESSAGE: &str = "Rendered a todo list!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    List,
    Add,
    Toggle,
    Delete,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [Self::List, Self::Add, Self::Toggle, Self::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "todo-list",
            Self::Add => "add_todo",
            Self::Toggle => "toggle_todo",
            Self::Delete => "delete_todo",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add => "add",
            Self::Toggle => "toggle",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ToolError::UnknownTool(s.to_owned()))
    }
}

/// Arguments shared by all todo tools; each tool reads the fields it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolArguments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo_id: Option<String>,
}

/// A named tool invocation as it travels over a transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

impl ToolCall {
    pub fn new(name: ToolName, arguments: ToolArguments) -> Self {
        let arguments = serde_json::to_value(arguments)
            .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));
        Self { name: name.as_str().to_owned(), arguments }
    }

    pub fn tool_name(&self) -> Result<ToolName, ToolError> {
        self.name.parse()
    }

    /// Arguments must be a JSON object; `null` counts as no arguments.
    pub fn parsed_arguments(&self) -> Result<ToolArguments, ToolError> {
        match &self.arguments {
            serde_json::Value::Null => Ok(ToolArguments::default()),
            serde_json::Value::Object(_) => serde_json::from_value(self.arguments.clone())
                .map_err(|err| ToolError::InvalidArguments(err.to_string())),
            other => Err(ToolError::InvalidArguments(format!(
                "arguments must be an object, got {}",
                json_kind(other)
            ))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Response envelope returned by every todo tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolResponse {
    pub message: String,
    pub list: TodoList,
}

impl ToolResponse {
    /// Locates the list in an envelope-shaped JSON payload, ignoring any other fields.
    ///
    /// Returns `None` when the field is missing or does not hold a valid list.
    pub fn list_from_payload(payload: &serde_json::Value) -> Option<TodoList> {
        let list = payload.get(LIST_FIELD)?;
        serde_json::from_value(list.clone()).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("{0}")]
    Validation(String),
    #[error("todo not found for {tool} action (todoId={todo_id})")]
    NotFound { tool: ToolName, todo_id: TodoId },
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid tool arguments: {0}")]
    InvalidArguments(String),
}

/// Todo tool handlers bound to a store.
#[derive(Debug, Clone)]
pub struct TodoTools {
    store: TodoStore,
}

impl TodoTools {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Dispatches a wire-level call by name.
    pub async fn call(&self, call: &ToolCall) -> Result<ToolResponse, ToolError> {
        let name = call.tool_name()?;
        let args = call.parsed_arguments()?;
        tracing::debug!(tool = %name, "dispatching tool call");

        match name {
            ToolName::List => self.list(args.list_id.as_deref()).await,
            ToolName::Add => self.add(args.list_id.as_deref(), args.title.as_deref()).await,
            ToolName::Toggle => {
                self.toggle(args.list_id.as_deref(), args.todo_id.as_deref()).await
            }
            ToolName::Delete => {
                self.delete(args.list_id.as_deref(), args.todo_id.as_deref()).await
            }
        }
    }

    pub async fn list(&self, list_id: Option<&str>) -> Result<ToolResponse, ToolError> {
        let list_id = parse_list_id(list_id)?;
        let list = self.store.snapshot(list_id.as_ref()).await;
        Ok(ToolResponse { message: LIST_MESSAGE.to_owned(), list })
    }

    pub async fn add(
        &self,
        list_id: Option<&str>,
        title: Option<&str>,
    ) -> Result<ToolResponse, ToolError> {
        let list_id = parse_list_id(list_id)?;
        let title = title.unwrap_or_default().to_owned();
        let (applied, list) = self
            .store
            .mutate(list_id.as_ref(), |list| {
                let todo_id = allocate_todo_id(list, SERVER_TODO_ID_PREFIX);
                apply_op(list, &TodoOp::Add { todo_id, title })
            })
            .await
            .map_err(|err| map_apply_error(ToolName::Add, err))?;
        Ok(ToolResponse { message: describe(&applied, &list), list })
    }

    pub async fn toggle(
        &self,
        list_id: Option<&str>,
        todo_id: Option<&str>,
    ) -> Result<ToolResponse, ToolError> {
        let list_id = parse_list_id(list_id)?;
        let todo_id = required_todo_id(ToolName::Toggle, todo_id)?;
        let (applied, list) = self
            .store
            .mutate(list_id.as_ref(), |list| apply_op(list, &TodoOp::Toggle { todo_id }))
            .await
            .map_err(|err| map_apply_error(ToolName::Toggle, err))?;
        Ok(ToolResponse { message: describe(&applied, &list), list })
    }

    pub async fn delete(
        &self,
        list_id: Option<&str>,
        todo_id: Option<&str>,
    ) -> Result<ToolResponse, ToolError> {
        let list_id = parse_list_id(list_id)?;
        let todo_id = required_todo_id(ToolName::Delete, todo_id)?;
        let (applied, list) = self
            .store
            .mutate(list_id.as_ref(), |list| apply_op(list, &TodoOp::Delete { todo_id }))
            .await
            .map_err(|err| map_apply_error(ToolName::Delete, err))?;
        Ok(ToolResponse { message: describe(&applied, &list), list })
    }
}

/// Empty list ids mean "the default list".
fn parse_list_id(raw: Option<&str>) -> Result<Option<ListId>, ToolError> {
    match raw.filter(|raw| !raw.is_empty()) {
        None => Ok(None),
        Some(raw) => ListId::new(raw)
            .map(Some)
            .map_err(|err| ToolError::Validation(format!("invalid listId '{raw}': {err}"))),
    }
}

fn required_todo_id(tool: ToolName, raw: Option<&str>) -> Result<TodoId, ToolError> {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return Err(ToolError::Validation(format!("Missing todoId for {}", tool.verb())));
    };
    TodoId::new(raw).map_err(|err| ToolError::Validation(format!("invalid todoId '{raw}': {err}")))
}

fn map_apply_error(tool: ToolName, err: ApplyError) -> ToolError {
    match err {
        ApplyError::NotFound { todo_id } => ToolError::NotFound { tool, todo_id },
        ApplyError::AlreadyExists { .. } => ToolError::Validation(err.to_string()),
    }
}

fn describe(applied: &Applied, list: &TodoList) -> String {
    match applied {
        Applied::Added { title, .. } => format!("Added \"{title}\" to {}.", list.title()),
        Applied::Toggled { todo_id, completed } => {
            let title = list.find(todo_id).map(|item| item.title()).unwrap_or(todo_id.as_str());
            let state = if *completed { "done" } else { "not done" };
            format!("Marked \"{title}\" as {state}.")
        }
        Applied::Deleted { title, .. } => format!("Deleted \"{title}\" from {}.", list.title()),
        Applied::Unchanged => format!("Nothing to delete in {}.", list.title()),
    }
}

#[cfg(test)]
mod tests;
