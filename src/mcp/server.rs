// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};

use crate::store::TodoStore;
use crate::tools::{TodoTools, ToolError, ToolResponse};

use super::types::*;

#[derive(Clone)]
pub struct TodoMcp {
    tools: TodoTools,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TodoMcp {
    pub fn new(store: TodoStore) -> Self {
        Self { tools: TodoTools::new(store), tool_router: Self::tool_router() }
    }

    pub fn store(&self) -> &TodoStore {
        self.tools.store()
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Return the current todo list; call this first to learn item ids for `toggle_todo` and
    /// `delete_todo`.
    #[tool(
        name = "todo-list",
        annotations(read_only_hint = true, destructive_hint = false, open_world_hint = false)
    )]
    async fn todo_list(
        &self,
        params: Parameters<TodoListParams>,
    ) -> Result<Json<ToolResponse>, ErrorData> {
        let TodoListParams { list_id } = params.0;
        self.tools.list(list_id.as_deref()).await.map(Json).map_err(tool_error_data)
    }

    /// Add a todo item at the top of a list.
    #[tool(name = "add_todo", annotations(destructive_hint = false, open_world_hint = false))]
    async fn add_todo(
        &self,
        params: Parameters<AddTodoParams>,
    ) -> Result<Json<ToolResponse>, ErrorData> {
        let AddTodoParams { list_id, title } = params.0;
        self.tools
            .add(list_id.as_deref(), title.as_deref())
            .await
            .map(Json)
            .map_err(tool_error_data)
    }

    /// Toggle the completion state of a todo item.
    #[tool(name = "toggle_todo", annotations(destructive_hint = false, open_world_hint = false))]
    async fn toggle_todo(
        &self,
        params: Parameters<TodoItemParams>,
    ) -> Result<Json<ToolResponse>, ErrorData> {
        let TodoItemParams { list_id, todo_id } = params.0;
        self.tools
            .toggle(list_id.as_deref(), Some(todo_id.as_str()))
            .await
            .map(Json)
            .map_err(tool_error_data)
    }

    /// Delete a todo item from a list; deleting an unknown id leaves the list unchanged.
    #[tool(
        name = "delete_todo",
        annotations(destructive_hint = true, idempotent_hint = true, open_world_hint = false)
    )]
    async fn delete_todo(
        &self,
        params: Parameters<TodoItemParams>,
    ) -> Result<Json<ToolResponse>, ErrorData> {
        let TodoItemParams { list_id, todo_id } = params.0;
        self.tools
            .delete(list_id.as_deref(), Some(todo_id.as_str()))
            .await
            .map(Json)
            .map_err(tool_error_data)
    }
}

#[tool_handler]
impl ServerHandler for TodoMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Tidelist todo server (tools: todo-list, add_todo, toggle_todo, delete_todo). Every tool answers with { message, list } where list is the full updated todo list."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

fn tool_error_data(err: ToolError) -> ErrorData {
    match &err {
        ToolError::NotFound { todo_id, .. } => ErrorData::resource_not_found(
            err.to_string(),
            Some(serde_json::json!({ "todoId": todo_id.as_str() })),
        ),
        ToolError::Validation(_) | ToolError::InvalidArguments(_) | ToolError::UnknownTool(_) => {
            ErrorData::invalid_params(err.to_string(), None)
        }
    }
}

#[cfg(test)]
mod e2e;
