// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tidelist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tidelist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoListParams {
    /// Target list identifier. Defaults to the primary list.
    #[serde(default)]
    pub list_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTodoParams {
    /// Target list identifier. Defaults to the primary list.
    #[serde(default)]
    pub list_id: Option<String>,
    /// Title for the todo item. Blank titles become "New item".
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemParams {
    /// Identifier of the target list. Defaults to the primary list.
    #[serde(default)]
    pub list_id: Option<String>,
    /// Identifier of the todo item.
    pub todo_id: String,
}
