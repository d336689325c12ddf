//! MCP server exposing the todo procedures as tools.
//!
//! Tool names are the procedure names, so an MCP client sees exactly the
//! `getTodos`/`createTodo`/... surface the gateway dispatches.

// The rmcp `#[tool(aggr)]` macro requires ownership of input structs,
// making pass-by-value necessary for all tool handler functions.
#![allow(clippy::needless_pass_by_value)]

use crate::error::Error;
use crate::gateway::Gateway;
use crate::schema::{CreateTodoInput, DeleteTodoInput, ToggleTodoInput, UpdateTodoInput};
use crate::todos::SqliteTodoStore;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::tool;
use rmcp::Error as McpError;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Instructions for the MCP server, shown to clients using this server.
const INSTRUCTIONS: &str = "Todo list server. Use getTodos to see every todo, createTodo to add \
one, updateTodo to change its title, description or completed state (omitted fields are kept, \
a null description clears it), toggleTodo to flip completion, and deleteTodo to remove one.";

/// Map a crate error onto the MCP error space.
fn to_mcp_error(err: Error) -> McpError {
    if err.is_validation() || err.is_not_found() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// MCP server for the todo list.
#[derive(Clone)]
pub struct TodoServer {
    gateway: Arc<Gateway<SqliteTodoStore>>,
}

impl TodoServer {
    /// Create a server over the database at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_path: &Path) -> crate::error::Result<Self> {
        let store = SqliteTodoStore::new(db_path)?;
        Ok(Self { gateway: Arc::new(Gateway::new(store)) })
    }

    /// The gateway the tools dispatch through.
    pub fn gateway(&self) -> &Gateway<SqliteTodoStore> {
        &self.gateway
    }
}

#[tool(tool_box)]
impl TodoServer {
    /// List every todo.
    #[tool(name = "getTodos", description = "List all todos in creation order")]
    fn get_todos(&self) -> Result<CallToolResult, McpError> {
        let todos = self.gateway.get_todos().map_err(to_mcp_error)?;
        json_result(&todos)
    }

    /// Create a todo.
    #[tool(name = "createTodo", description = "Create a todo with a title and optional description")]
    fn create_todo(
        &self,
        #[tool(aggr)] input: CreateTodoInput,
    ) -> Result<CallToolResult, McpError> {
        let todo = self.gateway.create_todo(input).map_err(to_mcp_error)?;
        json_result(&todo)
    }

    /// Update a todo.
    #[tool(
        name = "updateTodo",
        description = "Update a todo's title, description, or completed state"
    )]
    fn update_todo(
        &self,
        #[tool(aggr)] input: UpdateTodoInput,
    ) -> Result<CallToolResult, McpError> {
        let todo = self.gateway.update_todo(input).map_err(to_mcp_error)?;
        json_result(&todo)
    }

    /// Toggle a todo.
    #[tool(name = "toggleTodo", description = "Flip a todo between open and completed")]
    fn toggle_todo(
        &self,
        #[tool(aggr)] input: ToggleTodoInput,
    ) -> Result<CallToolResult, McpError> {
        let todo = self.gateway.toggle_todo(input).map_err(to_mcp_error)?;
        json_result(&todo)
    }

    /// Delete a todo.
    #[tool(name = "deleteTodo", description = "Delete a todo by its ID")]
    fn delete_todo(
        &self,
        #[tool(aggr)] input: DeleteTodoInput,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.gateway.delete_todo(input).map_err(to_mcp_error)?;
        json_result(&outcome)
    }
}

#[rmcp::tool(tool_box)]
impl rmcp::ServerHandler for TodoServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "todo-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}
