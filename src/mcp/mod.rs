//! MCP (Model Context Protocol) server for the todo procedures.

#[cfg(feature = "mcp")]
pub mod todo_server;

#[cfg(feature = "mcp")]
pub use todo_server::TodoServer;
