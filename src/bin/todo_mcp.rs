//! MCP server binary for the todo list.
//!
//! Serves the todo procedures over stdio. Logs go to a file, since stdout
//! carries the protocol.

use rmcp::ServiceExt;
use todo_rpc::config::TodoConfig;
use todo_rpc::logging;
use todo_rpc::mcp::TodoServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let project_dir = std::env::current_dir()?;
    let config = TodoConfig::load_from(&project_dir)?;

    if let Err(e) = logging::init_file(&config.resolve_log_path(&project_dir), &config.log_level) {
        eprintln!("Warning: MCP logging init failed: {e}");
    }
    logging::install_panic_hook();

    let db_path = config.resolve_database_path(&project_dir);
    let server = TodoServer::new(&db_path)?;
    tracing::info!(db = %db_path.display(), "MCP server created, starting stdio transport");

    let service = server.serve(rmcp::transport::stdio()).await?;
    tracing::info!("MCP server running");
    service.waiting().await?;

    tracing::info!("MCP server shut down");
    Ok(())
}
