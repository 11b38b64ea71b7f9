use drive_mcp::auth::{Credentials, TokenProvider};
use drive_mcp::context::DriveContext;
use drive_mcp::drive::HttpDriveClient;
use drive_mcp::server::DriveServer;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging goes to stderr; stdout carries the MCP protocol.
    drive_mcp::tracing::init();

    tracing::info!("Starting drive-mcp MCP server");

    // Credentials are resolved before serving, so a misconfigured
    // environment fails loudly here instead of on the first tool call.
    let credentials = Credentials::from_env()?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let tokens = Arc::new(TokenProvider::new(credentials, http.clone()));
    let client = Arc::new(HttpDriveClient::new(http, tokens));

    let server = DriveServer::new(DriveContext::new(client));
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;

    Ok(())
}
