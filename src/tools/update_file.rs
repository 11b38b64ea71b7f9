//! File metadata and content updates.

use crate::context::DriveContext;
use crate::drive::FileMetadata;
use crate::error::Result;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileRequest {
    /// ID of the file to update
    pub file_id: String,
    /// New name for the file
    #[serde(default)]
    pub name: Option<String>,
    /// New description for the file
    #[serde(default)]
    pub description: Option<String>,
    /// New content for the file
    #[serde(default)]
    pub content: Option<String>,
}

pub async fn handle_update_file(
    context: &DriveContext,
    request: UpdateFileRequest,
) -> Result<String> {
    if request.name.is_none() && request.description.is_none() && request.content.is_none() {
        anyhow::bail!("nothing to update: provide name, description or content");
    }

    let metadata = FileMetadata {
        name: request.name,
        description: request.description,
        ..Default::default()
    };

    let file = context
        .api()
        .update_file(&request.file_id, metadata, request.content)
        .await?;

    let response = serde_json::json!({
        "file": file,
        "message": "File updated successfully",
    });
    Ok(serde_json::to_string_pretty(&response)?)
}
