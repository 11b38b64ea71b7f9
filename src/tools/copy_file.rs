//! Server-side file copy.

use crate::context::DriveContext;
use crate::drive::FileMetadata;
use crate::error::Result;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CopyFileRequest {
    /// ID of the file to copy
    pub file_id: String,
    /// Name for the copied file
    #[serde(default)]
    pub name: Option<String>,
    /// ID of the destination folder
    #[serde(default)]
    pub parent_id: Option<String>,
}

pub async fn handle_copy_file(context: &DriveContext, request: CopyFileRequest) -> Result<String> {
    let metadata = FileMetadata {
        name: request.name,
        parents: request.parent_id.map(|id| vec![id]),
        ..Default::default()
    };

    let file = context.api().copy_file(&request.file_id, metadata).await?;

    let response = serde_json::json!({
        "file": file,
        "message": "File copied successfully",
    });
    Ok(serde_json::to_string_pretty(&response)?)
}
