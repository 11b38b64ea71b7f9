//! File metadata retrieval, with optional inline content and permissions.

use crate::context::DriveContext;
use crate::drive::FILE_FIELDS;
use crate::error::Result;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetFileRequest {
    /// ID of the file to retrieve
    pub file_id: String,
    /// Whether to include file content (text files only)
    #[serde(default)]
    pub include_content: bool,
    /// Include file permissions
    #[serde(default)]
    pub include_permissions: bool,
}

pub async fn handle_get_file(context: &DriveContext, request: GetFileRequest) -> Result<String> {
    let fields = if request.include_permissions {
        format!("{FILE_FIELDS},permissions")
    } else {
        FILE_FIELDS.to_string()
    };

    let file = context.api().get_file(&request.file_id, &fields).await?;

    let mut content = None;
    if request.include_content
        && file
            .mime_type
            .as_deref()
            .is_some_and(|mime| mime.contains("text"))
    {
        match context.api().download(&request.file_id).await {
            Ok(body) => content = Some(body),
            Err(err) => {
                // Metadata is still useful when the download fails.
                tracing::warn!(file_id = %request.file_id, error = %err, "failed to get file content");
            }
        }
    }

    let response = serde_json::json!({
        "file": file,
        "content": content,
    });
    Ok(serde_json::to_string_pretty(&response)?)
}
