//! File deletion: trash by default, permanent on request.

use crate::context::DriveContext;
use crate::drive::FileMetadata;
use crate::error::Result;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileRequest {
    /// ID of the file to delete
    pub file_id: String,
    /// Permanently delete the file instead of moving it to trash
    #[serde(default)]
    pub permanent: bool,
}

pub async fn handle_delete_file(
    context: &DriveContext,
    request: DeleteFileRequest,
) -> Result<String> {
    if request.permanent {
        context.api().delete_file(&request.file_id).await?;
    } else {
        let metadata = FileMetadata {
            trashed: Some(true),
            ..Default::default()
        };
        context
            .api()
            .update_file(&request.file_id, metadata, None)
            .await?;
    }

    let response = serde_json::json!({
        "message": if request.permanent {
            "File permanently deleted"
        } else {
            "File moved to trash"
        },
        "fileId": request.file_id,
    });
    Ok(serde_json::to_string_pretty(&response)?)
}
