//! Moving files between folders.

use crate::context::DriveContext;
use crate::error::Result;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveFileRequest {
    /// ID of the file to move
    pub file_id: String,
    /// ID of the destination folder
    pub parent_id: String,
    /// Remove the file from its current parents (default: true)
    #[serde(default = "default_remove_from_parents")]
    pub remove_from_parents: bool,
}

fn default_remove_from_parents() -> bool {
    true
}

pub async fn handle_move_file(context: &DriveContext, request: MoveFileRequest) -> Result<String> {
    // Drive v3 moves are expressed as addParents/removeParents deltas, so
    // the current parents have to be read first.
    let current = context.api().get_file(&request.file_id, "parents").await?;
    let remove_parents = if request.remove_from_parents {
        current
            .parents
            .unwrap_or_default()
            .into_iter()
            .filter(|id| id != &request.parent_id)
            .collect()
    } else {
        Vec::new()
    };

    let file = context
        .api()
        .reparent(&request.file_id, &request.parent_id, &remove_parents)
        .await?;

    let response = serde_json::json!({
        "file": file,
        "message": "File moved successfully",
    });
    Ok(serde_json::to_string_pretty(&response)?)
}
