//! File revision history.

use crate::context::DriveContext;
use crate::error::Result;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetFileRevisionsRequest {
    /// ID of the file to get revisions for
    pub file_id: String,
    /// Maximum number of revisions to return (default: 10)
    #[serde(default)]
    pub max_results: Option<u32>,
}

pub async fn handle_get_file_revisions(
    context: &DriveContext,
    request: GetFileRevisionsRequest,
) -> Result<String> {
    let list = context
        .api()
        .list_revisions(&request.file_id, request.max_results.unwrap_or(10))
        .await?;

    let total = list.revisions.len();
    let response = serde_json::json!({
        "revisions": list.revisions,
        "totalResults": total,
    });
    Ok(serde_json::to_string_pretty(&response)?)
}
