//! Drive metadata and shared-drive listing.

use crate::context::DriveContext;
use crate::error::Result;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetDriveInfoRequest {
    /// ID of the drive (defaults to 'root')
    #[serde(default)]
    pub drive_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListSharedDrivesRequest {
    /// Number of drives to return (default: 20)
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Token for pagination
    #[serde(default)]
    pub page_token: Option<String>,
}

pub async fn handle_get_drive_info(
    context: &DriveContext,
    request: GetDriveInfoRequest,
) -> Result<String> {
    let drive_id = request.drive_id.as_deref().unwrap_or("root");
    let drive = context.api().get_drive(drive_id).await?;

    let response = serde_json::json!({ "drive": drive });
    Ok(serde_json::to_string_pretty(&response)?)
}

pub async fn handle_list_shared_drives(
    context: &DriveContext,
    request: ListSharedDrivesRequest,
) -> Result<String> {
    let list = context
        .api()
        .list_drives(
            request.page_size.unwrap_or(20),
            request.page_token.as_deref(),
        )
        .await?;

    let total = list.drives.len();
    let response = serde_json::json!({
        "drives": list.drives,
        "nextPageToken": list.next_page_token,
        "totalResults": total,
    });
    Ok(serde_json::to_string_pretty(&response)?)
}
