//! Plain paged listing with a raw Drive query string.

use crate::context::DriveContext;
use crate::drive::{ListParams, LIST_FIELDS};
use crate::error::Result;
use rmcp::schemars;
use serde::Deserialize;

const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesRequest {
    /// Number of files to return (default: 20)
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Token for pagination
    #[serde(default)]
    pub page_token: Option<String>,
    /// Order by field (e.g. 'name', 'modifiedTime', 'size')
    #[serde(default)]
    pub order_by: Option<String>,
    /// Raw Drive query string to filter files
    #[serde(default)]
    pub q: Option<String>,
    /// ID of a shared drive to scope the listing to
    #[serde(default)]
    pub drive_id: Option<String>,
}

pub async fn handle_list_files(context: &DriveContext, request: ListFilesRequest) -> Result<String> {
    let list = context
        .api()
        .list_files(ListParams {
            query: request.q,
            page_size: request.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            page_token: request.page_token,
            order_by: Some(
                request
                    .order_by
                    .unwrap_or_else(|| "modifiedTime desc".to_string()),
            ),
            drive_id: request.drive_id,
            fields: LIST_FIELDS,
        })
        .await?;

    let total = list.files.len();
    let response = serde_json::json!({
        "files": list.files,
        "nextPageToken": list.next_page_token,
        "totalResults": total,
    });
    Ok(serde_json::to_string_pretty(&response)?)
}
