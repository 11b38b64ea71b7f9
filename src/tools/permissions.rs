//! Permission listing and sharing.

use crate::context::DriveContext;
use crate::drive::NewPermission;
use crate::error::Result;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetFilePermissionsRequest {
    /// ID of the file to get permissions for
    pub file_id: String,
}

/// Role granted to the user a file is shared with.
#[derive(Debug, Clone, Copy, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShareRole {
    Reader,
    Writer,
    Commenter,
    Owner,
}

impl ShareRole {
    fn as_str(self) -> &'static str {
        match self {
            Self::Reader => "reader",
            Self::Writer => "writer",
            Self::Commenter => "commenter",
            Self::Owner => "owner",
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareFileRequest {
    /// ID of the file to share
    pub file_id: String,
    /// Email address to share with
    pub email: String,
    /// Role for the user
    pub role: ShareRole,
    /// Message to include in the sharing notification email
    #[serde(default)]
    pub message: Option<String>,
}

pub async fn handle_get_file_permissions(
    context: &DriveContext,
    request: GetFilePermissionsRequest,
) -> Result<String> {
    let list = context.api().list_permissions(&request.file_id).await?;

    let total = list.permissions.len();
    let response = serde_json::json!({
        "permissions": list.permissions,
        "totalResults": total,
    });
    Ok(serde_json::to_string_pretty(&response)?)
}

pub async fn handle_share_file(
    context: &DriveContext,
    request: ShareFileRequest,
) -> Result<String> {
    let permission = NewPermission {
        kind: "user".to_string(),
        role: request.role.as_str().to_string(),
        email_address: request.email,
    };

    let created = context
        .api()
        .create_permission(&request.file_id, permission, request.message.as_deref())
        .await?;

    let response = serde_json::json!({
        "permission": created,
        "message": "File shared successfully",
    });
    Ok(serde_json::to_string_pretty(&response)?)
}
