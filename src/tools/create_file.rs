//! File and folder creation.

use crate::context::DriveContext;
use crate::drive::FileMetadata;
use crate::error::Result;
use rmcp::schemars;
use serde::Deserialize;

const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    /// Name of the file to create
    pub name: String,
    /// MIME type of the file
    pub mime_type: String,
    /// Content of the file
    pub content: String,
    /// ID of the parent folder
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Description of the file
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Name of the folder to create
    pub name: String,
    /// ID of the parent folder
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Description of the folder
    #[serde(default)]
    pub description: Option<String>,
}

pub async fn handle_create_file(
    context: &DriveContext,
    request: CreateFileRequest,
) -> Result<String> {
    let metadata = FileMetadata {
        name: Some(request.name),
        mime_type: Some(request.mime_type),
        description: request.description,
        parents: request.parent_id.map(|id| vec![id]),
        ..Default::default()
    };

    let file = context
        .api()
        .create_file(metadata, Some(request.content))
        .await?;

    let response = serde_json::json!({
        "file": file,
        "message": "File created successfully",
    });
    Ok(serde_json::to_string_pretty(&response)?)
}

pub async fn handle_create_folder(
    context: &DriveContext,
    request: CreateFolderRequest,
) -> Result<String> {
    let metadata = FileMetadata {
        name: Some(request.name),
        mime_type: Some(FOLDER_MIME_TYPE.to_string()),
        description: request.description,
        parents: request.parent_id.map(|id| vec![id]),
        ..Default::default()
    };

    let folder = context.api().create_file(metadata, None).await?;

    let response = serde_json::json!({
        "folder": folder,
        "message": "Folder created successfully",
    });
    Ok(serde_json::to_string_pretty(&response)?)
}
