//! File content download and Google-Docs export.

use crate::context::DriveContext;
use crate::error::Result;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetFileContentRequest {
    /// ID of the file to get content from
    pub file_id: String,
    /// MIME type for export (e.g. 'text/plain', 'application/pdf')
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Encoding hint for text files (e.g. 'utf-8')
    #[serde(default)]
    pub encoding: Option<String>,
}

pub async fn handle_get_file_content(
    context: &DriveContext,
    request: GetFileContentRequest,
) -> Result<String> {
    // Google-native formats must be exported; everything else downloads raw.
    let content = match &request.mime_type {
        Some(mime) => context.api().export(&request.file_id, mime).await?,
        None => context.api().download(&request.file_id).await?,
    };

    let response = serde_json::json!({
        "content": content,
        "mimeType": request.mime_type.as_deref().unwrap_or("raw"),
        "encoding": request.encoding.as_deref().unwrap_or("utf-8"),
    });
    Ok(serde_json::to_string_pretty(&response)?)
}
