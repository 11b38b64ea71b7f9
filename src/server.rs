//! MCP server implementation: tool routing over the shared Drive context.

use crate::context::DriveContext;
use crate::tools::{
    handle_copy_file, handle_create_file, handle_create_folder, handle_delete_file,
    handle_get_drive_info, handle_get_file, handle_get_file_content, handle_get_file_permissions,
    handle_get_file_revisions, handle_list_files, handle_list_shared_drives, handle_move_file,
    handle_search_files, handle_share_file, handle_update_file, CopyFileRequest,
    CreateFileRequest, CreateFolderRequest, DeleteFileRequest, GetDriveInfoRequest,
    GetFileContentRequest, GetFilePermissionsRequest, GetFileRequest, GetFileRevisionsRequest,
    ListFilesRequest, ListSharedDrivesRequest, MoveFileRequest, SearchFilesRequest,
    ShareFileRequest, UpdateFileRequest,
};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server exposing Google Drive operations as tools.
#[derive(Clone)]
pub struct DriveServer {
    /// Shared Drive client and response cache
    context: DriveContext,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DriveServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveServer")
            .field("context", &self.context)
            .finish()
    }
}

#[tool_router]
impl DriveServer {
    pub fn new(context: DriveContext) -> Self {
        Self {
            context,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search for files in Google Drive by name. Tolerant of casing, separators and missing diacritics: the query is expanded into multiple variants and results are ranked by relevance."
    )]
    async fn search_files(
        &self,
        Parameters(request): Parameters<SearchFilesRequest>,
    ) -> std::result::Result<String, String> {
        handle_search_files(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Get file metadata and optionally content")]
    async fn get_file(
        &self,
        Parameters(request): Parameters<GetFileRequest>,
    ) -> std::result::Result<String, String> {
        handle_get_file(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "List files in Google Drive with optional filtering")]
    async fn list_files(
        &self,
        Parameters(request): Parameters<ListFilesRequest>,
    ) -> std::result::Result<String, String> {
        handle_list_files(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Get file content, either raw or exported to a given MIME type")]
    async fn get_file_content(
        &self,
        Parameters(request): Parameters<GetFileContentRequest>,
    ) -> std::result::Result<String, String> {
        handle_get_file_content(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Create a new file in Google Drive")]
    async fn create_file(
        &self,
        Parameters(request): Parameters<CreateFileRequest>,
    ) -> std::result::Result<String, String> {
        handle_create_file(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Update an existing file in Google Drive")]
    async fn update_file(
        &self,
        Parameters(request): Parameters<UpdateFileRequest>,
    ) -> std::result::Result<String, String> {
        handle_update_file(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Delete a file from Google Drive (trash by default, permanent on request)")]
    async fn delete_file(
        &self,
        Parameters(request): Parameters<DeleteFileRequest>,
    ) -> std::result::Result<String, String> {
        handle_delete_file(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Copy a file to a new location")]
    async fn copy_file(
        &self,
        Parameters(request): Parameters<CopyFileRequest>,
    ) -> std::result::Result<String, String> {
        handle_copy_file(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Move a file to a new folder")]
    async fn move_file(
        &self,
        Parameters(request): Parameters<MoveFileRequest>,
    ) -> std::result::Result<String, String> {
        handle_move_file(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Create a new folder in Google Drive")]
    async fn create_folder(
        &self,
        Parameters(request): Parameters<CreateFolderRequest>,
    ) -> std::result::Result<String, String> {
        handle_create_folder(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Get permissions for a file")]
    async fn get_file_permissions(
        &self,
        Parameters(request): Parameters<GetFilePermissionsRequest>,
    ) -> std::result::Result<String, String> {
        handle_get_file_permissions(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(
        description = "Share a file with another user",
        input_schema = inline_schema_for_type::<ShareFileRequest>()
    )]
    async fn share_file(
        &self,
        Parameters(request): Parameters<ShareFileRequest>,
    ) -> std::result::Result<String, String> {
        handle_share_file(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Get information about a drive")]
    async fn get_drive_info(
        &self,
        Parameters(request): Parameters<GetDriveInfoRequest>,
    ) -> std::result::Result<String, String> {
        handle_get_drive_info(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "List all shared drives")]
    async fn list_shared_drives(
        &self,
        Parameters(request): Parameters<ListSharedDrivesRequest>,
    ) -> std::result::Result<String, String> {
        handle_list_shared_drives(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Get revision history of a file")]
    async fn get_file_revisions(
        &self,
        Parameters(request): Parameters<GetFileRevisionsRequest>,
    ) -> std::result::Result<String, String> {
        handle_get_file_revisions(&self.context, request)
            .await
            .map_err(|e| e.to_string())
    }
}

#[tool_handler]
impl ServerHandler for DriveServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(
            ServerCapabilities::builder()
                .enable_tools()
                .build(),
        )
        .with_protocol_version(ProtocolVersion::V_2024_11_05)
        .with_server_info(Implementation::from_build_env())
        .with_instructions(
            "drive-mcp: Google Drive tools for AI assistants. \
             search_files ranks results by relevance and tolerates casing, \
             separator and diacritic differences; the remaining tools map \
             one-to-one onto Drive operations.",
        )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// to generate inline enum definitions instead of $ref patterns. This ensures MCP Inspector
/// displays enums (like the sharing role) as dropdown widgets rather than raw JSON input.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(rmcp::schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}
