//! The Drive API collaborator: trait seam plus the HTTP implementation.
//!
//! Tool handlers and the search orchestrator only ever see [`DriveApi`], so
//! tests swap in an in-memory double. [`HttpDriveClient`] implements the
//! trait over the Drive v3 REST surface with bearer auth, shared-drive
//! scoping, and bounded retry for transient failures.

use crate::auth::TokenProvider;
use crate::drive::types::{
    DriveFile, DriveInfo, DriveList, FileList, FileMetadata, ListParams, Permission,
    PermissionList, RevisionList,
};
use crate::error::DriveError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const API_BASE: &str = "https://www.googleapis.com/drive/v3";
const UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

/// Field projection for listing/search calls.
pub const LIST_FIELDS: &str = "files(id,name,mimeType,modifiedTime,size,webViewLink,parents,description,owners,permissions),nextPageToken";

/// Field projection for single-file metadata reads.
pub const FILE_FIELDS: &str =
    "id,name,mimeType,modifiedTime,size,webViewLink,parents,description,owners,createdTime";

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(1000);

/// New permission to grant on a file.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPermission {
    #[serde(rename = "type")]
    pub kind: String,
    pub role: String,
    pub email_address: String,
}

/// The one external collaborator of this server.
///
/// One method per Drive REST operation the tool layer needs; every method is
/// a single request/response exchange with possible transient failure.
#[async_trait]
pub trait DriveApi: Send + Sync {
    /// One page of `files.list`, scoped to all accessible drives.
    async fn list_files(&self, params: ListParams) -> Result<FileList, DriveError>;

    async fn get_file(&self, file_id: &str, fields: &str) -> Result<DriveFile, DriveError>;

    /// Raw media download, decoded as UTF-8 text.
    async fn download(&self, file_id: &str) -> Result<String, DriveError>;

    /// Google-Docs-format export into `mime_type`.
    async fn export(&self, file_id: &str, mime_type: &str) -> Result<String, DriveError>;

    async fn create_file(
        &self,
        metadata: FileMetadata,
        content: Option<String>,
    ) -> Result<DriveFile, DriveError>;

    async fn update_file(
        &self,
        file_id: &str,
        metadata: FileMetadata,
        content: Option<String>,
    ) -> Result<DriveFile, DriveError>;

    /// Permanent deletion; trashing goes through `update_file`.
    async fn delete_file(&self, file_id: &str) -> Result<(), DriveError>;

    async fn copy_file(
        &self,
        file_id: &str,
        metadata: FileMetadata,
    ) -> Result<DriveFile, DriveError>;

    /// Moves a file between folders via addParents/removeParents.
    async fn reparent(
        &self,
        file_id: &str,
        add_parent: &str,
        remove_parents: &[String],
    ) -> Result<DriveFile, DriveError>;

    async fn list_permissions(&self, file_id: &str) -> Result<PermissionList, DriveError>;

    async fn create_permission(
        &self,
        file_id: &str,
        permission: NewPermission,
        email_message: Option<&str>,
    ) -> Result<Permission, DriveError>;

    async fn get_drive(&self, drive_id: &str) -> Result<DriveInfo, DriveError>;

    async fn list_drives(
        &self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<DriveList, DriveError>;

    async fn list_revisions(&self, file_id: &str, page_size: u32)
    -> Result<RevisionList, DriveError>;
}

/// Drive v3 REST client.
pub struct HttpDriveClient {
    http: reqwest::Client,
    tokens: Arc<TokenProvider>,
}

impl std::fmt::Debug for HttpDriveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDriveClient").finish_non_exhaustive()
    }
}

impl HttpDriveClient {
    pub fn new(http: reqwest::Client, tokens: Arc<TokenProvider>) -> Self {
        Self { http, tokens }
    }

    /// Runs `operation` with exponential backoff on retryable failures.
    ///
    /// Delay doubles per attempt from [`INITIAL_BACKOFF`], plus up to one
    /// second of jitter so synchronized callers do not re-collide.
    async fn with_retries<T, F, Fut>(&self, operation: F) -> Result<T, DriveError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, DriveError>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < MAX_ATTEMPTS && err.is_retryable() => {
                    let delay = INITIAL_BACKOFF * 2u32.pow(attempt - 1) + jitter();
                    tracing::debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying Drive request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn authorized(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, DriveError> {
        let bearer = self.tokens.bearer().await?;
        Ok(builder.bearer_auth(bearer).send().await?)
    }

    /// Decodes a successful response, or maps the structured error payload.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, DriveError> {
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| DriveError::Decode(e.to_string()))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, DriveError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or(body);
        Err(DriveError::Api { code, message })
    }
}

/// Sub-second jitter derived from the wall clock; good enough to spread
/// retry storms without pulling in an RNG.
fn jitter() -> Duration {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    Duration::from_millis(u64::from(nanos % 1000))
}

#[async_trait]
impl DriveApi for HttpDriveClient {
    async fn list_files(&self, params: ListParams) -> Result<FileList, DriveError> {
        let params = &params;
        self.with_retries(move || async move {
            let mut request = self
                .http
                .get(format!("{API_BASE}/files"))
                .query(&[
                    ("pageSize", params.page_size.to_string()),
                    ("fields", params.fields.to_string()),
                    ("includeItemsFromAllDrives", "true".to_string()),
                    ("supportsAllDrives", "true".to_string()),
                ]);
            if let Some(q) = &params.query {
                request = request.query(&[("q", q)]);
            }
            if let Some(order_by) = &params.order_by {
                request = request.query(&[("orderBy", order_by)]);
            }
            if let Some(token) = &params.page_token {
                request = request.query(&[("pageToken", token)]);
            }
            if let Some(drive_id) = &params.drive_id {
                request = request.query(&[("driveId", drive_id.as_str()), ("corpora", "drive")]);
            }
            Self::decode(self.authorized(request).await?).await
        })
        .await
    }

    async fn get_file(&self, file_id: &str, fields: &str) -> Result<DriveFile, DriveError> {
        self.with_retries(move || async move {
            let request = self
                .http
                .get(format!("{API_BASE}/files/{file_id}"))
                .query(&[("fields", fields), ("supportsAllDrives", "true")]);
            Self::decode(self.authorized(request).await?).await
        })
        .await
    }

    async fn download(&self, file_id: &str) -> Result<String, DriveError> {
        self.with_retries(move || async move {
            let request = self
                .http
                .get(format!("{API_BASE}/files/{file_id}"))
                .query(&[("alt", "media"), ("supportsAllDrives", "true")]);
            let response = Self::check_status(self.authorized(request).await?).await?;
            response
                .text()
                .await
                .map_err(|e| DriveError::Decode(e.to_string()))
        })
        .await
    }

    async fn export(&self, file_id: &str, mime_type: &str) -> Result<String, DriveError> {
        self.with_retries(move || async move {
            let request = self
                .http
                .get(format!("{API_BASE}/files/{file_id}/export"))
                .query(&[("mimeType", mime_type)]);
            let response = Self::check_status(self.authorized(request).await?).await?;
            response
                .text()
                .await
                .map_err(|e| DriveError::Decode(e.to_string()))
        })
        .await
    }

    async fn create_file(
        &self,
        metadata: FileMetadata,
        content: Option<String>,
    ) -> Result<DriveFile, DriveError> {
        // Metadata first, then a media upload against the new id. Not
        // atomic, but avoids hand-rolling multipart/related bodies.
        let metadata = &metadata;
        let created: DriveFile = self
            .with_retries(move || async move {
                let request = self
                    .http
                    .post(format!("{API_BASE}/files"))
                    .query(&[("fields", FILE_FIELDS), ("supportsAllDrives", "true")])
                    .json(metadata);
                Self::decode(self.authorized(request).await?).await
            })
            .await?;

        match content {
            Some(body) => self.upload_content(&created.id, body).await,
            None => Ok(created),
        }
    }

    async fn update_file(
        &self,
        file_id: &str,
        metadata: FileMetadata,
        content: Option<String>,
    ) -> Result<DriveFile, DriveError> {
        let metadata = &metadata;
        let updated: DriveFile = self
            .with_retries(move || async move {
                let request = self
                    .http
                    .patch(format!("{API_BASE}/files/{file_id}"))
                    .query(&[("fields", FILE_FIELDS), ("supportsAllDrives", "true")])
                    .json(metadata);
                Self::decode(self.authorized(request).await?).await
            })
            .await?;

        match content {
            Some(body) => self.upload_content(file_id, body).await,
            None => Ok(updated),
        }
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), DriveError> {
        self.with_retries(move || async move {
            let request = self
                .http
                .delete(format!("{API_BASE}/files/{file_id}"))
                .query(&[("supportsAllDrives", "true")]);
            Self::check_status(self.authorized(request).await?).await?;
            Ok(())
        })
        .await
    }

    async fn copy_file(
        &self,
        file_id: &str,
        metadata: FileMetadata,
    ) -> Result<DriveFile, DriveError> {
        let metadata = &metadata;
        self.with_retries(move || async move {
            let request = self
                .http
                .post(format!("{API_BASE}/files/{file_id}/copy"))
                .query(&[("fields", FILE_FIELDS), ("supportsAllDrives", "true")])
                .json(metadata);
            Self::decode(self.authorized(request).await?).await
        })
        .await
    }

    async fn reparent(
        &self,
        file_id: &str,
        add_parent: &str,
        remove_parents: &[String],
    ) -> Result<DriveFile, DriveError> {
        self.with_retries(move || async move {
            let mut request = self
                .http
                .patch(format!("{API_BASE}/files/{file_id}"))
                .query(&[
                    ("fields", "id,name,parents,webViewLink"),
                    ("supportsAllDrives", "true"),
                    ("addParents", add_parent),
                ])
                .json(&serde_json::json!({}));
            if !remove_parents.is_empty() {
                request = request.query(&[("removeParents", remove_parents.join(","))]);
            }
            Self::decode(self.authorized(request).await?).await
        })
        .await
    }

    async fn list_permissions(&self, file_id: &str) -> Result<PermissionList, DriveError> {
        self.with_retries(move || async move {
            let request = self
                .http
                .get(format!("{API_BASE}/files/{file_id}/permissions"))
                .query(&[
                    (
                        "fields",
                        "permissions(id,emailAddress,role,displayName,type,deleted)",
                    ),
                    ("supportsAllDrives", "true"),
                ]);
            Self::decode(self.authorized(request).await?).await
        })
        .await
    }

    async fn create_permission(
        &self,
        file_id: &str,
        permission: NewPermission,
        email_message: Option<&str>,
    ) -> Result<Permission, DriveError> {
        let permission = &permission;
        self.with_retries(move || async move {
            let mut request = self
                .http
                .post(format!("{API_BASE}/files/{file_id}/permissions"))
                .query(&[
                    ("fields", "id,emailAddress,role"),
                    ("supportsAllDrives", "true"),
                ])
                .json(permission);
            if let Some(message) = email_message {
                request = request.query(&[("emailMessage", message)]);
            }
            Self::decode(self.authorized(request).await?).await
        })
        .await
    }

    async fn get_drive(&self, drive_id: &str) -> Result<DriveInfo, DriveError> {
        self.with_retries(move || async move {
            let request = self
                .http
                .get(format!("{API_BASE}/drives/{drive_id}"))
                .query(&[("fields", "id,name,capabilities,restrictions,createdTime")]);
            Self::decode(self.authorized(request).await?).await
        })
        .await
    }

    async fn list_drives(
        &self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<DriveList, DriveError> {
        self.with_retries(move || async move {
            let mut request = self
                .http
                .get(format!("{API_BASE}/drives"))
                .query(&[
                    ("pageSize", page_size.to_string()),
                    (
                        "fields",
                        "drives(id,name,capabilities,restrictions,createdTime),nextPageToken"
                            .to_string(),
                    ),
                ]);
            if let Some(token) = page_token {
                request = request.query(&[("pageToken", token)]);
            }
            Self::decode(self.authorized(request).await?).await
        })
        .await
    }

    async fn list_revisions(
        &self,
        file_id: &str,
        page_size: u32,
    ) -> Result<RevisionList, DriveError> {
        self.with_retries(move || async move {
            let request = self
                .http
                .get(format!("{API_BASE}/files/{file_id}/revisions"))
                .query(&[
                    ("pageSize", page_size.to_string()),
                    (
                        "fields",
                        "revisions(id,mimeType,modifiedTime,size,originalFilename,keepForever,published)"
                            .to_string(),
                    ),
                ]);
            Self::decode(self.authorized(request).await?).await
        })
        .await
    }
}

impl HttpDriveClient {
    async fn upload_content(&self, file_id: &str, body: String) -> Result<DriveFile, DriveError> {
        let body = &body;
        self.with_retries(move || async move {
            let request = self
                .http
                .patch(format!("{UPLOAD_BASE}/files/{file_id}"))
                .query(&[
                    ("uploadType", "media"),
                    ("fields", FILE_FIELDS),
                    ("supportsAllDrives", "true"),
                ])
                .body(body.clone());
            Self::decode(self.authorized(request).await?).await
        })
        .await
    }
}
