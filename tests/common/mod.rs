//! Shared test double for the Drive collaborator.
//!
//! `MockDrive` answers `files.list` calls from an in-memory file set using
//! literal substring matching on the `name contains '…'` clause — the same
//! semantics the real API applies — and records every request so tests can
//! assert on fan-out behavior. Individual search terms (or the whole mock)
//! can be made to fail to exercise the partial/total failure paths.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use drive_mcp::drive::{
    DriveApi, DriveFile, DriveInfo, DriveList, FileList, FileMetadata, ListParams, NewPermission,
    Permission, PermissionList, RevisionList,
};
use drive_mcp::error::DriveError;
use std::sync::Mutex;

/// A file in the mock corpus: (id, name, modified time).
pub fn file(id: &str, name: &str, modified: DateTime<Utc>) -> DriveFile {
    DriveFile {
        id: id.to_string(),
        name: name.to_string(),
        mime_type: Some("application/vnd.google-apps.document".to_string()),
        modified_time: Some(modified),
        size: Some(1024),
        web_view_link: Some(format!("https://drive.example/{id}")),
        ..Default::default()
    }
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

#[derive(Default)]
pub struct MockDrive {
    files: Vec<DriveFile>,
    /// Search terms whose requests fail with a transient error.
    failing_terms: Vec<String>,
    fail_all: bool,
    /// Every filter expression received, in arrival order.
    pub filters: Mutex<Vec<String>>,
    /// Page sizes received, in arrival order.
    pub page_sizes: Mutex<Vec<u32>>,
}

impl MockDrive {
    pub fn with_files(files: Vec<DriveFile>) -> Self {
        Self {
            files,
            ..Default::default()
        }
    }

    /// Requests whose name term equals `term` will fail.
    pub fn failing_on(mut self, term: &str) -> Self {
        self.failing_terms.push(term.to_string());
        self
    }

    pub fn failing_always(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn request_count(&self) -> usize {
        self.filters.lock().unwrap().len()
    }

    /// Extracts the literal from a `name contains '…'` clause.
    fn name_term(filter: &str) -> Option<&str> {
        let start = filter.find("name contains '")? + "name contains '".len();
        let rest = &filter[start..];
        let end = rest.find('\'')?;
        Some(&rest[..end])
    }
}

#[async_trait]
impl DriveApi for MockDrive {
    async fn list_files(&self, params: ListParams) -> Result<FileList, DriveError> {
        let filter = params.query.clone().unwrap_or_default();
        self.filters.lock().unwrap().push(filter.clone());
        self.page_sizes.lock().unwrap().push(params.page_size);

        let term = Self::name_term(&filter).unwrap_or_default();

        if self.fail_all || self.failing_terms.iter().any(|t| t == term) {
            return Err(DriveError::Api {
                code: 503,
                message: format!("backend unavailable for '{term}'"),
            });
        }

        let term_lower = term.to_lowercase();
        let files = self
            .files
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&term_lower))
            .take(params.page_size as usize)
            .cloned()
            .collect();

        Ok(FileList {
            files,
            next_page_token: None,
        })
    }

    async fn get_file(&self, file_id: &str, _fields: &str) -> Result<DriveFile, DriveError> {
        self.files
            .iter()
            .find(|f| f.id == file_id)
            .cloned()
            .ok_or_else(|| DriveError::Api {
                code: 404,
                message: format!("file not found: {file_id}"),
            })
    }

    async fn download(&self, _file_id: &str) -> Result<String, DriveError> {
        Ok("mock content".to_string())
    }

    async fn export(&self, _file_id: &str, _mime_type: &str) -> Result<String, DriveError> {
        Ok("mock export".to_string())
    }

    async fn create_file(
        &self,
        _metadata: FileMetadata,
        _content: Option<String>,
    ) -> Result<DriveFile, DriveError> {
        unimplemented!("not exercised by search tests")
    }

    async fn update_file(
        &self,
        _file_id: &str,
        _metadata: FileMetadata,
        _content: Option<String>,
    ) -> Result<DriveFile, DriveError> {
        unimplemented!("not exercised by search tests")
    }

    async fn delete_file(&self, _file_id: &str) -> Result<(), DriveError> {
        unimplemented!("not exercised by search tests")
    }

    async fn copy_file(
        &self,
        _file_id: &str,
        _metadata: FileMetadata,
    ) -> Result<DriveFile, DriveError> {
        unimplemented!("not exercised by search tests")
    }

    async fn reparent(
        &self,
        _file_id: &str,
        _add_parent: &str,
        _remove_parents: &[String],
    ) -> Result<DriveFile, DriveError> {
        unimplemented!("not exercised by search tests")
    }

    async fn list_permissions(&self, _file_id: &str) -> Result<PermissionList, DriveError> {
        unimplemented!("not exercised by search tests")
    }

    async fn create_permission(
        &self,
        _file_id: &str,
        _permission: NewPermission,
        _email_message: Option<&str>,
    ) -> Result<Permission, DriveError> {
        unimplemented!("not exercised by search tests")
    }

    async fn get_drive(&self, _drive_id: &str) -> Result<DriveInfo, DriveError> {
        unimplemented!("not exercised by search tests")
    }

    async fn list_drives(
        &self,
        _page_size: u32,
        _page_token: Option<&str>,
    ) -> Result<DriveList, DriveError> {
        unimplemented!("not exercised by search tests")
    }

    async fn list_revisions(
        &self,
        _file_id: &str,
        _page_size: u32,
    ) -> Result<RevisionList, DriveError> {
        unimplemented!("not exercised by search tests")
    }
}
