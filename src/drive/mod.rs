//! Google Drive collaborator: wire types, query building, REST client.

pub mod client;
pub mod query;
pub mod types;

pub use client::{DriveApi, HttpDriveClient, NewPermission, FILE_FIELDS, LIST_FIELDS};
pub use types::{
    DriveFile, DriveInfo, DriveList, FileList, FileMetadata, ListParams, Owner, Permission,
    PermissionList, Revision, RevisionList,
};
