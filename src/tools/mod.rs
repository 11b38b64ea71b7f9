pub mod copy_file;
pub mod create_file;
pub mod delete_file;
pub mod drives;
pub mod file_content;
pub mod get_file;
pub mod list_files;
pub mod move_file;
pub mod permissions;
pub mod revisions;
pub mod search_files;
pub mod update_file;

pub use copy_file::*;
pub use create_file::*;
pub use delete_file::*;
pub use drives::*;
pub use file_content::*;
pub use get_file::*;
pub use list_files::*;
pub use move_file::*;
pub use permissions::*;
pub use revisions::*;
pub use search_files::*;
pub use update_file::*;
