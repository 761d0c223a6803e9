//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod project_handlers;
mod sync_handlers;

pub use project_handlers::{
    CreateProjectHandler, CreateProjectResponse, DeleteProjectHandler, RenameProjectHandler,
    SwitchActiveProjectHandler,
};
pub use sync_handlers::{
    ImportBackupHandler, ImportBackupResponse, SyncProjectToCloudHandler,
    SyncProjectToCloudResponse, UploadChaptersHandler, UploadChaptersResponse,
    UploadSettingsHandler,
};
