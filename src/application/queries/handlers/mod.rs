//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod project_handlers;
mod sync_handlers;

pub use project_handlers::{
    GetActiveProjectHandler, GetProjectHandler, ListProjectsHandler, ProjectView,
};
pub use sync_handlers::{
    DownloadChaptersHandler, DownloadSettingsHandler, ExportBackupHandler, ExportBackupResponse,
    ProjectSnapshot, SyncProjectFromCloudHandler,
};
