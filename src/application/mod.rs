//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ProjectStore）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Project commands
    CreateProject,
    DeleteProject,
    RenameProject,
    SwitchActiveProject,
    // Sync commands
    ImportBackup,
    SyncProjectToCloud,
    UploadChapters,
    UploadSettings,
    // Handlers
    handlers::{
        CreateProjectHandler, CreateProjectResponse, DeleteProjectHandler, ImportBackupHandler,
        ImportBackupResponse, RenameProjectHandler, SwitchActiveProjectHandler,
        SyncProjectToCloudHandler, SyncProjectToCloudResponse, UploadChaptersHandler,
        UploadChaptersResponse, UploadSettingsHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{ProjectRecord, ProjectStorePort, StoreError};

pub use queries::{
    // Project queries
    GetActiveProject,
    GetProject,
    ListProjects,
    // Sync queries
    DownloadChapters,
    DownloadSettings,
    ExportBackup,
    SyncProjectFromCloud,
    // Handlers
    handlers::{
        DownloadChaptersHandler, DownloadSettingsHandler, ExportBackupHandler,
        ExportBackupResponse, GetActiveProjectHandler, GetProjectHandler, ListProjectsHandler,
        ProjectSnapshot, ProjectView, SyncProjectFromCloudHandler,
    },
};
