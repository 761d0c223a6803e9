//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateProjectHandler, DeleteProjectHandler, ImportBackupHandler, RenameProjectHandler,
    SwitchActiveProjectHandler, SyncProjectToCloudHandler, UploadChaptersHandler,
    UploadSettingsHandler,
    // Query handlers
    DownloadChaptersHandler, DownloadSettingsHandler, ExportBackupHandler,
    GetActiveProjectHandler, GetProjectHandler, ListProjectsHandler, SyncProjectFromCloudHandler,
    // Ports
    ProjectStorePort,
};

/// 应用状态
///
/// 存储后端在启动时根据配置二选一（关系型 / 文档型）
pub struct AppState {
    // ========== Ports ==========
    pub store: Arc<dyn ProjectStorePort>,

    // ========== Command Handlers ==========
    pub create_project_handler: CreateProjectHandler,
    pub rename_project_handler: RenameProjectHandler,
    pub delete_project_handler: DeleteProjectHandler,
    pub switch_active_handler: SwitchActiveProjectHandler,
    pub upload_settings_handler: UploadSettingsHandler,
    pub upload_chapters_handler: UploadChaptersHandler,
    pub sync_to_cloud_handler: SyncProjectToCloudHandler,
    pub import_backup_handler: ImportBackupHandler,

    // ========== Query Handlers ==========
    pub get_project_handler: GetProjectHandler,
    pub list_projects_handler: ListProjectsHandler,
    pub get_active_project_handler: GetActiveProjectHandler,
    pub download_settings_handler: DownloadSettingsHandler,
    pub download_chapters_handler: DownloadChaptersHandler,
    pub sync_from_cloud_handler: SyncProjectFromCloudHandler,
    pub export_backup_handler: ExportBackupHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self {
            // Command handlers
            create_project_handler: CreateProjectHandler::new(store.clone()),
            rename_project_handler: RenameProjectHandler::new(store.clone()),
            delete_project_handler: DeleteProjectHandler::new(store.clone()),
            switch_active_handler: SwitchActiveProjectHandler::new(store.clone()),
            upload_settings_handler: UploadSettingsHandler::new(store.clone()),
            upload_chapters_handler: UploadChaptersHandler::new(store.clone()),
            sync_to_cloud_handler: SyncProjectToCloudHandler::new(store.clone()),
            import_backup_handler: ImportBackupHandler::new(store.clone()),

            // Query handlers
            get_project_handler: GetProjectHandler::new(store.clone()),
            list_projects_handler: ListProjectsHandler::new(store.clone()),
            get_active_project_handler: GetActiveProjectHandler::new(store.clone()),
            download_settings_handler: DownloadSettingsHandler::new(store.clone()),
            download_chapters_handler: DownloadChaptersHandler::new(store.clone()),
            sync_from_cloud_handler: SyncProjectFromCloudHandler::new(store.clone()),
            export_backup_handler: ExportBackupHandler::new(store.clone()),

            // Ports
            store,
        }
    }
}
