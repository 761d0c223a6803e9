//! Sync Query Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::ProjectStorePort;
use crate::application::queries::{
    DownloadChapters, DownloadSettings, ExportBackup, SyncProjectFromCloud,
};
use crate::domain::project::{Chapter, NovelSettings};
use crate::domain::{backup_file_name, BackupDocument};

// ============================================================================
// DownloadSettings / DownloadChapters
// ============================================================================

/// DownloadSettings Handler
///
/// 尚未同步过设定的作品返回 None
pub struct DownloadSettingsHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl DownloadSettingsHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: DownloadSettings,
    ) -> Result<Option<NovelSettings>, ApplicationError> {
        self.store
            .find_project(query.project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", query.project_id))?;

        Ok(self.store.fetch_settings(query.project_id).await?)
    }
}

/// DownloadChapters Handler
pub struct DownloadChaptersHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl DownloadChaptersHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: DownloadChapters,
    ) -> Result<Vec<Chapter>, ApplicationError> {
        self.store
            .find_project(query.project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", query.project_id))?;

        Ok(self.store.fetch_chapters(query.project_id).await?)
    }
}

// ============================================================================
// SyncProjectFromCloud
// ============================================================================

/// 整项目拉取响应
#[derive(Debug, Clone)]
pub struct ProjectSnapshot {
    pub project_id: Uuid,
    pub settings: Option<NovelSettings>,
    pub chapters: Vec<Chapter>,
}

/// SyncProjectFromCloud Handler
///
/// 先设定后章节顺序读取，与推送方向对称
pub struct SyncProjectFromCloudHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl SyncProjectFromCloudHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: SyncProjectFromCloud,
    ) -> Result<ProjectSnapshot, ApplicationError> {
        self.store
            .find_project(query.project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", query.project_id))?;

        let settings = self.store.fetch_settings(query.project_id).await?;
        let chapters = self.store.fetch_chapters(query.project_id).await?;

        tracing::info!(
            project_id = %query.project_id,
            has_settings = settings.is_some(),
            chapters = chapters.len(),
            "Project pulled from cloud"
        );

        Ok(ProjectSnapshot {
            project_id: query.project_id,
            settings,
            chapters,
        })
    }
}

// ============================================================================
// ExportBackup
// ============================================================================

/// 导出备份响应
#[derive(Debug, Clone)]
pub struct ExportBackupResponse {
    pub file_name: String,
    pub document: BackupDocument,
}

/// ExportBackup Handler
///
/// 设定 + 章节 + 元数据打包为备份文档，文件名带标题和日期
pub struct ExportBackupHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl ExportBackupHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ExportBackup,
    ) -> Result<ExportBackupResponse, ApplicationError> {
        let record = self
            .store
            .find_project(query.project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", query.project_id))?;

        let settings = self
            .store
            .fetch_settings(query.project_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::business_rule(format!(
                    "Project {} has no settings to export",
                    query.project_id
                ))
            })?;
        let chapters = self.store.fetch_chapters(query.project_id).await?;

        let exported_at = Utc::now();
        let file_name = backup_file_name(&record.title, exported_at);
        let document = BackupDocument::export(settings, chapters, exported_at);

        tracing::info!(
            project_id = %query.project_id,
            file_name = %file_name,
            "Backup exported"
        );

        Ok(ExportBackupResponse {
            file_name,
            document,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::{CreateProject, SyncProjectToCloud};
    use crate::application::{CreateProjectHandler, SyncProjectToCloudHandler};
    use crate::domain::BACKUP_VERSION;
    use crate::infrastructure::memory::InMemoryProjectStore;
    use std::sync::Arc;

    async fn synced_project(store: &Arc<dyn ProjectStorePort>) -> Uuid {
        let id = CreateProjectHandler::new(store.clone())
            .handle(CreateProject {
                user_id: "u_1".to_string(),
                title: "长夜余火".to_string(),
            })
            .await
            .unwrap()
            .id;

        SyncProjectToCloudHandler::new(store.clone())
            .handle(SyncProjectToCloud {
                project_id: id,
                settings: NovelSettings {
                    title: "长夜余火".to_string(),
                    ..NovelSettings::default()
                },
                chapters: vec![
                    Chapter::new(1, "第一章", "正文一"),
                    Chapter::new(2, "第二章", "正文二"),
                ],
            })
            .await
            .unwrap();

        id
    }

    #[tokio::test]
    async fn test_pull_project_returns_both_halves() {
        let store: Arc<dyn ProjectStorePort> = Arc::new(InMemoryProjectStore::new());
        let id = synced_project(&store).await;

        let snapshot = SyncProjectFromCloudHandler::new(store.clone())
            .handle(SyncProjectFromCloud { project_id: id })
            .await
            .unwrap();

        assert_eq!(snapshot.settings.unwrap().title, "长夜余火");
        assert_eq!(snapshot.chapters.len(), 2);
        assert_eq!(snapshot.chapters[0].number, 1);
    }

    #[tokio::test]
    async fn test_pull_unsynced_project_has_no_settings() {
        let store: Arc<dyn ProjectStorePort> = Arc::new(InMemoryProjectStore::new());
        let id = CreateProjectHandler::new(store.clone())
            .handle(CreateProject {
                user_id: "u_1".to_string(),
                title: "空项目".to_string(),
            })
            .await
            .unwrap()
            .id;

        let snapshot = SyncProjectFromCloudHandler::new(store.clone())
            .handle(SyncProjectFromCloud { project_id: id })
            .await
            .unwrap();
        assert!(snapshot.settings.is_none());
        assert!(snapshot.chapters.is_empty());
    }

    #[tokio::test]
    async fn test_export_backup_shape() {
        let store: Arc<dyn ProjectStorePort> = Arc::new(InMemoryProjectStore::new());
        let id = synced_project(&store).await;

        let result = ExportBackupHandler::new(store.clone())
            .handle(ExportBackup { project_id: id })
            .await
            .unwrap();

        assert!(result.file_name.starts_with("长夜余火_backup_"));
        assert!(result.file_name.ends_with(".json"));
        assert_eq!(result.document.version.as_deref(), Some(BACKUP_VERSION));
        assert!(result.document.export_date.is_some());
        assert_eq!(result.document.chapters.len(), 2);
    }

    #[tokio::test]
    async fn test_export_without_settings_is_rejected() {
        let store: Arc<dyn ProjectStorePort> = Arc::new(InMemoryProjectStore::new());
        let id = CreateProjectHandler::new(store.clone())
            .handle(CreateProject {
                user_id: "u_1".to_string(),
                title: "空项目".to_string(),
            })
            .await
            .unwrap()
            .id;

        let err = ExportBackupHandler::new(store.clone())
            .handle(ExportBackup { project_id: id })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));
    }
}
