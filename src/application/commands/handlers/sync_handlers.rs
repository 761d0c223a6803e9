//! Sync Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{
    ImportBackup, SyncProjectToCloud, UploadChapters, UploadSettings,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{ProjectRecord, ProjectStorePort};
use crate::domain::project::{Project, ProjectSource, Title, UserId};
use crate::domain::BackupDocument;

// ============================================================================
// UploadSettings
// ============================================================================

/// UploadSettings Handler - 设定单文档 upsert
pub struct UploadSettingsHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl UploadSettingsHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: UploadSettings) -> Result<(), ApplicationError> {
        self.ensure_project(command.project_id).await?;
        self.store
            .upsert_settings(command.project_id, &command.settings)
            .await?;

        tracing::info!(project_id = %command.project_id, "Settings uploaded");
        Ok(())
    }

    async fn ensure_project(&self, project_id: Uuid) -> Result<(), ApplicationError> {
        self.store
            .find_project(project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", project_id))?;
        Ok(())
    }
}

// ============================================================================
// UploadChapters
// ============================================================================

/// 上传章节响应
#[derive(Debug, Clone)]
pub struct UploadChaptersResponse {
    pub project_id: Uuid,
    pub count: usize,
}

/// UploadChapters Handler - 按 number 匹配持久化
pub struct UploadChaptersHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl UploadChaptersHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        command: UploadChapters,
    ) -> Result<UploadChaptersResponse, ApplicationError> {
        self.store
            .find_project(command.project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", command.project_id))?;

        let count = command.chapters.len();
        self.store
            .upload_chapters(command.project_id, &command.chapters)
            .await?;

        tracing::info!(
            project_id = %command.project_id,
            chapters = count,
            "Chapters uploaded"
        );

        Ok(UploadChaptersResponse {
            project_id: command.project_id,
            count,
        })
    }
}

// ============================================================================
// SyncProjectToCloud
// ============================================================================

/// 整项目推送响应
#[derive(Debug, Clone)]
pub struct SyncProjectToCloudResponse {
    pub project_id: Uuid,
    pub chapters: usize,
    pub synced_at: chrono::DateTime<Utc>,
}

/// SyncProjectToCloud Handler
///
/// 先设定后章节顺序上传，全部成功后盖 last_synced_at。
/// 章节阶段失败时设定已入库，不回滚
pub struct SyncProjectToCloudHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl SyncProjectToCloudHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        command: SyncProjectToCloud,
    ) -> Result<SyncProjectToCloudResponse, ApplicationError> {
        self.store
            .find_project(command.project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", command.project_id))?;

        self.store
            .upsert_settings(command.project_id, &command.settings)
            .await?;

        self.store
            .upload_chapters(command.project_id, &command.chapters)
            .await?;

        let synced_at = Utc::now();
        self.store
            .touch_last_synced(command.project_id, synced_at)
            .await?;

        tracing::info!(
            project_id = %command.project_id,
            chapters = command.chapters.len(),
            "Project pushed to cloud"
        );

        Ok(SyncProjectToCloudResponse {
            project_id: command.project_id,
            chapters: command.chapters.len(),
            synced_at,
        })
    }
}

// ============================================================================
// ImportBackup
// ============================================================================

/// 导入备份响应
#[derive(Debug, Clone)]
pub struct ImportBackupResponse {
    pub project_id: Uuid,
    pub title: String,
    pub chapters: usize,
}

/// ImportBackup Handler
///
/// 解析备份 → 新建 imported 作品 → 设定与章节原样入库。
/// 备份里的 version 字符串不做校验
pub struct ImportBackupHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl ImportBackupHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        command: ImportBackup,
    ) -> Result<ImportBackupResponse, ApplicationError> {
        let backup = BackupDocument::parse(&command.raw)?;

        let user_id = UserId::new(command.user_id).map_err(ApplicationError::validation)?;
        // 备份里的标题可能为空，给导入的作品一个兜底名
        let title = if backup.settings.title.trim().is_empty() {
            Title::new("未命名作品").map_err(ApplicationError::validation)?
        } else {
            Title::new(backup.settings.title.clone()).map_err(ApplicationError::validation)?
        };

        let project = Project::new(user_id, title, ProjectSource::Imported);
        let record = ProjectRecord::from(&project);
        self.store.insert_project(&record).await?;

        self.store
            .upsert_settings(record.id, &backup.settings)
            .await?;
        self.store
            .upload_chapters(record.id, &backup.chapters)
            .await?;

        tracing::info!(
            project_id = %record.id,
            title = %record.title,
            chapters = backup.chapters.len(),
            "Backup imported"
        );

        Ok(ImportBackupResponse {
            project_id: record.id,
            title: record.title,
            chapters: backup.chapters.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::CreateProject;
    use crate::application::CreateProjectHandler;
    use crate::domain::project::{Chapter, NovelSettings};
    use crate::infrastructure::memory::InMemoryProjectStore;

    fn store() -> Arc<dyn ProjectStorePort> {
        Arc::new(InMemoryProjectStore::new())
    }

    async fn create(store: &Arc<dyn ProjectStorePort>, title: &str) -> Uuid {
        CreateProjectHandler::new(store.clone())
            .handle(CreateProject {
                user_id: "u_1".to_string(),
                title: title.to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn sample_settings() -> NovelSettings {
        NovelSettings {
            title: "测试书".to_string(),
            gold_finger: "读心术".to_string(),
            ..NovelSettings::default()
        }
    }

    #[tokio::test]
    async fn test_upload_settings_requires_existing_project() {
        let err = UploadSettingsHandler::new(store())
            .handle(UploadSettings {
                project_id: Uuid::new_v4(),
                settings: sample_settings(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_push_project_stamps_last_synced() {
        let store = store();
        let id = create(&store, "测试书").await;

        let result = SyncProjectToCloudHandler::new(store.clone())
            .handle(SyncProjectToCloud {
                project_id: id,
                settings: sample_settings(),
                chapters: vec![Chapter::new(1, "第一章", "正文")],
            })
            .await
            .unwrap();
        assert_eq!(result.chapters, 1);

        let record = store.find_project(id).await.unwrap().unwrap();
        assert_eq!(
            record.last_synced_at.unwrap().timestamp_millis(),
            result.synced_at.timestamp_millis()
        );
        assert!(store.fetch_settings(id).await.unwrap().is_some());
        assert_eq!(store.fetch_chapters(id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_backup_creates_imported_project() {
        let store = store();
        let raw = r#"{
            "settings": {"title": "修真聊天群", "goldFinger": "聊天群"},
            "chapters": [{"number": 1, "title": "第一章", "content": "正文"}],
            "version": "1.0"
        }"#;

        let result = ImportBackupHandler::new(store.clone())
            .handle(ImportBackup {
                user_id: "u_1".to_string(),
                raw: raw.to_string(),
            })
            .await
            .unwrap();
        assert_eq!(result.title, "修真聊天群");
        assert_eq!(result.chapters, 1);

        let record = store.find_project(result.project_id).await.unwrap().unwrap();
        assert_eq!(record.source, ProjectSource::Imported);

        // 设定原样入库
        let settings = store
            .fetch_settings(result.project_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(settings.gold_finger, "聊天群");
    }

    #[tokio::test]
    async fn test_import_backup_without_settings_is_rejected() {
        let err = ImportBackupHandler::new(store())
            .handle(ImportBackup {
                user_id: "u_1".to_string(),
                raw: r#"{"chapters":[]}"#.to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_import_backup_with_blank_title_gets_fallback_name() {
        let store = store();
        let result = ImportBackupHandler::new(store.clone())
            .handle(ImportBackup {
                user_id: "u_1".to_string(),
                raw: r#"{"settings":{}}"#.to_string(),
            })
            .await
            .unwrap();
        assert_eq!(result.title, "未命名作品");
    }

    #[tokio::test]
    async fn test_import_ignores_unknown_version() {
        // 版本串只在导出时盖章，导入不做校验
        let store = store();
        let result = ImportBackupHandler::new(store.clone())
            .handle(ImportBackup {
                user_id: "u_1".to_string(),
                raw: r#"{"settings":{"title":"书"},"version":"99.7"}"#.to_string(),
            })
            .await;
        assert!(result.is_ok());
    }
}
