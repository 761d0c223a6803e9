//! Project Command Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{
    CreateProject, DeleteProject, RenameProject, SwitchActiveProject,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{ProjectRecord, ProjectStorePort};
use crate::domain::project::{Project, ProjectSource, Title, UserId};

// ============================================================================
// CreateProject
// ============================================================================

/// 创建作品响应
#[derive(Debug, Clone)]
pub struct CreateProjectResponse {
    pub id: Uuid,
    pub title: String,
}

/// CreateProject Handler
pub struct CreateProjectHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl CreateProjectHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        command: CreateProject,
    ) -> Result<CreateProjectResponse, ApplicationError> {
        let user_id = UserId::new(command.user_id).map_err(ApplicationError::validation)?;
        let title = Title::new(command.title).map_err(ApplicationError::validation)?;

        let project = Project::new(user_id, title, ProjectSource::Cloud);
        let record = ProjectRecord::from(&project);
        self.store.insert_project(&record).await?;

        tracing::info!(
            project_id = %record.id,
            user_id = %record.user_id,
            title = %record.title,
            "Project created"
        );

        Ok(CreateProjectResponse {
            id: record.id,
            title: record.title,
        })
    }
}

// ============================================================================
// RenameProject
// ============================================================================

/// RenameProject Handler
pub struct RenameProjectHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl RenameProjectHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: RenameProject) -> Result<(), ApplicationError> {
        let title = Title::new(command.title).map_err(ApplicationError::validation)?;

        let mut record = self
            .store
            .find_project(command.project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", command.project_id))?;

        record.title = title.as_str().to_string();
        record.updated_at = chrono::Utc::now();
        self.store.update_project(&record).await?;

        tracing::info!(project_id = %record.id, title = %record.title, "Project renamed");

        Ok(())
    }
}

// ============================================================================
// DeleteProject
// ============================================================================

/// DeleteProject Handler
///
/// 设定与章节随作品一并删除，顺序由各存储端保证
pub struct DeleteProjectHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl DeleteProjectHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: DeleteProject) -> Result<(), ApplicationError> {
        let record = self
            .store
            .find_project(command.project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", command.project_id))?;

        self.store.delete_project(command.project_id).await?;

        tracing::info!(
            project_id = %record.id,
            title = %record.title,
            "Project deleted"
        );

        Ok(())
    }
}

// ============================================================================
// SwitchActiveProject
// ============================================================================

/// SwitchActiveProject Handler
///
/// 两步序列: set_all_inactive → set_active。非原子，
/// 并发会话可能各自认为另一个作品是激活态（单用户场景可接受）
pub struct SwitchActiveProjectHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl SwitchActiveProjectHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: SwitchActiveProject) -> Result<(), ApplicationError> {
        let record = self
            .store
            .find_project(command.project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", command.project_id))?;

        if record.user_id != command.user_id {
            return Err(ApplicationError::business_rule(format!(
                "Project {} does not belong to user {}",
                command.project_id, command.user_id
            )));
        }

        self.store.set_all_inactive(&command.user_id).await?;
        self.store.set_active(command.project_id).await?;

        tracing::info!(
            project_id = %command.project_id,
            user_id = %command.user_id,
            "Active project switched"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryProjectStore;

    fn store() -> Arc<dyn ProjectStorePort> {
        Arc::new(InMemoryProjectStore::new())
    }

    async fn create(store: &Arc<dyn ProjectStorePort>, user: &str, title: &str) -> Uuid {
        CreateProjectHandler::new(store.clone())
            .handle(CreateProject {
                user_id: user.to_string(),
                title: title.to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_project_starts_inactive() {
        let store = store();
        let id = create(&store, "u_1", "我的第一本书").await;

        let record = store.find_project(id).await.unwrap().unwrap();
        assert_eq!(record.title, "我的第一本书");
        assert!(!record.is_active);
        assert_eq!(record.source.as_str(), "cloud");
    }

    #[tokio::test]
    async fn test_create_project_rejects_empty_title() {
        let handler = CreateProjectHandler::new(store());
        let err = handler
            .handle(CreateProject {
                user_id: "u_1".to_string(),
                title: "  ".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_switch_active_leaves_exactly_one_active() {
        let store = store();
        let first = create(&store, "u_1", "旧书").await;
        let second = create(&store, "u_1", "新书").await;

        let handler = SwitchActiveProjectHandler::new(store.clone());
        handler
            .handle(SwitchActiveProject {
                user_id: "u_1".to_string(),
                project_id: first,
            })
            .await
            .unwrap();
        handler
            .handle(SwitchActiveProject {
                user_id: "u_1".to_string(),
                project_id: second,
            })
            .await
            .unwrap();

        let projects = store.list_projects("u_1").await.unwrap();
        let active: Vec<_> = projects.iter().filter(|p| p.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second);
    }

    #[tokio::test]
    async fn test_switch_active_rejects_foreign_project() {
        let store = store();
        let other_users_project = create(&store, "u_2", "别人的书").await;

        let err = SwitchActiveProjectHandler::new(store.clone())
            .handle(SwitchActiveProject {
                user_id: "u_1".to_string(),
                project_id: other_users_project,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));
    }

    #[tokio::test]
    async fn test_rename_project() {
        let store = store();
        let id = create(&store, "u_1", "旧名").await;

        RenameProjectHandler::new(store.clone())
            .handle(RenameProject {
                project_id: id,
                title: "新名".to_string(),
            })
            .await
            .unwrap();

        let record = store.find_project(id).await.unwrap().unwrap();
        assert_eq!(record.title, "新名");
    }

    #[tokio::test]
    async fn test_delete_missing_project_is_not_found() {
        let err = DeleteProjectHandler::new(store())
            .handle(DeleteProject {
                project_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
