//! Project Query Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{ProjectRecord, ProjectStorePort};
use crate::application::queries::{GetActiveProject, GetProject, ListProjects};

// ============================================================================
// Response DTOs
// ============================================================================

/// 作品详情响应
#[derive(Debug, Clone)]
pub struct ProjectView {
    pub id: Uuid,
    pub title: String,
    pub is_active: bool,
    pub source: String,
    pub last_synced_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProjectRecord> for ProjectView {
    fn from(record: ProjectRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            is_active: record.is_active,
            source: record.source.as_str().to_string(),
            last_synced_at: record.last_synced_at.map(|at| at.to_rfc3339()),
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GetProject Handler
pub struct GetProjectHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl GetProjectHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetProject) -> Result<ProjectView, ApplicationError> {
        let record = self
            .store
            .find_project(query.project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", query.project_id))?;

        Ok(ProjectView::from(record))
    }
}

/// ListProjects Handler
pub struct ListProjectsHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl ListProjectsHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: ListProjects) -> Result<Vec<ProjectView>, ApplicationError> {
        let records = self.store.list_projects(&query.user_id).await?;
        Ok(records.into_iter().map(ProjectView::from).collect())
    }
}

/// GetActiveProject Handler
///
/// 没有激活作品时返回 None（新用户或刚删掉激活作品的用户）
pub struct GetActiveProjectHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl GetActiveProjectHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetActiveProject,
    ) -> Result<Option<ProjectView>, ApplicationError> {
        let records = self.store.list_projects(&query.user_id).await?;
        Ok(records
            .into_iter()
            .find(|r| r.is_active)
            .map(ProjectView::from))
    }
}
