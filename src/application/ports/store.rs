//! Project Store Port - 出站端口
//!
//! 两个可互换的持久化后端（关系型 / 文档型）共同实现的抽象接口，
//! 具体实现在 infrastructure 层

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::project::{Chapter, NovelSettings, Project, ProjectSource};

/// Store 错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// 作品实体（用于持久化）
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub is_active: bool,
    pub source: ProjectSource,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectRecord {
    fn from(project: &Project) -> Self {
        Self {
            id: *project.id().as_uuid(),
            user_id: project.user_id().as_str().to_string(),
            title: project.title().as_str().to_string(),
            is_active: project.is_active(),
            source: project.source(),
            last_synced_at: project.last_synced_at(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

/// Project Store Port
///
/// 约定:
/// - "每用户至多一个 active 作品"由调用方通过
///   `set_all_inactive` + `set_active` 两步序列维护，Store 不保证原子性
/// - 设定按 project_id 做单文档 upsert，"每项目一份设定"是假定而非强制
/// - `upload_chapters` 按 number 匹配持久化给定章节；
///   文档端实现为整组删除后重建，关系端按 number 原位 upsert
///   （输入之外的旧章节在关系端保留），两端的历史行为如此
#[async_trait]
pub trait ProjectStorePort: Send + Sync {
    /// 新建作品
    async fn insert_project(&self, project: &ProjectRecord) -> Result<(), StoreError>;

    /// 根据 ID 查找作品
    async fn find_project(&self, id: Uuid) -> Result<Option<ProjectRecord>, StoreError>;

    /// 获取用户的所有作品（按创建时间倒序）
    async fn list_projects(&self, user_id: &str) -> Result<Vec<ProjectRecord>, StoreError>;

    /// 更新作品元数据（标题等）
    async fn update_project(&self, project: &ProjectRecord) -> Result<(), StoreError>;

    /// 删除作品及其设定与全部章节
    ///
    /// 关系端依赖外键级联；文档端按"设定 → 章节 → 作品"顺序手工删除
    async fn delete_project(&self, id: Uuid) -> Result<(), StoreError>;

    /// 将用户的全部作品置为非激活（两步切换的第一步）
    async fn set_all_inactive(&self, user_id: &str) -> Result<(), StoreError>;

    /// 激活指定作品（两步切换的第二步）
    async fn set_active(&self, id: Uuid) -> Result<(), StoreError>;

    /// 记录最近一次完整同步时间
    async fn touch_last_synced(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// 写入/覆盖作品设定（按 project_id 单文档 upsert）
    async fn upsert_settings(
        &self,
        project_id: Uuid,
        settings: &NovelSettings,
    ) -> Result<(), StoreError>;

    /// 读取作品设定
    async fn fetch_settings(&self, project_id: Uuid) -> Result<Option<NovelSettings>, StoreError>;

    /// 持久化章节（按 number 匹配）
    async fn upload_chapters(
        &self,
        project_id: Uuid,
        chapters: &[Chapter],
    ) -> Result<(), StoreError>;

    /// 读取作品全部章节（按 number 升序）
    async fn fetch_chapters(&self, project_id: Uuid) -> Result<Vec<Chapter>, StoreError>;
}
