//! Project Queries

use uuid::Uuid;

/// 获取作品详情
#[derive(Debug, Clone)]
pub struct GetProject {
    pub project_id: Uuid,
}

/// 获取用户的作品列表
#[derive(Debug, Clone)]
pub struct ListProjects {
    pub user_id: String,
}

/// 获取用户当前激活的作品
#[derive(Debug, Clone)]
pub struct GetActiveProject {
    pub user_id: String,
}
