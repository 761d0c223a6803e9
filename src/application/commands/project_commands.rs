//! Project Commands

use uuid::Uuid;

/// 创建作品命令
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub user_id: String,
    pub title: String,
}

/// 重命名作品命令
#[derive(Debug, Clone)]
pub struct RenameProject {
    pub project_id: Uuid,
    pub title: String,
}

/// 删除作品命令（连带设定与全部章节）
#[derive(Debug, Clone)]
pub struct DeleteProject {
    pub project_id: Uuid,
}

/// 切换激活作品命令
///
/// 两步序列: 先将该用户全部作品置为非激活，再激活目标作品
#[derive(Debug, Clone)]
pub struct SwitchActiveProject {
    pub user_id: String,
    pub project_id: Uuid,
}
