//! Project Context - Errors

use thiserror::Error;

use super::ProjectId;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("作品不存在: {0}")]
    NotFound(ProjectId),

    #[error("无效的标题: {0}")]
    InvalidTitle(String),

    #[error("无效的用户: {0}")]
    InvalidUser(String),

    #[error("章节编号冲突: {0}")]
    DuplicateChapterNumber(u32),

    #[error("存储错误: {0}")]
    StorageError(String),
}
