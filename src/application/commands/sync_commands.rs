//! Sync Commands - 云端同步写操作

use uuid::Uuid;

use crate::domain::project::{Chapter, NovelSettings};

/// 上传作品设定命令（按 project_id 单文档 upsert）
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub project_id: Uuid,
    pub settings: NovelSettings,
}

/// 上传章节命令（按 number 匹配）
#[derive(Debug, Clone)]
pub struct UploadChapters {
    pub project_id: Uuid,
    pub chapters: Vec<Chapter>,
}

/// 整项目推送命令
///
/// 先设定后章节顺序执行，中途失败不回滚
#[derive(Debug, Clone)]
pub struct SyncProjectToCloud {
    pub project_id: Uuid,
    pub settings: NovelSettings,
    pub chapters: Vec<Chapter>,
}

/// 导入备份命令
///
/// 只校验备份里存在 settings 字段，设定与章节原样入库
#[derive(Debug, Clone)]
pub struct ImportBackup {
    pub user_id: String,
    /// 用户上传的备份文件原文
    pub raw: String,
}
