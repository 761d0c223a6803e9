//! Sync Queries - 云端同步读操作

use uuid::Uuid;

/// 下载作品设定
#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub project_id: Uuid,
}

/// 下载作品全部章节
#[derive(Debug, Clone)]
pub struct DownloadChapters {
    pub project_id: Uuid,
}

/// 整项目拉取（先设定后章节）
#[derive(Debug, Clone)]
pub struct SyncProjectFromCloud {
    pub project_id: Uuid,
}

/// 导出备份文件
#[derive(Debug, Clone)]
pub struct ExportBackup {
    pub project_id: Uuid,
}
