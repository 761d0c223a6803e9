//! Project Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ProjectId, Title, UserId};

/// 作品来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectSource {
    /// 云端创建
    Cloud,
    /// 从备份文件导入
    Imported,
}

impl ProjectSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectSource::Cloud => "cloud",
            ProjectSource::Imported => "imported",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "cloud" => Some(ProjectSource::Cloud),
            "imported" => Some(ProjectSource::Imported),
            _ => None,
        }
    }
}

impl Default for ProjectSource {
    fn default() -> Self {
        ProjectSource::Cloud
    }
}

/// Project 聚合根 - 用户的一部小说工作区
///
/// 不变量:
/// - 每个用户同一时刻至多一个 active 的 Project，
///   由应用层通过"先全部置为 inactive、再激活目标"的两步序列维护
/// - 设定与章节随 Project 一同删除，删除顺序由存储端保证
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    user_id: UserId,
    title: Title,
    is_active: bool,
    source: ProjectSource,
    last_synced_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Project {
    /// 创建新作品（初始为非激活）
    pub fn new(user_id: UserId, title: Title, source: ProjectSource) -> Self {
        let now = Utc::now();
        Self {
            id: ProjectId::new(),
            user_id,
            title,
            is_active: false,
            source,
            last_synced_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 重命名
    pub fn rename(&mut self, title: Title) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    /// 激活（调用方须先将该用户其余作品全部置为非激活）
    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// 记录一次完整同步完成的时间
    pub fn mark_synced(&mut self, at: DateTime<Utc>) {
        self.last_synced_at = Some(at);
        self.updated_at = at;
    }

    // Getters
    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn source(&self) -> ProjectSource {
        self.source
    }

    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.last_synced_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
