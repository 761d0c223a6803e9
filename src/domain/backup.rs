//! 备份文件格式
//!
//! 导出为单个 JSON 文档 `{settings, chapters, exportDate, version}`，
//! 文件名中带作品标题和日期。导入时只校验 `settings` 字段存在，
//! 其余内容（包括 version）原样透传

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::project::{Chapter, NovelSettings};

/// 导出时盖在备份文件上的版本号，导入时不做检查
pub const BACKUP_VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("备份文件不是合法的 JSON: {0}")]
    InvalidJson(String),

    #[error("备份文件缺少 settings 字段")]
    MissingSettings,

    #[error("备份序列化失败: {0}")]
    Serialize(String),
}

/// 备份文档
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub settings: NovelSettings,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub export_date: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl BackupDocument {
    /// 打包一次导出，盖上导出时间与版本号
    pub fn export(
        settings: NovelSettings,
        chapters: Vec<Chapter>,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            settings,
            chapters,
            export_date: Some(exported_at.to_rfc3339()),
            version: Some(BACKUP_VERSION.to_string()),
        }
    }

    /// 解析用户上传的备份文件
    ///
    /// 唯一的结构校验是 `settings` 字段存在；章节缺省为空列表
    pub fn parse(input: &str) -> Result<Self, BackupError> {
        let value: JsonValue =
            serde_json::from_str(input).map_err(|e| BackupError::InvalidJson(e.to_string()))?;
        if value.get("settings").is_none() {
            return Err(BackupError::MissingSettings);
        }
        serde_json::from_value(value).map_err(|e| BackupError::InvalidJson(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, BackupError> {
        serde_json::to_string_pretty(self).map_err(|e| BackupError::Serialize(e.to_string()))
    }
}

/// 备份文件名: `{标题}_backup_{YYYY-MM-DD}.json`
///
/// 标题里对文件系统不友好的字符替换为下划线
pub fn backup_file_name(title: &str, exported_at: DateTime<Utc>) -> String {
    let safe: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let safe = safe.trim();
    let stem = if safe.is_empty() { "untitled" } else { safe };
    format!("{}_backup_{}.json", stem, exported_at.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_stamps_version_and_date() {
        let doc = BackupDocument::export(NovelSettings::default(), Vec::new(), Utc::now());
        assert_eq!(doc.version.as_deref(), Some(BACKUP_VERSION));
        assert!(doc.export_date.is_some());

        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("exportDate").is_some());
        assert!(json.get("settings").is_some());
    }

    #[test]
    fn test_parse_requires_settings_key() {
        let err = BackupDocument::parse(r#"{"chapters":[]}"#).unwrap_err();
        assert!(matches!(err, BackupError::MissingSettings));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = BackupDocument::parse("not json").unwrap_err();
        assert!(matches!(err, BackupError::InvalidJson(_)));
    }

    #[test]
    fn test_parse_tolerates_missing_chapters_and_version() {
        let doc = BackupDocument::parse(r#"{"settings":{"title":"女频甜宠"}}"#).unwrap();
        assert_eq!(doc.settings.title, "女频甜宠");
        assert!(doc.chapters.is_empty());
        assert!(doc.version.is_none());
        assert!(doc.export_date.is_none());
    }

    #[test]
    fn test_parse_full_backup() {
        let input = r#"{
            "settings": {"title": "修真聊天群", "goldFinger": "聊天群", "tags": ["都市", "修真"]},
            "chapters": [
                {"number": 1, "title": "第一章", "content": "正文", "createdAt": 1700000000000},
                {"number": 2, "title": "第二章", "content": "正文", "createdAt": "2024-06-01T08:00:00Z"}
            ],
            "exportDate": "2024-06-02T00:00:00Z",
            "version": "1.0"
        }"#;
        let doc = BackupDocument::parse(input).unwrap();
        assert_eq!(doc.chapters.len(), 2);
        assert_eq!(doc.settings.gold_finger, "聊天群");
        assert_eq!(doc.settings.tags, vec!["都市", "修真"]);
    }

    #[test]
    fn test_backup_file_name_embeds_title_and_date() {
        let at = DateTime::parse_from_rfc3339("2024-06-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            backup_file_name("修真聊天群", at),
            "修真聊天群_backup_2024-06-01.json"
        );
    }

    #[test]
    fn test_backup_file_name_sanitizes_title() {
        let at = Utc::now();
        let name = backup_file_name("a/b:c?", at);
        assert!(name.starts_with("a_b_c_"));
        let name = backup_file_name("   ", at);
        assert!(name.starts_with("untitled_backup_"));
    }
}
