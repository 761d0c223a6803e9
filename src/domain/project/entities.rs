//! Project Context - Entities
//!
//! 设定与章节在应用内部/线上传输用 camelCase（`goldFinger`、`authorNote`），
//! 各存储端落库时转为 snake_case，转换在对应的 store 适配器里完成

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::timestamp::epoch_or_rfc3339;

/// 小说类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NovelType {
    /// 长篇
    Long,
    /// 短篇
    Short,
}

impl NovelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NovelType::Long => "long",
            NovelType::Short => "short",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "long" => Some(NovelType::Long),
            "short" => Some(NovelType::Short),
            _ => None,
        }
    }
}

impl Default for NovelType {
    fn default() -> Self {
        NovelType::Long
    }
}

/// 小说设定文档
///
/// 与 Project 一对一。所有字段均可缺省，缺省值为空字符串/空列表，
/// 除字段存在性外不做结构校验
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NovelSettings {
    /// 作品标题
    pub title: String,
    /// 文风
    pub style: String,
    /// 标签（有序）
    pub tags: Vec<String>,
    /// 金手指（主角外挂设定）
    pub gold_finger: String,
    /// 简介
    pub synopsis: String,
    /// 升级体系描述
    pub leveling_system: String,
    /// 世界观背景
    pub background: String,
    /// 作者备注
    pub author_note: String,
    /// 角色卡列表（结构不透明，原样存取）
    pub characters: Vec<JsonValue>,
    /// 当前剧情进度
    pub plot_progress: String,
    /// 封面图（data URI 或 URL）
    pub cover_image: String,
    /// 封面视觉提示词
    pub cover_prompt: String,
    /// 小说类型
    pub novel_type: NovelType,
    /// 目标字数
    pub target_word_count: Option<u32>,
    /// 目标章节数
    pub target_chapter_count: Option<u32>,
}

/// 章节
///
/// 不变量:
/// - number 在同一 Project 内唯一，按 number 匹配做 upsert
/// - 重排/改号由调用方负责，服务层不做处理
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// 章节编号（项目内顺序号）
    pub number: u32,
    /// 章节标题
    #[serde(default)]
    pub title: String,
    /// 正文
    #[serde(default)]
    pub content: String,
    /// 本章概要
    #[serde(default)]
    pub summary: String,
    /// 创建时间（线上可为 epoch 毫秒数或 RFC 3339 字符串）
    #[serde(default = "Utc::now", with = "epoch_or_rfc3339")]
    pub created_at: DateTime<Utc>,
}

impl Chapter {
    pub fn new(number: u32, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            content: content.into(),
            summary: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// 正文字数（按字符计）
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_novel_type_roundtrip() {
        assert_eq!(NovelType::from_str("long"), Some(NovelType::Long));
        assert_eq!(NovelType::from_str("short"), Some(NovelType::Short));
        assert_eq!(NovelType::from_str("epic"), None);
        assert_eq!(NovelType::Short.as_str(), "short");
    }

    #[test]
    fn test_settings_default_is_empty() {
        let settings = NovelSettings::default();
        assert!(settings.title.is_empty());
        assert!(settings.tags.is_empty());
        assert!(settings.characters.is_empty());
        assert_eq!(settings.novel_type, NovelType::Long);
        assert!(settings.target_word_count.is_none());
    }

    #[test]
    fn test_settings_wire_shape_is_camel_case() {
        let mut settings = NovelSettings::default();
        settings.gold_finger = "每日签到百倍返还".to_string();
        settings.author_note = "日更".to_string();

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["goldFinger"], "每日签到百倍返还");
        assert_eq!(json["authorNote"], "日更");
        assert_eq!(json["novelType"], "long");
        assert!(json.get("gold_finger").is_none());
    }

    #[test]
    fn test_settings_missing_fields_fall_back_to_empty() {
        // 只有标题的精简文档，其余字段全部走缺省
        let settings: NovelSettings =
            serde_json::from_str(r#"{"title":"无敌从满级悟性开始"}"#).unwrap();
        assert_eq!(settings.title, "无敌从满级悟性开始");
        assert!(settings.style.is_empty());
        assert!(settings.tags.is_empty());
        assert!(settings.target_chapter_count.is_none());
    }

    #[test]
    fn test_chapter_accepts_epoch_millis() {
        let chapter: Chapter = serde_json::from_str(
            r#"{"number":1,"title":"第一章","content":"……","createdAt":1700000000000}"#,
        )
        .unwrap();
        assert_eq!(chapter.number, 1);
        assert_eq!(chapter.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_chapter_accepts_rfc3339() {
        let chapter: Chapter = serde_json::from_str(
            r#"{"number":2,"createdAt":"2024-06-01T08:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(chapter.created_at.to_rfc3339(), "2024-06-01T08:00:00+00:00");
        assert!(chapter.title.is_empty());
    }

    #[test]
    fn test_chapter_char_count() {
        let chapter = Chapter::new(1, "第一章", "他睁开眼，发现自己躺在陌生的床上。");
        assert_eq!(chapter.char_count(), 17);
        assert!(chapter.summary.is_empty());
    }
}
