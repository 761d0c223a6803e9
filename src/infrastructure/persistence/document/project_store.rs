//! Document Project Store
//!
//! 文档型后端。落库字段为 snake_case（`gold_finger`、`author_note`），
//! 与应用内部的 camelCase 形状在此转换。没有级联删除，
//! 删除按"设定 → 章节 → 作品"顺序手工进行；章节上传为整组删除后重建

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::client::{DocumentApiError, DocumentStoreClient};
use crate::application::ports::{ProjectRecord, ProjectStorePort, StoreError};
use crate::domain::project::{Chapter, NovelSettings, NovelType, ProjectSource};

const PROJECTS_COLLECTION: &str = "projects";
const SETTINGS_COLLECTION: &str = "novel_settings";
const CHAPTERS_COLLECTION: &str = "chapters";

/// Document Project Store
pub struct DocumentProjectStore {
    client: DocumentStoreClient,
}

impl DocumentProjectStore {
    pub fn new(client: DocumentStoreClient) -> Self {
        Self { client }
    }
}

impl From<DocumentApiError> for StoreError {
    fn from(e: DocumentApiError) -> Self {
        match e {
            DocumentApiError::Timeout => StoreError::Network("request timeout".to_string()),
            DocumentApiError::Network(msg) => StoreError::Network(msg),
            DocumentApiError::Service(msg) => StoreError::Backend(msg),
            DocumentApiError::InvalidResponse(msg) => StoreError::Serialization(msg),
        }
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Serialization(e.to_string()))
}

// ============================================================================
// 落库文档形状（snake_case）
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct ProjectDoc {
    id: String,
    user_id: String,
    title: String,
    #[serde(default)]
    is_active: bool,
    #[serde(default)]
    source: String,
    #[serde(default)]
    last_synced_at: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<&ProjectRecord> for ProjectDoc {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            id: record.id.to_string(),
            user_id: record.user_id.clone(),
            title: record.title.clone(),
            is_active: record.is_active,
            source: record.source.as_str().to_string(),
            last_synced_at: record.last_synced_at.map(|at| at.to_rfc3339()),
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

impl TryFrom<ProjectDoc> for ProjectRecord {
    type Error = StoreError;

    fn try_from(doc: ProjectDoc) -> Result<Self, Self::Error> {
        Ok(ProjectRecord {
            id: Uuid::parse_str(&doc.id).map_err(|e| StoreError::Serialization(e.to_string()))?,
            user_id: doc.user_id,
            title: doc.title,
            is_active: doc.is_active,
            source: ProjectSource::from_str(&doc.source).unwrap_or_default(),
            last_synced_at: doc
                .last_synced_at
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
            created_at: parse_timestamp(&doc.created_at)?,
            updated_at: parse_timestamp(&doc.updated_at)?,
        })
    }
}

/// 设定文档。逐字段映射，所有可缺省字段带空值兜底
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct SettingsDoc {
    project_id: String,
    title: String,
    style: String,
    tags: Vec<String>,
    gold_finger: String,
    synopsis: String,
    leveling_system: String,
    background: String,
    author_note: String,
    characters: Vec<serde_json::Value>,
    plot_progress: String,
    cover_image: String,
    cover_prompt: String,
    novel_type: String,
    target_word_count: Option<u32>,
    target_chapter_count: Option<u32>,
}

impl Default for SettingsDoc {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            title: String::new(),
            style: String::new(),
            tags: Vec::new(),
            gold_finger: String::new(),
            synopsis: String::new(),
            leveling_system: String::new(),
            background: String::new(),
            author_note: String::new(),
            characters: Vec::new(),
            plot_progress: String::new(),
            cover_image: String::new(),
            cover_prompt: String::new(),
            novel_type: NovelType::default().as_str().to_string(),
            target_word_count: None,
            target_chapter_count: None,
        }
    }
}

impl SettingsDoc {
    fn from_settings(project_id: Uuid, settings: &NovelSettings) -> Self {
        Self {
            project_id: project_id.to_string(),
            title: settings.title.clone(),
            style: settings.style.clone(),
            tags: settings.tags.clone(),
            gold_finger: settings.gold_finger.clone(),
            synopsis: settings.synopsis.clone(),
            leveling_system: settings.leveling_system.clone(),
            background: settings.background.clone(),
            author_note: settings.author_note.clone(),
            characters: settings.characters.clone(),
            plot_progress: settings.plot_progress.clone(),
            cover_image: settings.cover_image.clone(),
            cover_prompt: settings.cover_prompt.clone(),
            novel_type: settings.novel_type.as_str().to_string(),
            target_word_count: settings.target_word_count,
            target_chapter_count: settings.target_chapter_count,
        }
    }
}

impl From<SettingsDoc> for NovelSettings {
    fn from(doc: SettingsDoc) -> Self {
        NovelSettings {
            title: doc.title,
            style: doc.style,
            tags: doc.tags,
            gold_finger: doc.gold_finger,
            synopsis: doc.synopsis,
            leveling_system: doc.leveling_system,
            background: doc.background,
            author_note: doc.author_note,
            characters: doc.characters,
            plot_progress: doc.plot_progress,
            cover_image: doc.cover_image,
            cover_prompt: doc.cover_prompt,
            novel_type: NovelType::from_str(&doc.novel_type).unwrap_or_default(),
            target_word_count: doc.target_word_count,
            target_chapter_count: doc.target_chapter_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ChapterDoc {
    project_id: String,
    number: u32,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    summary: String,
    created_at: String,
}

impl ChapterDoc {
    fn from_chapter(project_id: Uuid, chapter: &Chapter) -> Self {
        Self {
            project_id: project_id.to_string(),
            number: chapter.number,
            title: chapter.title.clone(),
            content: chapter.content.clone(),
            summary: chapter.summary.clone(),
            created_at: chapter.created_at.to_rfc3339(),
        }
    }
}

impl TryFrom<ChapterDoc> for Chapter {
    type Error = StoreError;

    fn try_from(doc: ChapterDoc) -> Result<Self, Self::Error> {
        Ok(Chapter {
            number: doc.number,
            title: doc.title,
            content: doc.content,
            summary: doc.summary,
            created_at: parse_timestamp(&doc.created_at)?,
        })
    }
}

fn to_value<T: Serialize>(doc: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(doc).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn from_value<T: for<'de> Deserialize<'de>>(value: serde_json::Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// 文档里的字符串 id 字段（删除时用）
fn doc_id(value: &serde_json::Value) -> Result<String, StoreError> {
    value
        .get("id")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| StoreError::Serialization("document missing id field".to_string()))
}

#[async_trait]
impl ProjectStorePort for DocumentProjectStore {
    async fn insert_project(&self, project: &ProjectRecord) -> Result<(), StoreError> {
        let doc = ProjectDoc::from(project);
        self.client
            .create_document(PROJECTS_COLLECTION, &doc.id, &to_value(&doc)?)
            .await?;
        Ok(())
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<ProjectRecord>, StoreError> {
        let value = self
            .client
            .get_document(PROJECTS_COLLECTION, &id.to_string())
            .await?;

        value
            .map(|v| from_value::<ProjectDoc>(v).and_then(ProjectRecord::try_from))
            .transpose()
    }

    async fn list_projects(&self, user_id: &str) -> Result<Vec<ProjectRecord>, StoreError> {
        let values = self
            .client
            .list_documents(
                PROJECTS_COLLECTION,
                &[("user_id", user_id.to_string())],
                None,
            )
            .await?;

        let mut records = values
            .into_iter()
            .map(|v| from_value::<ProjectDoc>(v).and_then(ProjectRecord::try_from))
            .collect::<Result<Vec<_>, _>>()?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn update_project(&self, project: &ProjectRecord) -> Result<(), StoreError> {
        let doc = ProjectDoc::from(project);
        self.client
            .update_document(PROJECTS_COLLECTION, &doc.id, &to_value(&doc)?)
            .await?;
        Ok(())
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), StoreError> {
        let project_id = id.to_string();

        // 无级联：先设定，再章节，最后作品本体。
        // 中途失败即中止，已删掉的部分不恢复
        let settings = self
            .client
            .list_documents(
                SETTINGS_COLLECTION,
                &[("project_id", project_id.clone())],
                None,
            )
            .await?;
        for doc in &settings {
            self.client
                .delete_document(SETTINGS_COLLECTION, &doc_id(doc)?)
                .await?;
        }

        let chapters = self
            .client
            .list_documents(
                CHAPTERS_COLLECTION,
                &[("project_id", project_id.clone())],
                None,
            )
            .await?;
        for doc in &chapters {
            self.client
                .delete_document(CHAPTERS_COLLECTION, &doc_id(doc)?)
                .await?;
        }

        self.client
            .delete_document(PROJECTS_COLLECTION, &project_id)
            .await?;

        tracing::debug!(
            project_id = %project_id,
            settings = settings.len(),
            chapters = chapters.len(),
            "Project documents deleted"
        );

        Ok(())
    }

    async fn set_all_inactive(&self, user_id: &str) -> Result<(), StoreError> {
        let values = self
            .client
            .list_documents(
                PROJECTS_COLLECTION,
                &[("user_id", user_id.to_string()), ("is_active", "true".to_string())],
                None,
            )
            .await?;

        for value in values {
            let mut doc: ProjectDoc = from_value(value)?;
            doc.is_active = false;
            doc.updated_at = Utc::now().to_rfc3339();
            let id = doc.id.clone();
            self.client
                .update_document(PROJECTS_COLLECTION, &id, &to_value(&doc)?)
                .await?;
        }

        Ok(())
    }

    async fn set_active(&self, id: Uuid) -> Result<(), StoreError> {
        let value = self
            .client
            .get_document(PROJECTS_COLLECTION, &id.to_string())
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut doc: ProjectDoc = from_value(value)?;
        doc.is_active = true;
        doc.updated_at = Utc::now().to_rfc3339();
        self.client
            .update_document(PROJECTS_COLLECTION, &doc.id, &to_value(&doc)?)
            .await?;

        Ok(())
    }

    async fn touch_last_synced(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError> {
        let value = self
            .client
            .get_document(PROJECTS_COLLECTION, &id.to_string())
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut doc: ProjectDoc = from_value(value)?;
        doc.last_synced_at = Some(at.to_rfc3339());
        doc.updated_at = at.to_rfc3339();
        self.client
            .update_document(PROJECTS_COLLECTION, &doc.id, &to_value(&doc)?)
            .await?;

        Ok(())
    }

    async fn upsert_settings(
        &self,
        project_id: Uuid,
        settings: &NovelSettings,
    ) -> Result<(), StoreError> {
        let doc = SettingsDoc::from_settings(project_id, settings);

        // 单文档约定：查第一份，有则覆盖，无则新建
        let existing = self
            .client
            .list_documents(
                SETTINGS_COLLECTION,
                &[("project_id", project_id.to_string())],
                Some(1),
            )
            .await?;

        match existing.into_iter().next() {
            Some(value) => {
                self.client
                    .update_document(SETTINGS_COLLECTION, &doc_id(&value)?, &to_value(&doc)?)
                    .await?;
            }
            None => {
                self.client
                    .create_document(
                        SETTINGS_COLLECTION,
                        &Uuid::new_v4().to_string(),
                        &to_value(&doc)?,
                    )
                    .await?;
            }
        }

        Ok(())
    }

    async fn fetch_settings(&self, project_id: Uuid) -> Result<Option<NovelSettings>, StoreError> {
        // limit 1：若历史上产生过重复设定文档，只取第一份
        let values = self
            .client
            .list_documents(
                SETTINGS_COLLECTION,
                &[("project_id", project_id.to_string())],
                Some(1),
            )
            .await?;

        values
            .into_iter()
            .next()
            .map(|v| from_value::<SettingsDoc>(v).map(NovelSettings::from))
            .transpose()
    }

    async fn upload_chapters(
        &self,
        project_id: Uuid,
        chapters: &[Chapter],
    ) -> Result<(), StoreError> {
        // 整组替换：先删光旧章节文档，再逐章重建。
        // 删除循环中途失败即中止，已删部分不恢复
        let existing = self
            .client
            .list_documents(
                CHAPTERS_COLLECTION,
                &[("project_id", project_id.to_string())],
                None,
            )
            .await?;
        for doc in &existing {
            self.client
                .delete_document(CHAPTERS_COLLECTION, &doc_id(doc)?)
                .await?;
        }

        for chapter in chapters {
            let doc = ChapterDoc::from_chapter(project_id, chapter);
            self.client
                .create_document(
                    CHAPTERS_COLLECTION,
                    &Uuid::new_v4().to_string(),
                    &to_value(&doc)?,
                )
                .await?;
        }

        Ok(())
    }

    async fn fetch_chapters(&self, project_id: Uuid) -> Result<Vec<Chapter>, StoreError> {
        let values = self
            .client
            .list_documents(
                CHAPTERS_COLLECTION,
                &[("project_id", project_id.to_string())],
                None,
            )
            .await?;

        let mut chapters = values
            .into_iter()
            .map(|v| from_value::<ChapterDoc>(v).and_then(Chapter::try_from))
            .collect::<Result<Vec<_>, _>>()?;
        chapters.sort_by_key(|c| c.number);
        Ok(chapters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_doc_roundtrip() {
        let now = Utc::now();
        let record = ProjectRecord {
            id: Uuid::new_v4(),
            user_id: "u_1".to_string(),
            title: "我的书".to_string(),
            is_active: true,
            source: ProjectSource::Imported,
            last_synced_at: Some(now),
            created_at: now,
            updated_at: now,
        };

        let doc = ProjectDoc::from(&record);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["user_id"], "u_1");
        assert_eq!(json["source"], "imported");

        let back = ProjectRecord::try_from(serde_json::from_value::<ProjectDoc>(json).unwrap())
            .unwrap();
        assert_eq!(back.id, record.id);
        assert_eq!(back.source, ProjectSource::Imported);
        assert!(back.is_active);
    }

    #[test]
    fn test_settings_doc_is_snake_case() {
        let mut settings = NovelSettings::default();
        settings.gold_finger = "最强反派系统".to_string();
        settings.cover_prompt = "暗色调城市夜景".to_string();

        let doc = SettingsDoc::from_settings(Uuid::new_v4(), &settings);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["gold_finger"], "最强反派系统");
        assert_eq!(json["cover_prompt"], "暗色调城市夜景");
        assert!(json.get("goldFinger").is_none());
    }

    #[test]
    fn test_settings_doc_missing_fields_fall_back() {
        // 旧文档可能缺字段，逐字段兜底为空值
        let doc: SettingsDoc =
            serde_json::from_str(r#"{"project_id":"p","title":"旧书"}"#).unwrap();
        let settings = NovelSettings::from(doc);
        assert_eq!(settings.title, "旧书");
        assert!(settings.gold_finger.is_empty());
        assert!(settings.tags.is_empty());
        assert_eq!(settings.novel_type, NovelType::Long);
    }

    #[test]
    fn test_chapter_doc_roundtrip() {
        let chapter = Chapter::new(7, "第七章", "正文").with_summary("概要");
        let project_id = Uuid::new_v4();

        let doc = ChapterDoc::from_chapter(project_id, &chapter);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["number"], 7);
        assert_eq!(json["project_id"], project_id.to_string());

        let back =
            Chapter::try_from(serde_json::from_value::<ChapterDoc>(json).unwrap()).unwrap();
        assert_eq!(back.number, 7);
        assert_eq!(back.summary, "概要");
    }

    #[test]
    fn test_doc_id_extraction() {
        let value = serde_json::json!({"id": "abc", "title": "x"});
        assert_eq!(doc_id(&value).unwrap(), "abc");
        assert!(doc_id(&serde_json::json!({"title": "x"})).is_err());
    }
}
