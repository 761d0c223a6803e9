//! SQLite Project Store
//!
//! 关系型后端。级联删除依赖外键，章节按 (project_id, chapter_number)
//! 原位 upsert，输入之外的旧章节保留

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{ProjectRecord, ProjectStorePort, StoreError};
use crate::domain::project::{Chapter, NovelSettings, NovelType, ProjectSource};

/// SQLite Project Store
pub struct SqliteProjectStore {
    pool: DbPool,
}

impl SqliteProjectStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Serialization(e.to_string()))
}

#[derive(FromRow)]
struct ProjectRow {
    id: String,
    user_id: String,
    title: String,
    is_active: i64,
    source: String,
    last_synced_at: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ProjectRow> for ProjectRecord {
    type Error = StoreError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(ProjectRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| StoreError::Serialization(e.to_string()))?,
            user_id: row.user_id,
            title: row.title,
            is_active: row.is_active != 0,
            source: ProjectSource::from_str(&row.source).unwrap_or_default(),
            last_synced_at: row
                .last_synced_at
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[derive(FromRow)]
struct SettingsRow {
    title: String,
    style: String,
    tags: String,
    gold_finger: String,
    synopsis: String,
    leveling_system: String,
    background: String,
    author_note: String,
    characters: String,
    plot_progress: String,
    cover_image: String,
    cover_prompt: String,
    novel_type: String,
    target_word_count: Option<i64>,
    target_chapter_count: Option<i64>,
}

impl From<SettingsRow> for NovelSettings {
    fn from(row: SettingsRow) -> Self {
        NovelSettings {
            title: row.title,
            style: row.style,
            tags: serde_json::from_str(&row.tags).unwrap_or_default(),
            gold_finger: row.gold_finger,
            synopsis: row.synopsis,
            leveling_system: row.leveling_system,
            background: row.background,
            author_note: row.author_note,
            characters: serde_json::from_str(&row.characters).unwrap_or_default(),
            plot_progress: row.plot_progress,
            cover_image: row.cover_image,
            cover_prompt: row.cover_prompt,
            novel_type: NovelType::from_str(&row.novel_type).unwrap_or_default(),
            target_word_count: row.target_word_count.map(|n| n as u32),
            target_chapter_count: row.target_chapter_count.map(|n| n as u32),
        }
    }
}

#[derive(FromRow)]
struct ChapterRow {
    chapter_number: i64,
    title: String,
    content: String,
    summary: String,
    created_at: String,
}

impl TryFrom<ChapterRow> for Chapter {
    type Error = StoreError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        Ok(Chapter {
            number: row.chapter_number as u32,
            title: row.title,
            content: row.content,
            summary: row.summary,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[async_trait]
impl ProjectStorePort for SqliteProjectStore {
    async fn insert_project(&self, project: &ProjectRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, user_id, title, is_active, source, last_synced_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(project.id.to_string())
        .bind(&project.user_id)
        .bind(&project.title)
        .bind(project.is_active as i64)
        .bind(project.source.as_str())
        .bind(project.last_synced_at.map(|at| at.to_rfc3339()))
        .bind(project.created_at.to_rfc3339())
        .bind(project.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::Duplicate(project.id.to_string())
            }
            e => StoreError::Backend(e.to_string()),
        })?;

        Ok(())
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<ProjectRecord>, StoreError> {
        let row: Option<ProjectRow> = sqlx::query_as(
            "SELECT id, user_id, title, is_active, source, last_synced_at, created_at, updated_at FROM projects WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        row.map(ProjectRecord::try_from).transpose()
    }

    async fn list_projects(&self, user_id: &str) -> Result<Vec<ProjectRecord>, StoreError> {
        let rows: Vec<ProjectRow> = sqlx::query_as(
            "SELECT id, user_id, title, is_active, source, last_synced_at, created_at, updated_at FROM projects WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        rows.into_iter().map(ProjectRecord::try_from).collect()
    }

    async fn update_project(&self, project: &ProjectRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE projects
            SET title = ?, is_active = ?, source = ?, last_synced_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&project.title)
        .bind(project.is_active as i64)
        .bind(project.source.as_str())
        .bind(project.last_synced_at.map(|at| at.to_rfc3339()))
        .bind(project.updated_at.to_rfc3339())
        .bind(project.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), StoreError> {
        // novel_settings 与 chapters 由外键 ON DELETE CASCADE 带走
        sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn set_all_inactive(&self, user_id: &str) -> Result<(), StoreError> {
        sqlx::query("UPDATE projects SET is_active = 0, updated_at = ? WHERE user_id = ?")
            .bind(Utc::now().to_rfc3339())
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn set_active(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("UPDATE projects SET is_active = 1, updated_at = ? WHERE id = ?")
            .bind(Utc::now().to_rfc3339())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn touch_last_synced(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError> {
        sqlx::query("UPDATE projects SET last_synced_at = ?, updated_at = ? WHERE id = ?")
            .bind(at.to_rfc3339())
            .bind(at.to_rfc3339())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn upsert_settings(
        &self,
        project_id: Uuid,
        settings: &NovelSettings,
    ) -> Result<(), StoreError> {
        let tags = serde_json::to_string(&settings.tags)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let characters = serde_json::to_string(&settings.characters)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO novel_settings (
                project_id, title, style, tags, gold_finger, synopsis,
                leveling_system, background, author_note, characters,
                plot_progress, cover_image, cover_prompt, novel_type,
                target_word_count, target_chapter_count, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(project_id) DO UPDATE SET
                title = excluded.title,
                style = excluded.style,
                tags = excluded.tags,
                gold_finger = excluded.gold_finger,
                synopsis = excluded.synopsis,
                leveling_system = excluded.leveling_system,
                background = excluded.background,
                author_note = excluded.author_note,
                characters = excluded.characters,
                plot_progress = excluded.plot_progress,
                cover_image = excluded.cover_image,
                cover_prompt = excluded.cover_prompt,
                novel_type = excluded.novel_type,
                target_word_count = excluded.target_word_count,
                target_chapter_count = excluded.target_chapter_count,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(project_id.to_string())
        .bind(&settings.title)
        .bind(&settings.style)
        .bind(tags)
        .bind(&settings.gold_finger)
        .bind(&settings.synopsis)
        .bind(&settings.leveling_system)
        .bind(&settings.background)
        .bind(&settings.author_note)
        .bind(characters)
        .bind(&settings.plot_progress)
        .bind(&settings.cover_image)
        .bind(&settings.cover_prompt)
        .bind(settings.novel_type.as_str())
        .bind(settings.target_word_count.map(|n| n as i64))
        .bind(settings.target_chapter_count.map(|n| n as i64))
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn fetch_settings(&self, project_id: Uuid) -> Result<Option<NovelSettings>, StoreError> {
        let row: Option<SettingsRow> = sqlx::query_as(
            r#"
            SELECT title, style, tags, gold_finger, synopsis, leveling_system,
                   background, author_note, characters, plot_progress,
                   cover_image, cover_prompt, novel_type,
                   target_word_count, target_chapter_count
            FROM novel_settings WHERE project_id = ?
            "#,
        )
        .bind(project_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(row.map(NovelSettings::from))
    }

    async fn upload_chapters(
        &self,
        project_id: Uuid,
        chapters: &[Chapter],
    ) -> Result<(), StoreError> {
        // 按 chapter_number 原位 upsert，保留已有行的 id 和 created_at
        for chapter in chapters {
            sqlx::query(
                r#"
                INSERT INTO chapters (id, project_id, chapter_number, title, content, summary, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(project_id, chapter_number) DO UPDATE SET
                    title = excluded.title,
                    content = excluded.content,
                    summary = excluded.summary
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(project_id.to_string())
            .bind(chapter.number as i64)
            .bind(&chapter.title)
            .bind(&chapter.content)
            .bind(&chapter.summary)
            .bind(chapter.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        }

        Ok(())
    }

    async fn fetch_chapters(&self, project_id: Uuid) -> Result<Vec<Chapter>, StoreError> {
        let rows: Vec<ChapterRow> = sqlx::query_as(
            "SELECT chapter_number, title, content, summary, created_at FROM chapters WHERE project_id = ? ORDER BY chapter_number",
        )
        .bind(project_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        rows.into_iter().map(Chapter::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn test_store() -> SqliteProjectStore {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteProjectStore::new(pool)
    }

    fn sample_project(user_id: &str) -> ProjectRecord {
        let now = Utc::now();
        ProjectRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            title: "斗破苍穹同人".to_string(),
            is_active: false,
            source: ProjectSource::Cloud,
            last_synced_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_settings() -> NovelSettings {
        NovelSettings {
            title: "斗破苍穹同人".to_string(),
            gold_finger: "三十年河东三十年河西".to_string(),
            tags: vec!["玄幻".to_string(), "热血".to_string()],
            characters: vec![serde_json::json!({"name": "萧炎", "role": "主角"})],
            target_word_count: Some(2_000_000),
            ..NovelSettings::default()
        }
    }

    #[tokio::test]
    async fn test_project_crud_roundtrip() {
        let store = test_store().await;
        let project = sample_project("u_1");

        store.insert_project(&project).await.unwrap();
        let found = store.find_project(project.id).await.unwrap().unwrap();
        assert_eq!(found.title, project.title);
        assert_eq!(found.source, ProjectSource::Cloud);
        assert!(!found.is_active);

        store.delete_project(project.id).await.unwrap();
        assert!(store.find_project(project.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_id_is_rejected() {
        let store = test_store().await;
        let project = sample_project("u_1");
        store.insert_project(&project).await.unwrap();

        let err = store.insert_project(&project).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_list_projects_is_scoped_to_user() {
        let store = test_store().await;
        store.insert_project(&sample_project("u_1")).await.unwrap();
        store.insert_project(&sample_project("u_1")).await.unwrap();
        store.insert_project(&sample_project("u_2")).await.unwrap();

        assert_eq!(store.list_projects("u_1").await.unwrap().len(), 2);
        assert_eq!(store.list_projects("u_2").await.unwrap().len(), 1);
        assert!(store.list_projects("u_3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_two_step_active_switch() {
        let store = test_store().await;
        let mut first = sample_project("u_1");
        first.is_active = true;
        let second = sample_project("u_1");
        store.insert_project(&first).await.unwrap();
        store.insert_project(&second).await.unwrap();

        store.set_all_inactive("u_1").await.unwrap();
        store.set_active(second.id).await.unwrap();

        let projects = store.list_projects("u_1").await.unwrap();
        let active: Vec<_> = projects.iter().filter(|p| p.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second.id);
    }

    #[tokio::test]
    async fn test_settings_upsert_overwrites() {
        let store = test_store().await;
        let project = sample_project("u_1");
        store.insert_project(&project).await.unwrap();

        store
            .upsert_settings(project.id, &sample_settings())
            .await
            .unwrap();

        let mut updated = sample_settings();
        updated.gold_finger = "签到百倍返还".to_string();
        updated.novel_type = NovelType::Short;
        store.upsert_settings(project.id, &updated).await.unwrap();

        let fetched = store.fetch_settings(project.id).await.unwrap().unwrap();
        assert_eq!(fetched.gold_finger, "签到百倍返还");
        assert_eq!(fetched.novel_type, NovelType::Short);
        assert_eq!(fetched.tags, vec!["玄幻", "热血"]);
        assert_eq!(fetched.characters.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_settings_missing_returns_none() {
        let store = test_store().await;
        let project = sample_project("u_1");
        store.insert_project(&project).await.unwrap();
        assert!(store.fetch_settings(project.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_chapters_upsert_matches_by_number() {
        let store = test_store().await;
        let project = sample_project("u_1");
        store.insert_project(&project).await.unwrap();

        let chapters = vec![
            Chapter::new(1, "第一章", "v1"),
            Chapter::new(2, "第二章", "v1"),
            Chapter::new(3, "第三章", "v1"),
        ];
        store.upload_chapters(project.id, &chapters).await.unwrap();

        // 只重传前两章，第三章应原样保留
        let updated = vec![
            Chapter::new(1, "第一章（修）", "v2"),
            Chapter::new(2, "第二章（修）", "v2"),
        ];
        store.upload_chapters(project.id, &updated).await.unwrap();

        let fetched = store.fetch_chapters(project.id).await.unwrap();
        assert_eq!(fetched.len(), 3);
        assert_eq!(fetched[0].title, "第一章（修）");
        assert_eq!(fetched[0].content, "v2");
        assert_eq!(fetched[2].content, "v1");
        assert_eq!(
            fetched.iter().map(|c| c.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[tokio::test]
    async fn test_delete_project_cascades() {
        let store = test_store().await;
        let project = sample_project("u_1");
        store.insert_project(&project).await.unwrap();
        store
            .upsert_settings(project.id, &sample_settings())
            .await
            .unwrap();
        store
            .upload_chapters(project.id, &[Chapter::new(1, "第一章", "正文")])
            .await
            .unwrap();

        store.delete_project(project.id).await.unwrap();

        assert!(store.find_project(project.id).await.unwrap().is_none());
        assert!(store.fetch_settings(project.id).await.unwrap().is_none());
        assert!(store.fetch_chapters(project.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_touch_last_synced() {
        let store = test_store().await;
        let project = sample_project("u_1");
        store.insert_project(&project).await.unwrap();

        let at = Utc::now();
        store.touch_last_synced(project.id, at).await.unwrap();

        let found = store.find_project(project.id).await.unwrap().unwrap();
        assert_eq!(
            found.last_synced_at.unwrap().timestamp_millis(),
            at.timestamp_millis()
        );
    }
}
