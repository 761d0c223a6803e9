//! In-Memory Project Store Implementation
//!
//! 测试用内存实现，章节语义与关系端一致（按 number 原位 upsert）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::application::ports::{ProjectRecord, ProjectStorePort, StoreError};
use crate::domain::project::{Chapter, NovelSettings};

/// 内存 Project Store
#[derive(Default)]
pub struct InMemoryProjectStore {
    projects: DashMap<Uuid, ProjectRecord>,
    settings: DashMap<Uuid, NovelSettings>,
    chapters: DashMap<Uuid, BTreeMap<u32, Chapter>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStorePort for InMemoryProjectStore {
    async fn insert_project(&self, project: &ProjectRecord) -> Result<(), StoreError> {
        if self.projects.contains_key(&project.id) {
            return Err(StoreError::Duplicate(project.id.to_string()));
        }
        self.projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<ProjectRecord>, StoreError> {
        Ok(self.projects.get(&id).map(|p| p.clone()))
    }

    async fn list_projects(&self, user_id: &str) -> Result<Vec<ProjectRecord>, StoreError> {
        let mut records: Vec<ProjectRecord> = self
            .projects
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn update_project(&self, project: &ProjectRecord) -> Result<(), StoreError> {
        if !self.projects.contains_key(&project.id) {
            return Err(StoreError::NotFound(project.id.to_string()));
        }
        self.projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), StoreError> {
        self.settings.remove(&id);
        self.chapters.remove(&id);
        self.projects.remove(&id);
        Ok(())
    }

    async fn set_all_inactive(&self, user_id: &str) -> Result<(), StoreError> {
        for mut entry in self.projects.iter_mut() {
            if entry.user_id == user_id && entry.is_active {
                entry.is_active = false;
                entry.updated_at = Utc::now();
            }
        }
        Ok(())
    }

    async fn set_active(&self, id: Uuid) -> Result<(), StoreError> {
        let mut project = self
            .projects
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        project.is_active = true;
        project.updated_at = Utc::now();
        Ok(())
    }

    async fn touch_last_synced(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut project = self
            .projects
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        project.last_synced_at = Some(at);
        project.updated_at = at;
        Ok(())
    }

    async fn upsert_settings(
        &self,
        project_id: Uuid,
        settings: &NovelSettings,
    ) -> Result<(), StoreError> {
        self.settings.insert(project_id, settings.clone());
        Ok(())
    }

    async fn fetch_settings(&self, project_id: Uuid) -> Result<Option<NovelSettings>, StoreError> {
        Ok(self.settings.get(&project_id).map(|s| s.clone()))
    }

    async fn upload_chapters(
        &self,
        project_id: Uuid,
        chapters: &[Chapter],
    ) -> Result<(), StoreError> {
        let mut stored = self.chapters.entry(project_id).or_default();
        for chapter in chapters {
            stored.insert(chapter.number, chapter.clone());
        }
        Ok(())
    }

    async fn fetch_chapters(&self, project_id: Uuid) -> Result<Vec<Chapter>, StoreError> {
        Ok(self
            .chapters
            .get(&project_id)
            .map(|entry| entry.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::ProjectSource;

    fn sample_project(user_id: &str) -> ProjectRecord {
        let now = Utc::now();
        ProjectRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            title: "测试作品".to_string(),
            is_active: false,
            source: ProjectSource::Cloud,
            last_synced_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_project_lifecycle() {
        let store = InMemoryProjectStore::new();
        let project = sample_project("u_1");

        store.insert_project(&project).await.unwrap();
        assert!(store.find_project(project.id).await.unwrap().is_some());
        assert!(matches!(
            store.insert_project(&project).await.unwrap_err(),
            StoreError::Duplicate(_)
        ));

        store.delete_project(project.id).await.unwrap();
        assert!(store.find_project(project.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_chapters_ordered_by_number() {
        let store = InMemoryProjectStore::new();
        let project = sample_project("u_1");
        store.insert_project(&project).await.unwrap();

        store
            .upload_chapters(
                project.id,
                &[
                    Chapter::new(3, "三", ""),
                    Chapter::new(1, "一", ""),
                    Chapter::new(2, "二", ""),
                ],
            )
            .await
            .unwrap();

        let fetched = store.fetch_chapters(project.id).await.unwrap();
        assert_eq!(
            fetched.iter().map(|c| c.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }
}
