//! Sync HTTP Handlers
//!
//! 整项目推送/拉取，设定在前、章节在后顺序执行

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{SyncProjectFromCloud, SyncProjectToCloud};
use crate::domain::project::{Chapter, NovelSettings};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushProjectRequest {
    pub project_id: Uuid,
    pub settings: NovelSettings,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushProjectResponse {
    pub project_id: Uuid,
    pub chapters: usize,
    pub synced_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullProjectRequest {
    pub project_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullProjectResponse {
    pub project_id: Uuid,
    pub settings: Option<NovelSettings>,
    pub chapters: Vec<Chapter>,
}

/// 推送整个项目到云端
pub async fn push_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PushProjectRequest>,
) -> Result<Json<ApiResponse<PushProjectResponse>>, ApiError> {
    let command = SyncProjectToCloud {
        project_id: req.project_id,
        settings: req.settings,
        chapters: req.chapters,
    };

    let result = state.sync_to_cloud_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(PushProjectResponse {
        project_id: result.project_id,
        chapters: result.chapters,
        synced_at: result.synced_at.to_rfc3339(),
    })))
}

/// 从云端拉取整个项目
pub async fn pull_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PullProjectRequest>,
) -> Result<Json<ApiResponse<PullProjectResponse>>, ApiError> {
    let query = SyncProjectFromCloud {
        project_id: req.project_id,
    };

    let result = state.sync_from_cloud_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(PullProjectResponse {
        project_id: result.project_id,
        settings: result.settings,
        chapters: result.chapters,
    })))
}
