//! Settings HTTP Handlers
//!
//! 设定文档按 projectId 单文档 upsert/fetch

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{DownloadSettings, UploadSettings};
use crate::domain::project::NovelSettings;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSettingsRequest {
    pub project_id: Uuid,
    pub settings: NovelSettings,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadSettingsRequest {
    pub project_id: Uuid,
}

/// 上传作品设定
pub async fn upload_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UploadSettingsRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let command = UploadSettings {
        project_id: req.project_id,
        settings: req.settings,
    };

    state.upload_settings_handler.handle(command).await?;

    Ok(Json(ApiResponse::ok()))
}

/// 下载作品设定（尚未上传过时 data 为 null）
pub async fn download_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DownloadSettingsRequest>,
) -> Result<Json<ApiResponse<Option<NovelSettings>>>, ApiError> {
    let query = DownloadSettings {
        project_id: req.project_id,
    };

    let result = state.download_settings_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(result)))
}
