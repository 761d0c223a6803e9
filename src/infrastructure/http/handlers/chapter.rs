//! Chapter HTTP Handlers
//!
//! 章节按 number 匹配上传，下载按 number 升序返回

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{DownloadChapters, UploadChapters};
use crate::domain::project::Chapter;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadChaptersRequest {
    pub project_id: Uuid,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadChaptersResponse {
    pub project_id: Uuid,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadChaptersRequest {
    pub project_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaptersResponse {
    pub project_id: Uuid,
    pub total: usize,
    pub chapters: Vec<Chapter>,
}

/// 上传章节
pub async fn upload_chapters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UploadChaptersRequest>,
) -> Result<Json<ApiResponse<UploadChaptersResponse>>, ApiError> {
    let command = UploadChapters {
        project_id: req.project_id,
        chapters: req.chapters,
    };

    let result = state.upload_chapters_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(UploadChaptersResponse {
        project_id: result.project_id,
        count: result.count,
    })))
}

/// 下载作品全部章节
pub async fn download_chapters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DownloadChaptersRequest>,
) -> Result<Json<ApiResponse<ChaptersResponse>>, ApiError> {
    let query = DownloadChapters {
        project_id: req.project_id,
    };

    let chapters = state.download_chapters_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(ChaptersResponse {
        project_id: req.project_id,
        total: chapters.len(),
        chapters,
    })))
}
