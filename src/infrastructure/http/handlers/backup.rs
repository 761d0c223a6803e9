//! Backup HTTP Handlers
//!
//! 导出返回备份文档和建议文件名，实际落盘/下载由前端完成；
//! 导入走 multipart 文件上传

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{ExportBackup, ImportBackup};
use crate::domain::BackupDocument;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBackupRequest {
    pub project_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBackupResponse {
    pub file_name: String,
    pub document: BackupDocument,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBackupResponse {
    pub project_id: Uuid,
    pub title: String,
    pub chapters: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// 导出备份
pub async fn export_backup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExportBackupRequest>,
) -> Result<Json<ApiResponse<ExportBackupResponse>>, ApiError> {
    let query = ExportBackup {
        project_id: req.project_id,
    };

    let result = state.export_backup_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(ExportBackupResponse {
        file_name: result.file_name,
        document: result.document,
    })))
}

/// 导入备份 JSON 文件，创建一个新的 imported 作品
pub async fn import_backup(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ImportBackupResponse>>, ApiError> {
    let mut user_id: Option<String> = None;
    let mut raw: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "userId" => {
                user_id = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read userId: {}", e))
                })?);
            }
            "file" => {
                let filename = field.file_name().map(|s| s.to_string());

                // 验证文件类型
                let content_type = field.content_type().unwrap_or("application/octet-stream");
                let is_json = filename
                    .as_ref()
                    .map(|f| f.to_lowercase().ends_with(".json"))
                    .unwrap_or(false);
                let is_json_type = content_type.contains("json");

                if !is_json && !is_json_type {
                    return Err(ApiError::BadRequest(
                        "Only JSON backup files are allowed".to_string(),
                    ));
                }

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

                // 验证文件大小（最大 20MB）
                const MAX_SIZE: usize = 20 * 1024 * 1024;
                if bytes.len() > MAX_SIZE {
                    return Err(ApiError::BadRequest(format!(
                        "File too large. Maximum size is {} MB",
                        MAX_SIZE / 1024 / 1024
                    )));
                }

                raw = Some(String::from_utf8(bytes.to_vec()).map_err(|_| {
                    ApiError::BadRequest("File must be valid UTF-8 text".to_string())
                })?);
            }
            _ => {}
        }
    }

    let user_id =
        user_id.ok_or_else(|| ApiError::BadRequest("userId is required".to_string()))?;
    let raw = raw.ok_or_else(|| ApiError::BadRequest("File is required".to_string()))?;

    let command = ImportBackup { user_id, raw };
    let result = state.import_backup_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(ImportBackupResponse {
        project_id: result.project_id,
        title: result.title,
        chapters: result.chapters,
    })))
}
