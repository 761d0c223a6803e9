//! Project HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    CreateProject, DeleteProject, GetActiveProject, GetProject, ListProjects, ProjectView,
    RenameProject, SwitchActiveProject,
};
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub user_id: String,
    pub title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreatedResponse {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsRequest {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GetProjectRequest {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RenameProjectRequest {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteProjectRequest {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateProjectRequest {
    pub user_id: String,
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub is_active: bool,
    pub source: String,
    pub last_synced_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProjectView> for ProjectResponse {
    fn from(view: ProjectView) -> Self {
        Self {
            id: view.id,
            title: view.title,
            is_active: view.is_active,
            source: view.source,
            last_synced_at: view.last_synced_at,
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// 创建作品
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<ApiResponse<ProjectCreatedResponse>>, ApiError> {
    let command = CreateProject {
        user_id: req.user_id,
        title: req.title,
    };

    let result = state.create_project_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(ProjectCreatedResponse {
        id: result.id,
        title: result.title,
    })))
}

/// 获取用户的作品列表
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListProjectsRequest>,
) -> Result<Json<ApiResponse<Vec<ProjectResponse>>>, ApiError> {
    let query = ListProjects {
        user_id: req.user_id,
    };

    let result = state.list_projects_handler.handle(query).await?;

    let responses: Vec<ProjectResponse> =
        result.into_iter().map(ProjectResponse::from).collect();
    Ok(Json(ApiResponse::success(responses)))
}

/// 获取作品详情
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetProjectRequest>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    let query = GetProject { project_id: req.id };

    let result = state.get_project_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(ProjectResponse::from(result))))
}

/// 重命名作品
pub async fn rename_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenameProjectRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let command = RenameProject {
        project_id: req.id,
        title: req.title,
    };

    state.rename_project_handler.handle(command).await?;

    Ok(Json(ApiResponse::ok()))
}

/// 删除作品（连带设定与全部章节）
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteProjectRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let command = DeleteProject { project_id: req.id };

    state.delete_project_handler.handle(command).await?;

    Ok(Json(ApiResponse::ok()))
}

/// 切换当前激活的作品
pub async fn activate_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ActivateProjectRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let command = SwitchActiveProject {
        user_id: req.user_id,
        project_id: req.id,
    };

    state.switch_active_handler.handle(command).await?;

    Ok(Json(ApiResponse::ok()))
}

/// 获取当前激活的作品（没有则 data 为 null）
pub async fn get_active_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListProjectsRequest>,
) -> Result<Json<ApiResponse<Option<ProjectResponse>>>, ApiError> {
    let query = GetActiveProject {
        user_id: req.user_id,
    };

    let result = state.get_active_project_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(
        result.map(ProjectResponse::from),
    )))
}
