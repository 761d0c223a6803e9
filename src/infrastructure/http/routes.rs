//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping               GET   健康检查
//! - /api/project/create     POST  创建作品
//! - /api/project/list       POST  获取用户作品列表
//! - /api/project/get        POST  获取作品详情
//! - /api/project/rename     POST  重命名作品
//! - /api/project/delete     POST  删除作品（连带设定与章节）
//! - /api/project/activate   POST  切换激活作品（两步序列）
//! - /api/project/active     POST  获取当前激活作品
//! - /api/settings/upload    POST  上传作品设定
//! - /api/settings/download  POST  下载作品设定
//! - /api/chapter/upload     POST  上传章节（按 number 匹配）
//! - /api/chapter/download   POST  下载全部章节
//! - /api/sync/push          POST  整项目推送（设定 → 章节）
//! - /api/sync/pull          POST  整项目拉取（设定 → 章节）
//! - /api/backup/export      POST  导出备份 JSON
//! - /api/backup/import      POST  导入备份 JSON（multipart）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/project", project_routes())
        .nest("/settings", settings_routes())
        .nest("/chapter", chapter_routes())
        .nest("/sync", sync_routes())
        .nest("/backup", backup_routes())
}

/// Project 路由
fn project_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_project))
        .route("/list", post(handlers::list_projects))
        .route("/get", post(handlers::get_project))
        .route("/rename", post(handlers::rename_project))
        .route("/delete", post(handlers::delete_project))
        .route("/activate", post(handlers::activate_project))
        .route("/active", post(handlers::get_active_project))
}

/// Settings 路由
fn settings_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(handlers::upload_settings))
        .route("/download", post(handlers::download_settings))
}

/// Chapter 路由
fn chapter_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(handlers::upload_chapters))
        .route("/download", post(handlers::download_chapters))
}

/// Sync 路由
fn sync_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/push", post(handlers::push_project))
        .route("/pull", post(handlers::pull_project))
}

/// Backup 路由
fn backup_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/export", post(handlers::export_backup))
        .route("/import", post(handlers::import_backup))
}
