//! Inkdesk - 网文创作云端同步服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Project Context: 作品、设定、章节
//! - backup: 备份文件格式
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ProjectStore）
//! - Commands: CQRS 命令处理器（建删改、激活切换、上传、导入）
//! - Queries: CQRS 查询处理器（列表、下载、拉取、导出）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Persistence: SQLite（关系型）与托管文档库（文档型）双后端
//! - Memory: 测试用内存 Store

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
