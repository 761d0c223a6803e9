//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, StoreBackend};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `INKDESK_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `INKDESK_SERVER__HOST=127.0.0.1`
/// - `INKDESK_SERVER__PORT=8080`
/// - `INKDESK_STORE__BACKEND=document`
/// - `INKDESK_DOCUMENT_STORE__BASE_URL=https://docs.example.com`
/// - `INKDESK_DATABASE__PATH=/data/inkdesk.db`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5070)?
        .set_default("store.backend", "sqlite")?
        .set_default("database.path", "data/inkdesk.db")?
        .set_default("database.max_connections", 5)?
        .set_default("document_store.base_url", "http://localhost:9090")?
        .set_default("document_store.api_key", "")?
        .set_default("document_store.database", "inkdesk")?
        .set_default("document_store.timeout_secs", 30)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: INKDESK_
    // 层级分隔符: __ (双下划线)
    // 例如: INKDESK_STORE__BACKEND=document
    builder = builder.add_source(
        Environment::with_prefix("INKDESK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证端口范围
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 按选定的后端验证对应配置
    match config.store.backend {
        StoreBackend::Sqlite => {
            if config.database.path.is_empty() {
                return Err(ConfigError::ValidationError(
                    "Database path cannot be empty".to_string(),
                ));
            }
        }
        StoreBackend::Document => {
            if config.document_store.base_url.is_empty() {
                return Err(ConfigError::ValidationError(
                    "Document store base URL cannot be empty".to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Store Backend: {}", config.store.backend.as_str());
    match config.store.backend {
        StoreBackend::Sqlite => {
            tracing::info!("Database: {}", config.database.path);
            tracing::info!(
                "Database Max Connections: {}",
                config.database.max_connections
            );
        }
        StoreBackend::Document => {
            tracing::info!("Document Store: {}", config.document_store.base_url);
            tracing::info!("Document Database: {}", config.document_store.database);
            tracing::info!(
                "Document Store Timeout: {}s",
                config.document_store.timeout_secs
            );
        }
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
