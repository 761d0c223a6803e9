//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 存储后端选择
    #[serde(default)]
    pub store: StoreConfig,

    /// SQLite 数据库配置（backend = sqlite 时生效）
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 托管文档库配置（backend = document 时生效）
    #[serde(default)]
    pub document_store: DocumentStoreConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// 关系型（SQLite）
    Sqlite,
    /// 文档型（托管文档库 REST API）
    Document,
}

impl Default for StoreBackend {
    fn default() -> Self {
        StoreBackend::Sqlite
    }
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Sqlite => "sqlite",
            StoreBackend::Document => "document",
        }
    }
}

/// 存储后端选择配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// 后端类型: sqlite | document
    #[serde(default)]
    pub backend: StoreBackend,
}

/// SQLite 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/inkdesk.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 托管文档库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentStoreConfig {
    /// 服务基础 URL
    #[serde(default = "default_document_url")]
    pub base_url: String,

    /// API Key
    #[serde(default)]
    pub api_key: String,

    /// 数据库名
    #[serde(default = "default_document_database")]
    pub database: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_document_timeout")]
    pub timeout_secs: u64,
}

fn default_document_url() -> String {
    "http://localhost:9090".to_string()
}

fn default_document_database() -> String {
    "inkdesk".to_string()
}

fn default_document_timeout() -> u64 {
    30
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_document_url(),
            api_key: String::new(),
            database: default_document_database(),
            timeout_secs: default_document_timeout(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5070);
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.database.path, "data/inkdesk.db");
        assert_eq!(config.document_store.base_url, "http://localhost:9090");
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5070");
    }

    #[test]
    fn test_database_url() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url(), "sqlite:data/inkdesk.db?mode=rwc");
    }

    #[test]
    fn test_backend_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            backend: StoreBackend,
        }
        let wrapper: Wrapper = serde_json::from_str(r#"{"backend":"document"}"#).unwrap();
        assert_eq!(wrapper.backend, StoreBackend::Document);
    }
}
