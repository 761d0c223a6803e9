//! Inkdesk - 网文创作云端同步服务
//!
//! - Domain: project/ (Bounded Context) + backup
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence (sqlite / document), memory

use std::sync::Arc;

use inkdesk::application::ProjectStorePort;
use inkdesk::config::{load_config, print_config, StoreBackend};
use inkdesk::infrastructure::http::{AppState, HttpServer, ServerConfig};
use inkdesk::infrastructure::persistence::document::{
    DocumentProjectStore, DocumentStoreClient, DocumentStoreConfig,
};
use inkdesk::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteProjectStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},inkdesk={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Inkdesk - 网文创作云端同步服务");
    print_config(&config);

    // 按配置选择存储后端（两端可互换，实现同一个 ProjectStorePort）
    let store: Arc<dyn ProjectStorePort> = match config.store.backend {
        StoreBackend::Sqlite => {
            // 确保数据目录存在
            if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }

            let db_config = DatabaseConfig {
                database_url: config.database.database_url(),
                max_connections: config.database.max_connections,
            };
            let pool = create_pool(&db_config).await?;
            run_migrations(&pool).await?;

            Arc::new(SqliteProjectStore::new(pool))
        }
        StoreBackend::Document => {
            let client_config = DocumentStoreConfig {
                base_url: config.document_store.base_url.clone(),
                api_key: config.document_store.api_key.clone(),
                database: config.document_store.database.clone(),
                timeout_secs: config.document_store.timeout_secs,
            };
            let client = DocumentStoreClient::new(client_config)
                .map_err(|e| anyhow::anyhow!("Failed to create document store client: {}", e))?;

            Arc::new(DocumentProjectStore::new(client))
        }
    };

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(store);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
