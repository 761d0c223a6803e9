//! Persistence Layer - 数据持久化
//!
//! SQLite（关系型）和托管文档库（文档型）两套可互换的存储实现

pub mod document;
pub mod sqlite;

pub use document::DocumentProjectStore;
pub use sqlite::SqliteProjectStore;
