//! Document Persistence - 托管文档数据库存储实现

mod client;
mod project_store;

pub use client::{DocumentApiError, DocumentStoreClient, DocumentStoreConfig};
pub use project_store::DocumentProjectStore;
