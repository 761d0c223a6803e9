//! Memory Layer - In-Memory State Management
//!
//! ProjectStorePort 的内存实现，供应用层测试使用

mod project_store;

pub use project_store::InMemoryProjectStore;
