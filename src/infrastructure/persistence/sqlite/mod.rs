//! SQLite Persistence - 关系型存储实现

mod database;
mod project_store;

pub use database::*;
pub use project_store::*;
