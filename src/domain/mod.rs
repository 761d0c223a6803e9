//! Domain Layer - 领域层
//!
//! 单一限界上下文:
//! - Project Context: 作品、设定、章节

pub mod backup;
pub mod project;

// 共享的时间戳兼容层
pub mod timestamp;

pub use backup::{backup_file_name, BackupDocument, BackupError, BACKUP_VERSION};
