//! 数据库模型模块
//!
//! 这里定义与数据库表对应的结构体和相关操作

pub mod backer;
pub mod package;
pub mod project;
pub mod user;

// 重新导出具体的模型
pub use backer::BackerRecord;
pub use package::{PackageCreate, PackageRecord};
pub use project::{PledgeRecord, ProjectCreate, ProjectRecord, ProjectUpdate, ProjectWithPackages};
pub use user::{UserCreate, UserRecord, UserUpdate};
