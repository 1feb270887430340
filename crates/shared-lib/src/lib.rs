//! 🔧 共享库模块
//!
//! 这个模块包含了在多个服务之间共享的通用代码，包括：
//! - 程序配置
//! - 密码散列工具

pub mod credential;
pub mod models;

// 重新导出常用类型
pub use credential::{hash_password, verify_password, CredentialError};
pub use models::AppConfig;
