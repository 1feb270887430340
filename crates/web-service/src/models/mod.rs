//! Web层模型模块
//!
//! 这里定义HTTP接口的入参/出参对象，和数据库模型分离，
//! 返回对象里绝不出现密码散列之类的敏感字段。

pub mod common;
pub mod err;
pub mod packages;
pub mod pledges;
pub mod projects;
pub mod users;

pub use common::{AffectedRows, Reply, ReplyList};
pub use err::AppError;
