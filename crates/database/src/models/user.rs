//! 用户数据库模型

use crate::models::backer::BackerRecord;
use chrono::{DateTime, Utc};

/// 用户信息结构体
///
/// `password_hash` 保存的是argon2散列字符串，任何时候都不保存明文密码。
///
/// `backed_projects` 只在单条查询时填充，列表查询保持为空。
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub age: i32,
    pub gender: String,
    pub registration_date: DateTime<Utc>,
    pub initial_funds: f64,
    #[sqlx(skip)]
    pub backed_projects: Vec<BackerRecord>,
}

/// 用户创建参数
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub age: i32,
    pub gender: String,
    pub registration_date: DateTime<Utc>,
    pub initial_funds: f64,
}

/// 用户更新参数
///
/// 可变更字段限定为资料类字段，年龄/性别/启动资金不在更新范围内。
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub registration_date: Option<DateTime<Utc>>,
}
