//! 用户相关的Web模型

use chrono::{DateTime, Utc};
use database::UserRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 用户注册入参
///
/// 注册日期和用户ID由服务端生成，调用方不传。
#[derive(Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct UserOption {
    #[validate(length(min = 1))]
    pub first_name: String,

    #[validate(length(min = 1))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub username: String,

    /// 明文密码，仅在请求中出现，落库前会被散列
    #[validate(length(min = 8))]
    pub password: String,

    #[validate(range(min = 0, max = 150))]
    pub age: i32,

    pub gender: String,

    #[schema(example = 0.0)]
    pub initial_funds: f64,
}

/// 用户更新入参
///
/// 全部字段可选，只覆盖提供了的字段。
#[derive(Deserialize, Debug, Clone, Default, ToSchema)]
pub struct UserUpdateOption {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    /// 提供新密码时会重新散列后落库
    pub password: Option<String>,
    pub registration_date: Option<DateTime<Utc>>,
}

/// 用户返回对象
///
/// 不携带任何密码信息。`backed_projects` 是该用户支持过的项目ID列表，
/// 只在单条查询时填充。
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct UserInfo {
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub age: i32,
    pub gender: String,
    pub registration_date: DateTime<Utc>,
    pub initial_funds: f64,
    pub backed_projects: Vec<i32>,
}

impl From<UserRecord> for UserInfo {
    fn from(record: UserRecord) -> Self {
        Self {
            user_id: record.user_id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            username: record.username,
            age: record.age,
            gender: record.gender,
            registration_date: record.registration_date,
            initial_funds: record.initial_funds,
            backed_projects: record.backed_projects.into_iter().map(|b| b.project_key).collect(),
        }
    }
}
