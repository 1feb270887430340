//! 支持者关系模型

/// 项目-用户支持者关系
///
/// 表示"该用户至少认购过该项目一次"。
/// 每对 (project_key, user_key) 至多一行，由认购事务内的存在性检查保证。
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BackerRecord {
    pub project_key: i32,
    pub user_key: i32,
}
