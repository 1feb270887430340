//! 项目数据库模型
//!
//! 定义项目相关的数据库模型结构体

use crate::models::package::PackageRecord;
use chrono::{DateTime, Utc};

/// 项目信息结构体
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectRecord {
    pub project_id: i32,
    /// 项目标题，全局唯一（创建时校验）
    pub title: String,
    pub description: String,
    pub category: String,
    pub country: String,
    /// 项目关联的图片/文件引用
    pub file_name: String,
    /// 目标金额，创建时必须为正数
    pub required_funds: f64,
    /// 已筹金额，从0开始，只通过认购增加
    pub current_funds: f64,
    pub created_date: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    /// 项目发起人
    pub user_id: i32,
}

/// 项目及其下属的全部套餐（列表/趋势查询的积极加载形态）
#[derive(Debug, Clone)]
pub struct ProjectWithPackages {
    pub project: ProjectRecord,
    pub packages: Vec<PackageRecord>,
}

/// 项目创建参数
///
/// `current_funds` 不在这里出现：新项目一律从0开始，由存储层写入。
#[derive(Debug, Clone)]
pub struct ProjectCreate {
    pub title: String,
    pub description: String,
    pub category: String,
    pub country: String,
    pub file_name: String,
    pub required_funds: f64,
    pub created_date: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub user_id: i32,
}

/// 项目更新参数
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub required_funds: Option<f64>,
    pub current_funds: Option<f64>,
    pub created_date: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
}

/// 认购落账结果
///
/// - `current_funds`: 本次入账之后项目的最新已筹金额
/// - `backer_added`: 本次认购是否新增了支持者关系（同一对项目/用户只记一次）
#[derive(Debug, Clone)]
pub struct PledgeRecord {
    pub project_id: i32,
    pub current_funds: f64,
    pub backer_added: bool,
}
