//! 项目相关的Web模型

use crate::models::packages::PackageView;
use chrono::{DateTime, Utc};
use database::{ProjectRecord, ProjectWithPackages};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 项目创建入参
///
/// 已筹金额和创建时间由服务端生成，调用方不传。
/// 标题/目标金额/截止时间的业务校验在服务层完成。
#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct ProjectOption {
    pub title: String,
    pub description: String,
    pub category: String,
    pub country: String,
    /// 项目关联的图片/文件引用
    pub file_name: String,
    #[schema(example = 1000.0)]
    pub required_funds: f64,
    /// 截止时间必填，缺省会被服务层拒绝
    pub deadline: Option<DateTime<Utc>>,
    /// 项目发起人
    pub user_id: i32,
}

/// 项目更新入参
///
/// 全部字段可选，只覆盖提供了的字段。
#[derive(Deserialize, Debug, Clone, Default, ToSchema)]
pub struct ProjectUpdateOption {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub required_funds: Option<f64>,
    pub current_funds: Option<f64>,
    pub created_date: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
}

/// 项目返回对象
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ProjectInfo {
    pub project_id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub country: String,
    pub file_name: String,
    pub required_funds: f64,
    pub current_funds: f64,
    pub created_date: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub user_id: i32,
    /// 项目下属的回报套餐
    pub packages: Vec<PackageView>,
}

impl From<ProjectRecord> for ProjectInfo {
    fn from(record: ProjectRecord) -> Self {
        Self {
            project_id: record.project_id,
            title: record.title,
            description: record.description,
            category: record.category,
            country: record.country,
            file_name: record.file_name,
            required_funds: record.required_funds,
            current_funds: record.current_funds,
            created_date: record.created_date,
            deadline: record.deadline,
            user_id: record.user_id,
            packages: Vec::new(),
        }
    }
}

impl From<ProjectWithPackages> for ProjectInfo {
    fn from(item: ProjectWithPackages) -> Self {
        let mut info = Self::from(item.project);
        info.packages = item.packages.into_iter().map(Into::into).collect();
        info
    }
}

/// 项目筹款进度
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ProgressInfo {
    pub project_id: i32,

    #[schema(example = 25.0)]
    /// 进度百分比：已筹金额 / 目标金额 * 100
    pub progress: f64,
}
