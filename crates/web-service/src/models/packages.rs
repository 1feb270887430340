//! 回报套餐相关的Web模型

use database::PackageRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 套餐创建入参，所属项目由路径参数决定
#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct PackageOption {
    pub title: String,
    #[schema(example = 50.0)]
    pub price: f64,
    pub description: String,
    /// 回报内容说明
    pub reward: String,
}

/// 套餐返回对象
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct PackageView {
    pub package_id: i32,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub reward: String,
    pub project_id: i32,
}

impl From<PackageRecord> for PackageView {
    fn from(record: PackageRecord) -> Self {
        Self {
            package_id: record.package_id,
            title: record.title,
            price: record.price,
            description: record.description,
            reward: record.reward,
            project_id: record.project_id,
        }
    }
}
