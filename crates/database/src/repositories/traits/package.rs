//! 套餐仓库 trait 定义

use crate::models::package::{PackageCreate, PackageRecord};
use crate::DatabaseResult;

/// 套餐仓库trait定义
#[async_trait::async_trait]
pub trait PackageRepositoryTrait: Send + Sync + 'static {
    /// 创建新套餐
    async fn create_package(&self, package: PackageCreate) -> DatabaseResult<PackageRecord>;

    /// 根据 ID 获取套餐信息
    async fn get_package_by_id(&self, id: i32) -> DatabaseResult<Option<PackageRecord>>;

    /// 获取某个项目的全部套餐
    async fn list_packages_by_project(&self, project_id: i32) -> DatabaseResult<Vec<PackageRecord>>;
}
