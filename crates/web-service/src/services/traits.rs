//! 服务层 trait 定义
//!
//! 定义服务层的抽象接口，作为应用层的端口(Port)，
//! 路由层只依赖这些trait，不关心背后是PostgreSQL还是内存实现。

use crate::models::packages::PackageOption;
use crate::models::projects::{ProjectOption, ProjectUpdateOption};
use crate::models::users::{UserOption, UserUpdateOption};
use crate::services::ServiceResult;
use database::{PackageRecord, PledgeRecord, ProjectRecord, ProjectWithPackages, UserRecord};

/// 用户服务 trait 定义
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync + 'static {
    /// 注册新用户
    ///
    /// 明文密码在这里散列，注册日期由服务端生成。
    /// 本层不做用户名/邮箱唯一性检查。
    async fn create_user(&self, options: UserOption) -> ServiceResult<UserRecord>;

    /// 根据 ID 获取用户信息，未命中返回 [`ServiceError::NotFound`]
    ///
    /// [`ServiceError::NotFound`]: crate::services::ServiceError::NotFound
    async fn get_user_by_id(&self, id: i32) -> ServiceResult<UserRecord>;

    /// 获取全部用户列表，不分页
    async fn get_users(&self) -> ServiceResult<Vec<UserRecord>>;

    /// 更新用户信息
    ///
    /// 提供了新密码时重新散列。支持者关系列表不经过这里修改，
    /// 只由认购流程维护。
    async fn update_user_by_id(&self, id: i32, options: UserUpdateOption) -> ServiceResult<UserRecord>;

    /// 删除用户
    ///
    /// # 返回值
    /// 返回受影响的行数（含连带删除的支持者关系行）
    async fn delete_user_by_id(&self, id: i32) -> ServiceResult<u64>;
}

/// 项目服务 trait 定义
///
/// 众筹业务的核心逻辑都在这里：创建校验、筹款入账、
/// 支持者登记去重和趋势项目计算。
#[async_trait::async_trait]
pub trait ProjectServiceTrait: Send + Sync + 'static {
    /// 创建新项目
    ///
    /// 校验规则：
    /// - 标题必填，且全局唯一（区分大小写）
    /// - 目标金额必须为正数
    /// - 截止时间必填
    ///
    /// 创建成功时已筹金额为0，创建时间取当前时间。
    async fn create_project(&self, options: ProjectOption) -> ServiceResult<ProjectRecord>;

    /// 根据 ID 获取项目信息（带套餐列表）
    async fn get_project_by_id(&self, id: i32) -> ServiceResult<ProjectWithPackages>;

    /// 获取全部项目，每个项目积极加载其套餐列表
    async fn get_projects(&self) -> ServiceResult<Vec<ProjectWithPackages>>;

    /// 更新项目信息
    async fn update_project_by_id(&self, id: i32, options: ProjectUpdateOption) -> ServiceResult<ProjectRecord>;

    /// 删除项目
    ///
    /// # 返回值
    /// 返回受影响的行数（含连带删除的套餐和支持者关系行）
    async fn delete_project_by_id(&self, id: i32) -> ServiceResult<u64>;

    /// 计算项目筹款进度百分比：已筹金额 / 目标金额 * 100
    async fn current_progress(&self, id: i32) -> ServiceResult<f64>;

    /// 获取某个项目的全部回报套餐
    async fn get_packages_by_id(&self, id: i32) -> ServiceResult<Vec<PackageRecord>>;

    /// 为项目新增回报套餐
    async fn add_package(&self, project_id: i32, options: PackageOption) -> ServiceResult<PackageRecord>;

    /// 项目是否已配置回报套餐
    async fn has_packages(&self, id: i32) -> ServiceResult<bool>;

    /// 认购：用户购买某个回报套餐
    ///
    /// 项目已筹金额每次都增加套餐价格；支持者关系每对
    /// (项目, 用户) 至多登记一次。加款和登记在存储层的
    /// 单个事务内完成。
    async fn pledge(&self, package_id: i32, user_id: i32) -> ServiceResult<PledgeRecord>;

    /// 趋势项目
    ///
    /// 按存储顺序扫描，已筹金额不低于运行最大值的项目依次入选，
    /// 之后整体反转并截断为至多2个。注意这不是常规的按金额top-2排序。
    async fn trending_projects(&self) -> ServiceResult<Vec<ProjectWithPackages>>;
}
