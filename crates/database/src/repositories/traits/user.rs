//! 用户仓库 trait 定义

use crate::models::user::{UserCreate, UserRecord, UserUpdate};
use crate::DatabaseResult;

/// 用户仓库trait定义
///
/// 定义了用户相关的数据库操作接口，支持：
/// - 用户创建
/// - 用户查询（单条/全量）
/// - 用户更新
/// - 用户删除（连带清理其支持者关系）
#[async_trait::async_trait]
pub trait UserRepositoryTrait: Send + Sync + 'static {
    /// 创建新用户
    async fn create_user(&self, user: UserCreate) -> DatabaseResult<UserRecord>;

    /// 根据 ID 获取用户信息
    ///
    /// 查询命中时会一并填充 `backed_projects` 支持者关系列表。
    /// 未命中返回 `None`，由调用方决定如何上报。
    async fn get_user_by_id(&self, id: i32) -> DatabaseResult<Option<UserRecord>>;

    /// 获取全部用户列表
    ///
    /// 列表场景不加载支持者关系。
    async fn list_users(&self) -> DatabaseResult<Vec<UserRecord>>;

    /// 更新用户信息
    ///
    /// 只覆盖 `update` 中提供了的字段，未提供的字段保持原值。
    /// 用户不存在返回 `None`。
    async fn update_user(&self, id: i32, update: UserUpdate) -> DatabaseResult<Option<UserRecord>>;

    /// 删除用户
    ///
    /// 同一个事务里连带删除其支持者关系行。
    ///
    /// # 返回值
    /// 返回受影响的总行数，用户不存在时为 0
    async fn delete_user(&self, id: i32) -> DatabaseResult<u64>;
}
