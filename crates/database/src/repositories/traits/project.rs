//! 项目仓库 trait 定义
//!
//! 定义项目数据库操作的抽象接口

use crate::models::project::{PledgeRecord, ProjectCreate, ProjectRecord, ProjectUpdate, ProjectWithPackages};
use crate::DatabaseResult;

/// 项目仓库trait定义
///
/// 定义了项目相关的数据库操作接口，支持：
/// - 项目创建
/// - 项目查询（单条/按标题/全量带套餐）
/// - 项目更新
/// - 项目删除（连带清理套餐和支持者关系）
/// - 认购落账（加款 + 支持者去重，单事务）
#[async_trait::async_trait]
pub trait ProjectRepositoryTrait: Send + Sync + 'static {
    /// 创建新项目
    ///
    /// 新项目的已筹金额固定从0开始。
    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectRecord>;

    /// 根据 ID 获取项目信息
    async fn get_project_by_id(&self, id: i32) -> DatabaseResult<Option<ProjectRecord>>;

    /// 根据标题精确查找项目（区分大小写）
    ///
    /// 用于创建时的标题唯一性检查。
    async fn find_project_by_title(&self, title: &str) -> DatabaseResult<Option<ProjectRecord>>;

    /// 获取全部项目，按存储顺序返回，并积极加载每个项目的套餐列表
    async fn list_projects(&self) -> DatabaseResult<Vec<ProjectWithPackages>>;

    /// 更新项目信息
    ///
    /// 只覆盖 `update` 中提供了的字段。项目不存在返回 `None`。
    async fn update_project(&self, id: i32, update: ProjectUpdate) -> DatabaseResult<Option<ProjectRecord>>;

    /// 删除项目
    ///
    /// 同一个事务里连带删除其套餐和支持者关系行。
    ///
    /// # 返回值
    /// 返回受影响的总行数，项目不存在时为 0
    async fn delete_project(&self, id: i32) -> DatabaseResult<u64>;

    /// 认购落账
    ///
    /// 在单个事务内完成：
    /// 1. `current_funds` 原子加款（读-改-写竞争在这里关闭）
    /// 2. (project, user) 支持者关系存在性检查，不存在才插入
    ///
    /// 项目不存在时返回 [`DatabaseError::NotFound`]。
    ///
    /// [`DatabaseError::NotFound`]: crate::DatabaseError::NotFound
    async fn record_pledge(&self, project_id: i32, user_id: i32, amount: f64) -> DatabaseResult<PledgeRecord>;
}
