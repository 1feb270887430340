//! 数据库仓库 trait 定义
//!
//! 这里定义了各种数据库仓库的抽象接口
//!
//! 所有 Repository trait 都遵循统一的设计模式，实现以下 trait 约束：
//!
//! ```rust
//! pub trait XxxRepositoryTrait: Send + Sync + 'static {
//!     // 异步方法定义...
//! }
//! ```
//!
//! - `Send`/`Sync`: 异步方法返回的 `Future` 会在不同线程间传递，
//!   Repository 实例作为共享服务被多个并发请求同时访问
//! - `'static`: 作为应用服务长期运行，不依赖于短期引用
//!
//! 服务层只面向这些trait编程，生产环境注入PostgreSQL实现，
//! 测试环境注入内存实现。

pub mod package;
pub mod project;
pub mod user;

// 重新导出
pub use package::PackageRepositoryTrait;
pub use project::ProjectRepositoryTrait;
pub use user::UserRepositoryTrait;
