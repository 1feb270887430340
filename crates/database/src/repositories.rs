//! 数据库仓库模块
//!
//! 这里定义数据库操作的Repository层

pub mod memory;
pub mod package;
pub mod project;
pub mod traits;
pub mod user;

// 重新导出具体的类型
pub use memory::{InMemoryPackageRepository, InMemoryProjectRepository, InMemoryStore, InMemoryUserRepository};
pub use package::PackageRepository;
pub use project::ProjectRepository;
pub use traits::{PackageRepositoryTrait, ProjectRepositoryTrait, UserRepositoryTrait};
pub use user::UserRepository;
