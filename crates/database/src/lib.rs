//! 数据库操作模块
//!
//! 这个模块提供了数据库连接、模型和仓库等功能

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::{initialize_database, DatabasePool};
pub use error::DatabaseError;
pub use models::backer::BackerRecord;
pub use models::package::{PackageCreate, PackageRecord};
pub use models::project::{PledgeRecord, ProjectCreate, ProjectRecord, ProjectUpdate, ProjectWithPackages};
pub use models::user::{UserCreate, UserRecord, UserUpdate};
pub use repositories::memory::InMemoryStore;
pub use repositories::{
    memory::{InMemoryPackageRepository, InMemoryProjectRepository, InMemoryUserRepository},
    package::PackageRepository,
    project::ProjectRepository,
    traits::{PackageRepositoryTrait, ProjectRepositoryTrait, UserRepositoryTrait},
    user::UserRepository,
};

/// 数据库操作结果类型
pub type DatabaseResult<T> = Result<T, DatabaseError>;
