//! 套餐仓库
//!
//! 负责回报套餐相关的数据库操作

use crate::models::package::{PackageCreate, PackageRecord};
use crate::repositories::traits::PackageRepositoryTrait;
use crate::DatabaseResult;
use sqlx::PgPool;
use tracing::debug;

/// 套餐仓库结构体
#[derive(Debug, Clone)]
pub struct PackageRepository {
    pool: PgPool,
}

impl PackageRepository {
    /// 创建新的套餐仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PackageRepositoryTrait for PackageRepository {
    /// 创建新套餐
    async fn create_package(&self, package: PackageCreate) -> DatabaseResult<PackageRecord> {
        debug!("📝 为项目 {} 创建套餐: {}", package.project_id, package.title);

        let created = sqlx::query_as::<_, PackageRecord>(
            r#"
            INSERT INTO cf.packages (project_id, title, price, description, reward)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING package_id, project_id, title, price, description, reward;
            "#,
        )
        .bind(package.project_id)
        .bind(&package.title)
        .bind(package.price)
        .bind(&package.description)
        .bind(&package.reward)
        .fetch_one(&self.pool)
        .await?;

        debug!("✅ 套餐创建成功: {}", created.package_id);
        Ok(created)
    }

    /// 根据 ID 获取套餐信息
    async fn get_package_by_id(&self, id: i32) -> DatabaseResult<Option<PackageRecord>> {
        let package = sqlx::query_as::<_, PackageRecord>(
            r#"
            SELECT package_id, project_id, title, price, description, reward
            FROM cf.packages
            WHERE package_id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(package)
    }

    /// 获取某个项目的全部套餐
    async fn list_packages_by_project(&self, project_id: i32) -> DatabaseResult<Vec<PackageRecord>> {
        let packages = sqlx::query_as::<_, PackageRecord>(
            r#"
            SELECT package_id, project_id, title, price, description, reward
            FROM cf.packages
            WHERE project_id = $1
            ORDER BY package_id
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(packages)
    }
}
