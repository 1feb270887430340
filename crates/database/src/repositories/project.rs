//! 项目仓库
//!
//! 负责项目相关的数据库操作

use crate::models::package::PackageRecord;
use crate::models::project::{PledgeRecord, ProjectCreate, ProjectRecord, ProjectUpdate, ProjectWithPackages};
use crate::repositories::traits::ProjectRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::debug;

/// 项目仓库结构体
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// 创建新的项目仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    /// 创建新项目
    ///
    /// 已筹金额固定写入0，创建时间由服务层指定。
    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectRecord> {
        debug!("📝 创建项目: {}", project.title);

        let created = sqlx::query_as::<_, ProjectRecord>(
            r#"
            INSERT INTO cf.projects (title, description, category, country, file_name,
                                     required_funds, current_funds, created_date, deadline, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8, $9)
            RETURNING project_id, title, description, category, country, file_name,
                      required_funds, current_funds, created_date, deadline, user_id;
            "#,
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.category)
        .bind(&project.country)
        .bind(&project.file_name)
        .bind(project.required_funds)
        .bind(project.created_date)
        .bind(project.deadline)
        .bind(project.user_id)
        .fetch_one(&self.pool)
        .await?;

        debug!("✅ 项目创建成功: {}", created.project_id);
        Ok(created)
    }

    /// 根据 ID 获取项目信息
    async fn get_project_by_id(&self, id: i32) -> DatabaseResult<Option<ProjectRecord>> {
        debug!("🔍 根据 ID 获取项目: {}", id);

        let project = sqlx::query_as::<_, ProjectRecord>(
            r#"
            SELECT project_id, title, description, category, country, file_name,
                   required_funds, current_funds, created_date, deadline, user_id
            FROM cf.projects
            WHERE project_id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// 根据标题精确查找项目（区分大小写）
    async fn find_project_by_title(&self, title: &str) -> DatabaseResult<Option<ProjectRecord>> {
        let project = sqlx::query_as::<_, ProjectRecord>(
            r#"
            SELECT project_id, title, description, category, country, file_name,
                   required_funds, current_funds, created_date, deadline, user_id
            FROM cf.projects
            WHERE title = $1
            LIMIT 1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// 获取全部项目，按存储顺序返回，积极加载套餐
    ///
    /// 两条查询在内存中按 `project_id` 分组拼装，避免N+1查询。
    async fn list_projects(&self) -> DatabaseResult<Vec<ProjectWithPackages>> {
        let projects = sqlx::query_as::<_, ProjectRecord>(
            r#"
            SELECT project_id, title, description, category, country, file_name,
                   required_funds, current_funds, created_date, deadline, user_id
            FROM cf.projects
            ORDER BY project_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let packages = sqlx::query_as::<_, PackageRecord>(
            r#"
            SELECT package_id, project_id, title, price, description, reward
            FROM cf.packages
            ORDER BY package_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_project: HashMap<i32, Vec<PackageRecord>> = HashMap::new();
        for package in packages {
            by_project.entry(package.project_id).or_default().push(package);
        }

        let result = projects
            .into_iter()
            .map(|project| {
                let packages = by_project.remove(&project.project_id).unwrap_or_default();
                ProjectWithPackages { project, packages }
            })
            .collect();

        Ok(result)
    }

    /// 更新项目信息
    ///
    /// 使用`coalesce`函数，未提供的字段保持之前值。
    async fn update_project(&self, id: i32, update: ProjectUpdate) -> DatabaseResult<Option<ProjectRecord>> {
        debug!("🔄 更新项目 {} 信息", id);

        let project = sqlx::query_as::<_, ProjectRecord>(
            r#"
            UPDATE cf.projects
            SET title = coalesce($2, title),
                description = coalesce($3, description),
                category = coalesce($4, category),
                country = coalesce($5, country),
                required_funds = coalesce($6, required_funds),
                current_funds = coalesce($7, current_funds),
                created_date = coalesce($8, created_date),
                deadline = coalesce($9, deadline)
            WHERE project_id = $1
            RETURNING project_id, title, description, category, country, file_name,
                      required_funds, current_funds, created_date, deadline, user_id;
            "#,
        )
        .bind(id)
        .bind(update.title)
        .bind(update.description)
        .bind(update.category)
        .bind(update.country)
        .bind(update.required_funds)
        .bind(update.current_funds)
        .bind(update.created_date)
        .bind(update.deadline)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// 删除项目
    ///
    /// 套餐和支持者关系行在同一个事务里连带删除，返回受影响的总行数。
    async fn delete_project(&self, id: i32) -> DatabaseResult<u64> {
        debug!("🗑️ 删除项目: {}", id);

        let mut tx = self.pool.begin().await?;

        let backers = sqlx::query("DELETE FROM cf.project_user_backers WHERE project_key = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let packages = sqlx::query("DELETE FROM cf.packages WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let projects = sqlx::query("DELETE FROM cf.projects WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let affected = backers.rows_affected() + packages.rows_affected() + projects.rows_affected();
        debug!("✅ 项目删除完成，受影响行数: {}", affected);
        Ok(affected)
    }

    /// 认购落账
    ///
    /// 单个事务内完成加款和支持者登记：
    /// - 加款直接在数据库侧 `current_funds = current_funds + $n`，
    ///   并发认购不会丢失更新
    /// - 支持者关系先查后插，保证每对 (project, user) 至多一行
    async fn record_pledge(&self, project_id: i32, user_id: i32, amount: f64) -> DatabaseResult<PledgeRecord> {
        debug!("💰 项目 {} 入账 {}，用户 {}", project_id, amount, user_id);

        let mut tx = self.pool.begin().await?;

        let current_funds: Option<f64> = sqlx::query_scalar(
            r#"
            UPDATE cf.projects
            SET current_funds = current_funds + $2
            WHERE project_id = $1
            RETURNING current_funds;
            "#,
        )
        .bind(project_id)
        .bind(amount)
        .fetch_optional(&mut *tx)
        .await?;

        // 事务在提前返回时自动回滚
        let Some(current_funds) = current_funds else {
            return Err(DatabaseError::not_found(format!("项目 {project_id} 不存在")));
        };

        let existing: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT user_key
            FROM cf.project_user_backers
            WHERE project_key = $1 AND user_key = $2
            LIMIT 1
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let backer_added = existing.is_none();
        if backer_added {
            sqlx::query("INSERT INTO cf.project_user_backers (project_key, user_key) VALUES ($1, $2)")
                .bind(project_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        debug!("✅ 入账完成，当前已筹: {}，新增支持者: {}", current_funds, backer_added);
        Ok(PledgeRecord {
            project_id,
            current_funds,
            backer_added,
        })
    }
}
