//! 用户仓库
//!
//! 负责用户相关的数据库操作

use crate::models::backer::BackerRecord;
use crate::models::user::{UserCreate, UserRecord, UserUpdate};
use crate::repositories::traits::UserRepositoryTrait;
use crate::DatabaseResult;
use sqlx::PgPool;
use tracing::debug;

/// 用户仓库结构体
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// 创建新的用户仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserRepositoryTrait for UserRepository {
    /// 创建新用户
    ///
    /// 注册日期由服务层指定，密码已经是散列后的字符串。
    async fn create_user(&self, user: UserCreate) -> DatabaseResult<UserRecord> {
        debug!("📝 创建用户: {}", user.username);

        let created = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO cf.users (first_name, last_name, email, username, password_hash,
                                  age, gender, registration_date, initial_funds)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING user_id, first_name, last_name, email, username, password_hash,
                      age, gender, registration_date, initial_funds;
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.age)
        .bind(&user.gender)
        .bind(user.registration_date)
        .bind(user.initial_funds)
        .fetch_one(&self.pool)
        .await?;

        debug!("✅ 用户创建成功: {}", created.user_id);
        Ok(created)
    }

    /// 根据 ID 获取用户信息
    ///
    /// 命中时一并加载该用户的支持者关系列表。
    async fn get_user_by_id(&self, id: i32) -> DatabaseResult<Option<UserRecord>> {
        debug!("🔍 根据 ID 获取用户: {}", id);

        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT user_id, first_name, last_name, email, username, password_hash,
                   age, gender, registration_date, initial_funds
            FROM cf.users
            WHERE user_id = $1
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut user) = user else {
            return Ok(None);
        };

        user.backed_projects = sqlx::query_as::<_, BackerRecord>(
            r#"
            SELECT project_key, user_key
            FROM cf.project_user_backers
            WHERE user_key = $1
            ORDER BY project_key
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(user))
    }

    /// 获取全部用户列表，不加载支持者关系
    async fn list_users(&self) -> DatabaseResult<Vec<UserRecord>> {
        let users = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT user_id, first_name, last_name, email, username, password_hash,
                   age, gender, registration_date, initial_funds
            FROM cf.users
            ORDER BY user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("✅ 用户列表查询完成，共 {} 个", users.len());
        Ok(users)
    }

    /// 更新用户信息
    ///
    /// 使用`coalesce`函数：用户未提供的字段传入null，最终保持之前值。
    /// 好处是防止前端输入了空数据导致数据被误清除，也不用`if`拼接SQL。
    async fn update_user(&self, id: i32, update: UserUpdate) -> DatabaseResult<Option<UserRecord>> {
        debug!("🔄 更新用户 {} 信息", id);

        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE cf.users
            SET first_name = coalesce($2, first_name),
                last_name = coalesce($3, last_name),
                email = coalesce($4, email),
                username = coalesce($5, username),
                password_hash = coalesce($6, password_hash),
                registration_date = coalesce($7, registration_date)
            WHERE user_id = $1
            RETURNING user_id, first_name, last_name, email, username, password_hash,
                      age, gender, registration_date, initial_funds;
            "#,
        )
        .bind(id)
        .bind(update.first_name)
        .bind(update.last_name)
        .bind(update.email)
        .bind(update.username)
        .bind(update.password_hash)
        .bind(update.registration_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// 删除用户
    ///
    /// 支持者关系行在同一个事务里连带删除，返回受影响的总行数。
    async fn delete_user(&self, id: i32) -> DatabaseResult<u64> {
        debug!("🗑️ 删除用户: {}", id);

        let mut tx = self.pool.begin().await?;

        let backers = sqlx::query("DELETE FROM cf.project_user_backers WHERE user_key = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let users = sqlx::query("DELETE FROM cf.users WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let affected = backers.rows_affected() + users.rows_affected();
        debug!("✅ 用户删除完成，受影响行数: {}", affected);
        Ok(affected)
    }
}
