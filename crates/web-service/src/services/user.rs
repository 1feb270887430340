//! 用户服务
//!
//! 提供用户相关的业务逻辑操作

use crate::models::users::{UserOption, UserUpdateOption};
use crate::services::traits::UserServiceTrait;
use crate::services::{ServiceError, ServiceResult};
use chrono::Utc;
use database::{UserCreate, UserRecord, UserRepositoryTrait, UserUpdate};
use tracing::info;

#[derive(Debug, Clone)]
pub struct UserService<UR: UserRepositoryTrait> {
    user_repository: UR,
}

impl<UR: UserRepositoryTrait> UserService<UR> {
    pub fn new(user_repository: UR) -> Self {
        Self { user_repository }
    }
}

#[async_trait::async_trait]
impl<UR: UserRepositoryTrait> UserServiceTrait for UserService<UR> {
    /// 注册新用户
    ///
    /// 明文密码先经过加盐散列再落库，注册日期取当前时间。
    async fn create_user(&self, options: UserOption) -> ServiceResult<UserRecord> {
        let password_hash = shared_lib::hash_password(&options.password)?;

        let user = self
            .user_repository
            .create_user(UserCreate {
                first_name: options.first_name,
                last_name: options.last_name,
                email: options.email,
                username: options.username,
                password_hash,
                age: options.age,
                gender: options.gender,
                registration_date: Utc::now(),
                initial_funds: options.initial_funds,
            })
            .await?;

        info!("🙋 用户注册成功: {} ({})", user.username, user.user_id);
        Ok(user)
    }

    async fn get_user_by_id(&self, id: i32) -> ServiceResult<UserRecord> {
        self.user_repository
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("用户 {id}")))
    }

    async fn get_users(&self) -> ServiceResult<Vec<UserRecord>> {
        Ok(self.user_repository.list_users().await?)
    }

    /// 更新用户信息
    ///
    /// 只覆盖提供了的字段；提供了新密码时重新散列。
    async fn update_user_by_id(&self, id: i32, options: UserUpdateOption) -> ServiceResult<UserRecord> {
        let password_hash = match options.password {
            Some(plain) => Some(shared_lib::hash_password(&plain)?),
            None => None,
        };

        self.user_repository
            .update_user(
                id,
                UserUpdate {
                    first_name: options.first_name,
                    last_name: options.last_name,
                    email: options.email,
                    username: options.username,
                    password_hash,
                    registration_date: options.registration_date,
                },
            )
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("用户 {id}")))
    }

    /// 删除用户
    ///
    /// 先确认用户存在再删除，未命中上报 [`ServiceError::NotFound`]。
    async fn delete_user_by_id(&self, id: i32) -> ServiceResult<u64> {
        let user = self.get_user_by_id(id).await?;

        let affected = self.user_repository.delete_user(user.user_id).await?;
        info!("🗑️ 用户 {} 已删除，受影响行数: {}", id, affected);
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::project::ProjectService;
    use crate::services::ProjectServiceTrait;
    use database::{InMemoryPackageRepository, InMemoryProjectRepository, InMemoryStore, InMemoryUserRepository};

    fn build_user_service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new(InMemoryStore::new()))
    }

    fn user_option(username: &str) -> UserOption {
        UserOption {
            first_name: "San".to_string(),
            last_name: "Zhang".to_string(),
            email: format!("{username}@example.com"),
            username: username.to_string(),
            password: "Secret123".to_string(),
            age: 30,
            gender: "male".to_string(),
            initial_funds: 100.0,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let service = build_user_service();
        let before = Utc::now();

        let created = service.create_user(user_option("zhangsan")).await.unwrap();
        let fetched = service.get_user_by_id(created.user_id).await.unwrap();

        // 提交的字段原样可读
        assert_eq!(fetched.first_name, "San");
        assert_eq!(fetched.last_name, "Zhang");
        assert_eq!(fetched.email, "zhangsan@example.com");
        assert_eq!(fetched.username, "zhangsan");
        assert_eq!(fetched.age, 30);
        assert_eq!(fetched.gender, "male");
        assert_eq!(fetched.initial_funds, 100.0);
        assert!(fetched.backed_projects.is_empty());

        // 注册日期由服务端生成
        assert!(fetched.registration_date >= before);
        assert!(fetched.registration_date <= Utc::now());

        // 密码只以可校验的散列形式存在
        assert_ne!(fetched.password_hash, "Secret123");
        assert!(shared_lib::verify_password("Secret123", &fetched.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let service = build_user_service();
        let err = service.get_user_by_id(42).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_users() {
        let service = build_user_service();
        service.create_user(user_option("first")).await.unwrap();
        service.create_user(user_option("second")).await.unwrap();

        let users = service.get_users().await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_update_keeps_password_when_not_provided() {
        let service = build_user_service();
        let created = service.create_user(user_option("zhangsan")).await.unwrap();

        let updated = service
            .update_user_by_id(
                created.user_id,
                UserUpdateOption {
                    email: Some("new@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "new@example.com");
        // 未提供密码时散列保持不变
        assert_eq!(updated.password_hash, created.password_hash);
        // 未提供的字段保持原值
        assert_eq!(updated.username, "zhangsan");
    }

    #[tokio::test]
    async fn test_update_rehashes_new_password() {
        let service = build_user_service();
        let created = service.create_user(user_option("zhangsan")).await.unwrap();

        let updated = service
            .update_user_by_id(
                created.user_id,
                UserUpdateOption {
                    password: Some("NewSecret456".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_ne!(updated.password_hash, created.password_hash);
        assert!(shared_lib::verify_password("NewSecret456", &updated.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let service = build_user_service();
        let err = service.update_user_by_id(42, UserUpdateOption::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let service = build_user_service();
        let err = service.delete_user_by_id(42).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_user_cascades_backer_rows() {
        // 用户删除要连带清理其支持者关系行，需要完整的认购链路来铺数据
        let store = InMemoryStore::new();
        let user_repo = InMemoryUserRepository::new(store.clone());
        let user_service = UserService::new(user_repo.clone());
        let project_service = ProjectService::new(
            InMemoryProjectRepository::new(store.clone()),
            InMemoryPackageRepository::new(store.clone()),
            UserService::new(user_repo),
        );

        let user = user_service.create_user(user_option("backer")).await.unwrap();
        let project = project_service
            .create_project(crate::models::projects::ProjectOption {
                title: "Smart Watch".to_string(),
                description: "A watch".to_string(),
                category: "Tech".to_string(),
                country: "GR".to_string(),
                file_name: "watch.png".to_string(),
                required_funds: 1000.0,
                deadline: Some(Utc::now() + chrono::Duration::days(30)),
                user_id: user.user_id,
            })
            .await
            .unwrap();
        let package = project_service
            .add_package(
                project.project_id,
                crate::models::packages::PackageOption {
                    title: "Early bird".to_string(),
                    price: 50.0,
                    description: "Cheap tier".to_string(),
                    reward: "One watch".to_string(),
                },
            )
            .await
            .unwrap();

        project_service.pledge(package.package_id, user.user_id).await.unwrap();

        // 用户行 + 支持者关系行
        let affected = user_service.delete_user_by_id(user.user_id).await.unwrap();
        assert_eq!(affected, 2);

        let err = user_service.get_user_by_id(user.user_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
