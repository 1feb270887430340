//! 项目服务
//!
//! 众筹业务的核心逻辑：创建校验、筹款入账、支持者登记和趋势计算

use crate::models::packages::PackageOption;
use crate::models::projects::{ProjectOption, ProjectUpdateOption};
use crate::services::traits::{ProjectServiceTrait, UserServiceTrait};
use crate::services::{ServiceError, ServiceResult};
use chrono::Utc;
use database::{
    PackageCreate, PackageRecord, PackageRepositoryTrait, PledgeRecord, ProjectCreate, ProjectRecord,
    ProjectRepositoryTrait, ProjectUpdate, ProjectWithPackages,
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ProjectService<PR, KR, US>
where
    PR: ProjectRepositoryTrait,
    KR: PackageRepositoryTrait,
    US: UserServiceTrait,
{
    project_repository: PR,
    package_repository: KR,
    user_service: US,
}

impl<PR, KR, US> ProjectService<PR, KR, US>
where
    PR: ProjectRepositoryTrait,
    KR: PackageRepositoryTrait,
    US: UserServiceTrait,
{
    pub fn new(project_repository: PR, package_repository: KR, user_service: US) -> Self {
        Self {
            project_repository,
            package_repository,
            user_service,
        }
    }

    /// ID合法性检查，负数一律拒绝
    fn ensure_valid_id(id: i32) -> ServiceResult<()> {
        if id < 0 {
            return Err(ServiceError::InvalidId(id));
        }
        Ok(())
    }

    /// 按ID加载项目，未命中上报 [`ServiceError::NotFound`]
    async fn load_project(&self, id: i32) -> ServiceResult<ProjectRecord> {
        self.project_repository
            .get_project_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("项目 {id}")))
    }
}

#[async_trait::async_trait]
impl<PR, KR, US> ProjectServiceTrait for ProjectService<PR, KR, US>
where
    PR: ProjectRepositoryTrait,
    KR: PackageRepositoryTrait,
    US: UserServiceTrait,
{
    /// 创建新项目
    ///
    /// 校验顺序：必填字段 → 标题唯一性。
    /// 已筹金额固定从0开始，创建时间取当前时间。
    async fn create_project(&self, options: ProjectOption) -> ServiceResult<ProjectRecord> {
        if options.title.is_empty() {
            return Err(ServiceError::Validation("必须填写项目标题".to_string()));
        }
        if options.required_funds <= 0.0 {
            return Err(ServiceError::Validation("目标金额必须为正数".to_string()));
        }
        let Some(deadline) = options.deadline else {
            return Err(ServiceError::Validation("必须填写项目截止时间".to_string()));
        };

        // 标题唯一性检查（区分大小写的精确匹配）
        if self.project_repository.find_project_by_title(&options.title).await?.is_some() {
            return Err(ServiceError::DuplicateTitle(options.title));
        }

        let project = self
            .project_repository
            .create_project(ProjectCreate {
                title: options.title,
                description: options.description,
                category: options.category,
                country: options.country,
                file_name: options.file_name,
                required_funds: options.required_funds,
                created_date: Utc::now(),
                deadline,
                user_id: options.user_id,
            })
            .await?;

        info!("🚀 项目创建成功: {} ({})", project.title, project.project_id);
        Ok(project)
    }

    async fn get_project_by_id(&self, id: i32) -> ServiceResult<ProjectWithPackages> {
        Self::ensure_valid_id(id)?;

        let project = self.load_project(id).await?;
        let packages = self.package_repository.list_packages_by_project(id).await?;
        Ok(ProjectWithPackages { project, packages })
    }

    async fn get_projects(&self) -> ServiceResult<Vec<ProjectWithPackages>> {
        Ok(self.project_repository.list_projects().await?)
    }

    async fn update_project_by_id(&self, id: i32, options: ProjectUpdateOption) -> ServiceResult<ProjectRecord> {
        Self::ensure_valid_id(id)?;

        self.project_repository
            .update_project(
                id,
                ProjectUpdate {
                    title: options.title,
                    description: options.description,
                    category: options.category,
                    country: options.country,
                    required_funds: options.required_funds,
                    current_funds: options.current_funds,
                    created_date: options.created_date,
                    deadline: options.deadline,
                },
            )
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("项目 {id}")))
    }

    async fn delete_project_by_id(&self, id: i32) -> ServiceResult<u64> {
        Self::ensure_valid_id(id)?;
        let project = self.load_project(id).await?;

        let affected = self.project_repository.delete_project(project.project_id).await?;
        info!("🗑️ 项目 {} 已删除，受影响行数: {}", id, affected);
        Ok(affected)
    }

    /// 计算筹款进度百分比
    ///
    /// 进度基于存储中的最新数据计算。目标金额在创建时保证为正，
    /// 但更新接口可能把它改成0，这里把这种情况当作数据状态异常上报，
    /// 不产出无穷大。
    async fn current_progress(&self, id: i32) -> ServiceResult<f64> {
        Self::ensure_valid_id(id)?;
        let project = self.load_project(id).await?;

        if project.required_funds <= 0.0 {
            return Err(ServiceError::InconsistentState(format!("项目 {id} 的目标金额不是正数")));
        }

        Ok(project.current_funds / project.required_funds * 100.0)
    }

    async fn get_packages_by_id(&self, id: i32) -> ServiceResult<Vec<PackageRecord>> {
        Self::ensure_valid_id(id)?;
        let project = self.load_project(id).await?;

        Ok(self.package_repository.list_packages_by_project(project.project_id).await?)
    }

    /// 为项目新增回报套餐
    async fn add_package(&self, project_id: i32, options: PackageOption) -> ServiceResult<PackageRecord> {
        Self::ensure_valid_id(project_id)?;
        let project = self.load_project(project_id).await?;

        if options.title.is_empty() {
            return Err(ServiceError::Validation("必须填写套餐标题".to_string()));
        }
        if options.price <= 0.0 {
            return Err(ServiceError::Validation("套餐价格必须为正数".to_string()));
        }

        let package = self
            .package_repository
            .create_package(PackageCreate {
                project_id: project.project_id,
                title: options.title,
                price: options.price,
                description: options.description,
                reward: options.reward,
            })
            .await?;

        Ok(package)
    }

    /// 项目是否已配置回报套餐
    async fn has_packages(&self, id: i32) -> ServiceResult<bool> {
        Self::ensure_valid_id(id)?;
        let project = self.load_project(id).await?;

        let packages = self.package_repository.list_packages_by_project(project.project_id).await?;
        Ok(!packages.is_empty())
    }

    /// 认购流程
    ///
    /// 1. 套餐必须存在，其指向的项目必须存在——断链按数据状态异常上报
    /// 2. 用户必须存在
    /// 3. 加款和支持者登记交给存储层在单个事务里完成：
    ///    金额每次累加，支持者关系每对至多一行
    async fn pledge(&self, package_id: i32, user_id: i32) -> ServiceResult<PledgeRecord> {
        let package = self
            .package_repository
            .get_package_by_id(package_id)
            .await?
            .ok_or_else(|| ServiceError::InconsistentState(format!("套餐 {package_id} 不存在")))?;

        let project = self
            .project_repository
            .get_project_by_id(package.project_id)
            .await?
            .ok_or_else(|| {
                ServiceError::InconsistentState(format!("套餐 {} 指向不存在的项目 {}", package.package_id, package.project_id))
            })?;

        let user = self.user_service.get_user_by_id(user_id).await?;

        let receipt = self
            .project_repository
            .record_pledge(project.project_id, user.user_id, package.price)
            .await?;

        info!(
            "💰 用户 {} 认购项目 {} 套餐 {}，当前已筹: {}",
            user.user_id, project.project_id, package.package_id, receipt.current_funds
        );
        Ok(receipt)
    }

    /// 趋势项目
    ///
    /// 按存储顺序扫描：已筹金额不低于运行最大值的项目依次入选，
    /// 随后整体反转并截断为至多2个。入选集合偏向靠后出现、
    /// 金额追平或超过此前所有项目的条目，和按金额排序的top-2不同。
    async fn trending_projects(&self) -> ServiceResult<Vec<ProjectWithPackages>> {
        let projects = self.project_repository.list_projects().await?;

        let mut max = 0.0_f64;
        let mut selected: Vec<ProjectWithPackages> = Vec::new();
        for item in projects {
            if item.project.current_funds >= max {
                max = item.project.current_funds;
                selected.push(item);
            }
        }

        selected.reverse();
        selected.truncate(2);
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::UserOption;
    use crate::services::user::UserService;
    use database::{InMemoryPackageRepository, InMemoryProjectRepository, InMemoryStore, InMemoryUserRepository};

    type TestProjectService =
        ProjectService<InMemoryProjectRepository, InMemoryPackageRepository, UserService<InMemoryUserRepository>>;

    fn build_services() -> (UserService<InMemoryUserRepository>, TestProjectService) {
        let store = InMemoryStore::new();
        let user_repo = InMemoryUserRepository::new(store.clone());
        let user_service = UserService::new(user_repo.clone());
        let project_service = ProjectService::new(
            InMemoryProjectRepository::new(store.clone()),
            InMemoryPackageRepository::new(store),
            UserService::new(user_repo),
        );
        (user_service, project_service)
    }

    fn project_option(title: &str) -> ProjectOption {
        ProjectOption {
            title: title.to_string(),
            description: "A crowdfunding project".to_string(),
            category: "Tech".to_string(),
            country: "GR".to_string(),
            file_name: "cover.png".to_string(),
            required_funds: 1000.0,
            deadline: Some(Utc::now() + chrono::Duration::days(30)),
            user_id: 1,
        }
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

    fn package_option(title: &str, price: f64) -> PackageOption {
        PackageOption {
            title: title.to_string(),
            price,
            description: "A reward tier".to_string(),
            reward: "One unit".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_project_defaults_and_round_trip() {
        let (_, service) = build_services();
        let before = Utc::now();

        let created = service.create_project(project_option("Smart Watch")).await.unwrap();

        // 新项目从0开始，创建时间由服务端生成
        assert_eq!(created.current_funds, 0.0);
        assert!(created.created_date >= before);
        assert!(created.created_date <= Utc::now());

        // 创建后立刻可读
        let fetched = service.get_project_by_id(created.project_id).await.unwrap();
        assert_eq!(fetched.project.title, "Smart Watch");
        assert_eq!(fetched.project.required_funds, 1000.0);
        assert!(fetched.packages.is_empty());
    }

    #[tokio::test]
    async fn test_create_project_rejects_duplicate_title() {
        let (_, service) = build_services();
        service.create_project(project_option("Smart Watch")).await.unwrap();

        let err = service.create_project(project_option("Smart Watch")).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateTitle(title) if title == "Smart Watch"));
    }

    #[tokio::test]
    async fn test_create_project_validation() {
        let (_, service) = build_services();

        // 标题必填
        assert!(matches!(
            service.create_project(project_option("")).await.unwrap_err(),
            ServiceError::Validation(_)
        ));

        // 目标金额必须为正数
        let mut zero_funds = project_option("Zero");
        zero_funds.required_funds = 0.0;
        assert!(matches!(
            service.create_project(zero_funds).await.unwrap_err(),
            ServiceError::Validation(_)
        ));

        let mut negative_funds = project_option("Negative");
        negative_funds.required_funds = -5.0;
        assert!(matches!(
            service.create_project(negative_funds).await.unwrap_err(),
            ServiceError::Validation(_)
        ));

        // 截止时间必填
        let mut no_deadline = project_option("NoDeadline");
        no_deadline.deadline = None;
        assert!(matches!(
            service.create_project(no_deadline).await.unwrap_err(),
            ServiceError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_get_project_by_id_guards() {
        let (_, service) = build_services();

        assert!(matches!(
            service.get_project_by_id(-1).await.unwrap_err(),
            ServiceError::InvalidId(-1)
        ));
        assert!(matches!(
            service.get_project_by_id(42).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_current_progress_exact_percentage() {
        let (_, service) = build_services();
        let created = service.create_project(project_option("Smart Watch")).await.unwrap();

        service
            .update_project_by_id(
                created.project_id,
                ProjectUpdateOption {
                    current_funds: Some(250.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let progress = service.current_progress(created.project_id).await.unwrap();
        assert_eq!(progress, 25.0);
    }

    #[tokio::test]
    async fn test_current_progress_rejects_zero_required_funds() {
        let (_, service) = build_services();
        let created = service.create_project(project_option("Smart Watch")).await.unwrap();

        // 更新接口可以把目标金额改成0，进度计算要把它当作异常上报
        service
            .update_project_by_id(
                created.project_id,
                ProjectUpdateOption {
                    required_funds: Some(0.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = service.current_progress(created.project_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InconsistentState(_)));
    }

    #[tokio::test]
    async fn test_update_project_overwrites_provided_fields() {
        let (_, service) = build_services();
        let created = service.create_project(project_option("Smart Watch")).await.unwrap();

        let updated = service
            .update_project_by_id(
                created.project_id,
                ProjectUpdateOption {
                    title: Some("Smarter Watch".to_string()),
                    required_funds: Some(2000.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Smarter Watch");
        assert_eq!(updated.required_funds, 2000.0);
        // 未提供的字段保持原值
        assert_eq!(updated.country, "GR");
        assert_eq!(updated.current_funds, 0.0);
    }

    #[tokio::test]
    async fn test_delete_project_guards_and_cascade() {
        let (user_service, service) = build_services();

        assert!(matches!(
            service.delete_project_by_id(-3).await.unwrap_err(),
            ServiceError::InvalidId(-3)
        ));
        assert!(matches!(
            service.delete_project_by_id(42).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));

        // 项目行 + 套餐行 + 支持者关系行都要被删掉
        let user = user_service.create_user(user_option("backer")).await.unwrap();
        let project = service.create_project(project_option("Smart Watch")).await.unwrap();
        let package = service
            .add_package(project.project_id, package_option("Early bird", 50.0))
            .await
            .unwrap();
        service.pledge(package.package_id, user.user_id).await.unwrap();

        let affected = service.delete_project_by_id(project.project_id).await.unwrap();
        assert_eq!(affected, 3);

        assert!(matches!(
            service.get_project_by_id(project.project_id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_packages_listing_and_probe() {
        let (_, service) = build_services();
        let project = service.create_project(project_option("Smart Watch")).await.unwrap();

        assert!(!service.has_packages(project.project_id).await.unwrap());
        assert!(service.get_packages_by_id(project.project_id).await.unwrap().is_empty());

        let package = service
            .add_package(project.project_id, package_option("Early bird", 50.0))
            .await
            .unwrap();

        assert!(service.has_packages(project.project_id).await.unwrap());

        let packages = service.get_packages_by_id(project.project_id).await.unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].package_id, package.package_id);
        assert_eq!(packages[0].project_id, project.project_id);
        assert_eq!(packages[0].price, 50.0);

        // 套餐接口对项目本身的校验
        assert!(matches!(
            service.get_packages_by_id(42).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            service.has_packages(-1).await.unwrap_err(),
            ServiceError::InvalidId(-1)
        ));
    }

    #[tokio::test]
    async fn test_add_package_validation() {
        let (_, service) = build_services();
        let project = service.create_project(project_option("Smart Watch")).await.unwrap();

        assert!(matches!(
            service.add_package(project.project_id, package_option("", 50.0)).await.unwrap_err(),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            service
                .add_package(project.project_id, package_option("Free tier", 0.0))
                .await
                .unwrap_err(),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            service.add_package(42, package_option("Early bird", 50.0)).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_pledge_accumulates_funds_and_dedupes_backer() {
        let (user_service, service) = build_services();
        let user = user_service.create_user(user_option("backer")).await.unwrap();
        let project = service.create_project(project_option("Smart Watch")).await.unwrap();
        let package = service
            .add_package(project.project_id, package_option("Early bird", 50.0))
            .await
            .unwrap();

        // 第一次认购：加款并登记支持者
        let first = service.pledge(package.package_id, user.user_id).await.unwrap();
        assert_eq!(first.current_funds, 50.0);
        assert!(first.backer_added);

        // 第二次认购：金额继续累加，支持者关系不再重复登记
        let second = service.pledge(package.package_id, user.user_id).await.unwrap();
        assert_eq!(second.current_funds, 100.0);
        assert!(!second.backer_added);

        let fetched = user_service.get_user_by_id(user.user_id).await.unwrap();
        assert_eq!(fetched.backed_projects.len(), 1);
        assert_eq!(fetched.backed_projects[0].project_key, project.project_id);
    }

    #[tokio::test]
    async fn test_pledge_guards() {
        let (user_service, service) = build_services();
        let user = user_service.create_user(user_option("backer")).await.unwrap();

        // 套餐不存在是数据断链
        assert!(matches!(
            service.pledge(42, user.user_id).await.unwrap_err(),
            ServiceError::InconsistentState(_)
        ));

        // 用户不存在是普通的未命中
        let project = service.create_project(project_option("Smart Watch")).await.unwrap();
        let package = service
            .add_package(project.project_id, package_option("Early bird", 50.0))
            .await
            .unwrap();
        assert!(matches!(
            service.pledge(package.package_id, 42).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_trending_scan_algorithm() {
        let (_, service) = build_services();

        // 按存储顺序铺4个项目，已筹金额依次为 10, 5, 20, 20
        let mut ids = Vec::new();
        for (i, funds) in [10.0, 5.0, 20.0, 20.0].iter().enumerate() {
            let project = service.create_project(project_option(&format!("Project {i}"))).await.unwrap();
            service
                .update_project_by_id(
                    project.project_id,
                    ProjectUpdateOption {
                        current_funds: Some(*funds),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            ids.push(project.project_id);
        }

        // 扫描依次选中 10, 20, 20（5低于运行最大值被跳过），
        // 反转后截断，留下第4个和第3个项目
        let trending = service.trending_projects().await.unwrap();
        assert_eq!(trending.len(), 2);
        assert_eq!(trending[0].project.project_id, ids[3]);
        assert_eq!(trending[1].project.project_id, ids[2]);
        assert_eq!(trending[0].project.current_funds, 20.0);
        assert_eq!(trending[1].project.current_funds, 20.0);
    }

    #[tokio::test]
    async fn test_trending_includes_zero_funds_projects() {
        let (_, service) = build_services();

        // 运行最大值从0开始，所以已筹为0的项目也会被选中
        let first = service.create_project(project_option("First")).await.unwrap();
        let second = service.create_project(project_option("Second")).await.unwrap();

        let trending = service.trending_projects().await.unwrap();
        assert_eq!(trending.len(), 2);
        // 反转后靠后创建的项目排在前面
        assert_eq!(trending[0].project.project_id, second.project_id);
        assert_eq!(trending[1].project.project_id, first.project_id);
    }

    #[tokio::test]
    async fn test_trending_empty_store() {
        let (_, service) = build_services();
        assert!(service.trending_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_projects_eagerly_loads_packages() {
        let (_, service) = build_services();
        let project = service.create_project(project_option("Smart Watch")).await.unwrap();
        service
            .add_package(project.project_id, package_option("Early bird", 50.0))
            .await
            .unwrap();
        service
            .add_package(project.project_id, package_option("Deluxe", 120.0))
            .await
            .unwrap();

        let projects = service.get_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].packages.len(), 2);
    }
}
