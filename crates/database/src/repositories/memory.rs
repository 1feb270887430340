//! 内存仓库实现
//!
//! 用一组 `Mutex` 保护的表集合模拟持久层，给测试和本地演示使用，
//! 不需要真实的PostgreSQL。所有仓库共享同一个 [`InMemoryStore`]，
//! 和生产实现共享同一个连接池的方式对应。

use crate::models::backer::BackerRecord;
use crate::models::package::{PackageCreate, PackageRecord};
use crate::models::project::{PledgeRecord, ProjectCreate, ProjectRecord, ProjectUpdate, ProjectWithPackages};
use crate::models::user::{UserCreate, UserRecord, UserUpdate};
use crate::repositories::traits::{PackageRepositoryTrait, ProjectRepositoryTrait, UserRepositoryTrait};
use crate::{DatabaseError, DatabaseResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 内存表集合
#[derive(Debug, Default)]
struct StoreInner {
    users: Vec<UserRecord>,
    projects: Vec<ProjectRecord>,
    packages: Vec<PackageRecord>,
    backers: Vec<BackerRecord>,
    next_user_id: i32,
    next_project_id: i32,
    next_package_id: i32,
}

/// 内存存储
///
/// 各实体仓库通过 `Arc` 共享同一份数据。
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 内存用户仓库
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl UserRepositoryTrait for InMemoryUserRepository {
    async fn create_user(&self, user: UserCreate) -> DatabaseResult<UserRecord> {
        let mut store = self.store.lock();
        store.next_user_id += 1;
        let record = UserRecord {
            user_id: store.next_user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            age: user.age,
            gender: user.gender,
            registration_date: user.registration_date,
            initial_funds: user.initial_funds,
            backed_projects: Vec::new(),
        };
        store.users.push(record.clone());
        Ok(record)
    }

    async fn get_user_by_id(&self, id: i32) -> DatabaseResult<Option<UserRecord>> {
        let store = self.store.lock();
        let Some(user) = store.users.iter().find(|u| u.user_id == id) else {
            return Ok(None);
        };

        let mut user = user.clone();
        user.backed_projects = store.backers.iter().filter(|b| b.user_key == id).cloned().collect();
        Ok(Some(user))
    }

    async fn list_users(&self) -> DatabaseResult<Vec<UserRecord>> {
        Ok(self.store.lock().users.clone())
    }

    async fn update_user(&self, id: i32, update: UserUpdate) -> DatabaseResult<Option<UserRecord>> {
        let mut store = self.store.lock();
        let Some(user) = store.users.iter_mut().find(|u| u.user_id == id) else {
            return Ok(None);
        };

        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(password_hash) = update.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(registration_date) = update.registration_date {
            user.registration_date = registration_date;
        }

        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: i32) -> DatabaseResult<u64> {
        let mut store = self.store.lock();
        let backers_before = store.backers.len();
        store.backers.retain(|b| b.user_key != id);
        let removed_backers = backers_before - store.backers.len();

        let users_before = store.users.len();
        store.users.retain(|u| u.user_id != id);
        let removed_users = users_before - store.users.len();

        Ok((removed_backers + removed_users) as u64)
    }
}

/// 内存项目仓库
#[derive(Debug, Clone)]
pub struct InMemoryProjectRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryProjectRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for InMemoryProjectRepository {
    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectRecord> {
        let mut store = self.store.lock();
        store.next_project_id += 1;
        let record = ProjectRecord {
            project_id: store.next_project_id,
            title: project.title,
            description: project.description,
            category: project.category,
            country: project.country,
            file_name: project.file_name,
            required_funds: project.required_funds,
            current_funds: 0.0,
            created_date: project.created_date,
            deadline: project.deadline,
            user_id: project.user_id,
        };
        store.projects.push(record.clone());
        Ok(record)
    }

    async fn get_project_by_id(&self, id: i32) -> DatabaseResult<Option<ProjectRecord>> {
        Ok(self.store.lock().projects.iter().find(|p| p.project_id == id).cloned())
    }

    async fn find_project_by_title(&self, title: &str) -> DatabaseResult<Option<ProjectRecord>> {
        Ok(self.store.lock().projects.iter().find(|p| p.title == title).cloned())
    }

    async fn list_projects(&self) -> DatabaseResult<Vec<ProjectWithPackages>> {
        let store = self.store.lock();
        let result = store
            .projects
            .iter()
            .map(|project| ProjectWithPackages {
                project: project.clone(),
                packages: store
                    .packages
                    .iter()
                    .filter(|pack| pack.project_id == project.project_id)
                    .cloned()
                    .collect(),
            })
            .collect();
        Ok(result)
    }

    async fn update_project(&self, id: i32, update: ProjectUpdate) -> DatabaseResult<Option<ProjectRecord>> {
        let mut store = self.store.lock();
        let Some(project) = store.projects.iter_mut().find(|p| p.project_id == id) else {
            return Ok(None);
        };

        if let Some(title) = update.title {
            project.title = title;
        }
        if let Some(description) = update.description {
            project.description = description;
        }
        if let Some(category) = update.category {
            project.category = category;
        }
        if let Some(country) = update.country {
            project.country = country;
        }
        if let Some(required_funds) = update.required_funds {
            project.required_funds = required_funds;
        }
        if let Some(current_funds) = update.current_funds {
            project.current_funds = current_funds;
        }
        if let Some(created_date) = update.created_date {
            project.created_date = created_date;
        }
        if let Some(deadline) = update.deadline {
            project.deadline = deadline;
        }

        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: i32) -> DatabaseResult<u64> {
        let mut store = self.store.lock();
        let backers_before = store.backers.len();
        store.backers.retain(|b| b.project_key != id);
        let removed_backers = backers_before - store.backers.len();

        let packages_before = store.packages.len();
        store.packages.retain(|p| p.project_id != id);
        let removed_packages = packages_before - store.packages.len();

        let projects_before = store.projects.len();
        store.projects.retain(|p| p.project_id != id);
        let removed_projects = projects_before - store.projects.len();

        Ok((removed_backers + removed_packages + removed_projects) as u64)
    }

    async fn record_pledge(&self, project_id: i32, user_id: i32, amount: f64) -> DatabaseResult<PledgeRecord> {
        // 整个落账过程持有同一把锁，对应生产实现的单事务
        let mut store = self.store.lock();
        let Some(project) = store.projects.iter_mut().find(|p| p.project_id == project_id) else {
            return Err(DatabaseError::not_found(format!("项目 {project_id} 不存在")));
        };

        project.current_funds += amount;
        let current_funds = project.current_funds;

        let backer_added = !store
            .backers
            .iter()
            .any(|b| b.project_key == project_id && b.user_key == user_id);
        if backer_added {
            store.backers.push(BackerRecord {
                project_key: project_id,
                user_key: user_id,
            });
        }

        Ok(PledgeRecord {
            project_id,
            current_funds,
            backer_added,
        })
    }
}

/// 内存套餐仓库
#[derive(Debug, Clone)]
pub struct InMemoryPackageRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPackageRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl PackageRepositoryTrait for InMemoryPackageRepository {
    async fn create_package(&self, package: PackageCreate) -> DatabaseResult<PackageRecord> {
        let mut store = self.store.lock();
        store.next_package_id += 1;
        let record = PackageRecord {
            package_id: store.next_package_id,
            project_id: package.project_id,
            title: package.title,
            price: package.price,
            description: package.description,
            reward: package.reward,
        };
        store.packages.push(record.clone());
        Ok(record)
    }

    async fn get_package_by_id(&self, id: i32) -> DatabaseResult<Option<PackageRecord>> {
        Ok(self.store.lock().packages.iter().find(|p| p.package_id == id).cloned())
    }

    async fn list_packages_by_project(&self, project_id: i32) -> DatabaseResult<Vec<PackageRecord>> {
        Ok(self
            .store
            .lock()
            .packages
            .iter()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect())
    }
}
