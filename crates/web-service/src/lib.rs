//! Web服务模块
//!
//! 提供众筹平台的 HTTP API 接口和文档服务

use crate::services::{ProjectService, ProjectServiceTrait, UserService, UserServiceTrait};
use color_eyre::Result;
use database::{PackageRepository, ProjectRepository, UserRepository};
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::info;

pub mod models;
pub mod routes;
pub mod services;

/// 应用共享状态
pub struct AppState<US: UserServiceTrait, PS: ProjectServiceTrait> {
    pub user_service: Arc<US>,
    pub project_service: Arc<PS>,
}

impl<US: UserServiceTrait, PS: ProjectServiceTrait> Clone for AppState<US, PS> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            project_service: Arc::clone(&self.project_service),
        }
    }
}

/// 具体的 AppState 类型别名
pub type ConcreteAppState =
    AppState<UserService<UserRepository>, ProjectService<ProjectRepository, PackageRepository, UserService<UserRepository>>>;

/// 启动 Web 服务
pub async fn start_web_service(pool: Pool<Postgres>, mut shutdown_rx: Receiver<bool>, bind_addr: String) -> Result<()> {
    let user_repository = UserRepository::new(pool.clone());
    let user_service = UserService::new(user_repository.clone());
    let project_service = ProjectService::new(
        ProjectRepository::new(pool.clone()),
        PackageRepository::new(pool.clone()),
        UserService::new(user_repository),
    );

    let shared_state = AppState {
        user_service: Arc::new(user_service),
        project_service: Arc::new(project_service),
    };

    let router = routes::create_app_router(shared_state);

    info!("🚀 启动 Web Service 在 {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
            info!("🛑 Web Service 正在关闭...");
        })
        .await?;

    Ok(())
}
