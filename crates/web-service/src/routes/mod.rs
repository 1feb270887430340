//! 路由入口
//!
//! 提供 [`create_app_router`] 函数，导出当前App的所有路由。
//!
//! 用户可以在导出路由时传入共享数据 shared_state，这样所有路由函数都可以访问。

use crate::routes::projects::__path_add_project_package;
use crate::routes::projects::__path_create_pledge;
use crate::routes::projects::__path_create_project;
use crate::routes::projects::__path_delete_project;
use crate::routes::projects::__path_get_project;
use crate::routes::projects::__path_get_project_progress;
use crate::routes::projects::__path_list_project_packages;
use crate::routes::projects::__path_list_projects;
use crate::routes::projects::__path_project_has_packages;
use crate::routes::projects::__path_trending_projects;
use crate::routes::projects::__path_update_project;
use crate::routes::projects::{
    add_project_package, create_pledge, create_project, delete_project, get_project, get_project_progress,
    list_project_packages, list_projects, project_has_packages, trending_projects, update_project,
};
use crate::routes::users::__path_create_user;
use crate::routes::users::__path_delete_user;
use crate::routes::users::__path_get_user;
use crate::routes::users::__path_list_users;
use crate::routes::users::__path_update_user;
use crate::routes::users::{create_user, delete_user, get_user, list_users, update_user};
use crate::services::{ProjectServiceTrait, UserServiceTrait};
use crate::AppState;
use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_scalar::{Scalar, Servable};

pub mod projects;
pub mod users;

/// 导出当前App的所有路由
///
/// ## 参数定义
/// - state: 共享数据，参考 [`AppState`] 定义。存放服务层实例之类的全局共享数据。
///
/// ## **❗️注意事项：**
///
/// 由于 [`routes!`] 宏限制，同一个宏调用只放同一个path下的接口，
/// 且不能同时定义多个相同类型的http接口，否则会导致Panic。
/// 因此这里按path拆成多次调用。
fn routers<US: UserServiceTrait, PS: ProjectServiceTrait>(state: AppState<US, PS>) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_projects, create_project))
        .routes(routes!(get_project, update_project, delete_project))
        .routes(routes!(trending_projects))
        .routes(routes!(get_project_progress))
        .routes(routes!(list_project_packages, add_project_package))
        .routes(routes!(project_has_packages))
        .routes(routes!(create_pledge))
        .routes(routes!(list_users, create_user))
        .routes(routes!(get_user, update_user, delete_user))
        .with_state(state)
}

/// 创建当前App的路由
///
/// 完成以下功能：
/// - 生成OpenAPI文档
/// - 生成App路由
/// - 使用Scalar作为最终在线文档格式
///
/// 由于使用了 `utoipa` 库来自动化生成`openapi`文档，因此我们没有使用原生的 [`Router`]，而是使用了
/// [`OpenApiRouter`] 。
pub fn create_app_router<US: UserServiceTrait, PS: ProjectServiceTrait>(shared_state: AppState<US, PS>) -> Router {
    // 当前项目的OpenAPI声明
    #[derive(OpenApi)]
    #[openapi(
        tags(
            (name = "crowdfund-backend", description = r#"
众筹平台后端，覆盖场景：

- 用户注册与管理
- 众筹项目与回报套餐管理
- 认购与趋势项目
- OpenAPI文档
            "#)
        ),
    )]
    struct ApiDoc;

    // 使用`utoipa_axum`提供的OpenApiRouter来创建路由。
    // 同时传递共享状态数据到路由中供使用。
    // 最终拿到的变量：
    // - router: Axum的Router，实际的路由对象
    // - api: utoipa的OpenApi，生成的OpenAPI对象
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/v1", routers(shared_state))
        .split_for_parts();

    // 合并文档路由，用户可通过 /docs 访问文档网页地址
    router.merge(Scalar::with_url("/docs", api))
}
