//! 项目相关接口
//!

use crate::models::common::{AffectedRows, Reply, ReplyList};
use crate::models::err::AppError;
use crate::models::packages::{PackageOption, PackageView};
use crate::models::pledges::{PledgeOption, PledgeReceipt};
use crate::models::projects::{ProgressInfo, ProjectInfo, ProjectOption, ProjectUpdateOption};
use crate::services::{ProjectServiceTrait, UserServiceTrait};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

/// 获取全部项目列表
///
/// 每个项目都带上其回报套餐列表。没有分页，调用方拿到全量数据。
///
/// ## 返回值
///
/// 返回值的类型是 [`Result<Json<ReplyList<ProjectInfo>>, AppError>`]：
///
/// 1. [`Json`] 会对内部类型进行json序列化，保证返回的数据是一个合法的json字符串
/// 2. [`ReplyList`] 是我们封装的一个类型，表明结果是一个通用的`api-json`格式列表对象
/// 3. [`ProjectInfo`] 是实际的业务返回对象
/// 4. [`AppError`] 是错误时返回的Error类型，会根据错误分类转换为相应的http错误码
#[utoipa::path(get,
    path = "/projects",
    tag = "projects",
    responses(
        (status = 200, description = "All projects with their packages", body = ReplyList<ProjectInfo>)
    ),
)]
pub async fn list_projects<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
) -> Result<Json<ReplyList<ProjectInfo>>, AppError> {
    let projects = state.project_service.get_projects().await?;

    let data: Vec<ProjectInfo> = projects.into_iter().map(Into::into).collect();
    Ok(Json(ReplyList {
        total: data.len() as u32,
        data,
    }))
}

/// 创建项目
///
/// 根据用户输入参数创建项目信息。
/// 标题唯一性、目标金额、截止时间的校验由服务层完成。
#[utoipa::path(post,
    path = "/projects",
    tag = "projects",
    request_body = ProjectOption,
    responses(
        (status = 200, description = "Create project result", body = Reply<ProjectInfo>),
        (status = 409, description = "Project title already exists")
    )
)]
pub async fn create_project<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
    Json(project): Json<ProjectOption>,
) -> Result<Json<Reply<ProjectInfo>>, AppError> {
    debug!("Creating project {:#?}", project);

    let project = state.project_service.create_project(project).await?;
    Ok(Json(Reply { data: project.into() }))
}

/// 查询指定项目信息
#[utoipa::path(get, path = "/projects/{id}", tag = "projects")]
pub async fn get_project<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
    Path(project_id): Path<i32>,
) -> Result<Json<ProjectInfo>, AppError> {
    debug!("Getting project id {:#?}", project_id);

    let project = state.project_service.get_project_by_id(project_id).await?;
    Ok(Json(project.into()))
}

/// 更新项目信息
///
/// 根据用户指定的 `id` 和修改信息 [`ProjectUpdateOption`] 来更新项目信息，
/// 只覆盖提供了的字段。
#[utoipa::path(patch, path = "/projects/{id}", tag = "projects")]
pub async fn update_project<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
    Path(project_id): Path<i32>,
    Json(info): Json<ProjectUpdateOption>,
) -> Result<Json<ProjectInfo>, AppError> {
    debug!("Updating project {} with {:#?}", project_id, info);

    let project = state.project_service.update_project_by_id(project_id, info).await?;
    Ok(Json(project.into()))
}

/// 删除指定的项目
#[utoipa::path(delete, path = "/projects/{id}", tag = "projects")]
pub async fn delete_project<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
    Path(project_id): Path<i32>,
) -> Result<Json<Reply<AffectedRows>>, AppError> {
    debug!("delete project {:#?}", project_id);

    let affected = state.project_service.delete_project_by_id(project_id).await?;
    Ok(Json(Reply {
        data: AffectedRows { affected },
    }))
}

/// 趋势项目
///
/// 返回至多2个项目。选取方式是按存储顺序扫描、
/// 已筹金额追平或超过运行最大值的项目入选后反转截断，
/// 不是按金额排序的top-2。
#[utoipa::path(get,
    path = "/projects/trending",
    tag = "projects",
    responses(
        (status = 200, description = "Up to two trending projects", body = ReplyList<ProjectInfo>)
    ),
)]
pub async fn trending_projects<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
) -> Result<Json<ReplyList<ProjectInfo>>, AppError> {
    let projects = state.project_service.trending_projects().await?;

    let data: Vec<ProjectInfo> = projects.into_iter().map(Into::into).collect();
    Ok(Json(ReplyList {
        total: data.len() as u32,
        data,
    }))
}

/// 查询项目筹款进度
#[utoipa::path(get, path = "/projects/{id}/progress", tag = "projects")]
pub async fn get_project_progress<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
    Path(project_id): Path<i32>,
) -> Result<Json<ProgressInfo>, AppError> {
    let progress = state.project_service.current_progress(project_id).await?;
    Ok(Json(ProgressInfo { project_id, progress }))
}

/// 查询项目的全部回报套餐
#[utoipa::path(get, path = "/projects/{id}/packages", tag = "projects")]
pub async fn list_project_packages<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
    Path(project_id): Path<i32>,
) -> Result<Json<ReplyList<PackageView>>, AppError> {
    let packages = state.project_service.get_packages_by_id(project_id).await?;

    let data: Vec<PackageView> = packages.into_iter().map(Into::into).collect();
    Ok(Json(ReplyList {
        total: data.len() as u32,
        data,
    }))
}

/// 为项目新增回报套餐
#[utoipa::path(post,
    path = "/projects/{id}/packages",
    tag = "projects",
    request_body = PackageOption,
)]
pub async fn add_project_package<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
    Path(project_id): Path<i32>,
    Json(package): Json<PackageOption>,
) -> Result<Json<Reply<PackageView>>, AppError> {
    debug!("Adding package to project {}: {:#?}", project_id, package);

    let package = state.project_service.add_package(project_id, package).await?;
    Ok(Json(Reply { data: package.into() }))
}

/// 项目是否已配置回报套餐
#[utoipa::path(get, path = "/projects/{id}/has-packages", tag = "projects")]
pub async fn project_has_packages<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
    Path(project_id): Path<i32>,
) -> Result<Json<Reply<bool>>, AppError> {
    let has_packages = state.project_service.has_packages(project_id).await?;
    Ok(Json(Reply { data: has_packages }))
}

/// 认购：用户购买某个回报套餐
///
/// 项目已筹金额每次都增加套餐价格；支持者关系每对
/// (项目, 用户) 至多登记一次。
#[utoipa::path(post,
    path = "/pledges",
    tag = "pledges",
    request_body = PledgeOption,
    responses(
        (status = 200, description = "Pledge result", body = Reply<PledgeReceipt>)
    )
)]
pub async fn create_pledge<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
    Json(pledge): Json<PledgeOption>,
) -> Result<Json<Reply<PledgeReceipt>>, AppError> {
    debug!("Creating pledge {:#?}", pledge);

    let receipt = state.project_service.pledge(pledge.package_id, pledge.user_id).await?;
    Ok(Json(Reply { data: receipt.into() }))
}
