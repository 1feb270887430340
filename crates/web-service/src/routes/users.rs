//! 用户相关接口
//!

use crate::models::common::{AffectedRows, Reply, ReplyList};
use crate::models::err::AppError;
use crate::models::users::{UserInfo, UserOption, UserUpdateOption};
use crate::services::{ProjectServiceTrait, UserServiceTrait};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;
use validator::Validate;

/// 获取全部用户列表
///
/// 没有分页，列表场景不加载支持者关系。
#[utoipa::path(get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = ReplyList<UserInfo>)
    ),
)]
pub async fn list_users<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
) -> Result<Json<ReplyList<UserInfo>>, AppError> {
    let users = state.user_service.get_users().await?;

    let data: Vec<UserInfo> = users.into_iter().map(Into::into).collect();
    Ok(Json(ReplyList {
        total: data.len() as u32,
        data,
    }))
}

/// 注册用户
///
/// 入参先经过 [`validator`] 的格式校验（邮箱格式、密码长度等），
/// 密码在服务层散列后落库，返回对象不携带任何密码信息。
#[utoipa::path(post,
    path = "/users",
    tag = "users",
    request_body = UserOption,
    responses(
        (status = 200, description = "Create user result", body = Reply<UserInfo>)
    )
)]
pub async fn create_user<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
    Json(user): Json<UserOption>,
) -> Result<Json<Reply<UserInfo>>, AppError> {
    debug!("Creating user {}", user.username);

    // 验证输入参数，确保有效性
    user.validate()?;

    let user = state.user_service.create_user(user).await?;
    Ok(Json(Reply { data: user.into() }))
}

/// 查询指定用户信息
#[utoipa::path(get, path = "/users/{id}", tag = "users")]
pub async fn get_user<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserInfo>, AppError> {
    debug!("Getting user id {:#?}", user_id);

    let user = state.user_service.get_user_by_id(user_id).await?;
    Ok(Json(user.into()))
}

/// 更新用户信息
///
/// 只覆盖提供了的字段，提供了新密码时重新散列。
#[utoipa::path(patch, path = "/users/{id}", tag = "users")]
pub async fn update_user<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
    Path(user_id): Path<i32>,
    Json(info): Json<UserUpdateOption>,
) -> Result<Json<UserInfo>, AppError> {
    debug!("Updating user {} ", user_id);

    let user = state.user_service.update_user_by_id(user_id, info).await?;
    Ok(Json(user.into()))
}

/// 删除指定的用户
#[utoipa::path(delete, path = "/users/{id}", tag = "users")]
pub async fn delete_user<US: UserServiceTrait, PS: ProjectServiceTrait>(
    State(state): State<AppState<US, PS>>,
    Path(user_id): Path<i32>,
) -> Result<Json<Reply<AffectedRows>>, AppError> {
    debug!("delete user {:#?}", user_id);

    let affected = state.user_service.delete_user_by_id(user_id).await?;
    Ok(Json(Reply {
        data: AffectedRows { affected },
    }))
}
