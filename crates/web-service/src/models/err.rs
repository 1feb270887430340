use crate::services::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::DatabaseError;
use thiserror::Error;
use validator::ValidationErrors;

/// 使用 [`thiserror`] 定义错误类型
/// 方便根据类型转换为相应的http错误码
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据验证错误，这种错误通常都是用户参数不正确导致的
    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    /// 服务层业务错误
    #[error(transparent)]
    ServiceError(#[from] ServiceError),
}

/// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::ValidationFailed(err) => (StatusCode::BAD_REQUEST, format!("Validate failed: {err}")).into_response(),
            AppError::ServiceError(err) => match err {
                ServiceError::Validation(msg) => (StatusCode::BAD_REQUEST, format!("Validation error: {msg}")).into_response(),
                ServiceError::InvalidId(id) => (StatusCode::BAD_REQUEST, format!("Invalid id: {id}")).into_response(),
                ServiceError::DuplicateTitle(title) => {
                    (StatusCode::CONFLICT, format!("Project title already exists: {title}")).into_response()
                }
                ServiceError::NotFound(what) => (StatusCode::NOT_FOUND, format!("Resource not found: {what}")).into_response(),
                ServiceError::InconsistentState(what) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, format!("Inconsistent state: {what}")).into_response()
                }
                ServiceError::Credential(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Credential error: {e}")).into_response(),
                ServiceError::Database(DatabaseError::NotFound(msg)) => {
                    (StatusCode::NOT_FOUND, format!("Record not found: {msg}")).into_response()
                }
                ServiceError::Database(DatabaseError::SqlxError(sqlx::Error::RowNotFound)) => {
                    (StatusCode::NOT_FOUND, "Record not found".to_string()).into_response()
                }
                ServiceError::Database(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {e}")).into_response(),
            },
        }
    }
}
