//! 服务层错误类型
//!
//! 所有业务操作都返回带明确错误分类的 [`ServiceResult`]，
//! 不用null/-1/false之类的哨兵值，也不允许未经检查的解引用。

use database::DatabaseError;
use shared_lib::CredentialError;
use thiserror::Error;

/// 服务层错误分类
#[derive(Error, Debug)]
pub enum ServiceError {
    /// 入参校验失败（缺少必填字段、金额非正数、截止时间未填等）
    #[error("参数校验失败: {0}")]
    Validation(String),

    /// 项目标题冲突（区分大小写的精确匹配）
    #[error("项目标题已存在: {0}")]
    DuplicateTitle(String),

    /// ID超出合法范围
    #[error("无效的ID: {0}")]
    InvalidId(i32),

    /// 查询未命中
    #[error("资源不存在: {0}")]
    NotFound(String),

    /// 数据之间出现了不该出现的断链（如套餐指向不存在的项目）
    #[error("数据状态异常: {0}")]
    InconsistentState(String),

    /// 密码散列失败
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// 存储层错误
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// 服务层操作结果类型
pub type ServiceResult<T> = Result<T, ServiceError>;
