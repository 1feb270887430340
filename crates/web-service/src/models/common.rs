use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 封装符合json-api的单个返回对象
///
/// 具体参考：<https://jsonapi.org>
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct Reply<T> {
    pub data: T,
}

/// 封装符合json-api的列表对象
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ReplyList<T> {
    pub data: Vec<T>,

    #[schema(example = 12)]
    /// 列表总数
    pub total: u32,
}

/// 删除类操作的结果
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct AffectedRows {
    /// 受影响的行数
    pub affected: u64,
}
