//! 认购相关的Web模型

use database::PledgeRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 认购入参：用户购买某个回报套餐
#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct PledgeOption {
    pub package_id: i32,
    pub user_id: i32,
}

/// 认购结果
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct PledgeReceipt {
    pub project_id: i32,

    /// 本次入账之后项目的最新已筹金额
    pub current_funds: f64,

    /// 是否新增了支持者关系（同一对项目/用户只记一次）
    pub backer_added: bool,
}

impl From<PledgeRecord> for PledgeReceipt {
    fn from(record: PledgeRecord) -> Self {
        Self {
            project_id: record.project_id,
            current_funds: record.current_funds,
            backer_added: record.backer_added,
        }
    }
}
