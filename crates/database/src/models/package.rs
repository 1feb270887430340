//! 套餐数据库模型

/// 回报套餐信息结构体
///
/// 每个套餐只属于一个项目
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PackageRecord {
    pub package_id: i32,
    pub project_id: i32,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub reward: String,
}

/// 套餐创建参数
#[derive(Debug, Clone)]
pub struct PackageCreate {
    pub project_id: i32,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub reward: String,
}
