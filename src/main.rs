use color_eyre::Result;
use shared_lib::AppConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚀 启动 Crowdfund Backend...");

    let config = AppConfig::load()?;
    let pool = database::initialize_database(config.clone()).await?;

    // ctrl-c 触发优雅关闭
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("❌ 监听关闭信号失败: {}", e);
        }
        let _ = shutdown_tx.send(true);
    });

    web_service::start_web_service(pool, shutdown_rx, config.bind_addr.clone()).await?;

    info!("👋 Crowdfund Backend 已退出");
    Ok(())
}
