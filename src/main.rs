use venue_server::{Config, Server, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境变量 (.env 可选)
    dotenv::dotenv().ok();

    // 2. 加载配置
    let config = Config::from_env();

    // 3. 日志: 生产环境写入工作目录下按天滚动的文件，其余输出控制台
    let log_dir = format!("{}/logs", config.work_dir);
    if config.is_production() {
        std::fs::create_dir_all(&log_dir)?;
        init_logger_with_file(None, Some(&log_dir));
    } else {
        init_logger_with_file(None, None);
    }

    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        "Venue server starting..."
    );

    // 4. 启动 HTTP 服务器
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
