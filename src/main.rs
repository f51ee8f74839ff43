use std::sync::Arc;
use std::time::Duration;

use dope_daily::{
    app::showcase::LoggingCartHandler,
    config::load_config,
    create_router,
    infrastructure::{catalog::load_catalog_file, logger::Logger},
    AppState, ShowcaseService,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_path) = load_config()?;
    config.validate()?;

    Logger::init(&config.logging.level)?;
    match &config_path {
        Some(path) => info!(path = %path.display(), "从配置文件加载"),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let showcase_service = ShowcaseService::new(config.showcase.clone())
        .with_cart_handler(Arc::new(LoggingCartHandler));

    // 目录快照加载失败时面板回退到内置示例
    if let Some(path) = &config.showcase.catalog_path {
        match load_catalog_file(path).await {
            Ok(products) => {
                if let Err(e) = showcase_service.replace_catalog(products) {
                    warn!(path = %path.display(), error = %e, "目录快照无效");
                }
            }
            Err(e) => warn!(path = %path.display(), error = %e, "目录快照加载失败"),
        }
    }

    let app = create_router(AppState { showcase_service })
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.http.timeout_seconds,
        )))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let address = config.listen_address();
    let listener = TcpListener::bind(&address).await?;

    info!("🚀 每日精选服务运行在 http://{}", address);
    info!("📖 API 端点:");
    info!("   GET    /health                          - 健康检查");
    info!("   GET    /showcase                        - 当前每日精选面板");
    info!("   GET    /catalog                         - 当前目录");
    info!("   PUT    /catalog                         - 替换目录");
    info!("   DELETE /catalog                         - 清空目录");
    info!("   GET    /showcase/products/:id/view      - 跳转商品详情");
    info!("   POST   /showcase/products/:id/cart      - 加入购物车");

    axum::serve(listener, app).await?;

    Ok(())
}
