//! Screen Position Service binary

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use common::service_bootstrap::print_startup_banner;
use common::wait_for_shutdown;
use screensrv::{
    api::create_routes,
    bootstrap::{self, Args},
    service::supervise,
    transport::SerialLink,
    AppContext, LinkConfig, ScreenSrvError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let service_info = bootstrap::service_info();

    args.initialize_logging(&service_info)?;
    print_startup_banner(&service_info);

    let config = LinkConfig::load_or_create(&args.config)?;
    info!(
        "Loaded {}: port search '{}', range {}..{}",
        args.config.display(),
        config.port_search_attribute,
        config.min_position,
        config.max_position
    );

    let bind_addr = args.bind_addr()?;
    let settings = args.link_settings();
    let ctx = AppContext::new();

    let serial_config = settings.serial_config();
    let link_task = tokio::spawn(supervise(
        move || SerialLink::new(serial_config.clone()),
        config,
        settings,
        ctx.clone(),
    ));

    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| ScreenSrvError::api(format!("Failed to bind {}: {}", bind_addr, e)))?;
    info!("API server listening on http://{}", bind_addr);

    axum::serve(listener, create_routes(ctx))
        .with_graceful_shutdown(async {
            let signal = wait_for_shutdown().await;
            info!("Received {}, shutting down", signal);
        })
        .await?;

    link_task.abort();
    info!("Service shutdown complete");
    Ok(())
}
