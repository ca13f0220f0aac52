use std::net::SocketAddr;
use time_budget::{load_layout, resolve_layout_path, resolve_policy, resolve_port, router, AppState};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let layout_path = resolve_layout_path();
    let layout = load_layout(layout_path.as_deref()).await;
    let policy = resolve_policy();
    info!(
        categories = layout.categories.len(),
        total = layout.total_capacity,
        ?policy,
        "loaded budget layout"
    );

    let app = router(AppState::new(layout, policy));

    let addr = SocketAddr::from(([0, 0, 0, 0], resolve_port()));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
