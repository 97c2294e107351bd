use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::router::build_router;
use crate::state::AppContext;

/// Bind the listener and serve requests until shutdown.
pub async fn serve(addr: SocketAddr, ctx: AppContext, static_dir: &Path) -> anyhow::Result<()> {
    let organ_count = ctx.registry.len();
    let router = build_router(ctx, static_dir);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!(%addr, organ_count, static_dir = %static_dir.display(), "listening");
    axum::serve(listener, router).await.context("serve")?;
    Ok(())
}
