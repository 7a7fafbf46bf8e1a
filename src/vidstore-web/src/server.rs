//! Axum server setup and routing

use crate::routes;
use crate::state::AppState;
use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the router for the video resource
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/:video_id",
            get(routes::get_video)
                .put(routes::put_video)
                .patch(routes::patch_video)
                .delete(routes::delete_video),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the web server, running until Ctrl-C
pub async fn serve(db: rusqlite::Connection, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(AppState::new(db));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("serving videos on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received shutdown signal");
    }
}
