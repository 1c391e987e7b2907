//! REST surface.
//!
//! Every route lives under `/api` and requires a bearer token; see
//! [`AuthenticatedUser`]. Successful responses are wrapped in a
//! `{success: true, ...}` envelope, failures in [`ApiError`]'s body.

mod auth;
mod error;
mod pagination;
mod pipelines;
mod resources;
mod stages;
mod state;
mod tasks;

pub use auth::AuthenticatedUser;
pub use error::{ApiError, FieldErrors, FieldMessages};
pub use pagination::{PageLinks, PageMeta};
pub use resources::{PipelineResource, StageResource, TaskResource, UserResource};
pub use state::{AppState, SharedPipelineCatalog, SharedTaskBoard, SharedUserDirectory};

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use std::time::Instant;
use tokio::net::TcpListener;

/// Builds the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/pipelines", get(pipelines::index).post(pipelines::store))
        .route("/pipelines/{id}", get(pipelines::show))
        .route("/stages", get(stages::index).post(stages::store))
        .route("/tasks", get(tasks::index).post(tasks::store))
        .route(
            "/tasks/{id}",
            get(tasks::show).put(tasks::update).delete(tasks::destroy),
        );

    Router::new()
        .nest("/api", api)
        .fallback(|| async { ApiError::NotFound("Not found.".to_owned()) })
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed = ?started.elapsed(),
        "handled request"
    );
    response
}
