//! order-server: REST backend for order management
//!
//! - `GET /orders`, `GET /orders/{id}`, `POST /orders`, `PUT /orders/{id}`,
//!   `DELETE /orders/{id}`
//! - `GET /products`
//! - `GET /health`

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod state;

use std::future::Future;

use tokio::net::TcpListener;

use state::AppState;

/// Serve the application on `listener` until `shutdown` resolves
pub async fn run(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = api::build_app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
