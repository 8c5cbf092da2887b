//! API routes for order-server

pub mod health;
pub mod middleware;
pub mod order;
pub mod product;

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::get;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator (uuid v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, without middleware or state
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(order::list_orders).post(order::create_order))
        .route(
            "/orders/{id}",
            get(order::get_order)
                .put(order::update_order)
                .delete(order::delete_order),
        )
        .route("/products", get(product::list_products))
        .route("/health", get(health::health_check))
}

/// Fully configured application: routes, middleware and state
pub fn build_app(state: AppState) -> Router {
    build_router()
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // CORS open to any origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Generate a request ID before anything else sees the request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
