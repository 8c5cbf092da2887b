//! Order Client - HTTP client and page view-models for the order server
//!
//! [`OrderClient`] speaks the order API over HTTP. The [`views`] module holds
//! the state behind the "My Orders" list page and the "Edit Order" page.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod views;

pub use api::OrdersApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::OrderClient;
pub use views::{EditOrder, LineRow, MyOrders, Notice, Severity};
