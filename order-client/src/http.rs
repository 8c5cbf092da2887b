//! HTTP client for the order API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiResponse;
use shared::models::{OrderDetail, OrderOpResult, OrderSummary, OrderUpsert, Product};

use crate::{ClientConfig, ClientError, ClientResult, OrdersApi};

/// HTTP client for making requests to the order server
#[derive(Debug, Clone)]
pub struct OrderClient {
    client: Client,
    base_url: String,
}

impl OrderClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = error_message(&text);
            return match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    Err(ClientError::Validation(message))
                }
                _ => Err(ClientError::Internal(message)),
            };
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }
}

/// Message of an `ApiResponse` error body, or the raw text when the body is not one
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiResponse>(body)
        .map(|body| body.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl OrdersApi for OrderClient {
    async fn list_orders(&self) -> ClientResult<Vec<OrderSummary>> {
        self.get("/orders").await
    }

    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.get("/products").await
    }

    async fn get_order(&self, id: i64) -> ClientResult<OrderDetail> {
        self.get(&format!("/orders/{id}")).await
    }

    async fn create_order(&self, data: &OrderUpsert) -> ClientResult<OrderOpResult> {
        self.post("/orders", data).await
    }

    async fn update_order(&self, id: i64, data: &OrderUpsert) -> ClientResult<OrderOpResult> {
        self.put(&format!("/orders/{id}"), data).await
    }

    async fn delete_order(&self, id: i64) -> ClientResult<OrderOpResult> {
        self.delete(&format!("/orders/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = OrderClient::new(&ClientConfig::new("http://localhost:5000/")).unwrap();
        assert_eq!(client.url("/orders/3"), "http://localhost:5000/orders/3");
        assert_eq!(client.url("products"), "http://localhost:5000/products");
    }

    #[test]
    fn test_error_message_prefers_envelope() {
        let body = r#"{"code":4001,"message":"Order not found","details":{"id":9}}"#;
        assert_eq!(error_message(body), "Order not found");
        assert_eq!(error_message("upstream timed out"), "upstream timed out");
    }
}
