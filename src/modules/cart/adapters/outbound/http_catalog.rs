// HTTP implementation of the StockGateway and ProductGateway ports.
//
// Responsibilities
// - GET {base}/stock/{id} and GET {base}/products/{id}.
// - Map 404 to NotFound, other failures to Transport, undecodable bodies to Malformed.

use crate::modules::cart::core::ports::{GatewayError, ProductGateway, StockGateway};
use crate::modules::cart::core::product::{CatalogProduct, ProductId, Stock};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
        product_id: ProductId,
    ) -> Result<T, GatewayError> {
        let url = format!("{}/{path}/{product_id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound {
                resource,
                product_id,
            });
        }
        let response = response
            .error_for_status()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))
    }
}

#[async_trait::async_trait]
impl StockGateway for HttpCatalogApi {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, GatewayError> {
        self.fetch("stock", "stock", product_id).await
    }
}

#[async_trait::async_trait]
impl ProductGateway for HttpCatalogApi {
    async fn product(&self, product_id: ProductId) -> Result<CatalogProduct, GatewayError> {
        self.fetch("product", "products", product_id).await
    }
}
