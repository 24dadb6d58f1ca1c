use gloo_net::http::Request;
use serde_json::Value;

use crate::shared::error::StorefrontError;

/// Получить сырой список товаров
///
/// The body is returned undecoded: its shape (bare array or `{data: [...]}`)
/// is checked by `CatalogStore::load_payload`.
pub async fn fetch_products(url: &str) -> Result<Value, StorefrontError> {
    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| StorefrontError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(StorefrontError::Http(response.status()));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| StorefrontError::DataFormat(format!("failed to parse response: {}", e)))
}
