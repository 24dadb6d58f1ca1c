//! Error types of the storefront client.
//!
//! Reportable failures (`StorefrontError`) reach the user through a
//! notification. Storage failures (`StorageError`) are only logged: the
//! in-memory cart stays authoritative for the session.

use thiserror::Error;

pub const CATALOG_LOAD_FAILED: &str = "Impossible de charger les produits. Veuillez réessayer.";
pub const ORDER_FAILED: &str = "Erreur lors de la commande. Veuillez réessayer.";
pub const ORDER_TIMED_OUT: &str = "Délai dépassé. Veuillez réessayer.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorefrontError {
    /// Catalog payload is neither an array nor `{ data: [...] }`
    #[error("invalid products data format: {0}")]
    DataFormat(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("order request timed out after {0} ms")]
    Timeout(u32),

    #[error("order link was not generated")]
    MissingOrderLink,
}

impl StorefrontError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, StorefrontError::Timeout(_))
    }

    /// Текст уведомления для ошибки оформления заказа
    pub fn order_message(&self) -> &'static str {
        if self.is_timeout() {
            ORDER_TIMED_OUT
        } else {
            ORDER_FAILED
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("failed to serialize cart: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config value: {0}")]
    Invalid(&'static str),
}
