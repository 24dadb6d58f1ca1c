use serde::Deserialize;

use super::error::ConfigError;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub api: ApiConfig,
    pub catalog: CatalogConfig,
    pub cart: CartConfig,
    pub checkout: CheckoutConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Empty means "same origin as the page"
    #[serde(default)]
    pub base: String,
    pub products: String,
    pub order_link: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub items_per_page: usize,
    pub max_visible_pages: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CartConfig {
    pub storage_key: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    pub duration_ms: u32,
}

/// Default configuration embedded in the bundle
pub const DEFAULT_CONFIG: &str = r#"
[api]
base = ""
products = "/api/products"
order_link = "/api/whatsapp-link"

[catalog]
items_per_page = 10
max_visible_pages = 5

[cart]
storage_key = "boutique_cart"

[checkout]
timeout_ms = 10000

[notifications]
duration_ms = 3000
"#;

impl StorefrontConfig {
    /// Parse a full TOML document (host override) and validate it.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: StorefrontConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.items_per_page == 0 {
            return Err(ConfigError::Invalid("catalog.items_per_page must be positive"));
        }
        if self.catalog.max_visible_pages == 0 {
            return Err(ConfigError::Invalid("catalog.max_visible_pages must be positive"));
        }
        if self.checkout.timeout_ms == 0 {
            return Err(ConfigError::Invalid("checkout.timeout_ms must be positive"));
        }
        if self.cart.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("cart.storage_key must not be empty"));
        }
        Ok(())
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base: String::new(),
                products: "/api/products".to_string(),
                order_link: "/api/whatsapp-link".to_string(),
            },
            catalog: CatalogConfig {
                items_per_page: 10,
                max_visible_pages: 5,
            },
            cart: CartConfig {
                storage_key: "boutique_cart".to_string(),
            },
            checkout: CheckoutConfig { timeout_ms: 10_000 },
            notifications: NotificationConfig { duration_ms: 3000 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = StorefrontConfig::from_toml_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        assert_eq!(config.unwrap(), StorefrontConfig::default());
    }

    #[test]
    fn test_override_base_url() {
        let contents = DEFAULT_CONFIG.replace(r#"base = """#, r#"base = "https://shop.example""#);
        let config = StorefrontConfig::from_toml_str(&contents).unwrap();
        assert_eq!(config.api.base, "https://shop.example");
        assert_eq!(config.catalog.items_per_page, 10);
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let contents = DEFAULT_CONFIG.replace("items_per_page = 10", "items_per_page = 0");
        assert!(matches!(
            StorefrontConfig::from_toml_str(&contents),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_broken_toml() {
        assert!(matches!(
            StorefrontConfig::from_toml_str("[api"),
            Err(ConfigError::Parse(_))
        ));
    }
}
