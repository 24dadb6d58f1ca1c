use crate::shared::text::{collapse_whitespace, fold_text, folded_contains};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const DEFAULT_PRODUCT_NAME: &str = "Produit sans nom";
pub const DEFAULT_CATEGORY: &str = "Autres";
pub const PLACEHOLDER_IMAGE: &str = "img/placeholder.png";

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub i64);

impl ProductId {
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Нулевой id не считается корректной ссылкой на товар
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Product
// ============================================================================

/// A catalog entry after normalization. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Whole FCFA, no minor unit
    pub price: u64,
    pub description: String,
    pub image: String,
    pub category: String,
}

impl Product {
    /// Free-text predicate: name, description or category contains the
    /// already folded query.
    pub fn matches_query(&self, folded_query: &str) -> bool {
        folded_contains(&self.name, folded_query)
            || folded_contains(&self.description, folded_query)
            || folded_contains(&self.category, folded_query)
    }

    /// Category equality on folded text.
    pub fn in_category(&self, folded_category: &str) -> bool {
        fold_text(&self.category) == folded_category
    }
}

// ============================================================================
// Raw record (as served by the products endpoint)
// ============================================================================

/// Product record as it arrives over the wire. Every field is optional and
/// `id`/`price` accept numbers or numeric strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl RawProduct {
    /// Apply defaults and category cleanup. Returns `None` when the record
    /// has no usable id: such a product could not be keyed in the cart.
    pub fn normalize(self) -> Option<Product> {
        let id = self.id.as_ref().and_then(parse_id)?;

        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string());

        let category = self
            .category
            .map(|c| collapse_whitespace(&c))
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let image = self
            .image
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Some(Product {
            id,
            name,
            price: self.price.as_ref().map(parse_price).unwrap_or(0),
            description: self.description.unwrap_or_default(),
            image,
            category,
        })
    }
}

fn parse_id(value: &Value) -> Option<ProductId> {
    let id = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    Some(ProductId(id)).filter(ProductId::is_valid)
}

// Отрицательные и нечисловые цены приводятся к 0, дробные усекаются
fn parse_price(value: &Value) -> u64 {
    let as_float = match value {
        Value::Number(n) => {
            if let Some(p) = n.as_u64() {
                return p;
            }
            n.as_f64()
        }
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match as_float {
        Some(f) if f.is_finite() && f > 0.0 => f.trunc() as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_full_record() {
        let product = raw(json!({
            "id": 7,
            "name": "Sac en cuir",
            "price": 15000,
            "description": "Fait main",
            "image": "img/sac.png",
            "category": "  Sacs   à main "
        }))
        .normalize()
        .unwrap();

        assert_eq!(product.id, ProductId(7));
        assert_eq!(product.price, 15000);
        assert_eq!(product.category, "Sacs à main");
        assert_eq!(product.image, "img/sac.png");
    }

    #[test]
    fn test_normalize_applies_defaults() {
        let product = raw(json!({ "id": 3 })).normalize().unwrap();

        assert_eq!(product.name, DEFAULT_PRODUCT_NAME);
        assert_eq!(product.price, 0);
        assert_eq!(product.description, "");
        assert_eq!(product.image, PLACEHOLDER_IMAGE);
        assert_eq!(product.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_normalize_lenient_numbers() {
        let product = raw(json!({ "id": "12", "price": "2500.9" }))
            .normalize()
            .unwrap();
        assert_eq!(product.id, ProductId(12));
        assert_eq!(product.price, 2500);

        let negative = raw(json!({ "id": 1, "price": -40 })).normalize().unwrap();
        assert_eq!(negative.price, 0);
    }

    #[test]
    fn test_normalize_rejects_missing_or_zero_id() {
        assert!(raw(json!({ "name": "Sans id" })).normalize().is_none());
        assert!(raw(json!({ "id": 0 })).normalize().is_none());
        assert!(raw(json!({ "id": "abc" })).normalize().is_none());
    }

    #[test]
    fn test_matches_query_any_field() {
        let product = raw(json!({
            "id": 1,
            "name": "Robe",
            "description": "Coton léger",
            "category": "Vêtements"
        }))
        .normalize()
        .unwrap();

        assert!(product.matches_query("robe"));
        assert!(product.matches_query("leger"));
        assert!(product.matches_query("vetement"));
        assert!(!product.matches_query("chaussure"));
        assert!(product.in_category("vetements"));
    }
}
