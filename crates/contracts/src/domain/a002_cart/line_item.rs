use crate::domain::a001_product::ProductId;
use serde::{Deserialize, Serialize};

/// One cart row. `name` and `price` are snapshots taken when the product was
/// first added and are never re-synced with the catalog.
///
/// Serialized as `{id, name, price, quantity}`: the same shape is persisted
/// in browser storage and sent in the order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn new(product_id: ProductId, name: String, price: u64) -> Self {
        Self {
            product_id,
            name,
            price,
            quantity: 1,
        }
    }

    /// price * quantity
    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }

    /// Row can be kept in a cart: known product, a name, at least one unit.
    pub fn is_well_formed(&self) -> bool {
        self.product_id.is_valid() && !self.name.trim().is_empty() && self.quantity >= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape_uses_id() {
        let item = CartLineItem {
            product_id: ProductId(4),
            name: "Montre".to_string(),
            price: 100,
            quantity: 2,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({ "id": 4, "name": "Montre", "price": 100, "quantity": 2 })
        );
        assert_eq!(item.subtotal(), 200);
    }

    #[test]
    fn test_is_well_formed() {
        let mut item = CartLineItem::new(ProductId(1), "A".to_string(), 10);
        assert!(item.is_well_formed());

        item.quantity = 0;
        assert!(!item.is_well_formed());

        let nameless = CartLineItem::new(ProductId(1), "  ".to_string(), 10);
        assert!(!nameless.is_well_formed());
    }
}
