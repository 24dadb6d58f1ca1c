use crate::domain::a001_product::ProductId;
use crate::domain::a002_cart::CartLineItem;
use serde::{Deserialize, Serialize};

/// Позиция заказа в теле запроса на генерацию ссылки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ProductId,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
}

impl From<&CartLineItem> for OrderItem {
    fn from(line: &CartLineItem) -> Self {
        Self {
            id: line.product_id,
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
        }
    }
}

/// Body of `POST /api/whatsapp-link`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<OrderItem>,
}

impl OrderRequest {
    pub fn from_lines(lines: &[CartLineItem]) -> Self {
        Self {
            items: lines.iter().map(OrderItem::from).collect(),
        }
    }
}

/// Response of the order-link endpoint. A missing or blank `url` means the
/// link could not be generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLinkResponse {
    #[serde(default)]
    pub url: Option<String>,
}

impl OrderLinkResponse {
    pub fn link(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
