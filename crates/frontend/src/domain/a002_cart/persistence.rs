use std::sync::Arc;

use contracts::domain::a002_cart::CartLineItem;
use serde_json::Value;

use crate::shared::error::StorageError;
use crate::shared::storage::KeyValueStore;

/// Reads and writes the cart under a single storage key as a JSON array of
/// `{id, name, price, quantity}`.
///
/// Failures never propagate: a broken read yields an empty cart and a failed
/// write is logged while the in-memory cart stays authoritative.
#[derive(Clone)]
pub struct CartPersistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl CartPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Restore the saved cart; empty when absent or unreadable.
    pub fn load(&self) -> Vec<CartLineItem> {
        match self.try_load() {
            Ok(lines) => {
                if !lines.is_empty() {
                    log::info!("cart restored from storage ({} lines)", lines.len());
                }
                lines
            }
            Err(e) => {
                log::warn!("could not load cart, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<CartLineItem>, StorageError> {
        let saved = match self.store.get_item(&self.key)? {
            Some(saved) => saved,
            None => return Ok(Vec::new()),
        };
        let rows: Vec<Value> = serde_json::from_str(&saved)
            .map_err(|e| StorageError::Backend(format!("corrupt cart data: {}", e)))?;
        let lines = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<CartLineItem>(row) {
                Ok(line) => Some(line),
                Err(e) => {
                    log::warn!("skipping unreadable cart line: {}", e);
                    None
                }
            })
            .collect();
        Ok(sanitize(lines))
    }

    /// Write the whole cart. Returns false when the write failed.
    pub fn save(&self, lines: &[CartLineItem]) -> bool {
        match self.try_save(lines) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("could not save cart: {}", e);
                false
            }
        }
    }

    fn try_save(&self, lines: &[CartLineItem]) -> Result<(), StorageError> {
        let serialized =
            serde_json::to_string(lines).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.store.set_item(&self.key, &serialized)
    }
}

// Сохранённые данные могли быть изменены вручную: выкидываем битые строки
// и склеиваем дубликаты, чтобы инварианты корзины держались с самого старта
fn sanitize(lines: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut clean: Vec<CartLineItem> = Vec::with_capacity(lines.len());
    for line in lines {
        if !line.is_well_formed() {
            log::warn!("dropping malformed cart line for product {}", line.product_id);
            continue;
        }
        match clean.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => clean.push(line),
        }
    }
    clean
}
