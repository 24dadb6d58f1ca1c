use contracts::domain::a001_product::ProductId;
use contracts::domain::a002_cart::CartLineItem;

use super::persistence::CartPersistence;

/// Outcome of `decrease_quantity`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    Decreased { quantity: u32 },
    /// Quantity was 1: the line is gone
    Removed(CartLineItem),
}

type CountListener = Box<dyn Fn(u32) + Send + Sync>;

/// Shopping cart: at most one line per product, every quantity >= 1.
///
/// Every mutation is written through to storage and reported to the count
/// listener (cart badge). Index-based operations address positions in
/// `lines()` and ignore out-of-range indexes.
pub struct CartLedger {
    lines: Vec<CartLineItem>,
    persistence: CartPersistence,
    count_listener: Option<CountListener>,
}

impl CartLedger {
    /// Empty cart; nothing is read from storage.
    pub fn new(persistence: CartPersistence) -> Self {
        Self {
            lines: Vec::new(),
            persistence,
            count_listener: None,
        }
    }

    /// Cart restored from storage (empty on absent or corrupt data).
    pub fn restore(persistence: CartPersistence) -> Self {
        let lines = persistence.load();
        Self {
            lines,
            persistence,
            count_listener: None,
        }
    }

    pub fn set_count_listener(&mut self, listener: impl Fn(u32) + Send + Sync + 'static) {
        listener(self.count());
        self.count_listener = Some(Box::new(listener));
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Add one unit of a product. An existing line keeps its first name and
    /// price; only its quantity grows.
    ///
    /// Invalid arguments (zero id, blank name, negative price) are rejected
    /// without touching the cart; returns false in that case.
    pub fn add_item(&mut self, product_id: ProductId, name: &str, price: i64) -> bool {
        self.add_units(product_id, name, price, 1)
    }

    /// Same as `add_item` for `units` at once, with a single write and a
    /// single listener call. Zero units is rejected.
    pub fn add_units(&mut self, product_id: ProductId, name: &str, price: i64, units: u32) -> bool {
        let name = name.trim();
        if !product_id.is_valid() || name.is_empty() || price < 0 || units == 0 {
            log::warn!(
                "add rejected: id={}, name={:?}, price={}, units={}",
                product_id,
                name,
                price,
                units
            );
            return false;
        }

        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(units),
            None => {
                let mut line = CartLineItem::new(product_id, name.to_string(), price as u64);
                line.quantity = units;
                self.lines.push(line);
            }
        }
        self.commit();
        true
    }

    pub fn increase_quantity(&mut self, index: usize) -> bool {
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        line.quantity = line.quantity.saturating_add(1);
        self.commit();
        true
    }

    /// Decrease by one; a line at quantity 1 is removed instead of being kept
    /// at zero.
    pub fn decrease_quantity(&mut self, index: usize) -> Option<QuantityChange> {
        let line = self.lines.get_mut(index)?;
        if line.quantity > 1 {
            line.quantity -= 1;
            let quantity = line.quantity;
            self.commit();
            Some(QuantityChange::Decreased { quantity })
        } else {
            self.remove_item(index).map(QuantityChange::Removed)
        }
    }

    pub fn remove_item(&mut self, index: usize) -> Option<CartLineItem> {
        if index >= self.lines.len() {
            return None;
        }
        let removed = self.lines.remove(index);
        self.commit();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.commit();
    }

    fn commit(&self) {
        self.persistence.save(&self.lines);
        if let Some(listener) = &self.count_listener {
            listener(self.count());
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Sum of price * quantity
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(l.subtotal()))
    }

    /// Sum of quantities (badge value), not the number of lines
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn get(&self, index: usize) -> Option<&CartLineItem> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
