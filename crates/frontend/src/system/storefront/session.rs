use std::sync::Arc;

use contracts::domain::a001_product::{Product, ProductId};
use contracts::domain::a003_order::{OrderLinkResponse, OrderRequest};
use serde_json::Value;

use crate::domain::a001_catalog::CatalogStore;
use crate::domain::a002_cart::{CartLedger, CartPersistence, QuantityChange};
use crate::shared::config::StorefrontConfig;
use crate::shared::error::{StorefrontError, CATALOG_LOAD_FAILED};
use crate::shared::notifications::{NotificationKind, Notifier};
use crate::shared::storage::KeyValueStore;

pub const CART_IS_EMPTY: &str = "Votre panier est vide!";
pub const ORDER_SENT: &str = "Commande envoyée via WhatsApp! 📱";
pub const QUANTITY_INCREASED: &str = "Quantité augmentée";
pub const QUANTITY_DECREASED: &str = "Quantité diminuée";

/// All state of one storefront page session.
///
/// Network calls are not made here: the async caller brackets them with
/// `begin_*` / `finish_*`, so every mutation stays synchronous.
pub struct StorefrontSession {
    config: StorefrontConfig,
    catalog: CatalogStore,
    cart: CartLedger,
    notifier: Arc<dyn Notifier>,
    is_loading: bool,
    is_submitting: bool,
}

impl StorefrontSession {
    /// Build the session and restore the cart from `storage`.
    pub fn new(
        config: StorefrontConfig,
        storage: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let persistence = CartPersistence::new(storage, config.cart.storage_key.clone());
        Self {
            catalog: CatalogStore::new(config.catalog.items_per_page),
            cart: CartLedger::restore(persistence),
            config,
            notifier,
            is_loading: false,
            is_submitting: false,
        }
    }

    fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        self.notifier.notify(kind, message.into());
    }

    // ------------------------------------------------------------------
    // Catalog loading
    // ------------------------------------------------------------------

    /// Mark a catalog fetch as started. False when one is already in flight:
    /// the caller must not issue a second request.
    pub fn begin_catalog_load(&mut self) -> bool {
        if self.is_loading {
            log::debug!("catalog load already in flight, ignoring");
            return false;
        }
        self.is_loading = true;
        true
    }

    /// Apply the fetch outcome. On any failure the catalog is left empty and
    /// the user is notified.
    pub fn finish_catalog_load(
        &mut self,
        result: Result<Value, StorefrontError>,
    ) -> Result<usize, StorefrontError> {
        self.is_loading = false;
        let outcome = result.and_then(|payload| self.catalog.load_payload(payload));
        if let Err(e) = &outcome {
            log::error!("failed to load products: {}", e);
            self.catalog.clear();
            self.notify(NotificationKind::Error, CATALOG_LOAD_FAILED);
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Catalog view
    // ------------------------------------------------------------------

    pub fn filter_by_category(&mut self, category: &str) {
        self.catalog.filter_by_category(category);
    }

    pub fn search(&mut self, query: &str) {
        self.catalog.search(query);
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.catalog.go_to_page(page)
    }

    pub fn page_products(&self) -> &[Product] {
        self.catalog.page_products()
    }

    pub fn visible_pages(&self) -> Vec<usize> {
        self.catalog.visible_pages(self.config.catalog.max_visible_pages)
    }

    pub fn total_pages(&self) -> usize {
        self.catalog.total_pages()
    }

    // ------------------------------------------------------------------
    // Cart
    // ------------------------------------------------------------------

    pub fn add_to_cart(&mut self, product_id: ProductId, name: &str, price: i64) -> bool {
        if !self.cart.add_item(product_id, name, price) {
            return false;
        }
        self.notify(
            NotificationKind::Success,
            format!("{} ajouté au panier!", name.trim()),
        );
        true
    }

    /// Add `quantity` units at once (grid quantity selector).
    pub fn add_to_cart_with_quantity(
        &mut self,
        product_id: ProductId,
        name: &str,
        price: i64,
        quantity: u32,
    ) -> bool {
        if !self.cart.add_units(product_id, name, price, quantity) {
            return false;
        }
        let plural = if quantity > 1 { "s" } else { "" };
        self.notify(
            NotificationKind::Success,
            format!("{}x {} ajouté{} au panier!", quantity, name.trim(), plural),
        );
        true
    }

    pub fn increase_quantity(&mut self, index: usize) -> bool {
        if !self.cart.increase_quantity(index) {
            return false;
        }
        self.notify(NotificationKind::Info, QUANTITY_INCREASED);
        true
    }

    pub fn decrease_quantity(&mut self, index: usize) -> Option<QuantityChange> {
        let change = self.cart.decrease_quantity(index)?;
        match &change {
            QuantityChange::Decreased { .. } => {
                self.notify(NotificationKind::Info, QUANTITY_DECREASED);
            }
            QuantityChange::Removed(line) => {
                self.notify(
                    NotificationKind::Warning,
                    format!("{} supprimé du panier", line.name),
                );
            }
        }
        Some(change)
    }

    pub fn remove_from_cart(&mut self, index: usize) -> bool {
        match self.cart.remove_item(index) {
            Some(line) => {
                self.notify(
                    NotificationKind::Warning,
                    format!("{} supprimé du panier", line.name),
                );
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Checkout
    // ------------------------------------------------------------------

    /// Build the order body from the cart. `None` when the cart is empty
    /// (user is warned) or a submission is already in flight.
    pub fn begin_checkout(&mut self) -> Option<OrderRequest> {
        if self.cart.is_empty() {
            self.notify(NotificationKind::Warning, CART_IS_EMPTY);
            return None;
        }
        if self.is_submitting {
            log::debug!("checkout already in flight, ignoring");
            return None;
        }
        self.is_submitting = true;
        Some(OrderRequest::from_lines(self.cart.lines()))
    }

    /// Apply the order-link outcome. On success the cart is emptied and the
    /// link to open is returned.
    pub fn finish_checkout(
        &mut self,
        result: Result<OrderLinkResponse, StorefrontError>,
    ) -> Option<String> {
        self.is_submitting = false;
        let outcome = result.and_then(|response| {
            response
                .link()
                .map(str::to_string)
                .ok_or(StorefrontError::MissingOrderLink)
        });

        match outcome {
            Ok(url) => {
                log::info!("order link generated for {} item(s)", self.cart.count());
                self.cart.clear();
                self.notify(NotificationKind::Success, ORDER_SENT);
                Some(url)
            }
            Err(e) => {
                log::error!("order submission failed: {}", e);
                self.notify(NotificationKind::Error, e.order_message());
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn cart(&self) -> &CartLedger {
        &self.cart
    }

    pub(crate) fn cart_mut(&mut self) -> &mut CartLedger {
        &mut self.cart
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::{ORDER_FAILED, ORDER_TIMED_OUT};
    use crate::shared::notifications::RecordingNotifier;
    use crate::shared::storage::{FailingStorage, MemoryStorage};
    use serde_json::json;

    struct Fixture {
        session: StorefrontSession,
        storage: Arc<MemoryStorage>,
        notifier: Arc<RecordingNotifier>,
    }

    fn fixture() -> Fixture {
        let storage = Arc::new(MemoryStorage::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let session = StorefrontSession::new(
            StorefrontConfig::default(),
            storage.clone(),
            notifier.clone(),
        );
        Fixture {
            session,
            storage,
            notifier,
        }
    }

    fn products_payload(count: i64) -> Value {
        Value::Array(
            (1..=count)
                .map(|id| json!({ "id": id, "name": format!("Produit {}", id), "price": id * 100 }))
                .collect(),
        )
    }

    #[test]
    fn test_catalog_load_guard() {
        let mut f = fixture();
        assert!(f.session.begin_catalog_load());
        assert!(!f.session.begin_catalog_load());
        assert!(f.session.is_loading());

        let loaded = f.session.finish_catalog_load(Ok(products_payload(23)));
        assert_eq!(loaded, Ok(23));
        assert!(!f.session.is_loading());
        assert_eq!(f.session.total_pages(), 3);
        assert!(f.session.begin_catalog_load());
    }

    #[test]
    fn test_catalog_load_failure_notifies_and_leaves_empty() {
        let mut f = fixture();
        f.session.begin_catalog_load();
        let result = f.session.finish_catalog_load(Ok(json!({ "error": "boom" })));

        assert!(matches!(result, Err(StorefrontError::DataFormat(_))));
        assert!(f.session.catalog().is_empty());
        assert_eq!(
            f.notifier.last(),
            Some((NotificationKind::Error, CATALOG_LOAD_FAILED.to_string()))
        );

        f.session.begin_catalog_load();
        let _ = f.session.finish_catalog_load(Err(StorefrontError::Http(500)));
        assert!(!f.session.is_loading());
        assert_eq!(f.notifier.messages().len(), 2);
    }

    #[test]
    fn test_pagination_through_session() {
        let mut f = fixture();
        f.session.begin_catalog_load();
        f.session.finish_catalog_load(Ok(products_payload(23))).unwrap();

        assert!(!f.session.go_to_page(0));
        assert!(!f.session.go_to_page(4));
        assert!(f.session.go_to_page(3));
        assert_eq!(f.session.page_products().len(), 3);
        assert_eq!(f.session.visible_pages(), vec![1, 2, 3]);

        f.session.search("produit 2");
        assert_eq!(f.session.catalog().current_page(), 1);
    }

    #[test]
    fn test_cart_restored_at_startup() {
        let storage = Arc::new(MemoryStorage::with_item(
            "boutique_cart",
            r#"[{"id":5,"name":"Sac","price":8000,"quantity":2}]"#,
        ));
        let session = StorefrontSession::new(
            StorefrontConfig::default(),
            storage,
            Arc::new(RecordingNotifier::default()),
        );
        assert_eq!(session.cart().count(), 2);
        assert_eq!(session.cart().total(), 16000);
    }

    #[test]
    fn test_cart_operations_notify() {
        let mut f = fixture();
        assert!(f.session.add_to_cart(ProductId(1), "Robe", 100));
        assert_eq!(
            f.notifier.last(),
            Some((NotificationKind::Success, "Robe ajouté au panier!".to_string()))
        );

        assert!(f.session.increase_quantity(0));
        assert_eq!(
            f.notifier.last(),
            Some((NotificationKind::Info, QUANTITY_INCREASED.to_string()))
        );

        f.session.decrease_quantity(0);
        assert_eq!(
            f.notifier.last(),
            Some((NotificationKind::Info, QUANTITY_DECREASED.to_string()))
        );

        f.session.decrease_quantity(0);
        assert_eq!(
            f.notifier.last(),
            Some((NotificationKind::Warning, "Robe supprimé du panier".to_string()))
        );
        assert!(f.session.cart().is_empty());
    }

    #[test]
    fn test_invalid_add_is_silent() {
        let mut f = fixture();
        assert!(!f.session.add_to_cart(ProductId(0), "Robe", 100));
        assert!(!f.session.remove_from_cart(3));
        assert!(f.notifier.messages().is_empty());
    }

    #[test]
    fn test_add_with_quantity() {
        let mut f = fixture();
        assert!(f.session.add_to_cart_with_quantity(ProductId(2), "Sac", 50, 3));
        assert_eq!(f.session.cart().count(), 3);
        assert_eq!(f.session.cart().len(), 1);
        assert_eq!(
            f.notifier.last(),
            Some((NotificationKind::Success, "3x Sac ajoutés au panier!".to_string()))
        );

        assert!(!f.session.add_to_cart_with_quantity(ProductId(2), "Sac", 50, 0));
        assert_eq!(f.session.cart().count(), 3);
        assert_eq!(f.notifier.messages().len(), 1);
    }

    #[test]
    fn test_cart_stays_usable_when_storage_fails() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut session = StorefrontSession::new(
            StorefrontConfig::default(),
            Arc::new(FailingStorage),
            notifier.clone(),
        );

        assert!(session.add_to_cart(ProductId(1), "Robe", 100));
        assert!(session.increase_quantity(0));
        assert_eq!(session.cart().count(), 2);
        assert_eq!(session.begin_checkout().map(|o| o.items.len()), Some(1));
    }

    #[test]
    fn test_checkout_on_empty_cart_warns() {
        let mut f = fixture();
        assert_eq!(f.session.begin_checkout(), None);
        assert_eq!(
            f.notifier.last(),
            Some((NotificationKind::Warning, CART_IS_EMPTY.to_string()))
        );
        assert!(!f.session.is_submitting());
    }

    #[test]
    fn test_successful_checkout_clears_cart() {
        let mut f = fixture();
        f.session.add_to_cart(ProductId(1), "Robe", 100);
        f.session.add_to_cart(ProductId(2), "Sac", 50);

        let order = f.session.begin_checkout().unwrap();
        assert_eq!(order.items.len(), 2);
        assert_eq!(f.session.begin_checkout(), None);

        let url = f.session.finish_checkout(Ok(OrderLinkResponse {
            url: Some("https://wa.me/221?text=x".to_string()),
        }));
        assert_eq!(url.as_deref(), Some("https://wa.me/221?text=x"));
        assert!(f.session.cart().is_empty());
        assert_eq!(
            f.storage.get_item("boutique_cart").unwrap().as_deref(),
            Some("[]")
        );
        assert_eq!(
            f.notifier.last(),
            Some((NotificationKind::Success, ORDER_SENT.to_string()))
        );
    }

    #[test]
    fn test_checkout_failures_keep_cart() {
        let mut f = fixture();
        f.session.add_to_cart(ProductId(1), "Robe", 100);

        f.session.begin_checkout().unwrap();
        assert_eq!(f.session.finish_checkout(Ok(OrderLinkResponse::default())), None);
        assert_eq!(
            f.notifier.last(),
            Some((NotificationKind::Error, ORDER_FAILED.to_string()))
        );

        f.session.begin_checkout().unwrap();
        assert_eq!(
            f.session.finish_checkout(Err(StorefrontError::Timeout(10_000))),
            None
        );
        assert_eq!(
            f.notifier.last(),
            Some((NotificationKind::Error, ORDER_TIMED_OUT.to_string()))
        );

        assert_eq!(f.session.cart().count(), 1);
        assert!(!f.session.is_submitting());
    }
}
