use std::sync::Arc;

use contracts::domain::a001_product::{Product, ProductId};
use contracts::domain::a002_cart::CartLineItem;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::session::StorefrontSession;
use crate::domain::a001_catalog::api::fetch_products;
use crate::domain::a003_order::api::request_order_link;
use crate::shared::api_utils::api_url;
use crate::shared::config::StorefrontConfig;
use crate::shared::notifications::{Notification, NotificationCenter};
use crate::shared::storage::BrowserStorage;

/// Handle given to the UI layer: the session behind a signal plus the
/// derived state views need (cart badge, toast).
#[derive(Clone, Copy)]
pub struct StorefrontContext {
    session: RwSignal<StorefrontSession>,
    cart_count: RwSignal<u32>,
    notifications: NotificationCenter,
}

impl StorefrontContext {
    pub fn new(config: StorefrontConfig) -> Self {
        let notifications = NotificationCenter::new(config.notifications.duration_ms);
        let mut session =
            StorefrontSession::new(config, Arc::new(BrowserStorage), Arc::new(notifications));

        let cart_count = RwSignal::new(session.cart().count());
        session
            .cart_mut()
            .set_count_listener(move |count| cart_count.set(count));

        Self {
            session: RwSignal::new(session),
            cart_count,
            notifications,
        }
    }

    fn mutate<R: Default>(&self, f: impl FnOnce(&mut StorefrontSession) -> R) -> R {
        self.session.try_update(f).unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Network flows
    // ------------------------------------------------------------------

    /// Fetch the catalog. A call while a fetch is in flight does nothing.
    pub fn load_catalog(&self) {
        if !self.mutate(|s| s.begin_catalog_load()) {
            return;
        }
        let session = self.session;
        let url = session.with_untracked(|s| api_url(&s.config().api.base, &s.config().api.products));

        spawn_local(async move {
            let result = fetch_products(&url).await;
            session.update(|s| {
                let _ = s.finish_catalog_load(result);
            });
        });
    }

    /// Submit the cart and open the returned link in a new tab.
    pub fn checkout(&self) {
        let Some(order) = self.mutate(|s| s.begin_checkout()) else {
            return;
        };
        let session = self.session;
        let (url, timeout_ms) = session.with_untracked(|s| {
            let config = s.config();
            (
                api_url(&config.api.base, &config.api.order_link),
                config.checkout.timeout_ms,
            )
        });

        spawn_local(async move {
            let result = request_order_link(&url, &order, timeout_ms).await;
            let link = session.try_update(|s| s.finish_checkout(result)).flatten();
            if let Some(link) = link {
                open_in_new_tab(&link);
            }
        });
    }

    // ------------------------------------------------------------------
    // Catalog view
    // ------------------------------------------------------------------

    pub fn filter_by_category(&self, category: &str) {
        self.mutate(|s| s.filter_by_category(category));
    }

    pub fn search(&self, query: &str) {
        self.mutate(|s| s.search(query));
    }

    pub fn go_to_page(&self, page: usize) -> bool {
        self.mutate(|s| s.go_to_page(page))
    }

    pub fn page_products(&self) -> Vec<Product> {
        self.session.with(|s| s.page_products().to_vec())
    }

    pub fn visible_pages(&self) -> Vec<usize> {
        self.session.with(|s| s.visible_pages())
    }

    pub fn current_page(&self) -> usize {
        self.session.with(|s| s.catalog().current_page())
    }

    pub fn total_pages(&self) -> usize {
        self.session.with(|s| s.total_pages())
    }

    pub fn categories(&self) -> Vec<String> {
        self.session.with(|s| s.catalog().categories())
    }

    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.session.with(|s| s.catalog().product(id).cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.session.with(|s| s.is_loading())
    }

    // ------------------------------------------------------------------
    // Cart
    // ------------------------------------------------------------------

    pub fn add_to_cart(&self, product_id: ProductId, name: &str, price: i64) -> bool {
        self.mutate(|s| s.add_to_cart(product_id, name, price))
    }

    pub fn add_to_cart_with_quantity(
        &self,
        product_id: ProductId,
        name: &str,
        price: i64,
        quantity: u32,
    ) -> bool {
        self.mutate(|s| s.add_to_cart_with_quantity(product_id, name, price, quantity))
    }

    pub fn increase_quantity(&self, index: usize) -> bool {
        self.mutate(|s| s.increase_quantity(index))
    }

    pub fn decrease_quantity(&self, index: usize) {
        self.mutate(|s| {
            s.decrease_quantity(index);
        });
    }

    pub fn remove_from_cart(&self, index: usize) -> bool {
        self.mutate(|s| s.remove_from_cart(index))
    }

    pub fn cart_lines(&self) -> Vec<CartLineItem> {
        self.session.with(|s| s.cart().lines().to_vec())
    }

    pub fn cart_total(&self) -> u64 {
        self.session.with(|s| s.cart().total())
    }

    /// Badge value, kept current by the cart's count listener
    pub fn cart_count(&self) -> u32 {
        self.cart_count.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.session.with(|s| s.is_submitting())
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn notification(&self) -> Option<Notification> {
        self.notifications.current()
    }

    pub fn dismiss_notification(&self) {
        self.notifications.dismiss();
    }
}

fn open_in_new_tab(url: &str) {
    let opened = web_sys::window()
        .map(|w| w.open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer"));
    match opened {
        Some(Ok(_)) => {}
        Some(Err(e)) => log::warn!("could not open order link: {:?}", e),
        None => log::warn!("could not open order link: window is not available"),
    }
}

/// Storefront context provider component
///
/// Builds the session (cart restored from `localStorage`) and starts the
/// catalog fetch.
#[component]
pub fn StorefrontProvider(
    #[prop(optional)] config: Option<StorefrontConfig>,
    children: Children,
) -> impl IntoView {
    let context = StorefrontContext::new(config.unwrap_or_default());
    provide_context(context);
    context.load_catalog();

    children()
}

/// Hook to access the storefront
pub fn use_storefront() -> StorefrontContext {
    use_context::<StorefrontContext>().expect("StorefrontProvider not found in component tree")
}
