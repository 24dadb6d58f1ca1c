use contracts::domain::a001_product::{Product, ProductId, RawProduct};
use contracts::shared::text::{collapse_whitespace, fold_text};
use serde_json::Value;

use super::pagination::{page_slice, total_pages, visible_page_window, PageState};
use super::payload::parse_catalog_payload;
use crate::shared::error::StorefrontError;

/// Category selector value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn parse(category: &str) -> Self {
        if category == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(collapse_whitespace(category))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Named(name) => name,
        }
    }
}

/// Full product list plus the filtered view the grid displays.
///
/// `filtered` is recomputed from `(all, active_category, search_query)` on
/// every mutation and is always a subsequence of `all`. A non-empty search
/// query takes over the view; the category stays selected underneath and
/// comes back when the query is cleared.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    all: Vec<Product>,
    filtered: Vec<Product>,
    active_category: CategoryFilter,
    /// Folded form; empty when no search is active
    search_query: String,
    page: PageState,
}

impl CatalogStore {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            active_category: CategoryFilter::All,
            search_query: String::new(),
            page: PageState::new(items_per_page),
        }
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Replace the catalog with normalized `records` and reset every view
    /// parameter. Returns the number of products kept.
    pub fn load(&mut self, records: Vec<RawProduct>) -> usize {
        let total = records.len();
        self.all = records.into_iter().filter_map(RawProduct::normalize).collect();
        if self.all.len() < total {
            log::warn!(
                "{} product record(s) without a usable id were skipped",
                total - self.all.len()
            );
        }

        self.active_category = CategoryFilter::All;
        self.search_query.clear();
        self.page.reset();
        self.recompute();

        log::info!("{} products loaded", self.all.len());
        self.all.len()
    }

    /// Load from the raw endpoint body. On a format error the catalog is left
    /// empty.
    pub fn load_payload(&mut self, payload: Value) -> Result<usize, StorefrontError> {
        match parse_catalog_payload(payload) {
            Ok(records) => Ok(self.load(records)),
            Err(e) => {
                self.clear();
                Err(e)
            }
        }
    }

    pub fn clear(&mut self) {
        self.load(Vec::new());
    }

    // ------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------

    /// Select a category (`"all"` for every product). Clears any search and
    /// returns to page 1.
    pub fn filter_by_category(&mut self, category: &str) {
        self.active_category = CategoryFilter::parse(category);
        self.search_query.clear();
        self.page.reset();
        self.recompute();
    }

    /// Free-text search over name, description and category. A blank query
    /// falls back to the active category. Returns to page 1.
    pub fn search(&mut self, query: &str) {
        self.search_query = fold_text(query);
        self.page.reset();
        self.recompute();
    }

    fn recompute(&mut self) {
        let search_query = &self.search_query;
        self.filtered = if !search_query.is_empty() {
            self.all
                .iter()
                .filter(|p| p.matches_query(search_query))
                .cloned()
                .collect()
        } else {
            match &self.active_category {
                CategoryFilter::All => self.all.clone(),
                CategoryFilter::Named(name) => {
                    let folded = fold_text(name);
                    self.all
                        .iter()
                        .filter(|p| p.in_category(&folded))
                        .cloned()
                        .collect()
                }
            }
        };
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    /// Returns false when the page was rejected (out of range or already
    /// current); the caller then skips re-rendering.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let total = self.total_pages();
        self.page.go_to_page(page, total)
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    pub fn items_per_page(&self) -> usize {
        self.page.items_per_page()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.page.items_per_page())
    }

    /// Products of the current page
    pub fn page_products(&self) -> &[Product] {
        page_slice(&self.filtered, self.page.current_page(), self.page.items_per_page())
    }

    pub fn visible_pages(&self, max_visible: usize) -> Vec<usize> {
        visible_page_window(self.page.current_page(), self.total_pages(), max_visible)
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn all(&self) -> &[Product] {
        &self.all
    }

    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    pub fn active_category(&self) -> &CategoryFilter {
        &self.active_category
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.all.iter().find(|p| p.id == id)
    }

    /// Distinct categories in first-seen order, compared on folded text.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut categories = Vec::new();
        for product in &self.all {
            let folded = fold_text(&product.category);
            if !seen.contains(&folded) {
                seen.push(folded);
                categories.push(product.category.clone());
            }
        }
        categories
    }
}
