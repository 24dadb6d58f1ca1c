pub mod api;
pub mod pagination;
pub mod payload;
pub mod store;

pub use pagination::{page_slice, total_pages, visible_page_window, PageState};
pub use store::{CatalogStore, CategoryFilter, ALL_CATEGORIES};
