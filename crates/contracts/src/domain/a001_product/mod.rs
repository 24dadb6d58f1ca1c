pub mod aggregate;

pub use aggregate::{
    Product, ProductId, RawProduct, DEFAULT_CATEGORY, DEFAULT_PRODUCT_NAME, PLACEHOLDER_IMAGE,
};
