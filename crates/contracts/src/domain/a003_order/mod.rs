pub mod request;

pub use request::{OrderItem, OrderLinkResponse, OrderRequest};
