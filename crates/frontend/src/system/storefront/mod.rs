pub mod context;
pub mod session;

pub use context::{use_storefront, StorefrontContext, StorefrontProvider};
pub use session::StorefrontSession;
