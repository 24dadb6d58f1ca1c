pub mod ledger;
pub mod persistence;

pub use ledger::{CartLedger, QuantityChange};
pub use persistence::CartPersistence;
