//! Shared storefront types: catalog products, cart rows and the order
//! request/response bodies exchanged with the backend endpoints.

pub mod domain;
pub mod shared;
