//! Strollby
//!
//! Strollby is an order-composition engine for a short-term rental
//! storefront: it turns a product catalog plus user selections into a
//! grouped display model, a live cost breakdown and a canonical,
//! submission-ready order payload.

pub mod cart;
pub mod catalog;
pub mod delivery;
pub mod fixtures;
pub mod grouping;
pub mod images;
pub mod order;
pub mod prelude;
pub mod pricing;
pub mod rental;
pub mod selection;
pub mod summary;
pub mod utils;
