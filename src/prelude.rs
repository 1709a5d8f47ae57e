//! Strollby prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartStorage, FileStorage, MemoryStorage, STORAGE_KEY},
    catalog::{CatalogError, PriceType, Product, load_catalog, parse_catalog},
    delivery::{DeliveryMethod, DeliverySelection, FeeTable},
    grouping::{CategoryGroup, group_catalog},
    images::{candidates, resolve, swap_ext},
    order::{OrderPayload, PayloadItem},
    pricing::{LineItem, Quote, QuoteError, format_whole, quote},
    rental::{RentalWindow, day_count, parse_date, parse_time},
    selection::{MAX_QUANTITY, SelectionStore},
    summary::{SummaryError, write_summary},
};
