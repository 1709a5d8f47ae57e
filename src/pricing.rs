//! Pricing

use rust_decimal::RoundingStrategy;
use rusty_money::{Money, MoneyError, iso, iso::Currency};
use thiserror::Error;

use crate::{
    catalog::{PriceType, Product},
    delivery::{DeliverySelection, FeeTable},
    rental::RentalWindow,
    selection::SelectionStore,
};

/// Errors that can occur while building a quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One quoted catalog line with a positive quantity.
#[derive(Debug, Clone)]
pub struct LineItem {
    /// Product id.
    pub id: String,

    /// Product name.
    pub name: String,

    /// Product category label.
    pub category: String,

    /// Selected quantity, already clamped by the selection store.
    pub quantity: u32,

    /// Unit price.
    pub unit_price: Money<'static, Currency>,

    /// Pricing mode the subtotal was computed under.
    pub price_type: PriceType,

    /// `unit × quantity` for flat lines, `unit × quantity × days` for
    /// per-day lines.
    pub subtotal: Money<'static, Currency>,
}

/// A computed cost breakdown for the current selection.
#[derive(Debug, Clone)]
pub struct Quote {
    /// Lines in catalog iteration order, filtered to positive quantities.
    /// Display grouping never reorders these.
    pub line_items: Vec<LineItem>,

    /// Total number of selected units across all lines.
    pub item_count: u32,

    /// Billable days, inclusive of both endpoints.
    pub day_count: i64,

    /// Sum of all line subtotals, before delivery.
    pub items_subtotal: Money<'static, Currency>,

    /// Sum of both delivery legs.
    pub delivery_fee: Money<'static, Currency>,

    /// Items subtotal plus delivery fee.
    pub total: Money<'static, Currency>,
}

/// Builds a quote from the pricing inputs.
///
/// Pure and idempotent: identical inputs always produce an identical quote,
/// including line-item order. Input coercion never fails a computation;
/// products without a usable price simply quote at zero.
///
/// # Errors
///
/// Returns a [`QuoteError`] if money accumulation fails.
pub fn quote(
    catalog: &[Product],
    selection: &SelectionStore,
    window: &RentalWindow,
    delivery: &DeliverySelection,
    fees: &FeeTable,
) -> Result<Quote, QuoteError> {
    let day_count = window.days();

    let mut line_items = Vec::new();
    let mut item_count: u32 = 0;
    let mut items_subtotal = Money::from_major(0, iso::EUR);

    for product in catalog {
        let quantity = selection.get(&product.id);

        if quantity == 0 {
            continue;
        }

        item_count += quantity;

        let unit = product.unit_price();

        let billed_days = match product.price_type {
            PriceType::Flat => 1,
            PriceType::PerDay => day_count,
        };

        let subtotal = Money::from_major(unit * i64::from(quantity) * billed_days, iso::EUR);

        items_subtotal = items_subtotal.add(subtotal)?;

        line_items.push(LineItem {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            quantity,
            unit_price: Money::from_major(unit, iso::EUR),
            price_type: product.price_type,
            subtotal,
        });
    }

    let delivery_fee = delivery.fee(fees)?;
    let total = items_subtotal.add(delivery_fee)?;

    Ok(Quote {
        line_items,
        item_count,
        day_count,
        items_subtotal,
        delivery_fee,
        total,
    })
}

/// Formats an amount for display: a euro sign and the amount rounded to the
/// nearest whole unit, no decimal places.
///
/// Rounding is half-away-from-zero and applies to the displayed figure
/// only; it happens on subtotals and totals, never on intermediate unit
/// prices.
#[must_use]
pub fn format_whole(amount: &Money<'static, Currency>) -> String {
    let whole = amount
        .amount()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    format!("€{whole}")
}
