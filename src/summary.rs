//! Order Summary

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::PriceType,
    delivery::{DeliveryMethod, DeliverySelection, FeeTable},
    pricing::{Quote, format_whole},
};

/// Errors that can occur when rendering an order summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Writes a cost-breakdown table for the quote to `out`.
///
/// One row per selected line, one row per priced delivery leg, then the
/// days-charged and rounded total lines beneath the table.
///
/// # Errors
///
/// Returns [`SummaryError::IO`] if writing to `out` fails.
pub fn write_summary(
    out: &mut impl io::Write,
    quote: &Quote,
    delivery: &DeliverySelection,
    fees: &FeeTable,
) -> Result<(), SummaryError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Unit", "Subtotal"]);

    for line in &quote.line_items {
        let unit = match line.price_type {
            PriceType::Flat => format!("{} flat", format_whole(&line.unit_price)),
            PriceType::PerDay => format!("{} / day", format_whole(&line.unit_price)),
        };

        builder.push_record([
            line.name.clone(),
            line.quantity.to_string(),
            unit,
            format_whole(&line.subtotal),
        ]);
    }

    push_leg_row(&mut builder, "Delivery receive", delivery.receive(), fees);
    push_leg_row(&mut builder, "Delivery return", delivery.return_leg(), fees);

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..4), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| SummaryError::IO)?;
    writeln!(out, "Days charged: {}", quote.day_count).map_err(|_err| SummaryError::IO)?;
    writeln!(out, "Total: {}", format_whole(&quote.total)).map_err(|_err| SummaryError::IO)?;

    Ok(())
}

fn push_leg_row(builder: &mut Builder, label: &str, method: &DeliveryMethod, fees: &FeeTable) {
    if let DeliveryMethod::Zone(zone) = method {
        builder.push_record([
            format!("{label} ({})", zone.to_uppercase()),
            String::new(),
            "flat".to_owned(),
            format_whole(&fees.leg_fee(method)),
        ]);
    }
}
