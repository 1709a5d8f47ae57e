//! Quote Demo
//!
//! Builds a cart from the demo catalog, applies the selection from the
//! command line and prints the summary table, the order payload JSON and
//! the mail body.
//!
//! Use `--start`/`--end` for the rental dates
//! Use `--receive`/`--return` for the delivery legs (pickup or a zone key)
//! Use `-i id=qty` (repeatable) to select items, e.g. `-i yoyo2=2`

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use strollby::{
    cart::{Cart, MemoryStorage},
    delivery::{DeliveryMethod, FeeTable},
    fixtures,
    rental::{RentalWindow, parse_date},
    summary,
    utils::DemoQuoteArgs,
};

/// Quote Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoQuoteArgs::parse();

    let catalog = fixtures::demo_catalog()?;

    let start = parse_date(&args.start).context("invalid start date")?;
    let end = parse_date(&args.end).context("invalid end date")?;

    let mut cart = Cart::new(
        catalog,
        RentalWindow::new(start, end),
        FeeTable::new(),
        MemoryStorage::default(),
    )?;

    cart.set_receive_method(DeliveryMethod::from_key(&args.receive))?;
    cart.set_return_method(DeliveryMethod::from_key(&args.return_method))?;

    for pair in &args.item {
        let Some((id, quantity)) = pair.split_once('=') else {
            continue;
        };

        cart.set_quantity(id, quantity.trim().parse().unwrap_or(0))?;
    }

    summary::write_summary(&mut io::stdout(), cart.quote(), cart.delivery(), cart.fees())?;

    let payload = cart.submit()?;

    println!("\n{}", payload.to_json()?);
    println!("\n{}", payload.mail_body());

    Ok(())
}
