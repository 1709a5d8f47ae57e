//! Utils

use clap::Parser;

/// Arguments for the quote demo
#[derive(Debug, Parser)]
pub struct DemoQuoteArgs {
    /// Rental start date (YYYY-MM-DD)
    #[clap(long, default_value = "2026-06-01")]
    pub start: String,

    /// Rental end date (YYYY-MM-DD)
    #[clap(long, default_value = "2026-06-03")]
    pub end: String,

    /// Receive leg: pickup or a zone key (zone1, zone2, zone3)
    #[clap(long, default_value = "pickup")]
    pub receive: String,

    /// Return leg: pickup or a zone key
    #[clap(long = "return", default_value = "pickup")]
    pub return_method: String,

    /// Items to select, as id=qty pairs
    #[clap(short, long)]
    pub item: Vec<String>,
}
