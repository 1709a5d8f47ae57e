//! Order Serialization

use rust_decimal::prelude::ToPrimitive;
use rusty_money::{Money, iso::Currency};
use serde::Serialize;

use crate::{
    catalog::PriceType,
    delivery::DeliverySelection,
    pricing::Quote,
    rental::RentalWindow,
};

/// One line of the order payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadItem {
    /// Product id.
    pub id: String,

    /// Product name.
    pub name: String,

    /// Product category.
    pub category: String,

    /// Selected quantity.
    pub qty: u32,

    /// Unit price in euros.
    pub unit_price: i64,

    /// Pricing mode applied to this line.
    pub price_type: PriceType,

    /// Computed line subtotal in euros.
    pub subtotal: i64,
}

/// Canonical, submission-ready projection of an order.
///
/// Recomputed from the live state on every relevant change and never
/// mutated directly. Monetary fields carry the unrounded sums that the
/// displayed (rounded) figures derive from, so the two can never drift.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    /// Rental start date, ISO calendar form.
    pub start_date: String,

    /// Rental end date, ISO calendar form.
    pub end_date: String,

    /// Billable days, inclusive.
    pub days_charged: i64,

    /// Receive leg: `pickup` or a zone key.
    pub receive_method: String,

    /// Return leg: `pickup` or a zone key.
    pub return_method: String,

    /// Time of day the rental is received, when chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receive_time: Option<String>,

    /// Time of day the rental is returned, when chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_time: Option<String>,

    /// Free-text delivery details from the form.
    pub delivery_details: String,

    /// Selected lines, in catalog iteration order.
    pub items: Vec<PayloadItem>,

    /// Combined fee for both delivery legs, in euros.
    pub delivery_fee: i64,

    /// Items plus delivery, in euros.
    pub estimated_total: i64,
}

impl OrderPayload {
    /// Projects a quote and the raw form fields into a flat payload.
    #[must_use]
    pub fn new(
        quote: &Quote,
        window: &RentalWindow,
        delivery: &DeliverySelection,
        delivery_details: &str,
    ) -> Self {
        let items = quote
            .line_items
            .iter()
            .map(|line| PayloadItem {
                id: line.id.clone(),
                name: line.name.clone(),
                category: line.category.clone(),
                qty: line.quantity,
                unit_price: major_units(&line.unit_price),
                price_type: line.price_type,
                subtotal: major_units(&line.subtotal),
            })
            .collect();

        OrderPayload {
            start_date: window.start().to_string(),
            end_date: window.end().to_string(),
            days_charged: quote.day_count,
            receive_method: delivery.receive().as_key().to_owned(),
            return_method: delivery.return_leg().as_key().to_owned(),
            receive_time: window.receive_time().map(|time| time.to_string()),
            return_time: window.return_time().map(|time| time.to_string()),
            delivery_details: delivery_details.to_owned(),
            items,
            delivery_fee: major_units(&quote.delivery_fee),
            estimated_total: major_units(&quote.total),
        }
    }

    /// JSON document for the hidden form field.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text body for a `mailto:` submission.
    #[must_use]
    pub fn mail_body(&self) -> String {
        let items = if self.items.is_empty() {
            "(none)".to_owned()
        } else {
            self.items
                .iter()
                .map(|item| format!("- {}\u{d7} {}", item.qty, item.name))
                .collect::<Vec<String>>()
                .join("\n")
        };

        [
            "Order request from website".to_owned(),
            String::new(),
            format!("Start date: {}", self.start_date),
            format!("End date: {}", self.end_date),
            format!("Days: {}", self.days_charged),
            format!("Receive: {}", self.receive_method),
            format!("Return: {}", self.return_method),
            String::new(),
            "Items:".to_owned(),
            items,
            String::new(),
            format!("Shown total: \u{20ac}{}", self.estimated_total),
            String::new(),
            "Please reply with availability and next steps.".to_owned(),
        ]
        .join("\n")
    }
}

/// Whole-euro value of an amount built from whole-euro inputs.
fn major_units(amount: &Money<'static, Currency>) -> i64 {
    amount.amount().to_i64().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        catalog::parse_catalog,
        delivery::{DeliveryMethod, FeeTable},
        pricing,
        rental::parse_time,
        selection::SelectionStore,
    };

    use super::*;

    fn fixture() -> TestResult<(Quote, RentalWindow, DeliverySelection)> {
        let catalog = parse_catalog(
            r#"[
                {"id":"s1","name":"Stroller","category":"Strollers","pricePerDay":15},
                {"id":"c1","name":"Car Seat","category":"Car Seats","price":30,"priceType":"flat"}
            ]"#,
        )?;

        let mut selection = SelectionStore::new();
        selection.set_quantity("s1", 2);
        selection.set_quantity("c1", 1);

        let mut window = RentalWindow::new(date(2024, 6, 1), date(2024, 6, 3));
        window.set_receive_time(parse_time("10:00"));

        let delivery = DeliverySelection::new(
            DeliveryMethod::from_key("zone1"),
            DeliveryMethod::Pickup,
        );

        let quote = pricing::quote(&catalog, &selection, &window, &delivery, &FeeTable::new())?;

        Ok((quote, window, delivery))
    }

    #[test]
    fn payload_carries_every_monetary_figure() -> TestResult {
        let (quote, window, delivery) = fixture()?;

        let payload = OrderPayload::new(&quote, &window, &delivery, "Ring the bell");

        assert_eq!(payload.days_charged, 3);
        assert_eq!(payload.items.len(), 2);
        assert_eq!(payload.delivery_fee, 6);
        assert_eq!(payload.estimated_total, 126);
        assert_eq!(payload.receive_method, "zone1");
        assert_eq!(payload.return_method, "pickup");
        assert_eq!(payload.delivery_details, "Ring the bell");
        assert_eq!(payload.receive_time.as_deref(), Some("10:00:00"));
        assert_eq!(payload.return_time, None);

        Ok(())
    }

    #[test]
    fn payload_subtotals_match_line_math() -> TestResult {
        let (quote, window, delivery) = fixture()?;

        let payload = OrderPayload::new(&quote, &window, &delivery, "");

        let subtotals: Vec<i64> = payload.items.iter().map(|item| item.subtotal).collect();

        // 2 × 15 × 3 days, then 1 × 30 flat.
        assert_eq!(subtotals, vec![90, 30]);

        Ok(())
    }

    #[test]
    fn json_uses_the_wire_field_names() -> TestResult {
        let (quote, window, delivery) = fixture()?;

        let payload = OrderPayload::new(&quote, &window, &delivery, "");
        let json: serde_json::Value = serde_json::from_str(&payload.to_json()?)?;

        assert_eq!(json["startDate"], "2024-06-01");
        assert_eq!(json["daysCharged"], 3);
        assert_eq!(json["receiveMethod"], "zone1");
        assert_eq!(json["estimatedTotal"], 126);
        assert_eq!(json["items"][0]["unitPrice"], 15);
        assert_eq!(json["items"][0]["priceType"], "per-day");
        assert_eq!(json["items"][1]["priceType"], "flat");

        Ok(())
    }

    #[test]
    fn mail_body_lists_items_and_shown_total() -> TestResult {
        let (quote, window, delivery) = fixture()?;

        let payload = OrderPayload::new(&quote, &window, &delivery, "");
        let body = payload.mail_body();

        assert!(body.contains("- 2\u{d7} Stroller"), "body: {body}");
        assert!(body.contains("Shown total: \u{20ac}126"), "body: {body}");
        assert!(body.contains("Receive: zone1"), "body: {body}");

        Ok(())
    }

    #[test]
    fn empty_selection_renders_none_marker() -> TestResult {
        let catalog = parse_catalog("[]")?;
        let window = RentalWindow::new(date(2024, 6, 1), date(2024, 6, 2));
        let delivery = DeliverySelection::default();

        let quote = pricing::quote(
            &catalog,
            &SelectionStore::new(),
            &window,
            &delivery,
            &FeeTable::new(),
        )?;

        let payload = OrderPayload::new(&quote, &window, &delivery, "");

        assert!(payload.mail_body().contains("(none)"));

        Ok(())
    }
}
