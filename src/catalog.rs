//! Catalog

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Primary location of the catalog document.
pub const PRIMARY_CATALOG_PATH: &str = "/assets/data/products.json";

/// Fallback location, tried once when the primary path fails to fetch.
pub const FALLBACK_CATALOG_PATH: &str = "assets/data/products.json";

/// Ordered candidate paths for the catalog document; first success wins.
pub const CATALOG_PATHS: [&str; 2] = [PRIMARY_CATALOG_PATH, FALLBACK_CATALOG_PATH];

/// How a product's unit price is applied over a rental window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceType {
    /// Charged once per unit per billable day.
    #[default]
    #[serde(rename = "per-day")]
    PerDay,

    /// Charged once per unit regardless of rental duration.
    #[serde(rename = "flat")]
    Flat,
}

/// Catalog entry for a rentable product.
///
/// Id uniqueness is assumed, not enforced: duplicate ids collide in the
/// selection store and the last write wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Free-text category label.
    #[serde(default)]
    pub category: String,

    /// Per-day unit price in whole euros, when priced per day.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price_per_day: Option<i64>,

    /// Fallback unit price field used when `pricePerDay` is absent.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<i64>,

    /// Pricing mode. Anything other than `flat` reads as per-day.
    #[serde(default, deserialize_with = "lenient_price_type")]
    pub price_type: PriceType,

    /// Bare image filename or path, resolved by [`crate::images`].
    #[serde(default)]
    pub image: String,

    /// Optional external product page.
    #[serde(default)]
    pub link: Option<String>,
}

impl Product {
    /// Unit cost in whole euros: `pricePerDay` when present, else `price`,
    /// else zero.
    #[must_use]
    pub fn unit_price(&self) -> i64 {
        self.price_per_day.or(self.price).unwrap_or(0)
    }
}

/// Errors that can occur while loading or parsing a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document was fetched but is not valid JSON.
    #[error("products JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Every candidate path failed to fetch. This is the only engine failure
    /// surfaced to the user.
    #[error("could not load products; expected at /assets/data/products.json")]
    Unavailable,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<Product>),
    Object {
        #[serde(default)]
        products: Vec<Product>,
    },
}

/// Parses a catalog document: either a top-level array of products or an
/// object with a `products` field. A UTF-8 BOM and surrounding whitespace
/// are stripped before parsing.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] if the cleaned text is not valid JSON.
pub fn parse_catalog(text: &str) -> Result<Vec<Product>, CatalogError> {
    let cleaned = text.trim_start_matches('\u{feff}').trim();

    let document: CatalogDocument = serde_json::from_str(cleaned)?;

    Ok(match document {
        CatalogDocument::List(products) | CatalogDocument::Object { products } => products,
    })
}

/// Loads the catalog through `fetch`, trying each candidate path in order.
///
/// `fetch` returns the document body for a path, or `None` on a non-success
/// status. The first fetched body is parsed; a parse failure surfaces rather
/// than falling through to the next path, matching the fetch-then-parse flow
/// of the storefront.
///
/// # Errors
///
/// Returns [`CatalogError::Unavailable`] when no path fetches, or
/// [`CatalogError::Parse`] when the fetched body is malformed.
pub fn load_catalog<F>(mut fetch: F) -> Result<Vec<Product>, CatalogError>
where
    F: FnMut(&str) -> Option<String>,
{
    for path in CATALOG_PATHS {
        if let Some(body) = fetch(path) {
            if path != PRIMARY_CATALOG_PATH {
                debug!(path, "catalog loaded from fallback path");
            }
            return parse_catalog(&body);
        }
    }

    Err(CatalogError::Unavailable)
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;

    Ok(raw.as_ref().and_then(coerce_int))
}

fn lenient_price_type<'de, D>(deserializer: D) -> Result<PriceType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;

    Ok(match raw.as_ref().and_then(Value::as_str) {
        Some(s) if s.trim().eq_ignore_ascii_case("flat") => PriceType::Flat,
        _ => PriceType::PerDay,
    })
}

/// Lenient integer coercion: numbers truncate toward zero, strings parse
/// their leading digits, anything else is `None`.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .and_then(Decimal::from_f64)
                .and_then(|d| d.trunc().to_i64())
        }),
        Value::String(text) => parse_leading_int(text),
        _ => None,
    }
}

fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim();

    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().ok()?;

    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_top_level_array() -> TestResult {
        let products = parse_catalog(r#"[{"id":"s1","name":"Stroller"}]"#)?;

        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.id.as_str()), Some("s1"));

        Ok(())
    }

    #[test]
    fn parses_products_object() -> TestResult {
        let products = parse_catalog(r#"{"products":[{"id":"a"},{"id":"b"}]}"#)?;

        assert_eq!(products.len(), 2);

        Ok(())
    }

    #[test]
    fn strips_bom_and_whitespace() -> TestResult {
        let products = parse_catalog("\u{feff}  [{\"id\":\"x\"}]  \n")?;

        assert_eq!(products.len(), 1);

        Ok(())
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let result = parse_catalog("{not json");

        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn unit_price_prefers_price_per_day() -> TestResult {
        let products =
            parse_catalog(r#"[{"id":"s1","pricePerDay":15,"price":99}, {"id":"s2","price":30}]"#)?;

        let prices: Vec<i64> = products.iter().map(Product::unit_price).collect();

        assert_eq!(prices, vec![15, 30]);

        Ok(())
    }

    #[test]
    fn missing_prices_default_to_zero() -> TestResult {
        let products = parse_catalog(r#"[{"id":"s1"}]"#)?;

        assert_eq!(products.first().map(Product::unit_price), Some(0));

        Ok(())
    }

    #[test]
    fn string_and_float_prices_coerce() -> TestResult {
        let products = parse_catalog(
            r#"[
                {"id":"a","price":"12"},
                {"id":"b","price":"12.9 per day"},
                {"id":"c","price":3.9},
                {"id":"d","price":"oops"}
            ]"#,
        )?;

        let prices: Vec<i64> = products.iter().map(Product::unit_price).collect();

        assert_eq!(prices, vec![12, 12, 3, 0]);

        Ok(())
    }

    #[test]
    fn unknown_price_type_reads_as_per_day() -> TestResult {
        let products = parse_catalog(
            r#"[
                {"id":"a","priceType":"flat"},
                {"id":"b","priceType":"weekly"},
                {"id":"c"}
            ]"#,
        )?;

        let modes: Vec<PriceType> = products.iter().map(|p| p.price_type).collect();

        assert_eq!(
            modes,
            vec![PriceType::Flat, PriceType::PerDay, PriceType::PerDay]
        );

        Ok(())
    }

    #[test]
    fn load_falls_back_to_second_path() -> TestResult {
        let products = load_catalog(|path| {
            (path == FALLBACK_CATALOG_PATH).then(|| r#"[{"id":"s1"}]"#.to_owned())
        })?;

        assert_eq!(products.len(), 1);

        Ok(())
    }

    #[test]
    fn load_with_no_reachable_path_is_unavailable() {
        let result = load_catalog(|_path| None);

        assert!(matches!(result, Err(CatalogError::Unavailable)));
    }

    #[test]
    fn load_stops_at_first_fetched_body() {
        let mut fetched = Vec::new();

        let result = load_catalog(|path| {
            fetched.push(path.to_owned());
            Some("{broken".to_owned())
        });

        assert!(matches!(result, Err(CatalogError::Parse(_))));
        assert_eq!(fetched, vec![PRIMARY_CATALOG_PATH.to_owned()]);
    }
}
