//! Fixtures

use crate::catalog::{self, CatalogError, Product};

/// Demo catalog in the shape served by the storefront's data endpoint,
/// including a `Delivery` category row that display grouping must skip.
const DEMO_CATALOG_JSON: &str = r#"{
  "products": [
    {
      "id": "yoyo2",
      "name": "Babyzen YOYO2",
      "category": "Strollers",
      "pricePerDay": 15,
      "priceType": "per-day",
      "image": "yoyo2.png",
      "link": "https://www.babyzen.com/"
    },
    {
      "id": "bee6",
      "name": "Bugaboo Bee 6",
      "category": "Strollers",
      "pricePerDay": 18,
      "priceType": "per-day",
      "image": "bee6.webp"
    },
    {
      "id": "double-city",
      "name": "City Mini GT2 Double",
      "category": "Strollers",
      "pricePerDay": "22",
      "image": "citymini-double.png"
    },
    {
      "id": "travelcot",
      "name": "BabyBjorn Travel Cot",
      "category": "Sleeping Cot",
      "pricePerDay": 8,
      "image": "products/travelcot.png"
    },
    {
      "id": "maxicosi",
      "name": "Maxi-Cosi CabrioFix",
      "category": "Car Seats",
      "pricePerDay": 7,
      "image": "cabriofix.png"
    },
    {
      "id": "trippTrapp",
      "name": "Stokke Tripp Trapp",
      "category": "High Chairs",
      "pricePerDay": 5,
      "image": "products/TrippTrapp1.png"
    },
    {
      "id": "linens",
      "name": "Cot Linen Set",
      "category": "Sleeping Cot",
      "price": 12,
      "priceType": "flat",
      "image": "linens.png"
    },
    {
      "id": "carrier",
      "name": "Ergobaby Omni 360",
      "category": "Carriers",
      "pricePerDay": 6,
      "image": "/assets/images/omni360.webp"
    },
    {
      "id": "zone1-info",
      "name": "Delivery Zone 1",
      "category": "Delivery",
      "price": 6,
      "priceType": "flat",
      "image": ""
    }
  ]
}"#;

/// Demo catalog used by the demo binary and integration tests.
///
/// # Errors
///
/// Returns a [`CatalogError`] if the embedded document fails to parse.
pub fn demo_catalog() -> Result<Vec<Product>, CatalogError> {
    catalog::parse_catalog(DEMO_CATALOG_JSON)
}
