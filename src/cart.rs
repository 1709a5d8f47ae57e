//! Cart

use std::{fs, io, path::PathBuf};

use jiff::civil::{Date, Time};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    catalog::Product,
    delivery::{DeliveryMethod, DeliverySelection, FeeTable},
    grouping::{self, CategoryGroup},
    order::OrderPayload,
    pricing::{self, Quote, QuoteError},
    rental::{RentalWindow, parse_date},
    selection::SelectionStore,
};

/// Storage key under which cart state is persisted.
pub const STORAGE_KEY: &str = "sbs_cart_v1";

/// Errors surfaced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Submission was attempted with no items selected. This is the only
    /// user action the engine rejects rather than coercing.
    #[error("please add at least one item to your order")]
    EmptySelection,

    /// Wrapped quote computation error.
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

/// Best-effort durable storage for cart state, one JSON document per key.
///
/// The cart swallows every storage failure: an unavailable store degrades
/// the session to in-memory state with no user-visible signal.
pub trait CartStorage {
    /// Reads the stored document for `key`, if any. Read problems are
    /// indistinguishable from absent state.
    fn read(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`. The error is reported so the cart can
    /// log it, then dropped.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] when the write fails.
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
}

impl<S: CartStorage + ?Sized> CartStorage for &mut S {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        (**self).write(key, value)
    }
}

/// File-backed storage: each key is a JSON file in one directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CartStorage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }
}

/// In-memory storage for tests and sessions without a durable store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: FxHashMap<String, String>,
}

impl CartStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}

/// Persisted cart state.
///
/// The legacy single-leg shape stored one `delivery` key; it restores into
/// the receive leg so an old saved cart keeps its fee instead of doubling
/// it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartState {
    #[serde(default)]
    sel: Vec<(String, i64)>,

    #[serde(default)]
    start: String,

    #[serde(default)]
    end: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    delivery: String,

    #[serde(default)]
    receive_method: String,

    #[serde(default)]
    return_method: String,
}

/// Stateful shell around the pure pricing pipeline.
///
/// The catalog snapshot is immutable; the selection, rental window and
/// delivery legs are the only mutable state and change only through the
/// setters here. Every setter runs exactly one synchronous recompute and
/// one best-effort persistence write, so the latest quote is always in step
/// with the state.
#[derive(Debug)]
pub struct Cart<S> {
    catalog: Vec<Product>,
    selection: SelectionStore,
    window: RentalWindow,
    delivery: DeliverySelection,
    fees: FeeTable,
    delivery_details: String,
    storage: S,
    latest: Quote,
}

impl<S: CartStorage> Cart<S> {
    /// Creates a cart over a catalog snapshot, restoring any previously
    /// persisted state from `storage`. Corrupt or absent state restores as
    /// empty, never as an error.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the initial quote cannot be computed.
    pub fn new(
        catalog: Vec<Product>,
        window: RentalWindow,
        fees: FeeTable,
        storage: S,
    ) -> Result<Self, CartError> {
        let mut cart = Cart {
            latest: pricing::quote(
                &catalog,
                &SelectionStore::new(),
                &window,
                &DeliverySelection::default(),
                &fees,
            )?,
            catalog,
            selection: SelectionStore::new(),
            window,
            delivery: DeliverySelection::default(),
            fees,
            delivery_details: String::new(),
            storage,
        };

        cart.restore();
        cart.refresh()?;

        Ok(cart)
    }

    /// Sets the quantity for `id`, clamped into `0..=10`.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the recompute fails; the set itself never
    /// rejects input.
    pub fn set_quantity(&mut self, id: &str, value: i64) -> Result<&Quote, CartError> {
        self.selection.set_quantity(id, value);

        self.refresh()
    }

    /// Adds one unit of a known product, saturating at the per-product
    /// maximum. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the recompute fails.
    pub fn add_one(&mut self, id: &str) -> Result<&Quote, CartError> {
        if self.catalog.iter().any(|product| product.id == id) {
            let next = i64::from(self.selection.get(id)) + 1;
            self.selection.set_quantity(id, next);
        }

        self.refresh()
    }

    /// Sets the rental start date, dragging the end along when needed.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the recompute fails.
    pub fn set_start(&mut self, start: Date) -> Result<&Quote, CartError> {
        self.window.set_start(start);

        self.refresh()
    }

    /// Sets the rental end date, clamped to no earlier than the start.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the recompute fails.
    pub fn set_end(&mut self, end: Date) -> Result<&Quote, CartError> {
        self.window.set_end(end);

        self.refresh()
    }

    /// Sets the receive time.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the recompute fails.
    pub fn set_receive_time(&mut self, time: Option<Time>) -> Result<&Quote, CartError> {
        self.window.set_receive_time(time);

        self.refresh()
    }

    /// Sets the return time.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the recompute fails.
    pub fn set_return_time(&mut self, time: Option<Time>) -> Result<&Quote, CartError> {
        self.window.set_return_time(time);

        self.refresh()
    }

    /// Sets the receive delivery leg.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the recompute fails.
    pub fn set_receive_method(&mut self, method: DeliveryMethod) -> Result<&Quote, CartError> {
        self.delivery.set_receive(method);

        self.refresh()
    }

    /// Sets the return delivery leg.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the recompute fails.
    pub fn set_return_method(&mut self, method: DeliveryMethod) -> Result<&Quote, CartError> {
        self.delivery.set_return(method);

        self.refresh()
    }

    /// Sets the free-text delivery details carried on the payload.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the recompute fails.
    pub fn set_delivery_details(&mut self, details: &str) -> Result<&Quote, CartError> {
        self.delivery_details = details.to_owned();

        self.refresh()
    }

    /// The latest computed quote.
    #[must_use]
    pub fn quote(&self) -> &Quote {
        &self.latest
    }

    /// The catalog snapshot.
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// The current rental window.
    #[must_use]
    pub fn window(&self) -> &RentalWindow {
        &self.window
    }

    /// The current delivery legs.
    #[must_use]
    pub fn delivery(&self) -> &DeliverySelection {
        &self.delivery
    }

    /// The fee table in effect.
    #[must_use]
    pub fn fees(&self) -> &FeeTable {
        &self.fees
    }

    /// The catalog grouped for display. Grouping never changes line-item
    /// order in the quote.
    #[must_use]
    pub fn display_groups(&self) -> Vec<CategoryGroup<'_>> {
        grouping::group_catalog(&self.catalog)
    }

    /// The current submission payload, projected from the latest quote.
    #[must_use]
    pub fn payload(&self) -> OrderPayload {
        OrderPayload::new(&self.latest, &self.window, &self.delivery, &self.delivery_details)
    }

    /// Validates the cart and produces the submission payload.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptySelection`] when no items are selected.
    pub fn submit(&self) -> Result<OrderPayload, CartError> {
        if !self.selection.has_items() {
            return Err(CartError::EmptySelection);
        }

        Ok(self.payload())
    }

    fn refresh(&mut self) -> Result<&Quote, CartError> {
        self.latest = pricing::quote(
            &self.catalog,
            &self.selection,
            &self.window,
            &self.delivery,
            &self.fees,
        )?;

        self.persist();

        Ok(&self.latest)
    }

    fn persist(&mut self) {
        let state = CartState {
            sel: self
                .selection
                .serialize()
                .into_iter()
                .map(|(id, quantity)| (id, i64::from(quantity)))
                .collect(),
            start: self.window.start().to_string(),
            end: self.window.end().to_string(),
            delivery: String::new(),
            receive_method: self.delivery.receive().as_key().to_owned(),
            return_method: self.delivery.return_leg().as_key().to_owned(),
        };

        match serde_json::to_string(&state) {
            Ok(document) => {
                if let Err(error) = self.storage.write(STORAGE_KEY, &document) {
                    warn!(%error, "cart state write failed; continuing in memory");
                }
            }
            Err(error) => warn!(%error, "cart state serialization failed"),
        }
    }

    fn restore(&mut self) {
        let Some(raw) = self.storage.read(STORAGE_KEY) else {
            return;
        };

        let Ok(state) = serde_json::from_str::<CartState>(&raw) else {
            debug!("discarding corrupt cart state");
            return;
        };

        self.selection.restore(state.sel);

        if let Some(start) = parse_date(&state.start) {
            self.window.set_start(start);
        }

        if let Some(end) = parse_date(&state.end) {
            self.window.set_end(end);
        }

        if state.receive_method.is_empty() {
            if !state.delivery.is_empty() {
                self.delivery
                    .set_receive(DeliveryMethod::from_key(&state.delivery));
            }
        } else {
            self.delivery
                .set_receive(DeliveryMethod::from_key(&state.receive_method));
        }

        if !state.return_method.is_empty() {
            self.delivery
                .set_return(DeliveryMethod::from_key(&state.return_method));
        }
    }
}
