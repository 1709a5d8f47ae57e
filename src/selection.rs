//! Selection Store

use rustc_hash::FxHashMap;

/// Maximum quantity of a single product per order.
pub const MAX_QUANTITY: u32 = 10;

/// Quantities chosen per product id, clamped to `0..=10`.
///
/// An entry never stores zero: clamping a value down to zero removes it, so
/// absence and a zero quantity are equivalent.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    quantities: FxHashMap<String, u32>,
}

impl SelectionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamps `value` into `0..=10` and stores it, removing the entry when
    /// the clamped value is zero. Never fails; out-of-range input is
    /// clamped rather than rejected.
    pub fn set_quantity(&mut self, id: &str, value: i64) {
        let clamped =
            u32::try_from(value.clamp(0, i64::from(MAX_QUANTITY))).unwrap_or_default();

        if clamped == 0 {
            self.quantities.remove(id);
        } else {
            self.quantities.insert(id.to_owned(), clamped);
        }
    }

    /// Stored quantity for `id`, or zero.
    #[must_use]
    pub fn get(&self, id: &str) -> u32 {
        self.quantities.get(id).copied().unwrap_or(0)
    }

    /// True when at least one product has a positive quantity.
    #[must_use]
    pub fn has_items(&self) -> bool {
        !self.quantities.is_empty()
    }

    /// Number of distinct selected products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Check if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Current contents as (id, quantity) pairs ordered by id, for
    /// persistence.
    #[must_use]
    pub fn serialize(&self) -> Vec<(String, u32)> {
        let mut pairs: Vec<(String, u32)> = self
            .quantities
            .iter()
            .map(|(id, quantity)| (id.clone(), *quantity))
            .collect();

        pairs.sort();

        pairs
    }

    /// Replaces the whole map from previously serialized pairs, applying
    /// the same clamp to each value.
    pub fn restore<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        self.quantities.clear();

        for (id, quantity) in entries {
            self.set_quantity(&id, quantity);
        }
    }
}
