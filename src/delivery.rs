//! Delivery

use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError, iso, iso::Currency};

/// One direction of delivery: customer pickup or a priced zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeliveryMethod {
    /// Customer collects and returns in person; never incurs a fee.
    #[default]
    Pickup,

    /// Delivery to a zone, priced by the [`FeeTable`]. Unknown zone keys are
    /// kept as-is and price at zero.
    Zone(String),
}

impl DeliveryMethod {
    /// Parses a raw form value; empty or `pickup` means customer pickup.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();

        if key.is_empty() || key.eq_ignore_ascii_case("pickup") {
            DeliveryMethod::Pickup
        } else {
            DeliveryMethod::Zone(key.to_owned())
        }
    }

    /// The wire key for this method.
    #[must_use]
    pub fn as_key(&self) -> &str {
        match self {
            DeliveryMethod::Pickup => "pickup",
            DeliveryMethod::Zone(zone) => zone,
        }
    }

    /// Whether this leg asks the customer for address details.
    #[must_use]
    pub fn needs_details(&self) -> bool {
        matches!(self, DeliveryMethod::Zone(_))
    }
}

/// Flat per-leg delivery fees keyed by zone.
///
/// `pickup` and unknown zone keys always resolve to a zero fee.
#[derive(Debug, Clone)]
pub struct FeeTable {
    fees: FxHashMap<String, i64>,
}

impl Default for FeeTable {
    fn default() -> Self {
        let mut fees = FxHashMap::default();

        fees.insert("zone1".to_owned(), 6);
        fees.insert("zone2".to_owned(), 20);
        fees.insert("zone3".to_owned(), 25);

        FeeTable { fees }
    }
}

impl FeeTable {
    /// The standard three-zone table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a zone fee; richer deployments add zones such as
    /// `airport`.
    #[must_use]
    pub fn with_zone(mut self, key: &str, fee: i64) -> Self {
        self.fees.insert(key.to_owned(), fee);

        self
    }

    /// Flat fee for one delivery leg, in euros.
    #[must_use]
    pub fn leg_fee(&self, method: &DeliveryMethod) -> Money<'static, Currency> {
        let major = match method {
            DeliveryMethod::Pickup => 0,
            DeliveryMethod::Zone(zone) => self.fees.get(zone).copied().unwrap_or(0),
        };

        Money::from_major(major, iso::EUR)
    }
}

/// The two delivery legs of an order, each independently priced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliverySelection {
    receive: DeliveryMethod,
    return_leg: DeliveryMethod,
}

impl DeliverySelection {
    /// Creates a selection from both legs.
    #[must_use]
    pub fn new(receive: DeliveryMethod, return_leg: DeliveryMethod) -> Self {
        DeliverySelection {
            receive,
            return_leg,
        }
    }

    /// The receive leg.
    #[must_use]
    pub fn receive(&self) -> &DeliveryMethod {
        &self.receive
    }

    /// The return leg.
    #[must_use]
    pub fn return_leg(&self) -> &DeliveryMethod {
        &self.return_leg
    }

    /// Sets the receive leg.
    pub fn set_receive(&mut self, method: DeliveryMethod) {
        self.receive = method;
    }

    /// Sets the return leg.
    pub fn set_return(&mut self, method: DeliveryMethod) {
        self.return_leg = method;
    }

    /// Sum of both legs' fees. A receive delivery and a separate return
    /// delivery are billed additively, not deduplicated.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the money addition fails.
    pub fn fee(&self, fees: &FeeTable) -> Result<Money<'static, Currency>, MoneyError> {
        fees.leg_fee(&self.receive).add(fees.leg_fee(&self.return_leg))
    }
}
