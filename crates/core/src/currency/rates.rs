//! In-memory exchange rate table.
//!
//! Every stored pair has its reverse stored alongside it: adding A→B at rate r
//! also writes B→A at 1/r. Reverse rates are never derived at lookup time.

use std::collections::BTreeMap;

use hopfx_shared::Currency;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::error::ConversionError;
use super::rate::Rate;

/// Base pairs loaded into every new table. Reverses are generated on insert.
const SEED_RATES: [(&str, &str, Decimal); 4] = [
    ("USD", "ILS", Decimal::from_parts(32, 0, 0, false, 1)),
    ("EUR", "ILS", Decimal::from_parts(35, 0, 0, false, 1)),
    ("GBP", "ILS", Decimal::from_parts(43, 0, 0, false, 1)),
    ("EUR", "USD", Decimal::from_parts(11, 0, 0, false, 1)),
];

/// Directed exchange rates keyed by source, then target currency.
///
/// Both levels are ordered maps, so every scan over currencies runs in
/// lexicographic order of the currency code.
#[derive(Debug, Clone)]
pub struct RateTable {
    rates: BTreeMap<Currency, BTreeMap<Currency, Rate>>,
}

impl RateTable {
    /// Creates a table holding the seed rates and their reverses.
    #[must_use]
    pub fn new() -> Self {
        let mut table = Self::empty();
        for (source, target, value) in SEED_RATES {
            let rate = Rate::from_positive(value);
            let inverse = Rate::from_positive(Decimal::ONE / value);
            table.insert_pair(Currency::from(source), Currency::from(target), rate, inverse);
        }
        table
    }

    /// Creates a table with no rates.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    /// Returns the stored rate for the exact ordered pair.
    pub fn get_rate(&self, source: &Currency, target: &Currency) -> Option<Rate> {
        self.rates.get(source)?.get(target).copied()
    }

    /// Finds a currency `X` with both `source → X` and `X → target` stored.
    ///
    /// Candidates are the currencies that appear as the source of any stored
    /// pair, tried in lexicographic order; the first match wins.
    pub fn find_intermediate(&self, source: &Currency, target: &Currency) -> Option<&Currency> {
        self.rates.keys().find(|candidate| {
            self.get_rate(source, candidate).is_some() && self.get_rate(candidate, target).is_some()
        })
    }

    /// Stores `source → target` at `rate` and `target → source` at `1 / rate`.
    ///
    /// Existing entries for either direction are overwritten.
    pub fn add_rate(
        &mut self,
        source: Currency,
        target: Currency,
        rate: Rate,
    ) -> Result<(), ConversionError> {
        if source == target {
            warn!(currency = %source, rate = %rate, "Rejected self-pair exchange rate");
            return Err(ConversionError::InvalidRate(format!(
                "cannot add a rate from {source} to itself"
            )));
        }

        let inverse = rate.inverse().inspect_err(|err| {
            warn!(from = %source, to = %target, rate = %rate, error = %err, "Rejected exchange rate");
        })?;

        debug!(from = %source, to = %target, rate = %rate, inverse = %inverse, "Exchange rate stored");
        self.insert_pair(source, target, rate, inverse);
        Ok(())
    }

    /// Number of stored directed pairs.
    pub fn len(&self) -> usize {
        self.rates.values().map(BTreeMap::len).sum()
    }

    /// Returns true if no pairs are stored.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Currencies that appear as the source of a stored pair, in order.
    pub fn currencies(&self) -> impl Iterator<Item = &Currency> {
        self.rates.keys()
    }

    /// All stored pairs ordered by source, then target.
    pub fn pairs(&self) -> impl Iterator<Item = (&Currency, &Currency, Rate)> {
        self.rates.iter().flat_map(|(source, targets)| {
            targets
                .iter()
                .map(move |(target, rate)| (source, target, *rate))
        })
    }

    fn insert_pair(&mut self, source: Currency, target: Currency, rate: Rate, inverse: Rate) {
        self.rates
            .entry(target.clone())
            .or_default()
            .insert(source.clone(), inverse);
        self.rates.entry(source).or_default().insert(target, rate);
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new()
    }
}
