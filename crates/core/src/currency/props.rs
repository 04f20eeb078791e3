//! Property-based tests for rate lookup and conversion.

use proptest::prelude::*;
use rust_decimal::Decimal;

use hopfx_shared::Currency;

use super::converter::{ConversionPath, Converter};
use super::error::ConversionError;
use super::rate::Rate;
use super::rates::RateTable;

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate zero or negative amounts.
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..=0i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Any currency code, seeded or not.
fn currency() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just("USD"),
        Just("ILS"),
        Just("EUR"),
        Just("GBP"),
        Just("JPY"),
        Just("XYZ"),
    ]
    .prop_map(Currency::from)
}

/// One of the four seeded base pairs with its rate.
fn seeded_pair() -> impl Strategy<Value = (Currency, Currency)> {
    prop_oneof![
        Just(("USD", "ILS")),
        Just(("EUR", "ILS")),
        Just(("GBP", "ILS")),
        Just(("EUR", "USD")),
    ]
    .prop_map(|(source, target)| (Currency::from(source), Currency::from(target)))
}

fn relative_diff(actual: Decimal, expected: Decimal) -> Decimal {
    ((actual - expected) / expected).abs()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converting a currency to itself returns the amount untouched.
    #[test]
    fn prop_identity_is_exact(code in currency(), amount in positive_amount()) {
        let table = RateTable::new();
        let result = Converter::new(&table).convert(&code, &code, amount).unwrap();
        prop_assert_eq!(result.converted.amount, amount);
        prop_assert_eq!(result.path, ConversionPath::Identity);
    }

    /// Zero and negative amounts fail regardless of currencies.
    #[test]
    fn prop_non_positive_amount_fails(
        source in currency(),
        target in currency(),
        amount in non_positive_amount(),
    ) {
        let table = RateTable::new();
        prop_assert_eq!(
            Converter::new(&table).convert(&source, &target, amount),
            Err(ConversionError::InvalidAmount)
        );
    }

    /// A seeded pair converts at its rate, and converting back recovers the amount.
    #[test]
    fn prop_direct_round_trip((source, target) in seeded_pair(), amount in positive_amount()) {
        let table = RateTable::new();
        let converter = Converter::new(&table);
        let rate = table.get_rate(&source, &target).unwrap();

        let there = converter.convert(&source, &target, amount).unwrap();
        prop_assert_eq!(there.converted.amount, amount * rate.value());

        let back = converter.convert(&target, &source, there.converted.amount).unwrap();
        prop_assert!(relative_diff(back.converted.amount, amount) < Decimal::new(1, 12));
    }

    /// Two-step results exceed the commission-free chain by exactly the commission.
    #[test]
    fn prop_two_step_commission_factor(amount in positive_amount()) {
        let table = RateTable::new();
        let result = Converter::new(&table)
            .convert(&Currency::from("GBP"), &Currency::from("EUR"), amount)
            .unwrap();

        let ConversionPath::TwoStep { to_intermediate, to_target, .. } = result.path else {
            return Err(TestCaseError::fail("expected a two-step path"));
        };
        let chain = amount * to_intermediate.value() * to_target.value();
        let expected = chain * Decimal::new(101, 2);
        prop_assert!(relative_diff(result.converted.amount, expected) < Decimal::new(1, 12));
    }

    /// Adding a rate stores its exact reciprocal in the other direction.
    #[test]
    fn prop_add_rate_stores_reverse(value in positive_rate()) {
        let mut table = RateTable::new();
        let (jpy, usd) = (Currency::from("JPY"), Currency::from("USD"));
        table.add_rate(jpy.clone(), usd.clone(), Rate::new(value).unwrap()).unwrap();

        prop_assert_eq!(table.get_rate(&jpy, &usd).unwrap().value(), value);
        prop_assert_eq!(table.get_rate(&usd, &jpy).unwrap().value(), Decimal::ONE / value);
    }

    /// Lookups and conversions leave the table and their results unchanged.
    #[test]
    fn prop_lookups_are_idempotent(
        source in currency(),
        target in currency(),
        amount in positive_amount(),
    ) {
        let table = RateTable::new();
        let converter = Converter::new(&table);

        let rate = table.get_rate(&source, &target);
        let first = converter.convert(&source, &target, amount);
        prop_assert_eq!(table.get_rate(&source, &target), rate);
        prop_assert_eq!(converter.convert(&source, &target, amount), first);
        prop_assert_eq!(table.len(), 8);
    }

    /// Whatever intermediate is chosen, both legs are stored rates.
    #[test]
    fn prop_intermediate_is_a_valid_hop(source in currency(), target in currency()) {
        let table = RateTable::new();
        if let Some(via) = table.find_intermediate(&source, &target) {
            prop_assert!(table.get_rate(&source, via).is_some());
            prop_assert!(table.get_rate(via, &target).is_some());
        }
    }
}
