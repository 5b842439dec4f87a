//! Property-based tests for the filter builder.
//!
//! Absent parameters must never show up as conditions, and the order in
//! which range bounds are supplied must not change the resulting predicate.

use chrono::NaiveDate;
use hearth_core::household::{MemberField, MemberQuery};
use hearth_core::query::{Condition, PredicateBuilder, Scalar};
use hearth_core::transactions::{TransactionField, TransactionFilter};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn arb_date() -> impl Strategy<Value = String> {
    (2000i32..2040, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| format!("{:04}-{:02}-{:02}", y, m, d))
}

/// Absent, empty, or a real value.
fn arb_param<S>(value: S) -> impl Strategy<Value = Option<String>>
where
    S: Strategy<Value = String>,
{
    prop_oneof![Just(None), Just(Some(String::new())), value.prop_map(Some)]
}

fn arb_type() -> impl Strategy<Value = String> {
    prop_oneof![Just("income".to_string()), Just("expense".to_string())]
}

fn arb_income() -> impl Strategy<Value = String> {
    (0u32..500_000, 0u32..100).prop_map(|(whole, cents)| format!("{}.{:02}", whole, cents))
}

fn supplied(param: &Option<String>) -> bool {
    param.as_deref().is_some_and(|p| !p.is_empty())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn absent_parameters_are_omitted(
        start in arb_param(arb_date()),
        end in arb_param(arb_date()),
        kind in arb_param(arb_type()),
        category in arb_param("[A-Za-z]{1,12}"),
    ) {
        let filter = TransactionFilter {
            start_date: start.clone(),
            end_date: end.clone(),
            transaction_type: kind.clone(),
            category: category.clone(),
            member_id: None,
        };
        let predicate = filter.to_predicate().unwrap();

        prop_assert_eq!(
            predicate.get(TransactionField::Date).is_some(),
            supplied(&start) || supplied(&end)
        );
        prop_assert_eq!(predicate.get(TransactionField::Type).is_some(), supplied(&kind));
        prop_assert_eq!(predicate.get(TransactionField::Category).is_some(), supplied(&category));
        prop_assert!(predicate.get(TransactionField::MemberId).is_none());

        if let Some(Condition::Range { gte, lte }) = predicate.get(TransactionField::Date) {
            prop_assert_eq!(gte.is_some(), supplied(&start));
            prop_assert_eq!(lte.is_some(), supplied(&end));
        }
    }

    #[test]
    fn date_bounds_merge_regardless_of_order(start in arb_date(), end in arb_date()) {
        let start_first = PredicateBuilder::new()
            .date_from(TransactionField::Date, Some(&start)).unwrap()
            .date_to(TransactionField::Date, Some(&end)).unwrap()
            .build();
        let end_first = PredicateBuilder::new()
            .date_to(TransactionField::Date, Some(&end)).unwrap()
            .date_from(TransactionField::Date, Some(&start)).unwrap()
            .build();

        prop_assert_eq!(&start_first, &end_first);
        prop_assert_eq!(start_first.len(), 1);

        let expected = Condition::Range {
            gte: Some(Scalar::Date(NaiveDate::parse_from_str(&start, "%Y-%m-%d").unwrap())),
            lte: Some(Scalar::Date(NaiveDate::parse_from_str(&end, "%Y-%m-%d").unwrap())),
        };
        prop_assert_eq!(start_first.get(TransactionField::Date), Some(&expected));
    }

    #[test]
    fn income_bounds_merge_regardless_of_order(min in arb_income(), max in arb_income()) {
        let min_first = PredicateBuilder::new()
            .amount_from(MemberField::Income, Some(&min)).unwrap()
            .amount_to(MemberField::Income, Some(&max)).unwrap()
            .build();
        let max_first = PredicateBuilder::new()
            .amount_to(MemberField::Income, Some(&max)).unwrap()
            .amount_from(MemberField::Income, Some(&min)).unwrap()
            .build();
        prop_assert_eq!(&min_first, &max_first);

        let via_query = MemberQuery {
            min_income: Some(min),
            max_income: Some(max),
            income_stream: None,
        }
        .to_predicate()
        .unwrap();
        prop_assert_eq!(via_query, min_first);
    }
}
