//! Exact-decimal folds over matched amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sums every amount. An empty input sums to zero.
pub fn sum_amounts<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().fold(Decimal::ZERO, |acc, a| acc + a)
}

/// Renders a total as a plain decimal string without trailing zeros.
pub fn format_total(total: Decimal) -> String {
    if total.is_zero() {
        "0".to_string()
    } else {
        total.normalize().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTotal {
    /// `None` collects rows whose grouping field is unset.
    pub group: Option<String>,
    #[serde(with = "crate::utils::decimal_serde::decimal_serde")]
    pub total: Decimal,
}

/// Partitions `(group, amount)` rows and sums each partition.
///
/// Partitions come back sorted by descending total. Equal totals keep the
/// order in which their group was first seen.
pub fn group_amounts<I>(rows: I) -> Vec<GroupTotal>
where
    I: IntoIterator<Item = (Option<String>, Decimal)>,
{
    let mut groups: Vec<GroupTotal> = Vec::new();
    for (group, amount) in rows {
        match groups.iter_mut().find(|g| g.group == group) {
            Some(existing) => existing.total += amount,
            None => groups.push(GroupTotal {
                group,
                total: amount,
            }),
        }
    }
    // sort_by is stable
    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(group: &str, amount: Decimal) -> (Option<String>, Decimal) {
        (Some(group.to_string()), amount)
    }

    #[test]
    fn empty_sum_formats_as_zero() {
        assert_eq!(format_total(sum_amounts(Vec::new())), "0");
    }

    #[test]
    fn sum_is_exact() {
        let total = sum_amounts([dec!(10), dec!(5.5)]);
        assert_eq!(format_total(total), "15.5");
        assert_eq!(format_total(sum_amounts([dec!(0.1), dec!(0.2)])), "0.3");
    }

    #[test]
    fn groups_sorted_by_descending_total() {
        let grouped = group_amounts([
            row("food", dec!(10)),
            row("rent", dec!(100)),
            row("food", dec!(5)),
        ]);
        assert_eq!(
            grouped,
            vec![
                GroupTotal {
                    group: Some("rent".to_string()),
                    total: dec!(100),
                },
                GroupTotal {
                    group: Some("food".to_string()),
                    total: dec!(15),
                },
            ]
        );
    }

    #[test]
    fn ties_keep_first_seen_order_and_unset_groups_collect() {
        let grouped = group_amounts([
            row("b", dec!(5)),
            (None, dec!(2)),
            row("a", dec!(5)),
            (None, dec!(3)),
        ]);
        let labels: Vec<_> = grouped.iter().map(|g| g.group.clone()).collect();
        assert_eq!(
            labels,
            vec![Some("b".to_string()), None, Some("a".to_string())]
        );
        assert_eq!(grouped[1].total, dec!(5));
    }
}
