//! Keyword-overlap category suggestion.
//!
//! Both functions are pure: the same description and category list always
//! produce the same answer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::categories_model::Category;
use crate::constants::{NEW_CATEGORY_MIN_WORD_LEN, SUGGESTION_CONFIDENCE_THRESHOLD};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySuggestion {
    pub category: Option<String>,
    #[serde(with = "crate::utils::decimal_serde::decimal_serde")]
    pub confidence: Decimal,
}

impl CategorySuggestion {
    fn none() -> Self {
        CategorySuggestion {
            category: None,
            confidence: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categorization {
    pub category: String,
    pub is_new_suggestion: bool,
}

/// Share of `keywords` found (case-insensitively) inside the description.
/// An empty keyword list scores zero.
pub fn keyword_confidence(description: &str, keywords: &[String]) -> Decimal {
    if keywords.is_empty() {
        return Decimal::ZERO;
    }
    let haystack = description.to_lowercase();
    let matched = keywords
        .iter()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .count();
    Decimal::from(matched) / Decimal::from(keywords.len())
}

/// Picks the best scoring category, accepting it only above the threshold.
///
/// Ties keep the category seen first.
pub fn suggest(description: &str, categories: &[Category]) -> CategorySuggestion {
    let mut best: Option<(&Category, Decimal)> = None;
    for category in categories {
        let confidence = keyword_confidence(description, &category.keywords);
        let highest = best.map_or(Decimal::ZERO, |(_, c)| c);
        if confidence > highest {
            best = Some((category, confidence));
        }
    }

    match best {
        Some((category, confidence)) if confidence > SUGGESTION_CONFIDENCE_THRESHOLD => {
            CategorySuggestion {
                category: Some(category.name.clone()),
                confidence: confidence.normalize(),
            }
        }
        _ => CategorySuggestion::none(),
    }
}

/// Suggests an existing category, or coins a new one from the description.
///
/// The coined name is the first lowercased word longer than three characters,
/// else the first word. An empty description coins an empty name.
pub fn categorize(description: &str, categories: &[Category]) -> Categorization {
    if let Some(category) = suggest(description, categories).category {
        return Categorization {
            category,
            is_new_suggestion: false,
        };
    }

    let lowered = description.to_lowercase();
    let words: Vec<&str> = lowered.split(char::is_whitespace).collect();
    let coined = words
        .iter()
        .find(|word| word.chars().count() > NEW_CATEGORY_MIN_WORD_LEN)
        .or_else(|| words.first())
        .map(|word| word.to_string())
        .unwrap_or_default();

    Categorization {
        category: coined,
        is_new_suggestion: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::TransactionType;
    use rust_decimal_macros::dec;

    fn category(name: &str, keywords: &[&str]) -> Category {
        Category {
            id: format!("id-{}", name),
            name: name.to_string(),
            category_type: TransactionType::Expense,
            parent_id: None,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn full_keyword_match_is_suggested() {
        let food = category("Food", &["grocery", "restaurant"]);
        // "groceries" does not contain "grocery"
        let partial = suggest("bought groceries at restaurant", &[food.clone()]);
        assert_eq!(partial, CategorySuggestion::none());

        let full = suggest("bought Grocery items at the RESTAURANT", &[food]);
        assert_eq!(full.category.as_deref(), Some("Food"));
        assert_eq!(full.confidence, dec!(1));
    }

    #[test]
    fn no_overlap_yields_none() {
        let food = category("Food", &["grocery", "restaurant"]);
        let result = suggest("paid rent", &[food]);
        assert_eq!(result.category, None);
        assert_eq!(result.confidence, Decimal::ZERO);
    }

    #[test]
    fn exactly_half_is_not_enough() {
        let a = category("A", &["coffee", "beans"]);
        let b = category("B", &["coffee", "mug"]);
        let result = suggest("coffee", &[a, b]);
        assert_eq!(result, CategorySuggestion::none());
    }

    #[test]
    fn ties_go_to_the_first_category() {
        let a = category("A", &["coffee"]);
        let b = category("B", &["coffee"]);
        assert_eq!(suggest("coffee", &[a, b]).category.as_deref(), Some("A"));
    }

    #[test]
    fn higher_ratio_beats_more_matches() {
        let broad = category("Broad", &["bus", "train", "taxi", "tram"]);
        let narrow = category("Narrow", &["bus", "ticket"]);
        let result = suggest("bus ticket and taxi", &[broad, narrow]);
        assert_eq!(result.category.as_deref(), Some("Narrow"));
        assert_eq!(result.confidence, dec!(1));
    }

    #[test]
    fn keywordless_categories_score_zero() {
        assert_eq!(keyword_confidence("anything", &[]), Decimal::ZERO);
        let empty = category("Empty", &[]);
        assert_eq!(suggest("anything", &[empty]), CategorySuggestion::none());
        assert_eq!(
            keyword_confidence("two of three", &["two".into(), "three".into(), "x".into()])
                .round_dp(4),
            dec!(0.6667)
        );
    }

    #[test]
    fn categorize_prefers_existing_categories() {
        let food = category("Food", &["pizza"]);
        assert_eq!(
            categorize("Pizza night", &[food]),
            Categorization {
                category: "Food".to_string(),
                is_new_suggestion: false,
            }
        );
    }

    #[test]
    fn categorize_coins_first_long_word() {
        let coined = categorize("Paid the Plumber today", &[]);
        assert_eq!(coined.category, "paid");
        assert!(coined.is_new_suggestion);
        assert_eq!(categorize("a big Vet bill", &[]).category, "bill");
    }

    #[test]
    fn categorize_falls_back_to_first_word() {
        assert_eq!(categorize("Tax on it", &[]).category, "tax");
        let degenerate = categorize("", &[]);
        assert_eq!(degenerate.category, "");
        assert!(degenerate.is_new_suggestion);
    }
}
