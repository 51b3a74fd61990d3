//! Predicate evaluation against in-memory card records.
//!
//! Missing data fails comparisons: a card with no toughness matches
//! neither `tou>=3` nor `-tou>=3`, and a card with no price in a
//! currency matches no price filter. Negated text and element checks
//! treat an absent field as trivially satisfying the negation.

use rust_decimal::Decimal;

use crate::card::Card;
use crate::predicate::{
    ArrayField, NumericField, Predicate, PredicateSet, StatField, TextField,
};

impl PredicateSet {
    /// Test a card against the whole compiled query.
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            PredicateSet::All(preds) => preds.iter().all(|p| p.matches(card)),
            PredicateSet::AnyGroup(groups) => groups
                .iter()
                .any(|group| group.iter().all(|p| p.matches(card))),
        }
    }
}

impl Predicate {
    /// Test a card against this predicate.
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            Predicate::Contains { field, needle } => text_field(card, *field)
                .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
            Predicate::NotContains { field, needle } => !text_field(card, *field)
                .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
            Predicate::Eq { field, value } => text_field(card, *field)
                .is_some_and(|text| text.to_lowercase() == value.to_lowercase()),
            Predicate::NotEq {
                field,
                value,
                missing_ok,
            } => match text_field(card, *field) {
                Some(text) => text.to_lowercase() != value.to_lowercase(),
                None => *missing_ok,
            },
            Predicate::EqStrict { field, value } => {
                text_field(card, *field).is_some_and(|text| text == *value)
            }
            Predicate::NotEqStrict { field, value } => {
                text_field(card, *field).is_none_or(|text| text != *value)
            }
            Predicate::NameStrict(name) => card.name == *name,
            Predicate::Cmp { field, op, value } => {
                numeric_field(card, *field).is_some_and(|actual| op.compare(&actual, value))
            }
            Predicate::VariableStat { field, negated } => {
                let stat = match field {
                    StatField::Power => card.power.as_deref(),
                    StatField::Toughness => card.toughness.as_deref(),
                };
                match stat {
                    Some(s) => (s == "*") != *negated,
                    None => false,
                }
            }
            Predicate::HasElement { field, element } => {
                array_field(card, *field).is_some_and(|values| {
                    values.iter().any(|v| v.eq_ignore_ascii_case(element))
                })
            }
            Predicate::LacksElement { field, element } => !array_field(card, *field)
                .is_some_and(|values| values.iter().any(|v| v.eq_ignore_ascii_case(element))),
            Predicate::IsEmpty(field) => {
                array_field(card, *field).is_none_or(|values| values.is_empty())
            }
            Predicate::IsNonEmpty(field) => {
                array_field(card, *field).is_some_and(|values| !values.is_empty())
            }
            Predicate::SetIn(codes) => codes.contains(&card.set_code.to_lowercase().as_str()),
            Predicate::SetNotIn(codes) => !codes.contains(&card.set_code.to_lowercase().as_str()),
            Predicate::LegalIn(format) => {
                matches!(card.legalities.get(format).map(String::as_str), Some("legal" | "restricted"))
            }
            Predicate::NotLegalIn(format) => !matches!(
                card.legalities.get(format).map(String::as_str),
                Some("legal" | "restricted")
            ),
            Predicate::BannedIn(format) => {
                card.legalities.get(format).map(String::as_str) == Some("banned")
            }
            Predicate::NotBannedIn(format) => {
                card.legalities.get(format).map(String::as_str) != Some("banned")
            }
            Predicate::PriceCmp {
                currency,
                op,
                value,
            } => match card.prices.get(currency).and_then(Option::as_deref) {
                Some(price) => op.compare(&parse_price(price), value),
                None => false,
            },
            Predicate::Any(preds) => preds.iter().any(|p| p.matches(card)),
            Predicate::Nothing => false,
        }
    }
}

fn text_field(card: &Card, field: TextField) -> Option<&str> {
    match field {
        TextField::Name => Some(&card.name),
        TextField::TypeLine => card.type_line.as_deref(),
        TextField::OracleText => card.oracle_text.as_deref(),
        TextField::FlavorText => card.flavor_text.as_deref(),
        TextField::Artist => card.artist.as_deref(),
        TextField::SetCode => Some(&card.set_code),
        TextField::Rarity => Some(&card.rarity),
        TextField::Watermark => card.watermark.as_deref(),
        TextField::Layout => Some(&card.layout),
        TextField::ManaCost => card.mana_cost.as_deref(),
        TextField::CollectorNumber => Some(&card.collector_number),
    }
}

fn numeric_field(card: &Card, field: NumericField) -> Option<f64> {
    match field {
        NumericField::Cmc => card.cmc,
        NumericField::Power => card.power.as_deref().map(numeric_cast),
        NumericField::Toughness => card.toughness.as_deref().map(numeric_cast),
        NumericField::Loyalty => card.loyalty.as_deref().map(numeric_cast),
        NumericField::Year => card.release_year().map(|y| y as f64),
        NumericField::CollectorNumber => Some(numeric_cast(&card.collector_number)),
    }
}

fn array_field(card: &Card, field: ArrayField) -> Option<&[String]> {
    match field {
        ArrayField::Colors => Some(&card.colors),
        ArrayField::ColorIdentity => Some(&card.color_identity),
        ArrayField::Keywords => Some(&card.keywords),
        ArrayField::ProducedMana => card.produced_mana.as_deref(),
        ArrayField::Tokens => Some(&card.token_names),
    }
}

/// Numeric value of a stat string the way SQL's integer cast reads it:
/// an optional sign and leading digits, anything else counts as 0.
/// `"1a"` is 1, `"*"` and `"X"` are 0, `"-1"` is -1.
fn numeric_cast(value: &str) -> f64 {
    let trimmed = value.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    trimmed[..end].parse().unwrap_or(0.0)
}

fn parse_price(price: &str) -> Decimal {
    price.parse().unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::CmpOp;

    #[test]
    fn test_numeric_cast() {
        assert_eq!(numeric_cast("3"), 3.0);
        assert_eq!(numeric_cast("1a"), 1.0);
        assert_eq!(numeric_cast("*"), 0.0);
        assert_eq!(numeric_cast("-1"), -1.0);
        assert_eq!(numeric_cast("X"), 0.0);
    }

    #[test]
    fn test_missing_field_fails_comparison_both_ways() {
        let card = Card::default();
        let pos = Predicate::Cmp {
            field: NumericField::Toughness,
            op: CmpOp::Ge,
            value: 3.0,
        };
        let neg = Predicate::Cmp {
            field: NumericField::Toughness,
            op: CmpOp::Lt,
            value: 3.0,
        };
        assert!(!pos.matches(&card));
        assert!(!neg.matches(&card));
    }

    #[test]
    fn test_not_contains_passes_on_missing_text() {
        let card = Card::default();
        let pred = Predicate::NotContains {
            field: TextField::OracleText,
            needle: "damage".to_string(),
        };
        assert!(pred.matches(&card));
    }

    #[test]
    fn test_empty_any_group_matches_nothing() {
        let card = Card::default();
        assert!(!PredicateSet::AnyGroup(Vec::new()).matches(&card));
        assert!(PredicateSet::All(Vec::new()).matches(&card));
    }
}
