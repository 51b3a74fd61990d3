//! Clause interpretation: raw tokens to canonical filter entries.
//!
//! This is where domain normalization happens: color words and named
//! identity combinations become symbol sets, rarity short codes expand,
//! keywords are title-cased, `:` collapses into `=` where the two are
//! synonyms, and a pending negation flips the key to its `_not` form.

use crate::ast::{
    CmpOp, Color, ColorSet, FilterKey, FilterKind, FilterValue, ManaOp, Token,
};

/// Convert a clause token into a canonical filter entry.
///
/// Structural tokens (`OR`, `-`, parentheses) interpret to `None`; the
/// parser handles those itself.
pub fn interpret(token: &Token, negated: bool) -> Option<(FilterKey, FilterValue)> {
    let (kind, value) = match token {
        Token::Color { op, value } => (
            FilterKind::Colors,
            FilterValue::Colors {
                op: *op,
                colors: parse_color_value(value),
            },
        ),
        Token::ColorIdentity { op, value } => (
            FilterKind::ColorIdentity,
            FilterValue::Colors {
                op: *op,
                colors: parse_identity_value(value),
            },
        ),
        Token::Cmc { op, value } => (
            FilterKind::Cmc,
            FilterValue::Cmc {
                op: op.normalized(),
                value: *value,
            },
        ),
        Token::Type(value) => (FilterKind::Type, FilterValue::Text(value.clone())),
        Token::Oracle(value) | Token::FullOracle(value) => {
            (FilterKind::OracleText, FilterValue::Text(value.clone()))
        }
        Token::Flavor(value) => (FilterKind::FlavorText, FilterValue::Text(value.clone())),
        Token::Set(value) => (FilterKind::Set, FilterValue::Text(value.to_lowercase())),
        Token::Rarity(value) => (
            FilterKind::Rarity,
            FilterValue::Text(expand_rarity(value)),
        ),
        Token::Format(value) => (FilterKind::Format, FilterValue::Text(value.to_lowercase())),
        Token::Banned(value) => (FilterKind::Banned, FilterValue::Text(value.to_lowercase())),
        Token::Block(value) => (FilterKind::Block, FilterValue::Text(value.to_lowercase())),
        Token::Produces(value) => (
            FilterKind::Produces,
            FilterValue::Produces(parse_color_value(value)),
        ),
        Token::Watermark(value) => (
            FilterKind::Watermark,
            FilterValue::Text(value.to_lowercase()),
        ),
        Token::Layout(value) => (FilterKind::Layout, FilterValue::Text(value.to_lowercase())),
        Token::ProducesToken(value) => {
            (FilterKind::ProducesToken, FilterValue::Text(value.clone()))
        }
        Token::Keyword(value) => (
            FilterKind::Keyword,
            FilterValue::Text(title_case(value)),
        ),
        Token::Power { op, value } => (
            FilterKind::Power,
            FilterValue::Stat {
                op: op.normalized(),
                value: *value,
            },
        ),
        Token::Toughness { op, value } => (
            FilterKind::Toughness,
            FilterValue::Stat {
                op: op.normalized(),
                value: *value,
            },
        ),
        Token::Loyalty { op, value } => (
            FilterKind::Loyalty,
            FilterValue::Int {
                op: op.normalized(),
                value: *value,
            },
        ),
        Token::CollectorNumber { op, value } => (
            FilterKind::CollectorNumber,
            FilterValue::Collector {
                op: op.normalized(),
                value: value.clone(),
            },
        ),
        Token::Price {
            currency,
            op,
            value,
        } => (
            FilterKind::Price,
            FilterValue::Price {
                currency: currency.clone(),
                op: op.normalized(),
                value: *value,
            },
        ),
        Token::Artist(value) => (FilterKind::Artist, FilterValue::Text(value.clone())),
        Token::Year { op, value } => (
            FilterKind::Year,
            FilterValue::Int {
                op: op.normalized(),
                value: *value,
            },
        ),
        Token::Mana { op, value } => (
            FilterKind::Mana,
            FilterValue::Mana {
                op: match op {
                    CmpOp::Eq => ManaOp::Exact,
                    _ => ManaOp::Contains,
                },
                cost: value.clone(),
            },
        ),
        Token::ExactName(value) => (FilterKind::NameExact, FilterValue::Text(value.clone())),
        Token::StrictName(value) => (FilterKind::NameStrict, FilterValue::Text(value.clone())),
        Token::PartialName(value) => (FilterKind::NamePartial, FilterValue::Text(value.clone())),
        Token::Or | Token::Negation | Token::LParen | Token::RParen => return None,
    };

    let key = if negated {
        FilterKey::negated(kind)
    } else {
        FilterKey::new(kind)
    };
    Some((key, value))
}

/// Parse a color value (`blue`, `urg`, `c`) into a color set.
///
/// Unknown letters are silently skipped, matching Scryfall's lenient
/// handling; the empty set denotes colorless.
pub fn parse_color_value(value: &str) -> ColorSet {
    let value = value.to_lowercase();
    if value == "c" || value == "colorless" {
        return ColorSet::new();
    }
    if let Some(color) = color_word(&value) {
        return [color].into_iter().collect();
    }
    value.chars().filter_map(Color::from_char).collect()
}

/// Parse a color identity value, recognizing named combinations
/// (guilds, shards, wedges, the four-color nephilim names) before
/// falling back to letter-by-letter parsing.
pub fn parse_identity_value(value: &str) -> ColorSet {
    let value = value.to_lowercase();
    if let Some(letters) = named_identity(&value) {
        return letters.iter().copied().collect();
    }
    if value == "c" || value == "colorless" {
        return ColorSet::new();
    }
    value.chars().filter_map(Color::from_char).collect()
}

fn color_word(word: &str) -> Option<Color> {
    match word {
        "white" => Some(Color::White),
        "blue" => Some(Color::Blue),
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        _ => None,
    }
}

fn named_identity(name: &str) -> Option<&'static [Color]> {
    use Color::{Black as B, Blue as U, Green as G, Red as R, White as W};
    let colors: &'static [Color] = match name {
        // Mono colors
        "white" => &[W],
        "blue" => &[U],
        "black" => &[B],
        "red" => &[R],
        "green" => &[G],
        "colorless" => &[],
        // Guilds (2 color)
        "azorius" => &[W, U],
        "dimir" => &[U, B],
        "rakdos" => &[B, R],
        "gruul" => &[R, G],
        "selesnya" => &[G, W],
        "orzhov" => &[W, B],
        "izzet" => &[U, R],
        "golgari" => &[B, G],
        "boros" => &[R, W],
        "simic" => &[G, U],
        // Shards (3 color)
        "bant" => &[G, W, U],
        "esper" => &[W, U, B],
        "grixis" => &[U, B, R],
        "jund" => &[B, R, G],
        "naya" => &[R, G, W],
        // Wedges (3 color)
        "abzan" => &[W, B, G],
        "jeskai" => &[U, R, W],
        "sultai" => &[B, G, U],
        "mardu" => &[R, W, B],
        "temur" => &[G, U, R],
        // 4 color (nephilim names)
        "chaos" => &[U, B, R, G],
        "aggression" => &[B, R, G, W],
        "altruism" => &[R, G, W, U],
        "growth" => &[G, W, U, B],
        "artifice" => &[W, U, B, R],
        // 5 color
        "wubrg" => &[W, U, B, R, G],
        "fivecolor" => &[W, U, B, R, G],
        _ => return None,
    };
    Some(colors)
}

fn expand_rarity(value: &str) -> String {
    match value.to_lowercase().as_str() {
        "c" => "common".to_string(),
        "u" => "uncommon".to_string(),
        "r" => "rare".to_string(),
        "m" => "mythic".to_string(),
        other => other.to_string(),
    }
}

/// Title-case each word so keyword casing matches Scryfall's storage
/// format ("flying" -> "Flying", "first strike" -> "First Strike").
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_alpha = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_letters_any_order() {
        let set = parse_color_value("gru");
        let expected: ColorSet = [Color::Blue, Color::Red, Color::Green].into_iter().collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_colorless_values() {
        assert!(parse_color_value("c").is_empty());
        assert!(parse_color_value("colorless").is_empty());
    }

    #[test]
    fn test_named_identity_esper() {
        let set = parse_identity_value("ESPER");
        let expected: ColorSet = [Color::White, Color::Blue, Color::Black]
            .into_iter()
            .collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_unknown_letters_skipped() {
        let set = parse_color_value("wxz");
        let expected: ColorSet = [Color::White].into_iter().collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("flying"), "Flying");
        assert_eq!(title_case("first strike"), "First Strike");
        assert_eq!(title_case("DEATHTOUCH"), "Deathtouch");
    }
}
