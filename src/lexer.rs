use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::ast::{CmpOp, StatValue, Token};
use crate::error::QueryError;

/// Which clause family a table entry produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    ColorIdentity,
    Color,
    Cmc,
    TypeQuoted,
    Type,
    OracleQuoted,
    Oracle,
    FlavorQuoted,
    Flavor,
    FullOracleQuoted,
    FullOracle,
    Set,
    Rarity,
    Format,
    Banned,
    Block,
    Produces,
    Watermark,
    Layout,
    ProducesTokenQuoted,
    ProducesToken,
    KeywordQuoted,
    Keyword,
    Power,
    Toughness,
    Loyalty,
    CollectorNumber,
    Price,
    ArtistQuoted,
    Artist,
    Year,
    Mana,
    Or,
    Negation,
    LParen,
    RParen,
    StrictName,
    ExactName,
    PartialName,
}

/// Ordered token patterns. Order matters: specific clause syntaxes must
/// win over the catch-all bare-word name pattern, so that comes last.
/// Compiled once at first use; patterns are anchored and matched against
/// the unread tail of the query.
static TOKEN_PATTERNS: LazyLock<Vec<(Regex, Pattern)>> = LazyLock::new(|| {
    const TABLE: &[(&str, Pattern)] = &[
        (
            r"(?i)^(?:id|identity|ci)(>=|<=|>|<|=|!=|:)([a-zA-Z]+)",
            Pattern::ColorIdentity,
        ),
        (
            r"(?i)^(?:c|color|colors)(>=|<=|>|<|=|!=|:)([a-zA-Z]+)",
            Pattern::Color,
        ),
        (
            r"(?i)^(?:cmc|mv|manavalue)(>=|<=|>|<|=|!=|:)(\d+(?:\.\d+)?)",
            Pattern::Cmc,
        ),
        (r#"(?i)^(?:t|type):"([^"]+)""#, Pattern::TypeQuoted),
        (r"(?i)^(?:t|type):([a-zA-Z]+)", Pattern::Type),
        (r#"(?i)^(?:o|oracle|text):"([^"]+)""#, Pattern::OracleQuoted),
        (r"(?i)^(?:o|oracle|text):([a-zA-Z]+)", Pattern::Oracle),
        (r#"(?i)^(?:ft|flavor):"([^"]+)""#, Pattern::FlavorQuoted),
        (r"(?i)^(?:ft|flavor):([a-zA-Z]+)", Pattern::Flavor),
        // fo: is an alias for o:; stored oracle text already carries
        // reminder text, there is no separate "full" field.
        (
            r#"(?i)^(?:fo|fulloracle):"([^"]+)""#,
            Pattern::FullOracleQuoted,
        ),
        (r"(?i)^(?:fo|fulloracle):([a-zA-Z]+)", Pattern::FullOracle),
        (r"(?i)^(?:set|e|s|edition):([a-zA-Z0-9]+)", Pattern::Set),
        (r"(?i)^(?:r|rarity):([a-zA-Z]+)", Pattern::Rarity),
        (r"(?i)^(?:f|format|legal|legality):([a-zA-Z]+)", Pattern::Format),
        (r"(?i)^banned:([a-zA-Z]+)", Pattern::Banned),
        (r"(?i)^(?:b|block):([a-zA-Z]+)", Pattern::Block),
        (r"(?i)^produces:([a-zA-Z]+)", Pattern::Produces),
        (r"(?i)^(?:wm|watermark):([a-zA-Z]+)", Pattern::Watermark),
        (r"(?i)^layout:([a-zA-Z_]+)", Pattern::Layout),
        (
            r#"(?i)^(?:pt|produces_token):"([^"]+)""#,
            Pattern::ProducesTokenQuoted,
        ),
        (
            r"(?i)^(?:pt|produces_token):([a-zA-Z]+)",
            Pattern::ProducesToken,
        ),
        (
            r#"(?i)^(?:kw|keyword|keywords):"([^"]+)""#,
            Pattern::KeywordQuoted,
        ),
        (r"(?i)^(?:kw|keyword|keywords):([a-zA-Z]+)", Pattern::Keyword),
        (
            r"(?i)^(?:pow|power)(>=|<=|>|<|=|!=|:)(\d+|\*)",
            Pattern::Power,
        ),
        (
            r"(?i)^(?:tou|toughness)(>=|<=|>|<|=|!=|:)(\d+|\*)",
            Pattern::Toughness,
        ),
        (r"(?i)^(?:loy|loyalty)(>=|<=|>|<|=|!=|:)(\d+)", Pattern::Loyalty),
        (
            r"(?i)^(?:cn|number)(>=|<=|>|<|=|!=|:)([a-zA-Z0-9]+)",
            Pattern::CollectorNumber,
        ),
        (
            r"(?i)^(?:usd|eur|tix)(>=|<=|>|<|=|!=|:)(\d+(?:\.\d+)?)",
            Pattern::Price,
        ),
        (r#"(?i)^(?:a|artist):"([^"]+)""#, Pattern::ArtistQuoted),
        (
            r"(?i)^(?:a|artist):([a-zA-Z][a-zA-Z0-9_-]*)",
            Pattern::Artist,
        ),
        (r"(?i)^year(>=|<=|>|<|=|!=|:)(\d{4})", Pattern::Year),
        (r"(?i)^(?:m|mana)(=|:)((?:\{[^}]+\})+)", Pattern::Mana),
        (r"(?i)^OR\b", Pattern::Or),
        (r"^-", Pattern::Negation),
        (r"^\(", Pattern::LParen),
        (r"^\)", Pattern::RParen),
        // Strict exact-name with ! prefix comes before plain quoted names.
        // Single-quote variants support names with embedded double quotes.
        (r#"^!"([^"]+)""#, Pattern::StrictName),
        (r"^!'([^']+)'", Pattern::StrictName),
        (r#"^"([^"]+)""#, Pattern::ExactName),
        (r"^'([^']+)'", Pattern::ExactName),
        // Bare-word partial name: ASCII and accented Latin letters, then
        // digits and the punctuation that actually occurs in card names
        // ("Urza's", "Lim-Dûl", "Dr.", "R&D", "Hans,").
        (
            r"^([a-zA-Z\u{00C0}-\u{024F}][a-zA-Z0-9\u{00C0}-\u{024F}_',.&-]*)",
            Pattern::PartialName,
        ),
    ];

    TABLE
        .iter()
        .map(|(pattern, kind)| {
            (
                Regex::new(pattern).expect("token pattern compiles"),
                *kind,
            )
        })
        .collect()
});

/// Split a raw query string into tokens.
///
/// Scans left to right, skipping whitespace, trying the ordered pattern
/// table at each position and taking the first match. A position where no
/// pattern matches is a hard parse error naming the offending character.
pub fn tokenize(query: &str) -> Result<Vec<Token>, QueryError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < query.len() {
        let rest = &query[pos..];
        let Some(ch) = rest.chars().next() else { break };
        if ch.is_whitespace() {
            pos += ch.len_utf8();
            continue;
        }

        let mut matched = false;
        for (regex, kind) in TOKEN_PATTERNS.iter() {
            if let Some(caps) = regex.captures(rest) {
                tokens.push(build_token(*kind, &caps)?);
                let len = caps.get(0).map(|m| m.len()).unwrap_or(0).max(1);
                pos += len;
                matched = true;
                break;
            }
        }

        if !matched {
            let char_pos = query[..pos].chars().count();
            return Err(QueryError::new(
                format!("Unexpected character at position {char_pos}: '{ch}'"),
                "Check for unsupported characters or syntax",
            ));
        }
    }

    Ok(tokens)
}

fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map(|m| m.as_str()).unwrap_or("")
}

fn parse_op(caps: &Captures<'_>) -> Result<CmpOp, QueryError> {
    let raw = group(caps, 1);
    CmpOp::parse(raw)
        .ok_or_else(|| QueryError::new(format!("Unsupported operator '{raw}'"), "Check the query syntax"))
}

fn parse_f64(raw: &str) -> Result<f64, QueryError> {
    raw.parse::<f64>()
        .map_err(|_| QueryError::new(format!("Invalid numeric value '{raw}'"), "Check the query syntax"))
}

fn parse_i64(raw: &str) -> Result<i64, QueryError> {
    raw.parse::<i64>()
        .map_err(|_| QueryError::new(format!("Invalid numeric value '{raw}'"), "Check the query syntax"))
}

fn build_token(kind: Pattern, caps: &Captures<'_>) -> Result<Token, QueryError> {
    let token = match kind {
        Pattern::Color => Token::Color {
            op: parse_op(caps)?,
            value: group(caps, 2).to_string(),
        },
        Pattern::ColorIdentity => Token::ColorIdentity {
            op: parse_op(caps)?,
            value: group(caps, 2).to_string(),
        },
        Pattern::Cmc => Token::Cmc {
            op: parse_op(caps)?,
            value: parse_f64(group(caps, 2))?,
        },
        Pattern::Type | Pattern::TypeQuoted => Token::Type(group(caps, 1).to_string()),
        Pattern::Oracle | Pattern::OracleQuoted => Token::Oracle(group(caps, 1).to_string()),
        Pattern::FullOracle | Pattern::FullOracleQuoted => {
            Token::FullOracle(group(caps, 1).to_string())
        }
        Pattern::Flavor | Pattern::FlavorQuoted => Token::Flavor(group(caps, 1).to_string()),
        Pattern::Set => Token::Set(group(caps, 1).to_string()),
        Pattern::Rarity => Token::Rarity(group(caps, 1).to_string()),
        Pattern::Format => Token::Format(group(caps, 1).to_string()),
        Pattern::Banned => Token::Banned(group(caps, 1).to_string()),
        Pattern::Block => Token::Block(group(caps, 1).to_string()),
        Pattern::Produces => Token::Produces(group(caps, 1).to_string()),
        Pattern::Watermark => Token::Watermark(group(caps, 1).to_string()),
        Pattern::Layout => Token::Layout(group(caps, 1).to_string()),
        Pattern::ProducesToken | Pattern::ProducesTokenQuoted => {
            Token::ProducesToken(group(caps, 1).to_string())
        }
        Pattern::Keyword | Pattern::KeywordQuoted => Token::Keyword(group(caps, 1).to_string()),
        Pattern::Power => Token::Power {
            op: parse_op(caps)?,
            value: parse_stat(group(caps, 2))?,
        },
        Pattern::Toughness => Token::Toughness {
            op: parse_op(caps)?,
            value: parse_stat(group(caps, 2))?,
        },
        Pattern::Loyalty => Token::Loyalty {
            op: parse_op(caps)?,
            value: parse_i64(group(caps, 2))?,
        },
        Pattern::CollectorNumber => Token::CollectorNumber {
            op: parse_op(caps)?,
            value: group(caps, 2).to_string(),
        },
        Pattern::Price => {
            let full = group(caps, 0).to_ascii_lowercase();
            let currency = if full.starts_with("usd") {
                "usd"
            } else if full.starts_with("eur") {
                "eur"
            } else {
                "tix"
            };
            Token::Price {
                currency: currency.to_string(),
                op: parse_op(caps)?,
                value: parse_f64(group(caps, 2))?,
            }
        }
        Pattern::Artist | Pattern::ArtistQuoted => Token::Artist(group(caps, 1).to_string()),
        Pattern::Year => Token::Year {
            op: parse_op(caps)?,
            value: parse_i64(group(caps, 2))?,
        },
        Pattern::Mana => Token::Mana {
            op: parse_op(caps)?,
            value: group(caps, 2).to_string(),
        },
        Pattern::Or => Token::Or,
        Pattern::Negation => Token::Negation,
        Pattern::LParen => Token::LParen,
        Pattern::RParen => Token::RParen,
        Pattern::StrictName => Token::StrictName(group(caps, 1).to_string()),
        Pattern::ExactName => Token::ExactName(group(caps, 1).to_string()),
        Pattern::PartialName => Token::PartialName(group(caps, 1).to_string()),
    };
    Ok(token)
}

fn parse_stat(raw: &str) -> Result<StatValue, QueryError> {
    if raw == "*" {
        Ok(StatValue::Star)
    } else {
        Ok(StatValue::Num(parse_i64(raw)?))
    }
}

#[test]
fn test_clause_tokens() {
    let tokens = tokenize("c:blue cmc>=5 t:instant").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Color {
                op: CmpOp::Colon,
                value: "blue".into()
            },
            Token::Cmc {
                op: CmpOp::Ge,
                value: 5.0
            },
            Token::Type("instant".into()),
        ]
    );
}

#[test]
fn test_bare_word_falls_through_to_partial_name() {
    let tokens = tokenize("bolt").unwrap();
    assert_eq!(tokens, vec![Token::PartialName("bolt".into())]);
}

#[test]
fn test_strict_name_wins_over_exact_name() {
    let tokens = tokenize("!\"Lightning Bolt\"").unwrap();
    assert_eq!(tokens, vec![Token::StrictName("Lightning Bolt".into())]);
}

#[test]
fn test_unexpected_character_reports_position() {
    let err = tokenize("c:blue #").unwrap_err();
    assert!(err.message.contains("position 7"));
    assert!(err.message.contains('#'));
}
