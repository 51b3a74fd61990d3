//! Filter compilation: canonical filter entries into typed predicates.
//!
//! Each filter kind has its own compilation rule; the edge cases here
//! carry the query language's semantics. Negated numeric filters invert
//! the operator (`-cmc>=5` becomes `cmc < 5`) so that cards with a
//! missing value fail both the positive and the negated form. Unknown
//! format, block, or currency names compile to [`Predicate::Nothing`]
//! for the positive filter but contribute no constraint when negated.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::debug;

use crate::ast::{
    CmpOp, ColorSet, FilterKey, FilterKind, FilterValue, Filters, ManaOp, ParsedQuery, StatValue,
};
use crate::predicate::{
    ArrayField, NumericField, Predicate, PredicateSet, StatField, TextField,
};

/// Formats a legality filter may name. Anything else matches no card.
pub const VALID_FORMATS: &[&str] = &[
    "standard",
    "future",
    "historic",
    "timeless",
    "gladiator",
    "pioneer",
    "modern",
    "legacy",
    "pauper",
    "vintage",
    "penny",
    "commander",
    "oathbreaker",
    "standardbrawl",
    "brawl",
    "alchemy",
    "paupercommander",
    "duel",
    "oldschool",
    "premodern",
    "predh",
];

/// Currencies a price filter may name.
pub const VALID_CURRENCIES: &[&str] =
    &["usd", "usd_foil", "usd_etched", "eur", "eur_foil", "tix"];

/// Compile a parsed query into its executable predicate set.
pub fn compile(parsed: &ParsedQuery) -> PredicateSet {
    let set = if parsed.has_or_clause {
        // Groups that compile to no predicates are dropped rather than
        // treated as match-all; an OR query with no surviving groups
        // matches nothing.
        PredicateSet::AnyGroup(
            parsed
                .or_groups
                .iter()
                .map(compile_filters)
                .filter(|group| !group.is_empty())
                .collect(),
        )
    } else {
        PredicateSet::All(compile_filters(&parsed.filters))
    };
    debug!(predicates = set.predicate_count(), "compiled query");
    set
}

/// Compile one flat filter map into an AND-list of predicates.
pub fn compile_filters(filters: &Filters) -> Vec<Predicate> {
    let mut preds = Vec::new();
    for (key, value) in filters.iter() {
        compile_entry(key, value, &mut preds);
    }
    preds
}

fn compile_entry(key: FilterKey, value: &FilterValue, preds: &mut Vec<Predicate>) {
    let neg = key.negated;
    match key.kind {
        FilterKind::NameExact => {
            // The negated form has no defined meaning and contributes
            // no predicate.
            if !neg {
                if let FilterValue::Text(name) = value {
                    preds.push(Predicate::Eq {
                        field: TextField::Name,
                        value: name.clone(),
                    });
                }
            }
        }
        FilterKind::NameStrict => {
            if !neg {
                if let FilterValue::Text(name) = value {
                    preds.push(Predicate::NameStrict(name.clone()));
                }
            }
        }
        FilterKind::NamePartial => {
            compile_text_contains(TextField::Name, value, neg, true, preds);
        }
        FilterKind::Colors => {
            if let FilterValue::Colors { op, colors } = value {
                compile_color_set(ArrayField::Colors, *op, colors, neg, preds);
            }
        }
        FilterKind::ColorIdentity => {
            if let FilterValue::Colors { op, colors } = value {
                compile_color_set(ArrayField::ColorIdentity, *op, colors, neg, preds);
            }
        }
        FilterKind::Cmc => {
            if let FilterValue::Cmc { op, value } = value {
                preds.push(Predicate::Cmp {
                    field: NumericField::Cmc,
                    op: effective_op(*op, neg),
                    value: *value,
                });
            }
        }
        FilterKind::Mana => {
            if let FilterValue::Mana { op, cost } = value {
                preds.push(match (op, neg) {
                    (ManaOp::Exact, false) => Predicate::EqStrict {
                        field: TextField::ManaCost,
                        value: cost.clone(),
                    },
                    (ManaOp::Exact, true) => Predicate::NotEqStrict {
                        field: TextField::ManaCost,
                        value: cost.clone(),
                    },
                    (ManaOp::Contains, false) => Predicate::Contains {
                        field: TextField::ManaCost,
                        needle: cost.clone(),
                    },
                    (ManaOp::Contains, true) => Predicate::NotContains {
                        field: TextField::ManaCost,
                        needle: cost.clone(),
                    },
                });
            }
        }
        FilterKind::Type => {
            compile_text_contains(TextField::TypeLine, value, neg, true, preds);
        }
        FilterKind::OracleText => {
            compile_text_contains(TextField::OracleText, value, neg, true, preds);
        }
        FilterKind::FlavorText => {
            compile_text_contains(TextField::FlavorText, value, neg, true, preds);
        }
        FilterKind::Artist => {
            compile_text_contains(TextField::Artist, value, neg, false, preds);
        }
        FilterKind::Set => {
            if let FilterValue::Text(code) = value {
                preds.push(if neg {
                    // A card always has a set code, so absence never
                    // satisfies the negation.
                    Predicate::NotEq {
                        field: TextField::SetCode,
                        value: code.clone(),
                        missing_ok: false,
                    }
                } else {
                    Predicate::Eq {
                        field: TextField::SetCode,
                        value: code.clone(),
                    }
                });
            }
        }
        FilterKind::Rarity => {
            if let FilterValue::Text(rarity) = value {
                preds.push(if neg {
                    Predicate::NotEq {
                        field: TextField::Rarity,
                        value: rarity.clone(),
                        missing_ok: false,
                    }
                } else {
                    Predicate::Eq {
                        field: TextField::Rarity,
                        value: rarity.clone(),
                    }
                });
            }
        }
        FilterKind::Watermark => {
            if let FilterValue::Text(watermark) = value {
                preds.push(if neg {
                    Predicate::NotEq {
                        field: TextField::Watermark,
                        value: watermark.clone(),
                        missing_ok: true,
                    }
                } else {
                    Predicate::Eq {
                        field: TextField::Watermark,
                        value: watermark.clone(),
                    }
                });
            }
        }
        FilterKind::Layout => {
            if let FilterValue::Text(layout) = value {
                preds.push(if neg {
                    Predicate::NotEq {
                        field: TextField::Layout,
                        value: layout.clone(),
                        missing_ok: true,
                    }
                } else {
                    Predicate::Eq {
                        field: TextField::Layout,
                        value: layout.clone(),
                    }
                });
            }
        }
        FilterKind::Format => {
            if let FilterValue::Text(format) = value {
                if VALID_FORMATS.contains(&format.as_str()) {
                    preds.push(if neg {
                        Predicate::NotLegalIn(format.clone())
                    } else {
                        Predicate::LegalIn(format.clone())
                    });
                } else if !neg {
                    // Unknown format matches nothing; the negated form
                    // degrades to no constraint instead.
                    preds.push(Predicate::Nothing);
                }
            }
        }
        FilterKind::Banned => {
            if let FilterValue::Text(format) = value {
                if VALID_FORMATS.contains(&format.as_str()) {
                    preds.push(if neg {
                        Predicate::NotBannedIn(format.clone())
                    } else {
                        Predicate::BannedIn(format.clone())
                    });
                } else if !neg {
                    preds.push(Predicate::Nothing);
                }
            }
        }
        FilterKind::Block => {
            if let FilterValue::Text(block) = value {
                match block_sets(block) {
                    Some(sets) => preds.push(if neg {
                        Predicate::SetNotIn(sets)
                    } else {
                        Predicate::SetIn(sets)
                    }),
                    None if !neg => preds.push(Predicate::Nothing),
                    None => {}
                }
            }
        }
        FilterKind::Produces => {
            if let FilterValue::Produces(colors) = value {
                if neg {
                    for color in colors.iter() {
                        preds.push(Predicate::LacksElement {
                            field: ArrayField::ProducedMana,
                            element: color.letter().to_string(),
                        });
                    }
                } else if colors.is_empty() {
                    // produces:c asks for the explicit colorless marker,
                    // not an empty produced-mana list.
                    preds.push(Predicate::HasElement {
                        field: ArrayField::ProducedMana,
                        element: "C".to_string(),
                    });
                } else {
                    for color in colors.iter() {
                        preds.push(Predicate::HasElement {
                            field: ArrayField::ProducedMana,
                            element: color.letter().to_string(),
                        });
                    }
                }
            }
        }
        FilterKind::Keyword => {
            compile_array_elements(ArrayField::Keywords, value, neg, preds);
        }
        FilterKind::ProducesToken => {
            compile_array_elements(ArrayField::Tokens, value, neg, preds);
        }
        FilterKind::Power => {
            compile_stat(StatField::Power, NumericField::Power, value, neg, preds);
        }
        FilterKind::Toughness => {
            compile_stat(
                StatField::Toughness,
                NumericField::Toughness,
                value,
                neg,
                preds,
            );
        }
        FilterKind::Loyalty => {
            if let FilterValue::Int { op, value } = value {
                preds.push(Predicate::Cmp {
                    field: NumericField::Loyalty,
                    op: effective_op(*op, neg),
                    value: *value as f64,
                });
            }
        }
        FilterKind::Year => {
            if let FilterValue::Int { op, value } = value {
                preds.push(Predicate::Cmp {
                    field: NumericField::Year,
                    op: effective_op(*op, neg),
                    value: *value as f64,
                });
            }
        }
        FilterKind::CollectorNumber => {
            if let FilterValue::Collector { op, value } = value {
                if *op == CmpOp::Eq {
                    preds.push(if neg {
                        Predicate::NotEq {
                            field: TextField::CollectorNumber,
                            value: value.clone(),
                            missing_ok: false,
                        }
                    } else {
                        Predicate::Eq {
                            field: TextField::CollectorNumber,
                            value: value.clone(),
                        }
                    });
                } else {
                    // Ordered comparison uses the numeric prefix of the
                    // query value ("100a" compares as 100).
                    preds.push(Predicate::Cmp {
                        field: NumericField::CollectorNumber,
                        op: effective_op(*op, neg),
                        value: numeric_prefix(value) as f64,
                    });
                }
            }
        }
        FilterKind::Price => {
            if let FilterValue::Price {
                currency,
                op,
                value,
            } = value
            {
                if VALID_CURRENCIES.contains(&currency.as_str()) {
                    match Decimal::from_f64(*value) {
                        Some(amount) => preds.push(Predicate::PriceCmp {
                            currency: currency.clone(),
                            op: effective_op(*op, neg),
                            value: amount,
                        }),
                        None => preds.push(Predicate::Nothing),
                    }
                } else if !neg {
                    preds.push(Predicate::Nothing);
                }
            }
        }
    }
}

/// Operator actually compiled: negation inverts instead of wrapping in
/// NOT, so missing values fail either way.
fn effective_op(op: CmpOp, negated: bool) -> CmpOp {
    if negated { op.inverted() } else { op }
}

fn compile_text_contains(
    field: TextField,
    value: &FilterValue,
    negated: bool,
    multi: bool,
    preds: &mut Vec<Predicate>,
) {
    let values: Vec<&str> = match value {
        FilterValue::Texts(vs) if multi => vs.iter().map(String::as_str).collect(),
        FilterValue::Text(v) => vec![v.as_str()],
        _ => return,
    };
    for needle in values {
        preds.push(if negated {
            Predicate::NotContains {
                field,
                needle: needle.to_string(),
            }
        } else {
            Predicate::Contains {
                field,
                needle: needle.to_string(),
            }
        });
    }
}

fn compile_array_elements(
    field: ArrayField,
    value: &FilterValue,
    negated: bool,
    preds: &mut Vec<Predicate>,
) {
    let values: Vec<&str> = match value {
        FilterValue::Texts(vs) => vs.iter().map(String::as_str).collect(),
        FilterValue::Text(v) => vec![v.as_str()],
        _ => return,
    };
    for element in values {
        preds.push(if negated {
            Predicate::LacksElement {
                field,
                element: element.to_string(),
            }
        } else {
            Predicate::HasElement {
                field,
                element: element.to_string(),
            }
        });
    }
}

fn compile_stat(
    stat: StatField,
    numeric: NumericField,
    value: &FilterValue,
    negated: bool,
    preds: &mut Vec<Predicate>,
) {
    if let FilterValue::Stat { op, value } = value {
        match value {
            StatValue::Star => preds.push(Predicate::VariableStat {
                field: stat,
                negated,
            }),
            StatValue::Num(n) => preds.push(Predicate::Cmp {
                field: numeric,
                op: effective_op(*op, negated),
                value: *n as f64,
            }),
        }
    }
}

/// Set-comparison semantics for colors and color identity.
fn compile_color_set(
    field: ArrayField,
    op: CmpOp,
    colors: &ColorSet,
    negated: bool,
    preds: &mut Vec<Predicate>,
) {
    if negated {
        if colors.is_empty() {
            // -c:colorless means: has at least one color.
            preds.push(Predicate::IsNonEmpty(field));
        } else {
            for color in colors.iter() {
                preds.push(Predicate::LacksElement {
                    field,
                    element: color.letter().to_string(),
                });
            }
        }
        return;
    }

    if colors.is_empty() {
        preds.push(Predicate::IsEmpty(field));
        return;
    }

    match op {
        CmpOp::Colon | CmpOp::Eq | CmpOp::Ge => {
            // Superset: has every named color.
            for color in colors.iter() {
                preds.push(Predicate::HasElement {
                    field,
                    element: color.letter().to_string(),
                });
            }
        }
        CmpOp::Le => {
            // Subset: no color outside the named set.
            for color in colors.complement().iter() {
                preds.push(Predicate::LacksElement {
                    field,
                    element: color.letter().to_string(),
                });
            }
        }
        CmpOp::Gt => {
            // Strict superset: every named color plus at least one more.
            for color in colors.iter() {
                preds.push(Predicate::HasElement {
                    field,
                    element: color.letter().to_string(),
                });
            }
            let others = colors.complement();
            if !others.is_empty() {
                preds.push(Predicate::Any(
                    others
                        .iter()
                        .map(|c| Predicate::HasElement {
                            field,
                            element: c.letter().to_string(),
                        })
                        .collect(),
                ));
            }
        }
        CmpOp::Lt => {
            // Strict subset: nothing outside the set, and at least one
            // named color missing.
            for color in colors.complement().iter() {
                preds.push(Predicate::LacksElement {
                    field,
                    element: color.letter().to_string(),
                });
            }
            if colors.len() > 1 {
                preds.push(Predicate::Any(
                    colors
                        .iter()
                        .map(|c| Predicate::LacksElement {
                            field,
                            element: c.letter().to_string(),
                        })
                        .collect(),
                ));
            }
        }
        CmpOp::Ne => {}
    }
}

/// Block names to their set codes. Blocks ended with Ixalan, so the
/// table is closed; synonyms share an entry.
pub fn block_sets(name: &str) -> Option<&'static [&'static str]> {
    let sets: &'static [&'static str] = match name {
        "ice age" | "iceage" => &["ice", "all", "csp"],
        "mirage" => &["mir", "vis", "wth"],
        "tempest" => &["tmp", "sth", "exo"],
        "urza" | "urzas" => &["usg", "ulg", "uds"],
        "masques" | "mercadian" => &["mmq", "nem", "pcy"],
        "invasion" => &["inv", "pls", "apc"],
        "odyssey" => &["ody", "tor", "jud"],
        "onslaught" => &["ons", "lgn", "scg"],
        "mirrodin" => &["mrd", "dst", "5dn"],
        "kamigawa" => &["chk", "bok", "sok"],
        "ravnica" => &["rav", "gpt", "dis"],
        "time spiral" | "timespiral" => &["tsp", "plc", "fut"],
        "lorwyn" => &["lrw", "mor"],
        "shadowmoor" => &["shm", "eve"],
        "alara" => &["ala", "con", "arb"],
        "zendikar" => &["zen", "wwk", "roe"],
        "scars" => &["som", "mbs", "nph"],
        "innistrad" => &["isd", "dka", "avr"],
        "return to ravnica" | "ravnicareturn" => &["rtr", "gtc", "dgm"],
        "theros" => &["ths", "bng", "jou"],
        "khans" | "tarkir" => &["ktk", "frf", "dtk"],
        "battle for zendikar" | "battleforzendikar" => &["bfz", "ogw"],
        "shadows" | "shadowsoverinnistrad" => &["soi", "emn"],
        "kaladesh" => &["kld", "aer"],
        "amonkhet" => &["akh", "hou"],
        "ixalan" => &["xln", "rix"],
        _ => return None,
    };
    Some(sets)
}

/// Numeric prefix of a collector number ("100a" reads as 100, no
/// digits reads as 0).
pub(crate) fn numeric_prefix(value: &str) -> i64 {
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn compile_query(query: &str) -> PredicateSet {
        compile(&parser::parse(query).unwrap())
    }

    #[test]
    fn test_unknown_format_matches_nothing() {
        let set = compile_query("f:notaformat");
        assert_eq!(set, PredicateSet::All(vec![Predicate::Nothing]));
    }

    #[test]
    fn test_unknown_negated_format_is_no_constraint() {
        let set = compile_query("-f:notaformat");
        assert!(set.is_match_all());
    }

    #[test]
    fn test_negated_numeric_inverts_operator() {
        let set = compile_query("-cmc>=5");
        assert_eq!(
            set,
            PredicateSet::All(vec![Predicate::Cmp {
                field: NumericField::Cmc,
                op: CmpOp::Lt,
                value: 5.0,
            }])
        );
    }

    #[test]
    fn test_block_expansion() {
        let set = compile_query("b:innistrad");
        assert_eq!(
            set,
            PredicateSet::All(vec![Predicate::SetIn(&["isd", "dka", "avr"])])
        );
    }

    #[test]
    fn test_produces_colorless_marker() {
        let set = compile_query("produces:c");
        assert_eq!(
            set,
            PredicateSet::All(vec![Predicate::HasElement {
                field: ArrayField::ProducedMana,
                element: "C".to_string(),
            }])
        );
    }

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("100a"), 100);
        assert_eq!(numeric_prefix("★"), 0);
        assert_eq!(numeric_prefix("17"), 17);
    }
}
