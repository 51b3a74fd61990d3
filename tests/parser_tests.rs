use tutor_lang::ast::{
    CmpOp, Color, ColorSet, FilterKey, FilterKind, FilterValue, ManaOp, StatValue,
};
use tutor_lang::parser::parse;

fn key(kind: FilterKind) -> FilterKey {
    FilterKey::new(kind)
}

fn not_key(kind: FilterKind) -> FilterKey {
    FilterKey::negated(kind)
}

fn colors(letters: &[Color]) -> ColorSet {
    letters.iter().copied().collect()
}

#[test]
fn test_empty_query() {
    let parsed = parse("   ").unwrap();
    assert!(parsed.is_empty());
    assert!(!parsed.has_or_clause);
}

#[test]
fn test_color_letters_normalize_to_set() {
    let parsed = parse("c:urg").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::Colors)),
        Some(&FilterValue::Colors {
            op: CmpOp::Colon,
            colors: colors(&[Color::Blue, Color::Red, Color::Green]),
        })
    );
}

#[test]
fn test_color_word() {
    let parsed = parse("c:blue").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::Colors)),
        Some(&FilterValue::Colors {
            op: CmpOp::Colon,
            colors: colors(&[Color::Blue]),
        })
    );
}

#[test]
fn test_identity_guild_name() {
    let parsed = parse("id:golgari").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::ColorIdentity)),
        Some(&FilterValue::Colors {
            op: CmpOp::Colon,
            colors: colors(&[Color::Black, Color::Green]),
        })
    );
}

#[test]
fn test_identity_wedge_and_wubrg() {
    let parsed = parse("id:sultai").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::ColorIdentity)),
        Some(&FilterValue::Colors {
            op: CmpOp::Colon,
            colors: colors(&[Color::Blue, Color::Black, Color::Green]),
        })
    );

    let parsed = parse("id=wubrg").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::ColorIdentity)),
        Some(&FilterValue::Colors {
            op: CmpOp::Eq,
            colors: colors(&[
                Color::White,
                Color::Blue,
                Color::Black,
                Color::Red,
                Color::Green,
            ]),
        })
    );
}

#[test]
fn test_rarity_short_code_expands() {
    let parsed = parse("r:m").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::Rarity)),
        Some(&FilterValue::Text("mythic".to_string()))
    );
}

#[test]
fn test_keyword_title_cased() {
    let parsed = parse("kw:\"first strike\"").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::Keyword)),
        Some(&FilterValue::Texts(vec!["First Strike".to_string()]))
    );
}

#[test]
fn test_full_oracle_folds_into_oracle_text() {
    let parsed = parse("fo:reminder").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::OracleText)),
        Some(&FilterValue::Texts(vec!["reminder".to_string()]))
    );
}

#[test]
fn test_colon_normalizes_to_eq_for_comparisons() {
    let parsed = parse("cmc:3 loy:4").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::Cmc)),
        Some(&FilterValue::Cmc {
            op: CmpOp::Eq,
            value: 3.0,
        })
    );
    assert_eq!(
        parsed.filters.get(key(FilterKind::Loyalty)),
        Some(&FilterValue::Int {
            op: CmpOp::Eq,
            value: 4,
        })
    );
}

#[test]
fn test_mana_operators() {
    let parsed = parse("m:{R}{R}").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::Mana)),
        Some(&FilterValue::Mana {
            op: ManaOp::Contains,
            cost: "{R}{R}".to_string(),
        })
    );

    let parsed = parse("m={R}{R}").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::Mana)),
        Some(&FilterValue::Mana {
            op: ManaOp::Exact,
            cost: "{R}{R}".to_string(),
        })
    );
}

#[test]
fn test_multi_value_clauses_accumulate() {
    let parsed = parse("o:draw o:discard").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::OracleText)),
        Some(&FilterValue::Texts(vec![
            "draw".to_string(),
            "discard".to_string(),
        ]))
    );
}

#[test]
fn test_single_value_clause_overwrites() {
    let parsed = parse("r:rare r:mythic").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::Rarity)),
        Some(&FilterValue::Text("mythic".to_string()))
    );
}

#[test]
fn test_negation_round_trip() {
    let positive = parse("t:creature").unwrap();
    let negative = parse("-t:creature").unwrap();
    assert_eq!(
        positive.filters.get(key(FilterKind::Type)),
        negative.filters.get(not_key(FilterKind::Type)),
    );
    assert!(!negative.filters.contains_key(key(FilterKind::Type)));
}

#[test]
fn test_negated_stat_keeps_raw_operator() {
    let parsed = parse("-pow>=4").unwrap();
    assert_eq!(
        parsed.filters.get(not_key(FilterKind::Power)),
        Some(&FilterValue::Stat {
            op: CmpOp::Ge,
            value: StatValue::Num(4),
        })
    );
}

#[test]
fn test_or_splits_into_groups() {
    let parsed = parse("t:elf OR t:goblin OR t:merfolk").unwrap();
    assert!(parsed.has_or_clause);
    assert_eq!(parsed.or_groups.len(), 3);
    for group in &parsed.or_groups {
        assert!(group.contains_key(key(FilterKind::Type)));
    }
}

#[test]
fn test_paren_or_distributes_leading_filter() {
    let parsed = parse("c:green (t:elf OR t:goblin)").unwrap();
    assert!(parsed.has_or_clause);
    assert_eq!(parsed.or_groups.len(), 2);
    for group in &parsed.or_groups {
        assert!(group.contains_key(key(FilterKind::Colors)));
        assert!(group.contains_key(key(FilterKind::Type)));
    }
}

#[test]
fn test_paren_or_distributes_trailing_filter() {
    let parsed = parse("(t:elf OR t:goblin) c:green").unwrap();
    assert!(parsed.has_or_clause);
    assert_eq!(parsed.or_groups.len(), 2);
    for group in &parsed.or_groups {
        assert!(group.contains_key(key(FilterKind::Colors)));
        assert!(group.contains_key(key(FilterKind::Type)));
    }
}

#[test]
fn test_nested_parens() {
    let parsed = parse("((t:elf OR t:goblin)) r:rare").unwrap();
    assert!(parsed.has_or_clause);
    assert_eq!(parsed.or_groups.len(), 2);
    for group in &parsed.or_groups {
        assert!(group.contains_key(key(FilterKind::Rarity)));
    }
}

#[test]
fn test_non_or_paren_group_merges_into_filters() {
    let parsed = parse("(t:elf c:green) r:rare").unwrap();
    assert!(!parsed.has_or_clause);
    assert!(parsed.filters.contains_key(key(FilterKind::Type)));
    assert!(parsed.filters.contains_key(key(FilterKind::Colors)));
    assert!(parsed.filters.contains_key(key(FilterKind::Rarity)));
}

#[test]
fn test_missing_close_paren() {
    let err = parse("(c:blue").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("parentheses"), "got: {message}");
    assert!(message.contains("missing closing"), "got: {message}");
}

#[test]
fn test_extra_close_paren() {
    let err = parse("c:blue)").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("parentheses"), "got: {message}");
    assert!(message.contains("extra closing"), "got: {message}");
}

#[test]
fn test_error_carries_hint_and_syntax_list() {
    let err = parse("(c:blue").unwrap_err();
    assert!(!err.hint.is_empty());
    assert!(!err.supported_syntax.is_empty());
}

#[test]
fn test_end_to_end_clause_shapes() {
    let parsed = parse("c:blue t:instant cmc<=2").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::Colors)),
        Some(&FilterValue::Colors {
            op: CmpOp::Colon,
            colors: colors(&[Color::Blue]),
        })
    );
    assert_eq!(
        parsed.filters.get(key(FilterKind::Type)),
        Some(&FilterValue::Texts(vec!["instant".to_string()]))
    );
    assert_eq!(
        parsed.filters.get(key(FilterKind::Cmc)),
        Some(&FilterValue::Cmc {
            op: CmpOp::Le,
            value: 2.0,
        })
    );
}

#[test]
fn test_strict_name_is_verbatim() {
    let parsed = parse("!\"Lightning Bolt\"").unwrap();
    assert_eq!(
        parsed.filters.get(key(FilterKind::NameStrict)),
        Some(&FilterValue::Text("Lightning Bolt".to_string()))
    );
}
