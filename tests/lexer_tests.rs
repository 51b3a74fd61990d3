use tutor_lang::ast::{CmpOp, StatValue, Token};
use tutor_lang::lexer::tokenize;

#[test]
fn test_basic_clause_tokens() {
    let tokens = tokenize("c:blue t:instant cmc<=2").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Color {
                op: CmpOp::Colon,
                value: "blue".to_string(),
            },
            Token::Type("instant".to_string()),
            Token::Cmc {
                op: CmpOp::Le,
                value: 2.0,
            },
        ]
    );
}

#[test]
fn test_color_identity_wins_over_color() {
    let tokens = tokenize("ci:rg").unwrap();
    assert_eq!(
        tokens,
        vec![Token::ColorIdentity {
            op: CmpOp::Colon,
            value: "rg".to_string(),
        }]
    );
}

#[test]
fn test_cmc_aliases() {
    for query in ["cmc=3", "mv=3", "manavalue=3"] {
        let tokens = tokenize(query).unwrap();
        assert_eq!(
            tokens,
            vec![Token::Cmc {
                op: CmpOp::Eq,
                value: 3.0,
            }],
            "query {query:?}"
        );
    }
}

#[test]
fn test_fractional_mana_value() {
    let tokens = tokenize("cmc=0.5").unwrap();
    assert_eq!(
        tokens,
        vec![Token::Cmc {
            op: CmpOp::Eq,
            value: 0.5,
        }]
    );
}

#[test]
fn test_quoted_oracle_text() {
    let tokens = tokenize("o:\"draw a card\"").unwrap();
    assert_eq!(tokens, vec![Token::Oracle("draw a card".to_string())]);
}

#[test]
fn test_full_oracle_alias() {
    let tokens = tokenize("fo:flying").unwrap();
    assert_eq!(tokens, vec![Token::FullOracle("flying".to_string())]);
}

#[test]
fn test_power_star() {
    let tokens = tokenize("pow=*").unwrap();
    assert_eq!(
        tokens,
        vec![Token::Power {
            op: CmpOp::Eq,
            value: StatValue::Star,
        }]
    );
}

#[test]
fn test_toughness_comparison() {
    let tokens = tokenize("tou>=4").unwrap();
    assert_eq!(
        tokens,
        vec![Token::Toughness {
            op: CmpOp::Ge,
            value: StatValue::Num(4),
        }]
    );
}

#[test]
fn test_price_currencies() {
    let tokens = tokenize("usd<5 eur>=1.5 tix<0.1").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Price {
                currency: "usd".to_string(),
                op: CmpOp::Lt,
                value: 5.0,
            },
            Token::Price {
                currency: "eur".to_string(),
                op: CmpOp::Ge,
                value: 1.5,
            },
            Token::Price {
                currency: "tix".to_string(),
                op: CmpOp::Lt,
                value: 0.1,
            },
        ]
    );
}

#[test]
fn test_collector_number_keeps_string() {
    let tokens = tokenize("cn:100a").unwrap();
    assert_eq!(
        tokens,
        vec![Token::CollectorNumber {
            op: CmpOp::Colon,
            value: "100a".to_string(),
        }]
    );
}

#[test]
fn test_mana_cost_symbols() {
    let tokens = tokenize("m:{2}{U}{U}").unwrap();
    assert_eq!(
        tokens,
        vec![Token::Mana {
            op: CmpOp::Colon,
            value: "{2}{U}{U}".to_string(),
        }]
    );
}

#[test]
fn test_or_keyword_case_insensitive() {
    for query in ["t:elf OR t:goblin", "t:elf or t:goblin"] {
        let tokens = tokenize(query).unwrap();
        assert_eq!(tokens[1], Token::Or, "query {query:?}");
    }
}

#[test]
fn test_or_prefix_word_is_a_name() {
    let tokens = tokenize("ornithopter").unwrap();
    assert_eq!(tokens, vec![Token::PartialName("ornithopter".to_string())]);
}

#[test]
fn test_negation_and_parens() {
    let tokens = tokenize("-(t:elf OR t:goblin)").unwrap();
    assert_eq!(tokens[0], Token::Negation);
    assert_eq!(tokens[1], Token::LParen);
    assert_eq!(tokens[5], Token::RParen);
}

#[test]
fn test_exact_vs_strict_name() {
    let tokens = tokenize("\"Lightning Bolt\"").unwrap();
    assert_eq!(tokens, vec![Token::ExactName("Lightning Bolt".to_string())]);

    let tokens = tokenize("!\"Lightning Bolt\"").unwrap();
    assert_eq!(tokens, vec![Token::StrictName("Lightning Bolt".to_string())]);

    let tokens = tokenize("'Lightning Bolt'").unwrap();
    assert_eq!(tokens, vec![Token::ExactName("Lightning Bolt".to_string())]);
}

#[test]
fn test_bare_words_are_partial_names() {
    let tokens = tokenize("lightning bolt").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::PartialName("lightning".to_string()),
            Token::PartialName("bolt".to_string()),
        ]
    );
}

#[test]
fn test_accented_name() {
    let tokens = tokenize("Lim-Dûl").unwrap();
    assert_eq!(
        tokens,
        vec![Token::PartialName("Lim-Dûl".to_string())]
    );
}

#[test]
fn test_unexpected_character_reports_position() {
    let err = tokenize("t:elf @").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("position 6"), "got: {message}");
    assert!(message.contains('@'), "got: {message}");
}
