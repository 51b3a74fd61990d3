//! Card records as deserialized from a Scryfall-style bulk JSON export.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Layouts whose searchable fields live in `card_faces` rather than at
/// the top level.
pub const DOUBLE_FACED_LAYOUTS: &[&str] = &[
    "transform",
    "modal_dfc",
    "split",
    "adventure",
    "meld",
    "flip",
    "reversible_card",
];

/// One face of a multi-faced card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub flavor_text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
}

/// A card related to this one (`all_parts` in the bulk data): tokens it
/// creates, meld partners, and similar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedCard {
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub name: String,
}

/// A single card record. Unknown bulk-data fields are ignored on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub oracle_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cmc: Option<f64>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub flavor_text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(rename = "set", default)]
    pub set_code: String,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub collector_number: String,
    #[serde(default)]
    pub watermark: Option<String>,
    #[serde(default)]
    pub layout: String,
    #[serde(default)]
    pub produced_mana: Option<Vec<String>>,
    #[serde(default)]
    pub legalities: HashMap<String, String>,
    #[serde(default)]
    pub prices: HashMap<String, Option<String>>,
    #[serde(default)]
    pub card_faces: Vec<CardFace>,
    #[serde(default)]
    pub all_parts: Vec<RelatedCard>,
    /// Names of token cards this card creates, derived from `all_parts`.
    #[serde(skip)]
    pub token_names: Vec<String>,
}

impl Card {
    /// Fill in searchable fields for multi-faced cards and derive the
    /// token-name list. Called once on ingest.
    pub fn normalize(&mut self) {
        if DOUBLE_FACED_LAYOUTS.contains(&self.layout.as_str()) && !self.card_faces.is_empty() {
            self.merge_faces();
        }
        self.token_names = self
            .all_parts
            .iter()
            .filter(|part| part.component == "token")
            .map(|part| part.name.clone())
            .collect();
    }

    /// Combine per-face fields into the top-level ones the filters read.
    /// Text fields join with " // ", stats come from the first face that
    /// has them, colors are the union over faces. Top-level values win
    /// when present.
    fn merge_faces(&mut self) {
        if self.oracle_text.is_none() {
            self.oracle_text = join_faces(&self.card_faces, |f| f.oracle_text.as_deref());
        }
        if self.mana_cost.is_none() {
            self.mana_cost = join_faces(&self.card_faces, |f| f.mana_cost.as_deref());
        }
        if self.type_line.is_none() {
            self.type_line = join_faces(&self.card_faces, |f| f.type_line.as_deref());
        }
        if self.flavor_text.is_none() {
            self.flavor_text = join_faces(&self.card_faces, |f| f.flavor_text.as_deref());
        }
        if self.power.is_none() {
            self.power = self
                .card_faces
                .iter()
                .find_map(|f| f.power.clone());
        }
        if self.toughness.is_none() {
            self.toughness = self
                .card_faces
                .iter()
                .find_map(|f| f.toughness.clone());
        }
        if self.loyalty.is_none() {
            self.loyalty = self
                .card_faces
                .iter()
                .find_map(|f| f.loyalty.clone());
        }
        if self.colors.is_empty() {
            let mut union: Vec<String> = Vec::new();
            for face in &self.card_faces {
                for color in face.colors.iter().flatten() {
                    if !union.contains(color) {
                        union.push(color.clone());
                    }
                }
            }
            union.sort_by_key(|c| wubrg_rank(c));
            self.colors = union;
        }
    }

    /// Release year parsed from the leading `YYYY` of `released_at`.
    pub fn release_year(&self) -> Option<i64> {
        let date = self.released_at.as_deref()?;
        date.get(..4)?.parse().ok()
    }
}

fn join_faces<'a>(
    faces: &'a [CardFace],
    get: impl Fn(&'a CardFace) -> Option<&'a str>,
) -> Option<String> {
    let parts: Vec<&str> = faces.iter().filter_map(get).filter(|s| !s.is_empty()).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" // "))
    }
}

fn wubrg_rank(color: &str) -> usize {
    match color {
        "W" => 0,
        "U" => 1,
        "B" => 2,
        "R" => 3,
        "G" => 4,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_faces_joins_text() {
        let mut card = Card {
            layout: "transform".to_string(),
            card_faces: vec![
                CardFace {
                    name: "Delver of Secrets".to_string(),
                    oracle_text: Some("Front text".to_string()),
                    mana_cost: Some("{U}".to_string()),
                    type_line: Some("Creature — Human Wizard".to_string()),
                    power: Some("1".to_string()),
                    toughness: Some("1".to_string()),
                    colors: Some(vec!["U".to_string()]),
                    ..CardFace::default()
                },
                CardFace {
                    name: "Insectile Aberration".to_string(),
                    oracle_text: Some("Back text".to_string()),
                    type_line: Some("Creature — Human Insect".to_string()),
                    power: Some("3".to_string()),
                    toughness: Some("2".to_string()),
                    colors: Some(vec!["U".to_string()]),
                    ..CardFace::default()
                },
            ],
            ..Card::default()
        };
        card.normalize();
        assert_eq!(card.oracle_text.as_deref(), Some("Front text // Back text"));
        assert_eq!(card.power.as_deref(), Some("1"));
        assert_eq!(card.colors, vec!["U".to_string()]);
    }

    #[test]
    fn test_top_level_fields_win() {
        let mut card = Card {
            layout: "split".to_string(),
            oracle_text: Some("already here".to_string()),
            card_faces: vec![CardFace {
                oracle_text: Some("face text".to_string()),
                ..CardFace::default()
            }],
            ..Card::default()
        };
        card.normalize();
        assert_eq!(card.oracle_text.as_deref(), Some("already here"));
    }

    #[test]
    fn test_token_names_from_parts() {
        let mut card = Card {
            all_parts: vec![
                RelatedCard {
                    component: "combo_piece".to_string(),
                    name: "Other Card".to_string(),
                },
                RelatedCard {
                    component: "token".to_string(),
                    name: "Zombie".to_string(),
                },
            ],
            ..Card::default()
        };
        card.normalize();
        assert_eq!(card.token_names, vec!["Zombie".to_string()]);
    }

    #[test]
    fn test_release_year() {
        let card = Card {
            released_at: Some("2011-09-30".to_string()),
            ..Card::default()
        };
        assert_eq!(card.release_year(), Some(2011));
    }
}
