use std::fmt;

use crate::ast::operators::{CmpOp, ManaOp};

/// One of the five Magic colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    /// Canonical WUBRG ordering.
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    /// Parse a single color symbol, case-insensitively. Anything that is
    /// not one of `wubrg` (including the colorless marker `c`) is `None`.
    pub fn from_char(c: char) -> Option<Color> {
        match c.to_ascii_lowercase() {
            'w' => Some(Color::White),
            'u' => Some(Color::Blue),
            'b' => Some(Color::Black),
            'r' => Some(Color::Red),
            'g' => Some(Color::Green),
            _ => None,
        }
    }
}

/// A set of colors held in canonical WUBRG order.
///
/// Equality is set equality: `c:urg` and `c:gru` produce the same set.
/// The empty set denotes colorless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorSet {
    colors: Vec<Color>,
}

impl ColorSet {
    pub fn new() -> Self {
        ColorSet::default()
    }

    pub fn insert(&mut self, color: Color) {
        if !self.colors.contains(&color) {
            self.colors.push(color);
            self.colors
                .sort_by_key(|c| Color::ALL.iter().position(|a| a == c));
        }
    }

    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().copied()
    }

    /// The colors *not* in this set, in WUBRG order.
    pub fn complement(&self) -> ColorSet {
        Color::ALL
            .into_iter()
            .filter(|c| !self.contains(*c))
            .collect()
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut set = ColorSet::new();
        for color in iter {
            set.insert(color);
        }
        set
    }
}

impl fmt::Display for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("colorless");
        }
        for color in self.iter() {
            write!(f, "{}", color.letter())?;
        }
        Ok(())
    }
}

/// Canonical filter kinds, one per clause family in the query language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Colors,
    ColorIdentity,
    Cmc,
    Type,
    OracleText,
    FlavorText,
    Set,
    Rarity,
    Format,
    Banned,
    Block,
    Produces,
    Watermark,
    Layout,
    ProducesToken,
    Keyword,
    Power,
    Toughness,
    Loyalty,
    CollectorNumber,
    Price,
    Artist,
    Year,
    Mana,
    NameExact,
    NameStrict,
    NamePartial,
}

impl FilterKind {
    /// The canonical key the query surface exposes (`type`, `oracle_text`, ...).
    pub fn canonical_name(self) -> &'static str {
        match self {
            FilterKind::Colors => "colors",
            FilterKind::ColorIdentity => "color_identity",
            FilterKind::Cmc => "cmc",
            FilterKind::Type => "type",
            FilterKind::OracleText => "oracle_text",
            FilterKind::FlavorText => "flavor_text",
            FilterKind::Set => "set",
            FilterKind::Rarity => "rarity",
            FilterKind::Format => "format",
            FilterKind::Banned => "banned",
            FilterKind::Block => "block",
            FilterKind::Produces => "produces",
            FilterKind::Watermark => "watermark",
            FilterKind::Layout => "layout",
            FilterKind::ProducesToken => "produces_token",
            FilterKind::Keyword => "keyword",
            FilterKind::Power => "power",
            FilterKind::Toughness => "toughness",
            FilterKind::Loyalty => "loyalty",
            FilterKind::CollectorNumber => "collector_number",
            FilterKind::Price => "price",
            FilterKind::Artist => "artist",
            FilterKind::Year => "year",
            FilterKind::Mana => "mana",
            FilterKind::NameExact => "name_exact",
            FilterKind::NameStrict => "name_strict",
            FilterKind::NamePartial => "name_partial",
        }
    }

    /// Kinds where repeating the clause accumulates values that are ANDed
    /// together (`o:a o:b` narrows, it does not widen).
    pub fn is_multi_value(self) -> bool {
        matches!(
            self,
            FilterKind::Type
                | FilterKind::OracleText
                | FilterKind::FlavorText
                | FilterKind::Keyword
                | FilterKind::ProducesToken
                | FilterKind::NamePartial
        )
    }
}

/// A canonical filter key: the kind plus whether the clause was negated.
///
/// Negation never shares a key with its positive counterpart, so a query
/// can legally carry both `type` and `type_not`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterKey {
    pub kind: FilterKind,
    pub negated: bool,
}

impl FilterKey {
    pub fn new(kind: FilterKind) -> Self {
        FilterKey {
            kind,
            negated: false,
        }
    }

    pub fn negated(kind: FilterKind) -> Self {
        FilterKey {
            kind,
            negated: true,
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}_not", self.kind.canonical_name())
        } else {
            f.write_str(self.kind.canonical_name())
        }
    }
}

/// A power/toughness value: the literal `*` (variable P/T) is distinct
/// from every integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatValue {
    Star,
    Num(i64),
}

/// The value carried by one filter entry, shaped by its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Mana value comparison; fractional costs (0.5) are real.
    Cmc { op: CmpOp, value: f64 },
    /// Integer comparison (loyalty, year).
    Int { op: CmpOp, value: i64 },
    /// Power/toughness comparison; the value may be the literal `*`.
    Stat { op: CmpOp, value: StatValue },
    /// Collector number; free-form string, compared by numeric prefix when
    /// ordered.
    Collector { op: CmpOp, value: String },
    /// Colors / color identity with set-comparison semantics.
    Colors { op: CmpOp, colors: ColorSet },
    /// Price comparison in one currency.
    Price {
        currency: String,
        op: CmpOp,
        value: f64,
    },
    /// Mana cost containment or exact match.
    Mana { op: ManaOp, cost: String },
    /// Produced-mana colors; the empty set means "produces colorless".
    Produces(ColorSet),
    /// Single textual value (set, rarity, format, watermark, names, ...).
    Text(String),
    /// Accumulated values of a repeated multi-value clause, ANDed together.
    Texts(Vec<String>),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Cmc { op, value } => write!(f, "{op}{value}"),
            FilterValue::Int { op, value } => write!(f, "{op}{value}"),
            FilterValue::Stat { op, value } => match value {
                StatValue::Star => write!(f, "{op}*"),
                StatValue::Num(n) => write!(f, "{op}{n}"),
            },
            FilterValue::Collector { op, value } => write!(f, "{op}{value}"),
            FilterValue::Colors { op, colors } => write!(f, "{op}{colors}"),
            FilterValue::Price {
                currency,
                op,
                value,
            } => write!(f, "{currency}{op}{value}"),
            FilterValue::Mana { op, cost } => match op {
                ManaOp::Contains => write!(f, ":{cost}"),
                ManaOp::Exact => write!(f, "={cost}"),
            },
            FilterValue::Produces(colors) => write!(f, "{colors}"),
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Texts(values) => f.write_str(&values.join("+")),
        }
    }
}

/// A flat AND-map of canonical filter entries, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    entries: Vec<(FilterKey, FilterValue)>,
}

impl Filters {
    pub fn new() -> Self {
        Filters::default()
    }

    /// Add one filter entry.
    ///
    /// Multi-value kinds accumulate into a `Texts` list; everything else
    /// overwrites a previous entry with the same key.
    pub fn insert(&mut self, key: FilterKey, value: FilterValue) {
        if key.kind.is_multi_value() {
            let incoming = match value {
                FilterValue::Texts(vs) => vs,
                FilterValue::Text(v) => vec![v],
                other => {
                    // Multi-value kinds only ever carry text values.
                    self.put(key, other);
                    return;
                }
            };
            if let Some(FilterValue::Texts(existing)) = self.get_mut(key) {
                existing.extend(incoming);
            } else {
                self.put(key, FilterValue::Texts(incoming));
            }
        } else {
            self.put(key, value);
        }
    }

    fn put(&mut self, key: FilterKey, value: FilterValue) {
        if let Some(slot) = self.get_mut(key) {
            *slot = value;
        } else {
            self.entries.push((key, value));
        }
    }

    fn get_mut(&mut self, key: FilterKey) -> Option<&mut FilterValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn get(&self, key: FilterKey) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: FilterKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Fold another filter map into this one, keeping multi-value
    /// accumulation semantics.
    pub fn merge(&mut self, other: Filters) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }
}
