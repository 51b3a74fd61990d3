use thiserror::Error;

/// Brief syntax summary for embedding in tool descriptions.
pub const SYNTAX_SUMMARY: &str = "Supports: name, colors (c:blue), mana value (cmc:3), \
mana cost (m:{R}{R}), type (t:creature), oracle text (o:flying), set (set:neo), \
rarity (r:mythic), format (f:modern), power/toughness (pow:3, tou:4), keywords (kw:flying), \
artist (a:name), year (year:2023), produces token (pt:zombie). \
Boolean operators: implicit AND, OR, - (negation), (parentheses).";

/// One example line per clause kind. This enumeration is a user-facing
/// contract: it is surfaced verbatim on every parse failure so a caller
/// (human or agent) can self-correct, and it must stay in sync with the
/// lexer's pattern table.
pub const SUPPORTED_SYNTAX: &[&str] = &[
    "name search: \"Lightning Bolt\" (exact), bolt (partial), !\"Exact Name\" (strict)",
    "colors: c:blue, c:urg, c>=rg, c<=w, c:c (colorless)",
    "color identity: id:wubrg, identity:esper, ci:rg (for Commander)",
    "mana value: cmc:3, cmc>=5, cmc<2, mv:3",
    "mana cost: m:{R}, m:{2}{U}{U}, mana:{W}{W} (exact symbols)",
    "type: t:creature, t:\"legendary creature\"",
    "oracle text: o:flying, o:\"enters the battlefield\"",
    "keyword ability: kw:flying, keyword:deathtouch, keywords:vigilance",
    "set: set:neo, e:m19, s:cmd",
    "rarity: r:mythic, r:rare, r:uncommon, r:common",
    "format: f:standard, f:modern, f:legacy, f:vintage, f:commander",
    "banned: banned:modern (cards banned in a format)",
    "block: b:innistrad, block:zendikar (pre-Dominaria blocks)",
    "produces mana: produces:g, produces:wubrg, produces:c (colorless)",
    "watermark: wm:phyrexian, watermark:selesnya",
    "layout: layout:transform, layout:modal_dfc, layout:adventure",
    "power: pow:3, pow>=4, power<2",
    "toughness: tou:3, tou>=4, toughness<2",
    "loyalty: loy:3, loy>=4, loyalty<5 (planeswalkers)",
    "artist: a:\"Rebecca Guay\", artist:Seb",
    "year: year:2023, year>=2020, year<2015",
    "flavor text: ft:\"flavor text\" (search flavor text)",
    "collector number: cn:123, cn:1a (find specific printings)",
    "price: usd<1, usd>=10, eur<5",
    "produces token: pt:zombie, produces_token:\"Goblin Token\" (find token creators)",
    "boolean: implicit AND, OR, - (negation), parentheses",
];

/// Error parsing a query, with enough context for the caller to
/// self-correct: a short message, a one-line hint, and the full
/// supported-syntax enumeration.
///
/// Parse failures are always recoverable; the caller retries with
/// corrected text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}. Hint: {hint}")]
pub struct QueryError {
    pub message: String,
    pub hint: String,
    pub supported_syntax: &'static [&'static str],
}

impl QueryError {
    pub fn new(message: impl Into<String>, hint: impl Into<String>) -> Self {
        QueryError {
            message: message.into(),
            hint: hint.into(),
            supported_syntax: SUPPORTED_SYNTAX,
        }
    }
}
