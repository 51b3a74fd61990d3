use crate::ast::filters::StatValue;
use crate::ast::operators::CmpOp;

/// A lexical token produced by the query tokenizer.
///
/// Clause tokens carry their raw payload; domain normalization (color
/// words, rarity aliases, keyword casing) happens in the clause
/// interpreter, immediately after tokenization.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `c:blue`, `c>=rg`, `color:urg` — raw color string plus operator.
    Color { op: CmpOp, value: String },

    /// `id:wubrg`, `identity:esper`, `ci:rg`.
    ColorIdentity { op: CmpOp, value: String },

    /// `cmc:3`, `mv>=5`, `manavalue<2.5` — mana value, fractional costs allowed.
    Cmc { op: CmpOp, value: f64 },

    /// `t:creature`, `type:"legendary creature"`.
    Type(String),

    /// `o:flying`, `oracle:"enters the battlefield"`, `text:draw`.
    Oracle(String),

    /// `fo:` / `fulloracle:` — alias of `Oracle`; reminder text is already
    /// part of stored oracle text.
    FullOracle(String),

    /// `ft:"flavor text"`, `flavor:doom`.
    Flavor(String),

    /// `set:neo`, `e:m19`, `s:cmd`, `edition:dom`.
    Set(String),

    /// `r:mythic`, `rarity:c`.
    Rarity(String),

    /// `f:modern`, `format:standard`, `legal:vintage`.
    Format(String),

    /// `banned:modern`.
    Banned(String),

    /// `b:innistrad`, `block:zendikar`.
    Block(String),

    /// `produces:g`, `produces:wubrg`, `produces:c`.
    Produces(String),

    /// `wm:phyrexian`, `watermark:selesnya`.
    Watermark(String),

    /// `layout:transform`, `layout:modal_dfc`.
    Layout(String),

    /// `pt:zombie`, `produces_token:"Goblin Token"`.
    ProducesToken(String),

    /// `kw:flying`, `keyword:deathtouch`.
    Keyword(String),

    /// `pow:3`, `power>=4`, `pow:*`.
    Power { op: CmpOp, value: StatValue },

    /// `tou:3`, `toughness<2`, `tou:*`.
    Toughness { op: CmpOp, value: StatValue },

    /// `loy:3`, `loyalty>=4`.
    Loyalty { op: CmpOp, value: i64 },

    /// `cn:123`, `cn:1a`, `number>100`.
    CollectorNumber { op: CmpOp, value: String },

    /// `usd<1`, `eur>=10`, `tix:2.5`.
    Price {
        currency: String,
        op: CmpOp,
        value: f64,
    },

    /// `a:"Rebecca Guay"`, `artist:Seb`.
    Artist(String),

    /// `year:2023`, `year>=2020`.
    Year { op: CmpOp, value: i64 },

    /// `m:{R}{R}`, `mana={2}{U}{U}`.
    Mana { op: CmpOp, value: String },

    /// The `OR` keyword.
    Or,

    /// A `-` immediately before a clause or group.
    Negation,

    LParen,
    RParen,

    /// `"Lightning Bolt"` — exact (case-insensitive) name.
    ExactName(String),

    /// `!"Lightning Bolt"` — strict, byte-exact name.
    StrictName(String),

    /// A bare word: partial name match.
    PartialName(String),
}
