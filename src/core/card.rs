//! Card types and definitions

use crate::core::{CardId, CardName, Domain, PowerCost};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Card types in Riftbound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Unit,
    Gear,
    Spell,
    Legend,
    Battlefield,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Unit => "unit",
            CardType::Gear => "gear",
            CardType::Spell => "spell",
            CardType::Legend => "legend",
            CardType::Battlefield => "battlefield",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unit" => Ok(CardType::Unit),
            "gear" => Ok(CardType::Gear),
            "spell" => Ok(CardType::Spell),
            "legend" => Ok(CardType::Legend),
            "battlefield" => Ok(CardType::Battlefield),
            other => Err(format!("unknown card type '{other}'")),
        }
    }
}

/// Keyword abilities printed on cards
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    Assault,
    Guard,
    Ambush,
    Quick,
    Reaction,
    Support,
    Weaponmaster,
    Flying,
    Overwhelm,
    Lifesteal,
    DoubleStrike,
    FirstStrike,
    Vigilance,
    Trample,
    Hexproof,
    Protection,

    // Catch-all for other keywords (keeps the printed text)
    Other(String),
}

impl Keyword {
    /// Normalize a printed keyword; unknown words become `Other`
    pub fn from_text(text: &str) -> Keyword {
        let trimmed = text.trim();
        match trimmed.to_lowercase().replace(['-', '_'], " ").as_str() {
            "assault" => Keyword::Assault,
            "guard" => Keyword::Guard,
            "ambush" => Keyword::Ambush,
            "quick" => Keyword::Quick,
            "reaction" => Keyword::Reaction,
            "support" => Keyword::Support,
            "weaponmaster" => Keyword::Weaponmaster,
            "flying" => Keyword::Flying,
            "overwhelm" => Keyword::Overwhelm,
            "lifesteal" => Keyword::Lifesteal,
            "double strike" => Keyword::DoubleStrike,
            "first strike" => Keyword::FirstStrike,
            "vigilance" => Keyword::Vigilance,
            "trample" => Keyword::Trample,
            "hexproof" => Keyword::Hexproof,
            "protection" => Keyword::Protection,
            _ => Keyword::Other(trimmed.to_string()),
        }
    }

    /// Flat valuation contribution of this keyword on a unit
    pub fn value(&self) -> f64 {
        match self {
            Keyword::DoubleStrike => 3.0,
            Keyword::Overwhelm => 2.5,
            Keyword::Assault | Keyword::FirstStrike | Keyword::Trample => 2.0,
            Keyword::Ambush
            | Keyword::Lifesteal
            | Keyword::Flying
            | Keyword::Hexproof
            | Keyword::Protection => 1.5,
            Keyword::Guard | Keyword::Quick | Keyword::Vigilance | Keyword::Weaponmaster => 1.0,
            Keyword::Support | Keyword::Reaction => 0.5,
            Keyword::Other(_) => 0.0,
        }
    }

    /// Keywords that let a card be played outside the main phase
    pub fn is_fast(&self) -> bool {
        matches!(self, Keyword::Quick | Keyword::Reaction | Keyword::Ambush)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Keyword::Assault => "assault",
            Keyword::Guard => "guard",
            Keyword::Ambush => "ambush",
            Keyword::Quick => "quick",
            Keyword::Reaction => "reaction",
            Keyword::Support => "support",
            Keyword::Weaponmaster => "weaponmaster",
            Keyword::Flying => "flying",
            Keyword::Overwhelm => "overwhelm",
            Keyword::Lifesteal => "lifesteal",
            Keyword::DoubleStrike => "double strike",
            Keyword::FirstStrike => "first strike",
            Keyword::Vigilance => "vigilance",
            Keyword::Trample => "trample",
            Keyword::Hexproof => "hexproof",
            Keyword::Protection => "protection",
            Keyword::Other(text) => text,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Free-text catalog tags, normalized at ingestion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Removal,
    Destroy,
    Damage,
    Buff,
    Protection,
    Draw,
    Other(String),
}

impl Tag {
    pub fn from_text(text: &str) -> Tag {
        let trimmed = text.trim();
        match trimmed.to_lowercase().as_str() {
            "removal" => Tag::Removal,
            "destroy" => Tag::Destroy,
            "damage" => Tag::Damage,
            "buff" => Tag::Buff,
            "protection" => Tag::Protection,
            "draw" => Tag::Draw,
            _ => Tag::Other(trimmed.to_string()),
        }
    }

    pub fn is_removal(&self) -> bool {
        matches!(self, Tag::Removal | Tag::Destroy | Tag::Damage)
    }

    /// Lowercase form used for tribal overlap checks
    pub fn key(&self) -> String {
        match self {
            Tag::Removal => "removal".to_string(),
            Tag::Destroy => "destroy".to_string(),
            Tag::Damage => "damage".to_string(),
            Tag::Buff => "buff".to_string(),
            Tag::Protection => "protection".to_string(),
            Tag::Draw => "draw".to_string(),
            Tag::Other(text) => text.to_lowercase(),
        }
    }
}

/// A card as the advisor sees it (hand card or catalog entry)
///
/// Cards are immutable once resolved. Parsed abilities live in a separate
/// `AbilityIndex` keyed by card id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    /// Display name (e.g., "Jinx, Loose Cannon")
    pub name: CardName,

    pub card_type: CardType,

    pub domain: Domain,

    /// Energy spent to play the card
    pub energy_cost: u32,

    /// Power (rune recycle) cost, flat and per domain
    pub power_cost: PowerCost,

    /// Might (units only)
    pub might: Option<i32>,

    pub keywords: SmallVec<[Keyword; 2]>,

    pub tags: SmallVec<[Tag; 2]>,

    /// Rules text, unchanged from the catalog
    pub rules_text: String,
}

impl Card {
    pub fn new(id: impl Into<CardId>, name: impl Into<CardName>, card_type: CardType) -> Self {
        Card {
            id: id.into(),
            name: name.into(),
            card_type,
            domain: Domain::Colorless,
            energy_cost: 0,
            power_cost: PowerCost::new(),
            might: None,
            keywords: SmallVec::new(),
            tags: SmallVec::new(),
            rules_text: String::new(),
        }
    }

    pub fn is_unit(&self) -> bool {
        self.card_type == CardType::Unit
    }

    pub fn is_spell(&self) -> bool {
        self.card_type == CardType::Spell
    }

    pub fn is_gear(&self) -> bool {
        self.card_type == CardType::Gear
    }

    pub fn has_keyword(&self, keyword: &Keyword) -> bool {
        self.keywords.contains(keyword)
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn has_removal_tag(&self) -> bool {
        self.tags.iter().any(Tag::is_removal)
    }

    pub fn might_or_zero(&self) -> i32 {
        self.might.unwrap_or(0)
    }

    pub fn rules_lower(&self) -> String {
        self.rules_text.to_lowercase()
    }

    /// Short description used in reasons and summaries
    pub fn describe(&self) -> String {
        format!("{} ({}, cost {})", self.name, self.card_type, self.energy_cost)
    }
}
