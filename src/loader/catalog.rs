//! Card catalog lookup
//!
//! Catalog records arrive as loose JSON (free-text keywords and tags, a
//! power cost that is either a flat number or a per-domain table).
//! `CardRecord::to_card` normalizes a record once into a `Card`.

use crate::core::{Card, CardType, Domain, Keyword, PowerCost, Tag};
use crate::{AdvisorError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Power cost as stored in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PowerCostRecord {
    /// Flat cost payable from any domain
    Flat(u8),
    Split(PowerCost),
}

impl Default for PowerCostRecord {
    fn default() -> Self {
        PowerCostRecord::Flat(0)
    }
}

impl PowerCostRecord {
    pub fn to_cost(self) -> PowerCost {
        match self {
            PowerCostRecord::Flat(amount) => PowerCost::generic(amount),
            PowerCostRecord::Split(cost) => cost,
        }
    }
}

/// One catalog row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(alias = "card_id")]
    pub id: String,
    pub name: String,
    pub card_type: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub energy_cost: u32,
    #[serde(default)]
    pub power_cost: PowerCostRecord,
    #[serde(default)]
    pub might: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub rules_text: Option<String>,
    #[serde(default)]
    pub set_name: Option<String>,
}

impl CardRecord {
    /// Normalize into a `Card`
    ///
    /// Fails only when the record cannot describe a card at all: a blank id
    /// or name, or an unknown card type or domain.
    pub fn to_card(&self) -> Result<Card> {
        if self.id.trim().is_empty() {
            return Err(AdvisorError::InvalidCardFormat(format!(
                "card '{}' has no id",
                self.name
            )));
        }
        if self.name.trim().is_empty() {
            return Err(AdvisorError::InvalidCardFormat(format!(
                "card {} has no name",
                self.id
            )));
        }

        let invalid = |e: String| AdvisorError::InvalidCardFormat(format!("card {}: {e}", self.id));
        let card_type: CardType = self.card_type.parse().map_err(invalid)?;
        let domain: Domain = self.domain.parse().map_err(invalid)?;

        let mut card = Card::new(self.id.trim(), self.name.trim(), card_type);
        card.domain = domain;
        card.energy_cost = self.energy_cost;
        card.power_cost = self.power_cost.to_cost();
        // Might only means something on units
        card.might = match card_type {
            CardType::Unit => Some(self.might.unwrap_or(0)),
            _ => None,
        };
        card.keywords = self
            .keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .map(|k| Keyword::from_text(k))
            .collect();
        card.tags = self
            .tags
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| Tag::from_text(t))
            .collect();
        card.rules_text = self.rules_text.clone().unwrap_or_default();

        Ok(card)
    }
}

/// Read-only card lookup by id
pub trait CardCatalog {
    fn get_card(&self, id: &str) -> Option<&CardRecord>;

    /// Look up and normalize in one step
    fn resolve_card(&self, id: &str) -> Option<Result<Card>> {
        self.get_card(id).map(CardRecord::to_card)
    }
}

/// In-memory catalog keyed by card id
#[derive(Debug, Clone, Default)]
pub struct CardDatabase {
    cards: FxHashMap<String, CardRecord>,
}

impl CardDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of card records
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AdvisorError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Card catalog not found: {path:?}"),
            )));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<CardRecord> = serde_json::from_str(json)?;
        Ok(records.into_iter().collect())
    }

    /// Add a record, replacing any earlier record with the same id
    pub fn add_card(&mut self, record: CardRecord) {
        self.cards.insert(record.id.trim().to_string(), record);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cards.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.values()
    }
}

impl CardCatalog for CardDatabase {
    fn get_card(&self, id: &str) -> Option<&CardRecord> {
        self.cards.get(id.trim())
    }
}

impl FromIterator<CardRecord> for CardDatabase {
    fn from_iter<I: IntoIterator<Item = CardRecord>>(iter: I) -> Self {
        let mut db = CardDatabase::new();
        for record in iter {
            db.add_card(record);
        }
        db
    }
}
