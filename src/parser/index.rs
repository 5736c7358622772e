//! Parsed abilities keyed by card id
//!
//! Built once per resolved game. Cards themselves stay immutable; anything
//! that needs a card's abilities looks them up here.

use crate::core::{Card, CardId, ParsedAbility};
use crate::parser::AbilityParser;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct AbilityIndex {
    abilities: FxHashMap<CardId, Vec<ParsedAbility>>,
}

impl AbilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every card once; repeated ids reuse the first parse
    pub fn build<'a>(parser: &AbilityParser, cards: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut index = AbilityIndex::new();
        for card in cards {
            index.insert_card(parser, card);
        }
        index
    }

    pub fn insert_card(&mut self, parser: &AbilityParser, card: &Card) {
        self.abilities
            .entry(card.id.clone())
            .or_insert_with(|| parser.parse_card(card));
    }

    pub fn insert(&mut self, id: CardId, abilities: Vec<ParsedAbility>) {
        self.abilities.insert(id, abilities);
    }

    /// Abilities for a card id (empty when the card has none or is unknown)
    pub fn get(&self, id: &CardId) -> &[ParsedAbility] {
        self.abilities.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn abilities_for(&self, card: &Card) -> &[ParsedAbility] {
        self.get(&card.id)
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.abilities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AbilityKind, CardType};

    #[test]
    fn test_build_and_lookup() {
        let parser = AbilityParser::new().unwrap();
        let mut card = Card::new("OGN-100", "Zap", CardType::Spell);
        card.rules_text = "Deal 3 damage to target unit".to_string();
        let blank = Card::new("OGN-101", "Vanilla", CardType::Unit);

        let index = AbilityIndex::build(&parser, [&card, &blank]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.abilities_for(&card)[0].kind, AbilityKind::Damage);
        assert!(index.abilities_for(&blank).is_empty());
        assert!(index.get(&CardId::new("missing")).is_empty());
    }
}
