//! Legends: persistent per-player cards with exhaustible abilities

use crate::core::{AbilityCategory, Card, CardName, Domain, ParsedAbility};
use serde::{Deserialize, Serialize};

/// A player's Legend for the current match
///
/// The ability buckets are derived from the legend's rules text once, when
/// the legend is created. Only the exhausted flag changes during a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub card: Card,
    pub exhausted: bool,
    pub triggered: Vec<ParsedAbility>,
    pub activated: Vec<ParsedAbility>,
    /// Static abilities and standing effects
    pub passive: Vec<ParsedAbility>,
}

impl Legend {
    pub fn new(card: Card, exhausted: bool, abilities: &[ParsedAbility]) -> Self {
        let mut legend = Legend {
            card,
            exhausted,
            triggered: Vec::new(),
            activated: Vec::new(),
            passive: Vec::new(),
        };
        for ability in abilities {
            match ability.category() {
                AbilityCategory::Triggered => legend.triggered.push(ability.clone()),
                AbilityCategory::Activated => legend.activated.push(ability.clone()),
                AbilityCategory::Static | AbilityCategory::Effect => {
                    legend.passive.push(ability.clone())
                }
            }
        }
        legend
    }

    pub fn name(&self) -> &CardName {
        &self.card.name
    }

    pub fn domain(&self) -> Domain {
        self.card.domain
    }

    pub fn is_ready(&self) -> bool {
        !self.exhausted
    }

    /// Activated abilities usable right now (none while exhausted)
    pub fn usable_abilities(&self) -> &[ParsedAbility] {
        if self.exhausted {
            &[]
        } else {
            &self.activated
        }
    }

    pub fn exhaust(&mut self) {
        self.exhausted = true;
    }

    pub fn ready(&mut self) {
        self.exhausted = false;
    }

    pub fn all_abilities(&self) -> impl Iterator<Item = &ParsedAbility> {
        self.triggered
            .iter()
            .chain(self.activated.iter())
            .chain(self.passive.iter())
    }
}
