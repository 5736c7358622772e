//! Advisor tunables
//!
//! Every field has a default, so a config file only needs the values it
//! overrides.

use crate::core::GamePhase;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Opening hand size (game rule)
    pub opening_hand_size: usize,
    /// Maximum cards that may be sent back during mulligan
    pub max_mulligans: usize,
    /// Last turn that counts as early game
    pub early_game_until: u32,
    /// Last turn that counts as mid game
    pub mid_game_until: u32,
    /// Cards at or below this energy cost count as cheap
    pub cheap_cost: u32,
    /// Multiplier applied to the summed legend-synergy modifier
    pub legend_multiplier: f64,
    /// Legend total at or above which a card counts as high synergy
    pub high_synergy_threshold: f64,
    /// Score needed to win the match
    pub victory_score: u32,
    /// Opponent within this many points of victory means we are under pressure
    pub score_margin: u32,
    /// Sum opponent counter-play modifiers into a card's legend total
    pub include_opponent_synergy: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            opening_hand_size: 4,
            max_mulligans: 2,
            early_game_until: 3,
            mid_game_until: 6,
            cheap_cost: 2,
            legend_multiplier: 1.5,
            high_synergy_threshold: 1.0,
            victory_score: 8,
            score_margin: 2,
            include_opponent_synergy: false,
        }
    }
}

impl AdvisorConfig {
    /// Load a JSON config file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn game_phase(&self, turn: u32) -> GamePhase {
        GamePhase::from_turn(turn, self.early_game_until, self.mid_game_until)
    }

    pub fn is_cheap(&self, energy_cost: u32) -> bool {
        energy_cost <= self.cheap_cost
    }

    /// True when the opponent is close enough to victory to force answers
    pub fn under_pressure(&self, opponent_score: u32) -> bool {
        opponent_score + self.score_margin >= self.victory_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdvisorConfig::default();
        assert_eq!(config.opening_hand_size, 4);
        assert_eq!(config.max_mulligans, 2);
        assert_eq!(config.game_phase(3), GamePhase::Early);
        assert_eq!(config.game_phase(6), GamePhase::Mid);
        assert!(config.is_cheap(2));
        assert!(!config.is_cheap(3));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AdvisorConfig::from_json(r#"{ "legend_multiplier": 2.0 }"#).unwrap();
        assert_eq!(config.legend_multiplier, 2.0);
        assert_eq!(config.victory_score, 8);
        assert!(!config.include_opponent_synergy);
    }

    #[test]
    fn test_under_pressure() {
        let config = AdvisorConfig::default();
        assert!(!config.under_pressure(5));
        assert!(config.under_pressure(6));
    }
}
