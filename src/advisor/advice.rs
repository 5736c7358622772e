//! Advice output models
//!
//! Everything here is plain data with serde derives so the CLI can print
//! it as JSON.

use crate::advisor::{BoardAnalysis, ThreatLevel};
use crate::core::{CardId, CardName, CardType, GamePhase};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulliganDecision {
    pub card_id: CardId,
    pub name: CardName,
    pub keep: bool,
    pub reason: String,
    /// Set when a hand-level limit overrode the per-card verdict
    #[serde(default)]
    pub forced: bool,
}

/// Counts used by the mulligan rules and the summary line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandComposition {
    pub unit_count: usize,
    /// Units at or below the cheap-cost threshold
    pub cheap_unit_count: usize,
    pub spell_count: usize,
    pub gear_count: usize,
    /// Cards costing 4 or more
    pub high_cost_count: usize,
    pub avg_cost: f64,
    /// Two plays at cost 1-2 and one at cost 3
    pub has_curve: bool,
    /// Cards per cost, with 4+ folded into the last slot
    pub cost_distribution: [usize; 5],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MulliganAdvice {
    pub decisions: Vec<MulliganDecision>,
    pub mulligan_count: usize,
    pub summary: String,
    pub composition: HandComposition,
}

impl MulliganAdvice {
    pub fn kept(&self) -> impl Iterator<Item = &MulliganDecision> {
        self.decisions.iter().filter(|d| d.keep)
    }

    pub fn mulliganed(&self) -> impl Iterator<Item = &MulliganDecision> {
        self.decisions.iter().filter(|d| !d.keep)
    }
}

/// Lane chosen for a unit, with the reason shown to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanePlacement {
    pub lane: usize,
    pub score: f64,
    pub reason: String,
}

impl LanePlacement {
    /// Empty lanes and winnable contests
    pub fn is_good(&self) -> bool {
        self.score >= 10.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Moderate,
    Aggressive,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaySequenceStep {
    pub card_id: CardId,
    pub name: CardName,
    /// 1-based position in the sequence
    pub position: usize,
    pub energy_cost: u32,
    pub cumulative_cost: u32,
    /// Lane index, units only
    pub lane: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<LanePlacement>,
    pub dependencies: Vec<CardId>,
    pub reason: String,
}

/// A candidate the scheduler could not admit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscheduledCard {
    pub card_id: CardId,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaySequence {
    pub name: String,
    pub steps: Vec<PlaySequenceStep>,
    pub total_energy: u32,
    /// Energy spent over energy available
    pub efficiency: f64,
    pub risk: RiskLevel,
    pub reasoning: String,
    pub primary: bool,
    #[serde(default)]
    pub unscheduled: Vec<UnscheduledCard>,
}

impl PlaySequence {
    pub fn card_ids(&self) -> Vec<&CardId> {
        self.steps.iter().map(|s| &s.card_id).collect()
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.steps.iter().any(|s| &s.card_id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecommendation {
    pub card_id: CardId,
    pub name: CardName,
    pub card_type: CardType,
    pub energy_cost: u32,
    /// 1-based rank, lower is better
    pub rank: usize,
    pub priority: f64,
    pub recommended: bool,
    pub reason: String,
    pub placement: Option<LanePlacement>,
    pub legend_note: Option<String>,
    pub value_score: f64,
}

/// Scoring internals, kept for inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugBundle {
    pub card_scores: BTreeMap<CardId, f64>,
    pub threat: ThreatLevel,
    pub board: BoardAnalysis,
    pub game_phase: GamePhase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayAdvice {
    pub recommendations: Vec<PlayRecommendation>,
    /// Primary strategy first, then alternatives
    pub strategies: Vec<PlaySequence>,
    pub summary: String,
    pub efficiency_note: Option<String>,
    pub debug: Option<DebugBundle>,
    /// Hand ids that could not be resolved
    #[serde(default)]
    pub missing: Vec<CardId>,
}

impl PlayAdvice {
    /// Advice with nothing to play and an explanation
    pub fn empty(summary: impl Into<String>) -> Self {
        PlayAdvice {
            recommendations: Vec::new(),
            strategies: Vec::new(),
            summary: summary.into(),
            efficiency_note: None,
            debug: None,
            missing: Vec::new(),
        }
    }

    pub fn primary(&self) -> Option<&PlaySequence> {
        self.strategies.iter().find(|s| s.primary)
    }

    pub fn recommended_ids(&self) -> Vec<&CardId> {
        self.recommendations
            .iter()
            .filter(|r| r.recommended)
            .map(|r| &r.card_id)
            .collect()
    }
}
