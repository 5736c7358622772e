//! Battlefield state analysis over the two lanes

use crate::config::AdvisorConfig;
use crate::core::{check_lane_count, Lane};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of one lane from our point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaneState {
    /// No units on either side
    Empty,
    /// Only our unit, or both with ours stronger
    Winning,
    /// Only an opponent unit
    Contested,
    /// Both present, theirs stronger
    Losing,
    /// Both present, equal might
    Neutral,
}

impl LaneState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaneState::Empty => "empty",
            LaneState::Winning => "winning",
            LaneState::Contested => "contested",
            LaneState::Losing => "losing",
            LaneState::Neutral => "neutral",
        }
    }
}

impl fmt::Display for LaneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "low",
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
            ThreatLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneAnalysis {
    pub index: usize,
    pub state: LaneState,
    pub my_might: i32,
    pub op_might: i32,
    /// Positive when we are ahead
    pub advantage: i32,
    pub has_my_unit: bool,
    pub has_op_unit: bool,
    pub description: String,
}

impl LaneAnalysis {
    pub fn new(index: usize, lane: &Lane) -> Self {
        let my_might = lane.my_might();
        let op_might = lane.op_might();
        Self::from_parts(
            index,
            lane.my_unit.is_some(),
            lane.op_unit.is_some(),
            my_might,
            op_might,
        )
    }

    /// Classify a lane from presence flags and might totals
    pub fn from_parts(index: usize, mine: bool, theirs: bool, my_might: i32, op_might: i32) -> Self {
        let (state, advantage, description) = match (mine, theirs) {
            (false, false) => (
                LaneState::Empty,
                0,
                "Empty battlefield - good for establishing presence".to_string(),
            ),
            (true, false) => (
                LaneState::Winning,
                my_might,
                format!("Winning battlefield with {my_might} might unit"),
            ),
            (false, true) => (
                LaneState::Contested,
                -op_might,
                format!("Contested battlefield - opponent has {op_might} might unit"),
            ),
            (true, true) => {
                let advantage = my_might - op_might;
                let (state, label) = match advantage.signum() {
                    1 => (LaneState::Winning, "Winning trade"),
                    -1 => (LaneState::Losing, "Losing trade"),
                    _ => (LaneState::Neutral, "Even trade"),
                };
                (
                    state,
                    advantage,
                    format!("{label} ({my_might} vs {op_might} might)"),
                )
            }
        };

        LaneAnalysis {
            index,
            state,
            my_might: if mine { my_might } else { 0 },
            op_might: if theirs { op_might } else { 0 },
            advantage,
            has_my_unit: mine,
            has_op_unit: theirs,
            description,
        }
    }

    /// The same lane after we add a unit of `might` to our side
    pub fn with_my_unit(&self, might: i32) -> Self {
        Self::from_parts(
            self.index,
            true,
            self.has_op_unit,
            self.my_might + might,
            self.op_might,
        )
    }
}

/// Whole-board summary and threat assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardAnalysis {
    pub lanes: Vec<LaneAnalysis>,
    pub my_total_might: i32,
    pub op_total_might: i32,
    pub my_average_might: f64,
    pub op_average_might: f64,
    pub my_units: usize,
    pub op_units: usize,
    pub empty_count: usize,
    pub winning_count: usize,
    pub contested_count: usize,
    pub losing_count: usize,
    pub neutral_count: usize,
    pub threat: ThreatLevel,
}

impl BoardAnalysis {
    pub fn count(&self, state: LaneState) -> usize {
        self.lanes.iter().filter(|l| l.state == state).count()
    }

    /// Lanes where we have no unit yet
    pub fn open_lanes(&self) -> usize {
        self.lanes.len() - self.my_units
    }

    pub fn description(&self) -> String {
        let parts: Vec<String> = [
            (self.empty_count, "empty"),
            (self.contested_count, "contested"),
            (self.winning_count, "winning"),
            (self.losing_count, "losing"),
            (self.neutral_count, "neutral"),
        ]
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, label)| format!("{n} {label} battlefield(s)"))
        .collect();
        parts.join(", ")
    }
}

/// Analyze the two lanes and derive the threat level
///
/// Rejects any lane list that is not exactly two long.
pub fn analyze_board(
    lanes: &[Lane],
    opponent_score: u32,
    config: &AdvisorConfig,
) -> Result<BoardAnalysis> {
    check_lane_count(lanes)?;

    let analyses: Vec<LaneAnalysis> = lanes
        .iter()
        .enumerate()
        .map(|(i, lane)| LaneAnalysis::new(i, lane))
        .collect();

    let my_units = lanes.iter().filter(|l| l.my_unit.is_some()).count();
    let op_units = lanes.iter().filter(|l| l.op_unit.is_some()).count();
    let my_total_might: i32 = lanes.iter().map(Lane::my_might).sum();
    let op_total_might: i32 = lanes.iter().map(Lane::op_might).sum();

    let mut board = BoardAnalysis {
        my_average_might: average(my_total_might, my_units),
        op_average_might: average(op_total_might, op_units),
        my_total_might,
        op_total_might,
        my_units,
        op_units,
        empty_count: 0,
        winning_count: 0,
        contested_count: 0,
        losing_count: 0,
        neutral_count: 0,
        threat: ThreatLevel::Low,
        lanes: analyses,
    };
    board.empty_count = board.count(LaneState::Empty);
    board.winning_count = board.count(LaneState::Winning);
    board.contested_count = board.count(LaneState::Contested);
    board.losing_count = board.count(LaneState::Losing);
    board.neutral_count = board.count(LaneState::Neutral);
    board.threat = assess_threat(&board, opponent_score, config);

    Ok(board)
}

fn average(total: i32, units: usize) -> f64 {
    if units == 0 {
        0.0
    } else {
        f64::from(total) / units as f64
    }
}

fn assess_threat(board: &BoardAnalysis, opponent_score: u32, config: &AdvisorConfig) -> ThreatLevel {
    let opponent_held = board.lanes.iter().all(|l| {
        matches!(l.state, LaneState::Contested | LaneState::Losing)
    });

    if opponent_held {
        ThreatLevel::Critical
    } else if board.op_total_might - board.my_total_might >= 4
        || (config.under_pressure(opponent_score) && board.op_units > 0)
    {
        ThreatLevel::High
    } else if board.losing_count > 0 {
        ThreatLevel::Medium
    } else {
        ThreatLevel::Low
    }
}
