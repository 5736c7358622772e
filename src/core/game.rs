//! Per-turn game state handed to the advisor

use crate::core::{Lane, Phase, PlayerState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub turn: u32,
    pub phase: Phase,
    pub going_first: bool,
    pub me: PlayerState,
    /// Partially visible; the opponent's hand is normally empty
    pub opponent: PlayerState,
    pub lanes: Vec<Lane>,
}

impl GameState {
    pub fn new(turn: u32, phase: Phase, me: PlayerState, opponent: PlayerState, lanes: Vec<Lane>) -> Self {
        GameState {
            turn,
            phase,
            going_first: true,
            me,
            opponent,
            lanes,
        }
    }

    pub fn going_second(mut self) -> Self {
        self.going_first = false;
        self
    }
}
