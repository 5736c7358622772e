//! Player state for one side of the table

use crate::core::{Card, Legend, PowerPool};
use serde::{Deserialize, Serialize};

/// Resources and hand of one player, as visible to the advisor
///
/// For the opponent only the legend, score and board are normally known;
/// the hand stays empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Energy available this turn
    pub energy: u32,
    /// Power available this turn, by domain
    pub power: PowerPool,
    /// Victory points scored so far
    pub score: u32,
    pub legend: Option<Legend>,
    pub hand: Vec<Card>,
}

impl PlayerState {
    pub fn new(energy: u32) -> Self {
        PlayerState {
            energy,
            ..Self::default()
        }
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    pub fn with_hand(mut self, hand: Vec<Card>) -> Self {
        self.hand = hand;
        self
    }

    /// True when a legend exists and is ready to be exhausted
    pub fn can_exhaust_legend(&self) -> bool {
        self.legend.as_ref().is_some_and(Legend::is_ready)
    }

    pub fn legend_exhausted(&self) -> bool {
        self.legend.as_ref().is_some_and(|l| l.exhausted)
    }
}
