//! Turn phases and coarse game stages

use crate::AdvisorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Phase within a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Mulligan,
    Main,
    Combat,
    Showdown,
    End,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Mulligan => "mulligan",
            Phase::Main => "main",
            Phase::Combat => "combat",
            Phase::Showdown => "showdown",
            Phase::End => "end",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Phase {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mulligan" => Ok(Phase::Mulligan),
            "main" => Ok(Phase::Main),
            "combat" => Ok(Phase::Combat),
            "showdown" => Ok(Phase::Showdown),
            "end" => Ok(Phase::End),
            _ => Err(AdvisorError::UnknownPhase(s.to_string())),
        }
    }
}

/// Coarse stage of the match, derived from the turn number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Early,
    Mid,
    Late,
}

impl GamePhase {
    /// Early through `early_until`, mid through `mid_until`, late after
    pub fn from_turn(turn: u32, early_until: u32, mid_until: u32) -> Self {
        if turn <= early_until {
            GamePhase::Early
        } else if turn <= mid_until {
            GamePhase::Mid
        } else {
            GamePhase::Late
        }
    }

    pub fn is_early(&self) -> bool {
        *self == GamePhase::Early
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Early => "early",
            GamePhase::Mid => "mid",
            GamePhase::Late => "late",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_from_str() {
        assert_eq!("Main".parse::<Phase>().unwrap(), Phase::Main);
        assert_eq!("showdown".parse::<Phase>().unwrap(), Phase::Showdown);
        match "upkeep".parse::<Phase>() {
            Err(AdvisorError::UnknownPhase(p)) => assert_eq!(p, "upkeep"),
            other => panic!("expected UnknownPhase, got {other:?}"),
        }
    }

    #[test]
    fn test_game_phase_from_turn() {
        assert_eq!(GamePhase::from_turn(1, 3, 6), GamePhase::Early);
        assert_eq!(GamePhase::from_turn(3, 3, 6), GamePhase::Early);
        assert_eq!(GamePhase::from_turn(4, 3, 6), GamePhase::Mid);
        assert_eq!(GamePhase::from_turn(7, 3, 6), GamePhase::Late);
    }
}
