//! Battlefield lanes
//!
//! A match always has exactly two lanes. Each holds at most one unit per side.

use crate::core::{CardId, Domain, Keyword};
use crate::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of lanes in a 1v1 match
pub const LANE_COUNT: usize = 2;

/// A unit already on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneUnit {
    pub card_id: CardId,
    /// Printed might
    pub might: i32,
    /// Might after buffs and damage, when known
    #[serde(default)]
    pub current_might: Option<i32>,
    #[serde(default)]
    pub keywords: SmallVec<[Keyword; 2]>,
    #[serde(default)]
    pub domain: Option<Domain>,
}

impl LaneUnit {
    pub fn new(card_id: impl Into<CardId>, might: i32) -> Self {
        LaneUnit {
            card_id: card_id.into(),
            might,
            current_might: None,
            keywords: SmallVec::new(),
            domain: None,
        }
    }

    pub fn effective_might(&self) -> i32 {
        self.current_might.unwrap_or(self.might)
    }

    pub fn has_keyword(&self, keyword: &Keyword) -> bool {
        self.keywords.contains(keyword)
    }
}

/// One battlefield slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    #[serde(default)]
    pub my_unit: Option<LaneUnit>,
    #[serde(default)]
    pub op_unit: Option<LaneUnit>,
}

impl Lane {
    pub fn empty() -> Self {
        Lane::default()
    }

    pub fn with_units(my_unit: Option<LaneUnit>, op_unit: Option<LaneUnit>) -> Self {
        Lane { my_unit, op_unit }
    }

    pub fn my_might(&self) -> i32 {
        self.my_unit.as_ref().map_or(0, LaneUnit::effective_might)
    }

    pub fn op_might(&self) -> i32 {
        self.op_unit.as_ref().map_or(0, LaneUnit::effective_might)
    }

    pub fn is_empty(&self) -> bool {
        self.my_unit.is_none() && self.op_unit.is_none()
    }
}

/// Reject any lane list that is not exactly two lanes long
pub fn check_lane_count(lanes: &[Lane]) -> Result<()> {
    if lanes.len() != LANE_COUNT {
        return Err(AdvisorError::InvalidLaneCount(lanes.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_might_prefers_current() {
        let mut unit = LaneUnit::new("OGN-010", 3);
        assert_eq!(unit.effective_might(), 3);
        unit.current_might = Some(1);
        assert_eq!(unit.effective_might(), 1);
    }

    #[test]
    fn test_lane_count_check() {
        assert!(check_lane_count(&[Lane::empty(), Lane::empty()]).is_ok());
        assert!(matches!(
            check_lane_count(&[Lane::empty()]),
            Err(AdvisorError::InvalidLaneCount(1))
        ));
        assert!(check_lane_count(&[Lane::empty(), Lane::empty(), Lane::empty()]).is_err());
    }
}
