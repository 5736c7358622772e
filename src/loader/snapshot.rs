//! Serialized board and hand input
//!
//! A `GameSnapshot` names cards by id. Resolving it against a catalog
//! produces the `GameState` the advisor works on plus the ability index.
//! Ids the catalog does not know are dropped and reported, never fatal.

use crate::core::{
    Card, CardId, Domain, GameState, Keyword, Lane, LaneUnit, Legend, Phase, PlayerState,
    PowerPool, LANE_COUNT,
};
use crate::loader::CardCatalog;
use crate::parser::{AbilityIndex, AbilityParser};
use crate::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendSnapshot {
    pub card_id: String,
    pub exhausted: bool,
}

/// A unit on the board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSnapshot {
    pub card_id: String,
    /// Printed might; taken from the catalog when absent
    pub might: Option<i32>,
    pub current_might: Option<i32>,
    pub keywords: Vec<String>,
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneSnapshot {
    pub my_unit: Option<UnitSnapshot>,
    pub op_unit: Option<UnitSnapshot>,
    pub battlefield_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSnapshot {
    /// Hand card ids, in hand order
    pub hand: Vec<String>,
    pub energy: u32,
    pub power: PowerPool,
    pub score: u32,
    pub legend: Option<LegendSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSnapshot {
    pub turn: u32,
    pub phase: String,
    pub going_first: bool,
    pub me: PlayerSnapshot,
    pub opponent: PlayerSnapshot,
    pub lanes: Vec<LaneSnapshot>,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        GameSnapshot {
            turn: 1,
            phase: Phase::Mulligan.as_str().to_string(),
            going_first: true,
            me: PlayerSnapshot::default(),
            opponent: PlayerSnapshot::default(),
            lanes: vec![LaneSnapshot::default(); LANE_COUNT],
        }
    }
}

/// A snapshot with every known id resolved
#[derive(Debug, Clone)]
pub struct ResolvedGame {
    pub state: GameState,
    pub index: AbilityIndex,
    /// Ids the catalog could not supply, in the order they were met
    pub missing: Vec<CardId>,
}

impl GameSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validate and resolve against `catalog`
    ///
    /// An unknown phase or a lane count other than two is rejected before
    /// any lookup happens.
    pub fn resolve<C: CardCatalog + ?Sized>(
        &self,
        catalog: &C,
        parser: &AbilityParser,
    ) -> Result<ResolvedGame> {
        let phase: Phase = self.phase.parse()?;
        if self.lanes.len() != LANE_COUNT {
            return Err(AdvisorError::InvalidLaneCount(self.lanes.len()));
        }

        let mut resolver = Resolver {
            catalog,
            parser,
            missing: Vec::new(),
        };
        let me = resolver.player(&self.me)?;
        let opponent = resolver.player(&self.opponent)?;
        let lanes = self
            .lanes
            .iter()
            .map(|lane| resolver.lane(lane))
            .collect::<Result<Vec<_>>>()?;

        let index = AbilityIndex::build(parser, me.hand.iter().chain(opponent.hand.iter()));
        let mut state = GameState::new(self.turn, phase, me, opponent, lanes);
        state.going_first = self.going_first;

        Ok(ResolvedGame {
            state,
            index,
            missing: resolver.missing,
        })
    }
}

struct Resolver<'a, C: ?Sized> {
    catalog: &'a C,
    parser: &'a AbilityParser,
    missing: Vec<CardId>,
}

impl<C: CardCatalog + ?Sized> Resolver<'_, C> {
    fn card(&mut self, id: &str) -> Result<Option<Card>> {
        match self.catalog.resolve_card(id) {
            Some(card) => card.map(Some),
            None => {
                self.missing.push(CardId::new(id));
                Ok(None)
            }
        }
    }

    fn player(&mut self, snapshot: &PlayerSnapshot) -> Result<PlayerState> {
        let mut hand = Vec::with_capacity(snapshot.hand.len());
        for id in &snapshot.hand {
            hand.extend(self.card(id)?);
        }

        let legend = match &snapshot.legend {
            Some(legend) => self.card(&legend.card_id)?.map(|card| {
                let abilities = self.parser.parse_card(&card);
                Legend::new(card, legend.exhausted, &abilities)
            }),
            None => None,
        };

        Ok(PlayerState {
            energy: snapshot.energy,
            power: snapshot.power,
            score: snapshot.score,
            legend,
            hand,
        })
    }

    fn lane(&mut self, snapshot: &LaneSnapshot) -> Result<Lane> {
        Ok(Lane::with_units(
            self.unit(snapshot.my_unit.as_ref())?,
            self.unit(snapshot.op_unit.as_ref())?,
        ))
    }

    /// Board units keep their slot even when the catalog lacks them
    fn unit(&mut self, snapshot: Option<&UnitSnapshot>) -> Result<Option<LaneUnit>> {
        let Some(snapshot) = snapshot else {
            return Ok(None);
        };

        let might = match snapshot.might {
            Some(might) => might,
            None => self
                .card(&snapshot.card_id)?
                .and_then(|card| card.might)
                .unwrap_or(0),
        };

        let mut unit = LaneUnit::new(snapshot.card_id.as_str(), might);
        unit.current_might = snapshot.current_might;
        unit.keywords = snapshot
            .keywords
            .iter()
            .map(|k| Keyword::from_text(k))
            .collect();
        unit.domain = snapshot
            .domain
            .as_deref()
            .map(str::parse::<Domain>)
            .transpose()
            .map_err(|e| {
                AdvisorError::InvalidCardFormat(format!("unit {}: {e}", snapshot.card_id))
            })?;
        Ok(Some(unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::CardDatabase;

    const CATALOG: &str = r#"[
        {"id": "U1", "name": "Scout", "card_type": "unit", "domain": "fury", "energy_cost": 1, "might": 1},
        {"id": "U2", "name": "Brute", "card_type": "unit", "domain": "body", "energy_cost": 4, "might": 5},
        {"id": "L1", "name": "Darius, Hand of Noxus", "card_type": "legend", "domain": "fury",
         "rules_text": "Exhaust: Give a unit +1 might this turn."}
    ]"#;

    fn resolve(json: &str) -> Result<ResolvedGame> {
        let catalog = CardDatabase::from_json(CATALOG).unwrap();
        let parser = AbilityParser::new().unwrap();
        GameSnapshot::from_json(json)?.resolve(&catalog, &parser)
    }

    #[test]
    fn test_resolve_snapshot() {
        let game = resolve(
            r#"{"turn": 3, "phase": "main", "going_first": false,
                "me": {"hand": ["U1", "U2"], "energy": 4, "legend": {"card_id": "L1"}},
                "lanes": [{"op_unit": {"card_id": "U2"}}, {}]}"#,
        )
        .unwrap();

        assert!(game.missing.is_empty());
        assert_eq!(game.state.phase, Phase::Main);
        assert!(!game.state.going_first);
        assert_eq!(game.state.me.hand.len(), 2);
        assert!(game.index.contains(&CardId::new("U1")));

        let legend = game.state.me.legend.as_ref().unwrap();
        assert!(!legend.exhausted);
        assert_eq!(legend.activated.len(), 1);

        // Might filled in from the catalog
        assert_eq!(game.state.lanes[0].op_might(), 5);
    }

    #[test]
    fn test_missing_ids_are_dropped() {
        let game = resolve(
            r#"{"phase": "main", "me": {"hand": ["U1", "NOPE", "U2"], "legend": {"card_id": "L9"}}}"#,
        )
        .unwrap();

        assert_eq!(game.state.me.hand.len(), 2);
        assert!(game.state.me.legend.is_none());
        assert_eq!(game.missing, vec![CardId::new("NOPE"), CardId::new("L9")]);
    }

    #[test]
    fn test_rejects_bad_phase_and_lanes() {
        let err = resolve(r#"{"phase": "upkeep"}"#).unwrap_err();
        assert!(matches!(err, AdvisorError::UnknownPhase(p) if p == "upkeep"));

        let err = resolve(r#"{"phase": "main", "lanes": [{}, {}, {}]}"#).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidLaneCount(3)));
    }

    #[test]
    fn test_default_snapshot_is_opening() {
        let game = resolve("{}").unwrap();
        assert_eq!(game.state.phase, Phase::Mulligan);
        assert_eq!(game.state.turn, 1);
        assert_eq!(game.state.lanes.len(), LANE_COUNT);
    }
}
