//! Core advisor types and entities

pub mod ability;
pub mod card;
pub mod domain;
pub mod game;
pub mod lane;
pub mod legend;
pub mod phase;
pub mod player;
pub mod types;

pub use ability::{
    abilities_by_timing, ability_summary, categorize, has_kind, AbilityCategory, AbilityKind,
    CategorizedAbilities, EffectTarget, EffectTiming, ParsedAbility,
};
pub use card::{Card, CardType, Keyword, Tag};
pub use domain::{Domain, PowerCost, PowerPool};
pub use game::GameState;
pub use lane::{check_lane_count, Lane, LaneUnit, LANE_COUNT};
pub use legend::Legend;
pub use phase::{GamePhase, Phase};
pub use player::PlayerState;
pub use types::{normalize_text, CardId, CardName};
