//! Catalog and snapshot loaders
//!
//! Reads the JSON card catalog and the per-turn game snapshot and turns
//! them into the core types the advisor consumes.

pub mod catalog;
pub mod snapshot;

pub use catalog::{CardCatalog, CardDatabase, CardRecord, PowerCostRecord};
pub use snapshot::{
    GameSnapshot, LaneSnapshot, LegendSnapshot, PlayerSnapshot, ResolvedGame, UnitSnapshot,
};
