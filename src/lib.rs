//! Riftbound advisor - mulligan and play advice for Riftbound TCG
//!
//! Parses card rules text into structured abilities, values cards against
//! the board and both legends, and plans budgeted play sequences across the
//! two battlefield lanes.

pub mod advisor;
pub mod config;
pub mod core;
pub mod error;
pub mod loader;
pub mod logger;
pub mod parser;

pub use advisor::{check_playable, Advisor, MulliganAdvice, PlayAdvice};
pub use config::AdvisorConfig;
pub use error::{AdvisorError, Result};
pub use logger::{AdvisorEvent, AdvisorLogger, AdvisorObserver, NullObserver};
pub use parser::{AbilityIndex, AbilityParser};
