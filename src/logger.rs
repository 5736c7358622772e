//! Advisor event logging
//!
//! The advisor core never prints. It reports structured `AdvisorEvent`s to an
//! injected `AdvisorObserver`. `AdvisorLogger` is the stock observer: it
//! filters by verbosity, renders text or JSON lines to stderr, and can capture
//! entries in memory for tests.

use crate::advisor::{LaneState, SynergyKind};
use crate::core::CardId;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::ops::Deref;

/// Verbosity level for advisor output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - nothing is printed
    Silent = 0,
    /// Minimal - final advice and missing cards only
    Minimal = 1,
    /// Normal - per-card decisions (default)
    #[default]
    Normal = 2,
    /// Verbose - every analysis step
    Verbose = 3,
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stderr (default)
    #[default]
    Stderr,
    /// Capture only to in-memory buffer
    Memory,
    /// Both stderr and in-memory buffer
    Both,
}

/// Which advice entry point produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceKind {
    Mulligan,
    Play,
}

/// Structured events emitted by the advisor core
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AdvisorEvent {
    CardMissing {
        card_id: CardId,
    },
    CardPlayability {
        card_id: CardId,
        playable: bool,
        reason: String,
    },
    LaneAnalyzed {
        lane: usize,
        state: LaneState,
        my_might: i32,
        op_might: i32,
        advantage: i32,
    },
    LegendInteraction {
        card_id: CardId,
        legend_id: CardId,
        kind: SynergyKind,
        modifier: f64,
    },
    CardValued {
        card_id: CardId,
        score: f64,
    },
    MulliganDecision {
        card_id: CardId,
        keep: bool,
        reason: String,
    },
    CardScheduled {
        card_id: CardId,
        position: usize,
        priority: f64,
        cumulative_cost: u32,
    },
    CardUnscheduled {
        card_id: CardId,
        reason: String,
    },
    AdviceIssued {
        kind: AdviceKind,
        summary: String,
    },
}

impl AdvisorEvent {
    pub fn level(&self) -> VerbosityLevel {
        match self {
            AdvisorEvent::CardMissing { .. } | AdvisorEvent::AdviceIssued { .. } => {
                VerbosityLevel::Minimal
            }
            AdvisorEvent::MulliganDecision { .. }
            | AdvisorEvent::CardScheduled { .. }
            | AdvisorEvent::CardUnscheduled { .. } => VerbosityLevel::Normal,
            AdvisorEvent::CardPlayability { .. }
            | AdvisorEvent::LaneAnalyzed { .. }
            | AdvisorEvent::LegendInteraction { .. }
            | AdvisorEvent::CardValued { .. } => VerbosityLevel::Verbose,
        }
    }

    /// Short category name, matching the JSON `event` tag
    pub fn category(&self) -> &'static str {
        match self {
            AdvisorEvent::CardMissing { .. } => "card_missing",
            AdvisorEvent::CardPlayability { .. } => "card_playability",
            AdvisorEvent::LaneAnalyzed { .. } => "lane_analyzed",
            AdvisorEvent::LegendInteraction { .. } => "legend_interaction",
            AdvisorEvent::CardValued { .. } => "card_valued",
            AdvisorEvent::MulliganDecision { .. } => "mulligan_decision",
            AdvisorEvent::CardScheduled { .. } => "card_scheduled",
            AdvisorEvent::CardUnscheduled { .. } => "card_unscheduled",
            AdvisorEvent::AdviceIssued { .. } => "advice_issued",
        }
    }
}

impl fmt::Display for AdvisorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorEvent::CardMissing { card_id } => {
                write!(f, "card {card_id} not found in catalog, skipping")
            }
            AdvisorEvent::CardPlayability {
                card_id,
                playable,
                reason,
            } => {
                let verdict = if *playable { "playable" } else { "not playable" };
                write!(f, "{card_id} {verdict}: {reason}")
            }
            AdvisorEvent::LaneAnalyzed {
                lane,
                state,
                my_might,
                op_might,
                advantage,
            } => write!(
                f,
                "lane {lane}: {state} ({my_might} vs {op_might}, advantage {advantage:+})"
            ),
            AdvisorEvent::LegendInteraction {
                card_id,
                legend_id,
                kind,
                modifier,
            } => write!(f, "{card_id} x {legend_id}: {kind} ({modifier:+.1})"),
            AdvisorEvent::CardValued { card_id, score } => {
                write!(f, "{card_id} valued at {score:.2}")
            }
            AdvisorEvent::MulliganDecision {
                card_id,
                keep,
                reason,
            } => {
                let verdict = if *keep { "keep" } else { "mulligan" };
                write!(f, "{verdict} {card_id}: {reason}")
            }
            AdvisorEvent::CardScheduled {
                card_id,
                position,
                priority,
                cumulative_cost,
            } => write!(
                f,
                "step {position}: {card_id} (priority {priority:.1}, total cost {cumulative_cost})"
            ),
            AdvisorEvent::CardUnscheduled { card_id, reason } => {
                write!(f, "{card_id} not scheduled: {reason}")
            }
            AdvisorEvent::AdviceIssued { kind, summary } => {
                let label = match kind {
                    AdviceKind::Mulligan => "mulligan",
                    AdviceKind::Play => "play",
                };
                write!(f, "{label} advice: {summary}")
            }
        }
    }
}

/// Receiver for advisor events
pub trait AdvisorObserver {
    fn on_event(&self, event: &AdvisorEvent);
}

impl<T: AdvisorObserver + ?Sized> AdvisorObserver for &T {
    fn on_event(&self, event: &AdvisorEvent) {
        (**self).on_event(event)
    }
}

/// Observer that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl AdvisorObserver for NullObserver {
    #[inline]
    fn on_event(&self, _event: &AdvisorEvent) {}
}

/// A captured log entry
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    /// Rendered message (text or JSON, per the logger's format)
    pub message: String,
    /// Event category (e.g., "card_scheduled"), None for free-form messages
    pub category: Option<String>,
}

/// Guard type that provides read-only access to log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Verbosity-filtered logger for advisor events
pub struct AdvisorLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl AdvisorLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        AdvisorLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    /// Capture to memory only (suppresses stderr)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    /// Captured entries; the guard derefs to `[LogEntry]`
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    /// Log a free-form message at the given level
    pub fn log(&self, level: VerbosityLevel, message: &str) {
        self.record(level, None, || message.to_string());
    }

    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, message);
    }

    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, message);
    }

    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, message);
    }

    fn render(&self, event: &AdvisorEvent) -> String {
        match self.output_format {
            OutputFormat::Text => event.to_string(),
            OutputFormat::Json => {
                serde_json::to_string(event).unwrap_or_else(|_| event.to_string())
            }
        }
    }

    fn record(&self, level: VerbosityLevel, category: Option<&str>, message: impl FnOnce() -> String) {
        if level == VerbosityLevel::Silent {
            return;
        }

        let should_capture = self.is_capturing();
        let should_output = matches!(self.output_mode, OutputMode::Stderr | OutputMode::Both)
            && level <= self.verbosity;

        // Early exit if message won't be used
        if !should_capture && !should_output {
            return;
        }

        let message = message();
        if should_output {
            eprintln!("{message}");
        }
        if should_capture {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message,
                category: category.map(str::to_string),
            });
        }
    }
}

impl AdvisorObserver for AdvisorLogger {
    fn on_event(&self, event: &AdvisorEvent) {
        self.record(event.level(), Some(event.category()), || self.render(event));
    }
}

impl Default for AdvisorLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AdvisorLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisorLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(id: &str) -> AdvisorEvent {
        AdvisorEvent::CardMissing {
            card_id: CardId::new(id),
        }
    }

    #[test]
    fn test_logger_creation() {
        let logger = AdvisorLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_event_capture() {
        let mut logger = AdvisorLogger::new();
        logger.enable_capture();

        logger.on_event(&missing("OGN-404"));
        logger.normal("free-form message");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "card OGN-404 not found in catalog, skipping");
        assert_eq!(logs[0].category.as_deref(), Some("card_missing"));
        assert_eq!(logs[1].category, None);
    }

    #[test]
    fn test_json_format() {
        let mut logger = AdvisorLogger::new();
        logger.enable_capture();
        logger.set_output_format(OutputFormat::Json);

        logger.on_event(&AdvisorEvent::CardValued {
            card_id: CardId::new("OGN-001"),
            score: 7.5,
        });

        let logs = logger.logs();
        let value: serde_json::Value = serde_json::from_str(&logs[0].message).unwrap();
        assert_eq!(value["event"], "card_valued");
        assert_eq!(value["card_id"], "OGN-001");
        assert_eq!(value["score"], 7.5);
    }

    #[test]
    fn test_event_levels() {
        assert_eq!(missing("x").level(), VerbosityLevel::Minimal);
        let valued = AdvisorEvent::CardValued {
            card_id: CardId::new("x"),
            score: 1.0,
        };
        assert_eq!(valued.level(), VerbosityLevel::Verbose);
    }

    #[test]
    fn test_observer_by_reference() {
        let mut logger = AdvisorLogger::new();
        logger.enable_capture();
        {
            let observer: &dyn AdvisorObserver = &logger;
            (&observer).on_event(&missing("a"));
        }
        assert_eq!(logger.logs().len(), 1);
        NullObserver.on_event(&missing("b"));
    }
}
