//! Rules-text parser
//!
//! Converts free-form card text into an ordered list of `ParsedAbility`
//! records. Parsing is pure: the same text always yields the same list,
//! and unmatched sentences become a low-information fallback rather than
//! an error.

pub mod extract;
pub mod index;
pub mod patterns;

pub use index::AbilityIndex;

use crate::core::{AbilityCategory, AbilityKind, Card, EffectTiming, ParsedAbility};
use crate::Result;
use extract::Extractors;
use patterns::PatternGroup;

/// Fragments shorter than this are skipped
const MIN_FRAGMENT_LEN: usize = 3;

#[derive(Debug, Clone)]
pub struct AbilityParser {
    groups: Vec<PatternGroup>,
    extractors: Extractors,
}

impl AbilityParser {
    pub fn new() -> Result<Self> {
        Ok(AbilityParser {
            groups: patterns::compile_groups()?,
            extractors: Extractors::new()?,
        })
    }

    /// Parse rules text into abilities, one per non-trivial sentence
    pub fn parse(&self, rules_text: &str) -> Vec<ParsedAbility> {
        rules_text
            .split(['\n', '.'])
            .map(str::trim)
            .filter(|line| line.chars().count() >= MIN_FRAGMENT_LEN)
            .map(|line| self.parse_line(line))
            .collect()
    }

    pub fn parse_card(&self, card: &Card) -> Vec<ParsedAbility> {
        self.parse(&card.rules_text)
    }

    /// Classify one sentence; always yields an ability
    pub fn parse_line(&self, line: &str) -> ParsedAbility {
        let lower = line.to_lowercase();

        for group in &self.groups {
            if let Some(kind) = group.first_match(&lower) {
                return match group.category {
                    AbilityCategory::Triggered => self.triggered_ability(line, &lower, kind),
                    AbilityCategory::Activated => self.activated_ability(line, &lower, kind),
                    AbilityCategory::Static => self.static_ability(line, &lower, kind),
                    AbilityCategory::Effect => self.effect_ability(line, &lower, kind),
                };
            }
        }

        if lower.contains("choose one") || lower.contains("choose two") {
            return ParsedAbility::new(AbilityKind::ChooseEffect, line, EffectTiming::MainPhase);
        }

        let mut generic = ParsedAbility::new(AbilityKind::StaticBuff, line, EffectTiming::Always);
        generic.fallback = true;
        generic
    }

    fn triggered_ability(&self, line: &str, lower: &str, kind: AbilityKind) -> ParsedAbility {
        let mut ability = ParsedAbility::new(kind, line, EffectTiming::OnTrigger);
        ability.target = extract::target(lower);
        ability.value = self.extractors.number(lower);
        ability.conditions = self.extractors.conditions(lower);
        ability.keywords_granted = extract::keywords_granted(lower);
        ability
    }

    fn activated_ability(&self, line: &str, lower: &str, kind: AbilityKind) -> ParsedAbility {
        let timing = if lower.contains("instant") || lower.contains("any time") {
            EffectTiming::Instant
        } else if is_combat_window(lower) {
            EffectTiming::Combat
        } else {
            EffectTiming::MainPhase
        };

        let mut ability = ParsedAbility::new(kind, line, timing);
        ability.cost = self.extractors.cost(line);
        ability.target = extract::target(lower);
        ability.value = self.extractors.number(lower);
        ability
    }

    fn static_ability(&self, line: &str, lower: &str, kind: AbilityKind) -> ParsedAbility {
        let mut ability = ParsedAbility::new(kind, line, EffectTiming::Always);
        ability.target = extract::target(lower);
        ability.value = self.extractors.number(lower);
        ability.domain_restriction = extract::domain(lower);
        ability.keywords_granted = extract::keywords_granted(lower);
        ability
    }

    fn effect_ability(&self, line: &str, lower: &str, kind: AbilityKind) -> ParsedAbility {
        // Effects are main phase unless they say otherwise
        let timing = if lower.contains("instant") || kind == AbilityKind::Counter {
            EffectTiming::Instant
        } else if is_combat_window(lower) {
            EffectTiming::Combat
        } else {
            EffectTiming::MainPhase
        };

        let mut ability = ParsedAbility::new(kind, line, timing);
        ability.target = extract::target(lower);
        ability.value = self.extractors.number(lower);
        ability.conditions = self.extractors.conditions(lower);
        ability
    }
}

fn is_combat_window(lower: &str) -> bool {
    lower.contains("during combat") || lower.contains("showdown")
}
