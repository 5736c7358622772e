//! Legend synergy analysis
//!
//! Cross-references one card against our Legend and the opponent's. Each
//! synergy category is evaluated independently; the results are concatenated
//! and their modifiers summed into a single total.

use crate::advisor::BoardAnalysis;
use crate::config::AdvisorConfig;
use crate::core::{
    normalize_text, AbilityKind, Card, CardType, Domain, EffectTarget, EffectTiming, Legend,
    ParsedAbility, PlayerState,
};
use serde::{Deserialize, Serialize};
use std::fmt;

const EXHAUST_AVAILABLE: f64 = 1.5;
const EXHAUST_BLOCKED: f64 = -10.0;
const READY_EFFECT: f64 = 3.0;
const EXHAUST_SETUP: f64 = 0.0;
const DOMAIN_SYNERGY: f64 = 1.0;
const TRIBAL_SYNERGY: f64 = 1.5;
const ACTIVATED_SUPPORT: f64 = 1.5;
const PASSIVE_BUFF: f64 = 1.0;
const PASSIVE_BUFF_WITH_BOARD: f64 = 1.5;
const NAME_COMBO: f64 = 3.0;
const LEGEND_PROTECTION: f64 = 1.0;
const OPPONENT_TRIGGER_COUNTER: f64 = -2.0;
const OPPONENT_PASSIVE_COUNTER: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynergyKind {
    ExhaustionCost,
    ReadyEffect,
    DomainSynergy,
    TribalSynergy,
    ActivatedSupport,
    PassiveBuff,
    NameCombo,
    LegendProtection,
    OpponentCounter,
}

impl SynergyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SynergyKind::ExhaustionCost => "exhaustion_cost",
            SynergyKind::ReadyEffect => "ready_effect",
            SynergyKind::DomainSynergy => "domain_synergy",
            SynergyKind::TribalSynergy => "tribal_synergy",
            SynergyKind::ActivatedSupport => "activated_support",
            SynergyKind::PassiveBuff => "passive_buff",
            SynergyKind::NameCombo => "name_combo",
            SynergyKind::LegendProtection => "legend_protection",
            SynergyKind::OpponentCounter => "opponent_counter",
        }
    }
}

impl fmt::Display for SynergyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One detected interaction between a card and a legend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendSynergy {
    pub kind: SynergyKind,
    pub description: String,
    /// Signed valuation modifier
    pub modifier: f64,
    /// True when this is about the opponent's legend
    pub is_opponent: bool,
    pub timing: EffectTiming,
}

impl LegendSynergy {
    fn mine(kind: SynergyKind, description: String, modifier: f64, timing: EffectTiming) -> Self {
        LegendSynergy {
            kind,
            description,
            modifier,
            is_opponent: false,
            timing,
        }
    }

    fn opponent(description: String, modifier: f64, timing: EffectTiming) -> Self {
        LegendSynergy {
            kind: SynergyKind::OpponentCounter,
            description,
            modifier,
            is_opponent: true,
            timing,
        }
    }
}

/// All synergies for one card and their summed modifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynergyReport {
    pub synergies: Vec<LegendSynergy>,
    pub total: f64,
}

impl SynergyReport {
    pub fn has(&self, kind: SynergyKind) -> bool {
        self.synergies.iter().any(|s| s.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.synergies.is_empty()
    }

    /// Human-readable note joining every description
    pub fn note(&self) -> Option<String> {
        if self.synergies.is_empty() {
            return None;
        }
        Some(
            self.synergies
                .iter()
                .map(|s| s.description.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
        )
    }
}

/// The card names "exhaust your legend" as an additional cost
pub fn requires_legend_exhaustion(card: &Card) -> bool {
    let text = card.rules_lower();
    text.contains("exhaust your legend as an additional cost")
        || text.contains("as an additional cost, exhaust your legend")
}

/// The card can ready a legend
pub fn readies_legend(card: &Card) -> bool {
    let text = card.rules_lower();
    text.contains("ready") && text.contains("legend")
}

/// Analyze a card against both legends
///
/// Returns an empty report when we have no legend. Opponent counter-play is
/// reported but only summed into the total when the config asks for it.
pub fn analyze(
    card: &Card,
    player: &PlayerState,
    opponent: &PlayerState,
    board: &BoardAnalysis,
    config: &AdvisorConfig,
) -> SynergyReport {
    let Some(legend) = player.legend.as_ref() else {
        return SynergyReport::default();
    };

    let mut synergies = Vec::new();
    synergies.extend(exhaustion_cost(card, legend));
    synergies.extend(ready_effect(card, legend));
    synergies.extend(domain_synergy(card, legend));
    synergies.extend(tribal_synergy(card, legend));
    synergies.extend(activated_support(card, legend));
    synergies.extend(passive_buff(card, legend, board));
    synergies.extend(name_combo(card, legend));
    synergies.extend(legend_protection(card, legend));
    if let Some(op_legend) = opponent.legend.as_ref() {
        synergies.extend(opponent_counter(card, op_legend));
    }

    let total = synergies
        .iter()
        .filter(|s| !s.is_opponent || config.include_opponent_synergy)
        .map(|s| s.modifier)
        .sum();

    SynergyReport { synergies, total }
}

fn exhaustion_cost(card: &Card, legend: &Legend) -> Option<LegendSynergy> {
    if !requires_legend_exhaustion(card) {
        return None;
    }
    let name = legend.name();
    Some(if legend.is_ready() {
        LegendSynergy::mine(
            SynergyKind::ExhaustionCost,
            format!("Can exhaust {name} for additional effect"),
            EXHAUST_AVAILABLE,
            EffectTiming::MainPhase,
        )
    } else {
        LegendSynergy::mine(
            SynergyKind::ExhaustionCost,
            format!("Requires legend exhaustion but {name} is already exhausted"),
            EXHAUST_BLOCKED,
            EffectTiming::MainPhase,
        )
    })
}

fn ready_effect(card: &Card, legend: &Legend) -> Option<LegendSynergy> {
    if readies_legend(card) {
        if !legend.exhausted {
            return None;
        }
        return Some(LegendSynergy::mine(
            SynergyKind::ReadyEffect,
            format!("Can ready exhausted {}", legend.name()),
            READY_EFFECT,
            EffectTiming::MainPhase,
        ));
    }

    // Note only: exhausting a legend without paying with ours
    let text = card.rules_lower();
    let exhausts = text.contains("exhaust")
        && text.contains("legend")
        && !text.contains("exhaust your legend");
    if !exhausts || legend.exhausted {
        return None;
    }
    Some(LegendSynergy::mine(
        SynergyKind::ExhaustionCost,
        format!("Can exhaust {} (may be useful for setup)", legend.name()),
        EXHAUST_SETUP,
        EffectTiming::MainPhase,
    ))
}

fn domain_synergy(card: &Card, legend: &Legend) -> Option<LegendSynergy> {
    let domain = legend.domain();
    if domain == Domain::Colorless {
        return None;
    }
    let shared = card.domain == domain;
    let named = card.rules_lower().contains(domain.as_str());
    if !shared && !named {
        return None;
    }
    Some(LegendSynergy::mine(
        SynergyKind::DomainSynergy,
        format!("Shares {domain} domain with {}", legend.name()),
        DOMAIN_SYNERGY,
        EffectTiming::Always,
    ))
}

fn tribal_synergy(card: &Card, legend: &Legend) -> Option<LegendSynergy> {
    let shared = card
        .tags
        .iter()
        .map(|t| t.key())
        .find(|key| legend.card.tags.iter().any(|lt| lt.key() == *key))?;
    Some(LegendSynergy::mine(
        SynergyKind::TribalSynergy,
        format!("Shares {shared} tag with {}", legend.name()),
        TRIBAL_SYNERGY,
        EffectTiming::Always,
    ))
}

fn activated_support(card: &Card, legend: &Legend) -> Option<LegendSynergy> {
    let name = legend.name();
    legend.usable_abilities().iter().find_map(|ability| {
        let text = ability.raw_text.to_lowercase();
        let description = match card.card_type {
            CardType::Unit if text.contains("move") || text.contains("battlefield") => {
                format!("{name} can move units to support this play")
            }
            CardType::Unit if text.contains("buff") || text.contains("might") || text.contains('+') => {
                format!("{name} can use ability to support this unit")
            }
            CardType::Unit if text.contains("protect") || text.contains("can't be") => {
                format!("{name} can protect this unit")
            }
            CardType::Gear if text.contains("attach") || text.contains("equip") => {
                format!("{name} can help attach equipment")
            }
            _ => return None,
        };
        Some(LegendSynergy::mine(
            SynergyKind::ActivatedSupport,
            description,
            ACTIVATED_SUPPORT,
            ability.timing,
        ))
    })
}

fn buffs_units(ability: &ParsedAbility) -> bool {
    match ability.kind {
        AbilityKind::StaticBuff => !ability.fallback,
        AbilityKind::Aura => true,
        _ => ability.text_contains("buff"),
    }
}

fn boosts_spells(ability: &ParsedAbility) -> bool {
    let text = ability.raw_text.to_lowercase();
    text.contains("bonus damage")
        || (text.contains("spell") && (text.contains("damage") || text.contains("less")))
}

fn passive_buff(card: &Card, legend: &Legend, board: &BoardAnalysis) -> Option<LegendSynergy> {
    let name = legend.name();
    let (description, modifier) = match card.card_type {
        CardType::Unit if legend.passive.iter().any(buffs_units) => {
            let modifier = if board.my_units > 0 {
                PASSIVE_BUFF_WITH_BOARD
            } else {
                PASSIVE_BUFF
            };
            (format!("May benefit from {name}'s buff abilities"), modifier)
        }
        CardType::Spell if legend.passive.iter().any(boosts_spells) => (
            format!("Benefits from {name}'s spell passive"),
            PASSIVE_BUFF,
        ),
        _ => return None,
    };
    Some(LegendSynergy::mine(
        SynergyKind::PassiveBuff,
        description,
        modifier,
        EffectTiming::Always,
    ))
}

fn name_combo(card: &Card, legend: &Legend) -> Option<LegendSynergy> {
    let text = normalize_text(&card.rules_text);
    let full = legend.name().normalized();
    // "Jinx, Loose Cannon" is usually referenced as "Jinx"
    let short = full.split(',').next().unwrap_or_default().trim().to_string();

    let referenced = (!full.is_empty() && text.contains(&full))
        || (short.chars().count() >= 3 && text.contains(&short));
    if !referenced {
        return None;
    }
    Some(LegendSynergy::mine(
        SynergyKind::NameCombo,
        format!("References {} by name", legend.name()),
        NAME_COMBO,
        EffectTiming::Always,
    ))
}

fn legend_protection(card: &Card, legend: &Legend) -> Option<LegendSynergy> {
    if !card.is_unit() {
        return None;
    }
    let protects = legend.all_abilities().any(|a| {
        a.kind == AbilityKind::Protection
            && !matches!(a.target, Some(EffectTarget::SelfCard) | Some(EffectTarget::YourLegend))
    });
    if !protects {
        return None;
    }
    Some(LegendSynergy::mine(
        SynergyKind::LegendProtection,
        format!("{} can protect this unit", legend.name()),
        LEGEND_PROTECTION,
        EffectTiming::Always,
    ))
}

fn opponent_counter(card: &Card, op_legend: &Legend) -> Vec<LegendSynergy> {
    let name = op_legend.name();
    let mut risks = Vec::new();

    let trigger = op_legend.triggered.iter().find_map(|ability| {
        let text = ability.raw_text.to_lowercase();
        match card.card_type {
            CardType::Unit
                if text.contains("kill")
                    || text.contains("destroy")
                    || ability.kind.is_removal() =>
            {
                Some((format!("Opponent {name} may counter this unit"), ability.timing))
            }
            CardType::Spell if text.contains("counter") => {
                Some((format!("Opponent {name} may counter spells"), ability.timing))
            }
            _ => None,
        }
    });
    if let Some((description, timing)) = trigger {
        risks.push(LegendSynergy::opponent(
            description,
            OPPONENT_TRIGGER_COUNTER,
            timing,
        ));
    }

    if card.is_unit() && op_legend.passive.iter().any(|a| a.text_contains("damage")) {
        risks.push(LegendSynergy::opponent(
            format!("Opponent {name} passive may affect this unit"),
            OPPONENT_PASSIVE_COUNTER,
            EffectTiming::Always,
        ));
    }

    risks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::analyze_board;
    use crate::core::{CardType, Lane, Tag};
    use crate::parser::AbilityParser;

    fn legend(name: &str, domain: Domain, text: &str, exhausted: bool) -> Legend {
        let parser = AbilityParser::new().unwrap();
        let mut card = Card::new("LEG-1", name, CardType::Legend);
        card.domain = domain;
        card.rules_text = text.to_string();
        let abilities = parser.parse(text);
        Legend::new(card, exhausted, &abilities)
    }

    fn empty_board() -> BoardAnalysis {
        analyze_board(&[Lane::empty(), Lane::empty()], 0, &AdvisorConfig::default()).unwrap()
    }

    fn unit(text: &str) -> Card {
        let mut card = Card::new("OGN-1", "Scout", CardType::Unit);
        card.domain = Domain::Body;
        card.rules_text = text.to_string();
        card
    }

    #[test]
    fn test_no_legend_no_synergy() {
        let report = analyze(
            &unit(""),
            &PlayerState::new(3),
            &PlayerState::new(3),
            &empty_board(),
            &AdvisorConfig::default(),
        );
        assert!(report.is_empty());
        assert_eq!(report.total, 0.0);
    }

    #[test]
    fn test_exhaustion_cost_available_and_blocked() {
        let card = unit("As an additional cost, exhaust your legend. Draw 2 cards");
        let config = AdvisorConfig::default();

        let ready = PlayerState::new(3).with_legend(legend("Ahri", Domain::Calm, "", false));
        let report = analyze(&card, &ready, &PlayerState::new(0), &empty_board(), &config);
        assert!(report.has(SynergyKind::ExhaustionCost));
        assert_eq!(report.total, EXHAUST_AVAILABLE);

        let tired = PlayerState::new(3).with_legend(legend("Ahri", Domain::Calm, "", true));
        let report = analyze(&card, &tired, &PlayerState::new(0), &empty_board(), &config);
        assert_eq!(report.total, EXHAUST_BLOCKED);
    }

    #[test]
    fn test_ready_effect_only_when_exhausted() {
        let card = unit("When this enters the battlefield, ready your legend");
        let config = AdvisorConfig::default();

        let tired = PlayerState::new(3).with_legend(legend("Ahri", Domain::Calm, "", true));
        let report = analyze(&card, &tired, &PlayerState::new(0), &empty_board(), &config);
        assert!(report.has(SynergyKind::ReadyEffect));
        assert_eq!(report.total, READY_EFFECT);

        let ready = PlayerState::new(3).with_legend(legend("Ahri", Domain::Calm, "", false));
        let report = analyze(&card, &ready, &PlayerState::new(0), &empty_board(), &config);
        assert!(!report.has(SynergyKind::ReadyEffect));
    }

    #[test]
    fn test_exhaust_setup_is_note_only() {
        let card = unit("Exhaust a legend. Draw a card");
        let config = AdvisorConfig::default();

        let ready = PlayerState::new(3).with_legend(legend("Ahri", Domain::Calm, "", false));
        let report = analyze(&card, &ready, &PlayerState::new(0), &empty_board(), &config);
        assert!(report.has(SynergyKind::ExhaustionCost));
        assert_eq!(report.total, 0.0);
        assert_eq!(
            report.note().as_deref(),
            Some("Can exhaust Ahri (may be useful for setup)")
        );

        let tired = PlayerState::new(3).with_legend(legend("Ahri", Domain::Calm, "", true));
        let report = analyze(&card, &tired, &PlayerState::new(0), &empty_board(), &config);
        assert!(report.is_empty());

        let own = unit("Exhaust your legend: draw a card");
        let report = analyze(&own, &ready, &PlayerState::new(0), &empty_board(), &config);
        assert!(report.is_empty());
    }

    #[test]
    fn test_name_combo_and_domain() {
        let mut card = unit("If you control Jinx, draw a card");
        card.domain = Domain::Chaos;
        let player = PlayerState::new(3).with_legend(legend("Jinx, Loose Cannon", Domain::Chaos, "", false));

        let report = analyze(&card, &player, &PlayerState::new(0), &empty_board(), &AdvisorConfig::default());
        assert!(report.has(SynergyKind::NameCombo));
        assert!(report.has(SynergyKind::DomainSynergy));
        assert_eq!(report.total, NAME_COMBO + DOMAIN_SYNERGY);
    }

    #[test]
    fn test_tribal_and_activated_support() {
        let mut card = unit("");
        card.tags.push(Tag::from_text("Yordle"));
        let mut leg = legend("Teemo", Domain::Mind, "Exhaust: Move a unit to another battlefield", false);
        leg.card.tags.push(Tag::from_text("yordle"));
        let player = PlayerState::new(3).with_legend(leg);

        let report = analyze(&card, &player, &PlayerState::new(0), &empty_board(), &AdvisorConfig::default());
        assert!(report.has(SynergyKind::TribalSynergy));
        assert!(report.has(SynergyKind::ActivatedSupport));
        assert_eq!(report.total, TRIBAL_SYNERGY + ACTIVATED_SUPPORT);
    }

    #[test]
    fn test_opponent_counter_excluded_by_default() {
        let card = unit("");
        let player = PlayerState::new(3).with_legend(legend("Garen", Domain::Body, "", false));
        // Shares the body domain with our legend
        let opponent = PlayerState::new(3).with_legend(legend(
            "Darius",
            Domain::Fury,
            "When a unit attacks, destroy target unit with 2 might or less",
            false,
        ));

        let report = analyze(&card, &player, &opponent, &empty_board(), &AdvisorConfig::default());
        let counter = report
            .synergies
            .iter()
            .find(|s| s.kind == SynergyKind::OpponentCounter)
            .unwrap();
        assert!(counter.is_opponent);
        assert_eq!(report.total, DOMAIN_SYNERGY);

        let config = AdvisorConfig {
            include_opponent_synergy: true,
            ..AdvisorConfig::default()
        };
        let report = analyze(&card, &player, &opponent, &empty_board(), &config);
        assert_eq!(report.total, DOMAIN_SYNERGY + OPPONENT_TRIGGER_COUNTER);
    }

    #[test]
    fn test_report_note() {
        let card = unit("Ready your legend");
        let player = PlayerState::new(3).with_legend(legend("Ahri", Domain::Calm, "", true));
        let report = analyze(&card, &player, &PlayerState::new(0), &empty_board(), &AdvisorConfig::default());
        assert_eq!(report.note().as_deref(), Some("Can ready exhausted Ahri"));
    }
}
