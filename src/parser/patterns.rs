//! Ordered pattern tables for rules-text classification
//!
//! Groups are evaluated top to bottom, and within a group the first
//! matching pattern wins. Triggered phrasing must stay ahead of effect
//! phrasing so "When this enters, deal 2 damage" is an ETB trigger.

use crate::core::{AbilityCategory, AbilityKind};
use crate::Result;
use regex_lite::Regex;

type PatternTable = &'static [(AbilityKind, &'static [&'static str])];

const TRIGGERED: PatternTable = &[
    (
        AbilityKind::EntersBattlefield,
        &[
            r"when (?:this|.*?) enters? (?:the battlefield|play)",
            r"etb[:\s]",
            r"on entry[:\s]",
            r"when(?:ever)? (?:this|.*?) enters?(?:[\s,:]|$)",
            r"when you play (?:this|me)(?:[\s,:]|$)",
        ],
    ),
    (
        AbilityKind::LeavesBattlefield,
        &[
            r"when (?:this|.*?) leaves? (?:the battlefield|play)",
            r"when (?:this|.*?) (?:is |are )?removed",
        ],
    ),
    (
        AbilityKind::Dies,
        &[
            r"when (?:this|.*?) dies?",
            r"when (?:this|.*?) (?:is |are )?destroyed",
        ],
    ),
    (
        AbilityKind::Attacks,
        &[r"when(?:ever)? (?:this|.*?) attacks?", r"on attack[:\s]"],
    ),
    (
        AbilityKind::Blocks,
        &[r"when(?:ever)? (?:this|.*?) blocks?", r"on block[:\s]"],
    ),
    (
        AbilityKind::DealsDamage,
        &[r"when(?:ever)? (?:this|.*?) deals? damage"],
    ),
    (
        AbilityKind::TakesDamage,
        &[r"when(?:ever)? (?:this|.*?) (?:is dealt|takes?) damage"],
    ),
    (
        AbilityKind::StartOfTurn,
        &[r"at the (?:start|beginning) of (?:your|each) turn"],
    ),
    (
        AbilityKind::EndOfTurn,
        &[r"at the end of (?:your|each) turn"],
    ),
];

const ACTIVATED: PatternTable = &[
    (AbilityKind::TapAbility, &[r"^tap[:\s]", r"^\{t\}[:\s]"]),
    (
        AbilityKind::ExhaustAbility,
        &[r"^exhaust[:\s]", r"^exhaust (?:this|your legend)"],
    ),
    (AbilityKind::SacrificeAbility, &[r"^sacrifice"]),
    (
        AbilityKind::PayCostAbility,
        &[r"^pay \d+", r"^\d+ energy[:\s]"],
    ),
];

const STATIC: PatternTable = &[
    (
        AbilityKind::StaticBuff,
        &[
            r"(?:your|you control) (?:units?|creatures?) (?:get|have|gain) \+\d+",
            r"(?:other )?(?:units?|creatures?) you control (?:get|have) \+\d+",
        ],
    ),
    (
        AbilityKind::StaticDebuff,
        &[
            r"(?:enemy|opposing|opponent'?s?) (?:units?|creatures?) (?:get|have) -\d+",
            r"(?:units?|creatures?) your opponents? controls? (?:get|have) -\d+",
        ],
    ),
    (
        AbilityKind::CostReduction,
        &[
            r"(?:spells?|cards?) (?:you cast )?costs? \d+ less",
            r"reduce (?:the )?cost",
        ],
    ),
    (
        AbilityKind::Protection,
        &[
            r"can't be (?:targeted|destroyed|blocked)",
            r"has? protection",
            r"hexproof",
            r"shroud",
        ],
    ),
    (AbilityKind::Aura, &[r"(?:units?|creatures?) you control have "]),
];

const EFFECT: PatternTable = &[
    (AbilityKind::Destroy, &[r"destroy (?:target|all|each)"]),
    (AbilityKind::Damage, &[r"deal(?:s)? \d+ damage"]),
    (
        AbilityKind::Bounce,
        &[r"return (?:target|it) to (?:its owner's )?hand"],
    ),
    (AbilityKind::DrawCards, &[r"draw (?:a card|\d+ cards?)"]),
    (
        AbilityKind::BuffTarget,
        &[r"(?:target )?(?:unit|creature) gets? \+\d+"],
    ),
    (AbilityKind::Counter, &[r"counter target"]),
    (AbilityKind::Exile, &[r"(?:exile|banish) (?:target|all|each|it)"]),
    (AbilityKind::CopySpell, &[r"copy target spell"]),
    (
        AbilityKind::Discard,
        &[r"discards? (?:a|an|\d+|two|three) (?:cards?|spells?|units?)"],
    ),
    (
        AbilityKind::EnergyGeneration,
        &[r"(?:gain|add) (?:\d+ |an? )?(?:extra )?energy"],
    ),
    (
        AbilityKind::RuneGeneration,
        &[r"(?:add|channel) (?:a|an|\d+|two) (?:\w+ )?runes?"],
    ),
    (
        AbilityKind::LegendInteraction,
        &[r"(?:ready|exhaust) (?:your|target|an?|their|the) (?:\w+ )?legend"],
    ),
];

/// One compiled pattern and the kind it yields
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub kind: AbilityKind,
    pub pattern: Regex,
}

/// All patterns of one category, in evaluation order
#[derive(Debug, Clone)]
pub struct PatternGroup {
    pub category: AbilityCategory,
    pub rules: Vec<PatternRule>,
}

impl PatternGroup {
    fn compile(category: AbilityCategory, table: PatternTable) -> Result<Self> {
        let mut rules = Vec::new();
        for (kind, patterns) in table {
            for pattern in *patterns {
                rules.push(PatternRule {
                    kind: *kind,
                    pattern: Regex::new(pattern)?,
                });
            }
        }
        Ok(PatternGroup { category, rules })
    }

    /// First kind whose pattern matches the lowercased fragment
    pub fn first_match(&self, text_lower: &str) -> Option<AbilityKind> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(text_lower))
            .map(|rule| rule.kind)
    }
}

/// Compile the four groups in evaluation order
pub fn compile_groups() -> Result<Vec<PatternGroup>> {
    Ok(vec![
        PatternGroup::compile(AbilityCategory::Triggered, TRIGGERED)?,
        PatternGroup::compile(AbilityCategory::Activated, ACTIVATED)?,
        PatternGroup::compile(AbilityCategory::Static, STATIC)?,
        PatternGroup::compile(AbilityCategory::Effect, EFFECT)?,
    ])
}
