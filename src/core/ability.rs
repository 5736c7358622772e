//! Structured representation of parsed rules text

use crate::core::Domain;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Closed set of ability kinds recognized in rules text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    // Triggered
    EntersBattlefield,
    LeavesBattlefield,
    Dies,
    Attacks,
    Blocks,
    DealsDamage,
    TakesDamage,
    StartOfTurn,
    EndOfTurn,

    // Activated
    TapAbility,
    ExhaustAbility,
    SacrificeAbility,
    PayCostAbility,

    // Static
    StaticBuff,
    StaticDebuff,
    CostReduction,
    Protection,
    Aura,

    // Effects
    Destroy,
    Damage,
    Bounce,
    DrawCards,
    BuffTarget,
    Counter,
    Exile,
    Discard,
    CopySpell,
    EnergyGeneration,
    RuneGeneration,
    LegendInteraction,

    /// "Choose one" / "choose two" modal text
    ChooseEffect,
}

impl AbilityKind {
    /// Same snake_case name as the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            AbilityKind::EntersBattlefield => "enters_battlefield",
            AbilityKind::LeavesBattlefield => "leaves_battlefield",
            AbilityKind::Dies => "dies",
            AbilityKind::Attacks => "attacks",
            AbilityKind::Blocks => "blocks",
            AbilityKind::DealsDamage => "deals_damage",
            AbilityKind::TakesDamage => "takes_damage",
            AbilityKind::StartOfTurn => "start_of_turn",
            AbilityKind::EndOfTurn => "end_of_turn",
            AbilityKind::TapAbility => "tap_ability",
            AbilityKind::ExhaustAbility => "exhaust_ability",
            AbilityKind::SacrificeAbility => "sacrifice_ability",
            AbilityKind::PayCostAbility => "pay_cost_ability",
            AbilityKind::StaticBuff => "static_buff",
            AbilityKind::StaticDebuff => "static_debuff",
            AbilityKind::CostReduction => "cost_reduction",
            AbilityKind::Protection => "protection",
            AbilityKind::Aura => "aura",
            AbilityKind::Destroy => "destroy",
            AbilityKind::Damage => "damage",
            AbilityKind::Bounce => "bounce",
            AbilityKind::DrawCards => "draw_cards",
            AbilityKind::BuffTarget => "buff_target",
            AbilityKind::Counter => "counter",
            AbilityKind::Exile => "exile",
            AbilityKind::Discard => "discard",
            AbilityKind::CopySpell => "copy_spell",
            AbilityKind::EnergyGeneration => "energy_generation",
            AbilityKind::RuneGeneration => "rune_generation",
            AbilityKind::LegendInteraction => "legend_interaction",
            AbilityKind::ChooseEffect => "choose_effect",
        }
    }

    pub fn category(&self) -> AbilityCategory {
        use AbilityKind::*;
        match self {
            EntersBattlefield | LeavesBattlefield | Dies | Attacks | Blocks | DealsDamage
            | TakesDamage | StartOfTurn | EndOfTurn => AbilityCategory::Triggered,
            TapAbility | ExhaustAbility | SacrificeAbility | PayCostAbility => {
                AbilityCategory::Activated
            }
            StaticBuff | StaticDebuff | CostReduction | Protection | Aura => AbilityCategory::Static,
            Destroy | Damage | Bounce | DrawCards | BuffTarget | Counter | Exile | Discard
            | CopySpell | EnergyGeneration | RuneGeneration | LegendInteraction | ChooseEffect => {
                AbilityCategory::Effect
            }
        }
    }

    /// Removal effects answer an opposing unit
    pub fn is_removal(&self) -> bool {
        matches!(
            self,
            AbilityKind::Destroy | AbilityKind::Damage | AbilityKind::Bounce | AbilityKind::Exile
        )
    }

    /// Activated abilities that can be used again on later turns
    pub fn is_repeatable(&self) -> bool {
        matches!(
            self,
            AbilityKind::TapAbility | AbilityKind::ExhaustAbility | AbilityKind::PayCostAbility
        )
    }
}

impl fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four pattern groups, in the order the parser evaluates them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityCategory {
    Triggered,
    Activated,
    Static,
    Effect,
}

/// What an ability targets or affects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTarget {
    SelfCard,
    TargetUnit,
    TargetSpell,
    TargetPlayer,
    AllUnits,
    YourUnits,
    OpponentUnits,
    YourLegend,
    OpponentLegend,
}

impl EffectTarget {
    /// Targets that hit more than one unit
    pub fn is_mass(&self) -> bool {
        matches!(self, EffectTarget::AllUnits | EffectTarget::OpponentUnits)
    }
}

/// When an ability can be used or fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTiming {
    Instant,
    MainPhase,
    Combat,
    #[default]
    Always,
    OnTrigger,
}

/// One ability recovered from one sentence of rules text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedAbility {
    pub kind: AbilityKind,
    /// The source sentence, trimmed
    pub raw_text: String,
    pub target: Option<EffectTarget>,
    pub timing: EffectTiming,
    /// Activation cost text (everything before the colon)
    pub cost: Option<String>,
    /// First numeric magnitude found ("+N", "deal N damage", "draw N", "cost N less")
    pub value: Option<i32>,
    pub conditions: SmallVec<[String; 1]>,
    pub keywords_granted: SmallVec<[String; 2]>,
    pub domain_restriction: Option<Domain>,
    /// Set when no pattern matched and the sentence became a generic static
    #[serde(default)]
    pub fallback: bool,
}

impl ParsedAbility {
    pub fn new(kind: AbilityKind, raw_text: impl Into<String>, timing: EffectTiming) -> Self {
        ParsedAbility {
            kind,
            raw_text: raw_text.into(),
            target: None,
            timing,
            cost: None,
            value: None,
            conditions: SmallVec::new(),
            keywords_granted: SmallVec::new(),
            domain_restriction: None,
            fallback: false,
        }
    }

    pub fn category(&self) -> AbilityCategory {
        self.kind.category()
    }

    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Magnitude, defaulting to 1 when the text names no number
    pub fn magnitude(&self) -> i32 {
        self.value.unwrap_or(1)
    }

    pub fn is_fast(&self) -> bool {
        matches!(self.timing, EffectTiming::Instant | EffectTiming::Combat)
    }

    pub fn text_contains(&self, needle: &str) -> bool {
        self.raw_text.to_lowercase().contains(needle)
    }
}

/// Abilities split by category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorizedAbilities<'a> {
    pub triggered: Vec<&'a ParsedAbility>,
    pub activated: Vec<&'a ParsedAbility>,
    pub statics: Vec<&'a ParsedAbility>,
    pub effects: Vec<&'a ParsedAbility>,
}

/// Split an ability list into its categories, preserving order
pub fn categorize(abilities: &[ParsedAbility]) -> CategorizedAbilities<'_> {
    let mut out = CategorizedAbilities::default();
    for ability in abilities {
        match ability.category() {
            AbilityCategory::Triggered => out.triggered.push(ability),
            AbilityCategory::Activated => out.activated.push(ability),
            AbilityCategory::Static => out.statics.push(ability),
            AbilityCategory::Effect => out.effects.push(ability),
        }
    }
    out
}

/// Human-readable summary of an ability list
pub fn ability_summary(abilities: &[ParsedAbility]) -> String {
    if abilities.is_empty() {
        return "No special abilities".to_string();
    }

    let c = categorize(abilities);
    let mut parts = Vec::new();
    if !c.triggered.is_empty() {
        parts.push(format!("{} triggered ability(ies)", c.triggered.len()));
    }
    if !c.activated.is_empty() {
        parts.push(format!("{} activated ability(ies)", c.activated.len()));
    }
    if !c.statics.is_empty() {
        parts.push(format!("{} static ability(ies)", c.statics.len()));
    }
    if !c.effects.is_empty() {
        parts.push(format!("{} effect(s)", c.effects.len()));
    }
    parts.join(", ")
}

pub fn has_kind(abilities: &[ParsedAbility], kind: AbilityKind) -> bool {
    abilities.iter().any(|a| a.kind == kind)
}

pub fn abilities_by_timing(abilities: &[ParsedAbility], timing: EffectTiming) -> Vec<&ParsedAbility> {
    abilities.iter().filter(|a| a.timing == timing).collect()
}
