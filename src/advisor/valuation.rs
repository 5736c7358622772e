//! Card valuation
//!
//! A card's score is the sum of independent contributions for its type,
//! its parsed abilities and the game phase, plus the amplified legend
//! synergy total. Only the final score is floored at zero.

use crate::advisor::{legend_synergy, BoardAnalysis, SynergyReport};
use crate::config::AdvisorConfig;
use crate::core::{
    AbilityKind, Card, CardId, CardType, GamePhase, ParsedAbility, PlayerState, Tag,
};
use serde::{Deserialize, Serialize};

/// Board and turn context shared by every card valued in one call
#[derive(Debug, Clone, Copy)]
pub struct ValuationContext<'a> {
    pub board: &'a BoardAnalysis,
    pub game_phase: GamePhase,
    pub config: &'a AdvisorConfig,
}

impl<'a> ValuationContext<'a> {
    pub fn new(board: &'a BoardAnalysis, game_phase: GamePhase, config: &'a AdvisorConfig) -> Self {
        ValuationContext {
            board,
            game_phase,
            config,
        }
    }

    fn friendly_units(&self) -> usize {
        self.board.my_units
    }

    fn opponent_units(&self) -> usize {
        self.board.op_units
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardValuation {
    pub card_id: CardId,
    /// Score before the legend modifier
    pub base_score: f64,
    pub synergy: SynergyReport,
    pub score: f64,
}

/// Value one card in context
pub fn value_card(
    card: &Card,
    abilities: &[ParsedAbility],
    player: &PlayerState,
    opponent: &PlayerState,
    ctx: &ValuationContext<'_>,
) -> CardValuation {
    let base_score = match card.card_type {
        CardType::Unit => unit_score(card, abilities, ctx),
        CardType::Spell => spell_score(card, abilities, ctx),
        CardType::Gear => gear_score(card, abilities, ctx),
        CardType::Legend | CardType::Battlefield => 0.0,
    };

    let synergy = legend_synergy::analyze(card, player, opponent, ctx.board, ctx.config);
    let score = (base_score + synergy.total * ctx.config.legend_multiplier).max(0.0);

    CardValuation {
        card_id: card.id.clone(),
        base_score,
        synergy,
        score,
    }
}

fn unit_score(card: &Card, abilities: &[ParsedAbility], ctx: &ValuationContext<'_>) -> f64 {
    let mut score = 0.0;

    let might = f64::from(card.might_or_zero());
    if card.energy_cost == 0 {
        score += might * 2.0;
    } else {
        let ratio = might / f64::from(card.energy_cost);
        score += ratio * 2.0;
        if ratio >= 1.5 {
            score += 1.5;
        } else if ratio >= 1.0 {
            score += 0.75;
        }
    }

    score += card.keywords.iter().map(|k| k.value()).sum::<f64>();
    score += abilities
        .iter()
        .map(|a| unit_ability_score(a, ctx))
        .sum::<f64>();
    score += curve_bonus(card.energy_cost, ctx.game_phase);

    score
}

fn unit_ability_score(ability: &ParsedAbility, ctx: &ValuationContext<'_>) -> f64 {
    if ability.fallback {
        return 0.25;
    }
    match ability.kind {
        AbilityKind::EntersBattlefield => {
            let text = ability.raw_text.to_lowercase();
            let mut score = 3.0;
            if text.contains("draw") {
                score += 2.0 * f64::from(ability.magnitude());
            }
            if text.contains("destroy") {
                score += 4.0;
            }
            if text.contains("damage") {
                score += 0.8 * f64::from(ability.magnitude());
            }
            score
        }
        AbilityKind::StaticBuff | AbilityKind::Aura => {
            let lord = 0.75 * f64::from(ability.magnitude()) * ctx.friendly_units() as f64;
            1.0 + lord + 0.5 * ctx.board.open_lanes() as f64
        }
        kind if kind.is_repeatable() => 1.5,
        AbilityKind::SacrificeAbility => 0.5,
        AbilityKind::LeavesBattlefield
        | AbilityKind::Dies
        | AbilityKind::Attacks
        | AbilityKind::Blocks
        | AbilityKind::DealsDamage
        | AbilityKind::TakesDamage
        | AbilityKind::StartOfTurn
        | AbilityKind::EndOfTurn
        | AbilityKind::Protection
        | AbilityKind::CostReduction => 1.0,
        _ => 0.0,
    }
}

/// Phase-sensitive cost-curve adjustment for units
fn curve_bonus(energy_cost: u32, phase: GamePhase) -> f64 {
    match phase {
        GamePhase::Early => match energy_cost {
            0 | 1 => 2.0,
            2 => 1.5,
            3 => 0.5,
            _ => -1.0,
        },
        GamePhase::Mid => match energy_cost {
            3 | 4 => 1.0,
            0..=2 => 0.5,
            _ => 0.0,
        },
        GamePhase::Late => {
            if energy_cost >= 5 {
                1.0
            } else {
                0.0
            }
        }
    }
}

fn spell_score(card: &Card, abilities: &[ParsedAbility], ctx: &ValuationContext<'_>) -> f64 {
    let mut score = if card.energy_cost == 0 {
        1.5
    } else if card.energy_cost <= 2 {
        1.0
    } else {
        0.0
    };

    if abilities.is_empty() {
        return score + tag_score(card);
    }

    score += abilities
        .iter()
        .map(|a| spell_ability_score(a, ctx))
        .sum::<f64>();
    score
}

fn spell_ability_score(ability: &ParsedAbility, ctx: &ValuationContext<'_>) -> f64 {
    if ability.fallback {
        return 0.25;
    }
    let magnitude = f64::from(ability.magnitude());
    match ability.kind {
        AbilityKind::Destroy => {
            let mass = ability.target.is_some_and(|t| t.is_mass());
            if mass && ctx.opponent_units() >= 2 {
                6.0
            } else if ability.is_unconditional() {
                4.0
            } else {
                2.5
            }
        }
        AbilityKind::Damage => {
            let mut score = 0.8 * magnitude;
            if ability.target.is_some_and(|t| t.is_mass()) {
                score += ctx.opponent_units() as f64;
            }
            score
        }
        AbilityKind::DrawCards => {
            let mut score = 2.5 * magnitude;
            if ctx.game_phase == GamePhase::Late {
                score += 1.0;
            }
            score
        }
        AbilityKind::BuffTarget | AbilityKind::StaticBuff | AbilityKind::Aura => {
            if ctx.friendly_units() == 0 {
                return 0.0;
            }
            let mut score = 1.5 + 0.5 * magnitude;
            if ability.is_fast() {
                score += 1.0;
            }
            score
        }
        AbilityKind::Counter => {
            if ability.is_fast() {
                4.0
            } else {
                3.0
            }
        }
        AbilityKind::Bounce => 2.0,
        AbilityKind::Exile => 3.5,
        AbilityKind::Discard => 0.5,
        AbilityKind::ChooseEffect => 1.5,
        AbilityKind::EnergyGeneration | AbilityKind::RuneGeneration => 1.5,
        _ => 0.0,
    }
}

/// Fallback for spells whose text yielded nothing
fn tag_score(card: &Card) -> f64 {
    let mut score = 0.0;
    if card.has_tag(&Tag::Removal) {
        score += 3.0;
    }
    if card.has_tag(&Tag::Damage) {
        score += 2.0;
    }
    if card.has_tag(&Tag::Buff) || card.has_tag(&Tag::Protection) {
        score += 1.5;
    }
    score
}

fn gear_score(card: &Card, abilities: &[ParsedAbility], ctx: &ValuationContext<'_>) -> f64 {
    // Gear without a body to carry it is dead weight
    if ctx.friendly_units() == 0 {
        return 0.0;
    }

    let mut score = 2.0;
    for ability in abilities {
        score += ability.keywords_granted.len() as f64;
        if matches!(ability.kind, AbilityKind::BuffTarget | AbilityKind::StaticBuff)
            && !ability.fallback
        {
            score += 0.75 * f64::from(ability.magnitude());
        }
    }
    if ctx.config.is_cheap(card.energy_cost) {
        score += 0.5;
    }
    score
}
