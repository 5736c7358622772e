//! Opening-hand mulligan evaluation
//!
//! Cards are judged one at a time in hand order against running hand
//! composition. Two hand-level limits are then enforced as a post-pass:
//! at least one card is kept, and at most `max_mulligans` go back.

use crate::advisor::{HandComposition, MulliganAdvice, MulliganDecision};
use crate::config::AdvisorConfig;
use crate::core::{normalize_text, Card, CardId, CardType, Domain, Keyword, Legend, Tag};
use crate::{AdvisorError, Result};
use rustc_hash::FxHashSet;

/// Keywords worth calling out on a cheap unit
const PRESSURE_KEYWORDS: [Keyword; 4] = [
    Keyword::Assault,
    Keyword::Guard,
    Keyword::Ambush,
    Keyword::Flying,
];

/// Running state threaded through per-card evaluation
struct HandState<'a> {
    composition: &'a HandComposition,
    kept_three_cost_unit: bool,
    going_first: bool,
}

/// Evaluate an opening hand
///
/// The hand must be exactly `config.opening_hand_size` cards.
pub fn evaluate_mulligan(
    hand: &[Card],
    legend: Option<&Legend>,
    going_first: bool,
    config: &AdvisorConfig,
) -> Result<MulliganAdvice> {
    if hand.len() != config.opening_hand_size {
        return Err(AdvisorError::InvalidHandSize {
            expected: config.opening_hand_size,
            actual: hand.len(),
        });
    }

    let composition = analyze_hand_composition(hand, config);
    let synergy = legend_synergy_cards(hand, legend);

    let mut state = HandState {
        composition: &composition,
        kept_three_cost_unit: false,
        going_first,
    };

    let mut decisions = Vec::with_capacity(hand.len());
    for card in hand {
        let has_synergy = synergy.contains(&card.id);
        let (keep, reason) = if card.is_unit() {
            evaluate_unit(card, &state, has_synergy, config)
        } else {
            evaluate_non_unit(card, &state, has_synergy)
        };

        if keep && card.is_unit() && card.energy_cost == 3 {
            state.kept_three_cost_unit = true;
        }

        decisions.push(MulliganDecision {
            card_id: card.id.clone(),
            name: card.name.clone(),
            keep,
            reason,
            forced: false,
        });
    }

    keep_at_least_one(&mut decisions, hand);
    enforce_mulligan_limit(&mut decisions, hand, config.max_mulligans);

    let mulligan_count = decisions.iter().filter(|d| !d.keep).count();
    let summary = summarize(hand.len(), mulligan_count, &composition);

    Ok(MulliganAdvice {
        decisions,
        mulligan_count,
        summary,
        composition,
    })
}

pub fn analyze_hand_composition(hand: &[Card], config: &AdvisorConfig) -> HandComposition {
    let mut composition = HandComposition::default();
    let mut total_cost = 0u32;

    for card in hand {
        match card.card_type {
            CardType::Unit => {
                composition.unit_count += 1;
                if config.is_cheap(card.energy_cost) {
                    composition.cheap_unit_count += 1;
                }
            }
            CardType::Spell => composition.spell_count += 1,
            CardType::Gear => composition.gear_count += 1,
            CardType::Legend | CardType::Battlefield => {}
        }
        if card.energy_cost >= 4 {
            composition.high_cost_count += 1;
        }
        total_cost += card.energy_cost;
        let slot = card.energy_cost.min(4) as usize;
        composition.cost_distribution[slot] += 1;
    }

    if !hand.is_empty() {
        composition.avg_cost = f64::from(total_cost) / hand.len() as f64;
    }
    let dist = &composition.cost_distribution;
    composition.has_curve = dist[1] + dist[2] >= 2 && dist[3] >= 1;

    composition
}

/// Ids of hand cards that reference the legend by name, domain or shared tag
pub fn legend_synergy_cards(hand: &[Card], legend: Option<&Legend>) -> FxHashSet<CardId> {
    let Some(legend) = legend else {
        return FxHashSet::default();
    };

    let name = legend.name().normalized();
    let domain = legend.domain();
    let legend_tags: FxHashSet<String> = legend.card.tags.iter().map(Tag::key).collect();

    hand.iter()
        .filter(|card| {
            let text = normalize_text(&card.rules_text);
            let by_name = !text.is_empty() && !name.is_empty() && text.contains(&name);
            let by_domain = domain != Domain::Colorless && text.contains(domain.as_str());
            let by_tag = card.tags.iter().any(|t| legend_tags.contains(&t.key()));
            by_name || by_domain || by_tag
        })
        .map(|card| card.id.clone())
        .collect()
}

fn evaluate_unit(
    card: &Card,
    state: &HandState<'_>,
    has_synergy: bool,
    config: &AdvisorConfig,
) -> (bool, String) {
    let cost = card.energy_cost;

    if config.is_cheap(cost) {
        let notable: Vec<&str> = card
            .keywords
            .iter()
            .filter(|k| PRESSURE_KEYWORDS.contains(k))
            .map(Keyword::as_str)
            .collect();
        if !notable.is_empty() {
            return (
                true,
                format!(
                    "Cheap unit with {}: excellent early pressure.",
                    notable.join(", ")
                ),
            );
        }
        return (
            true,
            "Cheap unit (cost ≤ 2): essential for early board presence.".to_string(),
        );
    }

    if cost == 3 {
        if state.kept_three_cost_unit {
            return (
                false,
                "Additional 3-cost unit: too heavy, need cheaper plays.".to_string(),
            );
        }
        let reason = if card.might_or_zero() >= 3 {
            "Strong 3-cost unit: solid curve topper with good stats."
        } else if !card.keywords.is_empty() {
            "3-cost unit with keywords: good curve play."
        } else {
            "3-cost unit: acceptable curve topper for opening hand."
        };
        return (true, reason.to_string());
    }

    if has_synergy {
        return (
            true,
            format!("High-cost unit ({cost}) with legend synergy: worth the investment."),
        );
    }

    // Going second buys an extra turn for a strong 4-drop
    if !state.going_first
        && cost == 4
        && card.might_or_zero() >= 4
        && state.composition.cheap_unit_count >= 2
    {
        return (
            true,
            "Strong 4-drop and going second with early game: acceptable curve top.".to_string(),
        );
    }

    (
        false,
        format!("High-cost unit ({cost}): too expensive for opening hand."),
    )
}

fn evaluate_non_unit(card: &Card, state: &HandState<'_>, has_synergy: bool) -> (bool, String) {
    let cost = card.energy_cost;
    let removal = card.has_tag(&Tag::Removal) || card.has_tag(&Tag::Destroy);
    let composition = state.composition;

    match cost {
        0 => (true, "Zero-cost spell: free value, always keep.".to_string()),
        1 => {
            let reason = if removal {
                "Cheap removal (cost 1): answers early threats."
            } else if card.has_tag(&Tag::Draw) {
                "Cheap card draw: helps find better cards."
            } else {
                "Cheap utility (cost 1): flexible early game."
            };
            (true, reason.to_string())
        }
        2 => {
            if removal {
                (true, "Cheap removal spell: answers early threats.".to_string())
            } else if has_synergy {
                (
                    true,
                    "2-cost spell with legend synergy: enables combos.".to_string(),
                )
            } else if composition.spell_count >= 3 && composition.cheap_unit_count == 0 {
                (
                    false,
                    "Too many spells: need units for board presence.".to_string(),
                )
            } else {
                (
                    true,
                    "Cheap utility spell: acceptable in balanced hand.".to_string(),
                )
            }
        }
        _ => {
            if has_synergy {
                return (
                    true,
                    format!("Expensive spell ({cost}) with legend synergy: worth keeping for combo."),
                );
            }
            if cost == 3 && removal && composition.cheap_unit_count >= 2 {
                return (
                    true,
                    "Mid-cost removal with early game: can answer mid-game threats.".to_string(),
                );
            }
            if composition.high_cost_count >= 2 && composition.cheap_unit_count == 0 {
                return (
                    false,
                    format!("Expensive spell ({cost}) in top-heavy hand: need cheaper plays."),
                );
            }
            (
                false,
                format!("Expensive spell/gear ({cost}): too slow for opening hand."),
            )
        }
    }
}

/// Higher means a worse card to keep
pub fn mulligan_priority(card: &Card) -> f64 {
    let mut score = f64::from(card.energy_cost) * 10.0;

    match card.card_type {
        CardType::Spell => score += 5.0,
        CardType::Gear => score += 3.0,
        CardType::Unit => {
            if card.might.is_some_and(|m| i64::from(m) < i64::from(card.energy_cost)) {
                score += 5.0;
            }
        }
        CardType::Legend | CardType::Battlefield => {}
    }

    if card.keywords.is_empty() {
        score += 2.0;
    }

    score
}

/// If every card is marked for mulligan, keep the one least worth replacing
fn keep_at_least_one(decisions: &mut [MulliganDecision], hand: &[Card]) {
    if decisions.iter().any(|d| d.keep) {
        return;
    }

    let best = hand
        .iter()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (i, card)| {
            let priority = mulligan_priority(card);
            match best {
                Some((_, p)) if p <= priority => best,
                _ => Some((i, priority)),
            }
        });

    if let Some((i, _)) = best {
        let decision = &mut decisions[i];
        decision.keep = true;
        decision.forced = true;
        decision.reason = "Keeping cheapest card (cannot mulligan entire hand).".to_string();
    }
}

/// Flip excess mulligans back to keep, sending back the worst cards first
fn enforce_mulligan_limit(decisions: &mut [MulliganDecision], hand: &[Card], max_mulligans: usize) {
    let mut marked: Vec<(usize, f64)> = decisions
        .iter()
        .enumerate()
        .filter(|(_, d)| !d.keep)
        .map(|(i, _)| (i, mulligan_priority(&hand[i])))
        .collect();

    if marked.len() <= max_mulligans {
        return;
    }

    // Stable: ties keep hand order
    marked.sort_by(|a, b| b.1.total_cmp(&a.1));

    for &(i, _) in &marked[max_mulligans..] {
        let decision = &mut decisions[i];
        decision.keep = true;
        decision.forced = true;
        decision.reason = format!(
            "Originally suggested mulligan, but kept due to {max_mulligans}-card mulligan limit. \
             ({} is expensive but less critical to replace than others).",
            hand[i].name
        );
    }
}

fn summarize(hand_size: usize, mulligan_count: usize, composition: &HandComposition) -> String {
    let decision = match mulligan_count {
        0 => format!("Keep all {hand_size} cards"),
        1 => format!("Mulligan 1 card, keeping {}", hand_size - 1),
        n => format!("Mulligan {n} cards (maximum allowed)"),
    };

    let curve = if composition.avg_cost <= 2.0 {
        "aggressive early curve"
    } else if composition.avg_cost <= 2.5 {
        "balanced curve"
    } else if composition.avg_cost <= 3.0 {
        "slightly top-heavy"
    } else {
        "seeking cheaper plays"
    };

    format!("{decision} - {curve}.")
}
