//! Greedy play sequencing
//!
//! The planner is a heuristic, not a solver. Candidates are sorted by
//! priority and the scan restarts from the top after every admission, so
//! the result is the greedy fixed point: no remaining card fits the budget
//! with its dependencies met. There is no backtracking. A card whose only
//! enabler is itself blocked is never scheduled and is reported as such.

use crate::advisor::legend_synergy::{readies_legend, requires_legend_exhaustion};
use crate::advisor::{
    choose_lane, BoardAnalysis, CardValuation, LaneAnalysis, LanePlacement, PlaySequence,
    PlaySequenceStep, RiskLevel, ThreatLevel, UnscheduledCard,
};
use crate::config::AdvisorConfig;
use crate::core::{
    normalize_text, AbilityKind, Card, CardId, GamePhase, Keyword, ParsedAbility, Phase,
    PlayerState, PowerPool, Tag,
};

const OPEN_LANE_BONUS: f64 = 15.0;
const GUARD_UNDER_THREAT: f64 = 10.0;
const EARLY_ASSAULT: f64 = 8.0;
const GEAR_WITHOUT_UNITS: f64 = -10.0;
const HOLD_FAST_SPELL: f64 = -6.0;
const CHEAP_TIEBREAK: f64 = 3.0;
const EARLY_EXPENSIVE: f64 = -5.0;

/// Names shorter than this are too generic to count as references
const MIN_REFERENCE_LEN: usize = 3;

/// Our legend's state at the start of the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendStatus {
    Absent,
    Ready,
    Exhausted,
}

impl LegendStatus {
    pub fn of(player: &PlayerState) -> Self {
        match &player.legend {
            None => LegendStatus::Absent,
            Some(legend) if legend.exhausted => LegendStatus::Exhausted,
            Some(_) => LegendStatus::Ready,
        }
    }
}

/// Inputs shared by every sequence built for one turn
#[derive(Debug, Clone)]
pub struct PlanContext<'a> {
    pub board: &'a BoardAnalysis,
    pub game_phase: GamePhase,
    pub phase: Phase,
    pub energy: u32,
    pub power: PowerPool,
    pub legend: LegendStatus,
    pub config: &'a AdvisorConfig,
}

/// A playable card with its valuation and play priority
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub card: &'a Card,
    pub abilities: &'a [ParsedAbility],
    pub valuation: CardValuation,
    pub priority: f64,
}

impl<'a> Candidate<'a> {
    pub fn new(
        card: &'a Card,
        abilities: &'a [ParsedAbility],
        valuation: CardValuation,
        ctx: &PlanContext<'_>,
    ) -> Self {
        let priority = play_priority(card, abilities, &valuation, ctx);
        Candidate {
            card,
            abilities,
            valuation,
            priority,
        }
    }

    pub fn id(&self) -> &CardId {
        &self.card.id
    }

    pub fn is_removal(&self) -> bool {
        is_removal(self.card, self.abilities)
    }

    pub fn is_buff_spell(&self) -> bool {
        self.card.is_spell()
            && !self.is_removal()
            && (self.card.has_tag(&Tag::Buff)
                || self.abilities.iter().any(|a| {
                    !a.fallback
                        && matches!(
                            a.kind,
                            AbilityKind::BuffTarget | AbilityKind::StaticBuff | AbilityKind::Aura
                        )
                }))
    }
}

fn is_removal(card: &Card, abilities: &[ParsedAbility]) -> bool {
    card.is_spell() && (card.has_removal_tag() || abilities.iter().any(|a| a.kind.is_removal()))
}

fn removal_urgency(threat: ThreatLevel) -> f64 {
    match threat {
        ThreatLevel::Low => 5.0,
        ThreatLevel::Medium => 10.0,
        ThreatLevel::High => 15.0,
        ThreatLevel::Critical => 20.0,
    }
}

/// Valuation score plus situational adjustments
pub fn play_priority(
    card: &Card,
    abilities: &[ParsedAbility],
    valuation: &CardValuation,
    ctx: &PlanContext<'_>,
) -> f64 {
    let board = ctx.board;
    let early = ctx.game_phase.is_early();
    let mut priority = valuation.score;

    if card.is_unit() {
        if board.open_lanes() > 0 {
            priority += OPEN_LANE_BONUS;
        }
        if card.has_keyword(&Keyword::Guard) && board.threat >= ThreatLevel::Medium {
            priority += GUARD_UNDER_THREAT;
        }
        if card.has_keyword(&Keyword::Assault) && early {
            priority += EARLY_ASSAULT;
        }
    }

    let removal = is_removal(card, abilities);
    if removal && board.op_units > 0 {
        priority += removal_urgency(board.threat);
    }

    if card.is_gear() && board.my_units == 0 {
        priority += GEAR_WITHOUT_UNITS;
    }

    // Tricks are worth more held for a later window
    let fast = card.keywords.iter().any(Keyword::is_fast) || abilities.iter().any(|a| a.is_fast());
    if card.is_spell() && fast && !removal && ctx.phase == Phase::Main {
        priority += HOLD_FAST_SPELL;
    }

    if ctx.config.is_cheap(card.energy_cost) {
        priority += CHEAP_TIEBREAK;
    }
    if card.energy_cost >= 4 && early {
        priority += EARLY_EXPENSIVE;
    }

    priority
}

#[derive(Debug, Clone, PartialEq)]
enum Requirement {
    /// Positions (within the candidate slice) that must be played first
    After(Vec<usize>),
    Blocked(String),
}

fn cheapest_unit(cands: &[&Candidate<'_>]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, cand) in cands.iter().enumerate() {
        if !cand.card.is_unit() {
            continue;
        }
        let better = match best {
            None => true,
            Some(b) => {
                let b = cands[b];
                cand.card.energy_cost < b.card.energy_cost
                    || (cand.card.energy_cost == b.card.energy_cost && cand.priority > b.priority)
            }
        };
        if better {
            best = Some(i);
        }
    }
    best
}

fn best_ready_effect(cands: &[&Candidate<'_>], exclude: usize) -> Option<usize> {
    cands
        .iter()
        .enumerate()
        .filter(|(i, c)| {
            *i != exclude && readies_legend(c.card) && !requires_legend_exhaustion(c.card)
        })
        .fold(None::<(usize, f64)>, |best, (i, c)| match best {
            Some((_, p)) if p >= c.priority => best,
            _ => Some((i, c.priority)),
        })
        .map(|(i, _)| i)
}

fn requirements(cands: &[&Candidate<'_>], ctx: &PlanContext<'_>) -> Vec<Requirement> {
    let names: Vec<String> = cands.iter().map(|c| c.card.name.normalized()).collect();
    let provider = cheapest_unit(cands);

    cands
        .iter()
        .enumerate()
        .map(|(i, cand)| {
            let mut after = Vec::new();

            let needs_unit = (cand.card.is_gear() || cand.is_buff_spell()) && ctx.board.my_units == 0;
            if needs_unit {
                match provider {
                    Some(p) => after.push(p),
                    None => {
                        return Requirement::Blocked(
                            "No friendly unit in play or in hand to target".to_string(),
                        )
                    }
                }
            }

            let text = normalize_text(&cand.card.rules_text);
            for (j, name) in names.iter().enumerate() {
                if j != i
                    && *name != names[i]
                    && name.chars().count() >= MIN_REFERENCE_LEN
                    && text.contains(name.as_str())
                    && !after.contains(&j)
                {
                    after.push(j);
                }
            }

            if requires_legend_exhaustion(cand.card) {
                match ctx.legend {
                    LegendStatus::Absent => {
                        return Requirement::Blocked(
                            "Requires legend exhaustion but no legend is in play".to_string(),
                        )
                    }
                    LegendStatus::Exhausted => match best_ready_effect(cands, i) {
                        Some(r) if !after.contains(&r) => after.push(r),
                        Some(_) => {}
                        None => {
                            return Requirement::Blocked(
                                "Requires legend exhaustion but the legend is exhausted and nothing in hand readies it"
                                    .to_string(),
                            )
                        }
                    },
                    LegendStatus::Ready => {}
                }
            }

            Requirement::After(after)
        })
        .collect()
}

/// Mutable bookkeeping for one scheduling run
struct Schedule {
    remaining: u32,
    pool: PowerPool,
    /// None when there is no legend
    legend_ready: Option<bool>,
    lanes: Vec<LaneAnalysis>,
    admitted: Vec<bool>,
}

impl Schedule {
    fn admissible(&self, cand: &Candidate<'_>, requirement: &Requirement) -> Option<PowerPool> {
        let Requirement::After(deps) = requirement else {
            return None;
        };
        if !deps.iter().all(|&d| self.admitted[d]) {
            return None;
        }
        if cand.card.energy_cost > self.remaining {
            return None;
        }
        if requires_legend_exhaustion(cand.card) && self.legend_ready != Some(true) {
            return None;
        }
        let mut pool = self.pool;
        pool.pay(&cand.card.power_cost).ok()?;
        Some(pool)
    }
}

/// Schedule one candidate set into a sequence
pub fn build_sequence(
    name: &str,
    cands: &[&Candidate<'_>],
    ctx: &PlanContext<'_>,
    primary: bool,
) -> PlaySequence {
    let reqs = requirements(cands, ctx);

    let mut order: Vec<usize> = (0..cands.len()).collect();
    order.sort_by(|&a, &b| cands[b].priority.total_cmp(&cands[a].priority));

    let mut schedule = Schedule {
        remaining: ctx.energy,
        pool: ctx.power,
        legend_ready: match ctx.legend {
            LegendStatus::Absent => None,
            LegendStatus::Ready => Some(true),
            LegendStatus::Exhausted => Some(false),
        },
        lanes: ctx.board.lanes.clone(),
        admitted: vec![false; cands.len()],
    };
    let mut steps: Vec<PlaySequenceStep> = Vec::new();

    loop {
        let next = order.iter().copied().find_map(|i| {
            if schedule.admitted[i] {
                return None;
            }
            schedule
                .admissible(cands[i], &reqs[i])
                .map(|pool| (i, pool))
        });
        let Some((i, pool)) = next else {
            break;
        };

        let cand = cands[i];
        schedule.admitted[i] = true;
        schedule.pool = pool;
        schedule.remaining -= cand.card.energy_cost;
        if requires_legend_exhaustion(cand.card) {
            schedule.legend_ready = Some(false);
        }
        if readies_legend(cand.card) && schedule.legend_ready.is_some() {
            schedule.legend_ready = Some(true);
        }

        let placement = if cand.card.is_unit() {
            choose_lane(cand.card, &schedule.lanes, ctx.game_phase)
        } else {
            None
        };
        if let Some(p) = &placement {
            if let Some(lane) = schedule.lanes.get_mut(p.lane) {
                *lane = lane.with_my_unit(cand.card.might_or_zero());
            }
        }

        let dependencies: Vec<CardId> = match &reqs[i] {
            Requirement::After(deps) => deps.iter().map(|&d| cands[d].id().clone()).collect(),
            Requirement::Blocked(_) => Vec::new(),
        };
        let dep_names: Vec<String> = match &reqs[i] {
            Requirement::After(deps) => deps.iter().map(|&d| cands[d].card.name.to_string()).collect(),
            Requirement::Blocked(_) => Vec::new(),
        };

        let cumulative_cost = ctx.energy - schedule.remaining;
        steps.push(PlaySequenceStep {
            card_id: cand.id().clone(),
            name: cand.card.name.clone(),
            position: steps.len() + 1,
            energy_cost: cand.card.energy_cost,
            cumulative_cost,
            lane: placement.as_ref().map(|p| p.lane),
            dependencies,
            reason: describe_play(cand, placement.as_ref(), &dep_names, ctx),
            placement,
        });
    }

    let unscheduled = (0..cands.len())
        .filter(|&i| !schedule.admitted[i])
        .map(|i| UnscheduledCard {
            card_id: cands[i].id().clone(),
            reason: unscheduled_reason(i, cands, &reqs, &schedule),
        })
        .collect();

    finish_sequence(name, steps, unscheduled, ctx, primary)
}

fn unscheduled_reason(
    i: usize,
    cands: &[&Candidate<'_>],
    reqs: &[Requirement],
    schedule: &Schedule,
) -> String {
    let cand = cands[i];
    let deps = match &reqs[i] {
        Requirement::Blocked(reason) => return reason.clone(),
        Requirement::After(deps) => deps,
    };

    let missing: Vec<usize> = deps.iter().copied().filter(|&d| !schedule.admitted[d]).collect();
    if !missing.is_empty() {
        let circular = missing.iter().find(|&&d| match &reqs[d] {
            Requirement::After(back) => back.contains(&i),
            Requirement::Blocked(_) => false,
        });
        if let Some(&d) = circular {
            return format!("Circular dependency with {}", cands[d].card.name);
        }
        let names: Vec<String> = missing.iter().map(|&d| cands[d].card.name.to_string()).collect();
        return format!("Waiting on {}, which could not be scheduled", names.join(", "));
    }

    if cand.card.energy_cost > schedule.remaining {
        return format!(
            "Not enough energy remaining (needs {}, {} left)",
            cand.card.energy_cost, schedule.remaining
        );
    }
    if requires_legend_exhaustion(cand.card) {
        return "Legend is already exhausted by an earlier play".to_string();
    }
    format!("Not enough power remaining (needs {})", cand.card.power_cost)
}

fn finish_sequence(
    name: &str,
    steps: Vec<PlaySequenceStep>,
    unscheduled: Vec<UnscheduledCard>,
    ctx: &PlanContext<'_>,
    primary: bool,
) -> PlaySequence {
    let total_energy: u32 = steps.iter().map(|s| s.energy_cost).sum();
    let efficiency = if ctx.energy == 0 {
        0.0
    } else {
        f64::from(total_energy) / f64::from(ctx.energy)
    };

    let risk = if efficiency < 0.5 {
        RiskLevel::Safe
    } else if efficiency >= 0.9 && !ctx.game_phase.is_early() {
        RiskLevel::Aggressive
    } else {
        RiskLevel::Moderate
    };

    let reasoning = if steps.is_empty() {
        format!("No card could be scheduled within {} energy.", ctx.energy)
    } else {
        let names: Vec<String> = steps.iter().map(|s| s.name.to_string()).collect();
        let mut text = format!(
            "Plays {} using {}/{} energy.",
            names.join(" -> "),
            total_energy,
            ctx.energy
        );
        if !unscheduled.is_empty() {
            text.push_str(&format!(" {} card(s) held back.", unscheduled.len()));
        }
        text
    };

    PlaySequence {
        name: name.to_string(),
        steps,
        total_energy,
        efficiency,
        risk,
        reasoning,
        primary,
        unscheduled,
    }
}

/// Human-readable reason for playing a card now
pub fn describe_play(
    cand: &Candidate<'_>,
    placement: Option<&LanePlacement>,
    dependencies: &[String],
    ctx: &PlanContext<'_>,
) -> String {
    let card = cand.card;
    let board = ctx.board;

    let reason = if card.is_unit() {
        describe_unit(card, placement, ctx)
    } else if cand.is_removal() && board.op_units > 0 {
        let threat = if board.threat >= ThreatLevel::High {
            "High threat level".to_string()
        } else {
            format!("{} unit(s)", board.op_units)
        };
        format!("Removal spell to answer opponent's {threat} on board.")
    } else if card.is_gear() {
        if dependencies.is_empty() {
            "Gear to equip on existing unit(s) for value and board advantage.".to_string()
        } else {
            format!("Gear to equip on {} once it is in play.", dependencies.join(", "))
        }
    } else if cand.is_buff_spell() {
        if dependencies.is_empty() {
            "Buff/protection spell to enhance or protect your units.".to_string()
        } else {
            format!("Buff/protection spell for {} once it is in play.", dependencies.join(", "))
        }
    } else {
        format!("Value play (score {:.1}).", cand.valuation.score)
    };

    match cand.valuation.synergy.note() {
        Some(note) => format!("{reason} Legend: {note}."),
        None => reason,
    }
}

fn describe_unit(card: &Card, placement: Option<&LanePlacement>, ctx: &PlanContext<'_>) -> String {
    if ctx.game_phase.is_early() && ctx.config.is_cheap(card.energy_cost) {
        if let Some(p) = placement.filter(|p| p.is_good()) {
            let notable: Vec<&str> = card
                .keywords
                .iter()
                .filter(|k| matches!(k, Keyword::Assault | Keyword::Guard | Keyword::Support))
                .map(Keyword::as_str)
                .collect();
            let note = if notable.is_empty() {
                String::new()
            } else {
                format!(" ({})", notable.join(", "))
            };
            return format!("Early game board development: {}{note}", p.reason);
        }
    }

    let might = match card.might {
        Some(m) if m > 0 => format!(" ({m} might)"),
        _ => String::new(),
    };
    let keywords = if card.keywords.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = card.keywords.iter().map(Keyword::as_str).collect();
        format!(" [{}]", names.join(", "))
    };

    match placement {
        Some(p) if p.is_good() => format!("Strong unit{might}{keywords}. {}", p.reason),
        Some(p) if p.score > 0.0 => {
            format!("Strong unit{might}{keywords}. {} (lower priority)", p.reason)
        }
        _ => format!("Strong unit{might}{keywords}, but no optimal battlefield placement available."),
    }
}

/// Sorted card ids of a sequence, duplicates kept
fn card_multiset(sequence: &PlaySequence) -> Vec<&CardId> {
    let mut ids = sequence.card_ids();
    ids.sort();
    ids
}

/// Primary sequence plus the alternatives that differ from it
pub fn plan_strategies(cands: &[Candidate<'_>], ctx: &PlanContext<'_>) -> Vec<PlaySequence> {
    let all: Vec<&Candidate<'_>> = cands.iter().collect();
    let primary = build_sequence("Primary", &all, ctx, true);
    let primary_cards = card_multiset(&primary);

    type Filter = fn(&Candidate<'_>, &AdvisorConfig) -> bool;
    let alternatives: [(&str, Filter); 3] = [
        ("Conservative", |c, config| config.is_cheap(c.card.energy_cost)),
        ("Board Control", |c, _| c.card.is_unit()),
        ("Legend Synergy", |c, config| {
            c.valuation.synergy.total >= config.high_synergy_threshold
        }),
    ];

    let mut sequences = Vec::new();
    for (name, keep) in alternatives {
        let subset: Vec<&Candidate<'_>> = cands.iter().filter(|c| keep(c, ctx.config)).collect();
        if subset.is_empty() {
            continue;
        }
        let sequence = build_sequence(name, &subset, ctx, false);
        if !sequence.is_empty() && card_multiset(&sequence) != primary_cards {
            sequences.push(sequence);
        }
    }

    sequences.insert(0, primary);
    sequences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::{analyze_board, valuation, ValuationContext};
    use crate::core::{CardType, Lane, LaneUnit};
    use crate::parser::AbilityParser;

    struct Fixture {
        cards: Vec<Card>,
        abilities: Vec<Vec<ParsedAbility>>,
        board: BoardAnalysis,
        config: AdvisorConfig,
        player: PlayerState,
    }

    impl Fixture {
        fn new(cards: Vec<Card>, lanes: [Lane; 2], player: PlayerState) -> Self {
            let parser = AbilityParser::new().unwrap();
            let config = AdvisorConfig::default();
            let abilities = cards.iter().map(|c| parser.parse_card(c)).collect();
            let board = analyze_board(&lanes, 0, &config).unwrap();
            Fixture {
                cards,
                abilities,
                board,
                config,
                player,
            }
        }

        fn ctx(&self, turn: u32) -> PlanContext<'_> {
            PlanContext {
                board: &self.board,
                game_phase: self.config.game_phase(turn),
                phase: Phase::Main,
                energy: self.player.energy,
                power: self.player.power,
                legend: LegendStatus::of(&self.player),
                config: &self.config,
            }
        }

        fn candidates(&self, ctx: &PlanContext<'_>) -> Vec<Candidate<'_>> {
            let vctx = ValuationContext::new(&self.board, ctx.game_phase, &self.config);
            let opponent = PlayerState::new(0);
            self.cards
                .iter()
                .zip(&self.abilities)
                .map(|(card, abilities)| {
                    let value = valuation::value_card(card, abilities, &self.player, &opponent, &vctx);
                    Candidate::new(card, abilities, value, ctx)
                })
                .collect()
        }
    }

    fn unit(id: &str, cost: u32, might: i32) -> Card {
        let mut card = Card::new(id, id, CardType::Unit);
        card.energy_cost = cost;
        card.might = Some(might);
        card
    }

    fn spell(id: &str, cost: u32, text: &str) -> Card {
        let mut card = Card::new(id, id, CardType::Spell);
        card.energy_cost = cost;
        card.rules_text = text.to_string();
        card
    }

    fn ids(sequence: &PlaySequence) -> Vec<&str> {
        sequence.steps.iter().map(|s| s.card_id.as_str()).collect()
    }

    #[test]
    fn test_greedy_respects_budget_and_order() {
        let mut guard = unit("B", 2, 3);
        guard.keywords.push(Keyword::Guard);
        let fixture = Fixture::new(
            vec![unit("A", 1, 2), guard, spell("C", 3, "Destroy target unit"), unit("D", 4, 4)],
            [Lane::empty(), Lane::empty()],
            PlayerState::new(3),
        );
        let ctx = fixture.ctx(1);
        let cands = fixture.candidates(&ctx);
        let strategies = plan_strategies(&cands, &ctx);

        let primary = &strategies[0];
        assert!(primary.primary);
        assert_eq!(ids(primary), vec!["A", "B"]);
        assert_eq!(primary.total_energy, 3);
        assert_eq!(primary.steps[0].lane, Some(0));
        assert_eq!(primary.steps[1].lane, Some(1));
        assert_eq!(primary.steps[1].cumulative_cost, 3);
        assert_eq!(primary.risk, RiskLevel::Moderate);
        assert_eq!(primary.unscheduled.len(), 2);
    }

    #[test]
    fn test_gear_waits_for_unit() {
        let mut gear = Card::new("G", "Blade", CardType::Gear);
        gear.energy_cost = 1;
        let fixture = Fixture::new(
            vec![gear, unit("U", 2, 2)],
            [Lane::empty(), Lane::empty()],
            PlayerState::new(3),
        );
        let ctx = fixture.ctx(4);
        let cands = fixture.candidates(&ctx);
        let primary = build_sequence("Primary", &cands.iter().collect::<Vec<_>>(), &ctx, true);

        assert_eq!(ids(&primary), vec!["U", "G"]);
        assert_eq!(primary.steps[1].dependencies, vec![CardId::new("U")]);
        assert_eq!(primary.steps[1].reason, "Gear to equip on U once it is in play.");
    }

    #[test]
    fn test_gear_without_unit_is_blocked() {
        let mut gear = Card::new("G", "Blade", CardType::Gear);
        gear.energy_cost = 1;
        let fixture = Fixture::new(vec![gear], [Lane::empty(), Lane::empty()], PlayerState::new(3));
        let ctx = fixture.ctx(4);
        let cands = fixture.candidates(&ctx);
        let primary = build_sequence("Primary", &cands.iter().collect::<Vec<_>>(), &ctx, true);

        assert!(primary.is_empty());
        assert_eq!(
            primary.unscheduled[0].reason,
            "No friendly unit in play or in hand to target"
        );
        assert_eq!(primary.reasoning, "No card could be scheduled within 3 energy.");
    }

    #[test]
    fn test_mutual_references_block_both() {
        let mut a = unit("Alpha", 1, 1);
        a.rules_text = "If you control Bravo, draw a card".to_string();
        let mut b = unit("Bravo", 1, 1);
        b.rules_text = "If you control Alpha, draw a card".to_string();
        let fixture = Fixture::new(vec![a, b], [Lane::empty(), Lane::empty()], PlayerState::new(5));
        let ctx = fixture.ctx(4);
        let cands = fixture.candidates(&ctx);
        let primary = build_sequence("Primary", &cands.iter().collect::<Vec<_>>(), &ctx, true);

        assert!(primary.is_empty());
        assert_eq!(primary.unscheduled[0].reason, "Circular dependency with Bravo");
    }

    #[test]
    fn test_removal_outranks_weak_unit_under_threat() {
        let fixture = Fixture::new(
            vec![unit("W", 2, 1), spell("K", 2, "Destroy target unit")],
            [Lane::with_units(None, Some(LaneUnit::new("big", 6))), Lane::empty()],
            PlayerState::new(2),
        );
        assert_eq!(fixture.board.threat, ThreatLevel::High);
        let ctx = fixture.ctx(2);
        let cands = fixture.candidates(&ctx);
        assert!(cands[1].priority > cands[0].priority);

        let primary = build_sequence("Primary", &cands.iter().collect::<Vec<_>>(), &ctx, true);
        assert_eq!(ids(&primary), vec!["K"]);
        assert_eq!(
            primary.steps[0].reason,
            "Removal spell to answer opponent's High threat level on board."
        );
    }

    #[test]
    fn test_alternatives_differ_from_primary() {
        let fixture = Fixture::new(
            vec![unit("Big", 4, 5), unit("Small", 1, 1), spell("Zap", 1, "Deal 3 damage to target unit")],
            [Lane::empty(), Lane::with_units(None, Some(LaneUnit::new("x", 2)))],
            PlayerState::new(5),
        );
        let ctx = fixture.ctx(5);
        let cands = fixture.candidates(&ctx);
        let strategies = plan_strategies(&cands, &ctx);

        let primary_ids = card_multiset(&strategies[0]);
        for alt in &strategies[1..] {
            assert!(!alt.primary);
            assert_ne!(card_multiset(alt), primary_ids);
            assert!(alt.total_energy <= ctx.energy);
        }
    }

    #[test]
    fn test_duplicate_copies_count_as_different_plays() {
        let pair = Fixture::new(
            vec![unit("A", 1, 2), unit("A", 1, 2)],
            [Lane::empty(), Lane::empty()],
            PlayerState::new(2),
        );
        let ctx = pair.ctx(2);
        let cands = pair.candidates(&ctx);
        let both = build_sequence("Board Control", &cands.iter().collect::<Vec<_>>(), &ctx, false);
        assert_eq!(ids(&both), vec!["A", "A"]);

        let single = Fixture::new(
            vec![unit("A", 1, 2)],
            [Lane::empty(), Lane::empty()],
            PlayerState::new(2),
        );
        let ctx = single.ctx(2);
        let cands = single.candidates(&ctx);
        let one = build_sequence("Primary", &cands.iter().collect::<Vec<_>>(), &ctx, true);
        assert_eq!(ids(&one), vec!["A"]);

        assert_ne!(card_multiset(&both), card_multiset(&one));
    }
}
