//! Advice entry points
//!
//! `Advisor` owns the config and the compiled parser and reports what it
//! does through an injected `AdvisorObserver`. Every call is a pure
//! function of the game state it is given; nothing is cached between calls.

pub mod advice;
pub mod battlefield;
pub mod legend_synergy;
pub mod mulligan;
pub mod placement;
pub mod planner;
pub mod valuation;

pub use advice::{
    DebugBundle, HandComposition, LanePlacement, MulliganAdvice, MulliganDecision,
    PlayAdvice, PlayRecommendation, PlaySequence, PlaySequenceStep, RiskLevel, UnscheduledCard,
};
pub use battlefield::{analyze_board, BoardAnalysis, LaneAnalysis, LaneState, ThreatLevel};
pub use legend_synergy::{LegendSynergy, SynergyKind, SynergyReport};
pub use mulligan::evaluate_mulligan;
pub use placement::choose_lane;
pub use planner::{plan_strategies, Candidate, LegendStatus, PlanContext};
pub use valuation::{value_card, CardValuation, ValuationContext};

use crate::config::AdvisorConfig;
use crate::core::{
    Card, CardType, Domain, GamePhase, GameState, Keyword, Phase, PlayerState,
};
use crate::loader::ResolvedGame;
use crate::logger::{AdviceKind, AdvisorEvent, AdvisorObserver, NullObserver};
use crate::parser::{AbilityIndex, AbilityParser};
use crate::Result;
use std::collections::BTreeMap;

pub struct Advisor<O: AdvisorObserver = NullObserver> {
    config: AdvisorConfig,
    parser: AbilityParser,
    observer: O,
}

impl Advisor<NullObserver> {
    pub fn new(config: AdvisorConfig) -> Result<Self> {
        Self::with_observer(config, NullObserver)
    }
}

impl<O: AdvisorObserver> Advisor<O> {
    pub fn with_observer(config: AdvisorConfig, observer: O) -> Result<Self> {
        Ok(Advisor {
            config,
            parser: AbilityParser::new()?,
            observer,
        })
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub fn parser(&self) -> &AbilityParser {
        &self.parser
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    fn emit(&self, event: AdvisorEvent) {
        self.observer.on_event(&event);
    }

    /// Verbose events are only built when the feature is on
    fn emit_verbose(&self, event: impl FnOnce() -> AdvisorEvent) {
        if cfg!(feature = "verbose-logging") {
            self.emit(event());
        }
    }

    /// Parse every card in both hands once
    pub fn index(&self, state: &GameState) -> AbilityIndex {
        AbilityIndex::build(
            &self.parser,
            state.me.hand.iter().chain(state.opponent.hand.iter()),
        )
    }

    pub fn mulligan(&self, state: &GameState) -> Result<MulliganAdvice> {
        let advice = evaluate_mulligan(
            &state.me.hand,
            state.me.legend.as_ref(),
            state.going_first,
            &self.config,
        )?;

        for decision in &advice.decisions {
            self.emit(AdvisorEvent::MulliganDecision {
                card_id: decision.card_id.clone(),
                keep: decision.keep,
                reason: decision.reason.clone(),
            });
        }
        self.emit(AdvisorEvent::AdviceIssued {
            kind: AdviceKind::Mulligan,
            summary: advice.summary.clone(),
        });

        Ok(advice)
    }

    /// Mulligan advice for a loaded snapshot
    pub fn mulligan_resolved(&self, game: &ResolvedGame) -> Result<MulliganAdvice> {
        self.report_missing(game);
        self.mulligan(&game.state)
    }

    /// Play advice for a loaded snapshot; unresolved ids are listed in `missing`
    pub fn play_resolved(&self, game: &ResolvedGame) -> Result<PlayAdvice> {
        self.report_missing(game);
        let mut advice = self.play(&game.state, &game.index)?;
        advice.missing = game.missing.clone();
        Ok(advice)
    }

    fn report_missing(&self, game: &ResolvedGame) {
        for card_id in &game.missing {
            self.emit(AdvisorEvent::CardMissing {
                card_id: card_id.clone(),
            });
        }
    }

    /// Rank this turn's plays and build the play sequences
    ///
    /// Only structurally invalid input is an error. No hand, no playable
    /// card or a mulligan phase all produce an empty advice with a summary.
    pub fn play(&self, state: &GameState, index: &AbilityIndex) -> Result<PlayAdvice> {
        let config = &self.config;
        let board = analyze_board(&state.lanes, state.opponent.score, config)?;
        for lane in &board.lanes {
            self.emit_verbose(|| AdvisorEvent::LaneAnalyzed {
                lane: lane.index,
                state: lane.state,
                my_might: lane.my_might,
                op_might: lane.op_might,
                advantage: lane.advantage,
            });
        }

        let me = &state.me;
        if me.hand.is_empty() {
            return Ok(self.issue(PlayAdvice::empty("No cards in hand to play.")));
        }
        if state.phase == Phase::Mulligan {
            return Ok(self.issue(PlayAdvice::empty(
                "No playable cards advice during mulligan phase. Use mulligan advice instead.",
            )));
        }

        let game_phase = config.game_phase(state.turn);
        let playable: Vec<&Card> = me
            .hand
            .iter()
            .filter(|card| {
                let (playable, reason) = check_playable(card, me);
                self.emit_verbose(|| AdvisorEvent::CardPlayability {
                    card_id: card.id.clone(),
                    playable,
                    reason,
                });
                playable
            })
            .collect();

        if playable.is_empty() {
            let mut advice = PlayAdvice::empty(format!(
                "No playable cards with current energy ({}). Consider passing or planning for future turns.",
                me.energy
            ));
            advice.debug = Some(DebugBundle {
                card_scores: BTreeMap::new(),
                threat: board.threat,
                board: board.clone(),
                game_phase,
            });
            return Ok(self.issue(advice));
        }

        let plan_ctx = PlanContext {
            board: &board,
            game_phase,
            phase: state.phase,
            energy: me.energy,
            power: me.power,
            legend: LegendStatus::of(me),
            config,
        };
        let value_ctx = ValuationContext::new(&board, game_phase, config);

        let candidates: Vec<Candidate<'_>> = playable
            .iter()
            .map(|card| {
                let abilities = index.abilities_for(card);
                let valuation = value_card(card, abilities, me, &state.opponent, &value_ctx);
                self.report_valuation(card, &valuation, me);
                Candidate::new(card, abilities, valuation, &plan_ctx)
            })
            .collect();

        let strategies = plan_strategies(&candidates, &plan_ctx);
        if let Some(primary) = strategies.first() {
            for step in &primary.steps {
                self.emit(AdvisorEvent::CardScheduled {
                    card_id: step.card_id.clone(),
                    position: step.position,
                    priority: candidates
                        .iter()
                        .find(|c| c.id() == &step.card_id)
                        .map_or(0.0, |c| c.priority),
                    cumulative_cost: step.cumulative_cost,
                });
            }
            for card in &primary.unscheduled {
                self.emit(AdvisorEvent::CardUnscheduled {
                    card_id: card.card_id.clone(),
                    reason: card.reason.clone(),
                });
            }
        }

        let recommendations = rank_recommendations(&candidates, strategies.first(), &board, game_phase);
        let spent = strategies.first().map_or(0, |p| p.total_energy);
        let summary = play_summary(state, &board, game_phase, &recommendations, playable.len());

        let advice = PlayAdvice {
            efficiency_note: efficiency_note(spent, me.energy),
            debug: Some(DebugBundle {
                card_scores: candidates
                    .iter()
                    .map(|c| (c.id().clone(), c.valuation.score))
                    .collect(),
                threat: board.threat,
                board: board.clone(),
                game_phase,
            }),
            recommendations,
            strategies,
            summary,
            missing: Vec::new(),
        };
        Ok(self.issue(advice))
    }

    fn report_valuation(&self, card: &Card, valuation: &CardValuation, me: &PlayerState) {
        if let Some(legend) = &me.legend {
            for synergy in &valuation.synergy.synergies {
                self.emit_verbose(|| AdvisorEvent::LegendInteraction {
                    card_id: card.id.clone(),
                    legend_id: legend.card.id.clone(),
                    kind: synergy.kind,
                    modifier: synergy.modifier,
                });
            }
        }
        self.emit_verbose(|| AdvisorEvent::CardValued {
            card_id: card.id.clone(),
            score: valuation.score,
        });
    }

    fn issue(&self, advice: PlayAdvice) -> PlayAdvice {
        self.emit(AdvisorEvent::AdviceIssued {
            kind: AdviceKind::Play,
            summary: advice.summary.clone(),
        });
        advice
    }

    /// One paragraph of plain-text advice for the current phase
    pub fn simple_advice(&self, state: &GameState) -> String {
        let me = &state.me;
        if me.hand.is_empty() {
            return "Your hand is empty, so there is nothing to play. Focus on your next draw."
                .to_string();
        }
        if state.phase == Phase::Mulligan {
            return simple_mulligan_advice(&me.hand, &self.config);
        }

        let playable: Vec<&Card> = me
            .hand
            .iter()
            .filter(|c| check_playable(c, me).0)
            .collect();
        if playable.is_empty() {
            return format!(
                "You have {} energy available but no cards you can play right now. \
                 Consider holding up interaction or planning for a stronger future turn.",
                me.energy
            );
        }

        let early = self.config.game_phase(state.turn) == GamePhase::Early;
        let of_type = |t: CardType| {
            playable
                .iter()
                .copied()
                .filter(|c| c.card_type == t)
                .collect::<Vec<&Card>>()
        };
        let units = of_type(CardType::Unit);
        let spells = of_type(CardType::Spell);
        let gear = of_type(CardType::Gear);

        let mut parts: Vec<String> = Vec::new();

        if early && !units.is_empty() {
            let cheap_units = cheap(&units, &self.config);
            if cheap_units.is_empty() {
                parts.push(format!(
                    "You can play these units this turn: {}. They are a bit expensive for early turns; \
                     make sure you are not over-committing if the opponent can answer them easily.",
                    describe_all(&units)
                ));
            } else {
                parts.push(format!(
                    "Since it is early (turn {}), prioritize developing the board. Consider playing: {}.",
                    state.turn,
                    describe_all(&cheap_units)
                ));
            }
        } else if let Some(best) = units.first() {
            parts.push(format!(
                "You have playable units; a solid option is {} to maintain or build board presence.",
                best.describe()
            ));
        }

        if !spells.is_empty() {
            let cheap_spells = cheap(&spells, &self.config);
            if cheap_spells.is_empty() {
                parts.push(format!(
                    "Higher-cost spells available: {}. Consider whether you need immediate impact now \
                     or can wait for a better moment.",
                    describe_all(&spells)
                ));
            } else {
                parts.push(format!(
                    "You also have cheap spells: {}. Use them to protect your units, answer threats, \
                     or push favorable trades.",
                    describe_all(&cheap_spells)
                ));
            }
        }

        if !gear.is_empty() && !units.is_empty() {
            parts.push(format!(
                "You can also play gear: {}. Equipping strong units can snowball the board, but only \
                 if you already have good targets on the field.",
                describe_all(&gear)
            ));
        }

        if early {
            let greedy: Vec<&Card> = playable.iter().copied().filter(|c| c.energy_cost >= 4).collect();
            if !greedy.is_empty() {
                parts.push(format!(
                    "Be cautious about playing expensive cards this early ({}); they may leave you \
                     without flexible responses if the opponent swings the tempo.",
                    describe_all(&greedy)
                ));
            }
        }

        if parts.is_empty() {
            parts.push(
                "Your hand and energy suggest a flexible turn. Choose plays that either improve your \
                 board or efficiently answer the opponent's threats."
                    .to_string(),
            );
        }

        parts.join(" ")
    }
}

/// Energy and power check for one card
///
/// Returns whether the card can be paid for and a reason either way.
pub fn check_playable(card: &Card, player: &PlayerState) -> (bool, String) {
    if card.energy_cost > player.energy {
        return (
            false,
            format!(
                "Insufficient energy: need {}, have {}",
                card.energy_cost, player.energy
            ),
        );
    }

    let cost = &card.power_cost;
    if cost.total() > player.power.total() {
        return (
            false,
            format!(
                "Insufficient power: need {}, have {}",
                cost.total(),
                player.power.total()
            ),
        );
    }

    for domain in Domain::COLORED {
        let need = cost.for_domain(domain);
        let have = player.power.available(domain);
        if need > have {
            return (
                false,
                format!("Insufficient {domain} power: need {need}, have {have}"),
            );
        }
    }

    (true, "Card is playable".to_string())
}

fn cheap<'a>(cards: &[&'a Card], config: &AdvisorConfig) -> Vec<&'a Card> {
    cards
        .iter()
        .copied()
        .filter(|c| config.is_cheap(c.energy_cost))
        .collect()
}

fn describe_all(cards: &[&Card]) -> String {
    cards
        .iter()
        .map(|c| c.describe())
        .collect::<Vec<_>>()
        .join(", ")
}

fn simple_mulligan_advice(hand: &[Card], config: &AdvisorConfig) -> String {
    let units: Vec<&Card> = hand.iter().filter(|c| c.is_unit()).collect();
    let cheap_units: Vec<&Card> = units
        .iter()
        .copied()
        .filter(|c| config.is_cheap(c.energy_cost))
        .collect();
    let expensive: Vec<&Card> = hand.iter().filter(|c| c.energy_cost >= 4).collect();

    let mut parts = Vec::new();
    if units.is_empty() {
        parts.push(
            "You have no units in your opening hand. Consider mulliganing 1-2 non-essential \
             spells/gears to look for early units."
                .to_string(),
        );
    } else if cheap_units.is_empty() {
        parts.push(
            "Your units are all 3+ cost. You may want to mulligan at least one expensive card to \
             smooth your curve."
                .to_string(),
        );
    } else {
        parts.push(format!(
            "You have early units: {}. These give you a solid early board; it is usually good to keep them.",
            describe_all(&cheap_units)
        ));
    }

    if expensive.len() >= 2 {
        parts.push(format!(
            "You are holding several high-cost cards ({}). On turn 1, these are likely dead cards; \
             consider sending some back.",
            describe_all(&expensive)
        ));
    }

    parts.join(" ")
}

fn rank_recommendations(
    candidates: &[Candidate<'_>],
    primary: Option<&PlaySequence>,
    board: &BoardAnalysis,
    game_phase: GamePhase,
) -> Vec<PlayRecommendation> {
    let mut ranked: Vec<&Candidate<'_>> = candidates.iter().collect();
    ranked.sort_by(|a, b| b.priority.total_cmp(&a.priority));

    // Duplicate copies share an id, so each step is claimed once
    let steps = primary.map_or(&[][..], |p| p.steps.as_slice());
    let unscheduled = primary.map_or(&[][..], |p| p.unscheduled.as_slice());
    let mut claimed_steps = vec![false; steps.len()];
    let mut claimed_unscheduled = vec![false; unscheduled.len()];

    ranked
        .into_iter()
        .enumerate()
        .map(|(rank, cand)| {
            let card = cand.card;
            let step = steps
                .iter()
                .enumerate()
                .find(|(i, s)| !claimed_steps[*i] && &s.card_id == cand.id());

            let (recommended, reason, placement) = match step {
                Some((i, step)) => {
                    claimed_steps[i] = true;
                    (true, step.reason.clone(), step.placement.clone())
                }
                None => {
                    let held = unscheduled
                        .iter()
                        .enumerate()
                        .find(|(i, u)| !claimed_unscheduled[*i] && &u.card_id == cand.id());
                    let why = held.map(|(i, u)| {
                        claimed_unscheduled[i] = true;
                        u.reason.as_str()
                    });
                    let placement = if card.is_unit() {
                        choose_lane(card, &board.lanes, game_phase)
                    } else {
                        None
                    };
                    (false, hold_reason(cand, why, game_phase), placement)
                }
            };

            PlayRecommendation {
                card_id: card.id.clone(),
                name: card.name.clone(),
                card_type: card.card_type,
                energy_cost: card.energy_cost,
                rank: rank + 1,
                priority: cand.priority,
                recommended,
                reason,
                placement,
                legend_note: cand.valuation.synergy.note(),
                value_score: cand.valuation.score,
            }
        })
        .collect()
}

fn hold_reason(cand: &Candidate<'_>, unscheduled: Option<&str>, game_phase: GamePhase) -> String {
    let card = cand.card;
    let score = cand.valuation.score;

    let base = if card.energy_cost >= 4 && game_phase.is_early() {
        "Expensive for early game; may be better to save for later.".to_string()
    } else if card.is_spell() && card.has_keyword(&Keyword::Reaction) {
        "Reaction spell - hold for opponent's turn or critical moment.".to_string()
    } else if card.is_spell() && card.tags.is_empty() && cand.abilities.is_empty() {
        "Utility spell; play when needed for specific situation.".to_string()
    } else if card.is_unit() && score < 2.0 {
        format!("Lower value unit (value score: {score:.1}). Consider better options first.")
    } else {
        "Playable but lower priority. Consider if it fits your game plan.".to_string()
    };

    match unscheduled {
        Some(why) => format!("{base} ({why})"),
        None => base,
    }
}

fn play_summary(
    state: &GameState,
    board: &BoardAnalysis,
    game_phase: GamePhase,
    recommendations: &[PlayRecommendation],
    playable: usize,
) -> String {
    let mut parts = Vec::new();

    let recommended = recommendations.iter().filter(|r| r.recommended).count();
    if recommended > 0 {
        parts.push(format!(
            "Found {recommended} recommended play(s) out of {playable} playable cards."
        ));
    } else {
        parts.push(format!(
            "Found {playable} playable cards, but none are strongly recommended this turn."
        ));
    }

    let legend_state = |exhausted: bool| if exhausted { "exhausted" } else { "ready" };
    if let Some(legend) = &state.me.legend {
        parts.push(format!(
            "Your legend ({}) is {}.",
            legend.name(),
            legend_state(legend.exhausted)
        ));
    }
    if let Some(legend) = &state.opponent.legend {
        parts.push(format!(
            "Opponent's legend ({}) is {}.",
            legend.name(),
            legend_state(legend.exhausted)
        ));
        if !legend.triggered.is_empty() {
            parts.push("Watch for opponent legend triggered abilities.".to_string());
        }
    }

    let board_text = board.description();
    if !board_text.is_empty() {
        parts.push(format!("Board state: {board_text}."));
    }

    parts.push(
        match game_phase {
            GamePhase::Early => "Early game: prioritize board development in empty battlefields.",
            GamePhase::Mid => "Mid game: balance tempo and value, contest key battlefields.",
            GamePhase::Late => "Late game: focus on high-impact plays and securing advantages.",
        }
        .to_string(),
    );

    parts.join(" ")
}

fn efficiency_note(spent: u32, energy: u32) -> Option<String> {
    if energy == 0 {
        return None;
    }
    let ratio = f64::from(spent) / f64::from(energy);
    let base = format!(
        "Recommended plays use {spent}/{energy} energy ({:.0}%)",
        ratio * 100.0
    );
    Some(if ratio < 0.5 {
        format!("{base}. Consider additional plays or holding cards for better opportunities.")
    } else if ratio >= 0.9 {
        format!("{base} - efficient use of resources.")
    } else {
        format!("{base}.")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Lane, PowerCost};
    use crate::logger::{AdvisorLogger, VerbosityLevel};

    fn unit(id: &str, cost: u32, might: i32) -> Card {
        let mut card = Card::new(id, id, CardType::Unit);
        card.energy_cost = cost;
        card.might = Some(might);
        card
    }

    fn state(hand: Vec<Card>, energy: u32, turn: u32, phase: Phase) -> GameState {
        GameState::new(
            turn,
            phase,
            PlayerState::new(energy).with_hand(hand),
            PlayerState::new(0),
            vec![Lane::empty(), Lane::empty()],
        )
    }

    #[test]
    fn test_check_playable() {
        let mut card = unit("A", 2, 2);
        let mut player = PlayerState::new(1);
        assert!(!check_playable(&card, &player).0);

        player.energy = 2;
        assert_eq!(check_playable(&card, &player), (true, "Card is playable".to_string()));

        card.power_cost.add_domain(Domain::Fury, 1);
        player.power.add(Domain::Calm, 1);
        let (ok, reason) = check_playable(&card, &player);
        assert!(!ok);
        assert_eq!(reason, "Insufficient fury power: need 1, have 0");

        card.power_cost = PowerCost::generic(2);
        assert_eq!(
            check_playable(&card, &player).1,
            "Insufficient power: need 2, have 1"
        );
    }

    #[test]
    fn test_play_advice_for_empty_hand_and_mulligan_phase() {
        let advisor = Advisor::new(AdvisorConfig::default()).unwrap();
        let empty = state(Vec::new(), 3, 1, Phase::Main);
        let advice = advisor.play(&empty, &advisor.index(&empty)).unwrap();
        assert!(advice.recommendations.is_empty());
        assert_eq!(advice.summary, "No cards in hand to play.");

        let mulligan = state(vec![unit("A", 1, 1)], 3, 1, Phase::Mulligan);
        let advice = advisor.play(&mulligan, &advisor.index(&mulligan)).unwrap();
        assert!(advice.strategies.is_empty());
    }

    #[test]
    fn test_play_advice_nothing_affordable() {
        let advisor = Advisor::new(AdvisorConfig::default()).unwrap();
        let game = state(vec![unit("A", 5, 5)], 2, 4, Phase::Main);
        let advice = advisor.play(&game, &advisor.index(&game)).unwrap();
        assert!(advice.recommendations.is_empty());
        assert!(advice.summary.starts_with("No playable cards with current energy (2)"));
        assert!(advice.debug.is_some());
    }

    #[test]
    fn test_play_emits_events_to_observer() {
        let mut logger = AdvisorLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();
        let advisor = Advisor::with_observer(AdvisorConfig::default(), logger).unwrap();

        let game = state(vec![unit("A", 1, 2), unit("B", 2, 3)], 3, 1, Phase::Main);
        let advice = advisor.play(&game, &advisor.index(&game)).unwrap();
        assert_eq!(advice.recommended_ids().len(), 2);

        let logs = advisor.observer().logs();
        let scheduled = logs
            .iter()
            .filter(|e| e.category.as_deref() == Some("card_scheduled"))
            .count();
        assert_eq!(scheduled, 2);
        assert!(logs
            .iter()
            .any(|e| e.category.as_deref() == Some("advice_issued")));
    }

    #[test]
    fn test_efficiency_note() {
        assert_eq!(efficiency_note(0, 0), None);
        assert_eq!(
            efficiency_note(3, 3).as_deref(),
            Some("Recommended plays use 3/3 energy (100%) - efficient use of resources.")
        );
        assert_eq!(
            efficiency_note(1, 4).as_deref(),
            Some("Recommended plays use 1/4 energy (25%). Consider additional plays or holding cards for better opportunities.")
        );
        assert_eq!(
            efficiency_note(2, 3).as_deref(),
            Some("Recommended plays use 2/3 energy (67%).")
        );
    }

    #[test]
    fn test_simple_advice() {
        let advisor = Advisor::new(AdvisorConfig::default()).unwrap();

        let empty = state(Vec::new(), 3, 1, Phase::Main);
        assert!(advisor.simple_advice(&empty).starts_with("Your hand is empty"));

        let early = state(vec![unit("Scout", 1, 1)], 3, 1, Phase::Main);
        assert_eq!(
            advisor.simple_advice(&early),
            "Since it is early (turn 1), prioritize developing the board. Consider playing: Scout (unit, cost 1)."
        );

        let opening = state(vec![unit("Giant", 5, 6), unit("Titan", 6, 7)], 0, 1, Phase::Mulligan);
        let text = advisor.simple_advice(&opening);
        assert!(text.starts_with("Your units are all 3+ cost."));
        assert!(text.contains("several high-cost cards"));
    }
}
