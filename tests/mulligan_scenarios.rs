//! Mulligan evaluation scenarios and hand-level limits

use proptest::prelude::*;
use riftbound_advisor::advisor::evaluate_mulligan;
use riftbound_advisor::core::{Card, CardType, GameState, Keyword, Lane, Legend, Phase, PlayerState};
use riftbound_advisor::{Advisor, AdvisorConfig, AdvisorError, AdvisorLogger};
use riftbound_advisor::logger::VerbosityLevel;

fn card(id: &str, card_type: CardType, cost: u32) -> Card {
    let mut card = Card::new(id, id, card_type);
    card.energy_cost = cost;
    if card_type == CardType::Unit {
        card.might = Some(cost as i32 + 1);
    }
    card
}

fn opening(hand: Vec<Card>) -> GameState {
    GameState::new(
        1,
        Phase::Mulligan,
        PlayerState::new(0).with_hand(hand),
        PlayerState::new(0),
        vec![Lane::empty(), Lane::empty()],
    )
}

#[test]
fn test_all_expensive_hand_mulligans_two() {
    let hand = vec![
        card("a", CardType::Unit, 4),
        card("b", CardType::Spell, 5),
        card("c", CardType::Gear, 4),
        card("d", CardType::Unit, 6),
    ];
    let advice = evaluate_mulligan(&hand, None, true, &AdvisorConfig::default()).unwrap();

    assert_eq!(advice.mulligan_count, 2);
    assert_eq!(advice.mulliganed().count(), 2);
    assert!(advice.kept().any(|d| d.forced));
    assert!(advice.summary.starts_with("Mulligan 2 cards (maximum allowed)"));
}

#[test]
fn test_wrong_hand_size_rejected() {
    let advisor = Advisor::new(AdvisorConfig::default()).unwrap();
    let state = opening(vec![card("a", CardType::Unit, 1); 3]);
    let err = advisor.mulligan(&state).unwrap_err();
    assert!(matches!(
        err,
        AdvisorError::InvalidHandSize {
            expected: 4,
            actual: 3
        }
    ));
}

#[test]
fn test_mulligan_reports_each_decision() {
    let mut logger = AdvisorLogger::with_verbosity(VerbosityLevel::Silent);
    logger.enable_capture();
    let advisor = Advisor::with_observer(AdvisorConfig::default(), logger).unwrap();

    let mut assault = card("a", CardType::Unit, 1);
    assault.keywords.push(Keyword::Assault);
    let state = opening(vec![
        assault,
        card("b", CardType::Unit, 2),
        card("c", CardType::Spell, 1),
        card("d", CardType::Unit, 3),
    ]);
    let advice = advisor.mulligan(&state).unwrap();
    assert_eq!(advice.mulligan_count, 0);

    let logs = advisor.observer().logs();
    let decisions = logs
        .iter()
        .filter(|e| e.category.as_deref() == Some("mulligan_decision"))
        .count();
    assert_eq!(decisions, 4);
}

#[test]
fn test_custom_mulligan_limit() {
    let config = AdvisorConfig::from_json(r#"{"max_mulligans": 1}"#).unwrap();
    let hand = vec![
        card("a", CardType::Unit, 5),
        card("b", CardType::Spell, 5),
        card("c", CardType::Gear, 4),
        card("d", CardType::Unit, 6),
    ];
    let advice = evaluate_mulligan(&hand, None, true, &config).unwrap();
    assert_eq!(advice.mulligan_count, 1);
}

#[test]
fn test_legend_name_keeps_combo_piece() {
    let mut combo = card("combo", CardType::Spell, 4);
    combo.rules_text = "If you control Jinx, deal 5 damage to target unit.".to_string();
    let hand = vec![
        card("a", CardType::Unit, 1),
        card("b", CardType::Unit, 2),
        combo,
        card("d", CardType::Spell, 1),
    ];
    let legend = Legend::new(Card::new("L", "Jinx", CardType::Legend), false, &[]);
    let advice = evaluate_mulligan(&hand, Some(&legend), true, &AdvisorConfig::default()).unwrap();
    assert!(advice.decisions[2].keep);
}

fn card_type() -> impl Strategy<Value = CardType> {
    prop_oneof![
        Just(CardType::Unit),
        Just(CardType::Spell),
        Just(CardType::Gear),
    ]
}

proptest! {
    #[test]
    fn prop_mulligan_limits_hold(
        specs in prop::collection::vec((card_type(), 0u32..8), 4),
        going_first in any::<bool>(),
    ) {
        let hand: Vec<Card> = specs
            .into_iter()
            .enumerate()
            .map(|(i, (t, cost))| card(&format!("c{i}"), t, cost))
            .collect();
        let advice = evaluate_mulligan(&hand, None, going_first, &AdvisorConfig::default()).unwrap();

        prop_assert_eq!(advice.decisions.len(), 4);
        prop_assert!(advice.mulliganed().count() <= 2);
        prop_assert!(advice.kept().count() >= 1);
        prop_assert_eq!(advice.mulligan_count, advice.mulliganed().count());
    }
}
