//! Catalog + snapshot loading through to advice

use riftbound_advisor::core::CardId;
use riftbound_advisor::loader::{CardCatalog, CardDatabase, GameSnapshot, ResolvedGame};
use riftbound_advisor::{Advisor, AdvisorConfig, AdvisorLogger};
use riftbound_advisor::logger::VerbosityLevel;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(advisor: &Advisor<impl riftbound_advisor::AdvisorObserver>, snapshot: &str) -> ResolvedGame {
    let db = CardDatabase::load_from_file(&fixture("catalog.json")).unwrap();
    GameSnapshot::from_file(&fixture(snapshot))
        .unwrap()
        .resolve(&db, advisor.parser())
        .unwrap()
}

#[test]
fn test_catalog_fixture_loads() {
    let db = CardDatabase::load_from_file(&fixture("catalog.json")).unwrap();
    assert_eq!(db.len(), 7);
    let colossus = db.resolve_card("OGN-044").unwrap().unwrap();
    assert_eq!(colossus.power_cost.body, 1);
    assert_eq!(colossus.might, Some(6));
}

#[test]
fn test_play_snapshot_end_to_end() {
    let mut logger = AdvisorLogger::with_verbosity(VerbosityLevel::Silent);
    logger.enable_capture();
    let advisor = Advisor::with_observer(AdvisorConfig::default(), logger).unwrap();
    let game = load(&advisor, "play_snapshot.json");

    assert_eq!(game.missing, vec![CardId::new("UNKNOWN-1")]);
    assert_eq!(game.state.me.hand.len(), 4);
    assert_eq!(game.state.lanes[0].op_might(), 6);
    assert_eq!(game.state.lanes[1].my_might(), 2);

    let advice = advisor.play_resolved(&game).unwrap();
    assert_eq!(advice.missing, game.missing);

    // Iron Colossus costs 5 with 4 energy; everything else fits together
    assert_eq!(advice.recommendations.len(), 3);
    let primary = advice.primary().unwrap();
    assert_eq!(primary.total_energy, 4);
    assert_eq!(advice.recommended_ids().len(), 3);

    let recruit = advice
        .recommendations
        .iter()
        .find(|r| r.card_id.as_str() == "OGN-007")
        .unwrap();
    let note = recruit.legend_note.as_deref().unwrap();
    assert!(note.contains("Shares fury domain with Darius, Hand of Noxus"));

    assert!(advice.summary.contains("Your legend (Darius, Hand of Noxus) is ready."));
    assert!(advice.summary.contains("Opponent's legend (Ahri, Nine-Tailed Fox) is exhausted."));

    let logs = advisor.observer().logs();
    assert!(logs
        .iter()
        .any(|e| e.category.as_deref() == Some("card_missing")));
}

#[test]
fn test_advice_is_reproducible() {
    let advisor = Advisor::new(AdvisorConfig::default()).unwrap();
    let game = load(&advisor, "play_snapshot.json");

    let first = serde_json::to_string_pretty(&advisor.play_resolved(&game).unwrap()).unwrap();
    let second = serde_json::to_string_pretty(&advisor.play_resolved(&game).unwrap()).unwrap();
    similar_asserts::assert_eq!(first, second);
}

#[test]
fn test_mulligan_snapshot() {
    let advisor = Advisor::new(AdvisorConfig::default()).unwrap();
    let game = load(&advisor, "mulligan_snapshot.json");
    assert!(!game.state.going_first);

    let advice = advisor.mulligan_resolved(&game).unwrap();
    assert_eq!(advice.decisions.len(), 4);
    assert!(advice.mulligan_count <= 2);
    assert!(advice.decisions[0].keep);

    let play = advisor.play_resolved(&game).unwrap();
    assert!(play.recommendations.is_empty());
}
