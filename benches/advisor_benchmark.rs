//! Benchmarks for rules-text parsing and turn planning

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use riftbound_advisor::core::{Card, CardType, GameState, Keyword, Lane, LaneUnit, Phase, PlayerState};
use riftbound_advisor::{Advisor, AbilityParser, AdvisorConfig};

const RULES_TEXTS: &[&str] = &[
    "When you play this, draw 2 cards.",
    "Exhaust: Deal 1 damage to target unit. Any time",
    "Units you control get +1 might.",
    "Destroy target unit with 3 or less might.",
    "When this dies, return it to its owner's hand.",
    "Choose one - Deal 2 damage to a unit; or draw a card.",
    "Ready your legend. Give target unit +2 might this turn.",
    "Counter target spell. Instant",
];

fn sample_hand(size: usize) -> Vec<Card> {
    (0..size)
        .map(|i| {
            let id = format!("card-{i}");
            let card_type = match i % 3 {
                0 => CardType::Unit,
                1 => CardType::Spell,
                _ => CardType::Gear,
            };
            let mut card = Card::new(id.as_str(), id.as_str(), card_type);
            card.energy_cost = (i % 5) as u32 + 1;
            card.rules_text = RULES_TEXTS[i % RULES_TEXTS.len()].to_string();
            if card_type == CardType::Unit {
                card.might = Some((i % 4) as i32 + 1);
                if i % 2 == 0 {
                    card.keywords.push(Keyword::Guard);
                }
            }
            card
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let parser = AbilityParser::new().unwrap();
    let mut group = c.benchmark_group("parse_rules_text");

    let all = RULES_TEXTS.join("\n");
    group.throughput(Throughput::Bytes(all.len() as u64));
    group.bench_function("all_samples", |b| b.iter(|| parser.parse(black_box(&all))));

    for (i, text) in RULES_TEXTS.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("single", i), text, |b, text| {
            b.iter(|| parser.parse(black_box(text)))
        });
    }
    group.finish();
}

fn bench_play(c: &mut Criterion) {
    let advisor = Advisor::new(AdvisorConfig::default()).unwrap();
    let mut group = c.benchmark_group("play_advice");

    for size in [4usize, 8, 12] {
        let state = GameState::new(
            5,
            Phase::Main,
            PlayerState::new(7).with_hand(sample_hand(size)),
            PlayerState::new(0),
            vec![
                Lane::with_units(None, Some(LaneUnit::new("op", 4))),
                Lane::empty(),
            ],
        );
        let index = advisor.index(&state);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &state, |b, state| {
            b.iter(|| advisor.play(black_box(state), &index).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_play);
criterion_main!(benches);
