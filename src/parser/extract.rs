//! Field extractors applied once a fragment has been classified

use crate::core::{Domain, EffectTarget};
use crate::Result;
use regex_lite::Regex;
use smallvec::SmallVec;

/// Keywords an ability can grant, matched by substring
pub const GRANTABLE_KEYWORDS: [&str; 13] = [
    "assault",
    "guard",
    "flying",
    "overwhelm",
    "lifesteal",
    "quick",
    "ambush",
    "double strike",
    "first strike",
    "vigilance",
    "trample",
    "hexproof",
    "protection",
];

/// Compiled regexes for the numeric, cost and condition extractors
#[derive(Debug, Clone)]
pub struct Extractors {
    cost: Regex,
    numbers: [Regex; 4],
    if_condition: Regex,
    as_long_as: Regex,
}

impl Extractors {
    pub fn new() -> Result<Self> {
        Ok(Extractors {
            cost: Regex::new(r"^([^:]+):")?,
            numbers: [
                Regex::new(r"\+(\d+)")?,
                Regex::new(r"(?:deal|deals) (\d+) damage")?,
                Regex::new(r"draw (\d+)")?,
                Regex::new(r"cost(?:s)? (\d+) less")?,
            ],
            if_condition: Regex::new(r"if (.+?)(?:[,.]|$)")?,
            as_long_as: Regex::new(r"as long as (.+?)(?:[,.]|$)")?,
        })
    }

    /// Activation cost: everything before the first colon, original case
    pub fn cost(&self, line: &str) -> Option<String> {
        self.cost
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }

    /// First magnitude among "+N", "deal N damage", "draw N", "cost N less"
    pub fn number(&self, text_lower: &str) -> Option<i32> {
        self.numbers.iter().find_map(|re| {
            re.captures(text_lower)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
        })
    }

    pub fn conditions(&self, text_lower: &str) -> SmallVec<[String; 1]> {
        let mut conditions = SmallVec::new();

        if text_lower.contains("if ") {
            if let Some(m) = self.if_condition.captures(text_lower).and_then(|c| c.get(1)) {
                conditions.push(m.as_str().trim().to_string());
            }
        }

        if text_lower.contains("as long as") {
            if let Some(m) = self.as_long_as.captures(text_lower).and_then(|c| c.get(1)) {
                conditions.push(m.as_str().trim().to_string());
            }
        }

        conditions
    }
}

/// What the ability targets, by vocabulary substring (first rule wins)
pub fn target(text_lower: &str) -> Option<EffectTarget> {
    let has = |needle: &str| text_lower.contains(needle);

    if has("target unit") || has("target creature") {
        return Some(EffectTarget::TargetUnit);
    }
    if has("target spell") {
        return Some(EffectTarget::TargetSpell);
    }
    if has("target player") || has("target opponent") {
        return Some(EffectTarget::TargetPlayer);
    }
    if has("all units") || has("all creatures") || has("each unit") {
        return Some(EffectTarget::AllUnits);
    }
    if has("your units") || has("units you control") || has("creatures you control") {
        return Some(EffectTarget::YourUnits);
    }
    if has("opponent") && (has("units") || has("creatures")) {
        return Some(EffectTarget::OpponentUnits);
    }
    if has("your legend") {
        return Some(EffectTarget::YourLegend);
    }
    if has("opponent's legend") || has("enemy legend") {
        return Some(EffectTarget::OpponentLegend);
    }
    if has("this") || text_lower.starts_with("it") {
        return Some(EffectTarget::SelfCard);
    }
    None
}

pub fn keywords_granted(text_lower: &str) -> SmallVec<[String; 2]> {
    GRANTABLE_KEYWORDS
        .iter()
        .filter(|kw| text_lower.contains(*kw))
        .map(|kw| kw.to_string())
        .collect()
}

/// First domain name mentioned in the text
pub fn domain(text_lower: &str) -> Option<Domain> {
    Domain::COLORED
        .into_iter()
        .find(|d| text_lower.contains(d.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_extraction_order() {
        let ex = Extractors::new().unwrap();
        // "+N" wins over the damage phrase
        assert_eq!(ex.number("give it +2 and deal 3 damage"), Some(2));
        assert_eq!(ex.number("deal 3 damage to target unit"), Some(3));
        assert_eq!(ex.number("draw 2 cards"), Some(2));
        assert_eq!(ex.number("spells cost 1 less"), Some(1));
        assert_eq!(ex.number("draw a card"), None);
    }

    #[test]
    fn test_cost_uses_original_case() {
        let ex = Extractors::new().unwrap();
        assert_eq!(ex.cost("Exhaust: Deal 1 damage"), Some("Exhaust".to_string()));
        assert_eq!(ex.cost("Deal 1 damage"), None);
    }

    #[test]
    fn test_conditions() {
        let ex = Extractors::new().unwrap();
        let conditions = ex.conditions("if you control a mech, draw a card");
        assert_eq!(conditions.as_slice(), ["you control a mech".to_string()]);

        let conditions = ex.conditions("this has +2 might as long as you have 3 runes");
        assert_eq!(conditions.as_slice(), ["you have 3 runes".to_string()]);
    }

    #[test]
    fn test_target_vocabulary() {
        assert_eq!(target("destroy target unit"), Some(EffectTarget::TargetUnit));
        assert_eq!(target("deal 1 damage to all units"), Some(EffectTarget::AllUnits));
        assert_eq!(target("your units get +1"), Some(EffectTarget::YourUnits));
        assert_eq!(target("ready your legend"), Some(EffectTarget::YourLegend));
        assert_eq!(target("when this dies"), Some(EffectTarget::SelfCard));
        assert_eq!(target("it gains assault"), Some(EffectTarget::SelfCard));
        assert_eq!(target("draw a card"), None);
    }

    #[test]
    fn test_keywords_and_domain() {
        let kws = keywords_granted("your units have guard and double strike");
        assert_eq!(kws.as_slice(), ["guard".to_string(), "double strike".to_string()]);
        assert_eq!(domain("fury units you control have assault"), Some(Domain::Fury));
        assert_eq!(domain("draw a card"), None);
    }
}
