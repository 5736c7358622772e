//! Domains (runes) and the power resource they pay for

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six card domains plus colorless (battlefields, some gear)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Fury,
    Body,
    Order,
    Calm,
    Mind,
    Chaos,
    Colorless,
}

impl Domain {
    /// The six colored domains, in rules-text order
    pub const COLORED: [Domain; 6] = [
        Domain::Fury,
        Domain::Body,
        Domain::Order,
        Domain::Calm,
        Domain::Mind,
        Domain::Chaos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Fury => "fury",
            Domain::Body => "body",
            Domain::Order => "order",
            Domain::Calm => "calm",
            Domain::Mind => "mind",
            Domain::Chaos => "chaos",
            Domain::Colorless => "colorless",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fury" => Ok(Domain::Fury),
            "body" => Ok(Domain::Body),
            "order" => Ok(Domain::Order),
            "calm" => Ok(Domain::Calm),
            "mind" => Ok(Domain::Mind),
            "chaos" => Ok(Domain::Chaos),
            "colorless" | "" => Ok(Domain::Colorless),
            other => Err(format!("unknown domain '{other}'")),
        }
    }
}

/// Power cost of a card (e.g., 1 generic + 1 fury)
/// Copy-eligible since it's just 7 u8 fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerCost {
    /// Payable from any domain
    pub generic: u8,
    pub fury: u8,
    pub body: u8,
    pub order: u8,
    pub calm: u8,
    pub mind: u8,
    pub chaos: u8,
}

impl PowerCost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flat cost with no domain requirement
    pub fn generic(amount: u8) -> Self {
        PowerCost {
            generic: amount,
            ..Self::default()
        }
    }

    /// Add a requirement for a specific domain
    ///
    /// Colorless requirements are folded into the generic amount.
    pub fn add_domain(&mut self, domain: Domain, amount: u8) {
        match domain {
            Domain::Fury => self.fury = self.fury.saturating_add(amount),
            Domain::Body => self.body = self.body.saturating_add(amount),
            Domain::Order => self.order = self.order.saturating_add(amount),
            Domain::Calm => self.calm = self.calm.saturating_add(amount),
            Domain::Mind => self.mind = self.mind.saturating_add(amount),
            Domain::Chaos => self.chaos = self.chaos.saturating_add(amount),
            Domain::Colorless => self.generic = self.generic.saturating_add(amount),
        }
    }

    pub fn for_domain(&self, domain: Domain) -> u8 {
        match domain {
            Domain::Fury => self.fury,
            Domain::Body => self.body,
            Domain::Order => self.order,
            Domain::Calm => self.calm,
            Domain::Mind => self.mind,
            Domain::Chaos => self.chaos,
            Domain::Colorless => 0,
        }
    }

    /// Total power required
    pub fn total(&self) -> u32 {
        [
            self.generic,
            self.fury,
            self.body,
            self.order,
            self.calm,
            self.mind,
            self.chaos,
        ]
        .into_iter()
        .map(u32::from)
        .sum()
    }

    pub fn is_free(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for PowerCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.generic > 0 {
            parts.push(self.generic.to_string());
        }
        for domain in Domain::COLORED {
            let amount = self.for_domain(domain);
            if amount > 0 {
                parts.push(format!("{amount} {domain}"));
            }
        }
        if parts.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", parts.join(" + "))
        }
    }
}

/// Power available to a player this turn, by domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerPool {
    pub fury: u8,
    pub body: u8,
    pub order: u8,
    pub calm: u8,
    pub mind: u8,
    pub chaos: u8,
    pub colorless: u8,
}

impl PowerPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, domain: Domain, amount: u8) {
        let slot = self.slot_mut(domain);
        *slot = slot.saturating_add(amount);
    }

    pub fn available(&self, domain: Domain) -> u8 {
        match domain {
            Domain::Fury => self.fury,
            Domain::Body => self.body,
            Domain::Order => self.order,
            Domain::Calm => self.calm,
            Domain::Mind => self.mind,
            Domain::Chaos => self.chaos,
            Domain::Colorless => self.colorless,
        }
    }

    fn slot_mut(&mut self, domain: Domain) -> &mut u8 {
        match domain {
            Domain::Fury => &mut self.fury,
            Domain::Body => &mut self.body,
            Domain::Order => &mut self.order,
            Domain::Calm => &mut self.calm,
            Domain::Mind => &mut self.mind,
            Domain::Chaos => &mut self.chaos,
            Domain::Colorless => &mut self.colorless,
        }
    }

    /// Check if we can pay the given power cost
    pub fn can_pay(&self, cost: &PowerCost) -> bool {
        // Domain requirements first
        if Domain::COLORED
            .iter()
            .any(|&d| self.available(d) < cost.for_domain(d))
        {
            return false;
        }

        // Anything left over covers the generic part
        self.total() >= cost.total()
    }

    /// Pay a power cost from this pool
    ///
    /// Domain requirements are paid first, then the generic part from
    /// colorless and then from domains in rules-text order.
    /// Returns Err (and leaves the pool untouched) if the pool is short.
    pub fn pay(&mut self, cost: &PowerCost) -> Result<(), String> {
        if !self.can_pay(cost) {
            return Err(format!(
                "Insufficient power to pay {}: pool has {} total",
                cost,
                self.total()
            ));
        }

        for domain in Domain::COLORED {
            *self.slot_mut(domain) -= cost.for_domain(domain);
        }

        let mut generic_remaining = cost.generic;
        for domain in std::iter::once(Domain::Colorless).chain(Domain::COLORED) {
            let slot = self.slot_mut(domain);
            let used = generic_remaining.min(*slot);
            *slot -= used;
            generic_remaining -= used;
        }

        debug_assert_eq!(generic_remaining, 0, "Failed to pay generic power");

        Ok(())
    }

    /// Total power in pool
    pub fn total(&self) -> u32 {
        [
            self.fury,
            self.body,
            self.order,
            self.calm,
            self.mind,
            self.chaos,
            self.colorless,
        ]
        .into_iter()
        .map(u32::from)
        .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_from_str() {
        assert_eq!("Fury".parse::<Domain>().unwrap(), Domain::Fury);
        assert_eq!(" chaos ".parse::<Domain>().unwrap(), Domain::Chaos);
        assert!("shadow".parse::<Domain>().is_err());
    }

    #[test]
    fn test_pool_can_pay_domain_requirement() {
        let mut pool = PowerPool::new();
        pool.add(Domain::Fury, 1);
        pool.add(Domain::Calm, 1);

        let mut cost = PowerCost::generic(1);
        cost.add_domain(Domain::Fury, 1);
        assert!(pool.can_pay(&cost));

        let mut heavy = PowerCost::new();
        heavy.add_domain(Domain::Fury, 2);
        assert!(!pool.can_pay(&heavy));
    }

    #[test]
    fn test_pay_uses_colorless_for_generic_first() {
        let mut pool = PowerPool::new();
        pool.add(Domain::Colorless, 1);
        pool.add(Domain::Mind, 2);

        let mut cost = PowerCost::generic(1);
        cost.add_domain(Domain::Mind, 1);
        assert!(pool.pay(&cost).is_ok());
        assert_eq!(pool.colorless, 0);
        assert_eq!(pool.mind, 1);
        assert_eq!(pool.total(), 1);
    }

    #[test]
    fn test_pay_insufficient_leaves_pool_unchanged() {
        let mut pool = PowerPool::new();
        pool.add(Domain::Body, 1);

        let cost = PowerCost::generic(2);
        assert!(pool.pay(&cost).is_err());
        assert_eq!(pool.body, 1);
    }

    #[test]
    fn test_large_pool_totals_past_u8() {
        let mut pool = PowerPool::new();
        pool.add(Domain::Fury, 200);
        pool.add(Domain::Body, 100);
        assert_eq!(pool.total(), 300);

        let mut cost = PowerCost::generic(250);
        cost.add_domain(Domain::Fury, 50);
        assert_eq!(cost.total(), 300);
        assert!(pool.can_pay(&cost));

        cost.add_domain(Domain::Body, 1);
        assert!(!pool.can_pay(&cost));

        pool.add(Domain::Fury, 100);
        assert_eq!(pool.fury, u8::MAX);
    }

    #[test]
    fn test_cost_display() {
        let mut cost = PowerCost::generic(2);
        cost.add_domain(Domain::Order, 1);
        assert_eq!(cost.to_string(), "2 + 1 order");
        assert_eq!(PowerCost::new().to_string(), "0");
    }
}
