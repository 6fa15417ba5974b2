//! Treasury - gold, tax policy and reliance on debt

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::Shortfall;
use crate::core::random::RandomSource;
use crate::core::types::Resource;
use crate::society::population::Population;

/// Flat tax collected each turn regardless of population
pub const FLAT_TAX: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaxPolicy {
    #[default]
    Flat,
    /// A tenth of the population's head count, which also feeds inflation
    Progressive,
}

impl fmt::Display for TaxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => f.write_str("Flat"),
            Self::Progressive => f.write_str("Progressive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    gold: Resource,
    tax_policy: TaxPolicy,
    debt_reliance: i64,
}

impl Economy {
    pub fn new(initial_gold: i64) -> Self {
        Self {
            gold: Resource::new(initial_gold),
            tax_policy: TaxPolicy::Flat,
            debt_reliance: 0,
        }
    }

    /// Pay `amount` out of the treasury, refusing overdrafts. Negative
    /// amounts cost nothing.
    pub fn spend(&mut self, amount: i64) -> Result<(), Shortfall> {
        self.require(amount)?;
        self.gold.adjust(-amount.max(0));
        Ok(())
    }

    /// Fail unless the treasury holds at least `amount`
    pub fn require(&self, amount: i64) -> Result<(), Shortfall> {
        if self.gold.has(amount) {
            Ok(())
        } else {
            Err(Shortfall::Gold {
                needed: amount,
                available: self.gold.get(),
            })
        }
    }

    pub fn deposit(&mut self, amount: i64) {
        self.gold.adjust(amount);
    }

    /// Lose up to `amount` to theft or disaster; returns what was actually lost
    pub fn lose(&mut self, amount: i64) -> i64 {
        let lost = amount.clamp(0, self.gold.get());
        self.gold.adjust(-lost);
        lost
    }

    /// Collect this turn's taxes; every collection costs 0.05 morale
    pub fn collect_taxes(&mut self, pop: &mut Population) -> i64 {
        let tax = match self.tax_policy {
            TaxPolicy::Progressive => (pop.total_size() as f64 * 0.1) as i64,
            TaxPolicy::Flat => FLAT_TAX,
        };
        self.gold.adjust(tax);
        pop.adjust_morale(-0.05);
        tracing::debug!(tax, policy = %self.tax_policy, "taxes collected");
        tax
    }

    /// One in fifteen: a third of the treasury vanishes and morale drops 0.2
    pub fn trigger_market_crash(
        &mut self,
        pop: &mut Population,
        rng: &mut impl RandomSource,
    ) -> Option<i64> {
        if rng.one_in(15) {
            let lost = self.lose(self.gold.get() / 3);
            pop.adjust_morale(-0.2);
            tracing::warn!(lost, "market crash");
            Some(lost)
        } else {
            None
        }
    }

    pub fn gold(&self) -> i64 {
        self.gold.get()
    }

    pub fn tax_policy(&self) -> TaxPolicy {
        self.tax_policy
    }

    pub fn is_progressive_tax(&self) -> bool {
        self.tax_policy == TaxPolicy::Progressive
    }

    pub fn set_tax_policy(&mut self, policy: TaxPolicy) {
        self.tax_policy = policy;
    }

    pub fn debt_reliance(&self) -> i64 {
        self.debt_reliance
    }

    pub fn increase_debt_reliance(&mut self, amount: i64) {
        self.debt_reliance = self.debt_reliance.saturating_add(amount.max(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;

    #[test]
    fn test_spend_refuses_overdraft() {
        let mut econ = Economy::new(300);
        assert_eq!(
            econ.spend(301),
            Err(Shortfall::Gold { needed: 301, available: 300 })
        );
        assert_eq!(econ.gold(), 300);
        econ.spend(300).unwrap();
        assert_eq!(econ.gold(), 0);
    }

    #[test]
    fn test_lose_is_clamped() {
        let mut econ = Economy::new(40);
        assert_eq!(econ.lose(50), 40);
        assert_eq!(econ.gold(), 0);
        assert_eq!(econ.lose(-5), 0);
    }

    #[test]
    fn test_flat_and_progressive_taxes() {
        let mut econ = Economy::new(0);
        let mut pop = Population::new();
        assert_eq!(econ.collect_taxes(&mut pop), 100);
        assert!((pop.morale() - 0.80).abs() < 1e-9);

        econ.set_tax_policy(TaxPolicy::Progressive);
        assert!(econ.is_progressive_tax());
        assert_eq!(econ.collect_taxes(&mut pop), 100);
        assert_eq!(econ.gold(), 200);

        pop.adjust_class_size(crate::society::population::ClassKind::Peasants, 555);
        assert_eq!(econ.collect_taxes(&mut pop), 155);
    }

    #[test]
    fn test_market_crash_takes_a_third() {
        let mut econ = Economy::new(900);
        let mut pop = Population::new();
        assert_eq!(
            econ.trigger_market_crash(&mut pop, &mut ScriptedRandom::with_rolls([0])),
            Some(300)
        );
        assert_eq!(econ.gold(), 600);
        assert!((pop.morale() - 0.65).abs() < 1e-9);

        assert_eq!(econ.trigger_market_crash(&mut pop, &mut ScriptedRandom::new()), None);
        assert_eq!(econ.gold(), 600);
    }

    #[test]
    fn test_debt_reliance_only_grows() {
        let mut econ = Economy::new(0);
        econ.increase_debt_reliance(50);
        econ.increase_debt_reliance(-20);
        assert_eq!(econ.debt_reliance(), 50);
    }
}
