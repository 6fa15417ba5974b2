//! Inflation - a price multiplier driven by tax policy and debt

use serde::{Deserialize, Serialize};

use crate::economy::bank::Bank;
use crate::economy::treasury::Economy;

/// Rate above which the currency collapses
pub const BANKRUPTCY_RATE: f64 = 2.0;

/// Rate the currency is reset to after a collapse
pub const POST_BANKRUPTCY_RATE: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inflation {
    rate: f64,
}

impl Default for Inflation {
    fn default() -> Self {
        Self { rate: 1.0 }
    }
}

impl Inflation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the rate for this turn's policy and debt
    ///
    /// Progressive taxes or a loan above 1000 add 0.05; debt reliance above
    /// 1000 adds 0.1. Past [`BANKRUPTCY_RATE`] the treasury is halved and the
    /// rate reset. Returns the gold lost to a bankruptcy.
    pub fn update(&mut self, econ: &mut Economy, bank: &Bank) -> Option<i64> {
        if econ.is_progressive_tax() || bank.loan() > 1000 {
            self.rate += 0.05;
        }
        if econ.debt_reliance() > 1000 {
            self.rate += 0.1;
        }
        if self.rate > BANKRUPTCY_RATE {
            let lost = econ.lose((econ.gold() as f64 * 0.5) as i64);
            self.rate = POST_BANKRUPTCY_RATE;
            tracing::warn!(lost, "bankruptcy, gold devalued");
            return Some(lost);
        }
        None
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::treasury::TaxPolicy;

    #[test]
    fn test_stable_without_pressure() {
        let mut inflation = Inflation::new();
        let mut econ = Economy::new(1000);
        let bank = Bank::new();
        for _ in 0..10 {
            assert_eq!(inflation.update(&mut econ, &bank), None);
        }
        assert_eq!(inflation.rate(), 1.0);
    }

    #[test]
    fn test_progressive_tax_drives_to_bankruptcy() {
        let mut inflation = Inflation::new();
        let mut econ = Economy::new(1001);
        econ.set_tax_policy(TaxPolicy::Progressive);
        let bank = Bank::new();

        let mut turns = 0;
        let lost = loop {
            turns += 1;
            assert!(turns <= 30, "inflation never collapsed");
            if let Some(lost) = inflation.update(&mut econ, &bank) {
                break lost;
            }
        };
        // Twenty steps of 0.05 reach the cap; float drift may need one more
        assert!((20..=21).contains(&turns));
        assert_eq!(lost, 500);
        assert_eq!(econ.gold(), 501);
        assert!((inflation.rate() - POST_BANKRUPTCY_RATE).abs() < 1e-9);
    }

    #[test]
    fn test_debt_reliance_adds_more() {
        let mut inflation = Inflation::new();
        let mut econ = Economy::new(0);
        let mut bank = Bank::new();
        bank.take_loan(&mut econ, 2400).unwrap();
        inflation.update(&mut econ, &bank);
        assert!((inflation.rate() - 1.15).abs() < 1e-9);
    }
}
