//! Bank - loans, audits and land seizure for bad debt

use serde::{Deserialize, Serialize};

use crate::core::error::{KingdomError, Result, Shortfall};
use crate::core::random::RandomSource;
use crate::economy::treasury::Economy;
use crate::realm::map::{Map, GRID_SIZE};

/// Loans above this may be collected by seizing land
pub const SEIZURE_THRESHOLD: i64 = 2000;

/// Fee for a bank audit
pub const BANK_AUDIT_FEE: i64 = 100;

/// Name the bank captures seized land under
pub const BANK_NAME: &str = "Bank";

/// A seizure of land for an unpaid loan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seizure {
    pub cell: (i32, i32),
    pub gold_lost: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    loan: i64,
    interest_rate: f64,
    corrupted: bool,
    land_seized: u32,
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

impl Bank {
    pub fn new() -> Self {
        Self {
            loan: 0,
            interest_rate: 0.1,
            corrupted: false,
            land_seized: 0,
        }
    }

    /// Borrow `amount`; half of it counts towards debt reliance
    pub fn take_loan(&mut self, econ: &mut Economy, amount: i64) -> Result<()> {
        if amount < 0 {
            return Err(Shortfall::NegativeAmount(amount).into());
        }
        econ.deposit(amount);
        self.loan += amount;
        econ.increase_debt_reliance(amount / 2);
        tracing::info!(amount, loan = self.loan, "loan taken");
        Ok(())
    }

    pub fn repay_loan(&mut self, econ: &mut Economy, amount: i64) -> Result<()> {
        if amount < 0 {
            return Err(Shortfall::NegativeAmount(amount).into());
        }
        if self.loan < amount {
            return Err(Shortfall::LoanOverpayment {
                amount,
                loan: self.loan,
            }
            .into());
        }
        econ.spend(amount)?;
        self.loan -= amount;
        tracing::info!(amount, loan = self.loan, "loan repaid");
        Ok(())
    }

    /// One in twenty: the bank turns corrupt. Returns true when it happens.
    pub fn check_corruption(&mut self, rng: &mut impl RandomSource) -> bool {
        if rng.one_in(20) {
            self.corrupted = true;
            tracing::warn!("bank corruption detected");
            true
        } else {
            false
        }
    }

    /// Pay the audit fee and clear corruption
    ///
    /// A treasury that cannot pay the fee fails the audit itself.
    pub fn audit(&mut self, econ: &mut Economy) -> Result<()> {
        econ.spend(BANK_AUDIT_FEE)
            .map_err(KingdomError::CorruptionAudit)?;
        self.corrupted = false;
        tracing::info!("bank audit cleared corruption");
        Ok(())
    }

    /// With a loan above [`SEIZURE_THRESHOLD`], one in five turns the bank
    /// seizes a random cell and a fifth of the treasury
    pub fn seize_land(
        &mut self,
        econ: &mut Economy,
        map: &mut Map,
        rng: &mut impl RandomSource,
    ) -> Option<Seizure> {
        if self.loan > SEIZURE_THRESHOLD && rng.one_in(5) {
            self.land_seized += 1;
            let x = rng.roll(GRID_SIZE as u32) as i32;
            let y = rng.roll(GRID_SIZE as u32) as i32;
            map.capture(BANK_NAME, x, y);
            let gold_lost = econ.lose(econ.gold() / 5);
            tracing::warn!(x, y, gold_lost, "bank seized land");
            Some(Seizure {
                cell: (x, y),
                gold_lost,
            })
        } else {
            None
        }
    }

    pub fn loan(&self) -> i64 {
        self.loan
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn land_seized(&self) -> u32 {
        self.land_seized
    }

    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;

    #[test]
    fn test_loan_cycle() {
        let mut bank = Bank::new();
        let mut econ = Economy::new(100);
        bank.take_loan(&mut econ, 1000).unwrap();
        assert_eq!(econ.gold(), 1100);
        assert_eq!(bank.loan(), 1000);
        assert_eq!(econ.debt_reliance(), 500);

        bank.repay_loan(&mut econ, 400).unwrap();
        assert_eq!(bank.loan(), 600);
        assert_eq!(econ.gold(), 700);
    }

    #[test]
    fn test_repay_more_than_owed() {
        let mut bank = Bank::new();
        let mut econ = Economy::new(1000);
        let err = bank.repay_loan(&mut econ, 10).unwrap_err();
        assert_eq!(
            err.shortfall(),
            Some(&Shortfall::LoanOverpayment { amount: 10, loan: 0 })
        );
        assert_eq!(econ.gold(), 1000);
    }

    #[test]
    fn test_repay_without_gold_keeps_loan() {
        let mut bank = Bank::new();
        let mut econ = Economy::new(0);
        bank.take_loan(&mut econ, 500).unwrap();
        econ.spend(450).unwrap();
        assert!(bank.repay_loan(&mut econ, 100).is_err());
        assert_eq!(bank.loan(), 500);
        assert_eq!(econ.gold(), 50);
    }

    #[test]
    fn test_audit_translates_shortfall() {
        let mut bank = Bank::new();
        bank.check_corruption(&mut ScriptedRandom::with_rolls([0]));
        assert!(bank.is_corrupted());

        let mut broke = Economy::new(99);
        let err = bank.audit(&mut broke).unwrap_err();
        assert!(matches!(err, KingdomError::CorruptionAudit(Shortfall::Gold { .. })));
        assert!(bank.is_corrupted());

        let mut econ = Economy::new(100);
        bank.audit(&mut econ).unwrap();
        assert!(!bank.is_corrupted());
        assert_eq!(econ.gold(), 0);
    }

    #[test]
    fn test_seize_land_needs_large_loan() {
        let mut bank = Bank::new();
        let mut econ = Economy::new(0);
        let mut map = Map::new();
        bank.take_loan(&mut econ, 2000).unwrap();
        let mut rng = ScriptedRandom::with_rolls([0, 0, 0]);
        assert_eq!(bank.seize_land(&mut econ, &mut map, &mut rng), None);
        // Loan at the threshold does not even roll
        assert_eq!(rng.remaining(), (3, 0));

        bank.take_loan(&mut econ, 1).unwrap();
        let seizure = bank
            .seize_land(&mut econ, &mut map, &mut ScriptedRandom::with_rolls([0, 2, 3]))
            .unwrap();
        assert_eq!(seizure.cell, (2, 3));
        assert_eq!(seizure.gold_lost, 400);
        assert_eq!(econ.gold(), 1601);
        assert_eq!(map.cell(2, 3), Some('B'));
        assert_eq!(bank.land_seized(), 1);
    }

    #[test]
    fn test_negative_loan_amounts_are_refused() {
        let mut bank = Bank::new();
        let mut econ = Economy::new(1000);
        bank.take_loan(&mut econ, 500).unwrap();

        let err = bank.take_loan(&mut econ, -200).unwrap_err();
        assert_eq!(err.shortfall(), Some(&Shortfall::NegativeAmount(-200)));
        let err = bank.repay_loan(&mut econ, -200).unwrap_err();
        assert_eq!(err.shortfall(), Some(&Shortfall::NegativeAmount(-200)));

        assert_eq!(bank.loan(), 500);
        assert_eq!(econ.gold(), 1500);
        assert_eq!(econ.debt_reliance(), 250);
    }
}
