//! Post-turn sanity checks. Warnings never stop the game.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kingdom::Kingdom;

/// Loans above this are flagged
pub const EXCESSIVE_LOAN: i64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ValidationWarning {
    NegativeGold(i64),
    InvalidMorale(f64),
    NegativeArmy(i64),
    ExcessiveLoan(i64),
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeGold(gold) => write!(f, "Negative gold detected: {}", gold),
            Self::InvalidMorale(morale) => write!(f, "Invalid morale: {}", morale),
            Self::NegativeArmy(size) => write!(f, "Negative army size: {}", size),
            Self::ExcessiveLoan(loan) => write!(f, "Excessive loan detected: {}", loan),
        }
    }
}

pub fn validate_kingdom(kingdom: &Kingdom) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let gold = kingdom.economy().gold();
    if gold < 0 {
        warnings.push(ValidationWarning::NegativeGold(gold));
    }
    let morale = kingdom.population().morale();
    if !(0.0..=1.0).contains(&morale) {
        warnings.push(ValidationWarning::InvalidMorale(morale));
    }
    let army = kingdom.army().size();
    if army < 0 {
        warnings.push(ValidationWarning::NegativeArmy(army));
    }
    let loan = kingdom.bank().loan();
    if loan > EXCESSIVE_LOAN {
        warnings.push(ValidationWarning::ExcessiveLoan(loan));
    }
    for warning in &warnings {
        tracing::warn!(kingdom = kingdom.name(), %warning, "validation");
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_kingdom_is_valid() {
        assert!(validate_kingdom(&Kingdom::new("Stormwind", "Harold")).is_empty());
    }

    #[test]
    fn test_large_loan_flagged() {
        let mut kingdom = Kingdom::new("Stormwind", "Harold");
        kingdom.take_loan(6000).unwrap();
        assert_eq!(validate_kingdom(&kingdom), vec![ValidationWarning::ExcessiveLoan(6000)]);
    }
}
