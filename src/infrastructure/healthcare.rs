//! Healthcare - hospitals that lift morale and blunt plagues

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, Shortfall};
use crate::core::types::Resource;
use crate::economy::treasury::Economy;
use crate::infrastructure::construction::{BuildCost, ConstructionReport, ConstructionSite, BUILD_DURATION};
use crate::society::population::Population;

pub const HOSPITAL_COST: BuildCost = BuildCost {
    gold: 500,
    wood: 100,
    stone: 100,
};

/// Healthcare menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthcareAction {
    BuildHospital,
    ProvideServices,
}

impl HealthcareAction {
    pub fn from_choice(choice: u32) -> std::result::Result<Self, Shortfall> {
        match choice {
            1 => Ok(Self::BuildHospital),
            2 => Ok(Self::ProvideServices),
            _ => Err(Shortfall::InvalidChoice {
                menu: "healthcare",
                choice,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Healthcare {
    level: u32,
    site: ConstructionSite,
    satisfaction_boost: f64,
    plague_reduction: f64,
}

impl Default for Healthcare {
    fn default() -> Self {
        Self::new()
    }
}

impl Healthcare {
    pub fn new() -> Self {
        Self {
            level: 1,
            site: ConstructionSite::default(),
            satisfaction_boost: 0.05,
            plague_reduction: 0.1,
        }
    }

    /// Build a hospital: +1 level, +0.02 morale per service, +5% plague protection
    pub fn build(&mut self, econ: &mut Economy, wood: &mut Resource, stone: &mut Resource) -> Result<ConstructionReport> {
        if self.site.is_busy() {
            return Err(Shortfall::AlreadyBuilding("Hospital").into());
        }
        HOSPITAL_COST.pay(econ, wood, stone)?;
        self.site.begin("Hospital")?;
        self.level += 1;
        self.satisfaction_boost += 0.02;
        self.plague_reduction += 0.05;
        self.site.finish();
        tracing::info!(level = self.level, "hospital built");
        Ok(ConstructionReport {
            level: self.level,
            duration: BUILD_DURATION,
        })
    }

    /// Run services for the people. Returns the morale added.
    pub fn provide_services(&self, pop: &mut Population) -> f64 {
        pop.adjust_morale(self.satisfaction_boost);
        self.satisfaction_boost
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_building(&self) -> bool {
        self.site.is_busy()
    }

    pub fn satisfaction_boost(&self) -> f64 {
        self.satisfaction_boost
    }

    /// Fraction of plague deaths prevented
    pub fn plague_reduction(&self) -> f64 {
        self.plague_reduction
    }
}
