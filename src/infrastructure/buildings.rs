//! Barracks - each one makes training faster

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, Shortfall};
use crate::core::types::Resource;
use crate::economy::treasury::Economy;
use crate::infrastructure::construction::{BuildCost, ConstructionReport, ConstructionSite, BUILD_DURATION};

pub const BARRACKS_COST: BuildCost = BuildCost {
    gold: 400,
    wood: 150,
    stone: 150,
};

/// Buildings menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingAction {
    BuildBarracks,
}

impl BuildingAction {
    pub fn from_choice(choice: u32) -> std::result::Result<Self, Shortfall> {
        match choice {
            1 => Ok(Self::BuildBarracks),
            _ => Err(Shortfall::InvalidChoice {
                menu: "buildings",
                choice,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buildings {
    barracks_level: u32,
    site: ConstructionSite,
    training_efficiency: f64,
}

impl Default for Buildings {
    fn default() -> Self {
        Self::new()
    }
}

impl Buildings {
    pub fn new() -> Self {
        Self {
            barracks_level: 0,
            site: ConstructionSite::default(),
            training_efficiency: 1.0,
        }
    }

    /// Each barracks cuts training time by 10%, compounding
    pub fn build_barracks(
        &mut self,
        econ: &mut Economy,
        wood: &mut Resource,
        stone: &mut Resource,
    ) -> Result<ConstructionReport> {
        if self.site.is_busy() {
            return Err(Shortfall::AlreadyBuilding("Barracks").into());
        }
        BARRACKS_COST.pay(econ, wood, stone)?;
        self.site.begin("Barracks")?;
        self.barracks_level += 1;
        self.training_efficiency *= 0.9;
        self.site.finish();
        tracing::info!(level = self.barracks_level, "barracks built");
        Ok(ConstructionReport {
            level: self.barracks_level,
            duration: BUILD_DURATION,
        })
    }

    pub fn barracks_level(&self) -> u32 {
        self.barracks_level
    }

    pub fn is_building(&self) -> bool {
        self.site.is_busy()
    }

    /// Multiplier on training time; lower is faster
    pub fn training_efficiency(&self) -> f64 {
        self.training_efficiency
    }
}
