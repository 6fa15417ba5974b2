//! Blacksmith - forges the weapons soldiers are trained with

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, Shortfall};
use crate::core::types::{Resource, ResourceKind};
use crate::economy::treasury::Economy;

/// Iron per weapon
pub const IRON_PER_WEAPON: i64 = 10;

/// Wood per weapon
pub const WOOD_PER_WEAPON: i64 = 5;

/// Gold per blacksmith level to upgrade
pub const UPGRADE_COST_PER_LEVEL: i64 = 500;

/// A finished production run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionReport {
    pub produced: i64,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blacksmith {
    level: u32,
    weapons_in_stock: Resource,
    corrupted: bool,
}

impl Default for Blacksmith {
    fn default() -> Self {
        Self::new()
    }
}

impl Blacksmith {
    pub fn new() -> Self {
        Self {
            level: 1,
            weapons_in_stock: Resource::new(0),
            corrupted: false,
        }
    }

    /// Pay 500 × level gold to raise the level by one. Returns the new level.
    pub fn upgrade(&mut self, econ: &mut Economy) -> Result<u32> {
        econ.spend(UPGRADE_COST_PER_LEVEL * i64::from(self.level))?;
        self.level += 1;
        tracing::info!(level = self.level, "blacksmith upgraded");
        Ok(self.level)
    }

    /// Forge `count` weapons; higher levels work faster (3 s / level, whole seconds)
    pub fn produce_weapons(
        &mut self,
        iron: &mut Resource,
        wood: &mut Resource,
        count: i64,
    ) -> Result<ProductionReport> {
        if count < 0 {
            return Err(Shortfall::NegativeAmount(count).into());
        }
        let iron_needed = count * IRON_PER_WEAPON;
        let wood_needed = count * WOOD_PER_WEAPON;
        if !iron.has(iron_needed) {
            return Err(Shortfall::Materials {
                kind: ResourceKind::Iron,
                needed: iron_needed,
                available: iron.get(),
            }
            .into());
        }
        if !wood.has(wood_needed) {
            return Err(Shortfall::Materials {
                kind: ResourceKind::Wood,
                needed: wood_needed,
                available: wood.get(),
            }
            .into());
        }
        iron.adjust(-iron_needed);
        wood.adjust(-wood_needed);
        self.weapons_in_stock.adjust(count);
        let duration = Duration::from_secs(u64::from(3 / self.level));
        tracing::info!(count, stock = self.weapons_in_stock.get(), "weapons produced");
        Ok(ProductionReport {
            produced: count,
            duration,
        })
    }

    /// Draw weapons from stock
    pub fn use_weapons(&mut self, count: i64) -> std::result::Result<(), Shortfall> {
        if count < 0 {
            return Err(Shortfall::NegativeAmount(count));
        }
        if !self.weapons_in_stock.has(count) {
            return Err(Shortfall::Weapons {
                needed: count,
                available: self.weapons_in_stock.get(),
            });
        }
        self.weapons_in_stock.adjust(-count);
        Ok(())
    }

    pub fn weapons_in_stock(&self) -> i64 {
        self.weapons_in_stock.get()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }

    pub fn set_corrupted(&mut self, corrupted: bool) {
        self.corrupted = corrupted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produce_consumes_materials() {
        let mut smith = Blacksmith::new();
        let mut iron = Resource::new(500);
        let mut wood = Resource::new(800);
        let report = smith.produce_weapons(&mut iron, &mut wood, 20).unwrap();
        assert_eq!(report.produced, 20);
        assert_eq!(report.duration, Duration::from_secs(3));
        assert_eq!(iron.get(), 300);
        assert_eq!(wood.get(), 700);
        assert_eq!(smith.weapons_in_stock(), 20);
    }

    #[test]
    fn test_produce_is_atomic() {
        let mut smith = Blacksmith::new();
        let mut iron = Resource::new(500);
        let mut wood = Resource::new(10);
        let err = smith.produce_weapons(&mut iron, &mut wood, 5).unwrap_err();
        assert!(matches!(
            err.shortfall(),
            Some(Shortfall::Materials { kind: ResourceKind::Wood, .. })
        ));
        assert_eq!(iron.get(), 500);
        assert_eq!(wood.get(), 10);
        assert_eq!(smith.weapons_in_stock(), 0);
    }

    #[test]
    fn test_upgrade_costs_scale_with_level() {
        let mut smith = Blacksmith::new();
        let mut econ = Economy::new(1600);
        assert_eq!(smith.upgrade(&mut econ).unwrap(), 2);
        assert_eq!(econ.gold(), 1100);
        assert_eq!(smith.upgrade(&mut econ).unwrap(), 3);
        assert_eq!(econ.gold(), 100);
        assert!(smith.upgrade(&mut econ).is_err());
        assert_eq!(smith.level(), 3);
    }

    #[test]
    fn test_higher_level_forges_faster() {
        let mut smith = Blacksmith::new();
        let mut econ = Economy::new(10_000);
        smith.upgrade(&mut econ).unwrap();
        smith.upgrade(&mut econ).unwrap();
        smith.upgrade(&mut econ).unwrap();
        let mut iron = Resource::new(100);
        let mut wood = Resource::new(100);
        let report = smith.produce_weapons(&mut iron, &mut wood, 1).unwrap();
        assert_eq!(report.duration, Duration::ZERO);
    }

    #[test]
    fn test_use_weapons_guards_stock() {
        let mut smith = Blacksmith::new();
        assert_eq!(
            smith.use_weapons(1),
            Err(Shortfall::Weapons { needed: 1, available: 0 })
        );
    }

    #[test]
    fn test_negative_production_is_refused() {
        let mut smith = Blacksmith::new();
        let mut iron = Resource::new(500);
        let mut wood = Resource::new(800);
        let err = smith.produce_weapons(&mut iron, &mut wood, -20).unwrap_err();
        assert_eq!(err.shortfall(), Some(&Shortfall::NegativeAmount(-20)));
        assert_eq!(iron.get(), 500);
        assert_eq!(wood.get(), 800);
        assert_eq!(smith.weapons_in_stock(), 0);
        assert_eq!(smith.use_weapons(-1), Err(Shortfall::NegativeAmount(-1)));
    }
}
