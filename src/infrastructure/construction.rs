//! Construction costs and the one-project-at-a-time guard

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::Shortfall;
use crate::core::types::{Resource, ResourceKind};
use crate::economy::treasury::Economy;

/// Time any single construction project takes
pub const BUILD_DURATION: Duration = Duration::from_secs(5);

/// Gold and materials a project consumes up front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildCost {
    pub gold: i64,
    pub wood: i64,
    pub stone: i64,
}

impl BuildCost {
    /// Check everything is on hand, reporting the first thing missing
    pub fn check(&self, econ: &Economy, wood: &Resource, stone: &Resource) -> Result<(), Shortfall> {
        econ.require(self.gold)?;
        let materials = [(ResourceKind::Wood, wood, self.wood), (ResourceKind::Stone, stone, self.stone)];
        for (kind, stockpile, needed) in materials {
            if !stockpile.has(needed) {
                return Err(Shortfall::Materials {
                    kind,
                    needed,
                    available: stockpile.get(),
                });
            }
        }
        Ok(())
    }

    /// Check then deduct; nothing is taken unless everything can be
    pub fn pay(&self, econ: &mut Economy, wood: &mut Resource, stone: &mut Resource) -> Result<(), Shortfall> {
        self.check(econ, wood, stone)?;
        econ.spend(self.gold)?;
        wood.adjust(-self.wood);
        stone.adjust(-self.stone);
        Ok(())
    }
}

/// A finished construction project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructionReport {
    pub level: u32,
    pub duration: Duration,
}

/// Allows one project in flight per facility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionSite {
    busy: bool,
}

impl ConstructionSite {
    /// Claim the site, refusing if a project is already under way
    pub fn begin(&mut self, facility: &'static str) -> Result<(), Shortfall> {
        if self.busy {
            return Err(Shortfall::AlreadyBuilding(facility));
        }
        self.busy = true;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COST: BuildCost = BuildCost {
        gold: 100,
        wood: 50,
        stone: 20,
    };

    #[test]
    fn test_pay_is_all_or_nothing() {
        let mut econ = Economy::new(500);
        let mut wood = Resource::new(60);
        let mut stone = Resource::new(10);
        assert_eq!(
            COST.pay(&mut econ, &mut wood, &mut stone),
            Err(Shortfall::Materials {
                kind: ResourceKind::Stone,
                needed: 20,
                available: 10,
            })
        );
        assert_eq!((econ.gold(), wood.get(), stone.get()), (500, 60, 10));

        stone.adjust(10);
        COST.pay(&mut econ, &mut wood, &mut stone).unwrap();
        assert_eq!((econ.gold(), wood.get(), stone.get()), (400, 10, 0));
    }

    #[test]
    fn test_gold_checked_first() {
        let econ = Economy::new(0);
        let err = COST.check(&econ, &Resource::new(0), &Resource::new(0)).unwrap_err();
        assert!(matches!(err, Shortfall::Gold { .. }));
    }

    #[test]
    fn test_site_single_flight() {
        let mut site = ConstructionSite::default();
        site.begin("Hospital").unwrap();
        assert!(site.is_busy());
        assert_eq!(site.begin("Hospital"), Err(Shortfall::AlreadyBuilding("Hospital")));
        site.finish();
        assert!(site.begin("Hospital").is_ok());
    }
}
