//! Kingdom score

use crate::kingdom::Kingdom;

/// Gold counts in tenths, up to this many
pub const GOLD_SCORE_CAP: i64 = 1000;

/// The parts a kingdom's score is summed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub morale: i64,
    pub gold: i64,
    pub army: i64,
    pub resources: i64,
    pub diplomacy: i64,
    pub land_penalty: i64,
}

impl Score {
    pub fn of(kingdom: &Kingdom) -> Self {
        let stockpiles = kingdom.food() + kingdom.iron() + kingdom.wood() + kingdom.stone();
        Self::from_parts(
            kingdom.population().morale(),
            kingdom.economy().gold(),
            kingdom.army().size(),
            stockpiles,
            kingdom.diplomacy().alliance_count(),
            kingdom.bank().land_seized(),
        )
    }

    pub fn from_parts(
        morale: f64,
        gold: i64,
        army: i64,
        stockpiles: i64,
        active_alliances: usize,
        land_seized: u32,
    ) -> Self {
        Self {
            morale: (morale * 300.0) as i64,
            gold: (gold / 10).min(GOLD_SCORE_CAP) * 250,
            army: army * 2,
            resources: stockpiles / 10,
            diplomacy: active_alliances as i64 * 50,
            land_penalty: i64::from(land_seized) * 100,
        }
    }

    pub fn total(&self) -> i64 {
        self.morale + self.gold + self.army + self.resources + self.diplomacy - self.land_penalty
    }
}
