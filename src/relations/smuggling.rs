//! Smuggling - moving iron out of a rival along a secure route

use std::time::Duration;

use crate::core::error::{Result, Shortfall};
use crate::core::random::RandomSource;
use crate::kingdom::{Kingdom, KingdomEvent};

pub const SMUGGLING_COST: i64 = 100;
pub const SMUGGLING_DELAY: Duration = Duration::from_secs(3);
pub const SMUGGLING_CHANCE: f64 = 0.8;

/// Iron gained by the smuggler on success; the target loses half as much
pub const SMUGGLED_IRON: i64 = 200;

/// Extra gold lost when the goods are seized
pub const SEIZURE_PENALTY: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmugglingOutcome {
    Delivered { iron_gained: i64, target_lost: i64 },
    /// The target also voids its alliance with the source, when it had one
    Seized { penalty: i64, alliance_broken: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmugglingReport {
    pub target: String,
    pub delay: Duration,
    pub chance: f64,
    pub outcome: SmugglingOutcome,
}

/// Success chance against `target`; an active smuggler there makes it easier
pub fn chance_against(target: &Kingdom) -> f64 {
    let modifier = if target.market().is_smuggler_active() { 1.2 } else { 1.0 };
    SMUGGLING_CHANCE * modifier
}

/// Smuggle iron from `target` to `source`
///
/// Needs the fee up front and a secure route held by the source. A seizure
/// is handled like caught spies: the target breaks its alliance with the
/// source, and the source pays a further [`SEIZURE_PENALTY`], as much of it
/// as the treasury still holds.
pub fn smuggle_goods(source: &mut Kingdom, target: &mut Kingdom, rng: &mut impl RandomSource) -> Result<SmugglingReport> {
    source.economy.require(SMUGGLING_COST)?;
    if !source.diplomacy.has_secure_route(&target.name) {
        return Err(Shortfall::NoSecureRoute(target.name.clone()).into());
    }
    source.economy.spend(SMUGGLING_COST)?;

    let delay = SMUGGLING_DELAY + source.weather.delay_impact();
    let chance = chance_against(target);
    let success = rng.unit() < chance;
    tracing::info!(target = %target.name, chance, success, "smuggling");

    let outcome = if success {
        source.iron.adjust(SMUGGLED_IRON);
        let before = target.iron.get();
        target.iron.adjust(-SMUGGLED_IRON / 2);
        let target_lost = before - target.iron.get();
        source.record(KingdomEvent::SmuggledFrom {
            target: target.name.clone(),
            iron: SMUGGLED_IRON,
        });
        SmugglingOutcome::Delivered {
            iron_gained: SMUGGLED_IRON,
            target_lost,
        }
    } else {
        let alliance_broken = target.diplomacy.handle_espionage_failure(&source.name);
        target.record(KingdomEvent::SpiesCaught {
            source: source.name.clone(),
        });
        let penalty = source.economy.lose(SEIZURE_PENALTY);
        source.record(KingdomEvent::SmugglingSeized {
            target: target.name.clone(),
            penalty,
        });
        SmugglingOutcome::Seized {
            penalty,
            alliance_broken,
        }
    };

    Ok(SmugglingReport {
        target: target.name.clone(),
        delay,
        chance,
        outcome,
    })
}
