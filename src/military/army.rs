//! Army - soldiers, their morale, and the general who leads them

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::ArmyConfig;
use crate::core::error::{Result, Shortfall};
use crate::core::types::{Resource, ResourceKind};
use crate::economy::treasury::Economy;
use crate::military::blacksmith::{Blacksmith, IRON_PER_WEAPON};
use crate::society::figures::General;
use crate::society::population::{ClassKind, Population};

/// Morale below which soldiers start deserting
pub const DESERTION_MORALE: f64 = 0.3;

/// Gold owed per soldier each turn
pub const PAY_PER_SOLDIER: i64 = 2;

/// Base processing time of a training run before efficiency
const BASE_TRAINING_SECS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingOutcome {
    Trained {
        count: i64,
        duration: Duration,
        /// Turns before the next training run
        delay: u32,
    },
    /// Still recovering from the last run; nothing changed
    Delayed { turns_remaining: u32 },
}

/// What this turn's morale check found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoraleCheck {
    pub unpaid: bool,
    pub deserters: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Army {
    soldiers: i64,
    morale: f64,
    weapons: i64,
    training_delay: u32,
    general: General,
}

impl Default for Army {
    fn default() -> Self {
        Self::from_config(&ArmyConfig::default())
    }
}

impl Army {
    pub fn new(soldiers: i64, weapons: i64) -> Self {
        Self {
            soldiers: soldiers.max(0),
            weapons: weapons.max(0),
            ..Self::default()
        }
    }

    pub fn from_config(config: &ArmyConfig) -> Self {
        Self {
            soldiers: config.soldiers.max(0),
            morale: 0.8,
            weapons: config.weapons.max(0),
            training_delay: 0,
            general: General::new(config.general.clone(), 0.85),
        }
    }

    /// Turn peasants into soldiers
    ///
    /// Needs a non-negative `count` of people, 10 iron and one stocked weapon per recruit. While
    /// a previous run is still settling in the call changes nothing and
    /// reports the wait. A corrupt general stretches both the run (×1.5) and
    /// the wait afterwards (2 turns instead of 1).
    pub fn train(
        &mut self,
        count: i64,
        pop: &mut Population,
        iron: &mut Resource,
        blacksmith: &mut Blacksmith,
        efficiency: f64,
    ) -> Result<TrainingOutcome> {
        if count < 0 {
            return Err(Shortfall::NegativeAmount(count).into());
        }
        let iron_needed = count * IRON_PER_WEAPON;
        if pop.total_size() < count {
            return Err(Shortfall::Population {
                needed: count,
                available: pop.total_size(),
            }
            .into());
        }
        if !iron.has(iron_needed) {
            return Err(Shortfall::Materials {
                kind: ResourceKind::Iron,
                needed: iron_needed,
                available: iron.get(),
            }
            .into());
        }
        if blacksmith.weapons_in_stock() < count {
            return Err(Shortfall::Weapons {
                needed: count,
                available: blacksmith.weapons_in_stock(),
            }
            .into());
        }
        if self.training_delay > 0 {
            tracing::info!(turns = self.training_delay, "training delayed");
            return Ok(TrainingOutcome::Delayed {
                turns_remaining: self.training_delay,
            });
        }

        blacksmith.use_weapons(count)?;
        pop.adjust_class_size(ClassKind::Peasants, -count);
        pop.adjust_class_size(ClassKind::Military, count);
        iron.adjust(-iron_needed);

        let corrupt = self.general.is_corrupted();
        let slowdown = if corrupt { 1.5 } else { 1.0 };
        let duration = Duration::from_secs((BASE_TRAINING_SECS * efficiency * slowdown) as u64);

        self.soldiers += count;
        self.morale = if self.morale < 1.0 { self.morale + 0.05 } else { 1.0 };
        self.training_delay = if corrupt { 2 } else { 1 };
        tracing::info!(count, soldiers = self.soldiers, "soldiers trained");

        Ok(TrainingOutcome::Trained {
            count,
            duration,
            delay: self.training_delay,
        })
    }

    /// Send soldiers off as spies; they do not come back
    pub fn use_spies(&mut self, count: i64) -> std::result::Result<(), Shortfall> {
        if count < 0 {
            return Err(Shortfall::NegativeAmount(count));
        }
        if self.soldiers < count {
            return Err(Shortfall::Soldiers {
                needed: count,
                available: self.soldiers,
            });
        }
        self.soldiers -= count;
        Ok(())
    }

    /// Unpaid soldiers lose 0.1 morale; below [`DESERTION_MORALE`] a tenth desert
    pub fn check_morale(&mut self, econ: &Economy) -> MoraleCheck {
        let mut check = MoraleCheck::default();
        if econ.gold() < self.soldiers * PAY_PER_SOLDIER {
            self.morale = (self.morale - 0.1).max(0.0);
            check.unpaid = true;
            tracing::warn!(soldiers = self.soldiers, "unpaid soldiers");
        }
        if self.morale < DESERTION_MORALE {
            check.deserters = self.soldiers / 10;
            self.soldiers -= check.deserters;
            tracing::warn!(deserters = check.deserters, "soldiers desert");
        }
        check
    }

    /// Count down the post-training wait. Returns the turns still remaining
    /// when a wait was in progress.
    pub fn apply_training_delay(&mut self) -> Option<u32> {
        if self.training_delay > 0 {
            self.training_delay -= 1;
            Some(self.training_delay)
        } else {
            None
        }
    }

    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn general_mut(&mut self) -> &mut General {
        &mut self.general
    }

    pub fn size(&self) -> i64 {
        self.soldiers
    }

    pub fn weapons(&self) -> i64 {
        self.weapons
    }

    pub fn morale(&self) -> f64 {
        self.morale
    }

    pub fn training_delay(&self) -> u32 {
        self.training_delay
    }
}
