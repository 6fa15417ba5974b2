//! Espionage - covert missions against a rival kingdom

use std::fmt;
use std::time::Duration;

use crate::core::error::{Result, Shortfall};
use crate::core::random::RandomSource;
use crate::kingdom::status::KingdomStatus;
use crate::kingdom::{Kingdom, KingdomEvent};

/// Espionage menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mission {
    Spy,
    Sabotage,
    Steal,
}

impl Mission {
    pub fn from_choice(choice: u32) -> std::result::Result<Self, Shortfall> {
        match choice {
            1 => Ok(Self::Spy),
            2 => Ok(Self::Sabotage),
            3 => Ok(Self::Steal),
            _ => Err(Shortfall::InvalidChoice {
                menu: "espionage",
                choice,
            }),
        }
    }

    pub fn gold_cost(&self) -> i64 {
        match self {
            Self::Spy => 100,
            Self::Sabotage => 150,
            Self::Steal => 200,
        }
    }

    /// Soldiers sent as spies; they are spent whatever the outcome
    pub fn spies(&self) -> i64 {
        match self {
            Self::Spy => 5,
            Self::Sabotage => 10,
            Self::Steal => 15,
        }
    }

    pub fn base_delay(&self) -> Duration {
        match self {
            Self::Spy => Duration::from_secs(3),
            Self::Sabotage => Duration::from_secs(4),
            Self::Steal => Duration::from_secs(5),
        }
    }

    pub fn base_chance(&self) -> f64 {
        match self {
            Self::Spy => 0.7,
            Self::Sabotage => 0.6,
            Self::Steal => 0.5,
        }
    }

    /// Success chance against this particular target
    ///
    /// Demoralized people talk, a corrupt forge is easy to get into and a
    /// corrupt bank is easy to rob.
    pub fn chance_against(&self, target: &Kingdom) -> f64 {
        let modifier = match self {
            Self::Spy if target.population().morale() < 0.5 => 1.2,
            Self::Sabotage if target.blacksmith().is_corrupted() => 1.3,
            Self::Steal if target.bank().is_corrupted() => 1.4,
            _ => 1.0,
        };
        self.base_chance() * modifier
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spy => f.write_str("Spy mission"),
            Self::Sabotage => f.write_str("Sabotage"),
            Self::Steal => f.write_str("Theft"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MissionOutcome {
    Intel(Box<KingdomStatus>),
    WeaponsDestroyed(i64),
    GoldStolen(i64),
    /// Spies were caught; the target voids any alliance with the source
    Detected { alliance_broken: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MissionReport {
    pub mission: Mission,
    pub target: String,
    /// In-world time the mission took, weather included
    pub delay: Duration,
    pub chance: f64,
    pub outcome: MissionOutcome,
}

impl MissionReport {
    pub fn succeeded(&self) -> bool {
        !matches!(self.outcome, MissionOutcome::Detected { .. })
    }
}

/// Run `mission` from `source` against `target`
///
/// Gold and spies are checked before anything is spent. Once paid for, the
/// mission draws a single `unit()` sample and succeeds when it falls under
/// the chance for this target.
pub fn conduct(
    mission: Mission,
    source: &mut Kingdom,
    target: &mut Kingdom,
    rng: &mut impl RandomSource,
) -> Result<MissionReport> {
    source.economy.require(mission.gold_cost())?;
    if source.army.size() < mission.spies() {
        return Err(Shortfall::Soldiers {
            needed: mission.spies(),
            available: source.army.size(),
        }
        .into());
    }
    source.economy.spend(mission.gold_cost())?;
    source.army.use_spies(mission.spies())?;

    let delay = mission.base_delay() + source.weather.delay_impact();
    let chance = mission.chance_against(target);
    let success = rng.unit() < chance;
    tracing::info!(%mission, target = %target.name, chance, success, "espionage");

    let outcome = if success {
        match mission {
            Mission::Spy => MissionOutcome::Intel(Box::new(target.status())),
            Mission::Sabotage => {
                let destroyed = target.blacksmith.weapons_in_stock() / 2;
                target.blacksmith.use_weapons(destroyed)?;
                target.record(KingdomEvent::SabotagedBy {
                    source: source.name.clone(),
                    weapons: destroyed,
                });
                MissionOutcome::WeaponsDestroyed(destroyed)
            }
            Mission::Steal => {
                let stolen = target.economy.lose(target.economy.gold() / 4);
                source.economy.deposit(stolen);
                target.record(KingdomEvent::RobbedBy {
                    source: source.name.clone(),
                    gold: stolen,
                });
                MissionOutcome::GoldStolen(stolen)
            }
        }
    } else {
        let alliance_broken = target.diplomacy.handle_espionage_failure(&source.name);
        target.record(KingdomEvent::SpiesCaught {
            source: source.name.clone(),
        });
        MissionOutcome::Detected { alliance_broken }
    };

    let event = if success {
        KingdomEvent::MissionSucceeded {
            mission: mission.to_string(),
            target: target.name.clone(),
        }
    } else {
        KingdomEvent::MissionDetected {
            mission: mission.to_string(),
            target: target.name.clone(),
        }
    };
    source.record(event);

    Ok(MissionReport {
        mission,
        target: target.name.clone(),
        delay,
        chance,
        outcome,
    })
}
