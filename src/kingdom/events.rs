//! Events and the kingdom chronicle

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::realm::weather::WeatherKind;
use crate::society::corruption::CorruptionFlags;

/// Something that happened to a kingdom
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum KingdomEvent {
    // Turn upkeep
    WeatherHarvest { weather: WeatherKind, food: i64 },
    TaxesCollected { amount: i64 },
    MarketCrash { gold_lost: i64 },
    BankCorruption,
    LandSeized { cell: (i32, i32), gold_lost: i64 },
    SoldiersUnpaid,
    Desertion { deserters: i64 },
    CorruptionSpreads { offices: CorruptionFlags },
    Bankruptcy { gold_lost: i64 },
    ClassConflict { peasants_lost: i64, merchants_lost: i64 },
    Rebellion { peasants_lost: i64, gold_lost: i64 },
    EnemyAttack { food_lost: i64 },
    SmugglerDelivery { iron: i64 },
    GuildPaid { gold: i64 },
    GuildRefused,

    // Random events
    Plague { deaths: i64 },
    BanditRaid { gold_lost: i64 },
    BumperHarvest,
    Drought,
    Sanctions,
    AssassinationAttempt { candidate: String },
    RevoltRisk,
    NobleUprising { nobles_lost: i64 },
    SpyInfiltration,

    // Player actions with lasting consequences
    Crowned { king: String },
    CorruptionAudited { cleared: CorruptionFlags },
    BankAudited,
    MissionSucceeded { mission: String, target: String },
    MissionDetected { mission: String, target: String },
    SpiesCaught { source: String },
    RobbedBy { source: String, gold: i64 },
    SabotagedBy { source: String, weapons: i64 },
    SmuggledFrom { target: String, iron: i64 },
    SmugglingSeized { target: String, penalty: i64 },
}

impl KingdomEvent {
    /// Disasters and losses, as opposed to neutral or good news
    pub fn is_adverse(&self) -> bool {
        !matches!(
            self,
            Self::TaxesCollected { .. }
                | Self::SmugglerDelivery { .. }
                | Self::GuildPaid { .. }
                | Self::BumperHarvest
                | Self::Crowned { .. }
                | Self::CorruptionAudited { .. }
                | Self::BankAudited
                | Self::MissionSucceeded { .. }
                | Self::SmuggledFrom { .. }
        ) && !matches!(self, Self::WeatherHarvest { food, .. } if *food > 0)
    }
}

impl fmt::Display for KingdomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeatherHarvest { weather, food } if *food < 0 => {
                write!(f, "{} reduced food by {}!", weather, -food)
            }
            Self::WeatherHarvest { weather, food } => write!(f, "{} increased food by {}!", weather, food),
            Self::TaxesCollected { amount } => write!(f, "Collected {} gold in taxes.", amount),
            Self::MarketCrash { gold_lost } => write!(f, "Market crash! Lost {} gold.", gold_lost),
            Self::BankCorruption => f.write_str("Bank corruption detected!"),
            Self::LandSeized { cell, gold_lost } => write!(
                f,
                "Bank seized land at ({}, {}) due to unpaid loans and took {} gold!",
                cell.0, cell.1, gold_lost
            ),
            Self::SoldiersUnpaid => f.write_str("Not enough gold to pay soldiers! Army morale drops."),
            Self::Desertion { deserters } => write!(f, "Low army morale! {} soldiers desert.", deserters),
            Self::CorruptionSpreads { offices } => {
                let mut names = Vec::new();
                if offices.army {
                    names.push("army");
                }
                if offices.politics {
                    names.push("politics");
                }
                if offices.blacksmith {
                    names.push("blacksmith");
                }
                write!(f, "Corruption spreads in the {}.", names.join(" and "))
            }
            Self::Bankruptcy { gold_lost } => {
                write!(f, "Inflation caused bankruptcy! Treasury lost {} gold.", gold_lost)
            }
            Self::ClassConflict {
                peasants_lost,
                merchants_lost,
            } => write!(
                f,
                "Class conflict! {} peasants and {} merchants lost.",
                peasants_lost, merchants_lost
            ),
            Self::Rebellion {
                peasants_lost,
                gold_lost,
            } => write!(
                f,
                "Rebellion! {} peasants revolt and the treasury loses {} gold!",
                peasants_lost, gold_lost
            ),
            Self::EnemyAttack { food_lost } => write!(f, "Enemy attack! Lost {} food.", food_lost),
            Self::SmugglerDelivery { iron } => write!(f, "Smuggler delivered {} iron.", iron),
            Self::GuildPaid { gold } => write!(f, "Trader guild demands {} gold; morale drops.", gold),
            Self::GuildRefused => f.write_str("Trader guild demands refused for lack of gold; morale drops."),
            Self::Plague { deaths } => write!(f, "Plague spreads! {} peasants die.", deaths),
            Self::BanditRaid { gold_lost } => write!(f, "Bandits raid the treasury for {} gold!", gold_lost),
            Self::BumperHarvest => f.write_str("Bumper harvest! Food increases."),
            Self::Drought => f.write_str("Drought! Food supply decreases."),
            Self::Sanctions => f.write_str("Sanctions imposed! Market prices shift."),
            Self::AssassinationAttempt { candidate } => {
                write!(f, "Assassination attempt on the king! {} corrupted.", candidate)
            }
            Self::RevoltRisk => f.write_str("Revolt risk rises!"),
            Self::NobleUprising { nobles_lost } => {
                write!(f, "Noble uprising! {} nobles lost.", nobles_lost)
            }
            Self::SpyInfiltration => f.write_str("Spy infiltration! General corrupted."),
            Self::Crowned { king } => write!(f, "{} takes the throne.", king),
            Self::CorruptionAudited { cleared } if cleared.any() => f.write_str("Audit cleared corruption."),
            Self::CorruptionAudited { .. } => f.write_str("Audit found no corruption."),
            Self::BankAudited => f.write_str("Bank audit cleared corruption."),
            Self::MissionSucceeded { mission, target } => {
                write!(f, "{} against {} succeeded.", mission, target)
            }
            Self::MissionDetected { mission, target } => {
                write!(f, "{} against {} failed; spies detected.", mission, target)
            }
            Self::SpiesCaught { source } => write!(f, "Caught spies from {}!", source),
            Self::RobbedBy { source, gold } => write!(f, "{} stole {} gold!", source, gold),
            Self::SabotagedBy { source, weapons } => {
                write!(f, "{} sabotaged {} weapons!", source, weapons)
            }
            Self::SmuggledFrom { target, iron } => write!(f, "Smuggled {} iron out of {}.", iron, target),
            Self::SmugglingSeized { target, penalty } => {
                write!(f, "Goods bound for {} seized; paid {} gold.", target, penalty)
            }
        }
    }
}

/// An event stamped with the turn it happened on
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChronicleEntry {
    pub turn: u32,
    pub event: KingdomEvent,
}

/// Entries kept before the oldest are dropped
pub const CHRONICLE_CAPACITY: usize = 1000;

/// What has happened to one kingdom, most recent [`CHRONICLE_CAPACITY`] entries
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Chronicle {
    entries: Vec<ChronicleEntry>,
}

impl Chronicle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, turn: u32, event: KingdomEvent) {
        if event.is_adverse() {
            tracing::warn!(turn, %event, "chronicle");
        } else {
            tracing::info!(turn, %event, "chronicle");
        }
        self.entries.push(ChronicleEntry { turn, event });
        if self.entries.len() > CHRONICLE_CAPACITY {
            let excess = self.entries.len() - CHRONICLE_CAPACITY;
            self.entries.drain(..excess);
        }
    }

    pub fn entries(&self) -> &[ChronicleEntry] {
        &self.entries
    }

    pub fn events_for_turn(&self, turn: u32) -> impl Iterator<Item = &KingdomEvent> {
        self.entries.iter().filter(move |e| e.turn == turn).map(|e| &e.event)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
