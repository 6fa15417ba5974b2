//! Kingdom starting configuration
//!
//! Every starting quantity is collected here. The defaults reproduce the
//! classic two-kingdom game; a TOML file can override any section.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Configuration used to found a kingdom
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KingdomConfig {
    #[serde(default)]
    pub stores: StoresConfig,
    #[serde(default)]
    pub army: ArmyConfig,
    #[serde(default)]
    pub population: PopulationConfig,
}

/// Treasury and raw material stockpiles on founding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoresConfig {
    pub gold: i64,
    pub food: i64,
    pub iron: i64,
    pub wood: i64,
    pub stone: i64,
}

impl Default for StoresConfig {
    fn default() -> Self {
        Self {
            gold: 1000,
            food: 1000,
            iron: 500,
            wood: 800,
            stone: 600,
        }
    }
}

/// Standing army on founding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmyConfig {
    pub soldiers: i64,
    /// Weapons already carried by the army, separate from the blacksmith's stock
    pub weapons: i64,
    pub general: String,
}

impl Default for ArmyConfig {
    fn default() -> Self {
        Self {
            soldiers: 100,
            weapons: 100,
            general: "General Patton".to_string(),
        }
    }
}

/// Class sizes and starting morale
///
/// Satisfaction weights are fixed per class and not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub morale: f64,
    pub peasants: i64,
    pub merchants: i64,
    pub nobility: i64,
    pub military: i64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            morale: 0.85,
            peasants: 700,
            merchants: 200,
            nobility: 50,
            military: 50,
        }
    }
}

impl KingdomConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing sections and fields keep their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
