//! Population - morale and the four social classes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::config::PopulationConfig;
use crate::core::error::Shortfall;
use crate::core::random::RandomSource;

/// Morale below which peasants and merchants may riot
pub const CLASS_CONFLICT_MORALE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Peasants,
    Merchants,
    Nobility,
    Military,
}

impl ClassKind {
    pub const ALL: [ClassKind; 4] = [Self::Peasants, Self::Merchants, Self::Nobility, Self::Military];

    /// Fixed weight each class gives its vote
    pub fn satisfaction(&self) -> f64 {
        match self {
            Self::Peasants => 0.75,
            Self::Merchants => 0.85,
            Self::Nobility => 0.95,
            Self::Military => 0.9,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Peasants => "Peasants",
            Self::Merchants => "Merchants",
            Self::Nobility => "Nobility",
            Self::Military => "Military",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Peasants => 0,
            Self::Merchants => 1,
            Self::Nobility => 2,
            Self::Military => 3,
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClassKind {
    type Err = Shortfall;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.name() == s)
            .ok_or_else(|| Shortfall::UnknownClass(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SocialClass {
    pub kind: ClassKind,
    pub size: i64,
}

impl SocialClass {
    pub fn satisfaction(&self) -> f64 {
        self.kind.satisfaction()
    }

    /// Voting weight: satisfaction × size
    pub fn vote_weight(&self) -> f64 {
        self.satisfaction() * self.size as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    morale: f64,
    classes: [SocialClass; 4],
}

impl Default for Population {
    fn default() -> Self {
        Self::from_config(&PopulationConfig::default())
    }
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PopulationConfig) -> Self {
        let sizes = [config.peasants, config.merchants, config.nobility, config.military];
        let classes = ClassKind::ALL.map(|kind| SocialClass {
            kind,
            size: sizes[kind.index()].max(0),
        });
        Self {
            morale: config.morale.clamp(0.0, 1.0),
            classes,
        }
    }

    /// Shift morale, clamped to [0, 1]
    pub fn adjust_morale(&mut self, delta: f64) {
        self.morale = (self.morale + delta).clamp(0.0, 1.0);
    }

    /// Grow or shrink a class; sizes clamp at zero
    pub fn adjust_class_size(&mut self, kind: ClassKind, delta: i64) {
        let class = &mut self.classes[kind.index()];
        class.size = class.size.saturating_add(delta).max(0);
    }

    /// Same as [`adjust_class_size`](Self::adjust_class_size) for a class named by the player
    pub fn adjust_class_size_by_name(&mut self, name: &str, delta: i64) -> Result<(), Shortfall> {
        let kind: ClassKind = name.parse()?;
        self.adjust_class_size(kind, delta);
        Ok(())
    }

    /// Riots when morale is low: 30% chance below [`CLASS_CONFLICT_MORALE`]
    ///
    /// Peasants lose a tenth of their number and merchants half that; morale
    /// falls a further 0.15. Returns (peasants lost, merchants lost).
    pub fn handle_class_conflict(&mut self, rng: &mut impl RandomSource) -> Option<(i64, i64)> {
        if self.morale < CLASS_CONFLICT_MORALE && rng.roll(10) < 3 {
            let loss = self.class_size(ClassKind::Peasants) / 10;
            self.adjust_class_size(ClassKind::Peasants, -loss);
            self.adjust_class_size(ClassKind::Merchants, -loss / 2);
            self.adjust_morale(-0.15);
            tracing::warn!(loss, "class conflict");
            Some((loss, loss / 2))
        } else {
            None
        }
    }

    pub fn total_size(&self) -> i64 {
        self.classes.iter().map(|c| c.size).sum()
    }

    pub fn class_size(&self, kind: ClassKind) -> i64 {
        self.classes[kind.index()].size
    }

    pub fn morale(&self) -> f64 {
        self.morale
    }

    pub fn classes(&self) -> &[SocialClass; 4] {
        &self.classes
    }
}
