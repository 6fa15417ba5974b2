//! Named actors that can be bought

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct General {
    name: String,
    loyalty: f64,
    corrupted: bool,
}

impl General {
    pub fn new(name: impl Into<String>, loyalty: f64) -> Self {
        Self {
            name: name.into(),
            loyalty,
            corrupted: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn loyalty(&self) -> f64 {
        self.loyalty
    }

    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }

    pub fn set_corrupted(&mut self, corrupted: bool) {
        self.corrupted = corrupted;
    }
}

/// How a claimant to the throne would rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RulingStyle {
    Diplomatic,
    Economic,
    Aggressive,
}

impl fmt::Display for RulingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Diplomatic => "Diplomatic",
            Self::Economic => "Economic",
            Self::Aggressive => "Aggressive",
        };
        f.write_str(name)
    }
}

/// A candidate for the throne
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct King {
    name: String,
    approval: f64,
    style: RulingStyle,
    corrupted: bool,
}

impl King {
    pub fn new(name: impl Into<String>, approval: f64, style: RulingStyle) -> Self {
        Self {
            name: name.into(),
            approval,
            style,
            corrupted: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn approval(&self) -> f64 {
        self.approval
    }

    pub fn style(&self) -> RulingStyle {
        self.style
    }

    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }

    pub fn set_corrupted(&mut self, corrupted: bool) {
        self.corrupted = corrupted;
    }
}
