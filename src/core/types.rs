//! Core value types shared by every subsystem

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::Shortfall;

/// A quantity that never drops below zero
///
/// Adjustments clamp instead of failing; callers that need to refuse an
/// overdraft check `has` before adjusting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Resource(i64);

impl Resource {
    pub fn new(initial: i64) -> Self {
        Self(initial.max(0))
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    pub fn adjust(&mut self, delta: i64) {
        self.0 = self.0.saturating_add(delta).max(0);
    }

    pub fn has(&self, amount: i64) -> bool {
        self.0 >= amount
    }
}

/// The four raw materials a kingdom stores and the market trades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Food,
    Iron,
    Wood,
    Stone,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [Self::Food, Self::Iron, Self::Wood, Self::Stone];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Iron => "Iron",
            Self::Wood => "Wood",
            Self::Stone => "Stone",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = Shortfall;

    /// Names match exactly, as quoted by the market
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Shortfall::UnknownResource(s.to_string()))
    }
}

/// Render a float the way the save and score files expect: at most six
/// decimals, trailing zeros dropped
pub fn format_decimal(value: f64) -> String {
    let text = format!("{value:.6}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if matches!(trimmed, "" | "-" | "-0") {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
