//! Weather system
//!
//! The season advances once per turn; the weather itself is redrawn every
//! turn. Weather feeds the harvest and slows covert operations.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;

/// Current weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeatherKind {
    #[default]
    Clear,
    Rain,
    Snow,
    Flood,
}

impl WeatherKind {
    /// Map a roll in `0..10` to weather: 30% clear, 30% rain, 20% snow, 20% flood
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..=2 => Self::Clear,
            3..=5 => Self::Rain,
            6..=7 => Self::Snow,
            _ => Self::Flood,
        }
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Clear => "Clear",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Flood => "Flood",
        };
        f.write_str(name)
    }
}

/// Season of the year, one per turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn from_turn(turn: u32) -> Self {
        match turn % 4 {
            0 => Self::Spring,
            1 => Self::Summer,
            2 => Self::Autumn,
            _ => Self::Winter,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Weather {
    season: Season,
    current: WeatherKind,
    turn_count: u32,
}

impl Weather {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one turn: cycle the season and redraw the weather
    pub fn update(&mut self, rng: &mut impl RandomSource) {
        self.turn_count += 1;
        self.season = Season::from_turn(self.turn_count);
        self.current = WeatherKind::from_roll(rng.roll(10));
        tracing::debug!(season = %self.season, weather = %self.current, "weather updated");
    }

    /// Food gained or lost from this turn's weather
    pub fn food_impact(&self) -> i64 {
        match (self.current, self.season) {
            (WeatherKind::Flood, _) => -200,
            (WeatherKind::Rain, Season::Spring) => 150,
            _ => 0,
        }
    }

    /// Extra travel time for covert operations
    pub fn delay_impact(&self) -> Duration {
        match self.current {
            WeatherKind::Snow => Duration::from_secs(1),
            _ => Duration::ZERO,
        }
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn current(&self) -> WeatherKind {
        self.current
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }
}
