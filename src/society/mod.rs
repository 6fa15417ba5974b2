//! People and power: population, the throne and those who can be bought

pub mod corruption;
pub mod figures;
pub mod politics;
pub mod population;

pub use corruption::{Corruption, CorruptionFlags};
pub use figures::{General, King, RulingStyle};
pub use politics::{ElectionOutcome, Politics, Pressure};
pub use population::{ClassKind, Population, SocialClass};
