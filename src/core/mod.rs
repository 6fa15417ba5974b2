pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::KingdomConfig;
pub use error::{KingdomError, Result, Shortfall};
pub use random::{RandomSource, ScriptedRandom, SimRng};
pub use types::{Resource, ResourceKind};
