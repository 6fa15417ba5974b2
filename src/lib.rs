//! Stronghold - turn-based kingdom management simulation

pub mod core;
pub mod economy;
pub mod infrastructure;
pub mod kingdom;
pub mod military;
pub mod persistence;
pub mod realm;
pub mod relations;
pub mod society;

pub use crate::core::error::{KingdomError, Result, Shortfall};
pub use crate::kingdom::Kingdom;
