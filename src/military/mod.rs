//! Soldiers and the forge that arms them

pub mod army;
pub mod blacksmith;

pub use army::{Army, MoraleCheck, TrainingOutcome};
pub use blacksmith::{Blacksmith, ProductionReport};
