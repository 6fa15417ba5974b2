//! Dealings between kingdoms: treaties, letters, spies and smugglers

pub mod communication;
pub mod diplomacy;
pub mod espionage;
pub mod smuggling;

pub use communication::{Communication, Message};
pub use diplomacy::{Alliance, Diplomacy, DiplomacyAction, DiplomacyReport};
pub use espionage::{Mission, MissionOutcome, MissionReport};
pub use smuggling::{SmugglingOutcome, SmugglingReport};
