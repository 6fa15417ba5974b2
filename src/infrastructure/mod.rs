//! Public works: hospitals and barracks

pub mod buildings;
pub mod construction;
pub mod healthcare;

pub use buildings::{BuildingAction, Buildings};
pub use construction::{BuildCost, ConstructionReport};
pub use healthcare::{Healthcare, HealthcareAction};
