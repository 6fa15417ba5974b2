//! Gold, debt and trade

pub mod bank;
pub mod inflation;
pub mod market;
pub mod treasury;

pub use bank::Bank;
pub use inflation::Inflation;
pub use market::{Market, MarketFlags, Purchase};
pub use treasury::{Economy, TaxPolicy};
