//! The kingdom: every subsystem, the turn pipeline and the player's actions
//!
//! A [`Kingdom`] owns one instance of each subsystem plus its four raw
//! stockpiles. Subsystems never hold references to one another; the kingdom
//! splits its own borrows and hands each operation exactly the pieces it
//! needs. Operations that involve two kingdoms take both as parameters.

pub mod actions;
pub mod events;
pub mod score;
pub mod status;
pub mod turn;
pub mod validation;

pub use actions::LoanAction;
pub use events::{Chronicle, ChronicleEntry, KingdomEvent};
pub use score::Score;
pub use status::{ClassStatus, KingdomStatus};
pub use turn::TurnReport;
pub use validation::ValidationWarning;

use crate::core::config::KingdomConfig;
use crate::core::types::{Resource, ResourceKind};
use crate::economy::{Bank, Economy, Inflation, Market};
use crate::infrastructure::{Buildings, Healthcare};
use crate::military::{Army, Blacksmith};
use crate::realm::{Map, Weather};
use crate::relations::{Communication, Diplomacy};
use crate::society::{Corruption, Politics, Population};

#[derive(Debug, Clone)]
pub struct Kingdom {
    pub(crate) name: String,
    pub(crate) food: Resource,
    pub(crate) iron: Resource,
    pub(crate) wood: Resource,
    pub(crate) stone: Resource,
    pub(crate) population: Population,
    pub(crate) economy: Economy,
    pub(crate) army: Army,
    pub(crate) bank: Bank,
    pub(crate) politics: Politics,
    pub(crate) blacksmith: Blacksmith,
    pub(crate) diplomacy: Diplomacy,
    pub(crate) communication: Communication,
    pub(crate) healthcare: Healthcare,
    pub(crate) buildings: Buildings,
    pub(crate) weather: Weather,
    pub(crate) inflation: Inflation,
    pub(crate) corruption: Corruption,
    pub(crate) map: Map,
    pub(crate) market: Market,
    pub(crate) chronicle: Chronicle,
}

impl Kingdom {
    /// A kingdom with the standard starting stores
    pub fn new(name: impl Into<String>, king: impl Into<String>) -> Self {
        Self::from_config(name, king, &KingdomConfig::default())
    }

    pub fn from_config(name: impl Into<String>, king: impl Into<String>, config: &KingdomConfig) -> Self {
        let stores = &config.stores;
        Self {
            name: name.into(),
            food: Resource::new(stores.food),
            iron: Resource::new(stores.iron),
            wood: Resource::new(stores.wood),
            stone: Resource::new(stores.stone),
            population: Population::from_config(&config.population),
            economy: Economy::new(stores.gold),
            army: Army::from_config(&config.army),
            bank: Bank::new(),
            politics: Politics::new(king),
            blacksmith: Blacksmith::new(),
            diplomacy: Diplomacy::new(),
            communication: Communication::new(),
            healthcare: Healthcare::new(),
            buildings: Buildings::new(),
            weather: Weather::new(),
            inflation: Inflation::new(),
            corruption: Corruption::new(),
            map: Map::new(),
            market: Market::new(),
            chronicle: Chronicle::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Turns played so far
    pub fn turn(&self) -> u32 {
        self.weather.turn_count()
    }

    pub fn resource(&self, kind: ResourceKind) -> i64 {
        match kind {
            ResourceKind::Food => self.food.get(),
            ResourceKind::Iron => self.iron.get(),
            ResourceKind::Wood => self.wood.get(),
            ResourceKind::Stone => self.stone.get(),
        }
    }

    pub fn food(&self) -> i64 {
        self.food.get()
    }

    pub fn iron(&self) -> i64 {
        self.iron.get()
    }

    pub fn wood(&self) -> i64 {
        self.wood.get()
    }

    pub fn stone(&self) -> i64 {
        self.stone.get()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn army(&self) -> &Army {
        &self.army
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn politics(&self) -> &Politics {
        &self.politics
    }

    pub fn blacksmith(&self) -> &Blacksmith {
        &self.blacksmith
    }

    pub fn diplomacy(&self) -> &Diplomacy {
        &self.diplomacy
    }

    pub fn communication(&self) -> &Communication {
        &self.communication
    }

    pub fn healthcare(&self) -> &Healthcare {
        &self.healthcare
    }

    pub fn buildings(&self) -> &Buildings {
        &self.buildings
    }

    pub fn weather(&self) -> &Weather {
        &self.weather
    }

    pub fn inflation(&self) -> &Inflation {
        &self.inflation
    }

    pub fn corruption(&self) -> &Corruption {
        &self.corruption
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn chronicle(&self) -> &Chronicle {
        &self.chronicle
    }

    pub fn score(&self) -> i64 {
        Score::of(self).total()
    }

    pub fn status(&self) -> KingdomStatus {
        KingdomStatus::capture(self)
    }

    pub(crate) fn record(&mut self, event: KingdomEvent) {
        let turn = self.turn();
        self.chronicle.record(turn, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_kingdom_starting_state() {
        let kingdom = Kingdom::new("Stormwind", "Harold");
        assert_eq!(kingdom.name(), "Stormwind");
        assert_eq!(
            (kingdom.food(), kingdom.iron(), kingdom.wood(), kingdom.stone()),
            (1000, 500, 800, 600)
        );
        assert_eq!(kingdom.economy().gold(), 1000);
        assert_eq!(kingdom.army().size(), 100);
        assert_eq!(kingdom.population().total_size(), 1000);
        assert_eq!(kingdom.politics().current_king(), "Harold");
        assert_eq!(kingdom.turn(), 0);
        assert!(kingdom.chronicle().is_empty());
    }

    #[test]
    fn test_config_overrides_stores() {
        let config = KingdomConfig::from_toml("[stores]\ngold = 50\niron = 5\n").unwrap();
        let kingdom = Kingdom::from_config("Tiny", "Pip", &config);
        assert_eq!(kingdom.economy().gold(), 50);
        assert_eq!(kingdom.resource(ResourceKind::Iron), 5);
        assert_eq!(kingdom.resource(ResourceKind::Food), 1000);
    }
}
