//! Serializable snapshot of a kingdom

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::format_decimal;
use crate::economy::TaxPolicy;
use crate::kingdom::Kingdom;
use crate::realm::{Season, WeatherKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStatus {
    pub name: String,
    pub size: i64,
    pub satisfaction: f64,
}

/// Everything a player (or a spy) can learn about a kingdom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KingdomStatus {
    pub name: String,
    pub population: i64,
    pub morale: f64,
    pub classes: Vec<ClassStatus>,
    pub gold: i64,
    pub loan: i64,
    pub debt_reliance: i64,
    pub army: i64,
    pub army_morale: f64,
    pub weapons: i64,
    pub food: i64,
    pub iron: i64,
    pub wood: i64,
    pub stone: i64,
    pub blacksmith_level: u32,
    pub weapons_in_stock: i64,
    pub healthcare_level: u32,
    pub plague_reduction: f64,
    pub barracks_level: u32,
    pub training_efficiency: f64,
    pub season: Season,
    pub weather: WeatherKind,
    pub inflation: f64,
    pub king: String,
    pub tax: TaxPolicy,
    pub land_seized: u32,
    pub score: i64,
    pub map: Vec<String>,
}

impl KingdomStatus {
    pub fn capture(kingdom: &Kingdom) -> Self {
        let population = kingdom.population();
        let classes = population
            .classes()
            .iter()
            .map(|class| ClassStatus {
                name: class.kind.name().to_string(),
                size: class.size,
                satisfaction: class.satisfaction(),
            })
            .collect();
        Self {
            name: kingdom.name().to_string(),
            population: population.total_size(),
            morale: population.morale(),
            classes,
            gold: kingdom.economy().gold(),
            loan: kingdom.bank().loan(),
            debt_reliance: kingdom.economy().debt_reliance(),
            army: kingdom.army().size(),
            army_morale: kingdom.army().morale(),
            weapons: kingdom.army().weapons(),
            food: kingdom.food(),
            iron: kingdom.iron(),
            wood: kingdom.wood(),
            stone: kingdom.stone(),
            blacksmith_level: kingdom.blacksmith().level(),
            weapons_in_stock: kingdom.blacksmith().weapons_in_stock(),
            healthcare_level: kingdom.healthcare().level(),
            plague_reduction: kingdom.healthcare().plague_reduction(),
            barracks_level: kingdom.buildings().barracks_level(),
            training_efficiency: kingdom.buildings().training_efficiency(),
            season: kingdom.weather().season(),
            weather: kingdom.weather().current(),
            inflation: kingdom.inflation().rate(),
            king: kingdom.politics().current_king().to_string(),
            tax: kingdom.economy().tax_policy(),
            land_seized: kingdom.bank().land_seized(),
            score: kingdom.score(),
            map: kingdom.map().rows().collect(),
        }
    }
}

impl fmt::Display for KingdomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Kingdom Status ({}):", self.name)?;
        writeln!(f, "Population: {}, Morale: {}", self.population, format_decimal(self.morale))?;
        for class in &self.classes {
            writeln!(
                f,
                "  {}: {}, Satisfaction: {}",
                class.name,
                class.size,
                format_decimal(class.satisfaction)
            )?;
        }
        writeln!(
            f,
            "Gold: {}, Loan: {}, Debt Reliance: {}",
            self.gold, self.loan, self.debt_reliance
        )?;
        writeln!(
            f,
            "Army: {}, Morale: {}, Weapons: {}",
            self.army,
            format_decimal(self.army_morale),
            self.weapons
        )?;
        writeln!(
            f,
            "Resources: Food={}, Iron={}, Wood={}, Stone={}",
            self.food, self.iron, self.wood, self.stone
        )?;
        writeln!(
            f,
            "Blacksmith: Level={}, Weapons in stock={}",
            self.blacksmith_level, self.weapons_in_stock
        )?;
        writeln!(
            f,
            "Healthcare: Level={}, Plague Reduction={}%",
            self.healthcare_level,
            format_decimal(self.plague_reduction * 100.0)
        )?;
        writeln!(
            f,
            "Barracks: Level={}, Training Efficiency={}%",
            self.barracks_level,
            format_decimal(self.training_efficiency * 100.0)
        )?;
        writeln!(f, "Weather: {}, {}", self.season, self.weather)?;
        writeln!(f, "Inflation: {}", format_decimal(self.inflation))?;
        writeln!(f, "King: {}", self.king)?;
        writeln!(f, "Tax: {}", self.tax)?;
        writeln!(f, "Land Seized by Bank: {}", self.land_seized)?;
        writeln!(f, "Score: {} points", self.score)?;
        for row in &self.map {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
