//! Market - resource prices, trade disruptions and the black market
//!
//! Quoted prices are the base price scaled by inflation and by whichever
//! disruptions are active. Inflation is passed in on every quote rather than
//! held by the market, so the market never outlives the rate it reads.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, Shortfall};
use crate::core::random::RandomSource;
use crate::core::types::{Resource, ResourceKind};
use crate::economy::inflation::Inflation;
use crate::economy::treasury::Economy;
use crate::society::population::Population;

/// Iron delivered by an active smuggler
pub const SMUGGLER_DELIVERY: i64 = 100;

/// Gold paid for a smuggler delivery
pub const SMUGGLER_FEE: i64 = 50;

/// Gold the trader guild demands when it makes demands
pub const GUILD_DEMAND: i64 = 200;

/// Disruptions re-rolled every price update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketFlags {
    pub boycott: bool,
    pub sanctions: bool,
    pub smuggler_active: bool,
    pub guild_demands: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub resource: ResourceKind,
    pub value: f64,
}

/// A completed purchase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Purchase {
    pub resource: ResourceKind,
    pub amount: i64,
    pub cost: i64,
}

/// What the guild took when it made demands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuildOutcome {
    Paid(i64),
    /// The treasury could not cover the demand; morale suffers anyway
    Refused,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    prices: [Price; 4],
    flags: MarketFlags,
}

impl Default for Market {
    fn default() -> Self {
        Self::new()
    }
}

impl Market {
    pub fn new() -> Self {
        let base = |resource: ResourceKind| Price {
            resource,
            value: match resource {
                ResourceKind::Food => 2.0,
                ResourceKind::Iron => 5.0,
                ResourceKind::Wood => 3.0,
                ResourceKind::Stone => 4.0,
            },
        };
        Self {
            prices: ResourceKind::ALL.map(base),
            flags: MarketFlags::default(),
        }
    }

    /// Drift every price by a whole percentage in [-10%, +10%], then
    /// re-roll the disruptions
    pub fn update_prices(&mut self, rng: &mut impl RandomSource) {
        for price in &mut self.prices {
            price.value *= 0.9 + f64::from(rng.roll(21)) / 100.0;
        }
        self.flags = MarketFlags {
            boycott: rng.one_in(10),
            sanctions: rng.one_in(15),
            smuggler_active: rng.one_in(20),
            guild_demands: rng.one_in(15),
        };
        tracing::info!(flags = ?self.flags, "market prices updated");
    }

    /// Quote a resource by name
    pub fn get_price(&self, resource: &str, inflation: &Inflation) -> Result<f64> {
        let kind: ResourceKind = resource.parse()?;
        Ok(self.price(kind, inflation))
    }

    /// Quote: base × inflation, then ×1.5 boycott, ×1.3 sanctions, ×0.8 smugglers
    pub fn price(&self, kind: ResourceKind, inflation: &Inflation) -> f64 {
        let mut price = self.base_price(kind) * inflation.rate();
        if self.flags.boycott {
            price *= 1.5;
        }
        if self.flags.sanctions {
            price *= 1.3;
        }
        if self.flags.smuggler_active {
            price *= 0.8;
        }
        price
    }

    pub fn base_price(&self, kind: ResourceKind) -> f64 {
        self.prices
            .iter()
            .find(|p| p.resource == kind)
            .map(|p| p.value)
            .unwrap_or_default()
    }

    /// Buy `amount` units at the current quote, paying whole gold (fractions dropped)
    pub fn buy_resource(
        &self,
        econ: &mut Economy,
        kind: ResourceKind,
        amount: i64,
        stockpile: &mut Resource,
        inflation: &Inflation,
    ) -> Result<Purchase> {
        if amount < 0 {
            return Err(Shortfall::NegativeAmount(amount).into());
        }
        let cost = (self.price(kind, inflation) * amount as f64) as i64;
        econ.spend(cost)?;
        stockpile.adjust(amount);
        tracing::info!(resource = %kind, amount, cost, "resource bought");
        Ok(Purchase {
            resource: kind,
            amount,
            cost,
        })
    }

    /// Take delivery from an active smuggler when the fee can be paid
    ///
    /// Returns the iron received.
    pub fn handle_smuggler(&self, econ: &mut Economy, stockpile: &mut Resource) -> Option<i64> {
        if !self.flags.smuggler_active {
            return None;
        }
        if econ.spend(SMUGGLER_FEE).is_err() {
            tracing::debug!("smuggler turned away, no gold for the fee");
            return None;
        }
        stockpile.adjust(SMUGGLER_DELIVERY);
        Some(SMUGGLER_DELIVERY)
    }

    /// Meet the trader guild's demands; morale drops 0.05 whether or not they are paid
    pub fn handle_guild_demands(&self, econ: &mut Economy, pop: &mut Population) -> Option<GuildOutcome> {
        if !self.flags.guild_demands {
            return None;
        }
        pop.adjust_morale(-0.05);
        let outcome = match econ.spend(GUILD_DEMAND) {
            Ok(()) => GuildOutcome::Paid(GUILD_DEMAND),
            Err(_) => GuildOutcome::Refused,
        };
        tracing::warn!(?outcome, "trader guild demands");
        Some(outcome)
    }

    pub fn is_smuggler_active(&self) -> bool {
        self.flags.smuggler_active
    }

    pub fn flags(&self) -> MarketFlags {
        self.flags
    }

    pub fn prices(&self) -> &[Price; 4] {
        &self.prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::{ScriptedRandom, SimRng};

    #[test]
    fn test_unknown_resource_is_shortfall() {
        let market = Market::new();
        let err = market.get_price("Gold", &Inflation::new()).unwrap_err();
        assert_eq!(err.shortfall(), Some(&Shortfall::UnknownResource("Gold".into())));
        assert!((market.get_price("Iron", &Inflation::new()).unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_flags_apply_in_order() {
        let mut market = Market::new();
        // Price rolls of 10 keep prices flat; then every flag fires
        market.update_prices(&mut ScriptedRandom::with_rolls([10, 10, 10, 10, 0, 0, 0, 0]));
        assert_eq!(
            market.flags(),
            MarketFlags {
                boycott: true,
                sanctions: true,
                smuggler_active: true,
                guild_demands: true,
            }
        );
        let quote = market.price(ResourceKind::Food, &Inflation::new());
        assert!((quote - 2.0 * 1.5 * 1.3 * 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_price_drift_bounded() {
        let mut market = Market::new();
        let mut rng = SimRng::seeded(3);
        let before = market.base_price(ResourceKind::Stone);
        market.update_prices(&mut rng);
        let after = market.base_price(ResourceKind::Stone);
        let ratio = after / before;
        assert!((0.9 - 1e-9..=1.1 + 1e-9).contains(&ratio));
    }

    #[test]
    fn test_buy_truncates_and_credits() {
        let market = Market::new();
        let mut econ = Economy::new(100);
        let mut wood = Resource::new(0);
        let purchase = market
            .buy_resource(&mut econ, ResourceKind::Wood, 7, &mut wood, &Inflation::new())
            .unwrap();
        assert_eq!(purchase.cost, 21);
        assert_eq!(econ.gold(), 79);
        assert_eq!(wood.get(), 7);
    }

    #[test]
    fn test_buy_is_atomic_when_unaffordable() {
        let market = Market::new();
        let mut econ = Economy::new(10);
        let mut iron = Resource::new(5);
        assert!(market
            .buy_resource(&mut econ, ResourceKind::Iron, 3, &mut iron, &Inflation::new())
            .is_err());
        assert_eq!(econ.gold(), 10);
        assert_eq!(iron.get(), 5);
    }

    #[test]
    fn test_smuggler_and_guild_only_when_flagged() {
        let mut market = Market::new();
        let mut econ = Economy::new(1000);
        let mut iron = Resource::new(0);
        let mut pop = Population::new();
        assert_eq!(market.handle_smuggler(&mut econ, &mut iron), None);
        assert_eq!(market.handle_guild_demands(&mut econ, &mut pop), None);

        market.update_prices(&mut ScriptedRandom::with_rolls([10, 10, 10, 10, 9, 14, 0, 0]));
        assert_eq!(market.handle_smuggler(&mut econ, &mut iron), Some(100));
        assert_eq!(iron.get(), 100);
        assert_eq!(
            market.handle_guild_demands(&mut econ, &mut pop),
            Some(GuildOutcome::Paid(200))
        );
        assert_eq!(econ.gold(), 750);
        assert!((pop.morale() - 0.80).abs() < 1e-9);
    }

    #[test]
    fn test_guild_refused_when_broke() {
        let mut market = Market::new();
        market.update_prices(&mut ScriptedRandom::with_rolls([10, 10, 10, 10, 9, 14, 19, 0]));
        let mut econ = Economy::new(150);
        let mut pop = Population::new();
        assert_eq!(
            market.handle_guild_demands(&mut econ, &mut pop),
            Some(GuildOutcome::Refused)
        );
        assert_eq!(econ.gold(), 150);
        assert!((pop.morale() - 0.80).abs() < 1e-9);
    }

    #[test]
    fn test_negative_purchase_is_refused() {
        let market = Market::new();
        let mut econ = Economy::new(1000);
        let mut food = Resource::new(1000);
        let err = market
            .buy_resource(&mut econ, ResourceKind::Food, -300, &mut food, &Inflation::new())
            .unwrap_err();
        assert_eq!(err.shortfall(), Some(&Shortfall::NegativeAmount(-300)));
        assert_eq!(econ.gold(), 1000);
        assert_eq!(food.get(), 1000);
    }
}
