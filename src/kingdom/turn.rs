//! The per-turn update pipeline
//!
//! Steps run in a fixed order and each one sees what the previous left
//! behind. Rolls guarded by a threshold are only drawn when the threshold is
//! met, so the random stream a turn consumes depends on the kingdom's state.

use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;
use crate::economy::market::GuildOutcome;
use crate::kingdom::events::KingdomEvent;
use crate::kingdom::validation::{validate_kingdom, ValidationWarning};
use crate::kingdom::Kingdom;
use crate::society::ClassKind;

/// What one turn did to a kingdom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u32,
    pub events: Vec<KingdomEvent>,
    pub warnings: Vec<ValidationWarning>,
}

impl Kingdom {
    pub fn play_turn(&mut self, rng: &mut impl RandomSource) -> TurnReport {
        let mut events = Vec::new();

        // 1-2. Seasons turn and the weather feeds or floods the granaries
        self.weather.update(rng);
        let turn = self.weather.turn_count();
        tracing::debug!(
            kingdom = %self.name,
            turn,
            season = %self.weather.season(),
            weather = %self.weather.current(),
            "turn begins"
        );
        let food = self.weather.food_impact();
        self.food.adjust(food);
        if food != 0 {
            events.push(KingdomEvent::WeatherHarvest {
                weather: self.weather.current(),
                food,
            });
        }

        // 3-4. Treasury
        let amount = self.economy.collect_taxes(&mut self.population);
        events.push(KingdomEvent::TaxesCollected { amount });
        if let Some(gold_lost) = self.economy.trigger_market_crash(&mut self.population, rng) {
            events.push(KingdomEvent::MarketCrash { gold_lost });
        }

        // 5. Bank
        if self.bank.check_corruption(rng) {
            events.push(KingdomEvent::BankCorruption);
        }
        if let Some(seizure) = self.bank.seize_land(&mut self.economy, &mut self.map, rng) {
            events.push(KingdomEvent::LandSeized {
                cell: seizure.cell,
                gold_lost: seizure.gold_lost,
            });
        }

        // 6. Army upkeep
        let check = self.army.check_morale(&self.economy);
        if check.unpaid {
            events.push(KingdomEvent::SoldiersUnpaid);
        }
        if check.deserters > 0 {
            events.push(KingdomEvent::Desertion {
                deserters: check.deserters,
            });
        }
        self.army.apply_training_delay();

        // 7. Corruption
        let offices = self
            .corruption
            .check_corruption(rng, &mut self.army, &mut self.politics, &mut self.blacksmith);
        if offices.any() {
            events.push(KingdomEvent::CorruptionSpreads { offices });
        }

        // 8. Inflation
        if let Some(gold_lost) = self.inflation.update(&mut self.economy, &self.bank) {
            events.push(KingdomEvent::Bankruptcy { gold_lost });
        }

        // 9-10. Unrest
        if let Some((peasants_lost, merchants_lost)) = self.population.handle_class_conflict(rng) {
            events.push(KingdomEvent::ClassConflict {
                peasants_lost,
                merchants_lost,
            });
        }
        if let Some(rebellion) = self
            .politics
            .trigger_rebellion(&mut self.population, &mut self.economy, rng)
        {
            events.push(KingdomEvent::Rebellion {
                peasants_lost: rebellion.peasants_lost,
                gold_lost: rebellion.gold_lost,
            });
        }

        // 11. Raiders
        if let Some(food_lost) = self.map.enemy_attack(&mut self.food, rng) {
            events.push(KingdomEvent::EnemyAttack { food_lost });
        }

        // 12. Black market and guild
        if let Some(iron) = self.market.handle_smuggler(&mut self.economy, &mut self.iron) {
            events.push(KingdomEvent::SmugglerDelivery { iron });
        }
        match self.market.handle_guild_demands(&mut self.economy, &mut self.population) {
            Some(GuildOutcome::Paid(gold)) => events.push(KingdomEvent::GuildPaid { gold }),
            Some(GuildOutcome::Refused) => events.push(KingdomEvent::GuildRefused),
            None => {}
        }

        // 13. Fortune
        if let Some(event) = self.random_event(rng) {
            events.push(event);
        }

        for event in &events {
            self.chronicle.record(turn, event.clone());
        }

        // 14. Validation
        let warnings = validate_kingdom(self);

        TurnReport {
            turn,
            events,
            warnings,
        }
    }

    /// One of ten events, chosen by roll(10)
    ///
    /// Only a market crash that fails its own roll produces nothing.
    fn random_event(&mut self, rng: &mut impl RandomSource) -> Option<KingdomEvent> {
        let event = match rng.roll(10) {
            0 => {
                let exposed = self.population.total_size() / 5;
                let deaths = (exposed as f64 * (1.0 - self.healthcare.plague_reduction())) as i64;
                self.population.adjust_class_size(ClassKind::Peasants, -deaths);
                self.population.adjust_morale(-0.15);
                KingdomEvent::Plague { deaths }
            }
            1 => {
                let gold_lost = self.economy.lose(self.economy.gold() / 10);
                KingdomEvent::BanditRaid { gold_lost }
            }
            2 => {
                self.food.adjust(500);
                self.population.adjust_morale(0.1);
                KingdomEvent::BumperHarvest
            }
            3 => {
                self.food.adjust(-300);
                KingdomEvent::Drought
            }
            4 => {
                self.market.update_prices(rng);
                KingdomEvent::Sanctions
            }
            5 => {
                self.population.adjust_morale(-0.1);
                let index = rng.roll(self.politics.candidates().len() as u32) as usize;
                let candidate = self.politics.corrupt_candidate(index).to_string();
                KingdomEvent::AssassinationAttempt { candidate }
            }
            6 => {
                let gold_lost = self.economy.trigger_market_crash(&mut self.population, rng)?;
                KingdomEvent::MarketCrash { gold_lost }
            }
            7 => {
                self.population.adjust_morale(-0.05);
                KingdomEvent::RevoltRisk
            }
            8 => {
                let nobles_lost = self.population.class_size(ClassKind::Nobility) / 2;
                self.population.adjust_class_size(ClassKind::Nobility, -nobles_lost);
                self.population.adjust_morale(-0.1);
                KingdomEvent::NobleUprising { nobles_lost }
            }
            _ => {
                self.army.general_mut().set_corrupted(true);
                KingdomEvent::SpyInfiltration
            }
        };
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::KingdomConfig;
    use crate::core::random::ScriptedRandom;
    use crate::realm::WeatherKind;

    /// Rolls for a quiet turn on a fresh kingdom: clear weather, no crash,
    /// no bank corruption, no corruption, no raid, then the given event.
    fn quiet_turn(event: u32) -> ScriptedRandom {
        // weather, crash, bank, army, politics, blacksmith, enemy, event
        ScriptedRandom::with_rolls([0, 1, 1, 1, 1, 1, 5, event])
    }

    #[test]
    fn test_quiet_turn_collects_taxes() {
        let mut kingdom = Kingdom::new("Stormwind", "Harold");
        let mut rng = quiet_turn(7);
        let report = kingdom.play_turn(&mut rng);
        assert_eq!(report.turn, 1);
        assert_eq!(
            report.events,
            vec![KingdomEvent::TaxesCollected { amount: 100 }, KingdomEvent::RevoltRisk]
        );
        assert!(report.warnings.is_empty());
        assert_eq!(kingdom.economy().gold(), 1100);
        assert!((kingdom.population().morale() - 0.75).abs() < 1e-9);
        assert_eq!(rng.remaining(), (0, 0));
        assert_eq!(kingdom.chronicle().len(), 2);
    }

    #[test]
    fn test_flood_and_plague() {
        let mut kingdom = Kingdom::new("Stormwind", "Harold");
        let mut rng = ScriptedRandom::with_rolls([9, 1, 1, 1, 1, 1, 5, 0]);
        let report = kingdom.play_turn(&mut rng);
        assert_eq!(
            report.events[0],
            KingdomEvent::WeatherHarvest {
                weather: WeatherKind::Flood,
                food: -200,
            }
        );
        // 1000 / 5 = 200 exposed, 10% spared
        assert_eq!(report.events.last(), Some(&KingdomEvent::Plague { deaths: 180 }));
        assert_eq!(kingdom.food(), 800);
        assert_eq!(kingdom.population().class_size(ClassKind::Peasants), 520);
    }

    #[test]
    fn test_enemy_attack_takes_food() {
        let mut kingdom = Kingdom::new("Stormwind", "Harold");
        let mut rng = ScriptedRandom::with_rolls([0, 1, 1, 1, 1, 1, 0, 2]);
        let report = kingdom.play_turn(&mut rng);
        assert!(report.events.contains(&KingdomEvent::EnemyAttack { food_lost: 200 }));
        // 1000 - 200 + 500 harvest
        assert_eq!(kingdom.food(), 1300);
    }

    #[test]
    fn test_spy_infiltration_corrupts_general() {
        let mut kingdom = Kingdom::new("Stormwind", "Harold");
        let mut rng = quiet_turn(9);
        kingdom.play_turn(&mut rng);
        assert!(kingdom.army().general().is_corrupted());
    }

    #[test]
    fn test_failed_crash_event_records_nothing() {
        let mut kingdom = Kingdom::new("Stormwind", "Harold");
        let mut rng = quiet_turn(6).then_rolls([3]);
        let report = kingdom.play_turn(&mut rng);
        assert_eq!(report.events, vec![KingdomEvent::TaxesCollected { amount: 100 }]);
    }

    #[test]
    fn test_bandits_take_a_tenth_of_the_treasury() {
        let mut kingdom = Kingdom::new("Stormwind", "Harold");
        let report = kingdom.play_turn(&mut quiet_turn(1));
        assert_eq!(report.events.last(), Some(&KingdomEvent::BanditRaid { gold_lost: 110 }));
        assert_eq!(kingdom.economy().gold(), 990);
    }

    #[test]
    fn test_drought_dries_the_granary() {
        let mut kingdom = Kingdom::new("Stormwind", "Harold");
        let report = kingdom.play_turn(&mut quiet_turn(3));
        assert_eq!(report.events.last(), Some(&KingdomEvent::Drought));
        assert_eq!(kingdom.food(), 700);
    }

    #[test]
    fn test_assassination_attempt_corrupts_a_candidate() {
        let mut kingdom = Kingdom::new("Stormwind", "Harold");
        let mut rng = quiet_turn(5).then_rolls([1]);
        let report = kingdom.play_turn(&mut rng);
        assert_eq!(
            report.events.last(),
            Some(&KingdomEvent::AssassinationAttempt {
                candidate: "Eleanor".to_string()
            })
        );
        let corrupted: Vec<bool> = kingdom
            .politics
            .candidates()
            .iter()
            .map(|king| king.is_corrupted())
            .collect();
        assert_eq!(corrupted, vec![false, true, false]);
        assert!((kingdom.population().morale() - 0.70).abs() < 1e-9);
        assert_eq!(rng.remaining(), (0, 0));
    }

    #[test]
    fn test_noble_uprising_halves_the_nobility() {
        let mut kingdom = Kingdom::new("Stormwind", "Harold");
        let report = kingdom.play_turn(&mut quiet_turn(8));
        assert_eq!(report.events.last(), Some(&KingdomEvent::NobleUprising { nobles_lost: 25 }));
        assert_eq!(kingdom.population().class_size(ClassKind::Nobility), 25);
        assert!((kingdom.population().morale() - 0.70).abs() < 1e-9);
    }

    #[test]
    fn test_sanctions_arm_the_black_market_for_next_turn() {
        let mut kingdom = Kingdom::new("Stormwind", "Harold");
        // flat prices, no boycott or sanctions, smuggler and guild both active
        let mut rng = quiet_turn(4).then_rolls([10, 10, 10, 10, 9, 14, 0, 0]);
        let report = kingdom.play_turn(&mut rng);
        assert_eq!(report.events.last(), Some(&KingdomEvent::Sanctions));
        assert!(kingdom.market().flags().smuggler_active);
        assert!(kingdom.market().flags().guild_demands);
        assert_eq!(rng.remaining(), (0, 0));
        // nothing is delivered or demanded on the turn the flags are drawn
        assert_eq!(kingdom.iron(), 500);
        assert_eq!(kingdom.economy().gold(), 1100);

        let report = kingdom.play_turn(&mut quiet_turn(7));
        assert_eq!(
            report.events,
            vec![
                KingdomEvent::TaxesCollected { amount: 100 },
                KingdomEvent::SmugglerDelivery { iron: 100 },
                KingdomEvent::GuildPaid { gold: 200 },
                KingdomEvent::RevoltRisk,
            ]
        );
        // 1100 + 100 taxes - 50 smuggler - 200 guild
        assert_eq!(kingdom.economy().gold(), 950);
        assert_eq!(kingdom.iron(), 600);
        assert!((kingdom.population().morale() - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_guild_refused_by_an_empty_treasury() {
        let mut config = KingdomConfig::default();
        config.stores.gold = 0;
        let mut kingdom = Kingdom::from_config("Stormwind", "Harold", &config);
        kingdom
            .market
            .update_prices(&mut ScriptedRandom::with_rolls([10, 10, 10, 10, 9, 14, 0, 0]));

        let report = kingdom.play_turn(&mut quiet_turn(7));
        assert_eq!(
            report.events,
            vec![
                KingdomEvent::TaxesCollected { amount: 100 },
                KingdomEvent::SoldiersUnpaid,
                KingdomEvent::SmugglerDelivery { iron: 100 },
                KingdomEvent::GuildRefused,
                KingdomEvent::RevoltRisk,
            ]
        );
        assert_eq!(kingdom.economy().gold(), 50);
        assert!((kingdom.population().morale() - 0.70).abs() < 1e-9);
    }

    #[test]
    fn test_unpaid_army_deserts_over_turns() {
        let mut config = KingdomConfig::default();
        config.stores.gold = 0;
        config.army.soldiers = 1000;
        let mut kingdom = Kingdom::from_config("Stormwind", "Harold", &config);

        // harvests keep the people content so no unrest rolls are drawn
        for _ in 0..5 {
            let report = kingdom.play_turn(&mut quiet_turn(2));
            assert!(report.events.contains(&KingdomEvent::SoldiersUnpaid));
            assert!(!report
                .events
                .iter()
                .any(|e| matches!(e, KingdomEvent::Desertion { .. })));
        }
        let report = kingdom.play_turn(&mut quiet_turn(2));
        assert_eq!(
            report.events,
            vec![
                KingdomEvent::TaxesCollected { amount: 100 },
                KingdomEvent::SoldiersUnpaid,
                KingdomEvent::Desertion { deserters: 100 },
                KingdomEvent::BumperHarvest,
            ]
        );
        assert_eq!(kingdom.army().size(), 900);
    }

    #[test]
    fn test_runaway_inflation_ends_in_bankruptcy() {
        let mut kingdom = Kingdom::new("Stormwind", "Harold");
        // loan over 1000 and debt reliance over 1000: +0.15 a turn
        kingdom.take_loan(1500).unwrap();
        kingdom.economy.increase_debt_reliance(600);

        for _ in 0..6 {
            let report = kingdom.play_turn(&mut quiet_turn(2));
            assert!(!report
                .events
                .iter()
                .any(|e| matches!(e, KingdomEvent::Bankruptcy { .. })));
        }
        let report = kingdom.play_turn(&mut quiet_turn(2));
        assert_eq!(
            report.events,
            vec![
                KingdomEvent::TaxesCollected { amount: 100 },
                KingdomEvent::Bankruptcy { gold_lost: 1600 },
                KingdomEvent::BumperHarvest,
            ]
        );
        assert_eq!(kingdom.economy().gold(), 1600);
        assert!((kingdom.inflation().rate() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_turns_advance_seasons() {
        let mut kingdom = Kingdom::new("Stormwind", "Harold");
        for expected in 1..=4 {
            let mut rng = quiet_turn(7);
            assert_eq!(kingdom.play_turn(&mut rng).turn, expected);
        }
        assert_eq!(kingdom.turn(), 4);
    }
}
