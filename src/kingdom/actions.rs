//! Player actions
//!
//! Each action hands the subsystem involved only what it needs. Gated
//! actions check every threshold before touching anything.

use crate::core::error::{Result, Shortfall};
use crate::core::random::RandomSource;
use crate::core::types::ResourceKind;
use crate::economy::{Purchase, TaxPolicy};
use crate::infrastructure::ConstructionReport;
use crate::kingdom::{Kingdom, KingdomEvent};
use crate::military::{ProductionReport, TrainingOutcome};
use crate::relations::espionage::{self, Mission, MissionReport};
use crate::relations::smuggling::{self, SmugglingReport};
use crate::relations::{DiplomacyAction, DiplomacyReport, Message};
use crate::society::{CorruptionFlags, ElectionOutcome, Pressure};

/// Treasury menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanAction {
    TakeLoan,
    RepayLoan,
    AuditCorruption,
    AuditBank,
    ToggleTaxPolicy,
}

impl LoanAction {
    pub fn from_choice(choice: u32) -> std::result::Result<Self, Shortfall> {
        match choice {
            1 => Ok(Self::TakeLoan),
            2 => Ok(Self::RepayLoan),
            3 => Ok(Self::AuditCorruption),
            4 => Ok(Self::AuditBank),
            5 => Ok(Self::ToggleTaxPolicy),
            _ => Err(Shortfall::InvalidChoice { menu: "loan", choice }),
        }
    }

    /// Whether the action takes a gold amount
    pub fn needs_amount(&self) -> bool {
        matches!(self, Self::TakeLoan | Self::RepayLoan)
    }
}

impl Kingdom {
    // Army and forge

    /// Train `count` soldiers, faster for every barracks built
    pub fn train_army(&mut self, count: i64) -> Result<TrainingOutcome> {
        let efficiency = self.buildings.training_efficiency();
        self.army.train(
            count,
            &mut self.population,
            &mut self.iron,
            &mut self.blacksmith,
            efficiency,
        )
    }

    pub fn produce_weapons(&mut self, count: i64) -> Result<ProductionReport> {
        self.blacksmith.produce_weapons(&mut self.iron, &mut self.wood, count)
    }

    pub fn upgrade_blacksmith(&mut self) -> Result<u32> {
        self.blacksmith.upgrade(&mut self.economy)
    }

    // Politics

    pub fn hold_election(&mut self, rng: &mut impl RandomSource) -> ElectionOutcome {
        let outcome = self.politics.hold_election(&mut self.population, rng);
        self.record(KingdomEvent::Crowned {
            king: outcome.king().to_string(),
        });
        outcome
    }

    pub fn bribe(&mut self, candidate: &str) -> Result<()> {
        self.politics.bribe(&mut self.economy, candidate)
    }

    pub fn blackmail(&mut self, candidate: &str) -> Result<()> {
        self.politics.blackmail(&mut self.economy, candidate)
    }

    pub fn apply_pressure(&mut self, pressure: Pressure, candidate: &str) -> Result<()> {
        self.politics.apply_pressure(pressure, &mut self.economy, candidate)
    }

    // Treasury

    pub fn take_loan(&mut self, amount: i64) -> Result<()> {
        self.bank.take_loan(&mut self.economy, amount)
    }

    pub fn repay_loan(&mut self, amount: i64) -> Result<()> {
        self.bank.repay_loan(&mut self.economy, amount)
    }

    pub fn audit_corruption(&mut self) -> Result<CorruptionFlags> {
        let cleared = self.corruption.audit(
            &mut self.economy,
            &mut self.army,
            &mut self.politics,
            &mut self.blacksmith,
        )?;
        self.record(KingdomEvent::CorruptionAudited { cleared });
        Ok(cleared)
    }

    pub fn audit_bank(&mut self) -> Result<()> {
        self.bank.audit(&mut self.economy)?;
        self.record(KingdomEvent::BankAudited);
        Ok(())
    }

    pub fn set_tax_policy(&mut self, policy: TaxPolicy) {
        self.economy.set_tax_policy(policy);
    }

    /// Run a treasury menu entry; `amount` is only read by loan actions
    pub fn manage_treasury(&mut self, action: LoanAction, amount: i64) -> Result<()> {
        match action {
            LoanAction::TakeLoan => self.take_loan(amount),
            LoanAction::RepayLoan => self.repay_loan(amount),
            LoanAction::AuditCorruption => self.audit_corruption().map(|_| ()),
            LoanAction::AuditBank => self.audit_bank(),
            LoanAction::ToggleTaxPolicy => {
                let next = match self.economy.tax_policy() {
                    TaxPolicy::Flat => TaxPolicy::Progressive,
                    TaxPolicy::Progressive => TaxPolicy::Flat,
                };
                self.set_tax_policy(next);
                Ok(())
            }
        }
    }

    // Trade

    /// Buy a resource by name at the current inflated quote
    pub fn buy_resource(&mut self, resource: &str, amount: i64) -> Result<Purchase> {
        let kind: ResourceKind = resource.parse()?;
        let stockpile = match kind {
            ResourceKind::Food => &mut self.food,
            ResourceKind::Iron => &mut self.iron,
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Stone => &mut self.stone,
        };
        self.market
            .buy_resource(&mut self.economy, kind, amount, stockpile, &self.inflation)
    }

    // Diplomacy

    pub fn form_alliance(&mut self, kingdom: &str) -> DiplomacyReport {
        self.diplomacy.form_alliance(kingdom)
    }

    pub fn break_alliance(&mut self, kingdom: &str) -> DiplomacyReport {
        self.diplomacy.break_alliance(kingdom)
    }

    pub fn form_trade_agreement(&mut self, kingdom: &str) -> Result<DiplomacyReport> {
        Ok(self.diplomacy.form_trade_agreement(kingdom)?)
    }

    pub fn establish_secure_route(&mut self, kingdom: &str) -> Result<DiplomacyReport> {
        Ok(self.diplomacy.establish_secure_route(kingdom)?)
    }

    pub fn manage_diplomacy(&mut self, action: DiplomacyAction, kingdom: &str) -> Result<DiplomacyReport> {
        Ok(self.diplomacy.apply(action, kingdom)?)
    }

    // Messages

    pub fn send_message(&mut self, recipient: &str, content: &str) -> bool {
        self.communication.send_message(recipient, content, false)
    }

    pub fn send_fake_trade_request(&mut self, recipient: &str) -> bool {
        self.communication.send_fake_trade_request(recipient)
    }

    /// Messages addressed to this kingdom, from its own log and from the
    /// logs of `correspondents`
    pub fn view_messages<'a>(&'a self, correspondents: &[&'a Kingdom]) -> Vec<&'a Message> {
        let name = self.name.as_str();
        std::iter::once(self)
            .chain(correspondents.iter().copied())
            .flat_map(|kingdom| kingdom.communication.messages_for(name))
            .collect()
    }

    // Public works

    pub fn build_hospital(&mut self) -> Result<ConstructionReport> {
        self.healthcare
            .build(&mut self.economy, &mut self.wood, &mut self.stone)
    }

    /// Returns the morale added
    pub fn provide_healthcare(&mut self) -> f64 {
        self.healthcare.provide_services(&mut self.population)
    }

    pub fn build_barracks(&mut self) -> Result<ConstructionReport> {
        self.buildings
            .build_barracks(&mut self.economy, &mut self.wood, &mut self.stone)
    }

    // Covert operations

    pub fn conduct_espionage(
        &mut self,
        mission: Mission,
        target: &mut Kingdom,
        rng: &mut impl RandomSource,
    ) -> Result<MissionReport> {
        espionage::conduct(mission, self, target, rng)
    }

    pub fn conduct_smuggling(&mut self, target: &mut Kingdom, rng: &mut impl RandomSource) -> Result<SmugglingReport> {
        smuggling::smuggle_goods(self, target, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::KingdomError;
    use crate::core::random::ScriptedRandom;
    use crate::society::ClassKind;

    fn kingdom() -> Kingdom {
        Kingdom::new("Stormwind", "Harold")
    }

    #[test]
    fn test_train_after_forging() {
        let mut k = kingdom();
        k.produce_weapons(20).unwrap();
        assert_eq!((k.iron(), k.wood()), (300, 700));
        let outcome = k.train_army(10).unwrap();
        assert!(matches!(outcome, TrainingOutcome::Trained { count: 10, .. }));
        assert_eq!(k.army().size(), 110);
        assert_eq!(k.iron(), 200);
        assert_eq!(k.blacksmith().weapons_in_stock(), 10);
        assert_eq!(k.population().class_size(ClassKind::Military), 60);
    }

    #[test]
    fn test_training_delay_changes_nothing() {
        let mut k = kingdom();
        k.produce_weapons(20).unwrap();
        k.train_army(5).unwrap();
        let before = (k.army().size(), k.iron(), k.blacksmith().weapons_in_stock());
        let outcome = k.train_army(5).unwrap();
        assert_eq!(outcome, TrainingOutcome::Delayed { turns_remaining: 1 });
        assert_eq!((k.army().size(), k.iron(), k.blacksmith().weapons_in_stock()), before);
    }

    #[test]
    fn test_barracks_speed_training() {
        let mut k = kingdom();
        k.build_barracks().unwrap();
        k.produce_weapons(10).unwrap();
        match k.train_army(10).unwrap() {
            // trunc(5 * 0.9)
            TrainingOutcome::Trained { duration, .. } => assert_eq!(duration.as_secs(), 4),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_buy_resource_by_name() {
        let mut k = kingdom();
        let purchase = k.buy_resource("Stone", 10).unwrap();
        assert_eq!(purchase.cost, 40);
        assert_eq!(k.stone(), 610);
        assert_eq!(k.economy().gold(), 960);

        let err = k.buy_resource("Gold", 1).unwrap_err();
        assert_eq!(err.shortfall(), Some(&Shortfall::UnknownResource("Gold".to_string())));
    }

    #[test]
    fn test_treasury_menu() {
        let mut k = kingdom();
        k.manage_treasury(LoanAction::TakeLoan, 500).unwrap();
        assert_eq!((k.economy().gold(), k.bank().loan()), (1500, 500));
        assert!(k.manage_treasury(LoanAction::RepayLoan, 600).is_err());
        k.manage_treasury(LoanAction::ToggleTaxPolicy, 0).unwrap();
        assert!(k.economy().is_progressive_tax());
        assert!(LoanAction::from_choice(6).is_err());
        assert!(LoanAction::TakeLoan.needs_amount());
        assert!(!LoanAction::AuditBank.needs_amount());
    }

    #[test]
    fn test_audit_with_empty_treasury() {
        let mut k = kingdom();
        k.army.general_mut().set_corrupted(true);
        k.economy.lose(1000);
        let err = k.audit_corruption().unwrap_err();
        assert!(matches!(err, KingdomError::CorruptionAudit(Shortfall::Gold { .. })));
        assert!(k.army().general().is_corrupted());
        assert!(k.chronicle().is_empty());
    }

    #[test]
    fn test_election_is_chronicled() {
        let mut k = kingdom();
        let mut rng = ScriptedRandom::with_rolls([3]);
        let outcome = k.hold_election(&mut rng);
        assert_eq!(outcome.king(), "Arthur");
        assert_eq!(
            k.chronicle().entries()[0].event,
            KingdomEvent::Crowned {
                king: "Arthur".to_string()
            }
        );
    }

    #[test]
    fn test_view_messages_across_kingdoms() {
        let mut home = kingdom();
        let mut rival = Kingdom::new("Ironhold", "Bram");
        rival.send_message("Stormwind", "Greetings");
        rival.send_fake_trade_request("Stormwind");
        rival.send_message("Elsewhere", "Not for you");
        home.send_message("Stormwind", "Note to self");
        let inbox: Vec<String> = home.view_messages(&[&rival]).iter().map(|m| m.to_string()).collect();
        assert_eq!(
            inbox,
            vec![
                "Note to self".to_string(),
                "Greetings".to_string(),
                "Trade Request: 100 Iron for 200 Gold (FAKE)".to_string(),
            ]
        );
    }

    #[test]
    fn test_hospital_then_services() {
        let mut k = kingdom();
        let report = k.build_hospital().unwrap();
        assert_eq!(report.level, 2);
        let boost = k.provide_healthcare();
        assert!((boost - 0.07).abs() < 1e-9);
        assert!((k.population().morale() - 0.92).abs() < 1e-9);
    }
}
