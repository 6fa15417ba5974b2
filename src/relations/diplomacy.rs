//! Diplomacy - alliances, trade agreements and secure routes

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::Shortfall;

/// Alliance slots; a broken alliance keeps its slot
pub const MAX_ALLIANCES: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alliance {
    pub kingdom: String,
    pub active: bool,
    pub trade: bool,
    pub secure_route: bool,
}

/// Diplomacy menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiplomacyAction {
    FormAlliance,
    BreakAlliance,
    FormTradeAgreement,
    EstablishSecureRoute,
}

impl DiplomacyAction {
    pub fn from_choice(choice: u32) -> Result<Self, Shortfall> {
        match choice {
            1 => Ok(Self::FormAlliance),
            2 => Ok(Self::BreakAlliance),
            3 => Ok(Self::FormTradeAgreement),
            4 => Ok(Self::EstablishSecureRoute),
            _ => Err(Shortfall::InvalidChoice {
                menu: "diplomacy",
                choice,
            }),
        }
    }
}

/// What a diplomatic move achieved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiplomacyReport {
    AllianceFormed(String),
    /// Every slot is taken
    AllianceRefused(String),
    AllianceBroken(String),
    NoSuchAlliance(String),
    TradeAgreement(String),
    SecureRoute(String),
}

impl fmt::Display for DiplomacyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllianceFormed(k) => write!(f, "Alliance formed with {}!", k),
            Self::AllianceRefused(k) => write!(f, "Cannot form more alliances ({} refused).", k),
            Self::AllianceBroken(k) => write!(f, "Alliance broken with {}.", k),
            Self::NoSuchAlliance(k) => write!(f, "No alliance with {}.", k),
            Self::TradeAgreement(k) => write!(f, "Trade agreement formed with {}!", k),
            Self::SecureRoute(k) => write!(f, "Secure trade route established with {}!", k),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diplomacy {
    alliances: Vec<Alliance>,
}

impl Diplomacy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: DiplomacyAction, kingdom: &str) -> Result<DiplomacyReport, Shortfall> {
        match action {
            DiplomacyAction::FormAlliance => Ok(self.form_alliance(kingdom)),
            DiplomacyAction::BreakAlliance => Ok(self.break_alliance(kingdom)),
            DiplomacyAction::FormTradeAgreement => self.form_trade_agreement(kingdom),
            DiplomacyAction::EstablishSecureRoute => self.establish_secure_route(kingdom),
        }
    }

    pub fn form_alliance(&mut self, kingdom: &str) -> DiplomacyReport {
        if self.alliances.len() >= MAX_ALLIANCES {
            tracing::info!(kingdom, "alliance refused, no free slot");
            return DiplomacyReport::AllianceRefused(kingdom.to_string());
        }
        self.alliances.push(Alliance {
            kingdom: kingdom.to_string(),
            active: true,
            trade: false,
            secure_route: false,
        });
        tracing::info!(kingdom, "alliance formed");
        DiplomacyReport::AllianceFormed(kingdom.to_string())
    }

    pub fn break_alliance(&mut self, kingdom: &str) -> DiplomacyReport {
        match self.find_mut(kingdom) {
            Some(alliance) => {
                alliance.sever();
                tracing::info!(kingdom, "alliance broken");
                DiplomacyReport::AllianceBroken(kingdom.to_string())
            }
            None => DiplomacyReport::NoSuchAlliance(kingdom.to_string()),
        }
    }

    pub fn form_trade_agreement(&mut self, kingdom: &str) -> Result<DiplomacyReport, Shortfall> {
        self.find_active_mut(kingdom)?.trade = true;
        tracing::info!(kingdom, "trade agreement formed");
        Ok(DiplomacyReport::TradeAgreement(kingdom.to_string()))
    }

    pub fn establish_secure_route(&mut self, kingdom: &str) -> Result<DiplomacyReport, Shortfall> {
        self.find_active_mut(kingdom)?.secure_route = true;
        tracing::info!(kingdom, "secure route established");
        Ok(DiplomacyReport::SecureRoute(kingdom.to_string()))
    }

    /// Spies from `source` were caught: everything agreed with them is void.
    /// Returns whether there was anything to break.
    pub fn handle_espionage_failure(&mut self, source: &str) -> bool {
        match self.find_mut(source) {
            Some(alliance) => {
                alliance.sever();
                tracing::warn!(source, "espionage detected, alliance broken");
                true
            }
            None => false,
        }
    }

    pub fn has_alliance(&self, kingdom: &str) -> bool {
        self.alliances.iter().any(|a| a.kingdom == kingdom && a.active)
    }

    pub fn has_secure_route(&self, kingdom: &str) -> bool {
        self.alliances.iter().any(|a| a.kingdom == kingdom && a.secure_route)
    }

    /// Number of alliances still active
    pub fn alliance_count(&self) -> usize {
        self.alliances.iter().filter(|a| a.active).count()
    }

    pub fn alliances(&self) -> &[Alliance] {
        &self.alliances
    }

    fn find_mut(&mut self, kingdom: &str) -> Option<&mut Alliance> {
        self.alliances.iter_mut().find(|a| a.kingdom == kingdom)
    }

    fn find_active_mut(&mut self, kingdom: &str) -> Result<&mut Alliance, Shortfall> {
        self.alliances
            .iter_mut()
            .find(|a| a.kingdom == kingdom && a.active)
            .ok_or_else(|| Shortfall::NoAlliance(kingdom.to_string()))
    }
}

impl Alliance {
    fn sever(&mut self) {
        self.active = false;
        self.trade = false;
        self.secure_route = false;
    }
}
