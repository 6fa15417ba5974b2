use thiserror::Error;

use crate::core::types::ResourceKind;

/// Why a gated action could not go ahead
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Shortfall {
    #[error("insufficient gold: need {needed}, have {available}")]
    Gold { needed: i64, available: i64 },

    #[error("insufficient {kind}: need {needed}, have {available}")]
    Materials {
        kind: ResourceKind,
        needed: i64,
        available: i64,
    },

    #[error("insufficient population: need {needed}, have {available}")]
    Population { needed: i64, available: i64 },

    #[error("not enough soldiers: need {needed}, have {available}")]
    Soldiers { needed: i64, available: i64 },

    #[error("not enough weapons in stock: need {needed}, have {available}")]
    Weapons { needed: i64, available: i64 },

    #[error("amount cannot be negative: {0}")]
    NegativeAmount(i64),

    #[error("cannot repay {amount} against a loan of {loan}")]
    LoanOverpayment { amount: i64, loan: i64 },

    #[error("unknown resource: {0}")]
    UnknownResource(String),

    #[error("unknown population class: {0}")]
    UnknownClass(String),

    #[error("unknown candidate: {0}")]
    UnknownCandidate(String),

    #[error("invalid {menu} choice: {choice}")]
    InvalidChoice { menu: &'static str, choice: u32 },

    #[error("no alliance exists with {0}")]
    NoAlliance(String),

    #[error("no secure route to {0}")]
    NoSecureRoute(String),

    #[error("{0} already under construction")]
    AlreadyBuilding(&'static str),
}

#[derive(Error, Debug)]
pub enum KingdomError {
    #[error("insufficient resources: {0}")]
    ResourceShortfall(Shortfall),

    /// The audit fee itself could not be paid
    #[error("audit failed: {0}")]
    CorruptionAudit(Shortfall),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl KingdomError {
    /// The shortfall behind a gameplay error, if this is one
    pub fn shortfall(&self) -> Option<&Shortfall> {
        match self {
            Self::ResourceShortfall(s) | Self::CorruptionAudit(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Shortfall> for KingdomError {
    fn from(shortfall: Shortfall) -> Self {
        Self::ResourceShortfall(shortfall)
    }
}

pub type Result<T> = std::result::Result<T, KingdomError>;
