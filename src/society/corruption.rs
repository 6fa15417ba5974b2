//! Corruption ledger - who has been bought, and the audit that cleans house

use serde::{Deserialize, Serialize};

use crate::core::error::{KingdomError, Result};
use crate::core::random::RandomSource;
use crate::economy::treasury::Economy;
use crate::military::army::Army;
use crate::military::blacksmith::Blacksmith;
use crate::society::politics::Politics;

/// Fee for a full corruption audit
pub const AUDIT_FEE: i64 = 200;

/// Which offices turned corrupt, or were cleared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorruptionFlags {
    pub army: bool,
    pub politics: bool,
    pub blacksmith: bool,
}

impl CorruptionFlags {
    pub fn any(&self) -> bool {
        self.army || self.politics || self.blacksmith
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corruption {
    flags: CorruptionFlags,
}

impl Corruption {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll for new corruption in the army (1/10), politics (1/15) and the
    /// forge (1/12). All three rolls are always drawn. A hit marks both the
    /// ledger and the office itself.
    pub fn check_corruption(
        &mut self,
        rng: &mut impl RandomSource,
        army: &mut Army,
        politics: &mut Politics,
        blacksmith: &mut Blacksmith,
    ) -> CorruptionFlags {
        let fresh = CorruptionFlags {
            army: rng.one_in(10),
            politics: rng.one_in(15),
            blacksmith: rng.one_in(12),
        };
        if fresh.army {
            self.flags.army = true;
            army.general_mut().set_corrupted(true);
        }
        if fresh.politics {
            self.flags.politics = true;
            politics.set_corrupted(true);
        }
        if fresh.blacksmith {
            self.flags.blacksmith = true;
            blacksmith.set_corrupted(true);
        }
        if fresh.any() {
            tracing::warn!(?fresh, "corruption spreads");
        }
        fresh
    }

    /// Pay [`AUDIT_FEE`] and clear every office the ledger knows is corrupt
    ///
    /// If the fee cannot be paid the audit fails and nothing is cleared.
    /// Returns the offices that were cleaned.
    pub fn audit(
        &mut self,
        econ: &mut Economy,
        army: &mut Army,
        politics: &mut Politics,
        blacksmith: &mut Blacksmith,
    ) -> Result<CorruptionFlags> {
        econ.spend(AUDIT_FEE).map_err(KingdomError::CorruptionAudit)?;
        let cleared = self.flags;
        if cleared.army {
            army.general_mut().set_corrupted(false);
        }
        if cleared.politics {
            politics.clear_corruption();
        }
        if cleared.blacksmith {
            blacksmith.set_corrupted(false);
        }
        self.flags = CorruptionFlags::default();
        tracing::info!(?cleared, "corruption audit complete");
        Ok(cleared)
    }

    pub fn flags(&self) -> CorruptionFlags {
        self.flags
    }
}
