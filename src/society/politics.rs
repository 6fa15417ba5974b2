//! Politics - the throne, elections and rebellion

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, Shortfall};
use crate::core::random::RandomSource;
use crate::economy::treasury::Economy;
use crate::society::figures::{King, RulingStyle};
use crate::society::population::{ClassKind, Population};

pub const BRIBE_COST: i64 = 200;
pub const BLACKMAIL_COST: i64 = 300;

/// Debt reliance a blackmail campaign adds
pub const BLACKMAIL_DEBT: i64 = 50;

/// Morale below which rebellion becomes possible
pub const REBELLION_MORALE: f64 = 0.3;

/// Ways of leaning on voters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pressure {
    Bribe,
    Blackmail,
}

impl Pressure {
    pub fn from_choice(choice: u32) -> std::result::Result<Self, Shortfall> {
        match choice {
            1 => Ok(Self::Bribe),
            2 => Ok(Self::Blackmail),
            _ => Err(Shortfall::InvalidChoice {
                menu: "politics",
                choice,
            }),
        }
    }

    pub fn cost(&self) -> i64 {
        match self {
            Self::Bribe => BRIBE_COST,
            Self::Blackmail => BLACKMAIL_COST,
        }
    }
}

/// How an election ended
#[derive(Debug, Clone, PartialEq)]
pub enum ElectionOutcome {
    /// The sitting king was killed and a candidate seized the throne
    Assassination { king: String },
    /// A corrupt office picked the winner at random
    Rigged { king: String },
    /// Votes were counted, one total per candidate
    Vote { king: String, tally: Vec<f64> },
}

impl ElectionOutcome {
    pub fn king(&self) -> &str {
        match self {
            Self::Assassination { king } | Self::Rigged { king } | Self::Vote { king, .. } => king,
        }
    }
}

/// Losses from a peasant rebellion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rebellion {
    pub peasants_lost: i64,
    pub gold_lost: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Politics {
    current_king: String,
    candidates: [King; 3],
    corrupted: bool,
}

impl Politics {
    pub fn new(king_name: impl Into<String>) -> Self {
        Self {
            current_king: king_name.into(),
            candidates: [
                King::new("Arthur", 0.8, RulingStyle::Diplomatic),
                King::new("Eleanor", 0.75, RulingStyle::Economic),
                King::new("Richard", 0.7, RulingStyle::Aggressive),
            ],
            corrupted: false,
        }
    }

    fn random_candidate(&self, rng: &mut impl RandomSource) -> String {
        let index = rng.roll(self.candidates.len() as u32) as usize;
        self.candidates[index % self.candidates.len()].name().to_string()
    }

    /// Choose a king
    ///
    /// One election in ten ends in assassination, which puts a random
    /// candidate on the throne and costs 0.2 morale. Otherwise a corrupt
    /// office installs a random candidate. Only a clean election counts
    /// votes: every class weighs in for every candidate, the first highest
    /// total wins and morale rises 0.05.
    pub fn hold_election(&mut self, pop: &mut Population, rng: &mut impl RandomSource) -> ElectionOutcome {
        if rng.one_in(10) {
            self.current_king = self.random_candidate(rng);
            pop.adjust_morale(-0.2);
            tracing::warn!(king = %self.current_king, "assassination, throne seized");
            return ElectionOutcome::Assassination {
                king: self.current_king.clone(),
            };
        }
        if self.corrupted {
            self.current_king = self.random_candidate(rng);
            tracing::warn!(king = %self.current_king, "corrupt election");
            return ElectionOutcome::Rigged {
                king: self.current_king.clone(),
            };
        }

        let mut tally = vec![0.0; self.candidates.len()];
        for class in pop.classes() {
            for votes in tally.iter_mut() {
                *votes += class.vote_weight();
            }
        }
        let mut winner = 0;
        let mut best = 0.0;
        for (index, &votes) in tally.iter().enumerate() {
            if votes > best {
                best = votes;
                winner = index;
            }
        }
        self.current_king = self.candidates[winner].name().to_string();
        pop.adjust_morale(0.05);
        tracing::info!(king = %self.current_king, "election held");
        ElectionOutcome::Vote {
            king: self.current_king.clone(),
            tally,
        }
    }

    fn candidate_index(&self, name: &str) -> std::result::Result<usize, Shortfall> {
        self.candidates
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| Shortfall::UnknownCandidate(name.to_string()))
    }

    /// Pay voters to favour `candidate`
    pub fn bribe(&self, econ: &mut Economy, candidate: &str) -> Result<()> {
        self.candidate_index(candidate)?;
        econ.spend(BRIBE_COST)?;
        tracing::info!(candidate, "voters bribed");
        Ok(())
    }

    /// Blackmail voters for `candidate`; the hush money is borrowed against
    pub fn blackmail(&self, econ: &mut Economy, candidate: &str) -> Result<()> {
        self.candidate_index(candidate)?;
        econ.spend(BLACKMAIL_COST)?;
        econ.increase_debt_reliance(BLACKMAIL_DEBT);
        tracing::info!(candidate, "voters blackmailed");
        Ok(())
    }

    pub fn apply_pressure(&self, pressure: Pressure, econ: &mut Economy, candidate: &str) -> Result<()> {
        match pressure {
            Pressure::Bribe => self.bribe(econ, candidate),
            Pressure::Blackmail => self.blackmail(econ, candidate),
        }
    }

    /// Below [`REBELLION_MORALE`] one turn in five the peasants revolt
    pub fn trigger_rebellion(
        &self,
        pop: &mut Population,
        econ: &mut Economy,
        rng: &mut impl RandomSource,
    ) -> Option<Rebellion> {
        if pop.morale() < REBELLION_MORALE && rng.one_in(5) {
            let peasants_lost = pop.total_size() / 4;
            pop.adjust_class_size(ClassKind::Peasants, -peasants_lost);
            pop.adjust_morale(-0.2);
            let gold_lost = econ.lose(econ.gold() / 4);
            tracing::warn!(peasants_lost, gold_lost, "rebellion");
            Some(Rebellion {
                peasants_lost,
                gold_lost,
            })
        } else {
            None
        }
    }

    /// Corrupt the candidate at `index % 3`
    pub fn corrupt_candidate(&mut self, index: usize) -> &str {
        let len = self.candidates.len();
        let candidate = &mut self.candidates[index % len];
        candidate.set_corrupted(true);
        candidate.name()
    }

    /// Clear the office and every candidate
    pub fn clear_corruption(&mut self) {
        self.corrupted = false;
        for candidate in self.candidates.iter_mut() {
            candidate.set_corrupted(false);
        }
    }

    pub fn current_king(&self) -> &str {
        &self.current_king
    }

    pub fn candidates(&self) -> &[King; 3] {
        &self.candidates
    }

    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }

    pub fn set_corrupted(&mut self, corrupted: bool) {
        self.corrupted = corrupted;
    }
}
