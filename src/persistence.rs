//! Save and score files
//!
//! Both files are plain text and only ever appended to. Loading is a
//! presence check: it reports whether a kingdom has been saved, nothing is
//! restored.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::error::Result;
use crate::core::types::format_decimal;
use crate::kingdom::Kingdom;

pub const DEFAULT_SCORE_FILE: &str = "score.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Found,
    NotFound,
    NoSaveFile,
}

/// The save block for one kingdom, blank line included
pub fn save_block(kingdom: &Kingdom) -> String {
    let lines = [
        format!("Kingdom: {}", kingdom.name()),
        format!("Population: {}", kingdom.population().total_size()),
        format!("Morale: {}", format_decimal(kingdom.population().morale())),
        format!("Gold: {}", kingdom.economy().gold()),
        format!("Loan: {}", kingdom.bank().loan()),
        format!("LandSeized: {}", kingdom.bank().land_seized()),
        format!("Army: {}", kingdom.army().size()),
        format!("Weapons: {}", kingdom.army().weapons()),
        format!("Food: {}", kingdom.food()),
        format!("Iron: {}", kingdom.iron()),
        format!("Wood: {}", kingdom.wood()),
        format!("Stone: {}", kingdom.stone()),
        format!("BlacksmithLevel: {}", kingdom.blacksmith().level()),
        format!("King: {}", kingdom.politics().current_king()),
        format!("Tax: {}", kingdom.economy().tax_policy()),
        format!("HealthcareLevel: {}", kingdom.healthcare().level()),
        format!("BarracksLevel: {}", kingdom.buildings().barracks_level()),
        format!("Inflation: {}", format_decimal(kingdom.inflation().rate())),
    ];
    let mut block = lines.join("\n");
    block.push_str("\n\n");
    block
}

fn append(path: &Path, text: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())
}

pub fn save_state(kingdom: &Kingdom, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    append(path, &save_block(kingdom))?;
    tracing::info!(kingdom = kingdom.name(), path = %path.display(), "game state saved");
    Ok(())
}

/// Look for a saved block belonging to `name`
pub fn load_state(name: &str, path: impl AsRef<Path>) -> Result<LoadOutcome> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::info!(kingdom = name, "no save file found");
            return Ok(LoadOutcome::NoSaveFile);
        }
        Err(err) => return Err(err.into()),
    };
    let found = content
        .lines()
        .filter_map(|line| line.strip_prefix("Kingdom: "))
        .any(|saved| saved == name);
    if found {
        tracing::info!(kingdom = name, "saved game found");
        Ok(LoadOutcome::Found)
    } else {
        Ok(LoadOutcome::NotFound)
    }
}

/// One score line, stamped with `timestamp` (seconds since the epoch)
pub fn score_line(kingdom: &Kingdom, timestamp: u64) -> String {
    format!(
        "{} Kingdom: {}, Score: {}, Gold: {}, Army: {}, Morale: {}\n",
        timestamp,
        kingdom.name(),
        kingdom.score(),
        kingdom.economy().gold(),
        kingdom.army().size(),
        format_decimal(kingdom.population().morale())
    )
}

pub fn save_score(kingdom: &Kingdom, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    append(path, &score_line(kingdom, timestamp))?;
    tracing::info!(kingdom = kingdom.name(), score = kingdom.score(), "score saved");
    Ok(())
}
