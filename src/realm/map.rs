//! Territory map - a small grid of claimed cells

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;
use crate::core::types::Resource;

/// Side length of the square map
pub const GRID_SIZE: usize = 5;

/// Marker for an unclaimed cell
pub const UNCLAIMED: char = '.';

/// Home marker seeded in the north-west corner
pub const HOME_MARKER: char = 'S';

/// Rival marker seeded in the south-east corner
pub const RIVAL_MARKER: char = 'I';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    grid: [[char; GRID_SIZE]; GRID_SIZE],
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}

impl Map {
    pub fn new() -> Self {
        let mut grid = [[UNCLAIMED; GRID_SIZE]; GRID_SIZE];
        grid[0][0] = HOME_MARKER;
        grid[GRID_SIZE - 1][GRID_SIZE - 1] = RIVAL_MARKER;
        Self { grid }
    }

    /// Mark a cell with the first letter of `kingdom`
    ///
    /// Coordinates outside the grid, or an empty name, leave the map untouched.
    pub fn capture(&mut self, kingdom: &str, x: i32, y: i32) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return;
        }
        if let Some(marker) = kingdom.chars().next() {
            self.grid[x][y] = marker;
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        self.grid.get(x).and_then(|row| row.get(y)).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.grid.iter().map(|row| {
            row.iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    /// Cells claimed by anyone
    pub fn claimed_cells(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|&&c| c != UNCLAIMED)
            .count()
    }

    /// Raiders strike a stockpile 30% of the time, carrying off a fifth of it
    ///
    /// Returns the amount lost when a raid happens.
    pub fn enemy_attack(&self, stockpile: &mut Resource, rng: &mut impl RandomSource) -> Option<i64> {
        if rng.roll(10) < 3 {
            let loss = stockpile.get() / 5;
            stockpile.adjust(-loss);
            Some(loss)
        } else {
            None
        }
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;

    #[test]
    fn test_new_map_seeds_both_markers() {
        let map = Map::new();
        assert_eq!(map.cell(0, 0), Some('S'));
        assert_eq!(map.cell(4, 4), Some('I'));
        assert_eq!(map.cell(2, 2), Some('.'));
        assert_eq!(map.claimed_cells(), 2);
    }

    #[test]
    fn test_capture_marks_first_letter() {
        let mut map = Map::new();
        map.capture("Bank", 1, 3);
        assert_eq!(map.cell(1, 3), Some('B'));
        map.capture("Ironhold", 0, 0);
        assert_eq!(map.cell(0, 0), Some('I'));
    }

    #[test]
    fn test_capture_out_of_range_is_noop() {
        let mut map = Map::new();
        let before = map.clone();
        map.capture("Bank", 5, 0);
        map.capture("Bank", -1, 2);
        map.capture("Bank", 2, 17);
        map.capture("", 2, 2);
        assert_eq!(map, before);
        assert_eq!(map.cell(5, 0), None);
    }

    #[test]
    fn test_display_renders_grid() {
        let text = Map::new().to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), GRID_SIZE);
        assert_eq!(lines[0], "S . . . .");
        assert_eq!(lines[4], ". . . . I");
    }

    #[test]
    fn test_enemy_attack_takes_a_fifth() {
        let map = Map::new();
        let mut food = Resource::new(1000);
        assert_eq!(map.enemy_attack(&mut food, &mut ScriptedRandom::with_rolls([2])), Some(200));
        assert_eq!(food.get(), 800);
        assert_eq!(map.enemy_attack(&mut food, &mut ScriptedRandom::with_rolls([3])), None);
        assert_eq!(food.get(), 800);
    }
}
