use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Secondary ordering key applied between players with equal wins
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Every player scores 0; ties fall through to enrollment id
    None,
    /// Sum of the current wins of every opponent the player has beaten
    #[default]
    OpponentWins,
}

impl TieBreak {
    pub fn as_str(&self) -> &str {
        match self {
            TieBreak::None => "none",
            TieBreak::OpponentWins => "opponent-wins",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters obtained by replaying the match log for one enrollment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub wins: u32,
    pub matches: u32,
    pub had_bye: bool,
}
