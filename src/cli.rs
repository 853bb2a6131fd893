use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::pairing::TieBreak;

#[derive(Parser, Debug)]
#[command(author, version, about = "Swiss-system tournament standings and pairings")]
pub struct Cli {
    /// Secondary ordering between players with equal wins
    #[arg(long, global = true, value_enum)]
    pub tie_break: Option<TieBreak>,

    /// Ordering for a second pairing attempt after a dead end
    #[arg(long, global = true, value_enum)]
    pub fallback_tie_break: Option<TieBreak>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Drop and recreate the database schema
    Init,
    /// Register a new player
    RegisterPlayer { name: String },
    /// Create a new tournament
    CreateTournament { name: String },
    /// Enroll a registered player in a tournament
    Enroll { tournament: i64, player: i64 },
    /// Record a decisive match (enrollment ids)
    Report {
        tournament: i64,
        winner: i64,
        loser: i64,
    },
    /// Record a tied match (enrollment ids)
    ReportTie { tournament: i64, first: i64, second: i64 },
    /// Record a bye for an enrollment
    ReportBye { tournament: i64, enrollment: i64 },
    /// Print the current standings
    Standings {
        tournament: i64,
        #[arg(long)]
        json: bool,
    },
    /// Compute the next round's pairings
    Pairings {
        tournament: i64,
        #[arg(long)]
        json: bool,
    },
    /// Compare cached counters with a replay of the match log
    Validate { tournament: Option<i64> },
    /// Count registered players, or enrollments of one tournament
    CountPlayers {
        #[arg(short, long)]
        tournament: Option<i64>,
    },
    /// Delete recorded matches (all, or of one tournament)
    Reset {
        #[arg(short, long)]
        tournament: Option<i64>,
        /// Also delete enrollments, tournaments and players
        #[arg(long)]
        everything: bool,
    },
    /// Start the read-only HTTP API
    Serve {
        /// Port number (optional, defaults to the configured server port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print shell completions
    Completions { shell: Shell },
}
