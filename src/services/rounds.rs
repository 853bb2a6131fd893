use anyhow::Result;
use log::{info, warn};

use crate::config::PairingSettings;
use crate::database::{self, enrollments, matches, DbPool};
use crate::domain::{Entrant, MatchRecord, Pairing, Standing, TournamentId};
use crate::errors::PairingError;
use crate::pairing::{self, HistoryIndex, TieBreak};
use crate::services::registry::ensure_tournament;

/// Everything one round's pairing needs, read in a single transaction
#[derive(Debug, Clone)]
pub struct RoundSnapshot {
    pub tournament_id: TournamentId,
    pub roster: Vec<Entrant>,
    pub matches: Vec<MatchRecord>,
}

impl RoundSnapshot {
    pub fn standings(&self, tie_break: TieBreak) -> Vec<Standing> {
        pairing::build_standings(&self.roster, &self.matches, tie_break)
    }

    pub fn history(&self) -> HistoryIndex {
        HistoryIndex::from_matches(&self.matches)
    }
}

pub struct RoundService {
    pool: DbPool,
    settings: PairingSettings,
}

impl RoundService {
    pub fn new(pool: DbPool, settings: PairingSettings) -> Self {
        Self { pool, settings }
    }

    pub fn load_snapshot(&self, tournament_id: TournamentId) -> Result<RoundSnapshot> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction()?;

        ensure_tournament(&tx, tournament_id)?;
        let roster = enrollments::list_by_tournament(&tx, tournament_id)?
            .iter()
            .map(|enrollment| enrollment.entrant())
            .collect();
        let matches = matches::list_by_tournament(&tx, tournament_id)?;
        tx.commit()?;

        Ok(RoundSnapshot {
            tournament_id,
            roster,
            matches,
        })
    }

    pub fn standings(&self, tournament_id: TournamentId) -> Result<Vec<Standing>> {
        let snapshot = self.load_snapshot(tournament_id)?;
        Ok(snapshot.standings(self.settings.tie_break))
    }

    /// Pairs the next round from a fresh snapshot.
    ///
    /// A `PairingError` is returned inside the `anyhow::Error` so callers can
    /// downcast it. With a fallback tie-break configured, a greedy dead end is
    /// retried once under that ordering before giving up.
    pub fn compute_next_round_pairings(&self, tournament_id: TournamentId) -> Result<Vec<Pairing>> {
        let snapshot = self.load_snapshot(tournament_id)?;
        let pairs = pair_snapshot(&snapshot, &self.settings)?;

        info!(
            "Computed {} pairs for tournament {} ({} players, {} matches on record)",
            pairs.len(),
            tournament_id,
            snapshot.roster.len(),
            snapshot.matches.len()
        );
        Ok(pairs)
    }
}

pub fn pair_snapshot(
    snapshot: &RoundSnapshot,
    settings: &PairingSettings,
) -> Result<Vec<Pairing>, PairingError> {
    let history = snapshot.history();
    let attempt = pair_with(snapshot, &history, settings.tie_break);

    match (attempt, settings.fallback_tie_break) {
        (Err(err @ PairingError::NoValidOpponent { .. }), Some(fallback))
            if fallback != settings.tie_break =>
        {
            warn!("{}; retrying with tie-break '{}'", err, fallback);
            pair_with(snapshot, &history, fallback).map_err(|_| err)
        }
        (attempt, _) => attempt,
    }
}

fn pair_with(
    snapshot: &RoundSnapshot,
    history: &HistoryIndex,
    tie_break: TieBreak,
) -> Result<Vec<Pairing>, PairingError> {
    let standings = snapshot.standings(tie_break);
    pairing::pair_round(snapshot.tournament_id, &standings, history)
}
