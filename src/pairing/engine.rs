use std::collections::HashSet;

use log::debug;

use super::bye::select_bye_recipient;
use super::history::HistoryIndex;
use crate::domain::{EnrollmentId, Pairing, PairingEntry, Standing, TournamentId};
use crate::errors::PairingError;

/// Pairs a whole round: assigns the bye when the field is odd, then runs the
/// greedy nearest-rank matcher over the resulting entry list.
pub fn pair_round(
    tournament_id: TournamentId,
    standings: &[Standing],
    history: &HistoryIndex,
) -> Result<Vec<Pairing>, PairingError> {
    let bye_recipient = select_bye_recipient(tournament_id, standings)?;
    let entries = build_entries(standings, bye_recipient);
    pair_entries(tournament_id, &entries, history, bye_recipient)
}

/// Rank-ordered entries with the bye slot placed right after its recipient
pub fn build_entries(
    standings: &[Standing],
    bye_recipient: Option<EnrollmentId>,
) -> Vec<PairingEntry> {
    let mut entries = Vec::with_capacity(standings.len() + 1);

    for standing in standings {
        entries.push(PairingEntry::from(standing));
        if bye_recipient == Some(standing.enrollment_id) {
            entries.push(PairingEntry::Bye);
        }
    }

    entries
}

/// Greedy matcher: each unassigned entry, best first, takes the first later
/// unassigned entry it may face. No backtracking; a dead end fails the attempt.
pub fn pair_entries(
    tournament_id: TournamentId,
    entries: &[PairingEntry],
    history: &HistoryIndex,
    bye_recipient: Option<EnrollmentId>,
) -> Result<Vec<Pairing>, PairingError> {
    let mut assigned: HashSet<&PairingEntry> = HashSet::with_capacity(entries.len());
    let mut pairs = Vec::with_capacity(entries.len() / 2);

    for (idx, entry) in entries.iter().enumerate() {
        if assigned.contains(entry) {
            continue;
        }

        let opponent = entries[idx + 1..]
            .iter()
            .filter(|candidate| !assigned.contains(candidate))
            .find(|candidate| may_face(entry, candidate, history, bye_recipient))
            .ok_or_else(|| PairingError::NoValidOpponent {
                tournament_id,
                stranded: entry.clone(),
            })?;

        debug!("Paired {} with {}", entry, opponent);
        assigned.insert(entry);
        assigned.insert(opponent);
        pairs.push(Pairing::new(entry.clone(), opponent.clone()));
    }

    Ok(pairs)
}

fn may_face(
    entry: &PairingEntry,
    candidate: &PairingEntry,
    history: &HistoryIndex,
    bye_recipient: Option<EnrollmentId>,
) -> bool {
    match (entry.enrollment_id(), candidate.enrollment_id()) {
        (Some(a), Some(b)) => {
            bye_recipient != Some(a) && bye_recipient != Some(b) && !history.has_faced(a, b)
        }
        (Some(player), None) | (None, Some(player)) => bye_recipient == Some(player),
        (None, None) => false,
    }
}
