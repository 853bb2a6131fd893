use crate::domain::{EnrollmentId, Standing, TournamentId};
use crate::errors::PairingError;

/// Picks the best-ranked player still without a bye when the field is odd.
///
/// Returns `Ok(None)` for an even field.
pub fn select_bye_recipient(
    tournament_id: TournamentId,
    standings: &[Standing],
) -> Result<Option<EnrollmentId>, PairingError> {
    if standings.len() % 2 == 0 {
        return Ok(None);
    }

    standings
        .iter()
        .find(|standing| !standing.had_bye)
        .map(|standing| Some(standing.enrollment_id))
        .ok_or(PairingError::ExhaustedByePool { tournament_id })
}
