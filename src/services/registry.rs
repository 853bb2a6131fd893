use anyhow::Result;
use log::info;
use rusqlite::Connection;

use crate::database::{self, enrollments, matches, players, tournaments, DbPool};
use crate::domain::{EnrollmentId, MatchRecord, PlayerId, TournamentId};
use crate::errors::StoreError;

/// Registration, match reporting and bulk resets against the store
pub struct RegistryService {
    pool: DbPool,
}

impl RegistryService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn reset_database(&self) -> Result<()> {
        let conn = database::get_connection(&self.pool)?;
        database::setup::reset_database(&conn)
    }

    pub fn register_player(&self, name: &str) -> Result<PlayerId> {
        let conn = database::get_connection(&self.pool)?;
        let player = players::insert_player(&conn, name)?;
        info!("Registered player {} ({})", player.id, player.name);
        Ok(player.id)
    }

    pub fn create_tournament(&self, name: &str) -> Result<TournamentId> {
        let conn = database::get_connection(&self.pool)?;
        let tournament = tournaments::insert_tournament(&conn, name)?;
        info!("Created tournament {} ({})", tournament.id, tournament.name);
        Ok(tournament.id)
    }

    pub fn enroll(&self, tournament_id: TournamentId, player_id: PlayerId) -> Result<EnrollmentId> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction()?;

        ensure_tournament(&tx, tournament_id)?;
        if players::find_by_id(&tx, player_id)?.is_none() {
            return Err(StoreError::UnknownPlayer(player_id).into());
        }
        if enrollments::find_by_player(&tx, tournament_id, player_id)?.is_some() {
            return Err(StoreError::AlreadyEnrolled {
                player_id,
                tournament_id,
            }
            .into());
        }

        let enrollment_id = enrollments::insert_enrollment(&tx, player_id, tournament_id)?;
        tx.commit()?;

        info!(
            "Enrolled player {} in tournament {} as {}",
            player_id, tournament_id, enrollment_id
        );
        Ok(enrollment_id)
    }

    pub fn report_match(
        &self,
        tournament_id: TournamentId,
        winner: EnrollmentId,
        loser: EnrollmentId,
    ) -> Result<()> {
        self.record(tournament_id, MatchRecord::decisive(winner, loser))
    }

    pub fn report_tie(
        &self,
        tournament_id: TournamentId,
        first: EnrollmentId,
        second: EnrollmentId,
    ) -> Result<()> {
        self.record(tournament_id, MatchRecord::tied(first, second))
    }

    pub fn report_bye(&self, tournament_id: TournamentId, recipient: EnrollmentId) -> Result<()> {
        self.record(tournament_id, MatchRecord::bye(recipient))
    }

    /// Appends to the match log and bumps the cached counters in one transaction
    fn record(&self, tournament_id: TournamentId, record: MatchRecord) -> Result<()> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction()?;

        ensure_tournament(&tx, tournament_id)?;
        validate_participants(&tx, tournament_id, &record)?;

        let match_id = matches::insert_match(&tx, tournament_id, &record)?;
        let is_bye = record.opponents().is_none();
        for participant in record.participants() {
            let won = record.winner() == Some(participant);
            enrollments::add_result(&tx, participant, won, is_bye)?;
        }

        tx.commit()?;
        info!(
            "Recorded match {} in tournament {}: {:?}",
            match_id, tournament_id, record
        );
        Ok(())
    }

    pub fn count_players(&self) -> Result<i64> {
        let conn = database::get_connection(&self.pool)?;
        players::count_all(&conn)
    }

    pub fn count_enrollments(&self, tournament_id: Option<TournamentId>) -> Result<i64> {
        let conn = database::get_connection(&self.pool)?;
        enrollments::count(&conn, tournament_id)
    }

    /// Bulk-deletes the match log and zeroes the counters it fed
    pub fn reset_matches(&self, tournament_id: Option<TournamentId>) -> Result<usize> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction()?;

        let deleted = matches::delete(&tx, tournament_id)?;
        enrollments::reset_counters(&tx, tournament_id)?;
        tx.commit()?;

        info!("Deleted {} matches", deleted);
        Ok(deleted)
    }

    pub fn delete_enrollments(&self, tournament_id: Option<TournamentId>) -> Result<usize> {
        let conn = database::get_connection(&self.pool)?;
        enrollments::delete(&conn, tournament_id)
    }

    pub fn delete_tournaments(&self, tournament_id: Option<TournamentId>) -> Result<usize> {
        let conn = database::get_connection(&self.pool)?;
        tournaments::delete(&conn, tournament_id)
    }

    pub fn delete_players(&self) -> Result<usize> {
        let conn = database::get_connection(&self.pool)?;
        players::delete_all(&conn)
    }
}

pub(crate) fn ensure_tournament(conn: &Connection, tournament_id: TournamentId) -> Result<()> {
    match tournaments::find_by_id(conn, tournament_id)? {
        Some(_) => Ok(()),
        None => Err(StoreError::UnknownTournament(tournament_id).into()),
    }
}

fn validate_participants(
    conn: &Connection,
    tournament_id: TournamentId,
    record: &MatchRecord,
) -> Result<()> {
    if let Some((a, b)) = record.opponents() {
        if a == b {
            return Err(StoreError::SelfMatch(a).into());
        }
    }

    for enrollment_id in record.participants() {
        let enrollment = enrollments::find_in_tournament(conn, tournament_id, enrollment_id)?
            .ok_or(StoreError::UnknownEnrollment {
                tournament_id,
                enrollment_id,
            })?;

        if record.opponents().is_none() && enrollment.had_bye {
            return Err(StoreError::ByeAlreadyAwarded {
                tournament_id,
                enrollment_id,
            }
            .into());
        }
    }

    Ok(())
}
