use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Enrollment;
use crate::domain::{EnrollmentId, PlayerId, TournamentId};

const SELECT_ENROLLMENT: &str = "
    SELECT e.id, e.player_id, e.tournament_id, p.name, e.wins, e.matches, e.had_bye
    FROM enrollments e
    JOIN players p ON p.id = e.player_id";

pub fn insert_enrollment(
    conn: &Connection,
    player_id: PlayerId,
    tournament_id: TournamentId,
) -> Result<EnrollmentId> {
    let sql = "INSERT INTO enrollments (player_id, tournament_id) VALUES (?1, ?2) RETURNING id";

    conn.query_row(sql, params![player_id, tournament_id], |row| row.get(0))
        .context("Failed to insert enrollment")
}

fn parse_enrollment_row(row: &rusqlite::Row) -> rusqlite::Result<Enrollment> {
    Ok(Enrollment {
        id: row.get(0)?,
        player_id: row.get(1)?,
        tournament_id: row.get(2)?,
        player_name: row.get(3)?,
        wins: row.get(4)?,
        matches: row.get(5)?,
        had_bye: row.get(6)?,
    })
}

pub fn find_in_tournament(
    conn: &Connection,
    tournament_id: TournamentId,
    enrollment_id: EnrollmentId,
) -> Result<Option<Enrollment>> {
    let sql = format!("{SELECT_ENROLLMENT} WHERE e.tournament_id = ?1 AND e.id = ?2");

    conn.query_row(&sql, params![tournament_id, enrollment_id], parse_enrollment_row)
        .optional()
        .context("Failed to query enrollment by id")
}

pub fn find_by_player(
    conn: &Connection,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> Result<Option<Enrollment>> {
    let sql = format!("{SELECT_ENROLLMENT} WHERE e.tournament_id = ?1 AND e.player_id = ?2");

    conn.query_row(&sql, params![tournament_id, player_id], parse_enrollment_row)
        .optional()
        .context("Failed to query enrollment by player")
}

pub fn list_by_tournament(
    conn: &Connection,
    tournament_id: TournamentId,
) -> Result<Vec<Enrollment>> {
    let sql = format!("{SELECT_ENROLLMENT} WHERE e.tournament_id = ?1 ORDER BY e.id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![tournament_id], parse_enrollment_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn add_result(
    conn: &Connection,
    enrollment_id: EnrollmentId,
    won: bool,
    bye: bool,
) -> Result<()> {
    let sql = "UPDATE enrollments SET wins = wins + ?2, matches = matches + 1, had_bye = had_bye OR ?3 WHERE id = ?1";

    conn.execute(sql, params![enrollment_id, i64::from(won), bye])
        .with_context(|| format!("Failed to update counters of enrollment {}", enrollment_id))
        .map(|_| ())
}

pub fn reset_counters(conn: &Connection, tournament_id: Option<TournamentId>) -> Result<usize> {
    let sql = "UPDATE enrollments SET wins = 0, matches = 0, had_bye = 0";
    let updated = match tournament_id {
        Some(id) => conn.execute(&format!("{sql} WHERE tournament_id = ?1"), params![id]),
        None => conn.execute(sql, []),
    };
    updated.context("Failed to reset enrollment counters")
}

pub fn count(conn: &Connection, tournament_id: Option<TournamentId>) -> Result<i64> {
    let counted = match tournament_id {
        Some(id) => conn.query_row(
            "SELECT COUNT(*) FROM enrollments WHERE tournament_id = ?1",
            params![id],
            |row| row.get(0),
        ),
        None => conn.query_row("SELECT COUNT(*) FROM enrollments", [], |row| row.get(0)),
    };
    counted.context("Failed to count enrollments")
}

pub fn delete(conn: &Connection, tournament_id: Option<TournamentId>) -> Result<usize> {
    let deleted = match tournament_id {
        Some(id) => conn.execute("DELETE FROM enrollments WHERE tournament_id = ?1", params![id]),
        None => conn.execute("DELETE FROM enrollments", []),
    };
    deleted.context("Failed to delete enrollments")
}
