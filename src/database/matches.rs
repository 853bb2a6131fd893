use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::{match_columns, MatchRow};
use crate::domain::{MatchRecord, TournamentId};

pub fn insert_match(
    conn: &Connection,
    tournament_id: TournamentId,
    record: &MatchRecord,
) -> Result<i64> {
    let (outcome, first, second) = match_columns(record)?;
    let sql = "INSERT INTO matches (tournament_id, outcome, first_enrollment_id, second_enrollment_id) VALUES (?1, ?2, ?3, ?4) RETURNING id";

    conn.query_row(sql, params![tournament_id, outcome, first, second], |row| row.get(0))
        .context("Failed to insert match")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<MatchRow> {
    Ok(MatchRow {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        outcome: row.get(2)?,
        first_enrollment_id: row.get(3)?,
        second_enrollment_id: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub fn list_rows_by_tournament(
    conn: &Connection,
    tournament_id: TournamentId,
) -> Result<Vec<MatchRow>> {
    let sql = "SELECT id, tournament_id, outcome, first_enrollment_id, second_enrollment_id, created_at FROM matches WHERE tournament_id = ?1 ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// The tournament's match log in recording order
pub fn list_by_tournament(
    conn: &Connection,
    tournament_id: TournamentId,
) -> Result<Vec<MatchRecord>> {
    list_rows_by_tournament(conn, tournament_id)?
        .into_iter()
        .map(|row| {
            let id = row.id;
            MatchRecord::try_from(row).with_context(|| format!("Malformed match {}", id))
        })
        .collect()
}

pub fn count(conn: &Connection, tournament_id: TournamentId) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM matches WHERE tournament_id = ?1",
        params![tournament_id],
        |row| row.get(0),
    )
    .context("Failed to count matches")
}

pub fn delete(conn: &Connection, tournament_id: Option<TournamentId>) -> Result<usize> {
    let deleted = match tournament_id {
        Some(id) => conn.execute("DELETE FROM matches WHERE tournament_id = ?1", params![id]),
        None => conn.execute("DELETE FROM matches", []),
    };
    deleted.context("Failed to delete matches")
}
