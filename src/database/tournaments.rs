use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Tournament;
use crate::domain::TournamentId;

pub fn insert_tournament(conn: &Connection, name: &str) -> Result<Tournament> {
    let sql = "INSERT INTO tournaments (name) VALUES (?1) RETURNING id, name, created_at";

    conn.query_row(sql, params![name], parse_tournament_row)
        .context("Failed to insert new tournament")
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<Tournament> {
    Ok(Tournament {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

pub fn find_by_id(conn: &Connection, id: TournamentId) -> Result<Option<Tournament>> {
    let sql = "SELECT id, name, created_at FROM tournaments WHERE id = ?1";

    conn.query_row(sql, params![id], parse_tournament_row)
        .optional()
        .context("Failed to query tournament by id")
}

pub fn list_all(conn: &Connection) -> Result<Vec<Tournament>> {
    let sql = "SELECT id, name, created_at FROM tournaments ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_tournament_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn delete(conn: &Connection, tournament_id: Option<TournamentId>) -> Result<usize> {
    let deleted = match tournament_id {
        Some(id) => conn.execute("DELETE FROM tournaments WHERE id = ?1", params![id]),
        None => conn.execute("DELETE FROM tournaments", []),
    };
    deleted.context("Failed to delete tournaments")
}
