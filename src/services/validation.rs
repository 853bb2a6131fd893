use anyhow::Result;
use log::{info, warn};

use crate::database::{self, enrollments, matches, tournaments, DbPool, Enrollment};
use crate::domain::TournamentId;
use crate::errors::{CounterField, DataConsistencyViolation};
use crate::pairing::{replay_counters, Counters};

/// Replays match logs and compares them with the cached enrollment counters.
///
/// Mismatches are logged and returned, never corrected.
pub struct ValidationService {
    pool: DbPool,
}

impl ValidationService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn run(&self, tournament_id: Option<TournamentId>) -> Result<Vec<DataConsistencyViolation>> {
        let tournament_ids = match tournament_id {
            Some(id) => vec![id],
            None => {
                let conn = database::get_connection(&self.pool)?;
                tournaments::list_all(&conn)?.into_iter().map(|t| t.id).collect()
            }
        };

        let mut violations = Vec::new();
        for id in tournament_ids {
            violations.extend(self.validate_tournament(id)?);
        }

        for violation in &violations {
            warn!("Data consistency violation: {}", violation);
        }
        info!("Validation finished with {} violation(s)", violations.len());
        Ok(violations)
    }

    fn validate_tournament(&self, tournament_id: TournamentId) -> Result<Vec<DataConsistencyViolation>> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction()?;
        let rows = enrollments::list_by_tournament(&tx, tournament_id)?;
        let log = matches::list_by_tournament(&tx, tournament_id)?;
        tx.commit()?;

        let replayed = replay_counters(&log);
        Ok(rows
            .iter()
            .flat_map(|row| {
                let counters = replayed.get(&row.id).copied().unwrap_or_default();
                compare(tournament_id, row, counters)
            })
            .collect())
    }
}

fn compare(
    tournament_id: TournamentId,
    row: &Enrollment,
    replayed: Counters,
) -> Vec<DataConsistencyViolation> {
    [
        (CounterField::Wins, row.wins, i64::from(replayed.wins)),
        (CounterField::Matches, row.matches, i64::from(replayed.matches)),
        (
            CounterField::HadBye,
            i64::from(row.had_bye),
            i64::from(replayed.had_bye),
        ),
    ]
    .into_iter()
    .filter(|(_, cached, replayed)| cached != replayed)
    .map(|(field, cached, replayed)| DataConsistencyViolation {
        tournament_id,
        enrollment_id: row.id,
        field,
        cached,
        replayed,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use rusqlite::params;

    use super::*;
    use crate::services::registry::RegistryService;

    #[test]
    fn consistent_store_has_no_violations() {
        let pool = database::create_memory_pool().unwrap();
        let registry = RegistryService::new(pool.clone());
        registry.reset_database().unwrap();

        let tournament = registry.create_tournament("Clean").unwrap();
        let a = registry.register_player("A").unwrap();
        let b = registry.register_player("B").unwrap();
        let c = registry.register_player("C").unwrap();
        let a = registry.enroll(tournament, a).unwrap();
        let b = registry.enroll(tournament, b).unwrap();
        let c = registry.enroll(tournament, c).unwrap();
        registry.report_match(tournament, a, b).unwrap();
        registry.report_tie(tournament, b, c).unwrap();
        registry.report_bye(tournament, c).unwrap();

        let violations = ValidationService::new(pool).run(None).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn tampered_counters_are_reported_not_fixed() {
        let pool = database::create_memory_pool().unwrap();
        let registry = RegistryService::new(pool.clone());
        registry.reset_database().unwrap();

        let tournament = registry.create_tournament("Tampered").unwrap();
        let a = registry.register_player("A").unwrap();
        let b = registry.register_player("B").unwrap();
        let a = registry.enroll(tournament, a).unwrap();
        let b = registry.enroll(tournament, b).unwrap();
        registry.report_match(tournament, a, b).unwrap();

        {
            let conn = database::get_connection(&pool).unwrap();
            conn.execute("UPDATE enrollments SET wins = 3 WHERE id = ?1", params![b])
                .unwrap();
        }

        let service = ValidationService::new(pool.clone());
        let violations = service.run(Some(tournament)).unwrap();
        assert_eq!(
            violations,
            vec![DataConsistencyViolation {
                tournament_id: tournament,
                enrollment_id: b,
                field: CounterField::Wins,
                cached: 3,
                replayed: 0,
            }]
        );

        assert_eq!(service.run(Some(tournament)).unwrap().len(), 1);
    }
}
