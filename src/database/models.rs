use chrono::NaiveDateTime;

use crate::domain::{EnrollmentId, Entrant, MatchRecord, Outcome, PlayerId, TournamentId};
use crate::errors::StoreError;

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
}

/// Enrollment row joined with the player's name; counters are a cache of the match log
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub player_id: PlayerId,
    pub tournament_id: TournamentId,
    pub player_name: String,
    pub wins: i64,
    pub matches: i64,
    pub had_bye: bool,
}

impl Enrollment {
    pub fn entrant(&self) -> Entrant {
        Entrant {
            enrollment_id: self.id,
            player_name: self.player_name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchRow {
    pub id: i64,
    pub tournament_id: TournamentId,
    pub outcome: String,
    pub first_enrollment_id: EnrollmentId,
    pub second_enrollment_id: Option<EnrollmentId>,
    pub created_at: Option<NaiveDateTime>,
}

pub const OUTCOME_DECISIVE: &str = "decisive";
pub const OUTCOME_TIED: &str = "tied";
pub const OUTCOME_BYE: &str = "bye";

impl TryFrom<MatchRow> for MatchRecord {
    type Error = StoreError;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        let outcome = match row.outcome.as_str() {
            OUTCOME_DECISIVE => Outcome::AWon,
            OUTCOME_TIED => Outcome::Tied,
            OUTCOME_BYE => Outcome::AHadBye,
            other => return Err(StoreError::UnknownOutcome(other.to_string())),
        };

        Ok(MatchRecord {
            participant_a: row.first_enrollment_id,
            participant_b: row.second_enrollment_id,
            outcome,
        })
    }
}

/// Column values for storing a match record, winner first
pub fn match_columns(
    record: &MatchRecord,
) -> Result<(&'static str, EnrollmentId, Option<EnrollmentId>), StoreError> {
    let columns = match (record.outcome, record.participant_b) {
        (Outcome::AWon, Some(b)) => (OUTCOME_DECISIVE, record.participant_a, Some(b)),
        (Outcome::BWon, Some(b)) => (OUTCOME_DECISIVE, b, Some(record.participant_a)),
        (Outcome::Tied, Some(b)) => (OUTCOME_TIED, record.participant_a, Some(b)),
        (Outcome::AHadBye, None) => (OUTCOME_BYE, record.participant_a, None),
        (outcome, _) => return Err(StoreError::MalformedMatch(outcome)),
    };
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decisive_columns_put_the_winner_first() {
        let record = MatchRecord {
            participant_a: 3,
            participant_b: Some(8),
            outcome: Outcome::BWon,
        };
        assert_eq!(match_columns(&record).unwrap(), (OUTCOME_DECISIVE, 8, Some(3)));
        assert_eq!(
            match_columns(&MatchRecord::bye(5)).unwrap(),
            (OUTCOME_BYE, 5, None)
        );
    }

    #[test]
    fn one_sided_records_are_rejected_unless_they_are_byes() {
        for outcome in [Outcome::AWon, Outcome::BWon, Outcome::Tied] {
            let record = MatchRecord {
                participant_a: 3,
                participant_b: None,
                outcome,
            };
            assert_eq!(match_columns(&record), Err(StoreError::MalformedMatch(outcome)));
        }

        let record = MatchRecord {
            participant_a: 3,
            participant_b: Some(4),
            outcome: Outcome::AHadBye,
        };
        assert_eq!(
            match_columns(&record),
            Err(StoreError::MalformedMatch(Outcome::AHadBye))
        );
    }
}
