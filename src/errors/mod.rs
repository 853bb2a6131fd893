use std::fmt;

use thiserror::Error;

use crate::domain::{EnrollmentId, Outcome, PairingEntry, PlayerId, TournamentId};

/// Conditions that make a round unpairable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    #[error("tournament {tournament_id}: every enrolled player has already received a bye")]
    ExhaustedByePool { tournament_id: TournamentId },

    #[error("tournament {tournament_id}: no valid opponent left for {stranded}")]
    NoValidOpponent {
        tournament_id: TournamentId,
        stranded: PairingEntry,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("tournament {0} does not exist")]
    UnknownTournament(TournamentId),

    #[error("player {0} does not exist")]
    UnknownPlayer(PlayerId),

    #[error("enrollment {enrollment_id} is not part of tournament {tournament_id}")]
    UnknownEnrollment {
        tournament_id: TournamentId,
        enrollment_id: EnrollmentId,
    },

    #[error("player {player_id} is already enrolled in tournament {tournament_id}")]
    AlreadyEnrolled {
        player_id: PlayerId,
        tournament_id: TournamentId,
    },

    #[error("enrollment {0} cannot play against itself")]
    SelfMatch(EnrollmentId),

    #[error("enrollment {enrollment_id} already received a bye in tournament {tournament_id}")]
    ByeAlreadyAwarded {
        tournament_id: TournamentId,
        enrollment_id: EnrollmentId,
    },

    #[error("unknown match outcome '{0}' in match log")]
    UnknownOutcome(String),

    #[error("match record with outcome {0:?} has the wrong number of participants")]
    MalformedMatch(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    Wins,
    Matches,
    HadBye,
}

impl fmt::Display for CounterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CounterField::Wins => "wins",
            CounterField::Matches => "matches",
            CounterField::HadBye => "had_bye",
        })
    }
}

/// Cached enrollment counter that disagrees with a replay of the match log
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "tournament {tournament_id}, enrollment {enrollment_id}: cached {field} is {cached} but the match log says {replayed}"
)]
pub struct DataConsistencyViolation {
    pub tournament_id: TournamentId,
    pub enrollment_id: EnrollmentId,
    pub field: CounterField,
    pub cached: i64,
    pub replayed: i64,
}
