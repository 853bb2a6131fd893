use std::fmt;

use serde::{Deserialize, Serialize};

pub type PlayerId = i64;
pub type TournamentId = i64;
pub type EnrollmentId = i64;

/// How a match between `participant_a` and `participant_b` ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    AWon,
    BWon,
    Tied,
    AHadBye,
}

/// One entry of a tournament's match log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub participant_a: EnrollmentId,
    pub participant_b: Option<EnrollmentId>,
    pub outcome: Outcome,
}

impl MatchRecord {
    pub fn decisive(winner: EnrollmentId, loser: EnrollmentId) -> Self {
        Self {
            participant_a: winner,
            participant_b: Some(loser),
            outcome: Outcome::AWon,
        }
    }

    pub fn tied(first: EnrollmentId, second: EnrollmentId) -> Self {
        Self {
            participant_a: first,
            participant_b: Some(second),
            outcome: Outcome::Tied,
        }
    }

    pub fn bye(recipient: EnrollmentId) -> Self {
        Self {
            participant_a: recipient,
            participant_b: None,
            outcome: Outcome::AHadBye,
        }
    }

    pub fn winner(&self) -> Option<EnrollmentId> {
        match self.outcome {
            Outcome::AWon | Outcome::AHadBye => Some(self.participant_a),
            Outcome::BWon => self.participant_b,
            Outcome::Tied => None,
        }
    }

    pub fn loser(&self) -> Option<EnrollmentId> {
        match self.outcome {
            Outcome::AWon => self.participant_b,
            Outcome::BWon => Some(self.participant_a),
            Outcome::Tied | Outcome::AHadBye => None,
        }
    }

    pub fn participants(&self) -> impl Iterator<Item = EnrollmentId> + '_ {
        std::iter::once(self.participant_a).chain(self.participant_b)
    }

    /// The two real players of this match, if it had two
    pub fn opponents(&self) -> Option<(EnrollmentId, EnrollmentId)> {
        self.participant_b.map(|b| (self.participant_a, b))
    }
}

/// An enrolled player as seen by the standings builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrant {
    pub enrollment_id: EnrollmentId,
    pub player_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub enrollment_id: EnrollmentId,
    pub player_name: String,
    pub wins: u32,
    pub matches_played: u32,
    pub had_bye: bool,
    pub secondary_score: u32,
}

/// One side of a pairing: a real enrolled player or the synthetic bye slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PairingEntry {
    Player {
        enrollment_id: EnrollmentId,
        name: String,
    },
    Bye,
}

impl PairingEntry {
    pub const BYE_LABEL: &'static str = "bye";

    pub fn player(enrollment_id: EnrollmentId, name: impl Into<String>) -> Self {
        Self::Player {
            enrollment_id,
            name: name.into(),
        }
    }

    pub fn enrollment_id(&self) -> Option<EnrollmentId> {
        match self {
            Self::Player { enrollment_id, .. } => Some(*enrollment_id),
            Self::Bye => None,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Self::Bye)
    }

    /// External id rendering; the bye slot becomes `"bye"`
    pub fn id_label(&self) -> String {
        match self {
            Self::Player { enrollment_id, .. } => enrollment_id.to_string(),
            Self::Bye => Self::BYE_LABEL.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Player { name, .. } => name,
            Self::Bye => Self::BYE_LABEL,
        }
    }
}

impl From<&Standing> for PairingEntry {
    fn from(standing: &Standing) -> Self {
        Self::player(standing.enrollment_id, standing.player_name.clone())
    }
}

impl fmt::Display for PairingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player {
                enrollment_id,
                name,
            } => write!(f, "enrollment {} ({})", enrollment_id, name),
            Self::Bye => f.write_str("bye slot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub first: PairingEntry,
    pub second: PairingEntry,
}

impl Pairing {
    pub fn new(first: PairingEntry, second: PairingEntry) -> Self {
        Self { first, second }
    }

    pub fn is_bye(&self) -> bool {
        self.first.is_bye() || self.second.is_bye()
    }

    pub fn involves(&self, enrollment_id: EnrollmentId) -> bool {
        self.first.enrollment_id() == Some(enrollment_id)
            || self.second.enrollment_id() == Some(enrollment_id)
    }

    /// `(id_a, name_a, id_b, name_b)` with the bye rendered as `"bye"`
    pub fn to_row(&self) -> (String, String, String, String) {
        (
            self.first.id_label(),
            self.first.name().to_string(),
            self.second.id_label(),
            self.second.name().to_string(),
        )
    }
}
