use serde::Serialize;

use crate::database::Tournament;
use crate::domain::{Pairing, Standing};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentItem {
    pub id: i64,
    pub name: String,
}

impl From<Tournament> for TournamentItem {
    fn from(tournament: Tournament) -> Self {
        Self {
            id: tournament.id,
            name: tournament.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingItem {
    pub rank: usize,
    pub enrollment_id: i64,
    pub player_name: String,
    pub wins: u32,
    pub matches_played: u32,
    pub had_bye: bool,
    pub secondary_score: u32,
}

impl StandingItem {
    pub fn ranked(standings: &[Standing]) -> Vec<Self> {
        standings
            .iter()
            .enumerate()
            .map(|(idx, s)| Self {
                rank: idx + 1,
                enrollment_id: s.enrollment_id,
                player_name: s.player_name.clone(),
                wins: s.wins,
                matches_played: s.matches_played,
                had_bye: s.had_bye,
                secondary_score: s.secondary_score,
            })
            .collect()
    }
}

/// Ids are strings so the bye slot can be rendered as `"bye"`
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PairingItem {
    pub first_id: String,
    pub first_name: String,
    pub second_id: String,
    pub second_name: String,
}

impl From<&Pairing> for PairingItem {
    fn from(pairing: &Pairing) -> Self {
        let (first_id, first_name, second_id, second_name) = pairing.to_row();
        Self {
            first_id,
            first_name,
            second_id,
            second_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingsResponse {
    pub tournament_id: i64,
    pub tie_break: String,
    pub pairs: Vec<PairingItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub kind: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PairingEntry;

    #[test]
    fn bye_pair_serializes_with_sentinel() {
        let pairing = Pairing::new(PairingEntry::player(12, "Cathy Burton"), PairingEntry::Bye);
        let json = serde_json::to_value(PairingItem::from(&pairing)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "firstId": "12",
                "firstName": "Cathy Burton",
                "secondId": "bye",
                "secondName": "bye"
            })
        );
    }
}
