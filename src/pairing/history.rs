use std::collections::{BTreeSet, HashMap};

use crate::domain::{EnrollmentId, MatchRecord};

static NO_OPPONENTS: BTreeSet<EnrollmentId> = BTreeSet::new();

/// Opponents each enrollment has already faced in one tournament
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryIndex {
    faced: HashMap<EnrollmentId, BTreeSet<EnrollmentId>>,
}

impl HistoryIndex {
    pub fn from_matches(matches: &[MatchRecord]) -> Self {
        let mut index = Self::default();
        for record in matches {
            index.record(record);
        }
        index
    }

    /// Decisive and tied matches link both players; a bye only registers its recipient.
    pub fn record(&mut self, record: &MatchRecord) {
        match record.opponents() {
            Some((a, b)) => {
                self.faced.entry(a).or_default().insert(b);
                self.faced.entry(b).or_default().insert(a);
            }
            None => {
                self.faced.entry(record.participant_a).or_default();
            }
        }
    }

    pub fn opponents(&self, enrollment_id: EnrollmentId) -> &BTreeSet<EnrollmentId> {
        self.faced.get(&enrollment_id).unwrap_or(&NO_OPPONENTS)
    }

    pub fn has_faced(&self, a: EnrollmentId, b: EnrollmentId) -> bool {
        self.opponents(a).contains(&b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decisive_match_is_recorded_both_ways() {
        let index = HistoryIndex::from_matches(&[MatchRecord::decisive(1, 2)]);

        assert!(index.has_faced(1, 2));
        assert!(index.has_faced(2, 1));
        assert!(!index.has_faced(1, 3));
    }

    #[test]
    fn tied_match_links_both_players() {
        let index = HistoryIndex::from_matches(&[MatchRecord::tied(3, 4)]);

        assert!(index.has_faced(3, 4));
        assert!(index.has_faced(4, 3));
    }

    #[test]
    fn bye_registers_recipient_without_opponents() {
        let index = HistoryIndex::from_matches(&[MatchRecord::bye(5)]);

        assert!(index.opponents(5).is_empty());
        assert!(!index.has_faced(5, 5));
    }

    #[test]
    fn unknown_enrollment_maps_to_empty_set() {
        let index = HistoryIndex::from_matches(&[]);

        assert!(index.opponents(42).is_empty());
    }

    #[test]
    fn opponents_accumulate_across_rounds() {
        let index = HistoryIndex::from_matches(&[
            MatchRecord::decisive(1, 2),
            MatchRecord::decisive(3, 1),
            MatchRecord::tied(1, 4),
        ]);

        assert_eq!(
            index.opponents(1).iter().copied().collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
    }
}
