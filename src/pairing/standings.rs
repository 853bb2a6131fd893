use std::collections::HashMap;

use super::types::{Counters, TieBreak};
use crate::domain::{EnrollmentId, Entrant, MatchRecord, Standing};

/// Ranks every entrant: wins desc, secondary score desc, enrollment id asc.
///
/// Counters come from replaying `matches`, never from cached columns, so the
/// log stays the single source of truth. Entrants without matches are listed
/// with zero counters.
pub fn build_standings(
    roster: &[Entrant],
    matches: &[MatchRecord],
    tie_break: TieBreak,
) -> Vec<Standing> {
    let counters = replay_counters(matches);
    let secondary = secondary_scores(matches, &counters, tie_break);

    let mut standings: Vec<Standing> = roster
        .iter()
        .map(|entrant| {
            let replayed = counters
                .get(&entrant.enrollment_id)
                .copied()
                .unwrap_or_default();
            Standing {
                enrollment_id: entrant.enrollment_id,
                player_name: entrant.player_name.clone(),
                wins: replayed.wins,
                matches_played: replayed.matches,
                had_bye: replayed.had_bye,
                secondary_score: secondary.get(&entrant.enrollment_id).copied().unwrap_or(0),
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.secondary_score.cmp(&a.secondary_score))
            .then_with(|| a.enrollment_id.cmp(&b.enrollment_id))
    });

    standings
}

/// Wins, matches played and bye flag per enrollment, derived from the log alone
pub fn replay_counters(matches: &[MatchRecord]) -> HashMap<EnrollmentId, Counters> {
    let mut counters: HashMap<EnrollmentId, Counters> = HashMap::new();

    for record in matches {
        for participant in record.participants() {
            counters.entry(participant).or_default().matches += 1;
        }
        if let Some(winner) = record.winner() {
            let entry = counters.entry(winner).or_default();
            entry.wins += 1;
            if record.opponents().is_none() {
                entry.had_bye = true;
            }
        }
    }

    counters
}

/// Second pass over the log once primary wins are known
fn secondary_scores(
    matches: &[MatchRecord],
    counters: &HashMap<EnrollmentId, Counters>,
    tie_break: TieBreak,
) -> HashMap<EnrollmentId, u32> {
    let mut scores = HashMap::new();

    if tie_break == TieBreak::None {
        return scores;
    }

    for record in matches {
        if let (Some(winner), Some(loser)) = (record.winner(), record.loser()) {
            let loser_wins = counters.get(&loser).map(|c| c.wins).unwrap_or(0);
            *scores.entry(winner).or_insert(0) += loser_wins;
        }
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<Entrant> {
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| Entrant {
                enrollment_id: idx as EnrollmentId + 1,
                player_name: name.to_string(),
            })
            .collect()
    }

    fn order(standings: &[Standing]) -> Vec<EnrollmentId> {
        standings.iter().map(|s| s.enrollment_id).collect()
    }

    #[test]
    fn players_without_matches_are_listed_with_zero_counters() {
        let standings = build_standings(&roster(&["Melpomene", "Randy"]), &[], TieBreak::None);

        assert_eq!(standings.len(), 2);
        assert!(standings.iter().all(|s| s.wins == 0 && s.matches_played == 0 && !s.had_bye));
        assert_eq!(order(&standings), vec![1, 2]);
    }

    #[test]
    fn winners_rank_above_losers() {
        let matches = vec![MatchRecord::decisive(1, 2), MatchRecord::decisive(3, 4)];
        let standings = build_standings(&roster(&["A", "B", "C", "D"]), &matches, TieBreak::None);

        assert_eq!(order(&standings), vec![1, 3, 2, 4]);
        assert!(standings.iter().all(|s| s.matches_played == 1));
        assert_eq!(standings[0].wins, 1);
        assert_eq!(standings[3].wins, 0);
    }

    #[test]
    fn ties_count_as_played_without_wins() {
        let matches = vec![MatchRecord::tied(1, 2)];
        let standings = build_standings(&roster(&["A", "B"]), &matches, TieBreak::None);

        assert!(standings.iter().all(|s| s.wins == 0 && s.matches_played == 1));
    }

    #[test]
    fn bye_is_a_win_and_sets_the_flag() {
        let matches = vec![MatchRecord::bye(3), MatchRecord::decisive(2, 1)];
        let standings = build_standings(&roster(&["A", "B", "C"]), &matches, TieBreak::None);

        assert_eq!(order(&standings), vec![2, 3, 1]);
        let c = &standings[1];
        assert_eq!((c.wins, c.matches_played, c.had_bye), (1, 1, true));
        assert!(!standings[0].had_bye);
    }

    #[test]
    fn opponent_wins_breaks_ties_in_favour_of_stronger_victims() {
        // 2 beat 1 (0 wins), 7 beat 8 (1 win after round two)
        let matches = vec![
            MatchRecord::decisive(2, 1),
            MatchRecord::decisive(3, 4),
            MatchRecord::decisive(6, 5),
            MatchRecord::decisive(7, 8),
            MatchRecord::decisive(3, 2),
            MatchRecord::decisive(6, 7),
            MatchRecord::decisive(4, 1),
            MatchRecord::decisive(8, 5),
        ];
        let names = ["A", "B", "C", "D", "E", "F", "G", "H"];

        let basic = build_standings(&roster(&names), &matches, TieBreak::None);
        assert_eq!(order(&basic), vec![3, 6, 2, 4, 7, 8, 1, 5]);

        let extended = build_standings(&roster(&names), &matches, TieBreak::OpponentWins);
        assert_eq!(order(&extended), vec![3, 6, 7, 2, 4, 8, 1, 5]);
        assert_eq!(extended[0].secondary_score, 2);
        assert_eq!(extended[2].secondary_score, 1);
    }

    #[test]
    fn recomputing_yields_identical_output() {
        let matches = vec![MatchRecord::decisive(1, 2), MatchRecord::tied(3, 4)];
        let names = ["A", "B", "C", "D"];

        let first = build_standings(&roster(&names), &matches, TieBreak::OpponentWins);
        let second = build_standings(&roster(&names), &matches, TieBreak::OpponentWins);
        assert_eq!(first, second);
    }

    #[test]
    fn total_wins_never_exceed_recorded_matches() {
        let matches = vec![
            MatchRecord::decisive(1, 2),
            MatchRecord::tied(3, 4),
            MatchRecord::bye(5),
        ];
        let counters = replay_counters(&matches);
        let wins: u32 = counters.values().map(|c| c.wins).sum();

        assert_eq!(wins, 2);
        assert!(wins as usize <= matches.len());
    }
}
