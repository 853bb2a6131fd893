use colored::Colorize;

use crate::domain::{Pairing, Standing};

pub fn render_standings(standings: &[Standing]) -> String {
    let mut lines = vec![format!(
        "{:>4}  {:>6}  {:<24} {:>4} {:>7} {:>5} {:>4}",
        "#", "id", "player", "wins", "matches", "score", "bye"
    )
    .bold()
    .to_string()];

    for (idx, s) in standings.iter().enumerate() {
        lines.push(format!(
            "{:>4}  {:>6}  {:<24} {:>4} {:>7} {:>5} {:>4}",
            idx + 1,
            s.enrollment_id,
            s.player_name,
            s.wins,
            s.matches_played,
            s.secondary_score,
            if s.had_bye { "yes" } else { "" }
        ));
    }

    lines.join("\n")
}

pub fn render_pairings(pairs: &[Pairing]) -> String {
    pairs
        .iter()
        .map(|pairing| {
            let (first_id, first_name, second_id, second_name) = pairing.to_row();
            let line = format!(
                "{:>6}  {:<24} vs {:>6}  {}",
                first_id, first_name, second_id, second_name
            );
            if pairing.is_bye() {
                line.yellow().to_string()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
