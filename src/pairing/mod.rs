pub mod bye;
pub mod engine;
pub mod history;
pub mod standings;
pub mod types;

pub use bye::select_bye_recipient;
pub use engine::pair_round;
pub use history::HistoryIndex;
pub use standings::{build_standings, replay_counters};
pub use types::{Counters, TieBreak};
