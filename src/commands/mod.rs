//! Command implementations

pub mod benchmark;
pub mod score;
pub mod watch;

pub use benchmark::{BenchmarkConfig, BenchmarkResult, MatchRecord, run_benchmark, simulate_match};
pub use score::{ScoreResult, score_guess};
pub use watch::{run_watch, watch_in_room, watch_match};
