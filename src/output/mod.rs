//! Terminal output formatting
//!
//! Display utilities for CLI results and match narration.

pub mod display;
pub mod formatters;

pub use display::{
    narrate_event, print_benchmark_result, print_match_summary, print_roster, print_score_result,
};
