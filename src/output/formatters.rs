//! Formatting utilities for terminal output

use crate::core::{GuessEntry, Tag};
use colored::Colorize;

/// Guess letters as colored tiles
#[must_use]
pub fn colored_guess(entry: &GuessEntry) -> String {
    entry
        .guess
        .text()
        .chars()
        .zip(entry.verdict.tags())
        .map(|(ch, tag)| {
            let tile = format!(" {} ", ch.to_ascii_uppercase());
            match tag {
                Tag::Correct => tile.black().on_green().to_string(),
                Tag::Present => tile.black().on_yellow().to_string(),
                Tag::Absent => tile.white().on_bright_black().to_string(),
            }
        })
        .collect()
}

/// Guess word followed by its emoji verdict, e.g. `CRANE 🟩⬜⬜⬜🟨`
#[must_use]
pub fn plain_guess(entry: &GuessEntry) -> String {
    format!(
        "{} {}",
        entry.guess.text().to_uppercase(),
        entry.verdict.to_emoji()
    )
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
