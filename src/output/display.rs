//! Display functions for command results

use super::formatters::{colored_guess, create_progress_bar, plain_guess};
use crate::commands::{BenchmarkResult, ScoreResult};
use crate::duel::{DuelEvent, MatchOutcome, MatchSummary};
use crate::sync::Participant;
use colored::Colorize;

/// Print the result of scoring a guess
pub fn print_score_result(result: &ScoreResult) {
    println!(
        "\n{} vs {}",
        result.guess.text().to_uppercase().bright_yellow().bold(),
        result.secret.text().to_uppercase().cyan()
    );
    println!("{}  {}", result.verdict.to_emoji(), result.verdict);
    println!(
        "   {} correct, {} present (code {})",
        result.verdict.count_correct().to_string().green().bold(),
        result.verdict.count_present().to_string().yellow().bold(),
        result.verdict.code()
    );
}

/// Print who is in the room
pub fn print_roster(players: &[Participant]) {
    let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
    println!(
        "{} {}",
        "👥 In the room:".bright_cyan().bold(),
        names.join(", ")
    );
}

/// Narrate one event as seen by `me`, playing against `them`
pub fn narrate_event(me: &str, them: &str, event: &DuelEvent) {
    match event {
        DuelEvent::PlayerSubmitted { round, verdict } => {
            println!("  {me} locked in round {round} {}", verdict.to_emoji());
        }
        DuelEvent::OpponentTyping { typing: true } => {
            println!("  {}", format!("{them} is typing...").dimmed());
        }
        DuelEvent::OpponentTyping { typing: false } => {}
        DuelEvent::OpponentSubmitted { round } => {
            println!("  {them} locked in round {round}");
        }
        DuelEvent::Revealed {
            round,
            player,
            opponent,
        } => {
            println!("\n{}", format!("Round {round} revealed").bright_cyan().bold());
            println!("  {me:>8} {}", colored_guess(player));
            println!("  {them:>8} {}", colored_guess(opponent));
        }
        DuelEvent::RoundAdvanced { round } => {
            println!("\n{}", format!("── Round {round} ──").cyan());
        }
        DuelEvent::GameOver { outcome } => {
            println!("\n{}", outcome_line(me, them, *outcome));
        }
    }
}

fn outcome_line(me: &str, them: &str, outcome: MatchOutcome) -> String {
    match outcome {
        MatchOutcome::PlayerWin => format!("🏆 {me} wins!").green().bold().to_string(),
        MatchOutcome::OpponentWin => format!("🏆 {them} wins!").green().bold().to_string(),
        MatchOutcome::Collision => outcome.headline().red().bold().to_string(),
        other => other.headline().yellow().bold().to_string(),
    }
}

/// Print a finished match
pub fn print_match_summary(summary: &MatchSummary) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", summary.outcome.headline().bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!(
        "   Secret:        {}",
        summary.secret.text().to_uppercase().bright_yellow().bold()
    );
    println!("   Rounds played: {}", summary.rounds_played);
    if summary.went_the_distance() {
        println!("   {}", "Went the full six rounds".dimmed());
    }

    println!();
    let rows = summary.player.entries().iter().zip(summary.opponent.entries());
    for (round, (mine, theirs)) in rows.enumerate() {
        println!("   {}  {}   {}", round + 1, plain_guess(mine), plain_guess(theirs));
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Matches:".bright_cyan().bold());
    println!("   Matches played:   {}", result.total_matches);
    println!(
        "   Average rounds:   {}",
        format!("{:.2}", result.average_rounds).bright_yellow().bold()
    );
    println!("   Deliveries:       {}", result.deliveries);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Matches/second:   {:.1}", result.matches_per_second);

    println!("\n🔁 {}", "Consistency:".bright_cyan().bold());
    print_check("Disagreements", result.disagreements);
    print_check("Repeated reveals", result.repeated_reveals);
    print_check("Stalled matches", result.stalled);

    println!("\n📈 {}", "Outcomes (first seat):".bright_cyan().bold());
    let finished: usize = result.distribution.values().sum();
    for outcome in MatchOutcome::TERMINAL {
        let count = result.distribution.get(&outcome).copied().unwrap_or(0);
        let pct = if finished == 0 {
            0.0
        } else {
            (count as f64 / finished as f64) * 100.0
        };
        let bar = create_progress_bar(pct, 100.0, 40);
        println!(
            "   {:<12} {} {count:4} ({pct:5.1}%)",
            outcome_label(outcome),
            bar.green()
        );
    }
}

fn print_check(label: &str, count: usize) {
    let value = if count == 0 {
        "0".green()
    } else {
        count.to_string().red().bold()
    };
    println!("   {label:<17} {value}");
}

const fn outcome_label(outcome: MatchOutcome) -> &'static str {
    match outcome {
        MatchOutcome::Ongoing => "ongoing",
        MatchOutcome::PlayerWin => "first wins",
        MatchOutcome::OpponentWin => "second wins",
        MatchOutcome::BothWon => "both won",
        MatchOutcome::Collision => "collision",
        MatchOutcome::Exhausted => "exhausted",
    }
}
