//! Wordle Duel - CLI
//!
//! Duel the AI in the terminal, watch two AIs play over a shared room, or
//! stress the reveal logic with many simulated matches.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use wordle_duel::{
    ai::Pacing,
    commands::{BenchmarkConfig, run_benchmark, run_watch, score_guess},
    output::{print_benchmark_result, print_match_summary, print_score_result},
    wordlists::{ANSWERS, WordBank, embedded_bank, loader::words_from_slice},
};

#[derive(Parser)]
#[command(
    name = "wordle_duel",
    about = "Two-player Wordle with simultaneous reveal and a constraint-filtering AI",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Wordlist: 'all' (default, answers plus extra guesses), 'answers', or path to file
    #[arg(short = 'w', long, global = true, default_value = "all")]
    wordlist: String,

    /// Seed for secrets and AI choices (random if omitted)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Shortest AI thinking time in milliseconds
    #[arg(long, global = true, default_value = "3000")]
    ai_min_delay: u64,

    /// Longest AI thinking time in milliseconds
    #[arg(long, global = true, default_value = "10000")]
    ai_max_delay: u64,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Duel the AI in the TUI (default)
    Play,

    /// Watch two AIs duel through a shared room
    Watch,

    /// Play many AI-vs-AI matches through an unreliable simulated store
    Benchmark {
        /// Number of matches to play
        #[arg(short = 'n', long, default_value = "200")]
        count: usize,
    },

    /// Score a guess against a secret
    Score {
        /// The secret word
        secret: String,
        /// The guess to score
        guess: String,
    },
}

/// Load the word bank based on the -w flag
///
/// - "all": embedded answers as secrets, answers plus allowed words as guesses
/// - "answers": embedded answers for both
/// - "<path>": custom list for both
fn load_bank(wordlist_mode: &str) -> Result<WordBank> {
    use wordle_duel::wordlists::loader::load_from_file;

    match wordlist_mode {
        "all" => Ok(embedded_bank()),
        "answers" => Ok(WordBank::new(words_from_slice(ANSWERS), &[])),
        path => {
            let custom_words = load_from_file(path)?;
            if custom_words.is_empty() {
                bail!("No 5-letter words found in {path}");
            }
            Ok(WordBank::new(custom_words, &[]))
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let bank = load_bank(&cli.wordlist)?;
    info!(
        "{} possible secrets, {} accepted guesses",
        bank.answers().len(),
        bank.accepted_count()
    );
    let seed = cli.seed.unwrap_or_else(rand::random);
    let pacing = Pacing::new(
        Duration::from_millis(cli.ai_min_delay),
        Duration::from_millis(cli.ai_max_delay),
    );

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_play_command(&bank, pacing, seed),
        Commands::Watch => run_watch_command(&bank, pacing, seed),
        Commands::Benchmark { count } => {
            run_benchmark_command(&bank, count, seed);
            Ok(())
        }
        Commands::Score { secret, guess } => {
            let result = score_guess(&secret, &guess)?;
            print_score_result(&result);
            Ok(())
        }
    }
}

fn run_play_command(bank: &WordBank, pacing: Pacing, seed: u64) -> Result<()> {
    use wordle_duel::interactive::{App, run_tui};

    let app = App::new(bank, pacing, StdRng::seed_from_u64(seed))?;
    run_tui(app)
}

fn run_watch_command(bank: &WordBank, pacing: Pacing, seed: u64) -> Result<()> {
    println!("Watching a duel (seed {seed})...");
    match run_watch(bank, pacing, seed)? {
        Some(summary) => print_match_summary(&summary),
        None => println!("The room closed before the match ended"),
    }
    Ok(())
}

fn run_benchmark_command(bank: &WordBank, count: usize, seed: u64) {
    println!("Running {count} simulated duels (seed {seed})...");

    let progress = ProgressBar::new(count as u64);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {elapsed}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█▓▒░");
    progress.set_style(style);

    let result = run_benchmark(bank, &BenchmarkConfig::new(count, seed), &progress);
    print_benchmark_result(&result);
}
