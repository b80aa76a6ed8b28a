//! Wordle Duel
//!
//! Two players guess the same secret word over up to six rounds. Each round's
//! guesses are revealed only once both players have submitted. The opponent
//! is either a constraint-filtering AI or a peer synchronized through a
//! shared store.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_duel::core::Word;
//! use wordle_duel::duel::{DuelCoordinator, MatchOutcome, PeerMode};
//! use wordle_duel::wordlists::embedded_bank;
//!
//! let bank = embedded_bank();
//! let secret = Word::new("crane").unwrap();
//! let peer = PeerMode::Ai { secret: secret.clone() };
//! let mut duel = DuelCoordinator::start(&bank, secret, peer);
//!
//! duel.submit_guess("slate").unwrap();
//! let ticket = duel.ticket();
//! let reveal = duel
//!     .submit_opponent_guess(ticket, Word::new("crane").unwrap())
//!     .unwrap();
//!
//! assert_eq!(reveal.step.outcome(), Some(MatchOutcome::OpponentWin));
//! ```

// Core domain types
pub mod core;

// Word lists
pub mod wordlists;

// AI opponent
pub mod ai;

// Match rules and coordination
pub mod duel;

// Shared store abstraction
pub mod sync;

// Async drivers for networked play
pub mod session;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
