//! TUI application state and logic

use crate::ai::{AiSchedule, ConstraintFilter, Pacing};
use crate::core::{WORD_LEN, Word};
use crate::duel::{
    DuelCoordinator, DuelError, DuelEvent, MatchOutcome, PeerMode, RoundTicket, Side, Step,
};
use crate::wordlists::{Dictionary, WordBank};
use anyhow::{Result, anyhow};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};
use rand::rngs::StdRng;
use std::io;
use std::time::{Duration, Instant};

/// Longest the event loop blocks waiting for a key
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Application state for a duel against the AI
pub struct App<'a> {
    pub duel: DuelCoordinator<'a, WordBank>,
    bank: &'a WordBank,
    filter: ConstraintFilter<'a>,
    schedule: AiSchedule<Instant>,
    pacing: Pacing,
    rng: StdRng,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    pub input_mode: InputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Guessing,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl Statistics {
    fn record(&mut self, outcome: MatchOutcome) {
        self.total_games += 1;
        match outcome {
            MatchOutcome::PlayerWin => self.wins += 1,
            MatchOutcome::OpponentWin => self.losses += 1,
            _ => self.draws += 1,
        }
    }
}

impl<'a> App<'a> {
    /// Start the first match
    ///
    /// # Errors
    /// Fails if the bank has no answers to pick a secret from.
    pub fn new(bank: &'a WordBank, pacing: Pacing, mut rng: StdRng) -> Result<Self> {
        let secret = pick_secret(bank, &mut rng)?;
        let peer = PeerMode::Ai {
            secret: secret.clone(),
        };

        Ok(Self {
            duel: DuelCoordinator::start(bank, secret, peer),
            bank,
            filter: ConstraintFilter::new(bank.answers()),
            schedule: AiSchedule::new(),
            pacing,
            rng,
            input_buffer: String::new(),
            messages: vec![
                Message {
                    text: "Welcome! You and the AI are guessing the same word.".to_string(),
                    style: MessageStyle::Info,
                },
                Message {
                    text: "Neither sees the other's guess until both are in.".to_string(),
                    style: MessageStyle::Info,
                },
            ],
            stats: Statistics::default(),
            should_quit: false,
            input_mode: InputMode::Guessing,
        })
    }

    /// Make sure the AI has a guess scheduled for the open round
    pub fn plan_ai(&mut self, now: Instant) {
        let state = self.duel.state();
        let ticket = state.ticket();
        if state.is_over() || state.round().is_submitted(Side::Opponent) {
            self.schedule.cancel();
            return;
        }

        self.schedule.retain_ticket(ticket);
        if !self.schedule.is_pending_for(ticket) {
            let delay = self.pacing.sample(&mut self.rng);
            debug!("AI guessing round {} in {delay:?}", ticket.round);
            self.schedule.schedule(ticket, now + delay);
        }
    }

    /// When the event loop next has to wake up for the AI
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.schedule.deadline()
    }

    /// Submit the AI's guess if its delay has passed
    pub fn tick(&mut self, now: Instant) {
        if let Some(pending) = self.schedule.take_due(now) {
            self.ai_guess(pending.ticket, now);
        }
    }

    fn ai_guess(&mut self, ticket: RoundTicket, now: Instant) {
        let Some(word) = self.filter.next_guess(&mut self.rng) else {
            self.add_message("The AI has run out of words!", MessageStyle::Error);
            return;
        };

        match self.duel.submit_opponent_guess(ticket, word.clone()) {
            Ok(submission) => {
                self.filter.observe(word, &submission.verdict);
                self.apply_step(submission.step, now);
            }
            Err(DuelError::StaleTicket { .. }) => debug!("Dropped AI guess for a closed round"),
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    /// Submit the typed guess
    pub fn submit_input(&mut self, now: Instant) {
        let input = self.input_buffer.clone();
        match self.duel.submit_guess(&input) {
            Ok(submission) => {
                self.input_buffer.clear();
                self.apply_step(submission.step, now);
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    fn apply_step(&mut self, step: Step, now: Instant) {
        for event in step.events {
            match event {
                DuelEvent::PlayerSubmitted { .. } => {
                    if self.duel.state().awaiting_opponent() {
                        self.add_message("Waiting for opponent...", MessageStyle::Info);
                    }
                }
                DuelEvent::OpponentSubmitted { .. } => {
                    self.add_message("Opponent submitted their word!", MessageStyle::Info);
                }
                // The local AI never publishes typing status
                DuelEvent::OpponentTyping { .. } => {}
                DuelEvent::Revealed { round, .. } => {
                    self.add_message(&format!("Round {round} revealed"), MessageStyle::Info);
                }
                DuelEvent::RoundAdvanced { .. } => {
                    self.schedule.cancel();
                    self.plan_ai(now);
                }
                DuelEvent::GameOver { outcome } => {
                    self.schedule.cancel();
                    self.stats.record(outcome);
                    self.input_mode = InputMode::GameOver;

                    let style = if outcome == MatchOutcome::PlayerWin {
                        MessageStyle::Success
                    } else {
                        MessageStyle::Error
                    };
                    self.add_message(outcome.headline(), style);
                    let secret = self.duel.state().secret().text().to_uppercase();
                    self.add_message(&format!("The word was {secret}"), MessageStyle::Info);
                    self.add_message("Press 'n' for a new match or 'q' to quit.", MessageStyle::Info);
                }
            }
        }
    }

    /// Throw the current match away and start another
    ///
    /// # Errors
    /// Fails if the bank has no answers to pick a secret from.
    pub fn new_game(&mut self, now: Instant) -> Result<()> {
        let secret = pick_secret(self.bank, &mut self.rng)?;
        let peer = PeerMode::Ai {
            secret: secret.clone(),
        };
        self.duel.restart(secret, peer);
        self.filter.reset();
        self.schedule.cancel();
        self.input_buffer.clear();
        self.messages.clear();
        self.input_mode = InputMode::Guessing;
        self.add_message("New match started!", MessageStyle::Info);
        self.plan_ai(now);
        Ok(())
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 6 messages
        if self.messages.len() > 6 {
            self.messages.remove(0);
        }
    }

    /// Words the AI could still be looking for
    #[must_use]
    pub fn ai_candidates(&self) -> usize {
        self.filter.candidate_count()
    }
}

fn pick_secret(bank: &WordBank, rng: &mut StdRng) -> Result<Word> {
    bank.pick_random_secret(rng)
        .ok_or_else(|| anyhow!("Answer list is empty"))
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let played = run_app(&mut terminal, app);

    // Leave the alternate screen before reporting anything
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    played
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    app.plan_ai(Instant::now());

    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        // Wake up for the AI's deadline even without input
        let now = Instant::now();
        let timeout = app
            .next_deadline()
            .map_or(IDLE_POLL, |due| due.saturating_duration_since(now).min(IDLE_POLL));

        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
        {
            // Release and repeat events would double letters on some terminals
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let now = Instant::now();
            match (app.input_mode, key.code) {
                (_, KeyCode::Char('c')) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true;
                }
                (_, KeyCode::Esc) | (InputMode::GameOver, KeyCode::Char('q')) => {
                    app.should_quit = true;
                }
                (InputMode::GameOver, KeyCode::Char('n')) => app.new_game(now)?,
                (InputMode::GameOver, _) => {
                    // Between matches only n and q do anything
                }
                (InputMode::Guessing, KeyCode::Char(c)) => {
                    if app.input_buffer.len() < WORD_LEN && c.is_ascii_alphabetic() {
                        app.input_buffer.push(c.to_ascii_lowercase());
                    }
                }
                (InputMode::Guessing, KeyCode::Backspace) => {
                    app.input_buffer.pop();
                }
                (InputMode::Guessing, KeyCode::Enter) => app.submit_input(now),
                _ => {}
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
