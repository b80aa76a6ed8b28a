//! TUI rendering with ratatui
//!
//! Two boards side by side, the player's keyboard and a message log.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{GuessEntry, Keyboard, MAX_ROUNDS, QWERTY_ROWS, Tag};
use crate::duel::Side;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Boards and side panel
            Constraint::Length(3), // Input area
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30), // Player board
            Constraint::Percentage(30), // Opponent board
            Constraint::Percentage(40), // Keyboard and messages
        ])
        .split(chunks[1]);

    render_player_board(f, app, main_chunks[0]);
    render_opponent_board(f, app, main_chunks[1]);
    render_side_panel(f, app, main_chunks[2]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("⚔️  WORDLE DUEL - You vs AI")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

const fn tag_color(tag: Tag) -> Color {
    match tag {
        Tag::Correct => Color::Green,
        Tag::Present => Color::Yellow,
        Tag::Absent => Color::DarkGray,
    }
}

fn guess_line(entry: &GuessEntry) -> Line<'static> {
    let spans: Vec<Span> = entry
        .guess
        .text()
        .chars()
        .zip(entry.verdict.tags())
        .map(|(ch, &tag)| {
            Span::styled(
                format!(" {} ", ch.to_ascii_uppercase()),
                Style::default()
                    .fg(Color::Black)
                    .bg(tag_color(tag))
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    Line::from(spans)
}

fn placeholder_line(text: &'static str, style: Style) -> Line<'static> {
    Line::from(Span::styled(text, style))
}

fn board(title: String, mut lines: Vec<Line<'static>>) -> Paragraph<'static> {
    while lines.len() < MAX_ROUNDS {
        lines.push(placeholder_line(
            " _  _  _  _  _ ",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
}

fn render_player_board(f: &mut Frame, app: &App, area: Rect) {
    let lines = app.duel.state().player_board().iter().map(guess_line).collect();
    f.render_widget(board(" You ".to_string(), lines), area);
}

fn render_opponent_board(f: &mut Frame, app: &App, area: Rect) {
    let state = app.duel.state();
    let mut lines: Vec<Line<'static>> = state.opponent_board().iter().map(guess_line).collect();

    // Submitted but unrevealed guesses stay hidden
    if state.opponent_waiting() {
        lines.push(placeholder_line(
            " ?  ?  ?  ?  ? ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let title = if state.opponent_waiting() {
        " AI (submitted) ".to_string()
    } else {
        " AI ".to_string()
    };
    f.render_widget(board(title, lines), area);
}

fn render_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Keyboard
            Constraint::Min(3),    // Messages
        ])
        .split(area);

    render_keyboard(f, &app.duel.state().player_keyboard(), chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_keyboard(f: &mut Frame, keyboard: &Keyboard, area: Rect) {
    let lines: Vec<Line> = QWERTY_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .map(|letter| {
                    let style = keyboard.state(letter).map_or_else(
                        || Style::default().fg(Color::White),
                        |tag| Style::default().fg(Color::Black).bg(tag_color(tag)),
                    );
                    Span::styled(format!("{} ", letter.to_ascii_uppercase()), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let keyboard = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Keyboard ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(keyboard, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let state = app.duel.state();
    let (title, content, color) = match app.input_mode {
        InputMode::GameOver => (
            format!(" {} | Press 'n' for new match or 'q' to quit ", state.outcome().headline()),
            String::new(),
            Color::Green,
        ),
        InputMode::Guessing if state.round().is_submitted(Side::Player) => (
            " Waiting for opponent... ".to_string(),
            String::new(),
            Color::Magenta,
        ),
        InputMode::Guessing => (
            format!(" Round {} - type a 5-letter word, Enter to submit ", state.round().index()),
            app.input_buffer.to_uppercase(),
            Color::Yellow,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let round_text = format!("Round {}/{MAX_ROUNDS}", app.duel.state().round().index());
    let round = Paragraph::new(round_text).alignment(Alignment::Center);
    f.render_widget(round, chunks[0]);

    let stats_text = format!(
        "W {} | L {} | D {}",
        app.stats.wins, app.stats.losses, app.stats.draws
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);

    let candidates_text = format!("AI candidates: {}", app.ai_candidates());
    let candidates = Paragraph::new(candidates_text).alignment(Alignment::Center);
    f.render_widget(candidates, chunks[2]);

    let help_text = match app.input_mode {
        InputMode::GameOver => "q: Quit | n: New Match",
        InputMode::Guessing => "Esc: Quit | Enter: Submit",
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}
