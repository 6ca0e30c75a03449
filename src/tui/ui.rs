//! Stateless UI rendering for the trainer.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::App;
use super::feedback::{clock_line, feedback_line, stats_line};
use crate::{NumberSource, TickScheduler, TrainerState};

/// Renders the whole screen.
pub fn draw<N: NumberSource, S: TickScheduler>(frame: &mut Frame, app: &App<N, S>) {
    let area = frame.area();
    let trainer = app.trainer();
    let display = trainer.display_state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(5), // Number
            Constraint::Length(1), // Clock
            Constraint::Length(3), // Input
            Constraint::Length(3), // Feedback
            Constraint::Length(3), // Stats
            Constraint::Min(0),
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new(format!("Strictly Digits - {} digits", display.digits()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let number_style = match display.state() {
        TrainerState::Revealing => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::DarkGray),
    };
    let number = Paragraph::new(vec![Line::from(""), Line::from(display.visible_value().clone())])
        .style(number_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(number, chunks[1]);

    let clock = Paragraph::new(clock_line(*display.elapsed_ms())).alignment(Alignment::Center);
    frame.render_widget(clock, chunks[2]);

    let (input_style, border_style) = if *display.state() == TrainerState::Recalling {
        let border = if app.input_focused() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        (Style::default(), border)
    } else {
        (
            Style::default().add_modifier(Modifier::DIM),
            Style::default().fg(Color::DarkGray),
        )
    };
    let input = Paragraph::new(trainer.input().to_string())
        .style(input_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Recall"),
        );
    frame.render_widget(input, chunks[3]);

    let feedback = Paragraph::new(feedback_line(trainer.last_result()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Last round"));
    frame.render_widget(feedback, chunks[4]);

    let stats = Paragraph::new(stats_line(&trainer.stats()))
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Session"));
    frame.render_widget(stats, chunks[5]);

    let help = Paragraph::new("0-9: type | Backspace: delete | Enter: new number | Esc: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[7]);
}
