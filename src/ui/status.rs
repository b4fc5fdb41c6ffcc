use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::utils::{centered_rect, spinner_frame};

pub fn draw_loading(f: &mut Frame, tick: u64) {
    let area = centered_rect(70, 40, f.area());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  🦁", spinner_frame(tick)),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "กำลังเตรียมสัตว์น่ารักๆ...",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("กรุณารอสักครู่ (Preparing Quiz...)"),
    ];

    let loading = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(loading, area);
}

pub fn draw_error(f: &mut Frame, message: &str) {
    let area = centered_rect(70, 40, f.area());

    let text = vec![
        Line::from(""),
        Line::from("😕"),
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" กลับไปหน้าแรก (Back to start)"),
        ]),
    ];

    let error = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Error"));
    f.render_widget(error, area);
}
