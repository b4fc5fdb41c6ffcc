use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::models::FinalScore;
use crate::scoring::{message_tier, percentage};
use crate::ui::layout::calculate_result_chunks;

fn gauge_color(pct: f64) -> Color {
    if pct >= 80.0 {
        Color::Green
    } else if pct >= 50.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn draw_result(f: &mut Frame, result: FinalScore) {
    let layout = calculate_result_chunks(f.area());
    let tier = message_tier(result);
    let pct = percentage(result);

    let title = Paragraph::new(format!(
        "{}  Lesson Completed! การเรียนเสร็จสิ้น  {}",
        tier.emoji(),
        tier.emoji()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let content = Block::default().borders(Borders::ALL).title("Your Score");
    f.render_widget(content, layout.content_area);

    let score_text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                result.score.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" / {}", result.total),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    let score = Paragraph::new(score_text).alignment(Alignment::Center);
    f.render_widget(score, layout.score_area);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(gauge_color(pct)))
        .ratio((pct / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.0}%", pct));
    f.render_widget(gauge, layout.gauge_area);

    let message = Paragraph::new(vec![Line::from(""), Line::from(tier.message())])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(message, layout.message_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Enter/r",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Play Again (เล่นอีกครั้ง)  "),
        Span::styled(
            "Ctrl+C",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
