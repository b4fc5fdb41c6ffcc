use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::media::illustration_url;
use crate::play::{AnswerState, MediaState, PlayState, OPTION_COLUMNS};
use crate::ui::layout::{calculate_option_cells, calculate_play_chunks};
use crate::utils::truncate_string;

fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

pub fn draw_play(f: &mut Frame, play: &PlayState) {
    let layout = calculate_play_chunks(f.area());
    let question = play.current();

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout.header_area);

    let progress = Paragraph::new(format!(
        "QUESTION {} / {}",
        play.current_index + 1,
        play.total()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Left)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(progress, header_chunks[0]);

    let score = Paragraph::new(format!("SCORE {}", play.score))
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(score, header_chunks[1]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(play.progress().clamp(0.0, 1.0))
        .label(format!("{:.0}%", play.progress() * 100.0));
    f.render_widget(gauge, layout.progress_area);

    let mut card = Text::default();
    match play.media {
        MediaState::Loading => {
            card.push_line(Line::from(Span::styled(
                "กำลังวาดรูป... (Creating Image)",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            )));
        }
        MediaState::Ready | MediaState::Unavailable => {
            card.push_line(Line::from(vec![
                Span::from("แปลว่า: "),
                Span::styled(
                    question.translation.as_str(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            card.push_line(Line::from(""));
            if play.media == MediaState::Ready {
                let width = layout.card_area.width.saturating_sub(4) as usize;
                let url = illustration_url(&question.word, play.seed).unwrap_or_default();
                card.push_line(Line::from(Span::styled(
                    format!("🖼  {}", truncate_string(&url, width.saturating_sub(4))),
                    Style::default().fg(Color::DarkGray),
                )));
            } else {
                card.push_line(Line::from(Span::styled(
                    "🖼  Picture unavailable (ไม่มีรูปภาพ)",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            card.push_line(Line::from(""));
            card.push_line(Line::from(vec![key_span("s"), Span::from(" 🔊 Listen")]));
        }
    }
    let card_widget = Paragraph::new(card)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(card_widget, layout.card_area);

    let (feedback_text, feedback_style) = match play.answer {
        AnswerState::Correct => (
            "✓ Correct! ถูกต้องเก่งมาก",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        AnswerState::Incorrect => (
            "✗ Wrong! ลองใหม่อีกทีนะ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        AnswerState::Unanswered if play.media == MediaState::Loading => (
            "รอรูปภาพสักครู่...",
            Style::default().fg(Color::DarkGray),
        ),
        AnswerState::Unanswered => (
            "เลือกคำศัพท์ภาษาอังกฤษที่ถูกต้อง",
            Style::default().fg(Color::DarkGray),
        ),
    };
    let feedback = Paragraph::new(feedback_text)
        .style(feedback_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(feedback, layout.feedback_area);

    // Shake: nudge the option grid sideways while the wrong-answer flash lasts.
    let mut options_area = layout.options_area;
    if play.shaking && options_area.width > 2 {
        options_area.x += 1;
        options_area.width -= 2;
    }

    let disabled = !play.accepts_answers();
    let cells = calculate_option_cells(options_area, OPTION_COLUMNS, question.options.len());
    for (i, (option, cell)) in question.options.iter().zip(cells).enumerate() {
        let selected = play.selected_option.as_deref() == Some(option.as_str());
        let highlighted = play.highlighted == i && !disabled;

        let style = if selected && question.is_correct(option) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else if selected {
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else if disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let border_style = if highlighted {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let button = Paragraph::new(format!("{}. {}", i + 1, option))
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border_style));
        f.render_widget(button, cell);
    }

    let help_text = vec![Line::from(vec![
        key_span("1-4"),
        Span::from(" Answer  "),
        key_span("←↑↓→"),
        Span::from(" Choose  "),
        key_span("Space"),
        Span::from(" Answer  "),
        key_span("Enter"),
        Span::from(if play.answer == AnswerState::Correct {
            " Next  "
        } else {
            " Answer  "
        }),
        key_span("s"),
        Span::from(" Listen  "),
        key_span("Ctrl+C"),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
