use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::setup::{SetupFocus, SetupState, MAX_QUESTION_COUNT, PRESET_COUNTS};

fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

pub fn draw_setup(f: &mut Frame, state: &SetupState, model: &str) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from("Zoo Spell Quest"),
        Line::from(Span::styled(
            "เกมทายศัพท์สัตว์หรรษา",
            Style::default().fg(Color::White),
        )),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let prompt = Paragraph::new("เลือกจำนวนข้อที่ต้องการทดสอบ (How many questions?)")
        .alignment(Alignment::Center);
    f.render_widget(prompt, chunks[1]);

    let preset_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, PRESET_COUNTS.len() as u32);
            PRESET_COUNTS.len()
        ])
        .split(chunks[2]);

    for (i, count) in PRESET_COUNTS.iter().enumerate() {
        let focused = state.focus == SetupFocus::Preset(i);
        let style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let button = Paragraph::new(format!("{} ข้อ", count))
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            }));
        f.render_widget(button, preset_chunks[i]);
    }

    let custom_focused = state.focus == SetupFocus::Custom;
    let custom_text = if state.input_buffer.is_empty() && !custom_focused {
        Span::styled(
            "ใส่จำนวน... (type a number)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::from(state.input_buffer.as_str())
    };
    let custom = Paragraph::new(Line::from(custom_text))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("หรือกำหนดเอง (Custom, 1-{})", MAX_QUESTION_COUNT))
                .border_style(if custom_focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                }),
        );
    f.render_widget(custom, chunks[3]);

    if custom_focused {
        let inner_width = chunks[3].width.saturating_sub(2);
        let text_width = state.input_buffer.chars().count() as u16;
        let x = chunks[3].x + 1 + inner_width.saturating_sub(text_width) / 2 + text_width;
        f.set_cursor_position((x.min(chunks[3].right().saturating_sub(2)), chunks[3].y + 1));
    }

    if let Some(error) = &state.error {
        let error = Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(error, chunks[4]);
    }

    let model_line = Paragraph::new(format!("Questions by {}", model))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(model_line, chunks[5]);

    let help_text = vec![Line::from(vec![
        key_span("←/→"),
        Span::from(" Choose  "),
        key_span("0-9"),
        Span::from(" Custom  "),
        key_span("Enter"),
        Span::from(" Start  "),
        key_span("Esc/Ctrl+C"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[6]);
}
