use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct PlayLayout {
    pub header_area: Rect,
    pub progress_area: Rect,
    pub card_area: Rect,
    pub feedback_area: Rect,
    pub options_area: Rect,
    pub help_area: Rect,
}

pub struct ResultLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    pub footer_area: Rect,
    // Sub-layout for content area
    pub score_area: Rect,
    pub gauge_area: Rect,
    pub message_area: Rect,
}

pub fn calculate_play_chunks(area: Rect) -> PlayLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Length(3),
        ])
        .split(area);

    PlayLayout {
        header_area: chunks[0],
        progress_area: chunks[1],
        card_area: chunks[2],
        feedback_area: chunks[3],
        options_area: chunks[4],
        help_area: chunks[5],
    }
}

/// Split the options area into a grid of `columns` × `rows` cells, row-major.
pub fn calculate_option_cells(area: Rect, columns: usize, count: usize) -> Vec<Rect> {
    if columns == 0 || count == 0 {
        return Vec::new();
    }
    let rows = count.div_ceil(columns);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    let mut cells = Vec::with_capacity(count);
    for row in row_areas.iter() {
        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row);
        cells.extend(col_areas.iter().copied());
    }
    cells.truncate(count);
    cells
}

pub fn calculate_result_chunks(area: Rect) -> ResultLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    let content_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(chunks[1]);

    ResultLayout {
        header_area: chunks[0],
        content_area: chunks[1],
        footer_area: chunks[2],
        score_area: content_chunks[0],
        gauge_area: content_chunks[1],
        message_area: content_chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_layout() {
        let area = Rect::new(0, 0, 80, 40);
        let layout = calculate_play_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.progress_area.height, 3);
        assert_eq!(layout.feedback_area.height, 3);
        assert_eq!(layout.options_area.height, 8);
        assert_eq!(layout.help_area.height, 3);
        // 38 rows inside the margin, 20 of them fixed.
        assert_eq!(layout.card_area.height, 18);
    }

    #[test]
    fn test_option_cells_grid() {
        let area = Rect::new(0, 0, 40, 8);
        let cells = calculate_option_cells(area, 2, 4);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0], Rect::new(0, 0, 20, 4));
        assert_eq!(cells[1], Rect::new(20, 0, 20, 4));
        assert_eq!(cells[2], Rect::new(0, 4, 20, 4));
        assert_eq!(cells[3], Rect::new(20, 4, 20, 4));
    }

    #[test]
    fn test_option_cells_odd_count() {
        let area = Rect::new(0, 0, 40, 8);
        let cells = calculate_option_cells(area, 2, 3);
        assert_eq!(cells.len(), 3);
        assert!(calculate_option_cells(area, 2, 0).is_empty());
    }

    #[test]
    fn test_result_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_result_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.footer_area.height, 3);
        assert_eq!(layout.content_area.height, 32);
        assert_eq!(layout.score_area.height, 4);
        assert_eq!(layout.gauge_area.height, 3);
        assert_eq!(layout.message_area.height, 30 - 7);
    }
}
