//! Key row widget - one column per grid key

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use decimal_synth::{backend::BackendFactory, Keyboard};

/// Render every key of the current grid and return where each one landed.
pub fn render_keys<F: BackendFactory>(
    frame: &mut Frame,
    area: Rect,
    keyboard: &Keyboard<F>,
) -> Vec<Rect> {
    let grid = keyboard.grid();
    if grid.is_empty() || area.width == 0 {
        return Vec::new();
    }

    let count = grid.len() as u32;
    let columns = Layout::horizontal(vec![Constraint::Ratio(1, count); grid.len()]).split(area);

    for (key, &rect) in grid.iter().zip(columns.iter()) {
        let whole = key.tone.fract() == 0.0;
        let sounding = keyboard.is_sounding(key.tone);

        let (bg, fg) = match (sounding, whole) {
            (true, _) => (Color::Cyan, Color::Black),
            (false, true) => (Color::White, Color::Black),
            (false, false) => (Color::Gray, Color::Black),
        };
        let style = Style::default().bg(bg).fg(fg);

        let label = key.label();
        let mut lines = Vec::with_capacity(2);
        if keyboard.is_reference_note(key.tone) {
            lines.push(Line::from(Span::styled(
                "●",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::default());
        }
        // Narrow keys at high zoom would just show clipped digits
        if label.len() < rect.width as usize {
            lines.push(Line::from(label));
        }

        let block = if rect.width >= 3 {
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray).bg(bg))
        } else {
            Block::default()
        };

        let widget = Paragraph::new(lines)
            .centered()
            .style(style)
            .block(block);
        frame.render_widget(widget, rect);
    }

    columns.to_vec()
}
