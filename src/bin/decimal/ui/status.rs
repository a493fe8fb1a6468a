//! Status bar widget - scale, waveform, zoom, voices and the current slide

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use decimal_synth::{backend::BackendFactory, Keyboard};

/// Render the status bar
pub fn render_status<F: BackendFactory>(
    frame: &mut Frame,
    area: Rect,
    keyboard: &Keyboard<F>,
    error: Option<&str>,
) {
    let block = Block::default().title(" decimal ").borders(Borders::ALL);
    let config = keyboard.config();

    let mut spans = vec![
        Span::styled(
            format!(" Scale {}  ", config.scale),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{}  ", config.waveform),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("Zoom {}  ", config.zoom),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("Voices {}  ", keyboard.voice_count()),
            Style::default().fg(Color::White),
        ),
    ];

    if let Some(session) = keyboard.glide().session() {
        spans.push(Span::styled(
            format!(
                "Slide {:.2} → {:.2} ({:.1} Hz)  ",
                session.anchor_tone,
                session.current_tone,
                keyboard.frequency(session.current_tone)
            ),
            Style::default().fg(Color::Magenta),
        ));
    }

    match error {
        Some(message) => spans.push(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        )),
        None if !keyboard.backend_ready() => spans.push(Span::styled(
            "audio opens on first key",
            Style::default().fg(Color::DarkGray),
        )),
        None => {}
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
