//! App - terminal event loop driving the keyboard

use std::{io::stdout, time::Duration};

use color_eyre::eyre::Result as EyreResult;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use tracing::warn;

use decimal_synth::{
    error::BackendError, CpalBackend, Keyboard, KeyboardConfig, KeyboardEvent, SynthError,
};

use super::ui::{render_keys, render_status};

type Factory = fn() -> Result<CpalBackend, BackendError>;

pub struct App {
    keyboard: Keyboard<Factory>,
    /// Screen rectangles of the keys from the last frame, for hit testing
    key_rects: Vec<Rect>,
    /// Area the keys were laid out in
    keys_area: Rect,
    last_error: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(config: KeyboardConfig) -> Self {
        Self {
            keyboard: Keyboard::new(CpalBackend::open as Factory, config),
            key_rects: Vec::new(),
            keys_area: Rect::default(),
            last_error: None,
            should_quit: false,
        }
    }

    /// Take over the terminal until the user quits
    pub fn run(mut self) -> EyreResult<()> {
        let mut terminal = ratatui::init();
        execute!(stdout(), EnableMouseCapture)?;

        let result = self.event_loop(&mut terminal);

        self.dispatch(KeyboardEvent::AllNotesOff);
        if let Err(err) = execute!(stdout(), DisableMouseCapture) {
            warn!(%err, "failed to disable mouse capture");
        }
        ratatui::restore();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            // ~60fps redraw while idle
            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code)
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, event: KeyboardEvent) {
        match self.keyboard.handle(event) {
            Ok(()) => {}
            Err(err) => self.report(err),
        }
    }

    fn report(&mut self, err: SynthError) {
        let message = match &err {
            SynthError::BackendUnavailable(source) => format!("{err}: {source}"),
            other => other.to_string(),
        };
        warn!(%message, "keyboard event failed");
        self.last_error = Some(message);
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Down => {
                self.keyboard.scale_down();
            }
            KeyCode::Right | KeyCode::Up => {
                self.keyboard.scale_up();
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                let next = self.keyboard.config().waveform.next();
                self.keyboard.set_waveform(next);
            }
            KeyCode::Char('z') | KeyCode::Char('Z') => {
                let next = self.keyboard.config().zoom.next();
                self.keyboard.set_zoom(next);
            }
            KeyCode::Char(' ') => self.dispatch(KeyboardEvent::AllNotesOff),
            // Terminals report no key-up, so number keys latch
            KeyCode::Char(c @ '0'..='9') => {
                let tone = match c {
                    '0' => 10.0,
                    digit => (digit as u8 - b'0') as f64,
                };
                if self.keyboard.is_sounding(tone) {
                    self.dispatch(KeyboardEvent::PressEnd { tone });
                } else {
                    let config = *self.keyboard.config();
                    self.dispatch(KeyboardEvent::PressStart {
                        tone,
                        scale: config.scale,
                        waveform: config.waveform,
                    });
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        // Centre of the clicked cell
        let position = mouse.column as f64 + 0.5;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(tone) = self.tone_at(mouse.column, mouse.row) {
                    self.last_error = None;
                    self.dispatch(KeyboardEvent::SlideStart { position, tone });
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let key_width = self.key_width();
                self.dispatch(KeyboardEvent::SlideMove {
                    position,
                    key_width,
                });
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.dispatch(KeyboardEvent::SlideEnd);
            }
            _ => {}
        }
    }

    fn tone_at(&self, column: u16, row: u16) -> Option<f64> {
        let index = self.key_rects.iter().position(|rect| {
            (rect.x..rect.x + rect.width).contains(&column)
                && (rect.y..rect.y + rect.height).contains(&row)
        })?;
        self.keyboard.grid().get(index).map(|key| key.tone)
    }

    /// Average on-screen key width in columns
    fn key_width(&self) -> f64 {
        match self.key_rects.len() {
            0 => 0.0,
            n => self.keys_area.width as f64 / n as f64,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(6),    // Keys
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        render_status(frame, chunks[0], &self.keyboard, self.last_error.as_deref());

        let keys_block = Block::default()
            .title(" Sistema Musical Decimal ")
            .borders(Borders::ALL);
        let keys_inner = keys_block.inner(chunks[1]);
        frame.render_widget(keys_block, chunks[1]);

        self.keys_area = keys_inner;
        self.key_rects = render_keys(frame, keys_inner, &self.keyboard);

        let help = Paragraph::new(
            " Drag a key to slide  [1-0] Latch  [←/→] Scale  [W] Wave  [Z] Zoom  [Space] All off  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
