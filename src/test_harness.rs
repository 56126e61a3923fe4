//! Test harness: measurers with known behavior, and an acceptance harness that
//! drives the TUI on a `TestBackend`.

use crate::config::ResolvedConfig;
use crate::measure::{AdvanceMeasurer, TextMeasurer};
use crate::model::{Anchor, MeasurementFailure};
use crate::view::{ReaderSetup, TuiApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::cell::Cell;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthChar;

/// Proportional font: narrow `i l j . , '` are 0.5, `m w M W` are 1.5, wide glyphs 2.0,
/// everything else 1.0. Line height 1.0.
pub(crate) fn proportional() -> AdvanceMeasurer<fn(char) -> f32> {
    fn advance(c: char) -> f32 {
        match c {
            'i' | 'l' | 'j' | '.' | ',' | '\'' => 0.5,
            'm' | 'w' | 'M' | 'W' => 1.5,
            c if c.width() == Some(2) => 2.0,
            _ => 1.0,
        }
    }
    AdvanceMeasurer::new(advance, 1.0)
}

/// Counts calls to the wrapped measurer.
pub(crate) struct CountingMeasurer<M> {
    inner: M,
    calls: Cell<usize>,
}

impl<M> CountingMeasurer<M> {
    pub(crate) fn new(inner: M) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<M: TextMeasurer> TextMeasurer for CountingMeasurer<M> {
    fn measure(&self, text: &str) -> Result<f32, MeasurementFailure> {
        self.calls.set(self.calls.get() + 1);
        self.inner.measure(text)
    }

    fn line_height(&self) -> f32 {
        self.inner.line_height()
    }
}

/// Measurer whose font is never available.
pub(crate) struct FailingMeasurer;

impl TextMeasurer for FailingMeasurer {
    fn measure(&self, text: &str) -> Result<f32, MeasurementFailure> {
        Err(MeasurementFailure::new(text, "font unavailable"))
    }

    fn line_height(&self) -> f32 {
        1.0
    }
}

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Trailing spaces are trimmed and empty lines dropped.
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Test harness for acceptance testing
///
/// Wraps `TuiApp<TestBackend>`. Keys go through the real bindings and the real
/// action queue; [`settle`](Self::settle) runs refresh ticks until queued actions
/// and background formatting are done.
pub(crate) struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Open `lines` in a `width` x `height` terminal with no margins.
    pub(crate) fn from_lines(lines: &[&str], width: u16, height: u16) -> Result<Self, TuiError> {
        let config = ResolvedConfig {
            side_padding: 0.0,
            vertical_padding: 0.0,
            ..ResolvedConfig::default()
        };
        Self::with_setup(
            ReaderSetup {
                title: "test.txt".to_string(),
                lines: lines.iter().map(|s| s.to_string()).collect(),
                config,
                start_line: 0,
                format_on_open: false,
            },
            width,
            height,
        )
    }

    pub(crate) fn with_setup(setup: ReaderSetup, width: u16, height: u16) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        Ok(Self {
            app: TuiApp::with_terminal(terminal, setup)?,
            running: true,
        })
    }

    /// Send a key press. Returns `true` if the app quit.
    pub(crate) fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    pub(crate) fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }
        if self.app.handle_key(KeyEvent::new(key, mods)) {
            self.running = false;
        }
        !self.running
    }

    /// Send keys, stopping if one quits.
    pub(crate) fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break;
            }
        }
    }

    /// Left click at a terminal cell.
    pub(crate) fn click_at(&mut self, column: u16, row: u16) {
        self.app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// Run one refresh tick.
    pub(crate) fn tick(&mut self) {
        self.app.tick().expect("tick should succeed with the cell measurer");
    }

    /// Tick until the queue is drained and no format job is running.
    pub(crate) fn settle(&mut self) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while self.app.is_formatting() && Instant::now() < deadline {
            self.tick();
            std::thread::sleep(Duration::from_millis(1));
        }
        for _ in 0..64 {
            self.tick();
        }
    }

    pub(crate) fn resize(&mut self, width: u16, height: u16) {
        self.app
            .handle_resize(width, height)
            .expect("resize should succeed with the cell measurer");
    }

    pub(crate) fn anchor(&self) -> Anchor {
        self.app.reader().controller().anchor()
    }

    /// Anchor as last reported to the position listener.
    pub(crate) fn reported_position(&self) -> Anchor {
        self.app.position()
    }

    pub(crate) fn app(&self) -> &TuiApp<TestBackend> {
        &self.app
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string.
    pub(crate) fn render_to_string(&mut self) -> String {
        self.app
            .draw()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
