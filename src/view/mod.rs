//! TUI rendering and terminal management (impure shell)

pub mod constants;
pub mod page;
pub mod status;

pub use page::PageWidget;
pub use status::StatusLine;

use crate::action::{
    action_queue, spawn_format, ActionSender, FormatProgress, Reader, ViewAction,
};
use crate::config::{KeyBindings, ResolvedConfig};
use crate::content::ContentStore;
use crate::format::{chapter_at, chapters, ChapterLocation, FormatOptions};
use crate::measure::{leading_space_count, CellMeasurer};
use crate::model::{Anchor, AppError, KeyAction, MeasurementFailure, UnderlineMode, ViewportSize};
use crate::viewport::ViewportController;
use constants::{SCROLLBAR_WIDTH, STATUS_BAR_HEIGHT, TICK_INTERVAL_MS};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// The measurer failed while laying out the page
    #[error("Layout error: {0}")]
    Measurement(#[from] MeasurementFailure),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(e) => AppError::Terminal(e),
            TuiError::Measurement(e) => AppError::Measurement(e),
        }
    }
}

/// Everything needed to open a reader on some text.
#[derive(Debug, Clone)]
pub struct ReaderSetup {
    /// Shown in the status bar.
    pub title: String,
    /// Logical lines as loaded.
    pub lines: Vec<String>,
    /// Resolved configuration.
    pub config: ResolvedConfig,
    /// Zero-based line to open at (clamped into the text).
    pub start_line: usize,
    /// Reflow into paragraphs right after opening.
    pub format_on_open: bool,
}

/// A format job in flight.
struct FormatJob {
    handle: JoinHandle<usize>,
    progress: FormatProgress,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    reader: Reader<CellMeasurer>,
    sender: ActionSender,
    store: ContentStore,
    key_bindings: KeyBindings,
    title: String,
    format_options: FormatOptions,
    leading_spaces: usize,
    underline: UnderlineMode,
    /// Last anchor reported by the position callback.
    position: Arc<Mutex<Anchor>>,
    toc: Vec<ChapterLocation>,
    toc_generation: Option<u64>,
    format_job: Option<FormatJob>,
    page_area: Rect,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create the application on the real terminal.
    ///
    /// Sets up terminal in raw mode with alternate screen. If anything after raw mode
    /// fails, the terminal is restored before the error is returned.
    pub fn new(setup: ReaderSetup) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        restore_on_error(Self::open(setup), restore_terminal)
    }

    fn open(setup: ReaderSetup) -> Result<Self, TuiError> {
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, setup)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Each iteration waits up to one tick for input,
    /// then lets the reader apply one queued action and redraws if anything changed.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let tick = Duration::from_millis(TICK_INTERVAL_MS);
        self.draw()?;

        loop {
            if event::poll(tick)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => self.handle_resize(width, height)?,
                    _ => {}
                }
            }
            if self.tick()? {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create the application on any backend.
    pub fn with_terminal(terminal: Terminal<B>, setup: ReaderSetup) -> Result<Self, TuiError> {
        let ReaderSetup {
            title,
            lines,
            config,
            start_line,
            format_on_open,
        } = setup;

        let measurer = CellMeasurer;
        let leading_spaces = leading_space_count(&measurer, config.indent_chars)?;
        let store = ContentStore::default();
        store.replace(lines, leading_spaces);

        let anchor = Anchor::clamped(start_line, 0, store.read().as_slice());
        let controller = ViewportController::new(measurer, config.viewport_style(), anchor)?;
        let (sender, receiver) = action_queue(config.action_queue_capacity);
        let mut reader = Reader::new(controller, store.clone(), receiver);

        let position = Arc::new(Mutex::new(anchor));
        let sink = Arc::clone(&position);
        reader.on_position_changed(move |anchor| {
            *sink.lock().unwrap_or_else(PoisonError::into_inner) = anchor;
        });

        info!(%title, lines = store.len(), %anchor, "opening reader");
        let mut app = Self {
            terminal,
            reader,
            sender,
            store,
            key_bindings: KeyBindings::default(),
            title,
            format_options: config.format_options(),
            leading_spaces,
            underline: config.underline,
            position,
            toc: Vec::new(),
            toc_generation: None,
            format_job: None,
            page_area: Rect::default(),
        };
        let size = app.terminal.size()?;
        app.handle_resize(size.width, size.height)?;
        if format_on_open {
            app.start_format()?;
        }
        Ok(app)
    }

    /// Handle a key press. Returns `true` when the user quits.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "key");
        match action {
            KeyAction::Quit => return true,
            KeyAction::CycleUnderline => {
                self.underline = self.underline.cycle();
                self.sender.send(ViewAction::SetUnderline(self.underline));
            }
            KeyAction::NextChapter => self.jump_chapter(true),
            KeyAction::PrevChapter => self.jump_chapter(false),
            KeyAction::Format => {
                if let Err(err) = self.start_format() {
                    warn!(%err, "could not start formatter");
                }
            }
            other => {
                if let Some(view_action) = other.view_action() {
                    self.sender.send(view_action);
                }
            }
        }
        false
    }

    /// Mouse wheel scrolls rows; a click on the scrollbar jumps proportionally.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.sender.send(ViewAction::LineDown);
            }
            MouseEventKind::ScrollUp => {
                self.sender.send(ViewAction::LineUp);
            }
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                let area = self.page_area;
                let on_scrollbar = mouse.column == area.right()
                    && mouse.row >= area.y
                    && mouse.row < area.bottom();
                if on_scrollbar && area.height > 0 {
                    let fraction = f64::from(mouse.row - area.y) / f64::from(area.height);
                    self.sender.send(ViewAction::JumpToFraction(fraction));
                }
            }
            _ => {}
        }
    }

    /// Re-split the terminal and lay the page out for its new size.
    pub fn handle_resize(&mut self, width: u16, height: u16) -> Result<(), TuiError> {
        let (page, _, _) = split_screen(Rect::new(0, 0, width, height));
        self.page_area = page;
        self.reader
            .resize(ViewportSize::new(f32::from(page.width), f32::from(page.height)))?;
        Ok(())
    }

    /// One refresh tick: finish a completed format job and apply one action.
    ///
    /// Returns whether the screen needs to be redrawn.
    pub fn tick(&mut self) -> Result<bool, TuiError> {
        let formatting = self.format_job.is_some();
        if self
            .format_job
            .as_ref()
            .is_some_and(|job| job.handle.is_finished())
        {
            if let Some(job) = self.format_job.take() {
                match job.handle.join() {
                    Ok(lines) => info!(lines, "format job finished"),
                    Err(_) => warn!("format job panicked"),
                }
            }
        }
        self.reader.refresh()?;
        Ok(self.reader.take_redraw() || formatting)
    }

    /// Render the page, scrollbar and status bar.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        self.refresh_toc();
        let anchor = *self.position.lock().unwrap_or_else(PoisonError::into_inner);
        let total_lines = self.store.len();
        let chapter = chapter_at(&self.toc, anchor.line).map(|i| self.toc[i].title.as_str());
        let status = StatusLine {
            title: &self.title,
            anchor,
            total_lines,
            chapter,
            underline: self.reader.controller().underline(),
            formatting: self.format_job.as_ref().map(|job| job.progress.fraction()),
        };
        let frame = self.reader.controller().frame();
        let mut scrollbar = ScrollbarState::new(total_lines).position(anchor.line);

        self.terminal.draw(|f| {
            let (page, bar, status_area) = split_screen(f.area());
            f.render_widget(PageWidget::new(&frame), page);
            f.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                bar,
                &mut scrollbar,
            );
            f.render_widget(status, status_area);
        })?;
        Ok(())
    }

    /// Jump to the next or previous chapter title, centered.
    ///
    /// The current chapter is the one containing the middle visible row, so a
    /// centered title counts as current.
    fn jump_chapter(&mut self, forward: bool) {
        let rows = self.reader.controller().rows();
        let focus = rows
            .get(rows.len() / 2)
            .map_or(self.reader.controller().anchor().line, |row| row.line);
        self.refresh_toc();
        let current = chapter_at(&self.toc, focus);
        let target = match (forward, current) {
            (true, None) => Some(0),
            (true, Some(i)) => Some(i + 1),
            (false, Some(i)) => i.checked_sub(1),
            (false, None) => None,
        };
        match target.and_then(|i| self.toc.get(i)) {
            Some(chapter) => {
                debug!(title = %chapter.title, line = chapter.line, "chapter jump");
                self.sender.send(ViewAction::JumpTo {
                    line: chapter.line,
                    offset: 0,
                    center: true,
                });
            }
            None => debug!(forward, "no chapter to jump to"),
        }
    }

    /// Rebuild the chapter list if the content was replaced since it was built.
    fn refresh_toc(&mut self) {
        let generation = self.store.generation();
        if self.toc_generation != Some(generation) {
            self.toc = chapters(self.store.read().as_slice(), self.format_options.chapter_mark);
            self.toc_generation = Some(generation);
        }
    }

    /// Start reflowing the text on a worker thread. Ignored while a job runs.
    fn start_format(&mut self) -> Result<(), TuiError> {
        if self.format_job.is_some() {
            debug!("format already running");
            return Ok(());
        }
        let (handle, progress) = spawn_format(
            self.store.clone(),
            self.format_options.clone(),
            self.leading_spaces,
            self.sender.clone(),
        )?;
        self.format_job = Some(FormatJob { handle, progress });
        Ok(())
    }

    /// Anchor last reported to the position listener.
    pub fn position(&self) -> Anchor {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a format job is still running.
    pub fn is_formatting(&self) -> bool {
        self.format_job.is_some()
    }

    /// The reader driving the page.
    pub fn reader(&self) -> &Reader<CellMeasurer> {
        &self.reader
    }

    /// The terminal drawn to (a `TestBackend` in tests).
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Split the screen into page, scrollbar column and status bar.
fn split_screen(area: Rect) -> (Rect, Rect, Rect) {
    let [body, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)]).areas(area);
    let [page, bar] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(SCROLLBAR_WIDTH)]).areas(body);
    (page, bar, status)
}

/// Open the reader on the real terminal and run it until the user quits.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(setup: ReaderSetup) -> Result<(), TuiError> {
    let mut app = TuiApp::new(setup)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run `restore` when terminal setup failed. The setup error wins over a restore error.
fn restore_on_error<T>(
    result: Result<T, TuiError>,
    restore: impl FnOnce() -> Result<(), TuiError>,
) -> Result<T, TuiError> {
    if let Err(err) = &result {
        warn!(%err, "terminal setup failed, restoring terminal");
        if let Err(restore_err) = restore() {
            warn!(err = %restore_err, "failed to restore terminal");
        }
    }
    result
}
