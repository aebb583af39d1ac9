//! TUI rendering and terminal management (impure shell)

mod board;
pub mod cells;
mod overlay;

pub use board::Board;
pub use cells::CellGeometry;
pub use overlay::ChatOverlay;

use crate::config::keybindings::{input_key, KeyBindings};
use crate::config::ResolvedConfig;
use crate::model::{AppError, KeyAction, Point, Size};
use crate::session::{FeedSource, LoopbackSession};
use crate::state::{ChatHost, ChatWidget, MonospaceMeasurer, TextMeasurer};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Time between animation ticks (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Host capabilities of the terminal surface.
///
/// Measures text on the cell grid and remembers whether the widget asked
/// for a repaint since the last frame was drawn.
#[derive(Debug, Clone)]
pub struct TerminalHost {
    measurer: MonospaceMeasurer,
    redraw_requested: bool,
}

impl TerminalHost {
    /// Create a host for the given cell geometry.
    pub fn new(cells: CellGeometry) -> Self {
        Self {
            measurer: cells.measurer(),
            redraw_requested: false,
        }
    }

    /// Whether a redraw is pending.
    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    /// Consume the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

impl TextMeasurer for TerminalHost {
    fn text_width(&self, text: &str) -> i32 {
        self.measurer.text_width(text)
    }

    fn line_height(&self) -> i32 {
        self.measurer.line_height()
    }
}

impl ChatHost for TerminalHost {
    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    widget: ChatWidget,
    session: LoopbackSession,
    host: TerminalHost,
    cells: CellGeometry,
    key_bindings: KeyBindings,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(config: &ResolvedConfig, session: LoopbackSession) -> Result<Self, TuiError> {
        let widget_config = config.widget_config().map_err(AppError::from)?;
        let cells = CellGeometry::new(config.cell_width, config.cell_height);

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(
            terminal,
            ChatWidget::new(widget_config),
            cells,
            session,
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Each frame applies the animation tick
    /// and inbound session messages before any input received during it.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;
        let mut last_tick = Instant::now();

        loop {
            let elapsed = last_tick.elapsed();
            if elapsed >= FRAME_INTERVAL {
                last_tick = Instant::now();
                self.tick(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
            }

            if self.host.take_redraw() {
                self.draw()?;
            }

            let timeout = FRAME_INTERVAL.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? && self.handle_event(event::read()?) {
                return Ok(());
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Assemble an application around an existing terminal.
    pub fn with_terminal(
        terminal: Terminal<B>,
        mut widget: ChatWidget,
        cells: CellGeometry,
        session: LoopbackSession,
    ) -> Self {
        let host = TerminalHost::new(cells);
        widget.relayout(&host);
        Self {
            terminal,
            widget,
            session,
            host,
            cells,
            key_bindings: KeyBindings::default(),
        }
    }

    /// The chat widget.
    pub fn widget(&self) -> &ChatWidget {
        &self.widget
    }

    /// The chat session.
    pub fn session(&self) -> &LoopbackSession {
        &self.session
    }

    /// The terminal being drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Advance one frame: animation first, then inbound chat.
    pub fn tick(&mut self, delta_ms: u64) {
        self.widget.on_frame_tick(delta_ms, &mut self.host);
        for line in self.session.poll(delta_ms) {
            self.widget.on_chat_message_received(&line, &mut self.host);
        }
    }

    /// Dispatch one terminal event.
    ///
    /// Returns true if app should quit
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            Event::Resize(width, height) => {
                debug!("Handling resize to {}x{}", width, height);
                self.host.request_redraw();
                false
            }
            _ => false,
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        // Ctrl+C always quits, even while typing
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.widget.is_input_focused() {
            if let Some(chat_key) = input_key(key) {
                self.widget
                    .on_key(chat_key, &mut self.host, &mut self.session);
            }
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        match action {
            KeyAction::Quit => return true,
            KeyAction::ToggleChat => self.widget.toggle(&mut self.host),
            KeyAction::FocusInput => self.widget.focus_input(&mut self.host),
            KeyAction::StepOlder => self.widget.step_by(1, &mut self.host),
            KeyAction::StepNewer => self.widget.step_by(-1, &mut self.host),
            KeyAction::PageOlder => self.widget.page(1, &mut self.host),
            KeyAction::PageNewer => self.widget.page(-1, &mut self.host),
        }
        false
    }

    /// Handle a single mouse event
    ///
    /// Cell positions are converted to the pixel at the centre of the cell.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let viewport = self.viewport();
        let point = self.cells.cell_center(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.widget.on_pointer_down(point, viewport, &mut self.host);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.widget.on_pointer_drag(point, viewport, &mut self.host);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.widget.on_pointer_up(&mut self.host);
            }
            MouseEventKind::Moved => self.widget.on_pointer_move(point, viewport),
            MouseEventKind::ScrollUp => self.wheel(point, viewport, 1),
            MouseEventKind::ScrollDown => self.wheel(point, viewport, -1),
            _ => {}
        }
    }

    fn wheel(&mut self, point: Point, viewport: Size, delta: i32) {
        if self.widget.widget_rect(viewport).contains(point) {
            self.widget.on_scroll_wheel(delta, &mut self.host);
        }
    }

    fn viewport(&self) -> Size {
        let size = self
            .terminal
            .size()
            .unwrap_or_else(|_| ratatui::layout::Size::new(80, 24));
        self.cells.viewport(size.width, size.height)
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let widget = &self.widget;
        let cells = self.cells;
        self.terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(Board::new(), area);
            frame.render_widget(ChatOverlay::new(widget, cells), area);
        })?;
        Ok(())
    }
}

/// Initialize and run the TUI application
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_config(config: &ResolvedConfig, feed: Option<PathBuf>) -> Result<(), TuiError> {
    let mut session = LoopbackSession::new(config.nick.clone());
    if let Some(path) = feed {
        let feed = FeedSource::open(path, config.feed_interval_ms).map_err(AppError::from)?;
        session = session.with_feed(feed);
    }

    info!(nick = %config.nick, "Starting chat overlay");
    let mut app = TuiApp::new(config, session)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
pub fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
