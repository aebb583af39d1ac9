//! Tests for the terminal host event loop pieces.

use super::*;
use crate::config::WidgetConfig;
use crate::state::SlidePhase;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

fn create_test_app_with_session(session: LoopbackSession) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    TuiApp::with_terminal(
        terminal,
        ChatWidget::new(WidgetConfig::default()),
        CellGeometry::new(10, 10),
        session,
    )
}

fn create_test_app() -> TuiApp<TestBackend> {
    create_test_app_with_session(LoopbackSession::new("you"))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn row_text(buf: &Buffer, row: u16) -> String {
    (0..buf.area.width)
        .map(|col| buf[(col, row)].symbol())
        .collect()
}

fn settle(app: &mut TuiApp<TestBackend>) {
    for _ in 0..30 {
        app.tick(16);
    }
}

#[test]
fn tui_error_from_io_error() {
    let io_err = io::Error::other("test error");
    let tui_err: TuiError = io_err.into();
    assert!(matches!(tui_err, TuiError::Io(_)));
}

#[test]
fn host_tracks_redraw_requests() {
    let mut host = TerminalHost::new(CellGeometry::new(10, 10));
    assert!(!host.redraw_requested());
    host.request_redraw();
    assert!(host.take_redraw());
    assert!(!host.take_redraw());
    assert_eq!(host.text_width("abc"), 30);
    assert_eq!(host.line_height(), 10);
}

#[test]
fn handle_key_q_returns_true() {
    let mut app = create_test_app();
    assert!(app.handle_key(key(KeyCode::Char('q'))), "'q' should trigger quit");
}

#[test]
fn handle_key_ctrl_c_quits_even_while_typing() {
    let mut app = create_test_app();
    app.handle_key(key(KeyCode::Char('i')));
    assert!(app.widget().is_input_focused());

    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(app.handle_key(ctrl_c));
}

#[test]
fn key_release_events_are_ignored() {
    let mut app = create_test_app();
    let release = KeyEvent::new_with_kind(
        KeyCode::Char('q'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    );
    assert!(!app.handle_key(release));
}

#[test]
fn handle_key_t_toggles_overlay() {
    let mut app = create_test_app();
    assert!(!app.handle_key(key(KeyCode::Char('t'))));
    assert_eq!(app.widget().slide().phase(), SlidePhase::SlidingUp);

    settle(&mut app);
    assert!(app.widget().slide().is_visible());
}

#[test]
fn typed_q_goes_to_input_when_focused() {
    let mut app = create_test_app();
    app.handle_key(key(KeyCode::Char('i')));

    assert!(!app.handle_key(key(KeyCode::Char('q'))));
    assert_eq!(app.widget().input().full_text(), "q");

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.session().sent(), &["q".to_string()]);
}

#[test]
fn sent_message_is_echoed_on_next_tick() {
    let mut app = create_test_app();
    app.handle_key(key(KeyCode::Char('i')));
    for ch in "hello".chars() {
        app.handle_key(key(KeyCode::Char(ch)));
    }
    app.handle_key(key(KeyCode::Enter));
    assert!(app.widget().log().is_empty());

    app.tick(16);
    assert_eq!(app.widget().log().lines()[0].as_str(), "you: hello");
}

#[test]
fn escape_returns_keys_to_bindings() {
    let mut app = create_test_app();
    app.handle_key(key(KeyCode::Char('i')));
    app.handle_key(key(KeyCode::Esc));
    assert!(!app.widget().is_input_focused());
    assert!(app.handle_key(key(KeyCode::Char('q'))));
}

#[test]
fn feed_lines_arrive_on_ticks() {
    let feed = FeedSource::from_lines(["bob: hi".to_string(), "eve: yo".to_string()], 100);
    let mut app = create_test_app_with_session(LoopbackSession::new("you").with_feed(feed));

    app.tick(50);
    assert!(app.widget().log().is_empty());
    app.tick(50);
    assert_eq!(app.widget().log().len(), 1);
    app.tick(100);
    assert_eq!(app.widget().log().len(), 2);
}

#[test]
fn clicking_hidden_header_toggles() {
    let mut app = create_test_app();
    // Hidden overlay: header occupies the bottom two rows.
    app.handle_event(Event::Mouse(click(1, 22)));
    assert_eq!(app.widget().slide().phase(), SlidePhase::SlidingUp);
}

#[test]
fn wheel_outside_overlay_is_ignored() {
    let mut app = create_test_app();
    for i in 0..30 {
        app.widget.on_chat_message_received(&format!("m{i}"), &mut app.host);
    }
    app.handle_key(key(KeyCode::Char('t')));
    settle(&mut app);

    let wheel = |column, row| MouseEvent {
        kind: MouseEventKind::ScrollUp,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    };
    app.handle_event(Event::Mouse(wheel(70, 15)));
    assert_eq!(app.widget().scroll().scroll_index(), 0);

    app.handle_event(Event::Mouse(wheel(10, 15)));
    assert_eq!(app.widget().scroll().scroll_index(), 1);
}

#[test]
fn draw_renders_board_and_hidden_header() {
    let mut app = create_test_app();
    app.draw().unwrap();

    let buf = app.terminal().backend().buffer();
    assert_eq!(buf[(79, 0)].bg, Board::new().square_color(79, 0));
    assert!(row_text(buf, 22).contains("chat"));
    assert!(!row_text(buf, 21).contains("chat"));
}

#[test]
fn draw_renders_messages_when_visible() {
    let mut app = create_test_app();
    app.widget.on_chat_message_received("alice: hi there", &mut app.host);
    app.handle_key(key(KeyCode::Char('t')));
    settle(&mut app);
    app.draw().unwrap();

    let buf = app.terminal().backend().buffer();
    assert!(row_text(buf, 11).starts_with("alice: hi there"));
}
