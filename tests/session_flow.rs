//! End-to-end session runs against a scripted terminal.

mod common;

use common::ScriptTerminal;
use dash_tui::{DashError, DashboardConfig, Session};

fn session() -> Session {
    Session::new(DashboardConfig::default())
}

#[test]
fn submitted_message_appears_in_history_and_on_screen() {
    let mut terminal = ScriptTerminal::new(80, 24);
    terminal.feed("Привет".as_bytes());
    terminal.feed(b"\r");
    terminal.feed(b"\x03");

    let mut session = session()
        .with_submit_handler(Box::new(|text| Some(format!("echo: {}", text.trim()))));
    session.run(&mut terminal).expect("session run");

    assert_eq!(session.messages(), ["Привет\n\n", "echo: Привет"]);
    assert!(
        terminal.written.starts_with("\x1b[?1049h\x1b[?25l"),
        "alt screen and hidden cursor first"
    );
    assert!(
        terminal.written.ends_with("\x1b[?25h\x1b[?1049l"),
        "cursor shown and alt screen left last"
    );
    assert!(terminal.written.contains("Привет"), "history painted");
    assert!(terminal.written.contains("echo: Привет"), "response painted");
    assert_eq!(terminal.starts, 1);
    assert_eq!(terminal.stops, 1);
}

#[test]
fn tab_toggle_forces_a_full_repaint() {
    let mut terminal = ScriptTerminal::new(80, 24);
    terminal.feed(b"\t\x03");

    let mut session = session();
    session.run(&mut terminal).expect("session run");

    // One clear for the initial frame, one for the focus change.
    assert_eq!(terminal.written.matches("\x1b[2J").count(), 2);
    assert!(terminal.written.contains("VIEW"), "view mode label painted");
}

#[test]
fn escape_sequence_split_across_reads_does_not_starve_input() {
    let mut terminal = ScriptTerminal::new(80, 24);
    // A lone ESC first: the decoder must keep reading while it waits for
    // the rest of the sequence, not spin on the incomplete prefix.
    terminal.feed(&[0x1b]);
    terminal.feed(b"[A");
    terminal.feed(b"q");
    terminal.feed(b"\x03");

    let mut session = session();
    session.run(&mut terminal).expect("session run");

    assert_eq!(session.input_lines()[0], "q", "later input was consumed");
}

#[test]
fn split_multibyte_code_point_is_reassembled_across_reads() {
    let bytes = "д".as_bytes();
    let mut terminal = ScriptTerminal::new(80, 24);
    terminal.feed(&bytes[..1]);
    terminal.feed(&bytes[1..]);
    terminal.feed(b"\x03");

    let mut session = session();
    session.run(&mut terminal).expect("session run");

    assert_eq!(session.input_lines()[0], "д");
}

#[test]
fn cursor_stays_hidden_until_teardown() {
    let mut terminal = ScriptTerminal::new(80, 24);
    terminal.feed(b"a");
    terminal.feed(b"\x03");

    let mut session = session();
    session.run(&mut terminal).expect("session run");

    // Hidden at startup, shown exactly once, by teardown.
    assert_eq!(terminal.written.matches("\x1b[?25h").count(), 1);
    assert!(terminal.written.ends_with("\x1b[?25h\x1b[?1049l"));
}

#[test]
fn end_of_input_ends_the_session_cleanly() {
    let mut terminal = ScriptTerminal::new(80, 24);
    let mut session = session();
    session.run(&mut terminal).expect("session run");

    assert!(terminal.written.ends_with("\x1b[?25h\x1b[?1049l"));
    assert_eq!(terminal.stops, 1);
}

#[test]
fn too_small_terminal_refuses_to_start() {
    let mut terminal = ScriptTerminal::new(80, 8);
    let mut session = session();
    let err = session.run(&mut terminal).expect_err("expected startup failure");

    match err {
        DashError::TerminalTooSmall { rows, min } => {
            assert_eq!(rows, 8);
            assert_eq!(min, 9);
        }
        other => panic!("expected TerminalTooSmall, got {other:?}"),
    }
    assert_eq!(terminal.starts, 0, "raw mode never entered");
    assert!(terminal.written.is_empty(), "nothing painted");
}

#[test]
fn resize_triggers_a_full_repaint_at_the_new_geometry() {
    let mut terminal = ScriptTerminal::new(80, 24);
    terminal.resize_after(1, 100, 30);
    terminal.feed(b"a");
    terminal.feed(b"\x03");

    let mut session = session();
    session.run(&mut terminal).expect("session run");

    assert_eq!(terminal.written.matches("\x1b[2J").count(), 2);
    // Status row lands on the last row of the new size.
    assert!(terminal.written.contains("\x1b[30;1H"));
}

#[test]
fn resize_below_minimum_aborts_but_still_restores_the_terminal() {
    let mut terminal = ScriptTerminal::new(80, 24);
    terminal.resize_after(1, 80, 5);
    terminal.feed(b"a");

    let mut session = session();
    let err = session.run(&mut terminal).expect_err("expected resize failure");

    assert!(matches!(err, DashError::TerminalTooSmall { rows: 5, .. }));
    assert!(
        terminal.written.ends_with("\x1b[?25h\x1b[?1049l"),
        "teardown still ran"
    );
    assert_eq!(terminal.stops, 1);
}

#[test]
fn page_down_scrolls_the_history_in_view_focus() {
    let mut terminal = ScriptTerminal::new(80, 24);
    terminal.feed(b"\t");
    terminal.feed(b"\x1b[6~");
    terminal.feed(b"\x03");

    let mut session = session();
    for i in 0..40 {
        session.push_message(format!("message {i}"));
    }
    session.run(&mut terminal).expect("session run");

    // Page size is 15 at 24 rows.
    assert_eq!(session.scroll_offset(), 15);
}
