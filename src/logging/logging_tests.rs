//! Tests for logging setup, and for the events the core emits.

use super::*;
use crate::action::{action_queue, ViewAction};
use serial_test::serial;
use std::fs;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// In-memory writer for a scoped subscriber.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capture(f: impl FnOnce()) -> String {
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    out.text()
}

#[test]
fn split_log_path_separates_directory_and_name() {
    let (dir, name) = split_log_path(Path::new("/var/log/pageflow/app.log")).unwrap();
    assert_eq!(dir, Path::new("/var/log/pageflow"));
    assert_eq!(name, "app.log");
}

#[test]
fn split_log_path_bare_name_uses_current_directory() {
    let (dir, name) = split_log_path(Path::new("pageflow.log")).unwrap();
    assert_eq!(dir, Path::new("."));
    assert_eq!(name, "pageflow.log");
}

#[test]
fn split_log_path_rejects_root() {
    assert!(matches!(
        split_log_path(Path::new("/")),
        Err(LoggingError::InvalidPath(_))
    ));
}

#[test]
#[serial(tracing_init)]
fn init_creates_log_directory_if_missing() {
    let test_dir = std::env::temp_dir().join("pageflow_test_logs_create");
    let _ = fs::remove_dir_all(&test_dir);

    // The subscriber may already be set by another test; the directory is created first.
    let _ = init(&test_dir.join("test.log"));

    assert!(test_dir.exists(), "Log directory should be created: {:?}", test_dir);
    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
#[serial(tracing_init)]
fn second_init_reports_subscriber_already_set() {
    let test_dir = std::env::temp_dir().join("pageflow_test_logs_twice");
    let log_file = test_dir.join("twice.log");
    let _ = init(&log_file);
    assert!(matches!(init(&log_file), Err(LoggingError::SubscriberAlreadySet)));
    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
fn dropped_action_is_traced() {
    let out = capture(|| {
        let (tx, _rx) = action_queue(1);
        tx.send(ViewAction::LineDown);
        tx.send(ViewAction::PageDown);
    });
    assert!(out.contains("action queue full"), "got: {out}");
    assert!(out.contains("page_down"), "got: {out}");
}

#[test]
fn content_replacement_is_logged_at_info() {
    let out = capture(|| {
        crate::content::ContentStore::default().replace(vec!["x".to_string()], 0);
    });
    assert!(out.contains("INFO"), "got: {out}");
    assert!(out.contains("content replaced"), "got: {out}");
    assert!(out.contains("generation=1"), "got: {out}");
}
