//! Acceptance tests for the bounded action queue.

use crate::model::Anchor;
use crate::test_harness::AcceptanceTestHarness;
use crossterm::event::KeyCode;

fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("line {i:02}")).collect()
}

fn harness(count: usize) -> AcceptanceTestHarness {
    let lines = numbered(count);
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    AcceptanceTestHarness::from_lines(&refs, 20, 6).expect("Should open reader")
}

#[test]
fn actions_beyond_capacity_are_dropped() {
    // GIVEN: default capacity of 16 and nothing processed yet
    let mut h = harness(60);

    // WHEN: 20 line-downs are queued before any tick
    for _ in 0..20 {
        h.send_key(KeyCode::Char('j'));
    }
    h.settle();

    // THEN: only the first 16 were applied
    assert_eq!(h.anchor(), Anchor::new(16, 0));
    assert_eq!(h.reported_position(), Anchor::new(16, 0));
}

#[test]
fn queued_actions_apply_one_per_tick_in_order() {
    let mut h = harness(60);
    h.send_keys(&[KeyCode::PageDown, KeyCode::Char('j'), KeyCode::Char('k'), KeyCode::Char('j')]);

    let mut seen = Vec::new();
    for _ in 0..4 {
        h.tick();
        seen.push(h.anchor().line);
    }
    assert_eq!(seen, vec![5, 6, 5, 6]);
}

#[test]
fn queue_accepts_again_after_draining() {
    let mut h = harness(60);
    for _ in 0..20 {
        h.send_key(KeyCode::Char('j'));
    }
    h.settle();
    for _ in 0..3 {
        h.send_key(KeyCode::Char('j'));
    }
    h.settle();
    assert_eq!(h.anchor(), Anchor::new(19, 0));
}

#[test]
fn content_change_is_seen_even_when_queue_is_full() {
    // GIVEN: a full queue of no-op actions at the top
    let mut h = harness(30);
    for _ in 0..16 {
        h.send_key(KeyCode::Char('k'));
    }

    // WHEN: formatting finishes while its notice cannot be queued
    h.send_key(KeyCode::Char('f'));
    h.settle();

    // THEN: the reader still lays out the new content
    assert_eq!(h.app().reader().store().len(), 1);
    assert_eq!(h.anchor(), Anchor::START);
    h.render_to_string();
    let buffer = h.app().terminal().backend().buffer();
    let first: String = (0..19).map(|x| buffer[(x, 0)].symbol()).collect();
    assert_eq!(first, "line 00 line 01 lin");
}
