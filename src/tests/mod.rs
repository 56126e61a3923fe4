//! Internal test modules - whitebox tests with crate access
//!
//! Acceptance tests drive the full TUI (bindings, action queue, reader, widgets)
//! on a `TestBackend` through [`crate::test_harness::AcceptanceTestHarness`].

mod acceptance_queue;
