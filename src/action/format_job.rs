//! Background paragraph formatting.
//!
//! The formatter runs on its own thread against a snapshot of the content store,
//! replaces the store wholesale when done and posts [`ViewAction::ContentChanged`].

use super::{ActionSender, ViewAction};
use crate::content::ContentStore;
use crate::format::{format_paragraphs, FormatOptions};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

/// Progress of a running format job, readable from any thread.
#[derive(Debug, Clone, Default)]
pub struct FormatProgress {
    permille: Arc<AtomicU32>,
    done: Arc<AtomicBool>,
}

impl FormatProgress {
    /// Fraction of the input consumed, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        f64::from(self.permille.load(Ordering::Relaxed)) / 1000.0
    }

    /// Whether the job replaced the content.
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    fn report(&self, fraction: f64) {
        let permille = (fraction.clamp(0.0, 1.0) * 1000.0).round() as u32;
        self.permille.store(permille, Ordering::Relaxed);
    }
}

/// Format the store's content on a worker thread.
///
/// The handle yields the number of formatted lines.
///
/// # Errors
///
/// Fails only if the thread cannot be spawned.
pub fn spawn_format(
    store: ContentStore,
    options: FormatOptions,
    leading_spaces: usize,
    sender: ActionSender,
) -> io::Result<(JoinHandle<usize>, FormatProgress)> {
    let progress = FormatProgress::default();
    let reporter = progress.clone();
    let handle = thread::Builder::new()
        .name("pageflow-format".to_string())
        .spawn(move || {
            let lines = store.snapshot();
            info!(lines = lines.len(), "formatting paragraphs");
            let formatted = format_paragraphs(&lines, &options, |f| reporter.report(f));
            let count = formatted.len();
            store.replace(formatted, leading_spaces);
            reporter.done.store(true, Ordering::Release);
            if !sender.send(ViewAction::ContentChanged) {
                debug!("content change notice dropped, reader will see the new generation");
            }
            count
        })?;
    Ok((handle, progress))
}
