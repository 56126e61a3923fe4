//! The single action consumer.
//!
//! A [`Reader`] owns the viewport controller and the receiving end of the action
//! queue. Every refresh tick it takes at most one action, applies it against the
//! current content and, when the anchor moved, notifies the position listener after
//! the content lock has been released.

use super::{ActionReceiver, ViewAction};
use crate::content::ContentStore;
use crate::measure::TextMeasurer;
use crate::model::{Anchor, MeasurementFailure, ViewportSize};
use crate::viewport::{Update, ViewportController};
use tracing::{debug, warn};

/// Listener for anchor changes (drives scrollbars and status lines).
pub type PositionCallback = Box<dyn FnMut(Anchor) + Send>;

/// Consumer side of the action queue.
pub struct Reader<M> {
    controller: ViewportController<M>,
    store: ContentStore,
    actions: ActionReceiver,
    on_position: Option<PositionCallback>,
    seen_generation: u64,
    needs_redraw: bool,
}

impl<M: TextMeasurer> Reader<M> {
    /// Create a reader over `store`, consuming `actions`.
    ///
    /// The store's current content counts as already laid out.
    pub fn new(controller: ViewportController<M>, store: ContentStore, actions: ActionReceiver) -> Self {
        let seen_generation = store.generation();
        Self {
            controller,
            store,
            actions,
            on_position: None,
            seen_generation,
            needs_redraw: true,
        }
    }

    /// Install the position listener, replacing any previous one.
    pub fn on_position_changed<F>(&mut self, callback: F)
    where
        F: FnMut(Anchor) + Send + 'static,
    {
        self.on_position = Some(Box::new(callback));
    }

    /// The viewport being driven.
    pub fn controller(&self) -> &ViewportController<M> {
        &self.controller
    }

    /// The content store the viewport reads.
    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Whether anything changed since the last call; clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Lay out again for a new viewport size.
    pub fn resize(&mut self, size: ViewportSize) -> Result<Update, MeasurementFailure> {
        let update = {
            let guard = self.store.read();
            let content: &[String] = &guard;
            let generation = self.store.generation();
            let caught_up =
                catch_up(&mut self.controller, &mut self.seen_generation, generation, content)?;
            caught_up.merge(self.controller.layout(content, size)?)
        };
        Ok(self.finish(update))
    }

    /// One refresh tick.
    ///
    /// Does nothing while the viewport is zero-sized. Otherwise at most one pending
    /// action is applied; a replaced content store is picked up even when its
    /// `ContentChanged` was dropped by a full queue.
    pub fn refresh(&mut self) -> Result<Update, MeasurementFailure> {
        if self.controller.size().is_empty() {
            return Ok(Update::None);
        }
        match self.actions.try_next() {
            Some(action) => self.apply(action),
            None if self.store.generation() != self.seen_generation => {
                self.apply(ViewAction::ContentChanged)
            }
            None => Ok(Update::None),
        }
    }

    /// Apply one action immediately, bypassing the queue.
    ///
    /// Content replaced since the last pass is re-anchored first, under the same read
    /// lock the action runs with. `ContentChanged` itself carries no work: replacement
    /// is detected through the store generation.
    pub fn apply(&mut self, action: ViewAction) -> Result<Update, MeasurementFailure> {
        let update = {
            let guard = self.store.read();
            let content: &[String] = &guard;
            let generation = self.store.generation();
            let vc = &mut self.controller;
            let caught_up = catch_up(vc, &mut self.seen_generation, generation, content)
                .inspect_err(|err| warn!(action = "content_changed", %err, "action failed"))?;
            let result = match action {
                ViewAction::LineUp => vc.line_up(content),
                ViewAction::LineDown => vc.line_down(content),
                ViewAction::PageUp => vc.page_up(content),
                ViewAction::PageDown => vc.page_down(content),
                ViewAction::Top => vc.top(content),
                ViewAction::Bottom => vc.bottom(content),
                ViewAction::JumpTo {
                    line,
                    offset,
                    center,
                } => vc.jump_to(content, line, offset, center),
                ViewAction::JumpToFraction(fraction) => vc.jump_to_fraction(content, fraction),
                ViewAction::SetUnderline(mode) => vc.set_underline(content, mode),
                ViewAction::ContentChanged => Ok(Update::None),
            };
            caught_up.merge(
                result.inspect_err(|err| warn!(action = action.name(), %err, "action failed"))?,
            )
        };
        debug!(action = action.name(), ?update, anchor = %self.controller.anchor(), "applied action");
        Ok(self.finish(update))
    }

    /// Record the redraw and notify the listener. The content lock is not held here.
    fn finish(&mut self, update: Update) -> Update {
        if update.needs_redraw() {
            self.needs_redraw = true;
        }
        if update.moved() {
            if let Some(callback) = self.on_position.as_mut() {
                callback(self.controller.anchor());
            }
        }
        update
    }
}

/// Re-anchor `controller` if the store moved past `seen` while `content` was read.
fn catch_up<M: TextMeasurer>(
    controller: &mut ViewportController<M>,
    seen: &mut u64,
    generation: u64,
    content: &[String],
) -> Result<Update, MeasurementFailure> {
    if generation == *seen {
        return Ok(Update::None);
    }
    *seen = generation;
    controller.content_changed(content)
}
