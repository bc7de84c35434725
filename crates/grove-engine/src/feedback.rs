//! The timed feedback banner.

use std::time::Duration;

use grove_core::ConfigError;
use grove_task::{Scheduler, TaskEvent, TaskEventKind, TaskSlot, TimedTask};

use crate::stage::TaskKey;

/// Text shown when a round ends.
pub const ROUND_FINISHED: &str = "Round Finished";

/// A one-line message that hides itself after a fixed time.
///
/// Showing a message while one is up replaces the text and restarts the
/// timer.
#[derive(Clone, Debug, Default)]
pub struct Banner {
    text: Option<&'static str>,
    timer: TaskSlot,
}

impl Banner {
    /// A hidden banner.
    pub fn new() -> Self {
        Self::default()
    }

    /// The visible text, if any.
    pub fn text(&self) -> Option<&'static str> {
        self.text
    }

    /// Whether the banner is up.
    pub fn is_visible(&self) -> bool {
        self.text.is_some()
    }

    /// Show `text` for `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveDuration`] for a zero duration.
    pub(crate) fn show(
        &mut self,
        scheduler: &mut Scheduler<TaskKey>,
        text: &'static str,
        duration: Duration,
    ) -> Result<(), ConfigError> {
        let task = TimedTask::new(duration)?;
        self.timer.start(scheduler, TaskKey::Banner, task);
        self.text = Some(text);
        Ok(())
    }

    /// Handle a banner task event. Returns `true` if the banner just hid.
    pub(crate) fn handle(&mut self, event: TaskEvent<TaskKey>) -> bool {
        if event.kind != TaskEventKind::Completed || !self.timer.finish(event.id) {
            return false;
        }
        self.text = None;
        true
    }
}
