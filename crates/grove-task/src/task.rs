//! The timed task state machine.

use std::time::Duration;

use grove_core::ConfigError;

const LARGEST_BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Where a task is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskPhase {
    /// Waiting out the leading delay. No progress is reported.
    Delayed,
    /// Interpolating.
    Running,
    /// Reached `t = 1`. Terminal.
    Finished,
}

/// What one call to [`TimedTask::advance`] produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TaskStep {
    /// Still inside the delay, or no measurable advance since the last
    /// reported progress.
    Idle,
    /// Intermediate progress, strictly below 1.
    Progress(f32),
    /// The task just reached its end. The caller must report progress
    /// `1.0` and then completion.
    Finished,
}

/// Restartable interpolation from 0 to 1 over a fixed duration.
///
/// Elapsed time is accumulated as [`Duration`], so ticks that sum to the
/// duration land on it exactly with no floating-point drift.
#[derive(Clone, Debug)]
pub struct TimedTask {
    delay: Duration,
    duration: Duration,
    elapsed: Duration,
    phase: TaskPhase,
    reported: Option<f32>,
}

impl TimedTask {
    /// Create a task that runs for `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveDuration`] for a zero duration.
    pub fn new(duration: Duration) -> Result<Self, ConfigError> {
        if duration.is_zero() {
            return Err(ConfigError::NonPositiveDuration {
                name: "task duration",
            });
        }
        Ok(Self {
            delay: Duration::ZERO,
            duration,
            elapsed: Duration::ZERO,
            phase: TaskPhase::Running,
            reported: None,
        })
    }

    /// Wait `delay` before the interpolation starts (builder).
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        if !delay.is_zero() && self.elapsed < delay {
            self.phase = TaskPhase::Delayed;
        }
        self
    }

    /// Interpolation length, excluding the delay.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Leading delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Delay plus duration.
    pub fn total(&self) -> Duration {
        self.delay.saturating_add(self.duration)
    }

    /// Current phase.
    pub fn phase(&self) -> TaskPhase {
        self.phase
    }

    /// Progress in [0, 1] as of the last advance.
    pub fn progress(&self) -> f32 {
        match self.phase {
            TaskPhase::Delayed => 0.0,
            TaskPhase::Finished => 1.0,
            TaskPhase::Running => self.running_fraction(),
        }
    }

    /// Whether the task has reached its end.
    pub fn is_finished(&self) -> bool {
        self.phase == TaskPhase::Finished
    }

    /// Accumulate `dt` and report what happened.
    ///
    /// Reported fractions strictly increase: a tick that does not move the
    /// fraction (including a zero-length one) yields [`TaskStep::Idle`].
    /// Once finished, further calls return [`TaskStep::Idle`].
    pub fn advance(&mut self, dt: Duration) -> TaskStep {
        if self.phase == TaskPhase::Finished {
            return TaskStep::Idle;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed < self.delay {
            return TaskStep::Idle;
        }
        if self.elapsed.saturating_sub(self.delay) >= self.duration {
            self.phase = TaskPhase::Finished;
            return TaskStep::Finished;
        }
        self.phase = TaskPhase::Running;
        let t = self.running_fraction();
        if self.reported.is_some_and(|last| t <= last) {
            return TaskStep::Idle;
        }
        self.reported = Some(t);
        TaskStep::Progress(t)
    }

    /// Rewind to the beginning, keeping duration and delay.
    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
        self.reported = None;
        self.phase = if self.delay.is_zero() {
            TaskPhase::Running
        } else {
            TaskPhase::Delayed
        };
    }

    fn running_fraction(&self) -> f32 {
        let run = self.elapsed.saturating_sub(self.delay);
        let t = run.as_nanos() as f64 / self.duration.as_nanos() as f64;
        // Below the end the f32 cast may round up; 1.0 is reserved for Finished.
        (t as f32).min(LARGEST_BELOW_ONE)
    }
}
