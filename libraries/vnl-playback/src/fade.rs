//! Timed volume ramps
//!
//! The controller only does the bookkeeping: it decides which volume each step
//! applies and how long to wait before the next one. The orchestrator owns the
//! timers and feeds every expiry back through [`FadeController::advance`] with
//! the generation it was scheduled under, so steps of a superseded fade are
//! recognized and dropped.
//!
//! Fade-in runs over the configured duration, fade-out over half of it.

use crate::types::FadeDirection;
use std::time::Duration;

/// Action to run once a fade-out reaches silence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeCompletion {
    /// Nothing; the fade only changes volume
    #[default]
    None,

    /// Pause the player and report "not playing"
    Pause,

    /// Start the next track
    Advance,
}

/// Handle returned when a fade starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeStart {
    /// Generation to pass back to [`FadeController::advance`]
    pub generation: u64,

    /// Delay before the first step
    pub delay: Duration,
}

/// Result of advancing a fade by one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeStep {
    /// The generation no longer matches the active fade
    Stale,

    /// Apply `volume`, then wait `delay` before the next step
    Continue { volume: f32, delay: Duration },

    /// Apply `volume`; the fade is done
    Finished {
        volume: f32,
        direction: FadeDirection,
        completion: FadeCompletion,
    },
}

/// A running fade
#[derive(Debug, Clone)]
struct FadeTask {
    direction: FadeDirection,
    start_volume: f32,
    end_volume: f32,
    steps: u32,
    step_duration: Duration,
    step: u32,
    generation: u64,
    completion: FadeCompletion,
}

impl FadeTask {
    /// Volume after `step` steps, clamped to the ramp's range
    fn volume_at(&self, step: u32) -> f32 {
        if step >= self.steps {
            return self.end_volume;
        }

        let progress = step as f32 / self.steps as f32;
        let volume = self.start_volume + (self.end_volume - self.start_volume) * progress;
        volume.clamp(0.0, self.start_volume.max(self.end_volume))
    }
}

/// Single-slot fade scheduler
///
/// Holds at most one active fade. Starting a fade replaces (and thereby
/// cancels) the previous one.
#[derive(Debug, Clone)]
pub struct FadeController {
    duration: Duration,
    steps: u32,
    generation: u64,
    task: Option<FadeTask>,
}

impl FadeController {
    /// Create a controller
    ///
    /// # Arguments
    /// * `duration_ms` - Fade-in duration; fade-out takes half
    /// * `steps` - Volume steps per fade (0 is treated as 1)
    pub fn new(duration_ms: u64, steps: u32) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            steps: steps.max(1),
            generation: 0,
            task: None,
        }
    }

    /// Start ramping from `current` up to `target` over the full duration
    pub fn fade_in(&mut self, current: f32, target: f32) -> FadeStart {
        self.start(
            FadeDirection::In,
            current,
            target,
            self.duration,
            FadeCompletion::None,
        )
    }

    /// Start ramping from `current` down to silence over half the duration
    ///
    /// `completion` is handed back with the final step.
    pub fn fade_out(&mut self, current: f32, completion: FadeCompletion) -> FadeStart {
        self.start(
            FadeDirection::Out,
            current,
            0.0,
            self.duration / 2,
            completion,
        )
    }

    /// Cancel the active fade, leaving volume at its last applied value
    ///
    /// Returns true if a fade was running.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        self.task.take().is_some()
    }

    /// Advance the fade scheduled under `generation` by one step
    pub fn advance(&mut self, generation: u64) -> FadeStep {
        let Some(task) = self.task.as_mut() else {
            return FadeStep::Stale;
        };

        if task.generation != generation {
            return FadeStep::Stale;
        }

        task.step += 1;
        let volume = task.volume_at(task.step);

        if task.step >= task.steps {
            let direction = task.direction;
            let completion = task.completion;
            self.task = None;
            return FadeStep::Finished {
                volume,
                direction,
                completion,
            };
        }

        FadeStep::Continue {
            volume,
            delay: task.step_duration,
        }
    }

    /// Direction of the active fade
    pub fn direction(&self) -> FadeDirection {
        self.task
            .as_ref()
            .map(|t| t.direction)
            .unwrap_or(FadeDirection::None)
    }

    /// Check if a fade-out is running
    pub fn is_fading_out(&self) -> bool {
        self.direction() == FadeDirection::Out
    }

    fn start(
        &mut self,
        direction: FadeDirection,
        start_volume: f32,
        end_volume: f32,
        total: Duration,
        completion: FadeCompletion,
    ) -> FadeStart {
        self.generation += 1;
        let step_duration = total / self.steps;

        self.task = Some(FadeTask {
            direction,
            start_volume,
            end_volume,
            steps: self.steps,
            step_duration,
            step: 0,
            generation: self.generation,
            completion,
        });

        FadeStart {
            generation: self.generation,
            delay: step_duration,
        }
    }
}
