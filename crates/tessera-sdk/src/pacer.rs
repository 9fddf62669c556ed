// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Frame rate pacing against a monotonic deadline.

use std::thread;
use std::time::{Duration, Instant};

/// Sleeps the game loop so frames start at a steady rate.
///
/// Each frame advances a deadline by exactly one budget, so short frames do not
/// accumulate drift. When the loop falls more than `max_catch_up_frames`
/// budgets behind, the deadline is moved to the present instead of running
/// unpaced until it catches up.
#[derive(Debug, Clone)]
pub struct FramePacer {
    budget: Duration,
    max_catch_up_frames: u32,
    deadline: Option<Instant>,
}

impl FramePacer {
    /// Creates a pacer with the given frame budget. A zero budget disables pacing.
    pub fn new(budget: Duration, max_catch_up_frames: u32) -> Self {
        Self {
            budget,
            max_catch_up_frames,
            deadline: None,
        }
    }

    /// Creates a pacer targeting `fps` frames per second.
    pub fn from_fps(fps: u32, max_catch_up_frames: u32) -> Self {
        Self::new(crate::config::frame_budget(fps), max_catch_up_frames)
    }

    /// Returns the time allotted to one frame.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Anchors the schedule: the first frame is due one budget after `now`.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now);
    }

    /// Advances the schedule by one frame and returns how long to wait at `now`.
    ///
    /// Never negative. Without a prior [`FramePacer::start`] the schedule is
    /// anchored at `now`.
    pub fn delay_for(&mut self, now: Instant) -> Duration {
        if self.budget.is_zero() {
            return Duration::ZERO;
        }

        let deadline = self.deadline.get_or_insert(now);
        *deadline += self.budget;

        match now.checked_duration_since(*deadline) {
            Some(behind) => {
                if behind > self.budget * self.max_catch_up_frames {
                    log::debug!(
                        "Frame loop is {:.1} ms behind schedule; resynchronizing",
                        behind.as_secs_f64() * 1000.0
                    );
                    *deadline = now;
                }
                Duration::ZERO
            }
            None => *deadline - now,
        }
    }

    /// Sleeps until the current frame's deadline and returns the time slept.
    pub fn pace(&mut self) -> Duration {
        let delay = self.delay_for(Instant::now());
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        delay
    }
}
