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

//! Frame timing statistics, summarized at a fixed interval.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tessera_core::Stopwatch;

/// Summary of the frames recorded during one reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameReport {
    /// Number of frames recorded.
    pub frames: u64,
    /// Mean frame work time in milliseconds.
    pub average_ms: f64,
    /// Longest frame work time in milliseconds.
    pub max_ms: f64,
    /// Frames whose work time exceeded the frame budget.
    pub overruns: u64,
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames, avg {:.2} ms, max {:.2} ms, {} overrun(s)",
            self.frames, self.average_ms, self.max_ms, self.overruns
        )
    }
}

/// Records how long each frame's work takes and logs a summary periodically.
#[derive(Debug)]
pub struct FrameTelemetry {
    budget: Duration,
    interval: Duration,
    last_report: Instant,
    stopwatch: Stopwatch,
    frames: u64,
    total: Duration,
    max: Duration,
    overruns: u64,
}

impl FrameTelemetry {
    /// Creates a recorder comparing frames against `budget` and reporting every `interval`.
    pub fn new(budget: Duration, interval: Duration) -> Self {
        Self {
            budget,
            interval,
            last_report: Instant::now(),
            stopwatch: Stopwatch::new(),
            frames: 0,
            total: Duration::ZERO,
            max: Duration::ZERO,
            overruns: 0,
        }
    }

    /// Marks the start of a frame's work.
    pub fn begin_frame(&mut self) {
        self.stopwatch.restart();
    }

    /// Marks the end of a frame's work, records it and returns its duration.
    pub fn end_frame(&mut self) -> Duration {
        let elapsed = self.stopwatch.elapsed();
        self.record(elapsed);
        elapsed
    }

    /// Records one frame of the given duration.
    ///
    /// A zero budget means the loop is unpaced and nothing counts as an overrun.
    pub fn record(&mut self, frame: Duration) {
        self.frames += 1;
        self.total += frame;
        self.max = self.max.max(frame);

        if !self.budget.is_zero() && frame > self.budget {
            self.overruns += 1;
            log::debug!(
                "Frame overran its budget: {:.2} ms > {:.2} ms",
                frame.as_secs_f64() * 1000.0,
                self.budget.as_secs_f64() * 1000.0
            );
        }
    }

    /// Returns the statistics of the current window without resetting it.
    pub fn report(&self) -> FrameReport {
        let average_ms = if self.frames == 0 {
            0.0
        } else {
            self.total.as_secs_f64() * 1000.0 / self.frames as f64
        };

        FrameReport {
            frames: self.frames,
            average_ms,
            max_ms: self.max.as_secs_f64() * 1000.0,
            overruns: self.overruns,
        }
    }

    /// Should be called once per frame.
    ///
    /// When the reporting interval has passed, logs the window's summary,
    /// starts a new window and returns the summary.
    pub fn tick(&mut self) -> Option<FrameReport> {
        if self.last_report.elapsed() < self.interval {
            return None;
        }

        let report = self.report();
        if report.frames > 0 {
            log::info!("Frame telemetry: {report}");
        }
        self.reset();
        Some(report)
    }

    /// Discards the current window.
    pub fn reset(&mut self) {
        self.last_report = Instant::now();
        self.frames = 0;
        self.total = Duration::ZERO;
        self.max = Duration::ZERO;
        self.overruns = 0;
    }

    /// Returns the frame budget overruns are measured against.
    pub fn budget(&self) -> Duration {
        self.budget
    }
}

impl Default for FrameTelemetry {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000 / 60), Duration::from_secs(1))
    }
}
