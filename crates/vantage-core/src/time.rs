//! Frame timing for the viewer loop
//!
//! Tracks per-frame delta time (clamped) and drives one-shot timers such as
//! the texture settle delay.

use serde::{Deserialize, Serialize};

/// Configuration for frame time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Maximum delta time, so a stalled frame does not jump animations
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            max_delta_time: 0.25,
        }
    }
}

/// Frame time tracking
#[derive(Debug, Clone, Default)]
pub struct FrameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since the viewer started in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped)
    pub delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
}

impl FrameTime {
    /// Create a new frame time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Update with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.delta_time = raw_delta.clamp(0.0, self.config.max_delta_time);
        self.total_time += self.delta_time as f64;
        self.frame_count += 1;
    }
}

/// One-shot countdown timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    remaining: f32,
    fired: bool,
}

impl Timer {
    /// Create a timer that fires after `seconds`
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds.max(0.0),
            fired: false,
        }
    }

    /// Advance the timer. Returns true exactly once, on the tick it expires.
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.fired {
            return false;
        }
        self.remaining -= delta;
        if self.remaining <= 0.0 {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn is_finished(&self) -> bool {
        self.fired
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}
