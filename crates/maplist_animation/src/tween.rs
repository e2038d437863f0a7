//! Timed single-value transitions
//!
//! A tween interpolates one value between fixed endpoints over a duration,
//! shaped by an easing function. Used for the explicit expand/collapse
//! height transitions.

use crate::easing::Easing;

/// A timed transition between two values
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: u32,
    easing: Easing,
    elapsed_ms: f32,
    playing: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
            elapsed_ms: 0.0,
            playing: false,
        }
    }

    /// Start (or restart) the transition from the beginning
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = true;
        // A zero-duration tween completes on the first tick
        if self.duration_ms == 0 {
            self.playing = false;
            self.elapsed_ms = 0.0;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the transition has consumed its full duration
    pub fn is_finished(&self) -> bool {
        !self.playing
    }

    pub fn to(&self) -> f32 {
        self.to
    }

    /// Unshaped progress through the duration (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    /// Advance the transition by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        self.elapsed_ms += dt_ms;

        if self.elapsed_ms >= self.duration_ms as f32 {
            self.elapsed_ms = self.duration_ms as f32;
            self.playing = false;
        }
    }
}
