//! Interpolation for simulated drags.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A position on the rendering surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, to: Point, t: f32) -> Point {
        Point {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }

    pub fn distance(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Straight-line motion from `from` to `to` over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragAnimation {
    pub from: Point,
    pub to: Point,
    pub duration: Duration,
    pub tolerance: f32,
}

impl DragAnimation {
    pub fn new(from: Point, to: Point, duration: Duration, tolerance: f32) -> Self {
        Self {
            from,
            to,
            duration,
            tolerance,
        }
    }

    /// Fraction of the way travelled after `elapsed`, clamped to `[0, 1]`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn position_at(&self, elapsed: Duration) -> Point {
        if elapsed >= self.duration {
            return self.to;
        }
        self.from.lerp(self.to, self.progress(elapsed))
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration || self.position_at(elapsed).distance(self.to) < self.tolerance
    }

    /// Sample points at a fixed frame interval, ending exactly on `to`.
    pub fn frames(&self, frame: Duration) -> Frames {
        Frames {
            animation: *self,
            frame,
            elapsed: Duration::ZERO,
            done: false,
        }
    }
}

pub struct Frames {
    animation: DragAnimation,
    frame: Duration,
    elapsed: Duration,
    done: bool,
}

impl Iterator for Frames {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        self.elapsed += self.frame;
        if self.frame.is_zero() || self.animation.is_finished(self.elapsed) {
            self.done = true;
            return Some(self.animation.to);
        }
        Some(self.animation.position_at(self.elapsed))
    }
}
