use serde::{Deserialize, Serialize};

use crate::pose::Pose;

/// Thresholds below which two successive displayed poses count as "the same
/// view", plus the quiet period required before the view counts as settled.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleTuning {
    /// World-space units.
    pub position_epsilon: f32,
    /// Radians between the forward vectors.
    pub angle_epsilon: f32,
    /// Degrees.
    pub fov_epsilon: f32,
    /// Seconds of stillness before the settled edge fires.
    pub delay: f32,
}

impl Default for SettleTuning {
    fn default() -> Self {
        Self {
            position_epsilon: 1e-3,
            angle_epsilon: 1e-3,
            fov_epsilon: 0.01,
            delay: 0.2,
        }
    }
}

/// Debounces camera motion: reports exactly one "settled" edge after each
/// burst of movement, once the view has held still for the configured delay.
///
/// Feed it the displayed pose every tick. The first observation only seeds
/// the reference, and a tick counts as movement when any one threshold is
/// exceeded against the previous tick's pose.
#[derive(Clone, Copy, Debug)]
pub struct MotionSettle {
    tuning: SettleTuning,
    last: Option<Pose>,
    still_for: f32,
    /// Motion has been seen and its settled edge not yet reported.
    armed: bool,
}

impl MotionSettle {
    pub fn new(tuning: SettleTuning) -> Self {
        Self {
            tuning,
            last: None,
            still_for: 0.0,
            armed: false,
        }
    }

    /// Returns true on the settled edge only.
    pub fn observe(&mut self, pose: &Pose, dt: f32) -> bool {
        let Some(last) = self.last else {
            self.last = Some(*pose);
            return false;
        };
        let moved = self.exceeds(&last, pose);
        self.last = Some(*pose);

        if moved {
            self.still_for = 0.0;
            self.armed = true;
            return false;
        }
        if !self.armed {
            return false;
        }
        self.still_for += dt;
        if self.still_for >= self.tuning.delay {
            self.armed = false;
            return true;
        }
        false
    }

    fn exceeds(&self, a: &Pose, b: &Pose) -> bool {
        if (a.position - b.position).mag() > self.tuning.position_epsilon {
            return true;
        }
        if (a.fov - b.fov).abs() > self.tuning.fov_epsilon {
            return true;
        }
        let dot = a.forward().dot(b.forward()).clamp(-1.0, 1.0);
        dot.acos() > self.tuning.angle_epsilon
    }
}
