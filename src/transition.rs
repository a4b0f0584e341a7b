use crate::pose::Pose;

/// Eased blend from a snapshotted pose toward a moving target pose.
///
/// The target is not stored here; callers pass the current target to
/// [`Transition::blend`] every tick, so a transition can chase a pose that
/// the active controller keeps updating mid-flight.
#[derive(Clone, Copy, Debug)]
pub struct Transition {
    from: Pose,
    /// 0 at the start of a blend, finished at 1. Advances by `speed` per second.
    progress: f32,
    speed: f32,
}

impl Transition {
    /// A transition that is already over. Used at startup so the first
    /// displayed pose is the target pose itself.
    pub fn completed(speed: f32) -> Self {
        Self {
            from: Pose::default(),
            progress: 1.0,
            speed: speed.max(1e-3),
        }
    }

    /// Restart the blend from `from`, which must be the pose currently on
    /// screen. Restarting mid-flight therefore composes without snapping.
    pub fn begin(&mut self, from: Pose) {
        self.from = from;
        self.progress = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        if self.progress < 1.0 {
            self.progress = (self.progress + dt * self.speed).min(1.0);
        }
    }

    pub fn is_done(&self) -> bool {
        self.progress >= 1.0
    }

    /// The pose to display this tick. Once the timer has run out this is
    /// exactly `target`, with no residual interpolation error.
    pub fn blend(&self, target: &Pose) -> Pose {
        if self.progress >= 1.0 {
            *target
        } else {
            self.from.lerp(target, ease_out_cubic(self.progress))
        }
    }
}

/// Fast start, gentle landing. Maps [0, 1] onto [0, 1] monotonically.
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}
