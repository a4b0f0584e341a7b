use crate::input::InputFrame;
use crate::pose::Pose;

/// One camera behavior. Exactly one controller drives the target pose at a
/// time; the rig hands the camera over with `on_enter`/`on_exit` so the
/// incoming controller inherits whatever pose is on screen.
pub trait CameraController {
    /// Adopt `pose` as the controller's own state, so the first `update`
    /// continues from it instead of jumping.
    fn on_enter(&mut self, pose: &Pose);

    /// Called with the final pose when another controller takes over.
    fn on_exit(&mut self, _pose: &Pose) {}

    /// Advance by `dt` seconds using this tick's input snapshot and write
    /// the new target pose.
    fn update(&mut self, dt: f32, input: &InputFrame, target: &mut Pose);
}
