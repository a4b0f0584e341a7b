use ultraviolet::{Vec2, Vec3};

use crate::camera::CameraMode;
use crate::pose::Pose;

/// Snapshot of the continuous controls for one tick, assembled by the host
/// from whatever devices it supports.
///
/// `movement` is camera-relative for the fly controller (x = right,
/// y = world up, z = forward); `look` is a yaw/pitch delta in radians, which
/// the orbit controller reads as orbit angles; `zoom` is a signed step count
/// scaling the orbit distance.
#[derive(Clone, Copy, Debug)]
pub struct InputFrame {
    pub movement: Vec3,
    pub look: Vec2,
    pub zoom: f32,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }
}

impl Default for InputFrame {
    fn default() -> Self {
        Self {
            movement: Vec3::zero(),
            look: Vec2::zero(),
            zoom: 0.0,
        }
    }
}

/// Discrete requests from the host UI, handled synchronously and in order by
/// [`CameraRig::handle`](crate::rig::CameraRig::handle) before the tick's
/// pose update.
#[derive(Clone, Copy, Debug)]
pub enum Command {
    /// Pull the camera back until the scene bounds fill the view.
    FrameScene,
    /// Return to the startup pose.
    Reset,
    /// Toggle animation playback; switches into animation mode first if needed.
    PlayPause,
    /// Leave animation mode, returning to the previous interactive mode.
    Cancel,
    /// User grabbed the controls mid-animation; same recovery as [`Command::Cancel`].
    Interrupt,
    /// Select the previous captured frame (wraps around).
    PrevTransformFrame,
    /// Select the next captured frame (wraps around).
    NextTransformFrame,
    /// Select whichever captured frame best matches the live view.
    GotoNearestTransformFrame,
    /// Re-target the camera onto the currently selected captured frame.
    GotoCurrentTransformFrame,
    /// Switch camera mode. `previous` optionally names the mode to remember
    /// for cancel/interrupt recovery; otherwise the rig records the mode it
    /// is leaving.
    SetMode {
        mode: CameraMode,
        previous: Option<CameraMode>,
    },
    /// Move the animation cursor to an absolute time in seconds.
    Scrub(f32),
    /// Look at a picked 3D point from the current position.
    PickPoint(Vec3),
    /// Jump to a stored reference viewpoint.
    ActivateViewpoint(Pose),
}
