pub mod anim_controller;
pub mod controller;
pub mod fly_controller;
pub mod orbit_controller;

use serde::{Deserialize, Serialize};

pub use self::anim_controller::{AnimController, AnimationTrack, TrackError};
pub use self::controller::CameraController;
pub use self::fly_controller::{FlyController, FlyTuning};
pub use self::orbit_controller::{OrbitController, OrbitTuning};

/// Which behavior currently drives the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Revolve around a pivot point at a fixed distance.
    Orbit,
    /// Free 6-DOF movement with damped velocity.
    Fly,
    /// Replay of a pre-authored track. Only reachable when a valid track was
    /// supplied at startup.
    Anim,
}
