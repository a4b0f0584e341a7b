use serde::{Deserialize, Serialize};
use ultraviolet::Vec3;

use crate::camera::{AnimationTrack, CameraMode, FlyTuning, OrbitTuning};
use crate::matcher::MatchWeights;
use crate::pose::Pose;
use crate::settle::SettleTuning;

/// Startup configuration for the whole rig. Every field has a default, so a
/// host can deserialize a partial JSON document and only override what it
/// cares about.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CameraSettings {
    /// Starting camera position.
    pub position: Vec3,
    /// Point the starting camera looks at.
    pub target: Vec3,
    /// Starting field of view in degrees.
    pub fov: f32,
    /// Forces the initial mode instead of deriving it from track and bounds.
    pub mode: Option<CameraMode>,
    /// Pre-authored animation; invalid tracks are dropped with a warning.
    pub track: Option<AnimationTrack>,
    /// Transition progress per second; 1.0 means one-second transitions.
    pub transition_speed: f32,
    pub orbit: OrbitTuning,
    pub fly: FlyTuning,
    pub settle: SettleTuning,
    pub weights: MatchWeights,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::zero(),
            fov: 60.0,
            mode: None,
            track: None,
            transition_speed: 1.0,
            orbit: OrbitTuning::default(),
            fly: FlyTuning::default(),
            settle: SettleTuning::default(),
            weights: MatchWeights::default(),
        }
    }
}

impl CameraSettings {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn start_pose(&self) -> Pose {
        Pose::looking_at(self.position, self.target, self.fov)
    }
}
