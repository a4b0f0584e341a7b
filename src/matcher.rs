use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::dataset::FrameSet;
use crate::pose::Pose;

/// Term weights for the nearest-frame score. The defaults are tuned so view
/// direction dominates: the feature answers "what was the camera looking
/// at", not just "where was it standing".
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub position: f32,
    pub direction: f32,
    pub fov: f32,
    /// Flat surcharge for candidates facing away from the live view.
    pub behind_penalty: f32,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            position: 0.4,
            direction: 0.5,
            fov: 0.1,
            behind_penalty: 0.5,
        }
    }
}

/// Index of the prepared frame most similar to the live pose, or `None` for
/// an empty set. Lower score wins; equal scores keep the earlier frame.
///
/// The position term is normalized by the scene diameter so the score is
/// comparable across scenes of any size.
pub fn nearest_frame(
    live: &Pose,
    frames: &FrameSet,
    scene_radius: f32,
    weights: &MatchWeights,
) -> Option<usize> {
    let scale = (2.0 * scene_radius).max(1e-3);
    let live_forward = live.forward();

    let mut best: Option<(usize, f32)> = None;
    for (index, frame) in frames.frames().iter().enumerate() {
        let pos_term = (live.position - frame.pose.position).mag() / scale;
        let alignment = live_forward.dot(frame.forward).clamp(-1.0, 1.0);
        let dir_term = alignment.acos() / PI;
        let fov_term = ((live.fov - frame.fov).abs() / 90.0).min(1.0);

        let mut score =
            weights.position * pos_term + weights.direction * dir_term + weights.fov * fov_term;
        if alignment < 0.0 {
            score += weights.behind_penalty;
        }

        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}
