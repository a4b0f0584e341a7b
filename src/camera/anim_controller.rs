use serde::{Deserialize, Serialize};
use thiserror::Error;
use ultraviolet::{Lerp, Vec3};

use crate::input::InputFrame;
use crate::pose::Pose;

use super::controller::CameraController;

/// Pre-authored camera path: parallel keyframe channels, sampled by time.
/// `fovs` may be empty, in which case playback keeps whatever field of view
/// the camera had when the animation took over.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnimationTrack {
    pub timestamps: Vec<f32>,
    pub positions: Vec<Vec3>,
    /// Look-at targets, interpolated in world space.
    pub targets: Vec<Vec3>,
    #[serde(default)]
    pub fovs: Vec<f32>,
}

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("animation track needs at least 2 keyframes, got {0}")]
    TooShort(usize),
    #[error(
        "channel lengths differ: {timestamps} timestamps, {positions} positions, \
         {targets} targets, {fovs} fovs"
    )]
    ChannelMismatch {
        timestamps: usize,
        positions: usize,
        targets: usize,
        fovs: usize,
    },
    #[error("timestamps must be finite and strictly increasing (violated at index {0})")]
    BadTimestamp(usize),
    #[error("non-finite value in keyframe {0}")]
    NonFinite(usize),
}

/// Replays an [`AnimationTrack`]. The cursor advances by `dt` and clamps to
/// the track's end; pausing is the rig's job (it feeds dt = 0).
pub struct AnimController {
    track: AnimationTrack,
    cursor: f32,
    /// Where the previous sample landed; playback usually moves forward, so
    /// the keyframe search resumes here instead of at the start.
    last_keyframe: usize,
    /// Field of view inherited on enter, used when the track has no fov channel.
    base_fov: f32,
}

impl AnimController {
    pub fn new(track: AnimationTrack) -> Result<Self, TrackError> {
        validate(&track)?;
        Ok(Self {
            track,
            cursor: 0.0,
            last_keyframe: 0,
            base_fov: 60.0,
        })
    }

    pub fn duration(&self) -> f32 {
        self.track.timestamps.last().copied().unwrap_or_default()
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Jump the cursor to an absolute time, clamped into the track.
    pub fn scrub(&mut self, time: f32) {
        self.cursor = time.clamp(0.0, self.duration());
    }

    pub fn sample(&mut self) -> Pose {
        let timestamps = &self.track.timestamps;
        let start = if timestamps[self.last_keyframe] > self.cursor {
            0
        } else {
            self.last_keyframe
        };
        let mut keyframe = start;
        for i in start..timestamps.len() {
            if timestamps[i] <= self.cursor {
                keyframe = i;
            } else {
                break;
            }
        }
        self.last_keyframe = keyframe;

        let i = keyframe.min(timestamps.len() - 2);
        let span = (timestamps[i + 1] - timestamps[i]).max(1e-4);
        let t = ((self.cursor - timestamps[i]) / span).clamp(0.0, 1.0);

        let position = self.track.positions[i].lerp(self.track.positions[i + 1], t);
        let target = self.track.targets[i].lerp(self.track.targets[i + 1], t);
        let fov = if self.track.fovs.is_empty() {
            self.base_fov
        } else {
            self.track.fovs[i] + (self.track.fovs[i + 1] - self.track.fovs[i]) * t
        };
        Pose::looking_at(position, target, fov)
    }
}

impl CameraController for AnimController {
    fn on_enter(&mut self, pose: &Pose) {
        self.base_fov = pose.fov;
    }

    fn update(&mut self, dt: f32, _input: &InputFrame, target: &mut Pose) {
        self.cursor = (self.cursor + dt).clamp(0.0, self.duration());
        *target = self.sample();
    }
}

fn validate(track: &AnimationTrack) -> Result<(), TrackError> {
    let len = track.timestamps.len();
    if len < 2 {
        return Err(TrackError::TooShort(len));
    }
    if track.positions.len() != len
        || track.targets.len() != len
        || (!track.fovs.is_empty() && track.fovs.len() != len)
    {
        return Err(TrackError::ChannelMismatch {
            timestamps: len,
            positions: track.positions.len(),
            targets: track.targets.len(),
            fovs: track.fovs.len(),
        });
    }
    for i in 0..len {
        let t = track.timestamps[i];
        if !t.is_finite() || (i > 0 && t <= track.timestamps[i - 1]) {
            return Err(TrackError::BadTimestamp(i));
        }
        let finite = |v: Vec3| v.x.is_finite() && v.y.is_finite() && v.z.is_finite();
        if !finite(track.positions[i]) || !finite(track.targets[i]) {
            return Err(TrackError::NonFinite(i));
        }
        if let Some(fov) = track.fovs.get(i) {
            if !fov.is_finite() {
                return Err(TrackError::NonFinite(i));
            }
        }
    }
    Ok(())
}
