use std::collections::BTreeMap;

use serde::Deserialize;
use ultraviolet::{Bivec3, Rotor3, Vec3};

use crate::pose::Pose;

/// Raw dataset as supplied by the host, typically a parsed `transforms.json`
/// from a photogrammetry or NeRF-style calibration run. Every field is
/// optional; preparation degrades instead of failing.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DatasetPayload {
    #[serde(default)]
    pub frames: Vec<TransformFrame>,
    /// Sensor width in pixels, used with `fl_x` to derive the horizontal fov.
    pub w: Option<f64>,
    /// Focal length in pixels.
    pub fl_x: Option<f64>,
    /// Horizontal fov in radians, used when `w`/`fl_x` are unusable.
    pub camera_angle_x: Option<f64>,
    /// Scene re-orientation, Euler degrees about X then Y then Z.
    pub scene_rotation: Option<[f32; 3]>,
    /// Named re-orientation candidates, picked by `active_scene_rotation`.
    pub scene_rotations: Option<BTreeMap<String, [f32; 3]>>,
    pub active_scene_rotation: Option<String>,
    /// Older payloads carry the re-orientation under this name.
    pub rotation: Option<[f32; 3]>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TransformFrame {
    pub file_path: Option<String>,
    pub colmap_im_id: Option<u64>,
    /// Row-major camera-to-world matrix, 3x4 or 4x4.
    #[serde(default)]
    pub transform_matrix: Vec<Vec<f32>>,
}

impl DatasetPayload {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// The re-orientation that applies, by precedence: the direct field, then
    /// the keyed candidate named by `active_scene_rotation`, then the legacy
    /// field.
    fn reorientation(&self) -> Option<[f32; 3]> {
        if let Some(angles) = self.scene_rotation {
            return Some(angles);
        }
        if let (Some(rotations), Some(active)) =
            (&self.scene_rotations, &self.active_scene_rotation)
        {
            if let Some(angles) = rotations.get(active) {
                return Some(*angles);
            }
        }
        self.rotation
    }
}

/// One captured frame after preparation: its pose in viewer space plus the
/// cached quantities the matcher scores against.
#[derive(Clone, Debug)]
pub struct PreparedFrame {
    pub pose: Pose,
    pub forward: Vec3,
    pub fov: f32,
    pub file_path: Option<String>,
    pub colmap_im_id: Option<u64>,
}

/// The prepared dataset: decoded, re-oriented, capture-order sorted.
/// Read-only after construction.
#[derive(Debug, Default)]
pub struct FrameSet {
    frames: Vec<PreparedFrame>,
}

impl FrameSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn prepare(payload: &DatasetPayload, default_fov: f32) -> Self {
        let fov = resolve_fov(payload, default_fov);
        let reorientation = payload.reorientation().map(euler_rotor);

        let mut decoded = Vec::with_capacity(payload.frames.len());
        for (index, frame) in payload.frames.iter().enumerate() {
            match decode_matrix(&frame.transform_matrix) {
                Ok((position, forward)) => decoded.push(DecodedFrame {
                    key: sort_key(frame.file_path.as_deref()),
                    frame,
                    position,
                    forward,
                }),
                Err(reason) => log::warn!(
                    "skipping transform frame {} ({}): {}",
                    index,
                    frame.file_path.as_deref().unwrap_or("unnamed"),
                    reason
                ),
            }
        }

        // Capture order: numbered frames ascending, unnumbered ones last,
        // ties lexical. The sort is stable, so payload order breaks exact ties.
        decoded.sort_by(|a, b| {
            let ka = (a.key.is_none(), a.key.unwrap_or(0));
            let kb = (b.key.is_none(), b.key.unwrap_or(0));
            ka.cmp(&kb).then_with(|| {
                let pa = a.frame.file_path.as_deref().unwrap_or("");
                let pb = b.frame.file_path.as_deref().unwrap_or("");
                pa.cmp(pb)
            })
        });

        let frames = decoded
            .into_iter()
            .map(|entry| {
                let (position, forward) = match reorientation {
                    Some(rotor) => (rotor * entry.position, (rotor * entry.forward).normalized()),
                    None => (entry.position, entry.forward),
                };
                let pose = Pose::looking_at(position, position + forward, fov);
                PreparedFrame {
                    forward,
                    fov: pose.fov,
                    pose,
                    file_path: entry.frame.file_path.clone(),
                    colmap_im_id: entry.frame.colmap_im_id,
                }
            })
            .collect::<Vec<_>>();

        log::debug!(
            "prepared {} of {} transform frames (fov {:.1})",
            frames.len(),
            payload.frames.len(),
            fov
        );
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PreparedFrame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[PreparedFrame] {
        &self.frames
    }
}

struct DecodedFrame<'a> {
    key: Option<u64>,
    frame: &'a TransformFrame,
    position: Vec3,
    forward: Vec3,
}

/// Camera position and unit view direction from a row-major camera-to-world
/// matrix. The camera looks down its local -Z, so the direction is the
/// negated third rotation column.
fn decode_matrix(matrix: &[Vec<f32>]) -> Result<(Vec3, Vec3), &'static str> {
    if matrix.len() < 3 {
        return Err("fewer than 3 matrix rows");
    }
    for row in &matrix[..3] {
        if row.len() < 4 {
            return Err("matrix row with fewer than 4 columns");
        }
        if row[..4].iter().any(|v| !v.is_finite()) {
            return Err("non-finite matrix entry");
        }
    }
    let position = Vec3::new(matrix[0][3], matrix[1][3], matrix[2][3]);
    let forward = Vec3::new(-matrix[0][2], -matrix[1][2], -matrix[2][2]);
    if forward.mag_sq() < 1e-12 {
        return Err("degenerate view direction");
    }
    Ok((position, forward.normalized()))
}

/// Trailing `_<digits>` token of the file name, immediately before the
/// extension. `images/frame_00012.png` keys as 12.
fn sort_key(file_path: Option<&str>) -> Option<u64> {
    let name = file_path?.rsplit('/').next()?;
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    let (_, digits) = stem.rsplit_once('_')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// One horizontal fov in degrees for the whole dataset: derived from sensor
/// width and focal length when both are usable, else the explicit angle,
/// else the caller's default.
fn resolve_fov(payload: &DatasetPayload, default_fov: f32) -> f32 {
    if let (Some(w), Some(fl_x)) = (payload.w, payload.fl_x) {
        if w.is_finite() && fl_x.is_finite() && w > 0.0 && fl_x > 0.0 {
            return (2.0 * (w / (2.0 * fl_x)).atan()).to_degrees() as f32;
        }
    }
    if let Some(angle) = payload.camera_angle_x {
        if angle.is_finite() && angle > 0.0 {
            return (angle as f32).to_degrees();
        }
    }
    default_fov
}

fn euler_rotor(degrees: [f32; 3]) -> Rotor3 {
    let about = |axis: Vec3, angle: f32| {
        Rotor3::from_angle_plane(angle.to_radians(), Bivec3::from_normalized_axis(axis))
    };
    about(Vec3::unit_z(), degrees[2])
        * about(Vec3::unit_y(), degrees[1])
        * about(Vec3::unit_x(), degrees[0])
}
