use std::f32::consts::PI;

use ultraviolet::{Bivec3, Lerp, Rotor3, Slerp, Vec3};

/// Smallest field of view (degrees) a pose will carry.
pub const MIN_FOV: f32 = 1.0;
/// Largest field of view (degrees) a pose will carry.
pub const MAX_FOV: f32 = 179.0;

/// A virtual camera pose: position, orientation and field of view.
///
/// The orientation is a normalized rotor; the camera looks down its local
/// −Z axis, so the world-space view direction is `orientation * world_forward()`.
/// Field of view is in degrees and clamped into `[MIN_FOV, MAX_FOV]` at every
/// construction site. Copied by value.
#[derive(Clone, Copy, Debug)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Rotor3,
    pub fov: f32,
}

impl Pose {
    pub fn new(position: Vec3, orientation: Rotor3, fov: f32) -> Self {
        Self {
            position,
            orientation: orientation.normalized(),
            fov: fov.clamp(MIN_FOV, MAX_FOV),
        }
    }

    /// Pose standing at `eye`, looking at `target`.
    pub fn looking_at(eye: Vec3, target: Vec3, fov: f32) -> Self {
        let mut pose = Self::new(eye, Rotor3::identity(), fov);
        pose.look_at(target);
        pose
    }

    /// Re-orients the pose so its forward axis points at `target`.
    /// A target coincident with the position leaves the orientation unchanged.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.position;
        if dir.mag_sq() < 1e-12 {
            return;
        }
        self.orientation = rotor_towards(dir.normalized());
    }

    /// Unit view direction in world space.
    pub fn forward(&self) -> Vec3 {
        self.orientation * Self::world_forward()
    }

    /// in world-space
    pub const fn world_forward() -> Vec3 {
        Vec3::new(0.0, 0.0, -1.0)
    }

    /// in world-space
    pub const fn world_right() -> Vec3 {
        Vec3::new(1.0, 0.0, 0.0)
    }

    /// in world-space
    pub const fn world_up() -> Vec3 {
        Vec3::new(0.0, 1.0, 0.0)
    }

    /// Interpolates position and field of view linearly and the orientation
    /// spherically. `t` is clamped to `[0, 1]`; `t = 1` returns `to` exactly.
    pub fn lerp(&self, to: &Pose, t: f32) -> Pose {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return *to;
        }
        let position = self.position.lerp(to.position, t);
        let fov = self.fov + (to.fov - self.fov) * t;

        // Rotors double-cover rotations; flip the far representative so the
        // interpolation takes the short arc.
        let mut end = to.orientation;
        let mut dot = rotor_dot(self.orientation, end);
        if dot < 0.0 {
            end = Rotor3::new(-end.s, Bivec3::new(-end.bv.xy, -end.bv.xz, -end.bv.yz));
            dot = -dot;
        }
        // Slerp divides by sin(angle); fall back to a normalized lerp when
        // the rotors are nearly parallel.
        let orientation = if dot > 0.9995 {
            self.orientation.lerp(end, t).normalized()
        } else {
            self.orientation.slerp(end, t).normalized()
        };

        Pose {
            position,
            orientation,
            fov,
        }
    }

    /// True when the two poses agree within `epsilon` (world units for the
    /// position, unit-vector delta for the view direction, degrees for fov).
    pub fn approx_eq(&self, other: &Pose, epsilon: f32) -> bool {
        (self.position - other.position).mag() <= epsilon
            && (self.forward() - other.forward()).mag() <= epsilon
            && (self.fov - other.fov).abs() <= epsilon
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::zero(),
            orientation: Rotor3::identity(),
            fov: 60.0,
        }
    }
}

fn rotor_dot(a: Rotor3, b: Rotor3) -> f32 {
    a.s * b.s + a.bv.xy * b.bv.xy + a.bv.xz * b.bv.xz + a.bv.yz * b.bv.yz
}

/// Roll-free orientation whose forward axis is the unit vector `dir`:
/// a yaw in the horizontal plane followed by a pitch, so the horizon stays
/// level wherever the direction allows one.
fn rotor_towards(dir: Vec3) -> Rotor3 {
    let flat = Vec3::new(dir.x, 0.0, dir.z);
    if flat.mag_sq() < 1e-12 {
        // Straight up or down; no horizon to preserve.
        return rotor_between(Pose::world_forward(), dir);
    }
    let flat = flat.normalized();
    let yaw = rotor_between(Pose::world_forward(), flat);
    let pitch = rotor_between(flat, dir);
    pitch * yaw
}

/// Unit forward vector for a yaw (about world up, zero at world forward)
/// and a pitch (positive looking up).
pub(crate) fn forward_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
}

/// Inverse of [`forward_from_angles`]; yaw is 0 for a straight-up or
/// straight-down `forward`.
pub(crate) fn angles_from_forward(forward: Vec3) -> (f32, f32) {
    let flat_mag_sq = forward.x * forward.x + forward.z * forward.z;
    // Rotor-rotated verticals sit a few ulp off unit length; atan2 against
    // the flat magnitude keeps their pitch exact where asin would not.
    let pitch = forward.y.atan2(flat_mag_sq.sqrt());
    let yaw = if flat_mag_sq < 1e-12 {
        0.0
    } else {
        (-forward.x).atan2(-forward.z)
    };
    (yaw, pitch)
}

/// Rotor taking the unit vector `from` onto the unit vector `to`.
fn rotor_between(from: Vec3, to: Vec3) -> Rotor3 {
    if from.dot(to) < -1.0 + 1e-6 {
        // Antiparallel vectors leave the rotation plane undefined; take a
        // half-turn about an axis perpendicular to `from`, preferring the up
        // axis so a reversed look direction keeps the horizon.
        let mut axis = Pose::world_up() - from * from.dot(Pose::world_up());
        if axis.mag_sq() < 1e-8 {
            axis = Pose::world_right();
        }
        return Rotor3::from_angle_plane(PI, Bivec3::from_normalized_axis(axis.normalized()));
    }
    Rotor3::from_rotation_between(from, to)
}
