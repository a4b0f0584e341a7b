use ultraviolet::Vec3;

/// Axis-aligned bounding volume of the displayed content, supplied by the
/// host. Drives reset/framing poses and scale-normalizes the frame matcher.
#[derive(Clone, Copy, Debug)]
pub struct SceneBounds {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl SceneBounds {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Bounding-sphere radius, floored so degenerate content never produces
    /// a zero matcher scale.
    pub fn radius(&self) -> f32 {
        self.half_extents.mag().max(1e-3)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let d = point - self.center;
        d.x.abs() <= self.half_extents.x
            && d.y.abs() <= self.half_extents.y
            && d.z.abs() <= self.half_extents.z
    }

    /// Distance from the center at which the bounding sphere fits a camera
    /// with the given horizontal field of view, with a small margin.
    pub fn framing_distance(&self, fov_degrees: f32) -> f32 {
        let half_fov = (fov_degrees.to_radians() * 0.5).max(1e-3);
        self.radius() * 1.05 / half_fov.tan()
    }
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self {
            center: Vec3::zero(),
            half_extents: Vec3::one(),
        }
    }
}
