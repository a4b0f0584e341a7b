use serde::{Deserialize, Serialize};
use ultraviolet::{Lerp, Vec3};

use crate::input::InputFrame;
use crate::pose::{angles_from_forward, forward_from_angles, Pose};

use super::controller::CameraController;

const MAX_PITCH: f32 = 1.53589; // 88 degrees

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyTuning {
    /// Units per second at full input deflection.
    pub speed: f32,
    /// Scales the incoming look deltas.
    pub sensitivity: f32,
    /// Per-frame velocity retention; 0 is instant response, towards 1 is
    /// floatier.
    pub damping: f32,
}

impl Default for FlyTuning {
    fn default() -> Self {
        Self {
            speed: 5.0,
            sensitivity: 1.0,
            damping: 0.1,
        }
    }
}

/// Free 6-DOF flight: look input steers yaw/pitch, movement input pushes
/// along the view axes with smoothly damped velocity.
pub struct FlyController {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    velocity: Vec3,
    tuning: FlyTuning,
}

impl FlyController {
    pub fn new(tuning: FlyTuning) -> Self {
        Self {
            position: Vec3::zero(),
            yaw: 0.0,
            pitch: 0.0,
            fov: 60.0,
            velocity: Vec3::zero(),
            tuning,
        }
    }
}

impl CameraController for FlyController {
    fn on_enter(&mut self, pose: &Pose) {
        self.position = pose.position;
        let (yaw, pitch) = angles_from_forward(pose.forward());
        self.yaw = yaw;
        self.pitch = pitch;
        self.fov = pose.fov;
        self.velocity = Vec3::zero();
    }

    fn update(&mut self, dt: f32, input: &InputFrame, target: &mut Pose) {
        self.yaw -= input.look.x * self.tuning.sensitivity;
        if input.look.y != 0.0 {
            // Clamp interactive pitching only; a steep entry pitch stays put.
            self.pitch = (self.pitch + input.look.y * self.tuning.sensitivity)
                .clamp(-MAX_PITCH, MAX_PITCH);
        }

        let forward = forward_from_angles(self.yaw, self.pitch);
        let right = forward_from_angles(self.yaw, 0.0).cross(Pose::world_up());
        let wish = right * input.movement.x
            + Pose::world_up() * input.movement.y
            + forward * input.movement.z;
        let wish = normalize_if_not_zero(wish) * self.tuning.speed;

        // Frame-rate-independent approach toward the commanded velocity.
        let blend = 1.0 - self.tuning.damping.powf(dt * 60.0);
        self.velocity = self.velocity.lerp(wish, blend);
        self.position += self.velocity * dt;

        *target = Pose::looking_at(self.position, self.position + forward, self.fov);
    }
}

fn normalize_if_not_zero(vector: Vec3) -> Vec3 {
    if vector.mag_sq() < 1e-6 {
        Vec3::zero()
    } else {
        vector.normalized()
    }
}
