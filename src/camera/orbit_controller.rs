use serde::{Deserialize, Serialize};
use ultraviolet::Vec3;

use crate::input::InputFrame;
use crate::pose::{angles_from_forward, forward_from_angles, Pose};

use super::controller::CameraController;

const MAX_PITCH: f32 = 1.53589; // 88 degrees, stops short of the poles

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitTuning {
    /// Scales the incoming look deltas.
    pub sensitivity: f32,
    /// Distance multiplier per zoom step; below 1 so positive steps move in.
    pub zoom_step: f32,
    pub min_distance: f32,
}

impl Default for OrbitTuning {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            zoom_step: 0.9,
            min_distance: 0.05,
        }
    }
}

/// Revolves around a pivot point: look input spins yaw/pitch, zoom input
/// scales the distance, and the camera always faces the pivot.
///
/// Only interactive pitching is clamped short of the poles; `goto_pose` and
/// `goto_look_at` adopt steep pitches exactly, and the next vertical look
/// input pulls the pitch back inside the clamp.
pub struct OrbitController {
    pivot: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,
    fov: f32,
    tuning: OrbitTuning,
}

impl OrbitController {
    pub fn new(tuning: OrbitTuning) -> Self {
        Self {
            pivot: Vec3::zero(),
            distance: 5.0,
            yaw: 0.0,
            pitch: 0.0,
            fov: 60.0,
            tuning,
        }
    }

    /// Adopt an external pose, keeping the current orbit distance: the pivot
    /// is re-projected that far along the pose's forward axis.
    pub fn goto_pose(&mut self, pose: &Pose) {
        let forward = pose.forward();
        self.pivot = pose.position + forward * self.distance;
        let (yaw, pitch) = angles_from_forward(forward);
        self.yaw = yaw;
        self.pitch = pitch;
        self.fov = pose.fov;
    }

    /// Adopt an exact eye/pivot pair, deriving distance and angles from it.
    pub fn goto_look_at(&mut self, eye: Vec3, pivot: Vec3, fov: f32) {
        let offset = pivot - eye;
        let distance = offset.mag();
        if distance > 1e-6 {
            let (yaw, pitch) = angles_from_forward(offset / distance);
            self.yaw = yaw;
            self.pitch = pitch;
        }
        self.pivot = pivot;
        self.distance = distance.max(self.tuning.min_distance);
        self.fov = fov;
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl CameraController for OrbitController {
    fn on_enter(&mut self, pose: &Pose) {
        self.goto_pose(pose);
    }

    fn update(&mut self, _dt: f32, input: &InputFrame, target: &mut Pose) {
        self.yaw -= input.look.x * self.tuning.sensitivity;
        if input.look.y != 0.0 {
            // Clamp interactive pitching only; adopted poses may rest past it.
            self.pitch = (self.pitch + input.look.y * self.tuning.sensitivity)
                .clamp(-MAX_PITCH, MAX_PITCH);
        }
        if input.zoom != 0.0 {
            self.distance = (self.distance * self.tuning.zoom_step.powf(input.zoom))
                .max(self.tuning.min_distance);
        }

        let forward = forward_from_angles(self.yaw, self.pitch);
        let position = self.pivot - forward * self.distance;
        *target = Pose::looking_at(position, self.pivot, self.fov);
    }
}
