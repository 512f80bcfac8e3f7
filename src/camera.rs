use std::f32::consts::FRAC_PI_2;
use std::ops::Range;

use glam::{Mat4, Vec3};

const PITCH_LIMIT: f32 = FRAC_PI_2 - 1e-2;
const MIN_DISTANCE: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub width: f32,
    pub height: f32,
    pub fovy: f32,
    pub zrange: Range<f32>,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            width: 800.,
            height: 600.,
            fovy: 60f32.to_radians(),
            zrange: 0.1..100.,
        }
    }
}

impl Projection {
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect(), self.zrange.start, self.zrange.end)
    }
}

/// Camera orbiting `target` at a fixed distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.,
            pitch: 0.3,
            distance: 8.,
            projection: Projection::default(),
        }
    }
}

impl Camera {
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(sy * cp, sp, cy * cp)
    }

    /// Rotates around the target; pitch stays short of the poles.
    pub fn orbit(&mut self, dyaw: f32, dpitch: f32) {
        self.yaw = (self.yaw + dyaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + dpitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).max(MIN_DISTANCE);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.view()
    }
}
