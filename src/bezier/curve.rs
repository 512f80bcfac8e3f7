use std::ops::{Deref, DerefMut};

use glam::Vec3;

/// Cubic Bernstein weights `(1-t)³, 3t(1-t)², 3t²(1-t), t³`.
pub fn bernstein(t: f32) -> [f32; 4] {
    let s = 1. - t;
    [s * s * s, 3. * t * s * s, 3. * t * t * s, t * t * t]
}

/// Quadratic Bernstein weights `(1-t)², 2t(1-t), t²`, used for the derivative of a cubic.
pub fn bernstein_quadratic(t: f32) -> [f32; 3] {
    let s = 1. - t;
    [s * s, 2. * t * s, t * t]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCurve {
    points: [Vec3; 4],
}

impl Deref for CubicCurve {
    type Target = [Vec3; 4];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl DerefMut for CubicCurve {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.points
    }
}

impl CubicCurve {
    pub fn new(points: [Vec3; 4]) -> Self {
        Self { points }
    }

    pub fn get_point(&self, t: f32) -> Vec3 {
        self.points
            .iter()
            .zip(bernstein(t))
            .fold(Vec3::ZERO, |acc, (&p, w)| acc + p * w)
    }

    /// First derivative with respect to `t`.
    pub fn tangent(&self, t: f32) -> Vec3 {
        let [a, b, c, d] = self.points;
        let [w0, w1, w2] = bernstein_quadratic(t);
        3. * ((b - a) * w0 + (c - b) * w1 + (d - c) * w2)
    }
}
