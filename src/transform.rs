use glam::{Mat3, Mat4, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Units per second.
    pub velocity: Vec3,
    /// Rotation axis scaled by the angular speed in radians per second.
    pub angular_velocity: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn translation(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: Vec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Transforms object-space normals to world space. The result is not normalized.
    ///
    /// Scale components are clamped away from zero, so a surface flattened along an axis
    /// gets normals along that axis instead of NaN.
    pub fn normal_matrix(&self) -> Mat3 {
        let inverse_scale =
            self.scale.signum() * self.scale.abs().max(Vec3::splat(f32::EPSILON)).recip();
        Mat3::from_quat(self.rotation) * Mat3::from_diagonal(inverse_scale)
    }

    /// Integrates both velocities over `dt` seconds. The rotation is renormalized every
    /// step so it cannot drift away from unit length.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.);
        self.position += self.velocity * dt;
        let speed = self.angular_velocity.length();
        if speed > 0. {
            let step = Quat::from_axis_angle(self.angular_velocity / speed, speed * dt);
            self.rotation = step * self.rotation;
        }
        self.rotation = self.rotation.normalize();
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::{vec3, Mat3, Quat, Vec3};
    use test_log::test;

    use super::Transform;

    #[test]
    fn quarter_turn_about_y() {
        let mut transform = Transform::default().with_angular_velocity(Vec3::Y * FRAC_PI_2);
        for _ in 0..60 {
            transform.update(1. / 60.);
        }
        assert!((transform.rotation * Vec3::X).abs_diff_eq(-Vec3::Z, 1e-4));
    }

    #[test]
    fn orientation_does_not_drift() {
        let mut transform =
            Transform::default().with_angular_velocity(vec3(0.6, 2.0, 0.4));
        for _ in 0..10_000 {
            transform.update(1. / 60.);
        }
        assert!((transform.rotation.length() - 1.).abs() < 1e-3);
    }

    #[test]
    fn idle_transform_is_stable() {
        let mut transform = Transform::translation(vec3(0., -1.5, 0.));
        transform.update(0.5);
        transform.update(-1.);
        assert_eq!(transform.position, vec3(0., -1.5, 0.));
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn velocity_moves_position() {
        let mut transform = Transform::default();
        transform.velocity = Vec3::X;
        transform.update(0.25);
        assert!(transform.position.abs_diff_eq(vec3(0.25, 0., 0.), 1e-6));
    }

    #[test]
    fn model_matrix_composes_scale_rotation_translation() {
        let transform = Transform {
            rotation: Quat::from_rotation_y(FRAC_PI_2),
            ..Transform::translation(Vec3::Y)
        }
        .with_scale(Vec3::splat(2.));
        let p = transform.matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(vec3(0., 1., -2.), 1e-5));
    }

    #[test]
    fn normal_matrix_is_inverse_transpose() {
        let transform = Transform {
            rotation: Quat::from_rotation_y(FRAC_PI_2),
            ..Default::default()
        }
        .with_scale(vec3(2., 1., 3.));
        let expected = Mat3::from_mat4(transform.matrix()).inverse().transpose();
        assert!(transform.normal_matrix().abs_diff_eq(expected, 1e-5));

        let stretched = Transform::default().with_scale(vec3(2., 1., 1.));
        let normal = stretched.normal_matrix() * vec3(1., 1., 0.);
        assert!(normal.abs_diff_eq(vec3(0.5, 1., 0.), 1e-6));
    }

    #[test]
    fn flattened_scale_keeps_normals_finite() {
        let transform = Transform::default().with_scale(vec3(1., 0., 1.));
        let normal_matrix = transform.normal_matrix();
        assert!(normal_matrix.is_finite());
        for normal in [vec3(0.3, 0.5, 0.2), vec3(-0.6, 0.1, 0.8)] {
            let world = (normal_matrix * normal).normalize();
            assert!(world.is_finite());
            assert!(world.abs_diff_eq(Vec3::Y, 1e-4), "{}", world);
        }
    }
}
