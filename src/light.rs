use glam::{vec3, Vec3};

/// Point light used by the diffuse shading pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightConfig {
    pub color: Vec3,
    pub power: f32,
    pub position: Vec3,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            power: 20.,
            position: vec3(1., 4., 3.),
        }
    }
}

impl LightConfig {
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_power(mut self, power: f32) -> Self {
        self.power = power;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Lambertian term `clamp(N·L, 0, 1) · color · power / distance²` for a surface point
    /// in world space. `normal` must be unit length.
    pub fn diffuse(&self, point: Vec3, normal: Vec3) -> Vec3 {
        let to_light = self.position - point;
        let distance_sq = to_light.length_squared();
        if distance_sq <= f32::EPSILON {
            return self.color * self.power;
        }
        let cos = normal.dot(to_light / distance_sq.sqrt()).clamp(0., 1.);
        self.color * (cos * self.power / distance_sq)
    }
}

/// Per-surface shading parameters, shared by every patch of a [`SplineSurface`](crate::spline::SplineSurface).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Shading {
    pub color: Vec3,
}

impl Default for Shading {
    fn default() -> Self {
        Self {
            color: vec3(0.9, 0.85, 0.8),
        }
    }
}

impl Shading {
    /// Final color of a fragment lit by `light`.
    pub fn shade(&self, light: &LightConfig, point: Vec3, normal: Vec3) -> Vec3 {
        self.color * light.diffuse(point, normal)
    }
}

/// std140 layout of [`LightConfig`] for a uniform buffer.
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C, packed)]
pub struct GpuLight {
    position: Vec3,
    power: f32,
    color: Vec3,
    __pad0: u32,
}

impl From<LightConfig> for GpuLight {
    fn from(l: LightConfig) -> Self {
        Self {
            position: l.position,
            power: l.power,
            color: l.color,
            __pad0: 0,
        }
    }
}

impl From<GpuLight> for LightConfig {
    fn from(light: GpuLight) -> Self {
        Self {
            color: light.color,
            power: light.power,
            position: light.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Vec3};
    use test_log::test;

    use super::{GpuLight, LightConfig};

    #[test]
    fn inverse_square_falloff() {
        let light = LightConfig::default()
            .with_position(vec3(0., 2., 0.))
            .with_power(4.);
        let lit = light.diffuse(Vec3::ZERO, Vec3::Y);
        assert!(lit.abs_diff_eq(Vec3::ONE, 1e-6));
        let far = light.with_position(vec3(0., 4., 0.)).diffuse(Vec3::ZERO, Vec3::Y);
        assert!(far.abs_diff_eq(Vec3::splat(0.25), 1e-6));
    }

    #[test]
    fn cosine_law() {
        let light = LightConfig::default()
            .with_position(vec3(1., 1., 0.))
            .with_power(2.)
            .with_color(vec3(1., 0.5, 0.));
        let lit = light.diffuse(Vec3::ZERO, Vec3::Y);
        let expected = std::f32::consts::FRAC_1_SQRT_2;
        assert!(lit.abs_diff_eq(vec3(expected, expected / 2., 0.), 1e-5));
    }

    #[test]
    fn facing_away_is_dark() {
        let light = LightConfig::default().with_position(Vec3::Y);
        assert_eq!(light.diffuse(Vec3::ZERO, -Vec3::Y), Vec3::ZERO);
    }

    #[test]
    fn gpu_layout() {
        assert_eq!(std::mem::size_of::<GpuLight>(), 32);
        let light = LightConfig::default().with_power(7.);
        assert_eq!(LightConfig::from(GpuLight::from(light)), light);
    }
}
