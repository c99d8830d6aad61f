//! Phong lighting parameters: two point lights plus global terms.

use std::fmt;

use crate::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub diffuse: f32,
    pub specular: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub shine: f32,
    pub ambient: f32,
    pub lights: [PointLight; 2],
}

impl Lighting {
    pub const SHINE_RANGE: (f32, f32) = (0.0, 15.0);
    pub const AMBIENT_RANGE: (f32, f32) = (0.0, 10.0);
    pub const PRODUCT_RANGE: (f32, f32) = (0.0, 10.0);
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            shine: 1.8,
            ambient: 0.13,
            lights: [
                PointLight {
                    position: Vec3::new(0.0, 7.0, 0.0),
                    color: Vec3::new(0.5, 0.5, 0.1),
                    diffuse: 2.6,
                    specular: 8.0,
                },
                PointLight {
                    position: Vec3::new(7.0, 0.0, 0.0),
                    color: Vec3::new(0.1, 0.1, 0.5),
                    diffuse: 2.6,
                    specular: 8.0,
                },
            ],
        }
    }
}

impl fmt::Display for Lighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lighting configuration")?;
        writeln!(f, "  Global: shine={} ambient={}", self.shine, self.ambient)?;
        for (i, light) in self.lights.iter().enumerate() {
            write!(
                f,
                "  Light {}: color=({}, {}, {}) diffuse={} specular={}",
                i + 1,
                light.color.x,
                light.color.y,
                light.color.z,
                light.diffuse,
                light.specular
            )?;
            if i + 1 < self.lights.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
