use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vello::peniko::Color;

/// Our custom color representation for easy manipulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl AppColor {
    pub const BLACK: AppColor = AppColor::new(0.0, 0.0, 0.0);
    pub const WHITE: AppColor = AppColor::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Convert to vello's peniko Color (AlphaColor<Srgb>).
    pub fn to_peniko(self) -> Color {
        Color::new([self.r, self.g, self.b, self.a])
    }

    /// Linear interpolation between two colors, `t` clamped to [0, 1].
    pub fn lerp(self, other: AppColor, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Source of fallback colors for leaves with neither a scale nor an explicit color.
///
/// Seeded generators replay the same sequence; `from_entropy` does not.
#[derive(Debug, Clone)]
pub struct RandomColors {
    rng: StdRng,
}

impl RandomColors {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Independent uniform red, green and blue channels, fully opaque.
    pub fn next_color(&mut self) -> AppColor {
        AppColor::new(self.rng.random(), self.rng.random(), self.rng.random())
    }
}
