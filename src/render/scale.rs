use super::colors::AppColor;
use crate::tree::Node;

/// Linear map from `[vmin, vmax]` onto `[0, 1]`. Values outside the range map
/// outside `[0, 1]`; scales clamp. A degenerate range maps everything to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalize {
    pub const fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Range spanning the smallest and largest leaf sizes under `node`.
    /// A tree without leaves gets the degenerate range `[0, 0]`.
    pub fn from_node(node: &Node) -> Self {
        let (min, max) = (node.min_size(), node.max_size());
        if min.is_finite() && min <= max {
            Self::new(min, max)
        } else {
            Self::new(0.0, 0.0)
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span <= 0.0 {
            0.0
        } else {
            (value - self.vmin) / span
        }
    }
}

/// Maps a normalized position in `[0, 1]` to a color.
pub trait ColorScale: Send + Sync {
    fn color_at(&self, t: f32) -> AppColor;
}

impl<F> ColorScale for F
where
    F: Fn(f32) -> AppColor + Send + Sync,
{
    fn color_at(&self, t: f32) -> AppColor {
        self(t)
    }
}

/// Piecewise-linear scale through evenly spaced stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<AppColor>,
}

impl Gradient {
    /// `None` when `stops` is empty.
    pub fn new(stops: Vec<AppColor>) -> Option<Self> {
        if stops.is_empty() {
            None
        } else {
            Some(Self { stops })
        }
    }

    pub fn grayscale() -> Self {
        Self {
            stops: vec![AppColor::BLACK, AppColor::WHITE],
        }
    }

    /// Five-stop approximation of the viridis colormap.
    pub fn viridis() -> Self {
        Self {
            stops: vec![
                AppColor::new(0.267, 0.005, 0.329),
                AppColor::new(0.230, 0.322, 0.546),
                AppColor::new(0.128, 0.567, 0.551),
                AppColor::new(0.369, 0.789, 0.383),
                AppColor::new(0.993, 0.906, 0.144),
            ],
        }
    }

    pub fn stops(&self) -> &[AppColor] {
        &self.stops
    }
}

impl ColorScale for Gradient {
    fn color_at(&self, t: f32) -> AppColor {
        let last = self.stops.len() - 1;
        if last == 0 {
            return self.stops[0];
        }
        let pos = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) } * last as f32;
        if pos >= last as f32 {
            return self.stops[last];
        }
        let i = pos.floor() as usize;
        self.stops[i].lerp(self.stops[i + 1], pos - i as f32)
    }
}

/// Data for an external colorbar: the value range and evenly sampled colors,
/// lowest value first.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub norm: Normalize,
    pub samples: Vec<(f64, AppColor)>,
}

impl Legend {
    /// Sample `scale` at `steps` evenly spaced values across `norm` (at least 2).
    pub fn new(scale: &dyn ColorScale, norm: Normalize, steps: usize) -> Self {
        let steps = steps.max(2);
        let samples = (0..steps)
            .map(|i| {
                let t = i as f64 / (steps - 1) as f64;
                let value = norm.vmin + (norm.vmax - norm.vmin) * t;
                (value, scale.color_at(t as f32))
            })
            .collect();
        Self { norm, samples }
    }
}
