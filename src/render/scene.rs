use compact_str::CompactString;
use vello::kurbo::{self, Affine, Stroke};
use vello::peniko::Fill;
use vello::Scene;

use super::colors::AppColor;
use super::RectSink;
use crate::layout::Rect;

/// Outline styling for painted tiles.
#[derive(Debug, Clone, Copy)]
pub struct SceneConfig {
    pub edge_color: AppColor,
    /// Outline width in pixels; 0 disables outlines.
    pub edge_width: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            edge_color: AppColor::BLACK,
            edge_width: 2.0,
        }
    }
}

/// Where a tile's label should be centered, in pixel space.
/// Text shaping is left to the caller's text renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAnchor {
    pub text: CompactString,
    pub center: (f64, f64),
    /// Pixel bounds of the owning tile [x0, y0, x1, y1].
    pub bounds: [f64; 4],
}

/// Paints tiles into a Vello scene, mapping layout coordinates onto a viewport.
pub struct SceneSink<'a> {
    scene: &'a mut Scene,
    /// Layout space covered by the viewport (usually the unit square).
    source: Rect,
    viewport: Rect,
    config: SceneConfig,
    labels: Vec<LabelAnchor>,
}

impl<'a> SceneSink<'a> {
    pub fn new(scene: &'a mut Scene, source: Rect, viewport: Rect, config: SceneConfig) -> Self {
        Self {
            scene,
            source,
            viewport,
            config,
            labels: Vec::new(),
        }
    }

    /// Labels collected so far, in drawing order.
    pub fn labels(&self) -> &[LabelAnchor] {
        &self.labels
    }

    pub fn into_labels(self) -> Vec<LabelAnchor> {
        self.labels
    }

    /// Map a layout rect into viewport pixels.
    pub fn to_pixels(&self, rect: Rect) -> kurbo::Rect {
        let sx = if self.source.w > 0.0 { self.viewport.w / self.source.w } else { 0.0 };
        let sy = if self.source.h > 0.0 { self.viewport.h / self.source.h } else { 0.0 };
        let x0 = self.viewport.x + (rect.x - self.source.x) * sx;
        let y0 = self.viewport.y + (rect.y - self.source.y) * sy;
        kurbo::Rect::new(x0, y0, x0 + rect.w * sx, y0 + rect.h * sy)
    }
}

impl RectSink for SceneSink<'_> {
    fn draw_rect(&mut self, rect: Rect, color: AppColor, label: Option<&str>) {
        let shape = self.to_pixels(rect);
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, color.to_peniko(), None, &shape);

        if self.config.edge_width > 0.0 {
            self.scene.stroke(
                &Stroke::new(self.config.edge_width),
                Affine::IDENTITY,
                self.config.edge_color.to_peniko(),
                None,
                &shape,
            );
        }

        if let Some(text) = label {
            self.labels.push(LabelAnchor {
                text: CompactString::new(text),
                center: (shape.center().x, shape.center().y),
                bounds: [shape.x0, shape.y0, shape.x1, shape.y1],
            });
        }
    }
}
