pub mod colors;
pub mod scale;
pub mod scene;

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;

use crate::layout::{self, Rect};
use crate::tree::{aggregate, build_tree_from_nested, Leaf, Nested, Node};
use colors::{AppColor, RandomColors};
use scale::{ColorScale, Legend, Normalize};

/// Drawing primitive supplied by the renderer: one filled, outlined rectangle
/// per leaf, with optional centered label text.
pub trait RectSink {
    fn draw_rect(&mut self, rect: Rect, color: AppColor, label: Option<&str>);
}

impl<S: RectSink + ?Sized> RectSink for &mut S {
    fn draw_rect(&mut self, rect: Rect, color: AppColor, label: Option<&str>) {
        (**self).draw_rect(rect, color, label)
    }
}

/// A laid-out leaf with its resolved color.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub rect: Rect,
    pub size: f64,
    pub color: AppColor,
    pub label: Option<CompactString>,
    pub depth: u16,
}

/// How leaf colors are chosen.
#[derive(Clone, Default)]
pub struct ColorSettings {
    /// When set, every leaf is colored by its normalized size and explicit
    /// leaf colors are ignored.
    pub scale: Option<Arc<dyn ColorScale>>,
    /// Seed for fallback colors. `None` draws from OS entropy on every pass.
    pub seed: Option<u64>,
}

impl fmt::Debug for ColorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorSettings")
            .field("scale", &self.scale.as_ref().map(|_| "dyn ColorScale"))
            .field("seed", &self.seed)
            .finish()
    }
}

/// A tree plus the coloring policy used to hand its layout to a renderer.
#[derive(Debug)]
pub struct TreeMap {
    root: Node,
    settings: ColorSettings,
    norm: Option<Normalize>,
}

impl TreeMap {
    pub fn new(root: impl Into<Node>, settings: ColorSettings) -> Self {
        let mut map = Self {
            root: root.into(),
            settings,
            norm: None,
        };
        map.refresh_scale();
        map
    }

    pub fn from_nested<I>(data: I, settings: ColorSettings) -> Self
    where
        I: IntoIterator<Item = Nested>,
    {
        Self::new(build_tree_from_nested(data), settings)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Mutable access to the tree. Aggregates are not refreshed automatically;
    /// see [`TreeMap::recalculate`].
    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn settings(&self) -> &ColorSettings {
        &self.settings
    }

    /// Normalization range in use, present only while a scale is configured.
    pub fn norm(&self) -> Option<Normalize> {
        self.norm
    }

    /// Replace the color scale and re-derive its range from the current tree.
    pub fn set_scale(&mut self, scale: Option<Arc<dyn ColorScale>>) {
        self.settings.scale = scale;
        self.refresh_scale();
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.settings.seed = seed;
    }

    /// Re-derive the scale range from the tree's current leaf extremes.
    pub fn refresh_scale(&mut self) {
        self.norm = self
            .settings
            .scale
            .as_ref()
            .map(|_| Normalize::from_node(&self.root));
        if let Some(norm) = self.norm {
            tracing::debug!("Color scale range: [{}, {}]", norm.vmin, norm.vmax);
        }
    }

    /// Repair every cached aggregate bottom-up, then refresh the scale range.
    pub fn recalculate(&mut self) -> f64 {
        let size = aggregate::recalculate_all(&mut self.root);
        self.refresh_scale();
        size
    }

    /// Colorbar data for the configured scale.
    pub fn legend(&self, steps: usize) -> Option<Legend> {
        let scale = self.settings.scale.as_deref()?;
        let norm = self.norm?;
        Some(Legend::new(scale, norm, steps))
    }

    /// Layout over the unit square with resolved colors, in drawing order.
    pub fn tiles(&self) -> Vec<Tile> {
        self.tiles_in(Rect::UNIT)
    }

    pub fn tiles_in(&self, bounds: Rect) -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(self.root.leaf_count());
        self.for_each_tile(bounds, |tile| tiles.push(tile));
        tiles
    }

    /// Draw over the unit square.
    pub fn draw(&self, sink: &mut impl RectSink) {
        self.draw_in(Rect::UNIT, sink);
    }

    pub fn draw_in(&self, bounds: Rect, sink: &mut impl RectSink) {
        let mut drawn = 0usize;
        self.for_each_tile(bounds, |tile| {
            sink.draw_rect(tile.rect, tile.color, tile.label.as_deref());
            drawn += 1;
        });
        tracing::debug!("Drew {} tiles", drawn);
    }

    fn for_each_tile(&self, bounds: Rect, mut f: impl FnMut(Tile)) {
        let mut random = match self.settings.seed {
            Some(seed) => RandomColors::seeded(seed),
            None => RandomColors::from_entropy(),
        };
        layout::layout_with(&self.root, bounds, |leaf, rect, depth| {
            let color = self.resolve_color(leaf, &mut random);
            f(Tile {
                rect,
                size: leaf.size(),
                color,
                label: leaf.label().map(CompactString::new),
                depth,
            });
        });
    }

    /// Scale (if configured) beats the leaf's own color, which beats a random one.
    fn resolve_color(&self, leaf: &Leaf, random: &mut RandomColors) -> AppColor {
        if let (Some(scale), Some(norm)) = (&self.settings.scale, self.norm) {
            return scale.color_at(norm.apply(leaf.size()) as f32);
        }
        if let Some(color) = leaf.color() {
            return color;
        }
        random.next_color()
    }
}
