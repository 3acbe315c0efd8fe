mod slice_dice;

pub use slice_dice::{compute_layout, layout_with, place_child, Layout, LayoutRect, Rect};
