// Public library interface for treemap-rs
// The debug-layout CLI tool drives the same modules

pub mod error;
pub mod layout;
pub mod render;
pub mod tree;

pub use error::{Result, TreemapError};
pub use layout::{compute_layout, Layout, LayoutRect, Rect};
pub use render::{ColorSettings, RectSink, Tile, TreeMap};
pub use tree::{build_tree_from_nested, parse_nested, Container, Leaf, Nested, Node};
