pub mod aggregate;
pub mod container;
pub mod leaf;
mod parse;

use std::fmt;
use std::str::FromStr;

pub use container::Container;
pub use leaf::Leaf;
pub use parse::{parse_nested, MAX_NESTING};

use crate::error::TreemapError;

/// A treemap node: either a weighted leaf or a container of further nodes.
///
/// Every node answers the same size queries; the layout engine matches on the
/// variant to decide whether to emit a rectangle or subdivide.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Leaf),
    Container(Container),
}

impl Node {
    /// Aggregate size: the leaf's own size, or the container's cached sum.
    pub fn size(&self) -> f64 {
        match self {
            Node::Leaf(leaf) => leaf.size(),
            Node::Container(container) => container.size(),
        }
    }

    /// Largest leaf size in this subtree (0.0 for a subtree with no leaves).
    /// Walks every descendant; not cached.
    pub fn max_size(&self) -> f64 {
        match self {
            Node::Leaf(leaf) => leaf.size(),
            Node::Container(container) => container.max_size(),
        }
    }

    /// Smallest leaf size in this subtree (+inf for a subtree with no leaves).
    /// Walks every descendant; not cached.
    pub fn min_size(&self) -> f64 {
        match self {
            Node::Leaf(leaf) => leaf.size(),
            Node::Container(container) => container.min_size(),
        }
    }

    /// Structural children. Leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Container(container) => container.children(),
        }
    }

    /// Display label of a leaf. Containers carry no label.
    pub fn label(&self) -> Option<&str> {
        match self {
            Node::Leaf(leaf) => leaf.label(),
            Node::Container(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Container(_) => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Container(_) => None,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Node::Container(container) => Some(container),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Node::Container(container) => Some(container),
            Node::Leaf(_) => None,
        }
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Container(container) => container.children().iter().map(Node::leaf_count).sum(),
        }
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(leaf)
    }
}

impl From<Container> for Node {
    fn from(container: Container) -> Self {
        Node::Container(container)
    }
}

/// Leaves print as their size, containers as `(a, b, ...)`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(leaf) => write!(f, "{}", leaf.size()),
            Node::Container(container) => fmt::Display::fmt(container, f),
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, child) in self.children().iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", child)?;
        }
        f.write_str(")")
    }
}

impl FromStr for Node {
    type Err = TreemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_nested(s)
    }
}

/// Input to [`build_tree_from_nested`]: a leaf, or a sequence treated as a sub-tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested {
    Leaf(Leaf),
    Seq(Vec<Nested>),
}

impl From<Leaf> for Nested {
    fn from(leaf: Leaf) -> Self {
        Nested::Leaf(leaf)
    }
}

impl From<Vec<Nested>> for Nested {
    fn from(items: Vec<Nested>) -> Self {
        Nested::Seq(items)
    }
}

/// Build a container whose structure mirrors the nesting of `data`.
///
/// Every sequence becomes a container (appended in order, so aggregates are
/// exact on return); leaves are moved in as-is.
pub fn build_tree_from_nested<I>(data: I) -> Container
where
    I: IntoIterator<Item = Nested>,
{
    let mut directory = Container::default();
    for item in data {
        let node = match item {
            Nested::Leaf(leaf) => Node::Leaf(leaf),
            Nested::Seq(items) => Node::Container(build_tree_from_nested(items)),
        };
        directory.add_child(node);
    }
    directory
}
