use super::Node;

/// A non-leaf node: an ordered list of owned children plus a cached aggregate.
///
/// The cached size is refreshed on construction, on every `add_child` /
/// `add_children`, and on `recalculate_size`. Mutating a descendant leaf through
/// `children_mut` does NOT update it; call `recalculate_size` on every ancestor,
/// bottom-up, or use [`crate::tree::aggregate::recalculate_all`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    children: Vec<Node>,
    size: f64,
}

impl Container {
    /// Build a container, summing the children's current sizes once.
    pub fn new(children: Vec<Node>) -> Self {
        let size = children.iter().map(Node::size).sum();
        Self { children, size }
    }

    /// Cached aggregate size as of the last construction, add or recalculation.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a child and grow the cached aggregate by its size.
    pub fn add_child(&mut self, child: impl Into<Node>) {
        let child = child.into();
        self.size += child.size();
        self.children.push(child);
    }

    pub fn add_children<I>(&mut self, children: I)
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        let children = children.into_iter();
        self.children.reserve(children.size_hint().0);
        for child in children {
            self.add_child(child);
        }
    }

    /// Sum of the direct children's sizes, trusting their own caches.
    pub fn children_sum(&self) -> f64 {
        self.children.iter().map(Node::size).sum()
    }

    /// Recompute the cached aggregate from the direct children (depth one).
    pub fn recalculate_size(&mut self) -> f64 {
        self.size = self.children_sum();
        self.size
    }

    /// Largest leaf size below this container, or 0.0 when there are no leaves.
    pub fn max_size(&self) -> f64 {
        self.children
            .iter()
            .map(Node::max_size)
            .fold(0.0, f64::max)
    }

    /// Smallest leaf size below this container, or +inf when there are no leaves.
    pub fn min_size(&self) -> f64 {
        self.children
            .iter()
            .map(Node::min_size)
            .fold(f64::INFINITY, f64::min)
    }
}
