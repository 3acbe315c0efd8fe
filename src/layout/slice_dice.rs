use compact_str::CompactString;

use crate::tree::aggregate;
use crate::tree::{Container, Leaf, Node};

/// An axis-aligned rectangle: origin `(x, y)` and extent `(w, h)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// The unit square at the origin, the default drawing surface.
    pub const UNIT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 1.0,
        h: 1.0,
    };

    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Taller than wide: children are stacked top to bottom.
    pub fn is_tall(&self) -> bool {
        self.h > self.w
    }
}

/// A positioned leaf in the treemap layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRect {
    pub rect: Rect,
    /// The leaf's size at layout time.
    pub size: f64,
    pub label: Option<CompactString>,
    /// Nesting depth of the leaf (a leaf at the root has depth 0).
    pub depth: u16,
}

/// The full layout result: one rect per leaf, in depth-first child order.
#[derive(Debug, Default)]
pub struct Layout {
    pub rects: Vec<LayoutRect>,
}

impl Layout {
    pub fn total_area(&self) -> f64 {
        self.rects.iter().map(|r| r.rect.area()).sum()
    }
}

/// Compute the slice-and-dice layout of `root` inside `bounds`.
pub fn compute_layout(root: &Node, bounds: Rect) -> Layout {
    let mut rects = Vec::with_capacity(root.leaf_count());
    layout_with(root, bounds, |leaf, rect, depth| {
        rects.push(LayoutRect {
            rect,
            size: leaf.size(),
            label: leaf.label().map(CompactString::new),
            depth,
        });
    });
    tracing::debug!(
        "Layout computed: {} leaf rects in {:.3}x{:.3} at ({:.3}, {:.3})",
        rects.len(),
        bounds.w,
        bounds.h,
        bounds.x,
        bounds.y
    );
    Layout { rects }
}

/// Walk the layout depth-first, calling `emit(leaf, rect, depth)` once per leaf.
///
/// A leaf at the root receives `bounds` unchanged. Empty containers emit nothing.
pub fn layout_with<F>(root: &Node, bounds: Rect, mut emit: F)
where
    F: FnMut(&Leaf, Rect, u16),
{
    layout_node(root, bounds, 0, &mut emit);
}

fn layout_node<F>(node: &Node, rect: Rect, depth: u16, emit: &mut F)
where
    F: FnMut(&Leaf, Rect, u16),
{
    match node {
        Node::Leaf(leaf) => emit(leaf, rect, depth),
        Node::Container(container) => layout_children(container, rect, depth, emit),
    }
}

/// Partition `bounds` among the container's children in stored order.
fn layout_children<F>(container: &Container, bounds: Rect, depth: u16, emit: &mut F)
where
    F: FnMut(&Leaf, Rect, u16),
{
    if container.is_empty() {
        return;
    }

    if cfg!(debug_assertions) {
        if let Err(err) = aggregate::check_container(container) {
            tracing::warn!("Laying out container at depth {}: {}", depth, err);
        }
    }

    // A zero-weight container gives every child a zero share instead of dividing by 0.
    let total = container.size().max(1.0);

    let mut cursor = (bounds.x, bounds.y);
    for child in container.children() {
        let (child_rect, next) = place_child(bounds, cursor, child.size() / total);
        layout_node(child, child_rect, depth + 1, emit);
        cursor = next;
    }
}

/// Place one child covering `share` of `bounds`' area with its origin at `cursor`.
///
/// Tall bounds are sliced horizontally (full width, advance y); otherwise
/// vertically (full height, advance x). Returns the child's rect and the
/// cursor for the next sibling. A zero extent on the cut axis yields a
/// zero-sized child rather than NaN.
pub fn place_child(bounds: Rect, cursor: (f64, f64), share: f64) -> (Rect, (f64, f64)) {
    let area = bounds.area() * share;
    let (x, y) = cursor;
    if bounds.is_tall() {
        let w = bounds.w;
        let h = if w > 0.0 { area / w } else { 0.0 };
        (Rect::new(x, y, w, h), (x, y + h))
    } else {
        let h = bounds.h;
        let w = if h > 0.0 { area / h } else { 0.0 };
        (Rect::new(x, y, w, h), (x + w, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{aggregate, build_tree_from_nested, Nested};

    const EPS: f64 = 1e-9;

    fn leaf(size: f64) -> Node {
        Node::Leaf(Leaf::new(size).unwrap())
    }

    fn assert_rect(actual: Rect, expected: Rect) {
        assert!(
            (actual.x - expected.x).abs() < EPS
                && (actual.y - expected.y).abs() < EPS
                && (actual.w - expected.w).abs() < EPS
                && (actual.h - expected.h).abs() < EPS,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn square_bounds_slice_vertically() {
        let root = Node::Container(Container::new(vec![leaf(1.0), leaf(2.0), leaf(3.0)]));
        let layout = compute_layout(&root, Rect::UNIT);

        assert_eq!(layout.rects.len(), 3);
        assert_rect(layout.rects[0].rect, Rect::new(0.0, 0.0, 1.0 / 6.0, 1.0));
        assert_rect(layout.rects[1].rect, Rect::new(1.0 / 6.0, 0.0, 2.0 / 6.0, 1.0));
        assert_rect(layout.rects[2].rect, Rect::new(3.0 / 6.0, 0.0, 3.0 / 6.0, 1.0));
        assert_eq!(layout.rects[2].size, 3.0);
        assert_eq!(layout.rects[2].depth, 1);
    }

    #[test]
    fn tall_bounds_slice_horizontally() {
        let root = Node::Container(Container::new(vec![leaf(1.0), leaf(3.0)]));
        let layout = compute_layout(&root, Rect::new(0.0, 0.0, 1.0, 2.0));

        assert_rect(layout.rects[0].rect, Rect::new(0.0, 0.0, 1.0, 0.5));
        assert_rect(layout.rects[1].rect, Rect::new(0.0, 0.5, 1.0, 1.5));
    }

    #[test]
    fn nested_containers_alternate_orientation() {
        // Root is square -> vertical strips; the right strip is tall -> stacked.
        let root = Node::Container(Container::new(vec![
            leaf(2.0),
            Node::Container(Container::new(vec![leaf(1.0), leaf(1.0)])),
        ]));
        let layout = compute_layout(&root, Rect::UNIT);

        assert_rect(layout.rects[0].rect, Rect::new(0.0, 0.0, 0.5, 1.0));
        assert_rect(layout.rects[1].rect, Rect::new(0.5, 0.0, 0.5, 0.5));
        assert_rect(layout.rects[2].rect, Rect::new(0.5, 0.5, 0.5, 0.5));
        assert_eq!(layout.rects[1].depth, 2);
    }

    #[test]
    fn leaf_at_root_fills_bounds() {
        let root = leaf(7.0);
        let bounds = Rect::new(10.0, 20.0, 300.0, 200.0);
        let layout = compute_layout(&root, bounds);
        assert_eq!(layout.rects.len(), 1);
        assert_eq!(layout.rects[0].rect, bounds);
        assert_eq!(layout.rects[0].depth, 0);
    }

    #[test]
    fn empty_container_emits_nothing() {
        let root = Node::Container(Container::new(vec![
            leaf(1.0),
            Node::Container(Container::default()),
        ]));
        let layout = compute_layout(&root, Rect::UNIT);
        assert_eq!(layout.rects.len(), 1);
        assert_rect(layout.rects[0].rect, Rect::UNIT);
    }

    #[test]
    fn zero_weight_container_degenerates_to_zero_area() {
        let root = Node::Container(Container::new(vec![leaf(0.0), leaf(0.0)]));
        let layout = compute_layout(&root, Rect::UNIT);
        assert_eq!(layout.rects.len(), 2);
        for r in &layout.rects {
            assert_eq!(r.rect.area(), 0.0);
            assert!(r.rect.w.is_finite() && r.rect.h.is_finite());
        }
    }

    #[test]
    fn zero_width_bounds_do_not_produce_nan() {
        let root = Node::Container(Container::new(vec![
            leaf(0.0),
            Node::Container(Container::new(vec![leaf(0.0), leaf(0.0)])),
            leaf(1.0),
        ]));
        let layout = compute_layout(&root, Rect::UNIT);
        for r in &layout.rects {
            assert!(!r.rect.x.is_nan() && !r.rect.w.is_nan() && !r.rect.h.is_nan());
        }
    }

    #[test]
    fn fractional_total_below_one_uses_floor() {
        // Sizes summing below 1 are divided by 1, leaving part of the bounds empty.
        let root = Node::Container(Container::new(vec![leaf(0.25), leaf(0.25)]));
        let layout = compute_layout(&root, Rect::UNIT);
        assert!((layout.total_area() - 0.5).abs() < EPS);
    }

    #[test]
    fn area_is_conserved_for_nested_tree() {
        let leaf_n = |s: f64| Nested::Leaf(Leaf::new(s).unwrap());
        let tree = build_tree_from_nested(vec![
            leaf_n(1.0),
            Nested::Seq(vec![
                leaf_n(2.0),
                leaf_n(3.0),
                Nested::Seq(vec![leaf_n(4.0), leaf_n(5.0)]),
                leaf_n(5.0),
            ]),
        ]);
        let bounds = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        let layout = compute_layout(&Node::Container(tree), bounds);

        assert_eq!(layout.rects.len(), 6);
        assert!((layout.total_area() - bounds.area()).abs() < 1e-6);
        for r in &layout.rects {
            let expected = bounds.area() * r.size / 20.0;
            assert!((r.rect.area() - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn recalculated_tree_conserves_area_after_mutation() {
        let mut root = Node::Container(Container::new(vec![
            leaf(1.0),
            Node::Container(Container::new(vec![leaf(2.0), leaf(3.0)])),
        ]));

        let inner = root.as_container_mut().unwrap().children_mut()[1]
            .as_container_mut()
            .unwrap();
        inner.children_mut()[0]
            .as_leaf_mut()
            .unwrap()
            .set_size(10.0)
            .unwrap();
        // Bottom-up: inner container, then the root.
        inner.recalculate_size();
        root.as_container_mut().unwrap().recalculate_size();

        let layout = compute_layout(&root, Rect::UNIT);
        assert!((layout.total_area() - 1.0).abs() < EPS);
        assert_eq!(aggregate::find_stale(&root), Ok(()));
    }

    #[test]
    fn stale_tree_overflows_until_recalculated() {
        let mut root = Node::Container(Container::new(vec![leaf(1.0), leaf(1.0)]));
        root.as_container_mut().unwrap().children_mut()[0]
            .as_leaf_mut()
            .unwrap()
            .set_size(3.0)
            .unwrap();

        let stale = compute_layout(&root, Rect::UNIT);
        assert!((stale.total_area() - 2.0).abs() < EPS);

        aggregate::recalculate_all(&mut root);
        let fresh = compute_layout(&root, Rect::UNIT);
        assert!((fresh.total_area() - 1.0).abs() < EPS);
    }

    #[test]
    fn stale_inner_container_still_lays_out() {
        // Inner cache stays at 2 while its leaves now sum to 4.
        let mut root = Node::Container(Container::new(vec![
            leaf(2.0),
            Node::Container(Container::new(vec![leaf(1.0), leaf(1.0)])),
        ]));
        let inner = root.as_container_mut().unwrap().children_mut()[1]
            .as_container_mut()
            .unwrap();
        inner.children_mut()[0]
            .as_leaf_mut()
            .unwrap()
            .set_size(3.0)
            .unwrap();
        assert!(aggregate::check_container(inner).is_err());

        let layout = compute_layout(&root, Rect::UNIT);

        // Root is still consistent: halves split by the cached sizes 2 and 2.
        assert_eq!(layout.rects.len(), 3);
        assert_rect(layout.rects[0].rect, Rect::new(0.0, 0.0, 0.5, 1.0));
        // The tall right half is divided by the stale total 2, overflowing it.
        assert_rect(layout.rects[1].rect, Rect::new(0.5, 0.0, 0.5, 1.5));
        assert_rect(layout.rects[2].rect, Rect::new(0.5, 1.5, 0.5, 0.5));
        assert!((layout.total_area() - 1.5).abs() < EPS);
    }

    #[test]
    fn layout_with_reports_leaves_in_order() {
        let root = Node::Container(Container::new(vec![
            Node::Leaf(Leaf::with_attrs(1.0, Some("a"), None).unwrap()),
            Node::Leaf(Leaf::with_attrs(1.0, Some("b"), None).unwrap()),
        ]));
        let mut labels = Vec::new();
        layout_with(&root, Rect::UNIT, |leaf, _, _| {
            labels.push(leaf.label().unwrap_or_default().to_string());
        });
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn place_child_threads_cursor() {
        let bounds = Rect::new(0.0, 0.0, 4.0, 2.0);
        let (first, cursor) = place_child(bounds, (0.0, 0.0), 0.25);
        assert_rect(first, Rect::new(0.0, 0.0, 1.0, 2.0));
        assert_eq!(cursor, (1.0, 0.0));
        let (second, cursor) = place_child(bounds, cursor, 0.75);
        assert_rect(second, Rect::new(1.0, 0.0, 3.0, 2.0));
        assert_eq!(cursor, (4.0, 0.0));
    }
}
