use super::{Container, Node};
use crate::error::{Result, TreemapError};

/// Relative tolerance when comparing a cached aggregate with a fresh sum.
const STALE_EPSILON: f64 = 1e-9;

/// Recompute aggregated sizes for every container in the subtree (bottom-up).
/// After this, each container's size equals the sum of all descendant leaf sizes.
/// Returns the root's aggregate.
pub fn recalculate_all(node: &mut Node) -> f64 {
    let size = repair(node);
    tracing::debug!("Recalculated subtree aggregate: {}", size);
    size
}

/// Same as [`recalculate_all`] for a container held directly.
pub fn recalculate_container(container: &mut Container) -> f64 {
    let size = repair_container(container);
    tracing::debug!("Recalculated container aggregate: {}", size);
    size
}

fn repair(node: &mut Node) -> f64 {
    match node {
        Node::Leaf(leaf) => leaf.size(),
        Node::Container(container) => repair_container(container),
    }
}

fn repair_container(container: &mut Container) -> f64 {
    // Children first so the depth-one recalculation sees fresh caches.
    for child in container.children_mut() {
        repair(child);
    }
    container.recalculate_size()
}

/// Check a single container's cache against its direct children (depth one).
pub fn check_container(container: &Container) -> Result<()> {
    let cached = container.size();
    let actual = container.children_sum();
    let scale = cached.abs().max(actual.abs()).max(1.0);
    if (cached - actual).abs() > STALE_EPSILON * scale {
        return Err(TreemapError::StaleAggregate { cached, actual });
    }
    Ok(())
}

/// Find the first container (pre-order) whose cached aggregate is stale.
///
/// Only direct-children sums are compared, so a container whose children are
/// themselves stale but internally consistent with it is not reported until the
/// deeper stale container is.
pub fn find_stale(node: &Node) -> Result<()> {
    if let Node::Container(container) = node {
        check_container(container)?;
        for child in container.children() {
            find_stale(child)?;
        }
    }
    Ok(())
}
