use super::{NodeId, Scene, SortKey};

/// A node together with its paint-order key.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OrderEntry {
    pub key: SortKey,
    pub node: NodeId,
}

/// Paint order of the attached tree for one frame.
///
/// Performance characteristics:
/// - `rebuild()` is a single pre-order walk plus a sort
/// - the entry buffer is reused across frames; no per-frame allocation once warmed
///
/// Every attached node is listed, including invisible and non-interactive
/// ones; callers filter on the flags they care about.
#[derive(Debug, Default)]
pub struct PaintOrder {
    entries: Vec<OrderEntry>,
}

impl PaintOrder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-collects the nodes reachable from the scene root. Keeps allocated
    /// capacity for reuse.
    pub fn rebuild(&mut self, scene: &Scene) {
        self.entries.clear();
        let mut order = 0u32;
        scene.traverse(scene.root(), |id, node| {
            self.entries.push(OrderEntry {
                key: SortKey::new(node.level(), node.layer, order),
                node: id,
            });
            order = order.wrapping_add(1);
        });
        // `order` is unique, so the sort is total.
        self.entries.sort_unstable_by(|a, b| a.key.cmp(&b.key));
    }

    #[inline]
    pub fn entries(&self) -> &[OrderEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Back-to-front: the order nodes are painted in.
    pub fn back_to_front(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|e| e.node)
    }

    /// Front-to-back: the order nodes are hit-tested in.
    pub fn front_to_back(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().rev().map(|e| e.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Object2D;

    #[test]
    fn deeper_nodes_paint_later() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add(root, Object2D::new()).unwrap();
        let a1 = scene.add(a, Object2D::new()).unwrap();
        let b = scene.add(root, Object2D::new()).unwrap();

        let mut order = PaintOrder::new();
        order.rebuild(&scene);
        let painted: Vec<_> = order.back_to_front().collect();
        assert_eq!(painted, vec![root, a, b, a1]);
        assert_eq!(order.front_to_back().next(), Some(a1));
    }

    #[test]
    fn layer_orders_siblings() {
        let mut scene = Scene::new();
        let root = scene.root();
        let top = scene.add(root, Object2D::new().with_layer(5)).unwrap();
        let bottom = scene.add(root, Object2D::new()).unwrap();

        let mut order = PaintOrder::new();
        order.rebuild(&scene);
        let painted: Vec<_> = order.back_to_front().collect();
        assert_eq!(painted, vec![root, bottom, top]);
    }

    #[test]
    fn detached_nodes_are_not_listed() {
        let mut scene = Scene::new();
        let loose = scene.insert(Object2D::new());
        let mut order = PaintOrder::new();
        order.rebuild(&scene);
        assert_eq!(order.len(), 1);
        assert!(order.back_to_front().all(|id| id != loose));
    }
}
