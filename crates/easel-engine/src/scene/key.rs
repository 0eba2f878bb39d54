use core::cmp::Ordering;

/// Stable paint-order key for scene nodes.
///
/// Ordering rules:
/// 1) `level`: ascending (deeper nodes paint later, on top)
/// 2) `layer`: ascending (lower layers are beneath)
/// 3) `order`: ascending pre-order index, so later siblings cover earlier ones
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    pub level: u32,
    pub layer: i32,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(level: u32, layer: i32, order: u32) -> Self {
        Self { level, layer, order }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.level
            .cmp(&other.level)
            .then(self.layer.cmp(&other.layer))
            .then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
