use crate::leaf::Leaf;
use crate::types::Depth;
use glam::Vec2;

/// One drawn line, from `a` to `b`.
///
/// A branch's segment is replaced wholesale on every update, never
/// mutated field by field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

/// One node of the recursive tree: a baseline segment, the leaves that
/// grew on it, and up to two children forked off its end.
///
/// Topology is fixed once built: leaf sets and child presence never
/// change afterwards; only `line` is rewritten by the update pass.
#[derive(Debug)]
pub struct Branch {
    pub line: Segment,
    pub leafs: Vec<Leaf>,
    pub left: Option<Box<Branch>>,
    pub right: Option<Box<Branch>>,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }
}

impl Branch {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            line: Segment::new(a, b),
            leafs: Vec::new(),
            left: None,
            right: None,
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.left.as_deref().map_or(0, Branch::node_count)
            + self.right.as_deref().map_or(0, Branch::node_count)
    }

    pub fn leaf_count(&self) -> usize {
        self.leafs.len()
            + self.left.as_deref().map_or(0, Branch::leaf_count)
            + self.right.as_deref().map_or(0, Branch::leaf_count)
    }

    /// Number of branch levels present, counting this one.
    pub fn height(&self) -> Depth {
        let left = self.left.as_deref().map_or(0, Branch::height);
        let right = self.right.as_deref().map_or(0, Branch::height);
        1 + left.max(right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_branch_is_bare() {
        let branch = Branch::new(Vec2::ZERO, Vec2::new(0.0, 5.0));
        assert!(branch.leafs.is_empty());
        assert!(branch.left.is_none());
        assert!(branch.right.is_none());
        assert_eq!(branch.node_count(), 1);
        assert_eq!(branch.height(), 1);
    }

    #[test]
    fn counts_cover_the_whole_structure() {
        let mut root = Branch::new(Vec2::ZERO, Vec2::new(0.0, 10.0));
        let mut left = Branch::new(Vec2::new(0.0, 10.0), Vec2::new(-4.0, 16.0));
        left.right = Some(Box::new(Branch::new(
            Vec2::new(-4.0, 16.0),
            Vec2::new(-6.0, 20.0),
        )));
        root.left = Some(Box::new(left));

        assert_eq!(root.node_count(), 3);
        assert_eq!(root.height(), 3);
        assert_eq!(root.leaf_count(), 0);
    }

    #[test]
    fn segment_length_is_euclidean() {
        let seg = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert_eq!(seg.length(), 5.0);
    }
}
