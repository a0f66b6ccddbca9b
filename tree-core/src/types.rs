/// Recursion depth of a branch in a [`crate::tree::Branch`] tree.
///
/// The root sits at depth `0` and every child is one level deeper. Depth
/// is never stored on the nodes; each recursive pass threads it as a
/// parameter instead.
pub type Depth = usize;
