use thiserror::Error;

/// The first invariant violation a tree's `check` ran into. Trees only produce these when the
/// implementation is broken, so treat one as a bug rather than something to recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantError<K> {
    /// A key fell outside the open interval its ancestors allow.
    #[error("key {key:?} is out of order with respect to its ancestors")]
    OutOfOrder {
        /// The misplaced key.
        key: K,
    },
    /// An AVL node caches a height that doesn't match its subtrees.
    #[error("node {key:?} stores height {stored} but its subtrees give {computed}")]
    HeightMismatch {
        /// Key of the offending node.
        key: K,
        /// The cached height.
        stored: isize,
        /// The height recomputed from the children.
        computed: isize,
    },
    /// An AVL node whose subtrees differ in height by more than one.
    #[error("node {key:?} is unbalanced: left height {left}, right height {right}")]
    Unbalanced {
        /// Key of the offending node.
        key: K,
        /// Height of the left subtree.
        left: isize,
        /// Height of the right subtree.
        right: isize,
    },
    /// The root of a red-black tree is red.
    #[error("root {key:?} is red")]
    RedRoot {
        /// Key stored at the root.
        key: K,
    },
    /// A red link leans right.
    #[error("node {key:?} has a red right child")]
    RedRightLink {
        /// Key of the parent of the red right child.
        key: K,
    },
    /// A red node with a red child.
    #[error("red node {key:?} has a red child")]
    ConsecutiveReds {
        /// Key of the red parent.
        key: K,
    },
    /// Paths below a node pass through different numbers of black links.
    #[error("node {key:?} has black-height {left} on the left but {right} on the right")]
    BlackHeightMismatch {
        /// Key of the node whose subtrees disagree.
        key: K,
        /// Black-height of the left subtree.
        left: usize,
        /// Black-height of the right subtree.
        right: usize,
    },
}
