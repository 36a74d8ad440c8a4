//! An AVL tree. Every node caches its height and, on the way back up from any insert or delete,
//! each node on the path is rebalanced with a single or double rotation if its subtrees differ
//! in height by more than one.
//!
//! Nodes own their children outright (`Option<Box<_>>`) and there are no parent pointers.
//! Mutations are recursive functions that take a subtree by value and hand back its (possibly
//! new) root, which the caller stores back into the slot it came from.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//! assert_eq!(tree.height(), -1);
//!
//! assert!(tree.insert(1));
//! assert!(tree.contains(&1));
//!
//! // Keys are unique so inserting again is a no-op.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.size(), 1);
//!
//! // Deleting reports whether anything was removed.
//! assert!(tree.delete(&1));
//! assert!(!tree.delete(&1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;

use log::{debug, trace};

use crate::{InvariantError, Summary};

type Link<K> = Option<Box<Node<K>>>;

/// Height of a possibly empty subtree, counted in edges. An empty subtree is `-1` and a leaf is
/// `0`.
fn height<K>(link: &Link<K>) -> isize {
    link.as_ref().map_or(-1, |n| n.height)
}

/// A self-balancing Binary Search Tree holding a set of unique keys.
#[derive(Debug, Clone)]
pub struct Tree<K> {
    root: Link<K>,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Builds a tree by inserting `values` in the order given. Repeated keys are skipped, as
    /// with [`Tree::insert`].
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::Tree;
    ///
    /// // Three ascending keys would be a stick without rebalancing.
    /// let tree = Tree::from_values([1, 2, 3, 3]);
    ///
    /// assert_eq!(tree.inorder(), vec![1, 2, 3]);
    /// assert_eq!(tree.height(), 1);
    /// assert_eq!(tree.root_key(), Some(2));
    /// ```
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Ord,
    {
        values.into_iter().collect()
    }

    /// Returns `true` if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Adds `key` to the tree. Returns `false`, leaving the tree untouched, if it was already
    /// present.
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let (root, inserted) = Node::insert_into(self.root.take(), key);
        self.root = Some(root);
        if !inserted {
            debug!(target: "avl", "insert ignored a duplicate key");
        }

        inserted
    }

    /// Removes `key` from the tree. Returns `false` if it wasn't there.
    pub fn delete(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        let Some(root) = self.root.take() else {
            debug!(target: "avl", "delete on an empty tree");
            return false;
        };
        let (root, removed) = root.delete(key);
        self.root = root;
        if !removed {
            debug!(target: "avl", "delete ignored an absent key");
        }

        removed
    }

    /// Returns `true` if `key` is in the tree.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        let mut link = &self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &node.left,
                Ordering::Equal => return true,
                Ordering::Greater => &node.right,
            };
        }

        false
    }

    /// The smallest key, or `None` if the tree is empty.
    pub fn min(&self) -> Option<K>
    where
        K: Copy,
    {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }

        Some(node.key)
    }

    /// The largest key, or `None` if the tree is empty.
    pub fn max(&self) -> Option<K>
    where
        K: Copy,
    {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }

        Some(node.key)
    }

    /// The key stored at the root.
    pub fn root_key(&self) -> Option<K>
    where
        K: Copy,
    {
        self.root.as_ref().map(|n| n.key)
    }

    /// Height of the tree in edges: `-1` when empty, `0` for a single key. Read from the
    /// root's cached height, so this is `O(1)`.
    pub fn height(&self) -> isize {
        height(&self.root)
    }

    /// Number of keys. Sizes aren't cached so this walks the whole tree.
    pub fn size(&self) -> usize {
        fn size<K>(link: &Link<K>) -> usize {
            link.as_ref().map_or(0, |n| 1 + size(&n.left) + size(&n.right))
        }

        size(&self.root)
    }

    /// All keys in ascending order.
    pub fn inorder(&self) -> Vec<K>
    where
        K: Copy,
    {
        fn walk<K: Copy>(link: &Link<K>, out: &mut Vec<K>) {
            if let Some(node) = link {
                walk(&node.left, out);
                out.push(node.key);
                walk(&node.right, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out
    }

    /// Re-derives every invariant from scratch (ordering, cached heights and balance) and
    /// returns whether they all hold. See [`Tree::check`] for the reason when they don't.
    pub fn validate(&self) -> bool
    where
        K: Ord + Copy,
    {
        self.check().is_ok()
    }

    /// Like [`Tree::validate`] but reports the first violation found.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::OutOfOrder`], [`InvariantError::HeightMismatch`] or
    /// [`InvariantError::Unbalanced`] for the first bad node in a pre-order walk.
    pub fn check(&self) -> Result<(), InvariantError<K>>
    where
        K: Ord + Copy,
    {
        Node::check(&self.root, None, None).map(|_| ())
    }

    /// Gathers every query into one [`Summary`].
    pub fn summarize(&self) -> Summary<K>
    where
        K: Ord + Copy,
    {
        Summary {
            size: self.size(),
            height: self.height(),
            min: self.min(),
            max: self.max(),
            inorder: self.inorder(),
            is_valid: self.validate(),
        }
    }
}

impl<K: Ord> FromIterator<K> for Tree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for Tree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,

    /// Edges on the longest path down to a leaf. A node with no children has a height of 0.
    height: isize,
}

impl<K> Node<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            height: 0,
        })
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// Left height minus right height. Positive means left-heavy.
    fn balance_factor(&self) -> isize {
        height(&self.left) - height(&self.right)
    }

    /// Rotate self to the right. This moves the left child up and self down into its right
    /// slot. It must only be called when there _is_ a left child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// ```text
    ///       self             new_root
    ///       /  \              /    \
    ///  new_root z   rotate ->  x     self
    ///    / \                         /  \
    ///   x   y                       y    z
    /// ```
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self.left.take().expect("Rotate right => left child");
        self.left = new_root.right.take();
        self.fix_height();

        new_root.right = Some(self);
        new_root.fix_height();
        new_root
    }

    /// Mirror image of [`Node::rotate_right`].
    ///
    /// ## Panics
    ///
    /// When called on a node without a right child.
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self.right.take().expect("Rotate left => right child");
        self.right = new_root.left.take();
        self.fix_height();

        new_root.left = Some(self);
        new_root.fix_height();
        new_root
    }

    /// Refreshes the cached height and, if the subtrees now differ in height by two, rotates
    /// this subtree back into shape. Both children must already be valid AVL trees.
    ///
    /// See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for the case names.
    fn rebalance(mut self: Box<Self>) -> Box<Self> {
        self.fix_height();
        let balance = self.balance_factor();
        let node = if balance > 1 {
            let left = self.left.take().expect("Left-heavy => left child");
            if left.balance_factor() < 0 {
                trace!(target: "avl", "LR rotation at height {}", self.height);
                self.left = Some(left.rotate_left());
            } else {
                trace!(target: "avl", "LL rotation at height {}", self.height);
                self.left = Some(left);
            }
            self.rotate_right()
        } else if balance < -1 {
            let right = self.right.take().expect("Right-heavy => right child");
            if right.balance_factor() > 0 {
                trace!(target: "avl", "RL rotation at height {}", self.height);
                self.right = Some(right.rotate_right());
            } else {
                trace!(target: "avl", "RR rotation at height {}", self.height);
                self.right = Some(right);
            }
            self.rotate_left()
        } else {
            self
        };

        // In debug builds, assert that we've restored/maintained the AVL invariant.
        if cfg!(debug_assertions) {
            let (left_height, right_height) = (height(&node.left), height(&node.right));
            assert_eq!(node.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
        node
    }

    /// Inserts into a possibly empty subtree, returning its new root and whether the key was
    /// new.
    fn insert_into(link: Link<K>, key: K) -> (Box<Self>, bool)
    where
        K: Ord,
    {
        match link {
            None => (Self::new_boxed(key), true),
            Some(node) => node.insert(key),
        }
    }

    fn insert(mut self: Box<Self>, key: K) -> (Box<Self>, bool)
    where
        K: Ord,
    {
        let inserted = match key.cmp(&self.key) {
            Ordering::Less => {
                let (left, inserted) = Self::insert_into(self.left.take(), key);
                self.left = Some(left);
                inserted
            }
            Ordering::Equal => false,
            Ordering::Greater => {
                let (right, inserted) = Self::insert_into(self.right.take(), key);
                self.right = Some(right);
                inserted
            }
        };

        // Nothing below us changed shape so there's nothing to rebalance.
        if !inserted {
            return (self, false);
        }
        (self.rebalance(), true)
    }

    /// Deletes `key` from this subtree, returning what's left of it and whether anything was
    /// removed.
    fn delete(mut self: Box<Self>, key: &K) -> (Link<K>, bool)
    where
        K: Ord,
    {
        match key.cmp(&self.key) {
            Ordering::Less => {
                let Some(left) = self.left.take() else {
                    return (Some(self), false);
                };
                let (left, removed) = left.delete(key);
                self.left = left;
                if !removed {
                    return (Some(self), false);
                }
            }
            Ordering::Greater => {
                let Some(right) = self.right.take() else {
                    return (Some(self), false);
                };
                let (right, removed) = right.delete(key);
                self.right = right;
                if !removed {
                    return (Some(self), false);
                }
            }
            Ordering::Equal => match (self.left.take(), self.right.take()) {
                (None, None) => return (None, true),
                // A lone child of an AVL node is a leaf so it can take our place as is.
                (None, Some(child)) | (Some(child), None) => return (Some(child), true),
                (Some(left), Some(right)) => {
                    // Take over the key of our in-order successor and remove its node instead.
                    let (right, successor) = right.delete_min();
                    self.key = successor;
                    self.left = Some(left);
                    self.right = right;
                }
            },
        }

        (Some(self.rebalance()), true)
    }

    /// Removes the leftmost node of this subtree, returning the rebalanced remainder and the
    /// removed key.
    fn delete_min(mut self: Box<Self>) -> (Link<K>, K) {
        match self.left.take() {
            None => {
                let Node { key, right, .. } = *self;
                (right, key)
            }
            Some(left) => {
                let (left, min) = left.delete_min();
                self.left = left;
                (Some(self.rebalance()), min)
            }
        }
    }

    /// Checks the subtree at `link` against the open interval `(low, high)` and returns its
    /// recomputed height.
    fn check(link: &Link<K>, low: Option<K>, high: Option<K>) -> Result<isize, InvariantError<K>>
    where
        K: Ord + Copy,
    {
        let Some(node) = link else {
            return Ok(-1);
        };
        let key = node.key;
        if low.is_some_and(|low| key <= low) || high.is_some_and(|high| key >= high) {
            return Err(InvariantError::OutOfOrder { key });
        }

        let left = Self::check(&node.left, low, Some(key))?;
        let right = Self::check(&node.right, Some(key), high)?;
        let computed = left.max(right) + 1;
        if node.height != computed {
            return Err(InvariantError::HeightMismatch {
                key,
                stored: node.height,
                computed,
            });
        }
        if left.abs_diff(right) > 1 {
            return Err(InvariantError::Unbalanced { key, left, right });
        }

        Ok(computed)
    }
}
