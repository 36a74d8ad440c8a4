//! A Left-Leaning Red-Black (LLRB) tree. Each node carries a color for the link from its
//! parent. Red links may only lean left and never come two in a row, and every path from the
//! root to an empty link crosses the same number of black links. Those rules keep the height
//! within twice the black-height.
//!
//! Restoring the rules after a change only needs three local moves, applied on the way back up
//! every recursive call: rotate a right-leaning red link left, rotate two stacked left reds
//! right, and split a node with two red children by flipping colors. Deletion additionally
//! pushes a red link down ahead of itself so it never removes a lone black node.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::llrb::Tree;
//!
//! // Ascending inserts are the worst case for a plain BST.
//! let mut tree: Tree<i32> = (1..=15).collect();
//!
//! assert_eq!(tree.inorder(), (1..=15).collect::<Vec<_>>());
//! assert!(tree.height() <= 7);
//! assert!(tree.validate());
//!
//! assert!(tree.delete(&8));
//! assert!(!tree.contains(&8));
//! assert!(tree.validate());
//! ```

use std::cmp::Ordering;

use log::{debug, trace};

use crate::{InvariantError, Summary};

type Link<K> = Option<Box<Node<K>>>;

/// Color of the link from a node's parent to the node. Empty links are black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

impl Color {
    fn flip(&mut self) {
        *self = match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        };
    }
}

fn is_red<K>(link: &Link<K>) -> bool {
    link.as_ref().is_some_and(|n| n.color == Color::Red)
}

/// Whether the left child of `link` exists and is red.
fn is_left_red<K>(link: &Link<K>) -> bool {
    link.as_ref().is_some_and(|n| is_red(&n.left))
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
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::llrb::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(2));
    ///
    /// // The red link leans left so the larger key ends up on top.
    /// assert_eq!(tree.root_key(), Some(2));
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let (mut root, inserted) = Node::insert_into(self.root.take(), key);
        // Fixing up may leave a red root mid-way; the root is always black between calls.
        root.color = Color::Black;
        self.root = Some(root);
        if !inserted {
            debug!(target: "llrb", "insert ignored a duplicate key");
        }

        inserted
    }

    /// Removes `key` from the tree. Returns `false` if it wasn't there.
    pub fn delete(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        // The descent below reshapes the tree as it goes, so only start it for a key that's
        // actually there.
        if !self.contains(key) {
            debug!(target: "llrb", "delete ignored an absent key");
            return false;
        }
        let Some(mut root) = self.root.take() else {
            return false;
        };

        if !is_red(&root.left) && !is_red(&root.right) {
            root.color = Color::Red;
        }
        self.root = root.delete(key);
        if let Some(root) = self.root.as_mut() {
            root.color = Color::Black;
        }

        true
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

    /// Height of the tree in edges: `-1` when empty, `0` for a single key. Nothing is cached so
    /// this walks the whole tree.
    pub fn height(&self) -> isize {
        fn height<K>(link: &Link<K>) -> isize {
            link.as_ref()
                .map_or(-1, |n| height(&n.left).max(height(&n.right)) + 1)
        }

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

    /// Re-derives every invariant from scratch and returns whether they all hold. See
    /// [`Tree::check`] for the reason when they don't.
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
    /// [`InvariantError::RedRoot`] if the root is red, otherwise the first of
    /// [`InvariantError::OutOfOrder`], [`InvariantError::RedRightLink`],
    /// [`InvariantError::ConsecutiveReds`] or [`InvariantError::BlackHeightMismatch`] found
    /// below it.
    pub fn check(&self) -> Result<(), InvariantError<K>>
    where
        K: Ord + Copy,
    {
        let Some(root) = self.root.as_ref() else {
            return Ok(());
        };
        if root.color == Color::Red {
            return Err(InvariantError::RedRoot { key: root.key });
        }

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
    color: Color,
}

impl<K> Node<K> {
    /// New nodes hang off a red link.
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            color: Color::Red,
        })
    }

    /// Turns a right-leaning red link into a left-leaning one. The right child takes over our
    /// color and we hang off it by a red link.
    ///
    /// ```text
    ///     self                   x
    ///     /  \                  / \
    ///    a   (x)     ->     (self) c
    ///        / \             /  \
    ///       b   c           a    b
    /// ```
    ///
    /// ## Panics
    ///
    /// When called on a node without a right child.
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let mut x = self.right.take().expect("Rotate left => right child");
        self.right = x.left.take();
        x.color = self.color;
        self.color = Color::Red;
        x.left = Some(self);
        x
    }

    /// Mirror image of [`Node::rotate_left`].
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let mut x = self.left.take().expect("Rotate right => left child");
        self.left = x.right.take();
        x.color = self.color;
        self.color = Color::Red;
        x.right = Some(self);
        x
    }

    /// Toggles our color and both children's. Splits a node with two red children (pushing a
    /// red link up) or, run the other way, merges us with both children.
    fn flip_colors(&mut self) {
        self.color.flip();
        if let Some(left) = self.left.as_mut() {
            left.color.flip();
        }
        if let Some(right) = self.right.as_mut() {
            right.color.flip();
        }
    }

    /// Restores the LLRB shape of this subtree after a change directly below it.
    fn fix_up(mut self: Box<Self>) -> Box<Self> {
        if is_red(&self.right) && !is_red(&self.left) {
            self = self.rotate_left();
        }
        if is_red(&self.left) && is_left_red(&self.left) {
            self = self.rotate_right();
        }
        if is_red(&self.left) && is_red(&self.right) {
            self.flip_colors();
        }
        self
    }

    /// Makes our left child or one of its children red, borrowing from the right sibling when it
    /// can spare a red link. Called with us red and both children black.
    fn move_red_left(mut self: Box<Self>) -> Box<Self> {
        self.flip_colors();
        if is_left_red(&self.right) {
            trace!(target: "llrb", "borrowing from the right sibling");
            let right = self.right.take().expect("Red right-left => right child");
            self.right = Some(right.rotate_right());
            self = self.rotate_left();
            self.flip_colors();
        }
        self
    }

    /// Makes our right child or one of its children red, borrowing from the left sibling when it
    /// can spare a red link. Called with us red and both children black.
    fn move_red_right(mut self: Box<Self>) -> Box<Self> {
        self.flip_colors();
        if is_left_red(&self.left) {
            trace!(target: "llrb", "borrowing from the left sibling");
            self = self.rotate_right();
            self.flip_colors();
        }
        self
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

        if !inserted {
            return (self, false);
        }
        (self.fix_up(), true)
    }

    /// Deletes `key`, which must be somewhere in this subtree, returning what's left of it.
    fn delete(mut self: Box<Self>, key: &K) -> Link<K>
    where
        K: Ord,
    {
        if key < &self.key {
            if !is_red(&self.left) && !is_left_red(&self.left) {
                self = self.move_red_left();
            }
            let left = self.left.take().expect("Key left of node => left child");
            self.left = left.delete(key);
        } else {
            // Lean our red link right so the cases below can take it with them.
            if is_red(&self.left) {
                self = self.rotate_right();
            }
            if key == &self.key && self.right.is_none() {
                return None;
            }
            if !is_red(&self.right) && !is_left_red(&self.right) {
                self = self.move_red_right();
            }
            let right = self.right.take().expect("Key right of node => right child");
            if key == &self.key {
                // Take over the key of our in-order successor and remove its node instead.
                let (right, successor) = right.delete_min();
                self.key = successor;
                self.right = right;
            } else {
                self.right = right.delete(key);
            }
        }

        Some(self.fix_up())
    }

    /// Removes the leftmost node of this subtree, returning the fixed-up remainder and the
    /// removed key.
    fn delete_min(mut self: Box<Self>) -> (Link<K>, K) {
        if self.left.is_none() {
            // No left child means no right child either: it couldn't be red and a black one
            // would unbalance the black-height.
            let Node { key, .. } = *self;
            return (None, key);
        }

        if !is_red(&self.left) && !is_left_red(&self.left) {
            self = self.move_red_left();
        }
        let left = self.left.take().expect("Checked above");
        let (left, min) = left.delete_min();
        self.left = left;
        (Some(self.fix_up()), min)
    }

    /// Checks the subtree at `link` against the open interval `(low, high)` and returns its
    /// black-height, counting the empty link at the bottom as 1.
    fn check(link: &Link<K>, low: Option<K>, high: Option<K>) -> Result<usize, InvariantError<K>>
    where
        K: Ord + Copy,
    {
        let Some(node) = link else {
            return Ok(1);
        };
        let key = node.key;
        if low.is_some_and(|low| key <= low) || high.is_some_and(|high| key >= high) {
            return Err(InvariantError::OutOfOrder { key });
        }
        if is_red(&node.right) {
            return Err(InvariantError::RedRightLink { key });
        }
        if node.color == Color::Red && (is_red(&node.left) || is_red(&node.right)) {
            return Err(InvariantError::ConsecutiveReds { key });
        }

        let left = Self::check(&node.left, low, Some(key))?;
        let right = Self::check(&node.right, Some(key), high)?;
        if left != right {
            return Err(InvariantError::BlackHeightMismatch { key, left, right });
        }

        Ok(match node.color {
            Color::Red => left,
            Color::Black => left + 1,
        })
    }
}
