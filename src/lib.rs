//! This crate exposes two self-balancing Binary Search Trees (BSTs) over a set of unique keys,
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! Searching takes `O(height)`, so a BST is only as good as its shape. Inserting keys in
//! ascending order into a plain BST builds a linked list with height `N - 1`.
//!
//! ## Balancing
//!
//! Both trees here restructure themselves on every insert and delete to keep the height at
//! `O(lg N)`:
//!
//! - [`avl::Tree`] caches each node's height and rotates any node whose subtrees differ in
//!   height by more than one. Its height stays below roughly `1.44 lg N`.
//! - [`llrb::Tree`] colors links red or black, keeps red links leaning left, and keeps the
//!   number of black links on every root-to-leaf path equal. Its height stays below `2 lg N`.
//!
//! Neither keeps parent pointers. Every mutation is a recursive function that takes a subtree
//! by value and returns its new root, which the caller stores back in place.
//!
//! Both trees expose `validate`/`check`, which re-derive all of their invariants from scratch.
//! They exist for tests: a tree that fails its own validator is a bug.
//!
//! ```
//! use balanced_bst::{AvlTree, RedBlackTree};
//!
//! let keys = [8, 3, 10, 1, 6, 14, 4, 7, 13];
//! let mut avl = AvlTree::from_values(keys);
//! let mut llrb = RedBlackTree::from_values(keys);
//!
//! for key in [7, 14, 3] {
//!     assert!(avl.delete(&key));
//!     assert!(llrb.delete(&key));
//! }
//!
//! assert_eq!(avl.inorder(), vec![1, 4, 6, 8, 10, 13]);
//! assert_eq!(avl.inorder(), llrb.inorder());
//! assert!(avl.validate() && llrb.validate());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
mod error;
pub mod llrb;
mod summary;

pub use avl::Tree as AvlTree;
pub use error::InvariantError;
pub use llrb::Tree as RedBlackTree;
pub use summary::Summary;
