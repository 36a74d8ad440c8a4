//! Property tests run against both trees. Each tree gets its own module of `#[quickcheck]`
//! functions; the shared checks live here behind the [`Set`] trait.

use std::collections::BTreeSet;

use balanced_bst::{AvlTree, RedBlackTree};
use quickcheck::{Arbitrary, Gen};

mod avl;
mod llrb;

/// An operation to replay against a tree and a `BTreeSet` model.
#[derive(Copy, Clone, Debug)]
pub enum Op {
    Insert(i8),
    Remove(i8),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(i8::arbitrary(g))
        } else {
            Op::Remove(i8::arbitrary(g))
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match *self {
            Op::Insert(k) => Box::new(k.shrink().map(Op::Insert)),
            Op::Remove(k) => Box::new(k.shrink().map(Op::Remove)),
        }
    }
}

/// The surface both trees share, so the properties below are written once.
pub trait Set: Default {
    fn insert(&mut self, key: i8) -> bool;
    fn delete(&mut self, key: &i8) -> bool;
    fn contains(&self, key: &i8) -> bool;
    fn size(&self) -> usize;
    fn height(&self) -> isize;
    fn inorder(&self) -> Vec<i8>;
    fn validate(&self) -> bool;
}

macro_rules! impl_set {
    ($tree:ty) => {
        impl Set for $tree {
            fn insert(&mut self, key: i8) -> bool {
                <$tree>::insert(self, key)
            }
            fn delete(&mut self, key: &i8) -> bool {
                <$tree>::delete(self, key)
            }
            fn contains(&self, key: &i8) -> bool {
                <$tree>::contains(self, key)
            }
            fn size(&self) -> usize {
                <$tree>::size(self)
            }
            fn height(&self) -> isize {
                <$tree>::height(self)
            }
            fn inorder(&self) -> Vec<i8> {
                <$tree>::inorder(self)
            }
            fn validate(&self) -> bool {
                <$tree>::validate(self)
            }
        }
    };
}

impl_set!(AvlTree<i8>);
impl_set!(RedBlackTree<i8>);

/// Inserts `xs` in order into an empty tree.
pub fn build<T: Set>(xs: &[i8]) -> T {
    let mut tree = T::default();
    for x in xs {
        tree.insert(*x);
    }
    tree
}

/// Replays `ops` against a tree and a model set, checking return values and invariants after
/// every step and the full contents at the end.
pub fn agrees_with_model<T: Set>(ops: &[Op]) -> bool {
    let mut tree = T::default();
    let mut set = BTreeSet::new();

    for op in ops {
        let agrees = match *op {
            Op::Insert(k) => tree.insert(k) == set.insert(k),
            Op::Remove(k) => tree.delete(&k) == set.remove(&k),
        };
        if !agrees || !tree.validate() {
            return false;
        }
    }

    tree.size() == set.len() && tree.inorder() == set.into_iter().collect::<Vec<_>>()
}

/// `inorder` is strictly ascending and holds exactly the inserted keys.
pub fn inorder_is_sorted<T: Set>(xs: &[i8]) -> bool {
    let tree: T = build(xs);
    let keys = tree.inorder();
    let expected: BTreeSet<_> = xs.iter().copied().collect();

    keys.windows(2).all(|w| w[0] < w[1]) && keys == expected.into_iter().collect::<Vec<_>>()
}

/// Every inserted key is found and no other key is.
pub fn contains_exactly<T: Set>(xs: &[i8], nots: &[i8]) -> bool {
    let tree: T = build(xs);

    xs.iter().all(|x| tree.contains(x))
        && nots
            .iter()
            .filter(|x| !xs.contains(x))
            .all(|x| !tree.contains(x))
}

/// Inserting a new key and deleting it again restores the previous contents.
pub fn insert_then_delete_round_trips<T: Set>(xs: &[i8], key: i8) -> bool {
    let mut tree: T = build(xs);
    if tree.contains(&key) {
        tree.delete(&key);
    }
    let before = tree.inorder();

    tree.insert(key) && tree.delete(&key) && tree.validate() && tree.inorder() == before
}

/// A second insert of the same key or a second delete of it is a no-op.
pub fn repeats_are_no_ops<T: Set>(xs: &[i8], key: i8) -> bool {
    let mut tree: T = build(xs);
    let size = tree.size();
    let was_present = tree.contains(&key);

    let first_insert = tree.insert(key);
    let second_insert = tree.insert(key);
    let grown = tree.size() == if was_present { size } else { size + 1 };

    let first_delete = tree.delete(&key);
    let second_delete = tree.delete(&key);

    first_insert != was_present
        && !second_insert
        && grown
        && first_delete
        && !second_delete
        && tree.validate()
}

/// Deleting every key, in the order given, leaves a valid tree at every step and an empty one
/// at the end.
pub fn drains_to_empty<T: Set>(xs: &[i8], order: &[i8]) -> bool {
    let mut tree: T = build(xs);

    for key in order.iter().chain(xs) {
        tree.delete(key);
        if !tree.validate() {
            return false;
        }
    }

    tree.size() == 0 && tree.height() == -1 && tree.inorder().is_empty()
}

/// Height in levels (edges + 1) for comparing against the textbook bounds.
pub fn levels<T: Set>(tree: &T) -> f64 {
    (tree.height() + 1) as f64
}
