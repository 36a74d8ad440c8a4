use balanced_bst::AvlTree;
use quickcheck_macros::quickcheck;

use crate::{build, levels, Op};

type Tree = AvlTree<i8>;

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op>) -> bool {
    crate::agrees_with_model::<Tree>(&ops)
}

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i8>) -> bool {
    crate::inorder_is_sorted::<Tree>(&xs)
}

#[quickcheck]
fn contains(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    crate::contains_exactly::<Tree>(&xs, &nots)
}

#[quickcheck]
fn insert_then_delete(xs: Vec<i8>, key: i8) -> bool {
    crate::insert_then_delete_round_trips::<Tree>(&xs, key)
}

#[quickcheck]
fn repeats_are_no_ops(xs: Vec<i8>, key: i8) -> bool {
    crate::repeats_are_no_ops::<Tree>(&xs, key)
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    crate::drains_to_empty::<Tree>(&xs, &deletes)
}

#[quickcheck]
fn height_bound(xs: Vec<i8>) -> bool {
    let tree: Tree = build(&xs);
    let n = tree.size() as f64;

    levels(&tree) <= 1.45 * (n + 2.0).log2()
}

#[test]
fn ascending_hundreds_stay_within_bound() {
    let mut tree = AvlTree::new();
    for key in 0..500 {
        tree.insert(key);
    }

    assert!(tree.validate());
    assert!(((tree.height() + 1) as f64) <= 1.45 * 502f64.log2());

    for key in (0..500).step_by(3) {
        assert!(tree.delete(&key));
    }
    assert!(tree.validate());
    assert_eq!(tree.size(), 333);
}
