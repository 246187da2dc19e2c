//! Property tests for both tree flavors, driven through the public API.

use proptest::prelude::*;

use clrs_tree::{Balance, BinarySearchTree, Order, RedBlackTree, Tree};

#[derive(Clone, Debug)]
enum Op {
    Insert(i32),
    Delete(i32),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..64i32).prop_map(Op::Insert),
        2 => (0..64i32).prop_map(Op::Delete),
    ]
}

fn apply<S: Balance>(tree: &mut Tree<i32, S>, model: &mut Vec<i32>, op: &Op) {
    match op {
        Op::Insert(key) => {
            tree.insert(*key);
            let off = model.iter().take_while(|k| *k <= key).count();
            model.insert(off, *key);
        }
        Op::Delete(key) => {
            let want = model.iter().position(|k| k == key).map(|off| model.remove(off));
            assert_eq!(tree.delete(key), want);
        }
    }
}

fn check<S: Balance>(tree: &Tree<i32, S>, model: &[i32]) {
    let stats = tree.validate().unwrap();
    assert_eq!(stats.entries(), model.len());
    assert_eq!(tree.len(), model.len());

    let keys: Vec<i32> = tree.iter().cloned().collect();
    assert_eq!(keys, model.to_vec());
    let mut walked = vec![];
    tree.walk(Order::Inorder, |k| walked.push(*k));
    assert_eq!(walked, keys);
    assert_eq!(tree.preorder().count(), model.len());
    assert_eq!(tree.postorder().count(), model.len());

    if let Some(root) = tree.root() {
        let min = tree.minimum_of(root).unwrap();
        let max = tree.maximum_of(root).unwrap();
        assert_eq!(tree.predecessor(min), Ok(None));
        assert_eq!(tree.successor(max), Ok(None));
        assert_eq!(tree.minimum(), Ok(&model[0]));
        assert_eq!(tree.maximum(), Ok(&model[model.len() - 1]));
    } else {
        assert!(model.is_empty());
    }
}

proptest! {
    #[test]
    fn prop_bst_matches_model(ops in prop::collection::vec(arbitrary_op(), 0..200)) {
        let mut tree: BinarySearchTree<i32> = BinarySearchTree::new("prop-bst");
        let mut model = vec![];
        for op in ops.iter() {
            apply(&mut tree, &mut model, op);
            check(&tree, &model);
        }
    }

    #[test]
    fn prop_rbt_matches_model(ops in prop::collection::vec(arbitrary_op(), 0..200)) {
        let mut tree: RedBlackTree<i32> = RedBlackTree::new("prop-rbt");
        let mut model = vec![];
        for op in ops.iter() {
            apply(&mut tree, &mut model, op);
            check(&tree, &model);
        }
        if !tree.is_empty() {
            let bound = (2.0 * ((tree.len() + 1) as f64).log2()).floor() as usize;
            prop_assert!(tree.height().unwrap() <= bound);
            prop_assert_eq!(tree.validate().unwrap().blacks(), Some(tree.black_height()));
        }
    }

    #[test]
    fn prop_rbt_round_trip(keys in prop::collection::vec(any::<i32>(), 1..300)) {
        let mut tree: RedBlackTree<i32> = RedBlackTree::new("prop-rbt");
        for key in keys.iter() {
            tree.insert(*key);
        }
        prop_assert!(tree.validate().is_ok());
        for key in keys.iter().rev() {
            prop_assert_eq!(tree.delete(key), Some(*key));
            prop_assert!(tree.validate().is_ok());
        }
        prop_assert!(tree.is_empty());
        prop_assert!(tree.root().is_none());
        prop_assert_eq!(tree.black_height(), 0);
    }

    #[test]
    fn prop_stale_handles(keys in prop::collection::vec(0..32i32, 1..64)) {
        let mut tree: RedBlackTree<i32> = RedBlackTree::new("prop-rbt");
        let handles: Vec<_> = keys.iter().map(|k| tree.insert(*k)).collect();
        for (handle, key) in handles.iter().zip(keys.iter()) {
            prop_assert_eq!(tree.remove(*handle), Ok(*key));
            prop_assert!(tree.key(*handle).is_err());
            prop_assert!(tree.remove(*handle).is_err());
        }
        prop_assert!(tree.is_empty());
    }
}
