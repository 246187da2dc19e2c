//! Binary search tree and red-black tree, written after the textbook
//! procedures TREE-INSERT, TREE-DELETE, RB-INSERT, RB-DELETE and their
//! fixups.
//!
//! Both trees are a [`Tree`] over a balancing strategy, picked by the
//! type parameter:
//!
//! ```
//! use clrs_tree::{BinarySearchTree, RedBlackTree};
//!
//! let mut bst: BinarySearchTree<i64> = BinarySearchTree::new("bst");
//! let mut rbt: RedBlackTree<i64> = RedBlackTree::new("rbt");
//! for key in 1..=7 {
//!     bst.insert(key);
//!     rbt.insert(key);
//! }
//! assert_eq!(bst.height(), Ok(6));
//! assert_eq!(rbt.height(), Ok(3));
//! assert_eq!(rbt.iter().cloned().collect::<Vec<i64>>(), (1..=7).collect::<Vec<i64>>());
//! ```
//!
//! Nodes live in an arena owned by the tree, slot zero being the
//! sentinel `T.nil`. Callers hold nodes through [`NodeRef`] handles,
//! handles to deleted nodes are detected and rejected.

mod arena;
mod bst;
mod depth;
mod error;
mod rbtree;
mod stack;
mod tree;
mod walk;

pub use crate::arena::{Color, NodeRef};
pub use crate::bst::Unbalanced;
pub use crate::depth::Depth;
pub use crate::error::Error;
pub use crate::rbtree::RedBlack;
pub use crate::stack::Stack;
pub use crate::tree::{Balance, Stats, Tree};
pub use crate::walk::{Iter, Order, Postorder, Preorder};

/// Plain binary search tree, no rebalancing.
pub type BinarySearchTree<K> = Tree<K, Unbalanced>;

/// Red-black tree.
pub type RedBlackTree<K> = Tree<K, RedBlack>;
