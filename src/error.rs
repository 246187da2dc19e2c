use thiserror::Error as ThisError;

/// Error enumerates over all possible errors that this package
/// shall return.
///
/// Searching for a missing key is not an error, it simply yields
/// `None`. Stack errors carry no key and use the default `Error<()>`.
/// Variants from [`Error::SortError`] onwards are invariant
/// violations and are only ever produced by `Tree::validate`.
#[derive(Debug, PartialEq, ThisError)]
pub enum Error<K = ()> {
    /// minimum, maximum or height asked of a tree without nodes.
    #[error("tree is empty")]
    EmptyTree,
    /// Node handle is stale (its node was deleted), belongs to another
    /// tree, or refers to the sentinel.
    #[error("node handle is not linked into this tree")]
    InvalidNode,
    /// Push on a bounded stack that already holds `capacity` items.
    #[error("stack overflows, capacity {0}")]
    StackOverflow(usize),
    /// Pop on an empty stack.
    #[error("stack underflows")]
    StackUnderflow,
    /// Fatal case, index entries are not in sort-order. Carries the
    /// child key and the parent key.
    #[error("sort order broken, child {0:?} parent {1:?}")]
    SortError(K, K),
    /// Fatal case, a red node with a red child. Carries the parent key.
    #[error("consecutive reds below {0:?}")]
    ConsecutiveReds(K),
    /// Fatal case, black heights differ under a node. The String
    /// component of this variant can be used for debugging.
    #[error("unbalanced blacks, {0}")]
    UnbalancedBlacks(String),
    /// Fatal case, the root is colored red.
    #[error("root {0:?} is red")]
    RedRoot(K),
    /// Fatal case, the sentinel is colored red.
    #[error("sentinel is red")]
    RedSentinel,
    /// Fatal case, parent back-link does not match the child link.
    #[error("broken parent link at {0:?}")]
    BrokenParent(K),
    /// Fatal case, node count differs from the number of linked nodes.
    /// Carries (counted, linked).
    #[error("node count {0} but {1} nodes linked")]
    CountMismatch(usize, usize),
}
