use std::{borrow::Borrow, cmp, cmp::Ordering, marker::PhantomData, mem};

use crate::arena::{Arena, NodeRef, NIL};
use crate::depth::Depth;
use crate::error::Error;
use crate::stack::Stack;
use crate::walk::{self, Iter, Order, Postorder, Preorder};

/// Balance supplies the structural mutations of a [`Tree`]. Search,
/// walks and queries are shared by every tree, while insert, transplant
/// and delete are picked by the balancing strategy at construction.
///
/// Implemented by [`Unbalanced`](crate::Unbalanced) and
/// [`RedBlack`](crate::RedBlack).
pub trait Balance {
    /// Whether nodes carry meaningful colors, `validate` checks the
    /// red-black properties only for colored strategies.
    const COLORED: bool;

    /// Link freshly allocated node `z` into the tree.
    fn insert<K: Ord>(arena: &mut Arena<K>, z: usize);

    /// Replace the subtree rooted at `u` with the subtree rooted at `v`.
    fn transplant<K>(arena: &mut Arena<K>, u: usize, v: usize);

    /// Unlink node `z` from the tree, `z` is left detached.
    fn delete<K: Ord>(arena: &mut Arena<K>, z: usize);
}

/// Tree manage a single instance of in-memory binary search tree, kept
/// in shape by the balancing strategy `S`.
///
/// Keys are ordered by [`Ord`], duplicate keys are allowed and descend
/// to the right of their equals.
pub struct Tree<K, S>
where
    S: Balance,
{
    name: String,
    arena: Arena<K>,
    n_count: usize, // number of nodes in the tree.
    _balance: PhantomData<S>,
}

impl<K, S> Clone for Tree<K, S>
where
    K: Clone,
    S: Balance,
{
    fn clone(&self) -> Self {
        Tree {
            name: self.name.clone(),
            arena: self.arena.clone(),
            n_count: self.n_count,
            _balance: PhantomData,
        }
    }
}

/// Different ways to construct a new Tree instance.
impl<K, S> Tree<K, S>
where
    K: Ord,
    S: Balance,
{
    /// Create an empty instance of Tree, identified by `name`.
    pub fn new<N>(name: N) -> Tree<K, S>
    where
        N: AsRef<str>,
    {
        Tree {
            name: name.as_ref().to_string(),
            arena: Arena::new(),
            n_count: Default::default(),
            _balance: PhantomData,
        }
    }
}

/// Maintenance API.
impl<K, S> Tree<K, S>
where
    K: Ord,
    S: Balance,
{
    /// Identify this instance.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of nodes in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this tree is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return quickly with basic statisics, only entries() and
    /// node_size() are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, self.node_size())
    }

    /// Validate the tree:
    ///
    /// * Keys are in sort order, left <= node <= right.
    /// * Parent links agree with child links.
    /// * Node count agrees with the number of linked nodes.
    ///
    /// Trees with a colored strategy are also checked for the
    /// red-black properties:
    ///
    /// * The sentinel and the root are black.
    /// * A red node has only black children.
    /// * Every path from a node down to the sentinel passes the same
    ///   number of black nodes.
    ///
    /// Additionally return full statistics on the tree. Refer to
    /// [`Stats`] for more information.
    pub fn validate(&self) -> Result<Stats, Error<K>>
    where
        K: Clone,
    {
        let arena = &self.arena;
        let root = arena.root();
        if S::COLORED {
            if arena.is_red(NIL) {
                return Err(Error::RedSentinel);
            }
            if !arena.is_nil(root) && arena.is_red(root) {
                return Err(Error::RedRoot(arena.key(root).clone()));
            }
        }
        if !arena.is_nil(root) && !arena.is_nil(arena.p(root)) {
            return Err(Error::BrokenParent(arena.key(root).clone()));
        }

        let mut stats = Stats::new(self.n_count, self.node_size());
        let mut depths = Depth::new();
        let mut linked = 0;
        let blacks = self.validate_tree(root, &mut linked, &mut depths)?;
        if linked != self.n_count || linked != arena.live() {
            return Err(Error::CountMismatch(self.n_count, linked));
        }
        stats.set_depths(depths);
        if S::COLORED {
            stats.set_blacks(blacks);
        }
        Ok(stats)
    }

    // return the black-height of `root`, sentinel counting as one. Nodes
    // are checked on the way down, black-heights are compared on the way
    // up, in the same order as a recursive postorder walk.
    fn validate_tree(
        &self,
        root: usize,
        linked: &mut usize,
        depths: &mut Depth,
    ) -> Result<usize, Error<K>>
    where
        K: Clone,
    {
        let arena = &self.arena;
        let mut stack = Stack::new(); // (node, depth, subtrees already pushed)
        let mut blacks: Vec<usize> = vec![];
        stack.push_unbounded((root, 0, false));

        while let Ok((x, depth, expanded)) = stack.pop() {
            if arena.is_nil(x) {
                depths.sample(depth);
                blacks.push(0);
                continue;
            }
            let (left, right) = (arena.left(x), arena.right(x));
            if expanded {
                let rblacks = blacks.pop().unwrap_or(0);
                let lblacks = blacks.pop().unwrap_or(0);
                let lblacks = lblacks + if arena.is_black(left) { 1 } else { 0 };
                let rblacks = rblacks + if arena.is_black(right) { 1 } else { 0 };
                if S::COLORED && lblacks != rblacks {
                    let err = format!("left: {} right: {}", lblacks, rblacks);
                    return Err(Error::UnbalancedBlacks(err));
                }
                blacks.push(lblacks);
                continue;
            }

            *linked += 1;
            for &child in [left, right].iter() {
                if !arena.is_nil(child) && arena.p(child) != x {
                    return Err(Error::BrokenParent(arena.key(child).clone()));
                }
            }
            if !arena.is_nil(left) && arena.key(left) > arena.key(x) {
                let (lkey, parent) = (arena.key(left).clone(), arena.key(x).clone());
                return Err(Error::SortError(lkey, parent));
            }
            if !arena.is_nil(right) && arena.key(right) < arena.key(x) {
                let (rkey, parent) = (arena.key(right).clone(), arena.key(x).clone());
                return Err(Error::SortError(rkey, parent));
            }
            if S::COLORED && arena.is_red(x) && (arena.is_red(left) || arena.is_red(right)) {
                return Err(Error::ConsecutiveReds(arena.key(x).clone()));
            }

            stack.push_unbounded((x, depth, true));
            stack.push_unbounded((right, depth + 1, false));
            stack.push_unbounded((left, depth + 1, false));
        }
        Ok(blacks.pop().unwrap_or(0))
    }

    fn node_size(&self) -> usize {
        // key, three links, color and generation.
        mem::size_of::<Option<K>>() + 3 * mem::size_of::<usize>() + 8
    }
}

/// Node queries.
impl<K, S> Tree<K, S>
where
    K: Ord,
    S: Balance,
{
    /// Return the root node, `None` if tree is empty.
    pub fn root(&self) -> Option<NodeRef> {
        self.arena.to_ref(self.arena.root())
    }

    /// Return the key held by node `x`.
    pub fn key(&self, x: NodeRef) -> Result<&K, Error<K>> {
        let x = self.arena.resolve(x)?;
        Ok(self.arena.key(x))
    }

    /// Return the parent of `x`, `None` for the root.
    pub fn parent(&self, x: NodeRef) -> Result<Option<NodeRef>, Error<K>> {
        let x = self.arena.resolve(x)?;
        Ok(self.arena.to_ref(self.arena.p(x)))
    }

    /// Return the left child of `x`, `None` if absent.
    pub fn left(&self, x: NodeRef) -> Result<Option<NodeRef>, Error<K>> {
        let x = self.arena.resolve(x)?;
        Ok(self.arena.to_ref(self.arena.left(x)))
    }

    /// Return the right child of `x`, `None` if absent.
    pub fn right(&self, x: NodeRef) -> Result<Option<NodeRef>, Error<K>> {
        let x = self.arena.resolve(x)?;
        Ok(self.arena.to_ref(self.arena.right(x)))
    }

    /// Return the other child of x's parent, `None` for the root or
    /// when the parent has a single child.
    pub fn sibling(&self, x: NodeRef) -> Result<Option<NodeRef>, Error<K>> {
        let x = self.arena.resolve(x)?;
        let p = self.arena.p(x);
        if self.arena.is_nil(p) {
            return Ok(None);
        }
        let w = if x == self.arena.left(p) {
            self.arena.right(p)
        } else {
            self.arena.left(p)
        };
        Ok(self.arena.to_ref(w))
    }

    /// Return children of `x`, left child first.
    pub fn children(&self, x: NodeRef) -> Result<Vec<NodeRef>, Error<K>> {
        let x = self.arena.resolve(x)?;
        let children = [self.arena.left(x), self.arena.right(x)];
        Ok(children.iter().filter_map(|c| self.arena.to_ref(*c)).collect())
    }

    /// Return the number of children of `x`, zero to two.
    pub fn n_children(&self, x: NodeRef) -> Result<usize, Error<K>> {
        Ok(self.children(x)?.len())
    }

    /// Check whether `x` has no children.
    pub fn is_leaf(&self, x: NodeRef) -> Result<bool, Error<K>> {
        Ok(self.n_children(x)? == 0)
    }

    /// Check whether `x` is the root of this tree.
    pub fn is_root(&self, x: NodeRef) -> Result<bool, Error<K>> {
        let x = self.arena.resolve(x)?;
        Ok(x == self.arena.root())
    }

    /// Return the number of edges from root to `x`.
    pub fn depth(&self, x: NodeRef) -> Result<usize, Error<K>> {
        let mut x = self.arena.resolve(x)?;
        let mut depth = 0;
        while x != self.arena.root() {
            x = self.arena.p(x);
            depth += 1;
        }
        Ok(depth)
    }

    /// Return the height of the whole tree, number of edges on the
    /// longest path from root to a leaf.
    pub fn height(&self) -> Result<usize, Error<K>> {
        match self.root() {
            Some(root) => self.height_of(root),
            None => Err(Error::EmptyTree),
        }
    }

    /// Return the height of the subtree rooted at `x`, a leaf has
    /// height zero.
    pub fn height_of(&self, x: NodeRef) -> Result<usize, Error<K>> {
        let x = self.arena.resolve(x)?;
        Ok(self.height_at(x))
    }

    fn height_at(&self, x: usize) -> usize {
        let mut stack = Stack::new(); // (node, edges below x)
        stack.push_unbounded((x, 0));
        let mut height = 0;
        while let Ok((x, depth)) = stack.pop() {
            height = cmp::max(height, depth);
            for &child in [self.arena.left(x), self.arena.right(x)].iter() {
                if !self.arena.is_nil(child) {
                    stack.push_unbounded((child, depth + 1));
                }
            }
        }
        height
    }
}

/// Read operations on Tree instance.
impl<K, S> Tree<K, S>
where
    K: Ord,
    S: Balance,
{
    /// TREE-SEARCH, iterative, from the root.
    pub fn search<Q>(&self, key: &Q) -> Option<NodeRef>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.search_at(self.arena.root(), key);
        self.arena.to_ref(x)
    }

    /// TREE-SEARCH, iterative, within the subtree rooted at `x`.
    pub fn search_from<Q>(&self, x: NodeRef, key: &Q) -> Result<Option<NodeRef>, Error<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.arena.resolve(x)?;
        Ok(self.arena.to_ref(self.search_at(x, key)))
    }

    /// TREE-SEARCH, recursive, from the root. Same answer as
    /// [`Tree::search`].
    pub fn search_recursive<Q>(&self, key: &Q) -> Option<NodeRef>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.search_recursive_at(self.arena.root(), key);
        self.arena.to_ref(x)
    }

    /// Check whether `key` is present in the tree.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    fn search_at<Q>(&self, mut x: usize, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        while !self.arena.is_nil(x) {
            x = match key.cmp(self.arena.key(x).borrow()) {
                Ordering::Equal => return x,
                Ordering::Less => self.arena.left(x),
                Ordering::Greater => self.arena.right(x),
            };
        }
        x
    }

    fn search_recursive_at<Q>(&self, x: usize, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if self.arena.is_nil(x) {
            return x;
        }
        match key.cmp(self.arena.key(x).borrow()) {
            Ordering::Equal => x,
            Ordering::Less => self.search_recursive_at(self.arena.left(x), key),
            Ordering::Greater => self.search_recursive_at(self.arena.right(x), key),
        }
    }

    /// Return the smallest key in the tree.
    pub fn minimum(&self) -> Result<&K, Error<K>> {
        let root = self.root().ok_or(Error::EmptyTree)?;
        self.key(self.minimum_of(root)?)
    }

    /// Return the largest key in the tree.
    pub fn maximum(&self) -> Result<&K, Error<K>> {
        let root = self.root().ok_or(Error::EmptyTree)?;
        self.key(self.maximum_of(root)?)
    }

    /// TREE-MINIMUM, node with the smallest key in the subtree rooted
    /// at `x`.
    pub fn minimum_of(&self, x: NodeRef) -> Result<NodeRef, Error<K>> {
        let x = self.arena.resolve(x)?;
        Ok(self.arena.handle(self.arena.minimum(x)))
    }

    /// TREE-MAXIMUM, node with the largest key in the subtree rooted
    /// at `x`.
    pub fn maximum_of(&self, x: NodeRef) -> Result<NodeRef, Error<K>> {
        let x = self.arena.resolve(x)?;
        Ok(self.arena.handle(self.arena.maximum(x)))
    }

    /// Recursive TREE-MINIMUM, same answer as [`Tree::minimum_of`].
    pub fn minimum_recursive_of(&self, x: NodeRef) -> Result<NodeRef, Error<K>> {
        let x = self.arena.resolve(x)?;
        Ok(self.arena.handle(self.minimum_recursive_at(x)))
    }

    /// Recursive TREE-MAXIMUM, same answer as [`Tree::maximum_of`].
    pub fn maximum_recursive_of(&self, x: NodeRef) -> Result<NodeRef, Error<K>> {
        let x = self.arena.resolve(x)?;
        Ok(self.arena.handle(self.maximum_recursive_at(x)))
    }

    fn minimum_recursive_at(&self, x: usize) -> usize {
        match self.arena.left(x) {
            NIL => x,
            left => self.minimum_recursive_at(left),
        }
    }

    fn maximum_recursive_at(&self, x: usize) -> usize {
        match self.arena.right(x) {
            NIL => x,
            right => self.maximum_recursive_at(right),
        }
    }

    /// TREE-SUCCESSOR, next node in inorder sequence. `None` if `x`
    /// holds the largest key.
    pub fn successor(&self, x: NodeRef) -> Result<Option<NodeRef>, Error<K>> {
        let mut x = self.arena.resolve(x)?;
        let arena = &self.arena;
        if !arena.is_nil(arena.right(x)) {
            return Ok(Some(arena.handle(arena.minimum(arena.right(x)))));
        }
        let mut y = arena.p(x);
        while !arena.is_nil(y) && x == arena.right(y) {
            x = y;
            y = arena.p(y);
        }
        Ok(arena.to_ref(y))
    }

    /// TREE-PREDECESSOR, previous node in inorder sequence. `None` if
    /// `x` holds the smallest key.
    pub fn predecessor(&self, x: NodeRef) -> Result<Option<NodeRef>, Error<K>> {
        let mut x = self.arena.resolve(x)?;
        let arena = &self.arena;
        if !arena.is_nil(arena.left(x)) {
            return Ok(Some(arena.handle(arena.maximum(arena.left(x)))));
        }
        let mut y = arena.p(x);
        while !arena.is_nil(y) && x == arena.left(y) {
            x = y;
            y = arena.p(y);
        }
        Ok(arena.to_ref(y))
    }

    /// Return an iterator over all keys in ascending order. Walks the
    /// tree iteratively, using an explicit [`Stack`](crate::Stack).
    pub fn iter(&self) -> Iter<K> {
        Iter::new(&self.arena)
    }

    /// Return an iterator over all keys in preorder, each node before
    /// its subtrees.
    pub fn preorder(&self) -> Preorder<K> {
        Preorder::new(&self.arena)
    }

    /// Return an iterator over all keys in postorder, each node after
    /// its subtrees.
    pub fn postorder(&self) -> Postorder<K> {
        Postorder::new(&self.arena)
    }

    /// Recursive tree walk in `order`, calling `visit` for each key.
    /// Recursion goes as deep as the tree is high, prefer the lazy
    /// iterators for degenerate trees.
    pub fn walk<F>(&self, order: Order, mut visit: F)
    where
        F: FnMut(&K),
    {
        walk::walk(&self.arena, self.arena.root(), order, &mut visit)
    }
}

/// Write operations on Tree instance.
impl<K, S> Tree<K, S>
where
    K: Ord,
    S: Balance,
{
    /// Insert `key` into the tree and return a handle to its node.
    /// Duplicate keys are allowed.
    pub fn insert(&mut self, key: K) -> NodeRef {
        let z = self.arena.alloc(key);
        S::insert(&mut self.arena, z);
        self.n_count += 1;
        self.arena.handle(z)
    }

    /// Delete a node holding `key` from this instance and return its
    /// key. If key is not present, then delete is effectively a no-op.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Some(z) => self.remove(z).ok(),
            None => {
                log::debug!("{}: delete of missing key", self.name);
                None
            }
        }
    }

    /// Delete node `z` from this instance and return its key. Fails
    /// without touching the tree, if `z` is not linked into this tree.
    pub fn remove(&mut self, z: NodeRef) -> Result<K, Error<K>> {
        let z = self.arena.resolve(z)?;
        S::delete(&mut self.arena, z);
        self.n_count -= 1;
        Ok(self.arena.free(z))
    }

    pub(crate) fn arena(&self) -> &Arena<K> {
        &self.arena
    }

    #[cfg(test)]
    pub(crate) fn arena_mut(&mut self) -> &mut Arena<K> {
        &mut self.arena
    }
}

impl<'a, K, S> IntoIterator for &'a Tree<K, S>
where
    K: Ord,
    S: Balance,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

/// Statistics on [`Tree`]. Serves two purpose:
///
/// * To get partial but quick statistics via [`Tree::stats`] method.
/// * To get full statisics via [`Tree::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`Tree`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return approximate node-size. Node overhead is constant, the
    /// node size varies with the key type.
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return black-height of the root, for red-black trees that
    /// passed validation.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}
