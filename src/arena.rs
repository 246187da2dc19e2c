use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Error;

/// Arena slot of the sentinel `T.nil`. Every absent child, and the
/// root's parent, point here.
pub(crate) const NIL: usize = 0;

static TREE_IDS: AtomicU64 = AtomicU64::new(1);

/// Node color, only meaningful for red-black trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Handle to a node linked into a tree. Handles are cheap to copy and
/// are invalidated when their node is deleted, any later use of a
/// stale handle is rejected with [`Error::InvalidNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    tree: u64,
    index: usize,
    generation: u32,
}

impl NodeRef {
    #[cfg(test)]
    pub(crate) fn slot(&self) -> usize {
        self.index
    }
}

#[derive(Clone)]
struct Node<K> {
    key: Option<K>, // None for the sentinel and for free slots.
    left: usize,
    right: usize,
    p: usize,
    color: Color,
    generation: u32,
}

impl<K> Node<K> {
    fn sentinel() -> Node<K> {
        Node {
            key: None,
            left: NIL,
            right: NIL,
            p: NIL,
            color: Color::Black,
            generation: 0,
        }
    }
}

/// Arena owns every node of a tree, along with the root link. Slot
/// [`NIL`] is the sentinel, its left, right and parent fields point to
/// itself until a red-black transplant assigns its parent.
pub struct Arena<K> {
    tree: u64,
    nodes: Vec<Node<K>>,
    free: Vec<usize>,
    root: usize,
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Arena<K> {
        Arena {
            tree: TREE_IDS.fetch_add(1, Ordering::Relaxed),
            nodes: vec![Node::sentinel()],
            free: vec![],
            root: NIL,
        }
    }

    /// Allocate a detached node for `key`, children and parent set to
    /// the sentinel.
    pub(crate) fn alloc(&mut self, key: K) -> usize {
        match self.free.pop() {
            Some(z) => {
                let node = &mut self.nodes[z];
                node.key = Some(key);
                node.color = Color::Black;
                z
            }
            None => {
                let mut node = Node::sentinel();
                node.key = Some(key);
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Release an unlinked node and return its key. Outstanding handles
    /// to `z` go stale.
    pub(crate) fn free(&mut self, z: usize) -> K {
        let node = &mut self.nodes[z];
        let key = match node.key.take() {
            Some(key) => key,
            None => panic!("free(): slot {} is not a live node, call the programmer", z),
        };
        node.generation = node.generation.wrapping_add(1);
        node.left = NIL;
        node.right = NIL;
        node.p = NIL;
        self.free.push(z);
        key
    }

    /// Number of live nodes held by this arena.
    pub(crate) fn live(&self) -> usize {
        self.nodes.len() - 1 - self.free.len()
    }

    pub(crate) fn handle(&self, x: usize) -> NodeRef {
        NodeRef {
            tree: self.tree,
            index: x,
            generation: self.nodes[x].generation,
        }
    }

    /// Same as [`Arena::handle`], mapping the sentinel to `None`.
    pub(crate) fn to_ref(&self, x: usize) -> Option<NodeRef> {
        if x == NIL {
            None
        } else {
            Some(self.handle(x))
        }
    }

    /// Check that `node` refers to a live node of this arena and
    /// return its slot.
    pub(crate) fn resolve<E>(&self, node: NodeRef) -> Result<usize, Error<E>> {
        let ok = node.tree == self.tree && node.index != NIL;
        let ok = ok
            && self.nodes.get(node.index).map_or(false, |n| {
                n.key.is_some() && n.generation == node.generation
            });
        if ok {
            Ok(node.index)
        } else {
            log::debug!("rejecting handle {:?}", node);
            Err(Error::InvalidNode)
        }
    }

    #[inline]
    pub(crate) fn is_nil(&self, x: usize) -> bool {
        x == NIL
    }

    #[inline]
    pub(crate) fn root(&self) -> usize {
        self.root
    }

    #[inline]
    pub(crate) fn set_root(&mut self, x: usize) {
        self.root = x
    }

    #[inline]
    pub(crate) fn key(&self, x: usize) -> &K {
        match &self.nodes[x].key {
            Some(key) => key,
            None => panic!("key(): slot {} has no key, call the programmer", x),
        }
    }

    #[inline]
    pub(crate) fn left(&self, x: usize) -> usize {
        self.nodes[x].left
    }

    #[inline]
    pub(crate) fn right(&self, x: usize) -> usize {
        self.nodes[x].right
    }

    #[inline]
    pub(crate) fn p(&self, x: usize) -> usize {
        self.nodes[x].p
    }

    #[inline]
    pub(crate) fn color(&self, x: usize) -> Color {
        self.nodes[x].color
    }

    #[inline]
    pub(crate) fn is_red(&self, x: usize) -> bool {
        self.nodes[x].color == Color::Red
    }

    #[inline]
    pub(crate) fn is_black(&self, x: usize) -> bool {
        self.nodes[x].color == Color::Black
    }

    #[inline]
    pub(crate) fn set_left(&mut self, x: usize, y: usize) {
        self.nodes[x].left = y
    }

    #[inline]
    pub(crate) fn set_right(&mut self, x: usize, y: usize) {
        self.nodes[x].right = y
    }

    #[inline]
    pub(crate) fn set_p(&mut self, x: usize, y: usize) {
        self.nodes[x].p = y
    }

    #[inline]
    pub(crate) fn set_color(&mut self, x: usize, color: Color) {
        self.nodes[x].color = color
    }

    /// TREE-MINIMUM, for the subtree rooted at `x`.
    pub(crate) fn minimum(&self, mut x: usize) -> usize {
        while !self.is_nil(self.left(x)) {
            x = self.left(x);
        }
        x
    }

    /// TREE-MAXIMUM, for the subtree rooted at `x`.
    pub(crate) fn maximum(&self, mut x: usize) -> usize {
        while !self.is_nil(self.right(x)) {
            x = self.right(x);
        }
        x
    }
}

// A cloned arena is a different tree, handles into the original
// are not valid for the clone.
impl<K> Clone for Arena<K>
where
    K: Clone,
{
    fn clone(&self) -> Arena<K> {
        Arena {
            tree: TREE_IDS.fetch_add(1, Ordering::Relaxed),
            nodes: self.nodes.clone(),
            free: self.free.clone(),
            root: self.root,
        }
    }
}
