use crate::arena::{Arena, NIL};
use crate::stack::Stack;

/// Order in which a tree walk visits each node relative to its
/// subtrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// left subtree, node, right subtree. Yields keys in sort order.
    Inorder,
    /// node, left subtree, right subtree.
    Preorder,
    /// left subtree, right subtree, node.
    Postorder,
}

// Recursive tree walks, these are the reference definitions that the
// stack based iterators below must agree with.
pub(crate) fn walk<K, F>(arena: &Arena<K>, x: usize, order: Order, visit: &mut F)
where
    F: FnMut(&K),
{
    if arena.is_nil(x) {
        return;
    }
    let (left, right) = (arena.left(x), arena.right(x));
    match order {
        Order::Inorder => {
            walk(arena, left, order, visit);
            visit(arena.key(x));
            walk(arena, right, order, visit);
        }
        Order::Preorder => {
            visit(arena.key(x));
            walk(arena, left, order, visit);
            walk(arena, right, order, visit);
        }
        Order::Postorder => {
            walk(arena, left, order, visit);
            walk(arena, right, order, visit);
            visit(arena.key(x));
        }
    }
}

/// Inorder walk over a tree, yields keys in ascending order.
///
/// Each call to `Tree::iter` starts a fresh walk. The iterator
/// borrows the tree, so the tree can't be mutated mid-walk.
pub struct Iter<'a, K> {
    arena: &'a Arena<K>,
    stack: Stack<usize>,
    x: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(arena: &'a Arena<K>) -> Iter<'a, K> {
        Iter {
            arena,
            stack: Stack::new(),
            x: arena.root(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        // descend the left spine, saving nodes to visit on the way up.
        while !self.arena.is_nil(self.x) {
            self.stack.push_unbounded(self.x);
            self.x = self.arena.left(self.x);
        }
        let z = self.stack.pop().ok()?;
        self.x = self.arena.right(z);
        Some(self.arena.key(z))
    }
}

/// Preorder walk over a tree.
pub struct Preorder<'a, K> {
    arena: &'a Arena<K>,
    stack: Stack<usize>,
}

impl<'a, K> Preorder<'a, K> {
    pub(crate) fn new(arena: &'a Arena<K>) -> Preorder<'a, K> {
        let mut stack = Stack::new();
        stack.push_unbounded(arena.root());
        Preorder { arena, stack }
    }
}

impl<'a, K> Iterator for Preorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        while let Ok(z) = self.stack.pop() {
            if self.arena.is_nil(z) {
                continue;
            }
            // right goes first, so that left is popped first.
            self.stack.push_unbounded(self.arena.right(z));
            self.stack.push_unbounded(self.arena.left(z));
            return Some(self.arena.key(z));
        }
        None
    }
}

/// Postorder walk over a tree.
pub struct Postorder<'a, K> {
    arena: &'a Arena<K>,
    stack: Stack<(usize, bool)>, // (node, subtrees already pushed)
}

impl<'a, K> Postorder<'a, K> {
    pub(crate) fn new(arena: &'a Arena<K>) -> Postorder<'a, K> {
        let mut stack = Stack::new();
        stack.push_unbounded((arena.root(), false));
        Postorder { arena, stack }
    }
}

impl<'a, K> Iterator for Postorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        while let Ok((z, expanded)) = self.stack.pop() {
            if z == NIL {
                continue;
            } else if expanded {
                return Some(self.arena.key(z));
            }
            self.stack.push_unbounded((z, true));
            self.stack.push_unbounded((self.arena.right(z), false));
            self.stack.push_unbounded((self.arena.left(z), false));
        }
        None
    }
}
