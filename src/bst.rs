use crate::arena::{Arena, NIL};
use crate::tree::Balance;

/// Plain binary search tree strategy, no rebalancing. Tree height is
/// only bound by the insertion order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbalanced;

impl Balance for Unbalanced {
    const COLORED: bool = false;

    // TREE-INSERT
    fn insert<K: Ord>(arena: &mut Arena<K>, z: usize) {
        let mut y = NIL;
        let mut x = arena.root();
        while !arena.is_nil(x) {
            y = x;
            x = if arena.key(z) < arena.key(x) {
                arena.left(x)
            } else {
                arena.right(x)
            };
        }
        arena.set_p(z, y);
        if arena.is_nil(y) {
            arena.set_root(z); // tree was empty
        } else if arena.key(z) < arena.key(y) {
            arena.set_left(y, z);
        } else {
            arena.set_right(y, z);
        }
    }

    // TRANSPLANT, the sentinel's parent is left untouched.
    fn transplant<K>(arena: &mut Arena<K>, u: usize, v: usize) {
        let up = arena.p(u);
        if arena.is_nil(up) {
            arena.set_root(v);
        } else if u == arena.left(up) {
            arena.set_left(up, v);
        } else {
            arena.set_right(up, v);
        }
        if !arena.is_nil(v) {
            arena.set_p(v, up);
        }
    }

    // TREE-DELETE
    fn delete<K: Ord>(arena: &mut Arena<K>, z: usize) {
        let (zl, zr) = (arena.left(z), arena.right(z));
        if arena.is_nil(zl) {
            Self::transplant(arena, z, zr);
        } else if arena.is_nil(zr) {
            Self::transplant(arena, z, zl);
        } else {
            let y = arena.minimum(zr);
            if arena.p(y) != z {
                let yr = arena.right(y);
                Self::transplant(arena, y, yr);
                arena.set_right(y, zr);
                arena.set_p(zr, y);
            }
            Self::transplant(arena, z, y);
            arena.set_left(y, zl);
            arena.set_p(zl, y);
        }
    }
}
