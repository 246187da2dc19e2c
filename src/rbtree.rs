use log::trace;

use crate::arena::{Arena, Color, NodeRef, NIL};
use crate::error::Error;
use crate::tree::{Balance, Tree};

/// Red-black strategy. Every node is colored red or black, and insert
/// and delete recolor and rotate nodes so that:
///
/// * The root and the sentinel are black.
/// * A red node has only black children.
/// * Every path from a node to a descendant sentinel has the same
///   number of black nodes.
///
/// Which keeps tree height within `2 * lg(n + 1)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RedBlack;

impl Balance for RedBlack {
    const COLORED: bool = true;

    // RB-INSERT
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
            arena.set_root(z);
        } else if arena.key(z) < arena.key(y) {
            arena.set_left(y, z);
        } else {
            arena.set_right(y, z);
        }
        arena.set_left(z, NIL);
        arena.set_right(z, NIL);
        arena.set_color(z, Color::Red);
        insert_fixup(arena, z);
    }

    // RB-TRANSPLANT, unlike TRANSPLANT this assigns v.p even when v is
    // the sentinel, delete_fixup climbs from there.
    fn transplant<K>(arena: &mut Arena<K>, u: usize, v: usize) {
        let up = arena.p(u);
        if arena.is_nil(up) {
            arena.set_root(v);
        } else if u == arena.left(up) {
            arena.set_left(up, v);
        } else {
            arena.set_right(up, v);
        }
        arena.set_p(v, up);
    }

    // RB-DELETE
    fn delete<K: Ord>(arena: &mut Arena<K>, z: usize) {
        let (zl, zr) = (arena.left(z), arena.right(z));
        let (y_original_color, x) = if arena.is_nil(zl) {
            Self::transplant(arena, z, zr);
            (arena.color(z), zr)
        } else if arena.is_nil(zr) {
            Self::transplant(arena, z, zl);
            (arena.color(z), zl)
        } else {
            let y = arena.minimum(zr);
            let y_original_color = arena.color(y);
            let x = arena.right(y);
            if arena.p(y) == z {
                arena.set_p(x, y);
            } else {
                Self::transplant(arena, y, x);
                arena.set_right(y, zr);
                arena.set_p(zr, y);
            }
            Self::transplant(arena, z, y);
            arena.set_left(y, zl);
            arena.set_p(zl, y);
            arena.set_color(y, arena.color(z));
            (y_original_color, x)
        };
        if y_original_color == Color::Black {
            delete_fixup(arena, x);
        }
    }
}

// RB-INSERT-FIXUP, z is red, loop while its parent is red too.
fn insert_fixup<K>(arena: &mut Arena<K>, mut z: usize) {
    while arena.is_red(arena.p(z)) {
        z = insert_fixup_step(arena, z);
    }
    let root = arena.root();
    arena.set_color(root, Color::Black);
}

// one pass of the RB-INSERT-FIXUP loop, z's parent is red. Return the
// node the loop continues from.
pub(crate) fn insert_fixup_step<K>(arena: &mut Arena<K>, mut z: usize) -> usize {
    let p = arena.p(z);
    let g = arena.p(p);
    if p == arena.left(g) {
        let y = arena.right(g);
        if arena.is_red(y) {
            trace!("insert_fixup: case 1 at {}", z);
            arena.set_color(p, Color::Black);
            arena.set_color(y, Color::Black);
            arena.set_color(g, Color::Red);
            z = g;
        } else {
            if z == arena.right(p) {
                trace!("insert_fixup: case 2 at {}", z);
                z = p;
                left_rotate(arena, z);
            }
            trace!("insert_fixup: case 3 at {}", z);
            let p = arena.p(z);
            let g = arena.p(p);
            arena.set_color(p, Color::Black);
            arena.set_color(g, Color::Red);
            right_rotate(arena, g);
        }
    } else {
        let y = arena.left(g);
        if arena.is_red(y) {
            trace!("insert_fixup: case 1 at {}", z);
            arena.set_color(p, Color::Black);
            arena.set_color(y, Color::Black);
            arena.set_color(g, Color::Red);
            z = g;
        } else {
            if z == arena.left(p) {
                trace!("insert_fixup: case 2 at {}", z);
                z = p;
                right_rotate(arena, z);
            }
            trace!("insert_fixup: case 3 at {}", z);
            let p = arena.p(z);
            let g = arena.p(p);
            arena.set_color(p, Color::Black);
            arena.set_color(g, Color::Red);
            left_rotate(arena, g);
        }
    }
    z
}

// RB-DELETE-FIXUP, x carries an extra black, push it up until it lands
// on a red node or the root.
fn delete_fixup<K>(arena: &mut Arena<K>, mut x: usize) {
    while x != arena.root() && arena.is_black(x) {
        let xp = arena.p(x);
        if x == arena.left(xp) {
            let mut w = arena.right(xp);
            if arena.is_red(w) {
                trace!("delete_fixup: case 1 at {}", xp);
                arena.set_color(w, Color::Black);
                arena.set_color(xp, Color::Red);
                left_rotate(arena, xp);
                w = arena.right(xp);
            }
            let (wl, wr) = (arena.left(w), arena.right(w));
            if arena.is_black(wl) && arena.is_black(wr) {
                trace!("delete_fixup: case 2 at {}", xp);
                arena.set_color(w, Color::Red);
                x = xp;
            } else {
                if arena.is_black(wr) {
                    trace!("delete_fixup: case 3 at {}", xp);
                    arena.set_color(wl, Color::Black);
                    arena.set_color(w, Color::Red);
                    right_rotate(arena, w);
                    w = arena.right(xp);
                }
                trace!("delete_fixup: case 4 at {}", xp);
                arena.set_color(w, arena.color(xp));
                arena.set_color(xp, Color::Black);
                let wr = arena.right(w);
                arena.set_color(wr, Color::Black);
                left_rotate(arena, xp);
                x = arena.root();
            }
        } else {
            let mut w = arena.left(xp);
            if arena.is_red(w) {
                trace!("delete_fixup: case 1 at {}", xp);
                arena.set_color(w, Color::Black);
                arena.set_color(xp, Color::Red);
                right_rotate(arena, xp);
                w = arena.left(xp);
            }
            let (wl, wr) = (arena.left(w), arena.right(w));
            if arena.is_black(wr) && arena.is_black(wl) {
                trace!("delete_fixup: case 2 at {}", xp);
                arena.set_color(w, Color::Red);
                x = xp;
            } else {
                if arena.is_black(wl) {
                    trace!("delete_fixup: case 3 at {}", xp);
                    arena.set_color(wr, Color::Black);
                    arena.set_color(w, Color::Red);
                    left_rotate(arena, w);
                    w = arena.left(xp);
                }
                trace!("delete_fixup: case 4 at {}", xp);
                arena.set_color(w, arena.color(xp));
                arena.set_color(xp, Color::Black);
                let wl = arena.left(w);
                arena.set_color(wl, Color::Black);
                right_rotate(arena, xp);
                x = arena.root();
            }
        }
    }
    arena.set_color(x, Color::Black);
}

//              (p)                       (p)
//               |                         |
//               x                         y
//              / \                       / \
//             a   y         =>          x   c
//                / \                   / \
//               b   c                 a   b
//
pub(crate) fn left_rotate<K>(arena: &mut Arena<K>, x: usize) {
    let y = arena.right(x);
    if arena.is_nil(y) {
        panic!("left_rotate(): right child is nil, call the programmer");
    }
    let b = arena.left(y);
    arena.set_right(x, b);
    if !arena.is_nil(b) {
        arena.set_p(b, x);
    }
    let xp = arena.p(x);
    arena.set_p(y, xp);
    if arena.is_nil(xp) {
        arena.set_root(y);
    } else if x == arena.left(xp) {
        arena.set_left(xp, y);
    } else {
        arena.set_right(xp, y);
    }
    arena.set_left(y, x);
    arena.set_p(x, y);
}

//              (p)                       (p)
//               |                         |
//               x                         y
//              / \                       / \
//             y   c         =>          a   x
//            / \                           / \
//           a   b                         b   c
//
pub(crate) fn right_rotate<K>(arena: &mut Arena<K>, x: usize) {
    let y = arena.left(x);
    if arena.is_nil(y) {
        panic!("right_rotate(): left child is nil, call the programmer");
    }
    let b = arena.right(y);
    arena.set_left(x, b);
    if !arena.is_nil(b) {
        arena.set_p(b, x);
    }
    let xp = arena.p(x);
    arena.set_p(y, xp);
    if arena.is_nil(xp) {
        arena.set_root(y);
    } else if x == arena.right(xp) {
        arena.set_right(xp, y);
    } else {
        arena.set_left(xp, y);
    }
    arena.set_right(y, x);
    arena.set_p(x, y);
}

// count black nodes down the left spine below `x`, plus one for nil.
fn black_height_at<K>(arena: &Arena<K>, mut x: usize) -> usize {
    let mut black_height = 0;
    while !arena.is_nil(arena.left(x)) {
        x = arena.left(x);
        if arena.is_black(x) {
            black_height += 1;
        }
    }
    black_height + 1
}

/// Red-black specific queries.
impl<K> Tree<K, RedBlack>
where
    K: Ord,
{
    /// Return the color of node `x`.
    pub fn color(&self, x: NodeRef) -> Result<Color, Error<K>> {
        let x = self.arena().resolve(x)?;
        Ok(self.arena().color(x))
    }

    /// Return the black-height of the tree, that is of its root. An
    /// empty tree has black-height zero.
    pub fn black_height(&self) -> usize {
        match self.arena().root() {
            NIL => 0,
            root => black_height_at(self.arena(), root),
        }
    }

    /// Return the black-height of node `x`, number of black nodes on
    /// any path from, but not including, `x` down to a leaf.
    pub fn black_height_of(&self, x: NodeRef) -> Result<usize, Error<K>> {
        let x = self.arena().resolve(x)?;
        Ok(black_height_at(self.arena(), x))
    }
}
