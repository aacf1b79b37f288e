//! Link-only rotations.
//!
//! Rotations move links, back-references and child tags, and re-point the
//! rotated subtree's slot in its parent (or the root). Balance factors are
//! left to the caller: insert and delete assign them differently.

use crate::types::{ChildTag, TreeLinks};
use crate::util::{attach, get_l, get_p, get_r, get_tag, set_l, set_p, set_r, set_tag};

/// Left rotation at `a`; its right child `b` takes `a`'s place.
///
/// ```text
///   a                b
///    \              / \
///     b      →     a   c
///    / \            \
///   m   c            m
/// ```
///
/// Returns the new subtree top. A node without a right child is left as is.
pub(crate) fn rotate_left<N: TreeLinks>(arena: &mut [N], root: &mut Option<u32>, a: u32) -> u32 {
    let Some(b) = get_r(arena, a) else {
        return a;
    };
    let parent = get_p(arena, a);
    let tag = get_tag(arena, a);
    let m = get_l(arena, b);

    set_r(arena, a, m);
    if let Some(m) = m {
        set_p(arena, m, Some(a));
        set_tag(arena, m, ChildTag::Right);
    }
    set_l(arena, b, Some(a));
    set_p(arena, a, Some(b));
    set_tag(arena, a, ChildTag::Left);
    set_p(arena, b, parent);
    set_tag(arena, b, tag);
    attach(arena, root, parent, tag, Some(b));
    b
}

/// Right rotation at `a`; its left child `b` takes `a`'s place.
///
/// ```text
///       a            b
///      /            / \
///     b      →     c   a
///    / \              /
///   c   m            m
/// ```
pub(crate) fn rotate_right<N: TreeLinks>(arena: &mut [N], root: &mut Option<u32>, a: u32) -> u32 {
    let Some(b) = get_l(arena, a) else {
        return a;
    };
    let parent = get_p(arena, a);
    let tag = get_tag(arena, a);
    let m = get_r(arena, b);

    set_l(arena, a, m);
    if let Some(m) = m {
        set_p(arena, m, Some(a));
        set_tag(arena, m, ChildTag::Left);
    }
    set_r(arena, b, Some(a));
    set_p(arena, a, Some(b));
    set_tag(arena, a, ChildTag::Right);
    set_p(arena, b, parent);
    set_tag(arena, b, tag);
    attach(arena, root, parent, tag, Some(b));
    b
}

/// Double rotation lifting the right child of `a`'s left child.
pub(crate) fn rotate_left_right<N: TreeLinks>(
    arena: &mut [N],
    root: &mut Option<u32>,
    a: u32,
) -> u32 {
    if let Some(b) = get_l(arena, a) {
        rotate_left(arena, root, b);
    }
    rotate_right(arena, root, a)
}

/// Double rotation lifting the left child of `a`'s right child.
pub(crate) fn rotate_right_left<N: TreeLinks>(
    arena: &mut [N],
    root: &mut Option<u32>,
    a: u32,
) -> u32 {
    if let Some(b) = get_r(arena, a) {
        rotate_right(arena, root, b);
    }
    rotate_left(arena, root, a)
}
