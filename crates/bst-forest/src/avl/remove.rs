//! Node removal and the post-delete rebalancer.

use crate::types::{ChildTag, TreeKind, TreeLinks};
use crate::util::{
    attach, get_bf, get_l, get_p, get_r, get_tag, last, set_bf, set_l, set_p, set_r, set_tag,
};

use super::rotate::{rotate_left, rotate_left_right, rotate_right, rotate_right_left};

/// Unlinks the record held by node `p` and returns the index of the node
/// that was physically detached.
///
/// When `p` has two children, its in-order predecessor `v` is detached
/// instead and the two records swap places; the returned index then holds
/// `p`'s record. The detached node's links are cleared.
pub(crate) fn unlink<N: TreeLinks>(
    arena: &mut [N],
    payloads: &mut [Box<[u8]>],
    root: &mut Option<u32>,
    kind: TreeKind,
    p: u32,
) -> u32 {
    let dp = match (get_l(arena, p), get_r(arena, p)) {
        (Some(l), Some(_)) => {
            let v = last(arena, Some(l)).unwrap_or(l);
            payloads.swap(p as usize, v as usize);
            v
        }
        _ => p,
    };

    let parent = get_p(arena, dp);
    let tag = get_tag(arena, dp);
    let child = get_l(arena, dp).or(get_r(arena, dp));
    if let Some(c) = child {
        set_p(arena, c, parent);
        set_tag(arena, c, tag);
    }
    attach(arena, root, parent, tag, child);

    if kind == TreeKind::Avl {
        rebalance_after_remove(arena, root, parent, tag);
    }

    set_p(arena, dp, None);
    set_l(arena, dp, None);
    set_r(arena, dp, None);
    set_bf(arena, dp, 0);
    set_tag(arena, dp, ChildTag::Root);
    dp
}

/// Walks up from `node`, whose `side` subtree just lost one level, until a
/// subtree keeps its height or the root is passed.
pub(crate) fn rebalance_after_remove<N: TreeLinks>(
    arena: &mut [N],
    root: &mut Option<u32>,
    mut node: Option<u32>,
    mut side: ChildTag,
) {
    while let Some(q) = node {
        let (top, shorter) = match side {
            ChildTag::Left => shrink_left(arena, root, q),
            ChildTag::Right => shrink_right(arena, root, q),
            ChildTag::Root => break,
        };
        if !shorter {
            break;
        }
        side = get_tag(arena, top);
        node = get_p(arena, top);
    }
}

/// `p`'s left subtree got one level shorter. Returns the new top of `p`'s
/// subtree and whether that subtree got shorter as a whole.
fn shrink_left<N: TreeLinks>(arena: &mut [N], root: &mut Option<u32>, p: u32) -> (u32, bool) {
    match get_bf(arena, p) {
        1 => {
            set_bf(arena, p, 0);
            (p, true)
        }
        0 => {
            set_bf(arena, p, -1);
            (p, false)
        }
        _ => {
            let Some(p1) = get_r(arena, p) else {
                return (p, false);
            };
            let b1 = get_bf(arena, p1);
            if b1 <= 0 {
                tracing::trace!(p, p1, "RR rotation on delete");
                rotate_left(arena, root, p);
                if b1 == 0 {
                    set_bf(arena, p, -1);
                    set_bf(arena, p1, 1);
                    (p1, false)
                } else {
                    set_bf(arena, p, 0);
                    set_bf(arena, p1, 0);
                    (p1, true)
                }
            } else {
                let Some(p2) = get_l(arena, p1) else {
                    return (p, false);
                };
                let b2 = get_bf(arena, p2);
                tracing::trace!(p, p1, p2, "RL rotation on delete");
                rotate_right_left(arena, root, p);
                set_bf(arena, p, if b2 == -1 { 1 } else { 0 });
                set_bf(arena, p1, if b2 == 1 { -1 } else { 0 });
                set_bf(arena, p2, 0);
                (p2, true)
            }
        }
    }
}

/// Mirror of [`shrink_left`].
fn shrink_right<N: TreeLinks>(arena: &mut [N], root: &mut Option<u32>, p: u32) -> (u32, bool) {
    match get_bf(arena, p) {
        -1 => {
            set_bf(arena, p, 0);
            (p, true)
        }
        0 => {
            set_bf(arena, p, 1);
            (p, false)
        }
        _ => {
            let Some(p1) = get_l(arena, p) else {
                return (p, false);
            };
            let b1 = get_bf(arena, p1);
            if b1 >= 0 {
                tracing::trace!(p, p1, "LL rotation on delete");
                rotate_right(arena, root, p);
                if b1 == 0 {
                    set_bf(arena, p, 1);
                    set_bf(arena, p1, -1);
                    (p1, false)
                } else {
                    set_bf(arena, p, 0);
                    set_bf(arena, p1, 0);
                    (p1, true)
                }
            } else {
                let Some(p2) = get_r(arena, p1) else {
                    return (p, false);
                };
                let b2 = get_bf(arena, p2);
                tracing::trace!(p, p1, p2, "LR rotation on delete");
                rotate_left_right(arena, root, p);
                set_bf(arena, p, if b2 == 1 { -1 } else { 0 });
                set_bf(arena, p1, if b2 == -1 { 1 } else { 0 });
                set_bf(arena, p2, 0);
                (p2, true)
            }
        }
    }
}
