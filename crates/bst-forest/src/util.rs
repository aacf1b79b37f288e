//! Arena link helpers shared by the search, rebalancing and traversal code.
//!
//! Every "pointer" is an `Option<u32>` index into the arena slice; the
//! helpers below keep index arithmetic out of the algorithms.

use crate::types::{ChildTag, Comparator, TreeLinks};

#[inline]
pub(crate) fn get_p<N: TreeLinks>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: TreeLinks>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: TreeLinks>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn get_tag<N: TreeLinks>(arena: &[N], idx: u32) -> ChildTag {
    arena[idx as usize].tag()
}

#[inline]
pub(crate) fn get_bf<N: TreeLinks>(arena: &[N], idx: u32) -> i8 {
    arena[idx as usize].bf()
}

#[inline]
pub(crate) fn set_p<N: TreeLinks>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: TreeLinks>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: TreeLinks>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

#[inline]
pub(crate) fn set_tag<N: TreeLinks>(arena: &mut [N], idx: u32, tag: ChildTag) {
    arena[idx as usize].set_tag(tag);
}

#[inline]
pub(crate) fn set_bf<N: TreeLinks>(arena: &mut [N], idx: u32, bf: i8) {
    arena[idx as usize].set_bf(bf);
}

/// Stores `child` in the slot of `parent` selected by `tag`, or in `root`
/// when there is no parent.
pub(crate) fn attach<N: TreeLinks>(
    arena: &mut [N],
    root: &mut Option<u32>,
    parent: Option<u32>,
    tag: ChildTag,
    child: Option<u32>,
) {
    match (parent, tag) {
        (None, _) | (Some(_), ChildTag::Root) => *root = child,
        (Some(p), ChildTag::Left) => set_l(arena, p, child),
        (Some(p), ChildTag::Right) => set_r(arena, p, child),
    }
}

/// Leftmost node in the tree.
pub fn first<N: TreeLinks>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the tree.
pub fn last<N: TreeLinks>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: TreeLinks>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Ordered search for `key`. Does not record any insertion bookkeeping.
pub fn find<N: TreeLinks>(
    arena: &[N],
    payloads: &[Box<[u8]>],
    root: Option<u32>,
    key: &[u8],
    comparator: &Comparator,
) -> Option<u32> {
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, &payloads[i as usize]);
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}
