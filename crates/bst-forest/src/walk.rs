//! Stackless traversal.
//!
//! The walker moves through a tree with nothing but the `l`/`r`/`p` links
//! and each node's [`ChildTag`]: it descends left as far as it can, crosses
//! into a right subtree when there is one, and otherwise climbs until it
//! arrives from a left child. It stops after climbing out of the root.
//!
//! ```text
//!          (pre)
//!            4
//!          /   \      descend left; on the way back up a node reached
//!         2     6     from its left child runs (in) and tries its right
//!        / \         child, a node reached from its right child runs
//!       1   3        (post) and keeps climbing
//! ```
//!
//! What happens at each node is supplied by a [`WalkAction`].

use std::ops::ControlFlow;

use crate::error::{BstError, Result};
use crate::types::{ChildTag, Side, TreeLinks};
use crate::util::{get_l, get_p, get_r, get_tag};

/// Point in a node's visit at which [`WalkAction::act`] runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Order {
    Pre,
    #[default]
    In,
    Post,
}

pub trait WalkAction {
    /// Runs once per node at the configured [`Order`]. `depth` is 0 at the
    /// root.
    fn act(&mut self, idx: u32, depth: usize) -> Result<ControlFlow<()>>;

    /// Called before the walker looks into the `side` child of the current
    /// node; it descends right after when `present`.
    fn branch(&mut self, _side: Side, _present: bool) -> Result<ControlFlow<()>> {
        Ok(ControlFlow::Continue(()))
    }

    /// Called every time the walker climbs one level.
    fn ascend(&mut self) {}
}

/// Walks the tree at `root`, returning `Ok(false)` when the action broke
/// off early.
///
/// A node whose tag disagrees with its parent's links fails with
/// [`BstError::CorruptedTag`].
pub fn walk<N, A>(arena: &[N], root: Option<u32>, order: Order, action: &mut A) -> Result<bool>
where
    N: TreeLinks,
    A: WalkAction + ?Sized,
{
    let Some(mut curr) = root else {
        return Ok(true);
    };
    let mut depth = 0usize;

    'descend: loop {
        loop {
            if order == Order::Pre && action.act(curr, depth)?.is_break() {
                return Ok(false);
            }
            let l = get_l(arena, curr);
            if action.branch(Side::Left, l.is_some())?.is_break() {
                return Ok(false);
            }
            match l {
                Some(l) => {
                    curr = l;
                    depth += 1;
                }
                None => break,
            }
        }

        'cross: loop {
            if order == Order::In && action.act(curr, depth)?.is_break() {
                return Ok(false);
            }
            let r = get_r(arena, curr);
            if action.branch(Side::Right, r.is_some())?.is_break() {
                return Ok(false);
            }
            if let Some(r) = r {
                curr = r;
                depth += 1;
                continue 'descend;
            }

            loop {
                if order == Order::Post && action.act(curr, depth)?.is_break() {
                    return Ok(false);
                }
                let tag = get_tag(arena, curr);
                let Some(p) = get_p(arena, curr) else {
                    return Ok(true);
                };
                let linked = match tag {
                    ChildTag::Left => get_l(arena, p),
                    ChildTag::Right => get_r(arena, p),
                    ChildTag::Root => None,
                };
                if linked != Some(curr) {
                    return Err(BstError::CorruptedTag { node: curr });
                }
                action.ascend();
                curr = p;
                depth = depth.saturating_sub(1);
                if tag == ChildTag::Left {
                    continue 'cross;
                }
            }
        }
    }
}
