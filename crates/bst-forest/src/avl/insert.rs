//! Search with insertion bookkeeping, linking, and the post-insert
//! rebalancer.

use crate::types::{ChildTag, Comparator, TreeKind, TreeLinks};
use crate::util::{get_bf, get_l, get_r, set_bf, set_l, set_p, set_r, set_tag};

use super::rotate::{rotate_left, rotate_left_right, rotate_right, rotate_right_left};

/// Outcome of [`locate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Located {
    /// Node holding a key equal to the search key.
    pub found: Option<u32>,
    /// Deepest node on the search path with a non-zero balance factor, or
    /// the root when there is none.
    pub ancestor: Option<u32>,
    /// Parent of `ancestor`.
    pub ancestor_parent: Option<u32>,
    /// Last node visited; the parent for a new node when `found` is `None`.
    pub parent: Option<u32>,
}

/// Walks from `root` towards `key`, recording where an insertion would
/// attach and which ancestor might need a rotation afterwards.
pub(crate) fn locate<N: TreeLinks>(
    arena: &[N],
    payloads: &[Box<[u8]>],
    root: Option<u32>,
    key: &[u8],
    comparator: &Comparator,
) -> Located {
    let mut loc = Located {
        ancestor: root,
        ..Located::default()
    };
    let mut curr = root;
    while let Some(i) = curr {
        if get_bf(arena, i) != 0 {
            loc.ancestor = Some(i);
            loc.ancestor_parent = loc.parent;
        }
        let cmp = comparator(key, &payloads[i as usize]);
        if cmp == 0 {
            loc.found = Some(i);
            return loc;
        }
        loc.parent = Some(i);
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    loc
}

/// Links the detached node `n` below `loc.parent` and, for AVL trees,
/// restores the balance invariant.
///
/// `loc` must come from [`locate`] on the same tree with `n`'s key, with no
/// mutation in between, and must not have found an equal key.
pub(crate) fn link<N: TreeLinks>(
    arena: &mut [N],
    payloads: &[Box<[u8]>],
    root: &mut Option<u32>,
    kind: TreeKind,
    n: u32,
    loc: Located,
    comparator: &Comparator,
) {
    let key = &payloads[n as usize];
    let Some(q) = loc.parent else {
        *root = Some(n);
        set_p(arena, n, None);
        set_tag(arena, n, ChildTag::Root);
        set_bf(arena, n, 0);
        return;
    };

    set_p(arena, n, Some(q));
    if comparator(key, &payloads[q as usize]) < 0 {
        set_l(arena, q, Some(n));
        set_tag(arena, n, ChildTag::Left);
    } else {
        set_r(arena, q, Some(n));
        set_tag(arena, n, ChildTag::Right);
    }

    if kind == TreeKind::Bst {
        return;
    }
    let Some(a) = loc.ancestor else {
        return;
    };

    // Which side of `a` took the new node; the path below `a` down to the
    // new node was balanced and now leans towards it.
    let (b, d) = if comparator(key, &payloads[a as usize]) > 0 {
        (get_r(arena, a), -1i8)
    } else {
        (get_l(arena, a), 1i8)
    };
    let mut p = b;
    while let Some(i) = p {
        if i == n {
            break;
        }
        if comparator(key, &payloads[i as usize]) < 0 {
            set_bf(arena, i, 1);
            p = get_l(arena, i);
        } else {
            set_bf(arena, i, -1);
            p = get_r(arena, i);
        }
    }

    let abf = get_bf(arena, a);
    if abf == 0 {
        set_bf(arena, a, d);
        return;
    }
    if abf + d == 0 {
        set_bf(arena, a, 0);
        return;
    }
    if let Some(b) = b {
        rebalance_after_insert(arena, root, a, loc.ancestor_parent, b, d);
    }
}

/// Single or double rotation at `a`, whose subtree leans by two towards
/// `d` (`+1` left, `-1` right). `b` is `a`'s child on that side and `f` is
/// `a`'s parent. One rotation always restores the whole tree.
pub(crate) fn rebalance_after_insert<N: TreeLinks>(
    arena: &mut [N],
    root: &mut Option<u32>,
    a: u32,
    f: Option<u32>,
    b: u32,
    d: i8,
) -> u32 {
    let top = if d > 0 {
        if get_bf(arena, b) == 1 {
            tracing::trace!(a, b, "LL rotation");
            let top = rotate_right(arena, root, a);
            set_bf(arena, a, 0);
            set_bf(arena, b, 0);
            top
        } else {
            let Some(c) = get_r(arena, b) else {
                return a;
            };
            tracing::trace!(a, b, c, "LR rotation");
            let (abf, bbf) = match get_bf(arena, c) {
                1 => (-1, 0),
                0 => (0, 0),
                _ => (0, 1),
            };
            let top = rotate_left_right(arena, root, a);
            set_bf(arena, a, abf);
            set_bf(arena, b, bbf);
            set_bf(arena, c, 0);
            top
        }
    } else if get_bf(arena, b) == -1 {
        tracing::trace!(a, b, "RR rotation");
        let top = rotate_left(arena, root, a);
        set_bf(arena, a, 0);
        set_bf(arena, b, 0);
        top
    } else {
        let Some(c) = get_l(arena, b) else {
            return a;
        };
        tracing::trace!(a, b, c, "RL rotation");
        let (abf, bbf) = match get_bf(arena, c) {
            1 => (0, -1),
            0 => (0, 0),
            _ => (1, 0),
        };
        let top = rotate_right_left(arena, root, a);
        set_bf(arena, a, abf);
        set_bf(arena, b, bbf);
        set_bf(arena, c, 0);
        top
    };
    debug_assert_eq!(arena[top as usize].p(), f);
    top
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::node::{ControlBlock, TreeId};
    use crate::util::{first, next};

    const OWNER: TreeId = TreeId { epoch: 0, seq: 2 };

    struct Fixture {
        arena: Vec<ControlBlock>,
        payloads: Vec<Box<[u8]>>,
        root: Option<u32>,
        cmp: Comparator,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                arena: Vec::new(),
                payloads: Vec::new(),
                root: None,
                cmp: Rc::new(|a: &[u8], b: &[u8]| a[0] as i32 - b[0] as i32),
            }
        }

        fn put(&mut self, kind: TreeKind, k: u8) -> bool {
            let loc = locate(&self.arena, &self.payloads, self.root, &[k], &self.cmp);
            if loc.found.is_some() {
                return false;
            }
            self.arena.push(ControlBlock::new(OWNER));
            self.payloads.push(vec![k].into_boxed_slice());
            let n = (self.arena.len() - 1) as u32;
            link(
                &mut self.arena,
                &self.payloads,
                &mut self.root,
                kind,
                n,
                loc,
                &self.cmp,
            );
            true
        }

        fn keys(&self) -> Vec<u8> {
            let mut out = Vec::new();
            let mut curr = first(&self.arena, self.root);
            while let Some(i) = curr {
                out.push(self.payloads[i as usize][0]);
                curr = next(&self.arena, i);
            }
            out
        }

        fn key(&self, idx: Option<u32>) -> Option<u8> {
            idx.map(|i| self.payloads[i as usize][0])
        }
    }

    #[test]
    fn ascending_inserts_trigger_rr() {
        let mut f = Fixture::new();
        for k in [1, 2, 3] {
            assert!(f.put(TreeKind::Avl, k));
        }
        assert_eq!(f.key(f.root), Some(2));
        assert!(f.arena.iter().all(|n| n.bf == 0));
        assert_eq!(f.keys(), vec![1, 2, 3]);
    }

    #[test]
    fn zig_zag_triggers_lr() {
        let mut f = Fixture::new();
        for k in [30, 10, 20] {
            f.put(TreeKind::Avl, k);
        }
        let root = f.root.unwrap();
        assert_eq!(f.key(Some(root)), Some(20));
        assert_eq!(f.key(f.arena[root as usize].l), Some(10));
        assert_eq!(f.key(f.arena[root as usize].r), Some(30));
        assert_eq!(f.arena[root as usize].tag, ChildTag::Root);
    }

    #[test]
    fn lr_subcases_assign_balance_factors() {
        // 50 / (20, 60) / 20 -> (10, 30); inserting 25 makes 30 lean left
        let mut f = Fixture::new();
        for k in [50, 20, 60, 10, 30, 25] {
            f.put(TreeKind::Avl, k);
        }
        let root = f.root.unwrap();
        assert_eq!(f.key(Some(root)), Some(30));
        let l = f.arena[root as usize].l.unwrap();
        let r = f.arena[root as usize].r.unwrap();
        assert_eq!(f.key(Some(l)), Some(20));
        assert_eq!(f.key(Some(r)), Some(50));
        assert_eq!(f.arena[root as usize].bf, 0);
        assert_eq!(f.arena[l as usize].bf, 0);
        assert_eq!(f.arena[r as usize].bf, -1);
        assert_eq!(f.keys(), vec![10, 20, 25, 30, 50, 60]);
    }

    #[test]
    fn locate_reports_duplicates_and_ancestor() {
        let mut f = Fixture::new();
        for k in [5, 3, 8, 1] {
            f.put(TreeKind::Avl, k);
        }
        let loc = locate(&f.arena, &f.payloads, f.root, &[3], &f.cmp);
        assert_eq!(f.key(loc.found), Some(3));
        let loc = locate(&f.arena, &f.payloads, f.root, &[0], &f.cmp);
        assert_eq!(loc.found, None);
        assert_eq!(f.key(loc.parent), Some(1));
        assert_eq!(f.key(loc.ancestor), Some(3));
        assert_eq!(f.key(loc.ancestor_parent), Some(5));
    }

    #[test]
    fn plain_bst_never_rotates() {
        let mut f = Fixture::new();
        for k in 1..=5 {
            f.put(TreeKind::Bst, k);
        }
        assert_eq!(f.key(f.root), Some(1));
        assert!(f.arena.iter().all(|n| n.bf == 0 && n.l.is_none()));
        assert_eq!(f.keys(), vec![1, 2, 3, 4, 5]);
    }
}
