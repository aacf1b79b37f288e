//! Structural auditor.
//!
//! Re-derives every subtree height bottom-up and checks the stored
//! bookkeeping against it: child tags and parent back-references for every
//! tree, balance factors for AVL trees.

use std::ops::ControlFlow;

use crate::error::{BstError, Result};
use crate::node::ControlBlock;
use crate::tree::TreeDefinition;
use crate::types::{Side, TreeKind, TreeLinks};
use crate::walk::{walk, Order, WalkAction};

/// Summary of a clean audit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AuditReport {
    /// Nodes reachable from the root.
    pub nodes: usize,
    /// Levels on the longest root-to-leaf path; 0 for an empty tree.
    pub height: usize,
}

struct HeightCheck<'a> {
    arena: &'a [ControlBlock],
    kind: TreeKind,
    heights: Vec<usize>,
    nodes: usize,
}

impl HeightCheck<'_> {
    fn child_height(&self, parent: u32, side: Side) -> Result<usize> {
        let Some(c) = self.arena[parent as usize].child(side) else {
            return Ok(0);
        };
        let cb = &self.arena[c as usize];
        if cb.p != Some(parent) || cb.tag != side.tag() {
            return Err(BstError::CorruptedTag { node: c });
        }
        Ok(self.heights[c as usize])
    }
}

impl WalkAction for HeightCheck<'_> {
    fn act(&mut self, idx: u32, _depth: usize) -> Result<ControlFlow<()>> {
        let lh = self.child_height(idx, Side::Left)?;
        let rh = self.child_height(idx, Side::Right)?;
        if self.kind == TreeKind::Avl {
            let stored = self.arena[idx as usize].bf;
            let measured = lh as i64 - rh as i64;
            if measured != i64::from(stored) || measured.abs() > 1 {
                return Err(BstError::OutOfBalance {
                    node: idx,
                    stored,
                    measured,
                });
            }
        }
        self.heights[idx as usize] = 1 + lh.max(rh);
        self.nodes += 1;
        Ok(ControlFlow::Continue(()))
    }
}

/// Audits `tree`, failing with [`BstError::CorruptedTag`] or
/// [`BstError::OutOfBalance`] at the first inconsistency found.
pub(crate) fn audit(tree: &TreeDefinition) -> Result<AuditReport> {
    if !tree.root_tag_ok() {
        return Err(BstError::CorruptedTag {
            node: tree.root.unwrap_or_default(),
        });
    }
    let mut check = HeightCheck {
        arena: &tree.arena,
        kind: tree.kind,
        heights: vec![0; tree.arena.len()],
        nodes: 0,
    };
    walk(&tree.arena, tree.root, Order::Post, &mut check)?;

    // Nodes left unvisited are not linked into the tree.
    if let Some(stray) = check.heights.iter().position(|&h| h == 0) {
        return Err(BstError::CorruptedTag { node: stray as u32 });
    }
    Ok(AuditReport {
        nodes: check.nodes,
        height: tree.root.map_or(0, |r| check.heights[r as usize]),
    })
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::avl::{link, locate};
    use crate::node::TreeId;
    use crate::types::ChildTag;

    fn tree(kind: TreeKind, keys: &[u8]) -> TreeDefinition {
        let mut t = TreeDefinition::new(
            "audit".into(),
            kind,
            TreeId { epoch: 0, seq: 5 },
            1,
            Rc::new(|a: &[u8], b: &[u8]| a[0] as i32 - b[0] as i32),
            None,
            false,
            4,
        );
        for &k in keys {
            let loc = locate(&t.arena, &t.payloads, t.root, &[k], &t.comparator);
            let n = t.push(vec![k].into_boxed_slice());
            link(
                &mut t.arena,
                &t.payloads,
                &mut t.root,
                t.kind,
                n,
                loc,
                &t.comparator,
            );
        }
        t
    }

    #[test]
    fn clean_trees_report_height() {
        let t = tree(TreeKind::Avl, &[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(audit(&t), Ok(AuditReport { nodes: 7, height: 3 }));

        let t = tree(TreeKind::Bst, &[1, 2, 3, 4]);
        assert_eq!(audit(&t), Ok(AuditReport { nodes: 4, height: 4 }));

        let t = tree(TreeKind::Avl, &[]);
        assert_eq!(audit(&t), Ok(AuditReport::default()));
    }

    #[test]
    fn stale_balance_factor() {
        let mut t = tree(TreeKind::Avl, &[2, 1, 3]);
        let root = t.root.unwrap();
        t.arena[root as usize].bf = 1;
        assert_eq!(
            audit(&t),
            Err(BstError::OutOfBalance {
                node: root,
                stored: 1,
                measured: 0
            })
        );
    }

    #[test]
    fn broken_back_reference() {
        let mut t = tree(TreeKind::Avl, &[2, 1, 3]);
        let root = t.root.unwrap();
        let left = t.arena[root as usize].l.unwrap();
        t.arena[left as usize].tag = ChildTag::Right;
        assert!(matches!(audit(&t), Err(BstError::CorruptedTag { .. })));
    }

    #[test]
    fn root_must_carry_root_tag() {
        let mut t = tree(TreeKind::Bst, &[1]);
        t.arena[0].tag = ChildTag::Left;
        assert_eq!(audit(&t), Err(BstError::CorruptedTag { node: 0 }));
    }
}
