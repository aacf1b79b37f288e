//! Record-level operations on named trees.

use crate::audit::{audit, AuditReport};
use crate::avl::{link, locate, unlink};
use crate::error::{BstError, ReleaseError, Result, NO_ERROR};
use crate::node::Node;
use crate::registry::{check_name, not_defined, Registry};
use crate::strategy::{ContainmentCheck, Duplicator, IdentityCheck, Visitor};
use crate::tree::TreeDefinition;
use crate::util::find;
use crate::walk::{walk, Order};

impl Registry {
    /// Whether `name` is registered. An unknown name is recorded as
    /// [`BstError::NotDefined`].
    pub fn is_defined(&mut self, name: &str) -> bool {
        self.tracked(|reg| reg.tree(name).map(|_| ())).is_ok()
    }

    pub fn is_empty(&mut self, name: &str) -> Result<bool> {
        self.tracked(|reg| Ok(reg.tree(name)?.is_empty()))
    }

    /// Number of records in `name`.
    pub fn count(&mut self, name: &str) -> Result<usize> {
        self.tracked(|reg| Ok(reg.tree(name)?.len()))
    }

    /// Number of released buffers `name` is holding for reuse.
    pub fn free_count(&mut self, name: &str) -> Result<usize> {
        self.tracked(|reg| Ok(reg.tree(name)?.free_count()))
    }

    /// Checks out a zero-filled record for the caller to fill in.
    pub fn allocate(&mut self, name: &str) -> Result<Node> {
        self.tracked(|reg| {
            let tree = reg.tree_mut(name)?;
            let buf = tree.free.obtain()?;
            Ok(Node::new(tree.id, buf))
        })
    }

    /// Stores a copy of `node`'s record. The caller keeps `node`.
    ///
    /// On a verifying tree a failed audit after the insert is recorded as
    /// the last error while the call itself still succeeds.
    pub fn insert(&mut self, name: &str, node: &Node) -> Result<()> {
        let flaw = self.tracked(|reg| {
            let tree = reg.tree_mut(name)?;
            check_owner(tree, node)?;
            let key = node.payload();
            let loc = locate(&tree.arena, &tree.payloads, tree.root, key, &tree.comparator);
            if loc.found.is_some() {
                return Err(BstError::DuplicateKey);
            }
            let buf = tree.free.obtain_copy(key)?;
            let n = tree.push(buf);
            link(
                &mut tree.arena,
                &tree.payloads,
                &mut tree.root,
                tree.kind,
                n,
                loc,
                &tree.comparator,
            );
            Ok(verify(tree, "insert"))
        })?;
        self.last_error = flaw;
        Ok(())
    }

    /// Returns a copy of the stored record comparing equal to `key`.
    pub fn lookup(&mut self, name: &str, key: &Node) -> Result<Node> {
        self.tracked(|reg| {
            let tree = reg.tree_mut(name)?;
            check_owner(tree, key)?;
            let idx = find(
                &tree.arena,
                &tree.payloads,
                tree.root,
                key.payload(),
                &tree.comparator,
            )
            .ok_or(BstError::KeyNotFound)?;
            let buf = tree.free.obtain_copy(&tree.payloads[idx as usize])?;
            Ok(Node::new(tree.id, buf))
        })
    }

    /// Deletes the stored record comparing equal to `key`. Audit failures
    /// on a verifying tree are recorded as for [`Registry::insert`].
    pub fn remove(&mut self, name: &str, key: &Node) -> Result<()> {
        let flaw = self.tracked(|reg| {
            let tree = reg.tree_mut(name)?;
            check_owner(tree, key)?;
            let idx = find(
                &tree.arena,
                &tree.payloads,
                tree.root,
                key.payload(),
                &tree.comparator,
            )
            .ok_or(BstError::KeyNotFound)?;
            let dp = unlink(
                &mut tree.arena,
                &mut tree.payloads,
                &mut tree.root,
                tree.kind,
                idx,
            );
            let buf = tree.vacate(dp);
            tree.free.release(buf);
            Ok(verify(tree, "remove"))
        })?;
        self.last_error = flaw;
        Ok(())
    }

    /// Hands a checked-out node back to its tree's free list. A refused
    /// node comes back inside the error.
    pub fn release(&mut self, name: &str, node: Node) -> std::result::Result<(), ReleaseError> {
        let checked = self.tracked(|reg| {
            let i = reg.position(name).ok_or_else(|| not_defined(name))?;
            check_owner(&reg.trees[i], &node)?;
            Ok(i)
        });
        match checked {
            Ok(i) => {
                self.trees[i].free.release(node.into_payload());
                Ok(())
            }
            Err(error) => Err(ReleaseError { error, node }),
        }
    }

    /// Creates `to` as an isomorphic copy of `from`.
    pub fn copy(&mut self, from: &str, to: &str) -> Result<()> {
        self.tracked(|reg| {
            check_name(from)?;
            let i = reg.position(from).ok_or_else(|| not_defined(from))?;
            check_name(to)?;
            if reg.position(to).is_some() {
                return Err(BstError::CopyTargetDefined(to.to_owned()));
            }

            let id = reg.next_id();
            let src = &reg.trees[i];
            let mut dst = src.sibling(to.to_owned(), id);
            let mut dup = Duplicator {
                src,
                dst: &mut dst,
                cursor: None,
            };
            walk(&src.arena, src.root, Order::Pre, &mut dup)?;
            if dst.len() != src.len() {
                return Err(BstError::CopyCountMismatch {
                    expected: src.len(),
                    copied: dst.len(),
                });
            }
            tracing::debug!(from = %from, to = %to, %id, nodes = dst.len(), "copied tree");
            reg.trees.push(dst);
            Ok(())
        })
    }

    /// Whether `a` and `b` have the same shape and pairwise equal records.
    pub fn structural_equal(&mut self, a: &str, b: &str) -> Result<bool> {
        self.tracked(|reg| {
            let (ta, tb) = reg.family(a, b)?;
            if ta.len() != tb.len() {
                return Ok(false);
            }
            let mut check = IdentityCheck {
                a: ta,
                b: tb,
                cursor: tb.root,
            };
            walk(&ta.arena, ta.root, Order::Pre, &mut check)
        })
    }

    /// Whether every record of `a` is found in `b`, shape aside. Trees with
    /// different counts are never equal.
    pub fn content_equal(&mut self, a: &str, b: &str) -> Result<bool> {
        self.tracked(|reg| {
            let (ta, tb) = reg.family(a, b)?;
            if ta.len() != tb.len() {
                return Ok(false);
            }
            let mut check = ContainmentCheck { a: ta, b: tb };
            walk(&ta.arena, ta.root, Order::In, &mut check)
        })
    }

    /// Calls `visit` with every record of `name` and its depth.
    pub fn walk(
        &mut self,
        name: &str,
        order: Order,
        visit: Option<&mut dyn FnMut(&[u8], usize)>,
    ) -> Result<()> {
        self.tracked(|reg| {
            let tree = reg.tree(name)?;
            let f = visit.ok_or(BstError::NoCallbackGiven)?;
            let mut visitor = Visitor {
                payloads: &tree.payloads,
                f,
            };
            walk(&tree.arena, tree.root, order, &mut visitor)?;
            Ok(())
        })
    }

    /// Feeds every record of `name` to its printer, in order. An empty tree
    /// gets a single `None`.
    pub fn print(&mut self, name: &str) -> Result<()> {
        self.tracked(|reg| {
            let tree = reg.tree(name)?;
            let printer = tree
                .printer
                .as_ref()
                .ok_or_else(|| BstError::NoPrinterGiven(name.to_owned()))?;
            if tree.is_empty() {
                printer(None, 0);
                return Ok(());
            }
            let mut visitor = Visitor {
                payloads: &tree.payloads,
                f: |rec: &[u8], depth: usize| printer(Some(rec), depth),
            };
            walk(&tree.arena, tree.root, Order::In, &mut visitor)?;
            Ok(())
        })
    }

    /// Checks links, tags and (for AVL trees) balance factors of `name`.
    pub fn audit(&mut self, name: &str) -> Result<AuditReport> {
        self.tracked(|reg| audit(reg.tree(name)?))
    }

    /// Error recorded by the most recent public operation.
    pub fn last_error(&self) -> Option<&BstError> {
        self.last_error.as_ref()
    }

    /// Code of [`Registry::last_error`], or [`NO_ERROR`].
    pub fn last_error_code(&self) -> i32 {
        self.last_error.as_ref().map_or(NO_ERROR, BstError::code)
    }

    fn family(&self, a: &str, b: &str) -> Result<(&TreeDefinition, &TreeDefinition)> {
        check_name(a)?;
        let ta = self.tree(a)?;
        check_name(b)?;
        let tb = self.tree(b)?;
        if ta.record_size() != tb.record_size() {
            return Err(BstError::IncompatibleTreeFamily(
                ta.record_size(),
                tb.record_size(),
            ));
        }
        Ok((ta, tb))
    }
}

fn check_owner(tree: &TreeDefinition, node: &Node) -> Result<()> {
    if node.owner() != tree.id {
        return Err(BstError::TreeNodeMismatch);
    }
    Ok(())
}

fn verify(tree: &TreeDefinition, op: &'static str) -> Option<BstError> {
    if !tree.verify {
        return None;
    }
    let error = audit(tree).err()?;
    tracing::warn!(tree = %tree.name, op, %error, "audit failed after mutation");
    Some(error)
}
