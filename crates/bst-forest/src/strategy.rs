//! The walker's per-node actions: visiting, destroying, duplicating and
//! the two equality checks.

use std::mem;
use std::ops::ControlFlow;

use crate::alloc::FreeList;
use crate::error::Result;
use crate::node::ControlBlock;
use crate::tree::TreeDefinition;
use crate::types::Side;
use crate::util::{attach, find};
use crate::walk::WalkAction;

const GO: Result<ControlFlow<()>> = Ok(ControlFlow::Continue(()));
const STOP: Result<ControlFlow<()>> = Ok(ControlFlow::Break(()));

/// Hands each record and its depth to a caller-supplied function.
pub(crate) struct Visitor<'a, F> {
    pub payloads: &'a [Box<[u8]>],
    pub f: F,
}

impl<F: FnMut(&[u8], usize)> WalkAction for Visitor<'_, F> {
    fn act(&mut self, idx: u32, depth: usize) -> Result<ControlFlow<()>> {
        (self.f)(&self.payloads[idx as usize][..], depth);
        GO
    }
}

/// Moves every record into the free list. Run in post order so children go
/// before their parent; the links stay readable until the walk ends.
pub(crate) struct Disposer<'a> {
    pub payloads: &'a mut [Box<[u8]>],
    pub free: &'a mut FreeList,
    pub released: usize,
}

impl WalkAction for Disposer<'_> {
    fn act(&mut self, idx: u32, _depth: usize) -> Result<ControlFlow<()>> {
        let buf = mem::take(&mut self.payloads[idx as usize]);
        self.free.release(buf);
        self.released += 1;
        GO
    }
}

/// Builds an isomorphic copy of the walked tree in `dst`. Run in pre order:
/// every node is created under the copy of its parent, on the side its tag
/// names, with the same balance factor.
pub(crate) struct Duplicator<'a> {
    pub src: &'a TreeDefinition,
    pub dst: &'a mut TreeDefinition,
    pub cursor: Option<u32>,
}

impl WalkAction for Duplicator<'_> {
    fn act(&mut self, idx: u32, _depth: usize) -> Result<ControlFlow<()>> {
        let from: ControlBlock = self.src.arena[idx as usize];
        let buf = self.dst.free.obtain_copy(&self.src.payloads[idx as usize])?;
        let n = self.dst.push(buf);
        let to = &mut self.dst.arena[n as usize];
        to.p = self.cursor;
        to.tag = from.tag;
        to.bf = from.bf;
        attach(
            &mut self.dst.arena,
            &mut self.dst.root,
            self.cursor,
            from.tag,
            Some(n),
        );
        self.cursor = Some(n);
        GO
    }

    fn ascend(&mut self) {
        self.cursor = self.cursor.and_then(|c| self.dst.arena[c as usize].p);
    }
}

/// Shadows the walk of `a` with a cursor in `b`, breaking off at the first
/// difference in shape or at the first pair of records `a`'s comparator
/// does not consider equal.
pub(crate) struct IdentityCheck<'a> {
    pub a: &'a TreeDefinition,
    pub b: &'a TreeDefinition,
    pub cursor: Option<u32>,
}

impl WalkAction for IdentityCheck<'_> {
    fn act(&mut self, idx: u32, _depth: usize) -> Result<ControlFlow<()>> {
        let Some(c) = self.cursor else {
            return STOP;
        };
        let lhs = &self.a.payloads[idx as usize];
        let rhs = &self.b.payloads[c as usize];
        if (self.a.comparator)(lhs, rhs) != 0 {
            return STOP;
        }
        GO
    }

    fn branch(&mut self, side: Side, present: bool) -> Result<ControlFlow<()>> {
        let Some(c) = self.cursor else {
            return STOP;
        };
        let other = match side {
            Side::Left => self.b.arena[c as usize].l,
            Side::Right => self.b.arena[c as usize].r,
        };
        if other.is_some() != present {
            return STOP;
        }
        if present {
            self.cursor = other;
        }
        GO
    }

    fn ascend(&mut self) {
        self.cursor = self.cursor.and_then(|c| self.b.arena[c as usize].p);
    }
}

/// Looks every walked record of `a` up in `b`, breaking off at the first
/// one `b` does not hold.
pub(crate) struct ContainmentCheck<'a> {
    pub a: &'a TreeDefinition,
    pub b: &'a TreeDefinition,
}

impl WalkAction for ContainmentCheck<'_> {
    fn act(&mut self, idx: u32, _depth: usize) -> Result<ControlFlow<()>> {
        let b = self.b;
        let key = &self.a.payloads[idx as usize];
        match find(&b.arena, &b.payloads, b.root, key, &b.comparator) {
            Some(_) => GO,
            None => STOP,
        }
    }
}
