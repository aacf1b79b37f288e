//! Shared tree vocabulary.
//!
//! Nodes live in a [`Vec`]-backed arena and refer to each other through
//! `Option<u32>` indices. Every tree-manipulation helper takes the arena
//! slice plus node indices and goes through the [`TreeLinks`] accessors.

use std::rc::Rc;

/// Total order over two records: negative, zero or positive.
///
/// Must be deterministic and free of side effects for the lifetime of the
/// tree it is registered with.
pub type Comparator = Rc<dyn Fn(&[u8], &[u8]) -> i32>;

/// Optional record printer, called once per node by
/// [`Registry::print`](crate::Registry::print) with the node depth.
/// An empty tree produces a single call with `None`.
pub type Printer = Rc<dyn Fn(Option<&[u8]>, usize)>;

/// Balancing discipline of a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeKind {
    /// Height-balanced; rotations keep every balance factor in `-1..=1`.
    Avl,
    /// Plain binary search tree; balance factors are left at zero.
    Bst,
}

/// A node's relation to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ChildTag {
    Left,
    #[default]
    Root,
    Right,
}

/// One of the two child slots of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Tag carried by a node hanging off this side of its parent.
    pub fn tag(self) -> ChildTag {
        match self {
            Side::Left => ChildTag::Left,
            Side::Right => ChildTag::Right,
        }
    }
}

/// Parent/child links plus the bookkeeping the walker and the rebalancers
/// rely on.
pub trait TreeLinks {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn tag(&self) -> ChildTag;
    fn bf(&self) -> i8;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
    fn set_tag(&mut self, tag: ChildTag);
    fn set_bf(&mut self, bf: i8);

    fn child(&self, side: Side) -> Option<u32> {
        match side {
            Side::Left => self.l(),
            Side::Right => self.r(),
        }
    }
}
