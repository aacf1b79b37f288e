use std::fmt;

use crate::types::{ChildTag, TreeLinks};

/// Identity stamped on a tree and on every node it hands out.
///
/// `epoch` is drawn at random once per [`Registry`](crate::Registry) and
/// `seq` increases strictly with every tree created by that registry, so two
/// live trees never share an id and a node kept across a destroy/create
/// cycle is not mistaken for one of the new tree's nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TreeId {
    pub epoch: u64,
    pub seq: u64,
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}-{}", self.epoch, self.seq)
    }
}

/// Per-node bookkeeping kept in the tree arena. The record itself lives in
/// the tree's parallel payload arena under the same index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlBlock {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    /// `height(left) - height(right)`; only maintained for AVL trees.
    pub bf: i8,
    pub tag: ChildTag,
    pub owner: TreeId,
}

impl ControlBlock {
    pub fn new(owner: TreeId) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            bf: 0,
            tag: ChildTag::Root,
            owner,
        }
    }
}

impl TreeLinks for ControlBlock {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn tag(&self) -> ChildTag {
        self.tag
    }

    fn bf(&self) -> i8 {
        self.bf
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }

    fn set_tag(&mut self, tag: ChildTag) {
        self.tag = tag;
    }

    fn set_bf(&mut self, bf: i8) {
        self.bf = bf;
    }
}

/// A record checked out of a tree by
/// [`Registry::allocate`](crate::Registry::allocate) or
/// [`Registry::lookup`](crate::Registry::lookup).
///
/// The caller owns it until it is handed back with
/// [`Registry::release`](crate::Registry::release), which consumes the value.
/// Dropping a node without releasing it simply frees its storage instead of
/// recycling it.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "release the node to recycle its storage"]
pub struct Node {
    owner: TreeId,
    payload: Box<[u8]>,
}

impl Node {
    pub(crate) fn new(owner: TreeId, payload: Box<[u8]>) -> Self {
        Self { owner, payload }
    }

    /// Id of the tree this node belongs to.
    pub fn owner(&self) -> TreeId {
        self.owner
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.payload
    }

    /// Record size of the owning tree.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Overwrites the record with `bytes`, truncating to the record size
    /// and zero-filling whatever `bytes` does not cover.
    pub fn write(&mut self, bytes: &[u8]) {
        let n = bytes.len().min(self.payload.len());
        self.payload[..n].copy_from_slice(&bytes[..n]);
        self.payload[n..].fill(0);
    }

    pub(crate) fn into_payload(self) -> Box<[u8]> {
        self.payload
    }
}
