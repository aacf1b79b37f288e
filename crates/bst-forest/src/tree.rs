//! Tree definitions: one per registered name.

use std::fmt;
use std::rc::Rc;

use crate::alloc::FreeList;
use crate::node::{ControlBlock, TreeId};
use crate::types::{ChildTag, Comparator, Printer, TreeKind};
use crate::util::{attach, set_p};

/// Creation parameters for [`Registry::create`](crate::Registry::create).
#[derive(Clone)]
pub struct TreeOptions {
    pub kind: TreeKind,
    pub record_size: usize,
    pub comparator: Option<Comparator>,
    pub printer: Option<Printer>,
    /// Audit the tree after every insert and remove. Only honoured for AVL
    /// trees.
    pub verify_after_mutation: bool,
}

impl TreeOptions {
    pub fn new(kind: TreeKind, record_size: usize) -> Self {
        Self {
            kind,
            record_size,
            comparator: None,
            printer: None,
            verify_after_mutation: false,
        }
    }

    pub fn avl(record_size: usize) -> Self {
        Self::new(TreeKind::Avl, record_size)
    }

    pub fn bst(record_size: usize) -> Self {
        Self::new(TreeKind::Bst, record_size)
    }

    pub fn comparator<F>(mut self, f: F) -> Self
    where
        F: Fn(&[u8], &[u8]) -> i32 + 'static,
    {
        self.comparator = Some(Rc::new(f));
        self
    }

    pub fn shared_comparator(mut self, f: Comparator) -> Self {
        self.comparator = Some(f);
        self
    }

    pub fn printer<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&[u8]>, usize) + 'static,
    {
        self.printer = Some(Rc::new(f));
        self
    }

    pub fn shared_printer(mut self, f: Printer) -> Self {
        self.printer = Some(f);
        self
    }

    pub fn verify_after_mutation(mut self, on: bool) -> Self {
        self.verify_after_mutation = on;
        self
    }
}

impl fmt::Debug for TreeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeOptions")
            .field("kind", &self.kind)
            .field("record_size", &self.record_size)
            .field("comparator", &self.comparator.is_some())
            .field("printer", &self.printer.is_some())
            .field("verify_after_mutation", &self.verify_after_mutation)
            .finish()
    }
}

/// A named tree: its nodes, its storage pool and its ordering.
///
/// Nodes are split across two parallel arenas indexed by the same node id:
/// `arena` holds the [`ControlBlock`]s, `payloads` the records. The arenas
/// are kept dense; removing a node moves the last node into the vacated
/// index.
pub struct TreeDefinition {
    pub(crate) name: String,
    pub(crate) kind: TreeKind,
    pub(crate) id: TreeId,
    pub(crate) comparator: Comparator,
    pub(crate) printer: Option<Printer>,
    pub(crate) verify: bool,
    pub(crate) root: Option<u32>,
    pub(crate) arena: Vec<ControlBlock>,
    pub(crate) payloads: Vec<Box<[u8]>>,
    pub(crate) free: FreeList,
}

impl TreeDefinition {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        kind: TreeKind,
        id: TreeId,
        record_size: usize,
        comparator: Comparator,
        printer: Option<Printer>,
        verify: bool,
        free_list_capacity: usize,
    ) -> Self {
        Self {
            name,
            kind,
            id,
            comparator,
            printer,
            verify: verify && kind == TreeKind::Avl,
            root: None,
            arena: Vec::new(),
            payloads: Vec::new(),
            free: FreeList::new(record_size, free_list_capacity),
        }
    }

    /// Empty tree sharing this tree's kind, ordering and record size.
    pub(crate) fn sibling(&self, name: String, id: TreeId) -> Self {
        Self {
            name,
            kind: self.kind,
            id,
            comparator: Rc::clone(&self.comparator),
            printer: self.printer.clone(),
            verify: self.verify,
            root: None,
            arena: Vec::new(),
            payloads: Vec::new(),
            free: FreeList::new(self.free.record_size(), self.free.capacity()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn record_size(&self) -> usize {
        self.free.record_size()
    }

    pub fn verifies_after_mutation(&self) -> bool {
        self.verify
    }

    pub fn has_printer(&self) -> bool {
        self.printer.is_some()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Appends a detached node holding `payload` and returns its index.
    pub(crate) fn push(&mut self, payload: Box<[u8]>) -> u32 {
        let idx = self.arena.len() as u32;
        self.arena.push(ControlBlock::new(self.id));
        self.payloads.push(payload);
        idx
    }

    /// Removes the already unlinked node `idx` from the arenas and returns
    /// its record buffer. The last node takes over index `idx`; its parent
    /// slot and its children's back-references are re-pointed.
    pub(crate) fn vacate(&mut self, idx: u32) -> Box<[u8]> {
        let last = (self.arena.len() - 1) as u32;
        self.arena.swap_remove(idx as usize);
        let payload = self.payloads.swap_remove(idx as usize);
        if idx != last {
            let moved = self.arena[idx as usize];
            attach(&mut self.arena, &mut self.root, moved.p, moved.tag, Some(idx));
            if let Some(l) = moved.l {
                set_p(&mut self.arena, l, Some(idx));
            }
            if let Some(r) = moved.r {
                set_p(&mut self.arena, r, Some(idx));
            }
        }
        payload
    }

    pub(crate) fn root_tag_ok(&self) -> bool {
        self.root
            .map_or(true, |r| self.arena[r as usize].tag == ChildTag::Root)
    }
}

impl fmt::Debug for TreeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeDefinition")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("record_size", &self.record_size())
            .field("verify", &self.verify)
            .field("root", &self.root)
            .field("nodes", &self.arena.len())
            .field("free", &self.free.len())
            .finish()
    }
}
