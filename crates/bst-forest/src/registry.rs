//! The registry: owner of every named tree.

use std::rc::Rc;

use crate::alloc::DEFAULT_FREE_LIST_CAPACITY;
use crate::error::{BstError, Result};
use crate::node::TreeId;
use crate::strategy::Disposer;
use crate::tree::{TreeDefinition, TreeOptions};
use crate::walk::{walk, Order};

/// Shortest accepted tree name, in characters.
pub const MIN_TREE_NAME_LEN: usize = 1;
/// Longest accepted tree name, in characters.
pub const MAX_TREE_NAME_LEN: usize = 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Released record buffers each tree keeps for reuse.
    pub free_list_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            free_list_capacity: DEFAULT_FREE_LIST_CAPACITY,
        }
    }
}

impl RegistryConfig {
    pub fn with_free_list_capacity(mut self, capacity: usize) -> Self {
        self.free_list_capacity = capacity;
        self
    }
}

/// A set of uniquely named trees.
///
/// Every public operation clears the last recorded error on entry and
/// records the error it fails with, so [`Registry::last_error_code`]
/// always describes the most recent call. A failed audit after a mutation
/// on a verifying tree is recorded even though the mutation succeeds.
#[derive(Debug)]
pub struct Registry {
    pub(crate) trees: Vec<TreeDefinition>,
    config: RegistryConfig,
    epoch: u64,
    next_seq: u64,
    pub(crate) last_error: Option<BstError>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            trees: Vec::new(),
            config,
            epoch: rand::random(),
            next_seq: 0,
            last_error: None,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registers an empty tree named `name`.
    pub fn create(&mut self, name: &str, options: TreeOptions) -> Result<()> {
        self.tracked(|reg| {
            check_name(name)?;
            if reg.position(name).is_some() {
                return Err(BstError::AlreadyDefined(name.to_owned()));
            }
            if options.record_size == 0 {
                return Err(BstError::InvalidRecordSize);
            }
            let Some(comparator) = options.comparator else {
                return Err(BstError::MissingComparator);
            };
            if let Some(printer) = &options.printer {
                if std::ptr::addr_eq(Rc::as_ptr(&comparator), Rc::as_ptr(printer)) {
                    return Err(BstError::ComparatorEqualsPrinter);
                }
            }

            let id = reg.next_id();
            let tree = TreeDefinition::new(
                name.to_owned(),
                options.kind,
                id,
                options.record_size,
                comparator,
                options.printer,
                options.verify_after_mutation,
                reg.config.free_list_capacity,
            );
            tracing::debug!(
                tree = %name,
                %id,
                kind = ?options.kind,
                record_size = options.record_size,
                "created tree"
            );
            reg.trees.push(tree);
            Ok(())
        })
    }

    /// The tree registered under `name`. Leaves the last error untouched.
    pub fn find(&self, name: &str) -> Option<&TreeDefinition> {
        self.trees.iter().find(|t| t.name == name)
    }

    /// Names of all registered trees, oldest first.
    pub fn names(&self) -> Vec<String> {
        self.trees.iter().map(|t| t.name.clone()).collect()
    }

    /// Unregisters `name` and drops its nodes and its free list.
    ///
    /// The nodes are released in post order first, which checks every
    /// child tag against its parent's links. A broken link fails the call
    /// with [`BstError::CorruptedTag`]; the name is unregistered either way.
    pub fn destroy(&mut self, name: &str) -> Result<()> {
        self.tracked(|reg| {
            let i = reg.position(name).ok_or_else(|| not_defined(name))?;
            let mut tree = reg.trees.remove(i);
            let mut disposer = Disposer {
                payloads: &mut tree.payloads,
                free: &mut tree.free,
                released: 0,
            };
            walk(&tree.arena, tree.root, Order::Post, &mut disposer)?;
            let released = disposer.released;
            tracing::debug!(tree = %name, id = %tree.id, released, "destroyed tree");
            Ok(())
        })
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.trees.iter().position(|t| t.name == name)
    }

    pub(crate) fn tree(&self, name: &str) -> Result<&TreeDefinition> {
        self.find(name).ok_or_else(|| not_defined(name))
    }

    pub(crate) fn tree_mut(&mut self, name: &str) -> Result<&mut TreeDefinition> {
        self.trees
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| not_defined(name))
    }

    pub(crate) fn next_id(&mut self) -> TreeId {
        self.next_seq += 1;
        TreeId {
            epoch: self.epoch,
            seq: self.next_seq,
        }
    }

    /// Runs `op` with a cleared last error and records its failure, if any.
    pub(crate) fn tracked<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.last_error = None;
        let result = op(self);
        if let Err(e) = &result {
            self.last_error = Some(e.clone());
        }
        result
    }
}

pub(crate) fn not_defined(name: &str) -> BstError {
    BstError::NotDefined(name.to_owned())
}

pub(crate) fn check_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len < MIN_TREE_NAME_LEN {
        return Err(BstError::NameTooShort);
    }
    if len > MAX_TREE_NAME_LEN {
        return Err(BstError::NameTooLong(len));
    }
    Ok(())
}
