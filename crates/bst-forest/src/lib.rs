//! Registry of named binary search trees over fixed-size opaque records.
//!
//! A [`Registry`] owns any number of trees, each identified by a unique
//! name and created with a record size, a [`Comparator`] and optionally a
//! [`Printer`]. Trees are either height-balanced ([`TreeKind::Avl`]) or
//! plain ([`TreeKind::Bst`]). Records are handed in and out as [`Node`]
//! values stamped with the owning tree's [`TreeId`]; every stored record is
//! a private copy.
//!
//! Each tree keeps its nodes in two parallel `Vec` arenas (control blocks
//! and records) linked by `Option<u32>` indices, and recycles record
//! buffers through a bounded free list. Traversals never recurse or keep a
//! stack: they follow parent links and child tags.
//!
//! ```
//! use bst_forest::{Order, Registry, TreeOptions};
//!
//! let mut reg = Registry::new();
//! reg.create("ids", TreeOptions::avl(4).comparator(|a, b| a.cmp(b) as i32))?;
//! for id in [5u32, 3, 8] {
//!     let mut node = reg.allocate("ids")?;
//!     node.write(&id.to_be_bytes());
//!     reg.insert("ids", &node)?;
//!     reg.release("ids", node)?;
//! }
//!
//! let mut seen = Vec::new();
//! let mut collect = |rec: &[u8], _depth: usize| seen.push(rec[3]);
//! reg.walk("ids", Order::In, Some(&mut collect))?;
//! assert_eq!(seen, vec![3, 5, 8]);
//! # Ok::<(), bst_forest::BstError>(())
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`TreeLinks`], [`ChildTag`], [`TreeKind`], callback aliases |
//! | [`util`] | `first`, `last`, `next`, `find` over an arena |
//! | [`walk`] | stackless walker and the [`WalkAction`] seam |
//! | [`alloc`] | per-tree [`FreeList`](alloc::FreeList) |
//! | `avl` | search, insert and delete with AVL rebalancing |
//! | `audit` | balance and link auditor |
//! | `registry` / `facade` | [`Registry`] and its public operations |

pub mod alloc;
mod audit;
mod avl;
pub mod error;
mod facade;
mod node;
mod registry;
mod strategy;
mod tree;
pub mod types;
pub mod util;
pub mod walk;

pub use alloc::DEFAULT_FREE_LIST_CAPACITY;
pub use audit::AuditReport;
pub use error::{message_for_code, BstError, ReleaseError, Result, NO_ERROR};
pub use node::{ControlBlock, Node, TreeId};
pub use registry::{Registry, RegistryConfig, MAX_TREE_NAME_LEN, MIN_TREE_NAME_LEN};
pub use tree::{TreeDefinition, TreeOptions};
pub use types::{ChildTag, Comparator, Printer, Side, TreeKind, TreeLinks};
pub use walk::{Order, WalkAction};
