//! Search, insertion and deletion for AVL and plain trees.
//!
//! The two kinds share the search and linking code; only AVL trees run the
//! rebalancers.

pub(crate) mod insert;
pub(crate) mod remove;
pub(crate) mod rotate;

pub(crate) use insert::{link, locate};
pub(crate) use remove::unlink;
