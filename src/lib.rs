mod bounded;
mod depth;
mod error;
mod iterate;
mod modify;
mod rbtree;
mod search;
mod sync;
mod tree;

pub use crate::bounded::{BoundedTree, Retain};
pub use crate::depth::Depth;
pub use crate::error::Error;
pub use crate::iterate::{Ascend, Descend, Enumerable, WalkInorder, WalkPostorder, WalkPreorder};
pub use crate::rbtree::{NodeRef, RbTree, Stats};
pub use crate::sync::ConcurrencySafeTree;
pub use crate::tree::Tree;

#[cfg(test)]
mod iterate_test;
#[cfg(test)]
mod sync_test;
