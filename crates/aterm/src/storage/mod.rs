//! The shared storage behind every [TermPool].
//!
//! A pool consists of a unique table of function symbols and a unique table of
//! term nodes, where a node is an integer, the empty list, a list cell or a
//! function application. Nodes refer to their subterms by index, and every node
//! counts the references to it, i.e., the handles plus the nodes that have it
//! as subterm. A node is removed as soon as its count drops to zero, unless
//! automatic garbage collection has been disabled.

mod aterm_storage;
mod global_aterm_pool;
mod shared_term;
mod symbol_pool;
mod term_pool;

pub(crate) use aterm_storage::*;
pub(crate) use global_aterm_pool::GlobalTermPool;
pub use global_aterm_pool::TermPoolMetrics;
pub(crate) use shared_term::*;
pub(crate) use symbol_pool::*;
pub use term_pool::*;
