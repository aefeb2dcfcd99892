#![doc = include_str!("../README.md")]

mod aterm;
mod aterm_appl;
mod aterm_builder;
mod aterm_int;
mod aterm_list;
mod aterm_stream;
mod aterm_string;
mod aterm_text_stream;
mod load_aterm;
mod random_term;
mod storage;
mod symbol;

pub use aterm::*;
pub use aterm_appl::*;
pub use aterm_builder::*;
pub use aterm_int::*;
pub use aterm_list::*;
pub use aterm_stream::*;
pub use aterm_string::*;
pub use aterm_text_stream::*;
pub use load_aterm::*;
pub use random_term::*;
pub use storage::TermPool;
pub use storage::TermPoolMetrics;
pub use symbol::*;
