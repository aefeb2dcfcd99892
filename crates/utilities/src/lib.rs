#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod debug_trace;
mod error;
mod format;
mod tagged_index;
mod test_logger;

pub use error::*;
pub use format::*;
pub use random_test::*;
pub use tagged_index::*;
pub use test_logger::*;
