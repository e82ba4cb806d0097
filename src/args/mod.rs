//! Argument tokenizer.
//!
//! ```text
//! argv → classify (one raw argument) → ArgReader (cursor, one token at a time)
//! ```

mod classifier;
mod reader;

pub use classifier::{classify, ClassifiedArg};
pub use reader::{ArgReader, FlagName, Token};
