//! Flag nodes: the parse tree the dispatcher walks.
//!
//! Leaves (`Flag<T>`, `Switch`) hold values; composites (`VectorFlag`, `Group`)
//! route tokens to freshly minted or owned children. Every node speaks the
//! same `FlagNode` contract.

mod decl;
mod error;
mod group;
mod leaf;
mod scalar;
mod vector;

pub use decl::{flag, short_flag, FlagDecl, FlagProperties};
pub use error::{ParseError, ValueError};
pub use group::{FlagSet, Group};
pub use leaf::{Flag, Switch};
pub use scalar::Scalar;
pub use vector::{mode, Element, Repeated, Sequential, Vector, VectorFlag};

use crate::args::{ArgReader, FlagName};
use crate::help::HelpPrinter;

/// Capability contract shared by every node in the parse tree.
pub trait FlagNode {
    fn decl(&self) -> &FlagDecl;

    /// No further value can presently be accepted.
    fn at_capacity(&self) -> bool;

    /// True if `name` identifies this node or any of its descendants.
    fn has_flag(&self, name: FlagName<'_>) -> bool;

    /// Advance parsing from the current token.
    ///
    /// `Err` only for hard failures. Returning `Ok` without moving the reader
    /// means "nothing here for me".
    fn consume(&mut self, reader: &mut ArgReader) -> Result<(), ParseError>;

    fn render_help(&self, printer: &mut dyn HelpPrinter);

    /// Append display names of required flags that were never given.
    fn collect_missing(&self, missing: &mut Vec<String>);
}

/// Construct a node from its declaration.
pub trait Declare {
    fn declare(decl: FlagDecl) -> Self;
}
