//! Vector-family nodes: one fresh element parser per occurrence.

use std::fmt;
use std::marker::PhantomData;

use crate::args::{ArgReader, FlagName, Token};
use crate::flags::{Declare, FlagDecl, FlagNode, ParseError};
use crate::help::HelpPrinter;

/// How a vector flag accepts values.
pub mod mode {
    /// Arity of a vector flag, fixed at the type level.
    pub trait Mode {
        /// One occurrence may continue over juxtaposed values.
        const GREEDY: bool;
        /// The flag name may appear again to add more values.
        const REENTRANT: bool;
    }

    /// `--ind 1 2 --ind 3`: both juxtaposition and re-mention.
    #[derive(Debug, Clone, Copy)]
    pub struct GreedyReentrant;

    /// `--tag a --tag b`: one value per mention.
    #[derive(Debug, Clone, Copy)]
    pub struct Reentrant;

    /// `--weights 1 2 3`: one contiguous run, never re-mentioned.
    #[derive(Debug, Clone, Copy)]
    pub struct Greedy;

    impl Mode for GreedyReentrant {
        const GREEDY: bool = true;
        const REENTRANT: bool = true;
    }

    impl Mode for Reentrant {
        const GREEDY: bool = false;
        const REENTRANT: bool = true;
    }

    impl Mode for Greedy {
        const GREEDY: bool = true;
        const REENTRANT: bool = false;
    }
}

use mode::Mode;

/// A type that can be collected by a vector flag.
///
/// Implemented for every `Scalar` and, by `flag_set!`, for every flag set.
pub trait Element: Sized {
    /// Parser minted for each occurrence.
    type Node: FlagNode + Declare;

    /// Extract the parsed value; `None` when the parser holds nothing.
    fn from_node(node: Self::Node) -> Option<Self>;

    fn collect_missing(&self, _missing: &mut Vec<String>) {}
}

/// Ordered sequence of values gathered over one or more occurrences.
pub struct VectorFlag<E: Element, M> {
    decl: FlagDecl,
    entered: bool,
    values: Vec<E>,
    prototype: E::Node,
    _mode: PhantomData<M>,
}

/// Greedy and reentrant.
pub type Vector<E> = VectorFlag<E, mode::GreedyReentrant>;
/// Reentrant only: one value per mention.
pub type Repeated<E> = VectorFlag<E, mode::Reentrant>;
/// Greedy only: a single contiguous run.
pub type Sequential<E> = VectorFlag<E, mode::Greedy>;

impl<E: Element, M: Mode> VectorFlag<E, M> {
    pub fn values(&self) -> &[E] {
        &self.values
    }

    pub fn into_values(self) -> Vec<E> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the flag has been invoked at all.
    pub fn was_entered(&self) -> bool {
        self.entered
    }

    /// Decide whether the occurrence just parsed by `element` continues
    /// without the flag being named again.
    fn continues(reader: &ArgReader, element: &E::Node) -> bool {
        if !M::GREEDY {
            return false;
        }
        match reader.token() {
            Token::Value(_) => true,
            Token::Long { .. } | Token::Short(_) => {
                M::REENTRANT && reader.flag_name().is_some_and(|name| element.has_flag(name))
            }
            Token::Empty | Token::End => false,
        }
    }
}

impl<E: Element, M: Mode> Declare for VectorFlag<E, M> {
    fn declare(decl: FlagDecl) -> Self {
        Self {
            decl,
            entered: false,
            values: Vec::new(),
            prototype: E::Node::declare(FlagDecl::anonymous()),
            _mode: PhantomData,
        }
    }
}

impl<E: Element, M: Mode> FlagNode for VectorFlag<E, M> {
    fn decl(&self) -> &FlagDecl {
        &self.decl
    }

    fn at_capacity(&self) -> bool {
        self.entered && !M::REENTRANT
    }

    fn has_flag(&self, name: FlagName<'_>) -> bool {
        self.decl.is_named(name) || self.prototype.has_flag(name)
    }

    fn consume(&mut self, reader: &mut ArgReader) -> Result<(), ParseError> {
        self.entered = true;
        loop {
            let mut element = E::Node::declare(self.decl.clone());
            let before = reader.tell();
            element.consume(reader)?;
            if reader.tell() == before {
                tracing::trace!(flag = %self.decl.display_name(), "occurrence produced nothing");
                return Ok(());
            }

            let proceed = Self::continues(reader, &element);
            if let Some(value) = E::from_node(element) {
                self.values.push(value);
            }
            if !proceed {
                return Ok(());
            }
            tracing::trace!(
                flag = %self.decl.display_name(),
                count = self.values.len(),
                "continuing occurrence"
            );
        }
    }

    fn render_help(&self, printer: &mut dyn HelpPrinter) {
        printer.enter_flag(&self.decl.properties(M::GREEDY, M::REENTRANT));
        if let Some(description) = self.decl.description_text() {
            printer.write_block(description);
        }
        self.prototype.render_help(printer);
        printer.leave_flag();
    }

    fn collect_missing(&self, missing: &mut Vec<String>) {
        if self.decl.is_required() && self.values.is_empty() {
            missing.push(self.decl.display_name());
        }
        for value in &self.values {
            value.collect_missing(missing);
        }
    }
}

impl<E: Element + fmt::Debug, M> fmt::Debug for VectorFlag<E, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorFlag")
            .field("decl", &self.decl)
            .field("entered", &self.entered)
            .field("values", &self.values)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::flag;

    fn reader_at(args: &[&str]) -> ArgReader {
        let mut argv = vec!["prog"];
        argv.extend_from_slice(args);
        let mut reader = ArgReader::new(argv);
        reader.parse_next_arg();
        reader
    }

    #[test]
    fn greedy_run_stops_at_foreign_flag() {
        let mut ind = Vector::<i32>::declare(flag("ind"));
        let mut reader = reader_at(&["--ind", "14", "15", "16", "--other"]);
        ind.consume(&mut reader).unwrap();
        assert_eq!(ind.values(), &[14, 15, 16]);
        assert_eq!(reader.long_flag(), Some("other"));
        assert!(!ind.at_capacity());
    }

    #[test]
    fn greedy_reentrant_continues_over_own_name() {
        let mut ind = Vector::<i32>::declare(flag("ind"));
        let mut reader = reader_at(&["--ind", "14", "--ind=15", "16", "--ind", "17"]);
        ind.consume(&mut reader).unwrap();
        assert_eq!(ind.values(), &[14, 15, 16, 17]);
        assert!(reader.at_end());
    }

    #[test]
    fn repeated_takes_one_value_per_mention() {
        let mut tag = Repeated::<String>::declare(flag("tag"));
        let mut reader = reader_at(&["--tag", "a", "b"]);
        tag.consume(&mut reader).unwrap();
        assert_eq!(tag.values(), &["a".to_string()]);
        assert_eq!(reader.value(), Some("b"));
        assert!(!tag.at_capacity());
    }

    #[test]
    fn sequential_closes_after_one_run() {
        let mut weights = Sequential::<i32>::declare(flag("weights"));
        let mut reader = reader_at(&["--weights", "1", "2", "--weights", "3"]);
        weights.consume(&mut reader).unwrap();
        assert_eq!(weights.values(), &[1, 2]);
        assert!(weights.at_capacity());
        assert_eq!(reader.long_flag(), Some("weights"));
    }

    #[test]
    fn bad_value_mid_run_is_a_hard_failure() {
        let mut ind = Vector::<i32>::declare(flag("ind"));
        let mut reader = reader_at(&["--ind", "1", "x"]);
        assert!(matches!(
            ind.consume(&mut reader),
            Err(ParseError::MalformedValue { .. })
        ));
        assert_eq!(ind.values(), &[1]);
    }

    #[test]
    fn required_vector_must_not_stay_empty() {
        let ind = Vector::<i32>::declare(flag("ind").required());
        let mut missing = Vec::new();
        ind.collect_missing(&mut missing);
        assert_eq!(missing, vec!["--ind".to_string()]);
    }
}
