//! Flag groups and the dispatch loop.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use crate::args::{ArgReader, FlagName, Token};
use crate::flags::{Declare, FlagDecl, FlagNode, ParseError};
use crate::help::HelpPrinter;

/// A struct whose fields are flag nodes. Usually implemented by `flag_set!`.
pub trait FlagSet: Sized {
    /// Construct every member from its declaration.
    fn declare() -> Self;

    /// Members in declaration order.
    fn members(&self) -> Vec<&dyn FlagNode>;

    /// Members in declaration order, mutably. Same order as `members`.
    fn members_mut(&mut self) -> Vec<&mut dyn FlagNode>;

    /// The member at `index` in declaration order.
    fn member(&self, index: usize) -> Option<&dyn FlagNode>;

    fn member_mut(&mut self, index: usize) -> Option<&mut dyn FlagNode>;
}

/// A flag set acting as a sub-parser.
///
/// Members are indexed by long and short name once, at construction. Members
/// with no name at all are inline groups: they are offered any flag the
/// indices do not know.
#[derive(Debug)]
pub struct Group<S> {
    decl: FlagDecl,
    set: S,
    by_long: HashMap<String, usize>,
    by_short: HashMap<char, usize>,
    inline: Vec<usize>,
}

impl<S: FlagSet> Group<S> {
    /// An anonymous group, the usual top level of a program.
    pub fn root() -> Self {
        Self::declare(FlagDecl::anonymous())
    }

    pub fn into_inner(self) -> S {
        self.set
    }

    fn lookup(&self, name: FlagName<'_>) -> Option<usize> {
        let indexed = match name {
            FlagName::Long(long) => self.by_long.get(long),
            FlagName::Short(short) => self.by_short.get(&short),
        };
        indexed.copied().or_else(|| {
            self.inline.iter().copied().find(|&index| {
                self.set
                    .member(index)
                    .is_some_and(|member| member.has_flag(name))
            })
        })
    }
}

impl<S: FlagSet> Declare for Group<S> {
    fn declare(decl: FlagDecl) -> Self {
        let set = S::declare();
        let mut by_long = HashMap::new();
        let mut by_short = HashMap::new();
        let mut inline = Vec::new();

        for (index, member) in set.members().into_iter().enumerate() {
            let member_decl = member.decl();
            if let Some(long) = member_decl.long_name() {
                if by_long.insert(long.to_string(), index).is_some() {
                    tracing::warn!(flag = %long, "duplicate long flag name, last declaration wins");
                }
            }
            if let Some(short) = member_decl.short_name() {
                if by_short.insert(short, index).is_some() {
                    tracing::warn!(flag = %short, "duplicate short flag name, last declaration wins");
                }
            }
            if !member_decl.has_any_name() {
                inline.push(index);
            }
        }

        Self {
            decl,
            set,
            by_long,
            by_short,
            inline,
        }
    }
}

impl<S: FlagSet> FlagNode for Group<S> {
    fn decl(&self) -> &FlagDecl {
        &self.decl
    }

    fn at_capacity(&self) -> bool {
        self.set.members().iter().all(|member| member.at_capacity())
    }

    fn has_flag(&self, name: FlagName<'_>) -> bool {
        self.set.members().iter().any(|member| member.has_flag(name))
    }

    fn consume(&mut self, reader: &mut ArgReader) -> Result<(), ParseError> {
        match reader.token() {
            Token::Long { .. } | Token::Short(_) => {}
            Token::Value(value) => {
                return Err(ParseError::ExpectedFlagName {
                    value: value.clone(),
                })
            }
            Token::Empty | Token::End => {
                return Err(ParseError::Internal(
                    "flag group invoked with no data".to_string(),
                ))
            }
        }

        if reader.flag_name().is_some_and(|name| self.decl.is_named(name)) {
            reader.parse_next_arg();
        }

        while !reader.at_end() {
            let Some(index) = reader.flag_name().and_then(|name| self.lookup(name)) else {
                tracing::trace!(
                    group = %self.decl.display_name(),
                    token = ?reader.token(),
                    "not ours, returning to parent"
                );
                return Ok(());
            };

            let member = self
                .set
                .member_mut(index)
                .ok_or_else(|| ParseError::Internal(format!("no member at index {}", index)))?;

            if member.at_capacity() {
                tracing::trace!(
                    group = %self.decl.display_name(),
                    flag = %member.decl().display_name(),
                    "member at capacity, returning to parent"
                );
                return Ok(());
            }

            let before = reader.tell();
            member.consume(reader)?;
            if reader.tell() == before {
                return Ok(());
            }
        }
        Ok(())
    }

    fn render_help(&self, printer: &mut dyn HelpPrinter) {
        printer.enter_flag(&self.decl.properties(false, false));
        if let Some(description) = self.decl.description_text() {
            printer.write_block(description);
        }
        for member in self.set.members() {
            member.render_help(printer);
        }
        printer.leave_flag();
    }

    fn collect_missing(&self, missing: &mut Vec<String>) {
        for member in self.set.members() {
            member.collect_missing(missing);
        }
    }
}

impl<S: FlagSet> Default for Group<S> {
    fn default() -> Self {
        Self::root()
    }
}

impl<S> Deref for Group<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.set
    }
}

impl<S> DerefMut for Group<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.set
    }
}

/// Declare a struct of flags.
///
/// Each field names its node type and the declaration it is built from. The
/// macro implements `FlagSet` for the struct and `Element`, so the struct can
/// also be collected by a vector flag.
///
/// ```
/// use deepflags::{flag, flag_set, Flag, Group, ParseArgs, Switch};
///
/// flag_set! {
///     pub struct Options {
///         pub level: Flag<u8> = flag("level").short('l'),
///         pub quiet: Switch = flag("quiet").short('q'),
///     }
/// }
///
/// let mut options = Group::<Options>::root();
/// assert!(options.try_parse_args(["prog", "-ql", "3"]).is_ok());
/// assert_eq!(options.level.value(), Some(&3));
/// assert!(options.quiet.is_present());
/// ```
#[macro_export]
macro_rules! flag_set {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty = $decl:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::FlagSet for $name {
            fn declare() -> Self {
                Self {
                    $( $field: <$ty as $crate::Declare>::declare($decl), )*
                }
            }

            fn members(&self) -> ::std::vec::Vec<&dyn $crate::FlagNode> {
                ::std::vec![$( &self.$field as &dyn $crate::FlagNode ),*]
            }

            fn members_mut(&mut self) -> ::std::vec::Vec<&mut dyn $crate::FlagNode> {
                ::std::vec![$( &mut self.$field as &mut dyn $crate::FlagNode ),*]
            }

            #[allow(unused_mut)]
            fn member(&self, index: usize) -> ::std::option::Option<&dyn $crate::FlagNode> {
                let mut remaining = index;
                $(
                    if remaining == 0 {
                        return ::std::option::Option::Some(&self.$field as &dyn $crate::FlagNode);
                    }
                    remaining -= 1;
                )*
                let _ = remaining;
                ::std::option::Option::None
            }

            #[allow(unused_mut)]
            fn member_mut(
                &mut self,
                index: usize,
            ) -> ::std::option::Option<&mut dyn $crate::FlagNode> {
                let mut remaining = index;
                $(
                    if remaining == 0 {
                        return ::std::option::Option::Some(
                            &mut self.$field as &mut dyn $crate::FlagNode,
                        );
                    }
                    remaining -= 1;
                )*
                let _ = remaining;
                ::std::option::Option::None
            }
        }

        impl $crate::Element for $name {
            type Node = $crate::Group<$name>;

            fn from_node(node: $crate::Group<$name>) -> ::std::option::Option<Self> {
                ::std::option::Option::Some(node.into_inner())
            }

            fn collect_missing(&self, missing: &mut ::std::vec::Vec<::std::string::String>) {
                for member in <$name as $crate::FlagSet>::members(self) {
                    $crate::FlagNode::collect_missing(member, missing);
                }
            }
        }
    };
}
