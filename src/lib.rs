//! DeepFlags: declarative, recursive command-line flag parsing.
//!
//! Flags are fields of a struct declared with [`flag_set!`]. A set can be the
//! top level of a program, a named sub-group, or the element type of a vector
//! flag, which gives repeatable structured records:
//!
//! ```
//! use deepflags::{flag, flag_set, Flag, Group, ParseArgs, Switch, Vector};
//!
//! flag_set! {
//!     pub struct Entity {
//!         pub id: Flag<i64> = flag("id").description("The id of the entity."),
//!         pub x: Flag<f64> = flag("x").short('x'),
//!     }
//! }
//!
//! flag_set! {
//!     pub struct Options {
//!         pub verbose: Switch = flag("verbose").short('v'),
//!         pub entities: Vector<Entity> = flag("entity"),
//!     }
//! }
//!
//! let mut options = Group::<Options>::root();
//! let argv = ["prog", "-v", "--entity", "--id", "1", "--entity", "--id=2", "-x", ".5"];
//! assert!(options.parse_args(argv));
//! assert!(options.verbose.is_present());
//! assert_eq!(options.entities.len(), 2);
//! assert_eq!(options.entities.values()[1].x.value(), Some(&0.5));
//! ```

pub mod args;
pub mod config;
pub mod flags;
pub mod help;
pub mod pipeline;

pub use args::{ArgReader, FlagName, Token};
pub use flags::{
    flag, mode, short_flag, Declare, Element, Flag, FlagDecl, FlagNode, FlagProperties,
    FlagSet, Group, ParseError, Repeated, Scalar, Sequential, Switch, ValueError, Vector,
    VectorFlag,
};
pub use help::{help_text, print_help, BasicHelpPrinter, HelpPrinter};
pub use pipeline::ParseArgs;
