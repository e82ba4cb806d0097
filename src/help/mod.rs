//! Help rendering.
//!
//! Nodes describe themselves through a three-call protocol, in pre-order:
//! `enter_flag`, any number of `write_block`, then `leave_flag`. Any printer
//! implementing it can be plugged in; `BasicHelpPrinter` is the plain-text one.

mod basic;

pub use basic::{terminal_width, write_flag_header, BasicHelpPrinter};

use std::io;

use crate::config::HelpConfig;
use crate::flags::{FlagNode, FlagProperties};

/// Receiver of a flag tree's documentation.
pub trait HelpPrinter {
    fn enter_flag(&mut self, props: &FlagProperties);
    fn write_block(&mut self, text: &str);
    fn leave_flag(&mut self);
}

/// Render `node` as plain text.
pub fn help_text(node: &dyn FlagNode, config: &HelpConfig) -> String {
    let mut printer = BasicHelpPrinter::from_config(config);
    node.render_help(&mut printer);
    printer.into_string()
}

/// Render `node` as plain text into `out`.
pub fn print_help<W: io::Write>(
    node: &dyn FlagNode,
    config: &HelpConfig,
    out: &mut W,
) -> io::Result<()> {
    out.write_all(help_text(node, config).as_bytes())?;
    out.flush()
}
