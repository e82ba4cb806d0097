//! Pipeline: ties tokenizing, dispatch, and final checks together.
//!
//! ```text
//! argv → ArgReader → root.consume() → end-of-stream check → required check
//! ```

use crate::args::{ArgReader, Token};
use crate::flags::{FlagNode, ParseError};

/// Top-level entry points, available on every flag node.
pub trait ParseArgs: FlagNode {
    /// Parse a full `argv` (program name first).
    ///
    /// Values assigned before a failure stay assigned.
    fn try_parse_args<I, S>(&mut self, argv: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut reader = ArgReader::new(argv);
        run(self, &mut reader)
    }

    /// Like `try_parse_args`, reporting failure as `false` with the diagnostic
    /// written to stderr. The process is left running.
    fn parse_args<I, S>(&mut self, argv: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.try_parse_args(argv) {
            Ok(()) => true,
            Err(err) => {
                eprintln!("{}", err);
                false
            }
        }
    }
}

impl<T: FlagNode + ?Sized> ParseArgs for T {}

fn run<N: FlagNode + ?Sized>(root: &mut N, reader: &mut ArgReader) -> Result<(), ParseError> {
    let result = dispatch(root, reader).and_then(|()| check_required(root));
    if let Err(err) = &result {
        tracing::debug!(error = %err, position = reader.tell(), "flag parse failed");
    }
    result
}

fn dispatch<N: FlagNode + ?Sized>(root: &mut N, reader: &mut ArgReader) -> Result<(), ParseError> {
    if reader.len() < 2 {
        return Ok(());
    }

    reader.parse_next_arg();
    root.consume(reader)?;

    if reader.at_end() {
        return Ok(());
    }
    Err(match reader.token() {
        Token::Long { .. } | Token::Short(_) => ParseError::UnexpectedFlag {
            flag: reader.quoted_flag_name(),
        },
        Token::Value(value) => ParseError::ExpectedFlagName {
            value: value.clone(),
        },
        Token::Empty | Token::End => ParseError::Internal(
            "not all arguments were read and the argument reader is not sane".to_string(),
        ),
    })
}

fn check_required<N: FlagNode + ?Sized>(root: &N) -> Result<(), ParseError> {
    let mut missing = Vec::new();
    root.collect_missing(&mut missing);

    let mut flags: Vec<String> = Vec::with_capacity(missing.len());
    for name in missing {
        if !flags.contains(&name) {
            flags.push(name);
        }
    }

    if flags.is_empty() {
        Ok(())
    } else {
        Err(ParseError::MissingRequired { flags })
    }
}
