use thiserror::Error;

/// A raw string could not be converted to the flag's value type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("expected {expected}")]
    Malformed { expected: &'static str },

    #[error("out of range for {expected}")]
    OutOfRange { expected: &'static str },
}

/// Errors that abort a parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A value failed type-specific parsing.
    #[error("Invalid value \"{raw}\" for flag {flag}: {source}")]
    MalformedValue {
        flag: String,
        raw: String,
        #[source]
        source: ValueError,
    },

    /// A value-bearing flag had nothing to take.
    #[error("Flag {flag} requires a value")]
    MissingValue { flag: String },

    #[error("Flag {flag} is a switch and cannot accept a value")]
    SwitchWithValue { flag: String },

    /// Nothing in the tree claimed this flag.
    #[error("Unexpected flag {flag}")]
    UnexpectedFlag { flag: String },

    #[error("Expected flag name, but got \"{value}\"")]
    ExpectedFlagName { value: String },

    #[error("Missing required flag(s): {}", .flags.join(", "))]
    MissingRequired { flags: Vec<String> },

    /// The reader's state contradicts what the dispatcher expects.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ParseError {
    /// True for defects rather than user input errors.
    pub fn is_internal(&self) -> bool {
        matches!(self, ParseError::Internal(_))
    }
}
