//! Argument reader: a cursor over `argv` yielding one classified token at a time.

use std::collections::VecDeque;
use std::fmt;

use crate::args::classifier::{classify, ClassifiedArg};

/// The token currently under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Nothing read yet.
    Empty,
    /// `--name` or `--name=value`.
    Long { name: String, value: Option<String> },
    /// One character of a short-flag cluster. Never carries a value.
    Short(char),
    /// A bare value.
    Value(String),
    /// Past the last argument.
    End,
}

/// A flag name as the user typed it, in one of the two independent namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagName<'a> {
    Long(&'a str),
    Short(char),
}

impl fmt::Display for FlagName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagName::Long(name) => write!(f, "--{}", name),
            FlagName::Short(c) => write!(f, "-{}", c),
        }
    }
}

/// Cursor over raw arguments. `args[0]` is the program name and is never read.
#[derive(Debug, Clone)]
pub struct ArgReader {
    args: Vec<String>,
    position: usize,
    steps: usize,
    token: Token,
    pending_shorts: VecDeque<char>,
}

impl ArgReader {
    /// Build a reader over a full `argv`, program name included.
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: argv.into_iter().map(Into::into).collect(),
            position: 0,
            steps: 0,
            token: Token::Empty,
            pending_shorts: VecDeque::new(),
        }
    }

    /// Build a reader from an explicit argument count. Negative counts clamp to
    /// zero and counts beyond `argv` clamp to its length.
    pub fn from_parts<S: AsRef<str>>(argc: i32, argv: &[S]) -> Self {
        let count = usize::try_from(argc).unwrap_or(0).min(argv.len());
        Self::new(argv[..count].iter().map(|s| s.as_ref().to_string()))
    }

    /// Number of raw arguments, program name included.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Advance to the next token.
    ///
    /// Pending characters of a short cluster are handed out one per call
    /// before the cursor moves on to the next raw argument.
    pub fn parse_next_arg(&mut self) {
        if let Some(c) = self.pending_shorts.pop_front() {
            self.token = Token::Short(c);
            self.steps += 1;
            return;
        }

        if self.position + 1 >= self.args.len() {
            if self.token != Token::End {
                self.steps += 1;
            }
            self.position = self.args.len();
            self.token = Token::End;
            return;
        }

        self.position += 1;
        self.steps += 1;
        self.token = match classify(&self.args[self.position]) {
            ClassifiedArg::Long { name, value } => Token::Long { name, value },
            ClassifiedArg::ShortCluster { first, rest } => {
                self.pending_shorts.extend(rest);
                Token::Short(first)
            }
            ClassifiedArg::Value(value) => Token::Value(value),
        };
    }

    /// Pull the following raw argument as a value, whatever it looks like.
    ///
    /// Returns `None` inside a short cluster that still has characters queued
    /// (only the last character of a cluster may take the next argument) and
    /// when no argument follows.
    pub fn next_raw_argument(&mut self) -> Option<String> {
        if !self.pending_shorts.is_empty() || !self.has_more_arguments() {
            return None;
        }
        self.position += 1;
        self.steps += 1;
        let raw = self.args[self.position].clone();
        self.token = Token::Value(raw.clone());
        Some(raw)
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn at_end(&self) -> bool {
        self.token == Token::End
    }

    /// Whether a raw argument follows the current one.
    pub fn has_more_arguments(&self) -> bool {
        self.position + 1 < self.args.len()
    }

    /// True while characters of a short cluster are still queued.
    pub fn in_short_cluster(&self) -> bool {
        !self.pending_shorts.is_empty()
    }

    pub fn has_value(&self) -> bool {
        self.value().is_some()
    }

    /// The value carried by the current token: the `=value` of a long flag or
    /// a bare value.
    pub fn value(&self) -> Option<&str> {
        match &self.token {
            Token::Long { value, .. } => value.as_deref(),
            Token::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn has_any_flag(&self) -> bool {
        self.flag_name().is_some()
    }

    pub fn has_long_flag(&self) -> bool {
        matches!(self.token, Token::Long { .. })
    }

    pub fn has_short_flag(&self) -> bool {
        matches!(self.token, Token::Short(_))
    }

    pub fn long_flag(&self) -> Option<&str> {
        match &self.token {
            Token::Long { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn short_flag(&self) -> Option<char> {
        match self.token {
            Token::Short(c) => Some(c),
            _ => None,
        }
    }

    pub fn flag_name(&self) -> Option<FlagName<'_>> {
        match &self.token {
            Token::Long { name, .. } => Some(FlagName::Long(name)),
            Token::Short(c) => Some(FlagName::Short(*c)),
            _ => None,
        }
    }

    /// The current flag for diagnostics: `"name"` for long flags, `'c'` for
    /// short ones.
    pub fn quoted_flag_name(&self) -> String {
        match &self.token {
            Token::Long { name, .. } => format!("\"{}\"", name),
            Token::Short(c) => format!("'{}'", c),
            _ => "<Unspecified>".to_string(),
        }
    }

    /// Monotonic cursor position. Moves every time a token is consumed,
    /// including single characters of a short cluster, so callers compare two
    /// readings to detect "no progress".
    pub fn tell(&self) -> usize {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(args: &[&str]) -> ArgReader {
        let mut argv = vec!["prog"];
        argv.extend_from_slice(args);
        ArgReader::new(argv)
    }

    #[test]
    fn starts_empty() {
        let r = reader(&["--a"]);
        assert_eq!(r.token(), &Token::Empty);
        assert!(!r.at_end());
        assert!(!r.has_any_flag());
        assert_eq!(r.tell(), 0);
    }

    #[test]
    fn long_flag_with_attached_value() {
        let mut r = reader(&["--ind=10"]);
        r.parse_next_arg();
        assert!(r.has_long_flag());
        assert!(!r.has_short_flag());
        assert_eq!(r.long_flag(), Some("ind"));
        assert_eq!(r.value(), Some("10"));
        assert!(r.has_value());
    }

    #[test]
    fn bare_value_has_no_flag() {
        let mut r = reader(&["stray"]);
        r.parse_next_arg();
        assert!(!r.has_any_flag());
        assert!(r.has_value());
        assert_eq!(r.value(), Some("stray"));
        assert_eq!(r.quoted_flag_name(), "<Unspecified>");
    }

    #[test]
    fn short_cluster_is_handed_out_one_char_at_a_time() {
        let mut r = reader(&["-pbx", "next"]);
        r.parse_next_arg();
        assert_eq!(r.short_flag(), Some('p'));
        assert!(r.in_short_cluster());
        r.parse_next_arg();
        assert_eq!(r.short_flag(), Some('b'));
        r.parse_next_arg();
        assert_eq!(r.short_flag(), Some('x'));
        assert!(!r.in_short_cluster());
        assert!(!r.has_value());
        r.parse_next_arg();
        assert_eq!(r.value(), Some("next"));
        r.parse_next_arg();
        assert!(r.at_end());
    }

    #[test]
    fn raw_argument_is_refused_inside_a_cluster() {
        let mut r = reader(&["-bp", "10"]);
        r.parse_next_arg();
        assert_eq!(r.short_flag(), Some('b'));
        assert_eq!(r.next_raw_argument(), None);
        r.parse_next_arg();
        assert_eq!(r.short_flag(), Some('p'));
        assert_eq!(r.next_raw_argument(), Some("10".to_string()));
        assert_eq!(r.value(), Some("10"));
    }

    #[test]
    fn raw_argument_may_look_like_a_flag() {
        let mut r = reader(&["--name", "--odd"]);
        r.parse_next_arg();
        assert_eq!(r.next_raw_argument(), Some("--odd".to_string()));
        assert!(!r.has_any_flag());
    }

    #[test]
    fn no_raw_argument_past_the_end() {
        let mut r = reader(&["--name"]);
        r.parse_next_arg();
        assert!(!r.has_more_arguments());
        assert_eq!(r.next_raw_argument(), None);
    }

    #[test]
    fn tell_moves_for_every_token_and_once_into_end() {
        let mut r = reader(&["-ab", "--c"]);
        r.parse_next_arg();
        assert_eq!(r.tell(), 1);
        r.parse_next_arg();
        assert_eq!(r.tell(), 2);
        r.parse_next_arg();
        assert_eq!(r.tell(), 3);
        r.parse_next_arg();
        assert!(r.at_end());
        assert_eq!(r.tell(), 4);
        r.parse_next_arg();
        assert_eq!(r.tell(), 4);
        assert!(r.at_end());
        assert_eq!(r.long_flag(), None);
    }

    #[test]
    fn negative_count_clamps_to_zero() {
        let mut r = ArgReader::from_parts(-3, &["prog", "--a"]);
        assert!(r.is_empty());
        r.parse_next_arg();
        assert!(r.at_end());
    }

    #[test]
    fn count_limits_the_visible_arguments() {
        let mut r = ArgReader::from_parts(2, &["prog", "--a", "--b"]);
        assert_eq!(r.len(), 2);
        r.parse_next_arg();
        assert_eq!(r.long_flag(), Some("a"));
        r.parse_next_arg();
        assert!(r.at_end());
    }

    #[test]
    fn flag_name_display() {
        assert_eq!(FlagName::Long("file").to_string(), "--file");
        assert_eq!(FlagName::Short('f').to_string(), "-f");
    }
}
