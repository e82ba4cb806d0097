//! Flag declarations: what a flag is called and how it documents itself.

use crate::args::FlagName;

/// Declaration of one flag, built with chained calls.
///
/// ```
/// use deepflags::flag;
///
/// let decl = flag("file")
///     .short('f')
///     .value_name("PATH")
///     .description("Specifies the file to read.");
/// assert_eq!(decl.display_name(), "--file");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagDecl {
    long: Option<String>,
    short: Option<char>,
    description: Option<String>,
    value_name: Option<String>,
    required: bool,
}

/// Declare a flag by long name.
pub fn flag(long: impl Into<String>) -> FlagDecl {
    FlagDecl::anonymous().long(long)
}

/// Declare a flag by short name only.
pub fn short_flag(short: char) -> FlagDecl {
    FlagDecl::anonymous().short(short)
}

impl FlagDecl {
    /// A declaration with no name. Anonymous groups are spliced into their
    /// parent; anonymous leaves are only useful as help prototypes.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        let long = long.into();
        self.long = (!long.is_empty()).then_some(long);
        self
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.is_empty()).then_some(description);
        self
    }

    pub fn value_name(mut self, value_name: impl Into<String>) -> Self {
        let value_name = value_name.into();
        self.value_name = (!value_name.is_empty()).then_some(value_name);
        self
    }

    /// Mark the flag as required. Checked once, after the whole command line
    /// has been parsed.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn value_name_text(&self) -> Option<&str> {
        self.value_name.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn has_any_name(&self) -> bool {
        self.long.is_some() || self.short.is_some()
    }

    /// Whether `name` is this flag's own long or short name.
    pub fn is_named(&self, name: FlagName<'_>) -> bool {
        match name {
            FlagName::Long(n) => self.long.as_deref() == Some(n),
            FlagName::Short(c) => self.short == Some(c),
        }
    }

    /// `--long`, else `-s`, else `<anonymous>`.
    pub fn display_name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{}", long),
            (None, Some(short)) => format!("-{}", short),
            (None, None) => "<anonymous>".to_string(),
        }
    }

    /// Freeze the identity part of this declaration together with its arity.
    pub fn properties(&self, greedy: bool, reentrant: bool) -> FlagProperties {
        FlagProperties {
            long: self.long.clone(),
            short: self.short,
            value_name: self.value_name.clone(),
            greedy,
            reentrant,
        }
    }
}

/// Immutable descriptor handed to help printers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagProperties {
    long: Option<String>,
    short: Option<char>,
    value_name: Option<String>,
    greedy: bool,
    reentrant: bool,
}

impl FlagProperties {
    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    pub fn value_name(&self) -> Option<&str> {
        self.value_name.as_deref()
    }

    pub fn has_any_name(&self) -> bool {
        self.long.is_some() || self.short.is_some()
    }

    /// Accepts more than one value per occurrence.
    pub fn accepts_multiple_values(&self) -> bool {
        self.greedy
    }

    /// Accepts more than one occurrence.
    pub fn is_repeatable(&self) -> bool {
        self.reentrant
    }

    /// `--long, -s`, `--long`, `-s`, or empty.
    pub fn list_flag_names(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), Some(short)) => format!("--{}, -{}", long, short),
            (Some(long), None) => format!("--{}", long),
            (None, Some(short)) => format!("-{}", short),
            (None, None) => String::new(),
        }
    }
}
