use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub help: HelpConfig,
}

/// Settings for the plain-text help printer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpConfig {
    /// Wrap width in columns. Detected from the terminal when absent.
    #[serde(default)]
    pub width: Option<usize>,
    /// Columns added per nesting level (default: 2).
    #[serde(default = "default_indent_step")]
    pub indent_step: usize,
    /// Render flag headers in bold (default: true).
    #[serde(default = "default_bold_headers")]
    pub bold_headers: bool,
}

fn default_indent_step() -> usize {
    2
}

fn default_bold_headers() -> bool {
    true
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            width: None,
            indent_step: default_indent_step(),
            bold_headers: default_bold_headers(),
        }
    }
}
