//! Plain-text help printer.

use crossterm::style::Attribute;

use crate::config::HelpConfig;
use crate::flags::FlagProperties;
use crate::help::HelpPrinter;

const DEFAULT_WIDTH: usize = 80;

/// Width to wrap help at: `COLUMNS`, else the terminal's width, else 80.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|columns| columns.trim().parse::<usize>().ok())
        .filter(|&width| width > 0)
        .or_else(|| {
            crossterm::terminal::size()
                .ok()
                .map(|(columns, _)| usize::from(columns))
                .filter(|&width| width > 0)
        })
        .unwrap_or(DEFAULT_WIDTH)
}

/// Append a flag's header line (names, placeholder, arity) to `out`.
pub fn write_flag_header(out: &mut String, props: &FlagProperties) {
    let greedy = props.accepts_multiple_values();
    let reentrant = props.is_repeatable();
    let mut written = false;

    if props.has_any_name() {
        out.push_str(&props.list_flag_names());
        written = true;
    }

    if let Some(value) = props.value_name() {
        out.push_str(if written { " " } else { "[" });
        out.push_str(value);
        if greedy {
            out.push_str(&format!(" [{value} [{value}...]]"));
        }
        if !written {
            out.push(']');
        }
        if reentrant {
            out.push_str(if greedy {
                " (Flag can also be repeated)"
            } else {
                " (Flag can be repeated)"
            });
        }
        return;
    }

    if reentrant {
        if written {
            out.push(' ');
        }
        out.push_str("[Repeatable]");
        written = true;
    }
    if greedy {
        if written {
            out.push(' ');
        }
        out.push_str("[Accepts multiple values]");
    }
}

/// Renders help into a string: bold headers for named flags, descriptions
/// word-wrapped under them, nested flags indented.
#[derive(Debug, Clone)]
pub struct BasicHelpPrinter {
    out: String,
    width: usize,
    indent_step: usize,
    bold: bool,
    indent: usize,
    in_flag: bool,
}

impl BasicHelpPrinter {
    pub fn new() -> Self {
        Self::from_config(&HelpConfig::default())
    }

    pub fn from_config(config: &HelpConfig) -> Self {
        Self {
            out: String::new(),
            width: config.width.unwrap_or_else(terminal_width),
            indent_step: config.indent_step,
            bold: config.bold_headers,
            indent: 0,
            in_flag: false,
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn write_indentation(&mut self) {
        self.out.extend(std::iter::repeat(' ').take(self.indent));
    }

    fn write_wrapped(&mut self, text: &str) {
        let working_space = self.width.saturating_sub(self.indent).max(1);
        self.write_indentation();

        let mut line_len = 0;
        for word in text.split_whitespace() {
            let word_len = word.chars().count();
            if line_len > 0 && line_len + 1 + word_len > working_space {
                self.out.push('\n');
                self.write_indentation();
                line_len = 0;
            } else if line_len > 0 {
                self.out.push(' ');
                line_len += 1;
            }
            self.out.push_str(word);
            line_len += word_len;
        }

        self.out.push_str("\n\n");
    }
}

impl Default for BasicHelpPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpPrinter for BasicHelpPrinter {
    fn enter_flag(&mut self, props: &FlagProperties) {
        if props.has_any_name() {
            self.write_indentation();
            let mut header = String::new();
            write_flag_header(&mut header, props);
            if self.bold {
                self.out
                    .push_str(&format!("{}{}{}", Attribute::Bold, header, Attribute::Reset));
            } else {
                self.out.push_str(&header);
            }
            self.out.push_str("\n\n");
            self.in_flag = true;
        }

        // The outermost anonymous group does not indent its members.
        if self.in_flag {
            self.indent += self.indent_step;
        } else {
            self.in_flag = true;
        }
    }

    fn write_block(&mut self, text: &str) {
        self.write_wrapped(text);
    }

    fn leave_flag(&mut self) {
        self.indent = self.indent.saturating_sub(self.indent_step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{flag, short_flag, FlagDecl};

    fn header(props: FlagProperties) -> String {
        let mut out = String::new();
        write_flag_header(&mut out, &props);
        out
    }

    fn plain(width: usize) -> BasicHelpPrinter {
        BasicHelpPrinter::from_config(&HelpConfig {
            width: Some(width),
            indent_step: 2,
            bold_headers: false,
        })
    }

    #[test]
    fn header_names_only() {
        assert_eq!(header(flag("file").short('f').properties(false, false)), "--file, -f");
        assert_eq!(header(short_flag('p').properties(false, false)), "-p");
    }

    #[test]
    fn header_with_value_name() {
        let decl = flag("param").value_name("N");
        assert_eq!(header(decl.properties(false, false)), "--param N");
        assert_eq!(
            header(decl.properties(true, false)),
            "--param N [N [N...]]"
        );
        assert_eq!(
            header(decl.properties(false, true)),
            "--param N (Flag can be repeated)"
        );
        assert_eq!(
            header(decl.properties(true, true)),
            "--param N [N [N...]] (Flag can also be repeated)"
        );
    }

    #[test]
    fn header_without_value_name() {
        assert_eq!(
            header(flag("display").short('D').properties(false, true)),
            "--display, -D [Repeatable]"
        );
        assert_eq!(
            header(flag("ind").properties(true, true)),
            "--ind [Repeatable] [Accepts multiple values]"
        );
        assert_eq!(
            header(flag("weights").properties(true, false)),
            "--weights [Accepts multiple values]"
        );
    }

    #[test]
    fn header_for_anonymous_value() {
        let decl = FlagDecl::anonymous().value_name("V");
        assert_eq!(header(decl.properties(false, false)), "[V]");
        assert_eq!(FlagDecl::anonymous().properties(false, false).list_flag_names(), "");
    }

    #[test]
    fn blocks_wrap_at_width() {
        let mut printer = plain(20);
        printer.write_block("one two three four five six");
        assert_eq!(printer.into_string(), "one two three four\nfive six\n\n");
    }

    #[test]
    fn long_words_are_not_split() {
        let mut printer = plain(5);
        printer.write_block("abcdefgh ij");
        assert_eq!(printer.into_string(), "abcdefgh\nij\n\n");
    }

    #[test]
    fn named_flags_indent_their_contents() {
        let mut printer = plain(40);
        printer.enter_flag(&FlagDecl::anonymous().properties(false, false));
        printer.enter_flag(&flag("file").properties(false, false));
        printer.write_block("Reads the file.");
        printer.leave_flag();
        printer.leave_flag();
        assert_eq!(printer.into_string(), "--file\n\n  Reads the file.\n\n");
    }

    #[test]
    fn indentation_wraps_within_remaining_space() {
        let mut printer = plain(12);
        printer.enter_flag(&flag("a").properties(false, false));
        printer.write_block("aaa bbb ccc");
        printer.leave_flag();
        assert_eq!(printer.into_string(), "--a\n\n  aaa bbb\n  ccc\n\n");
    }

    #[test]
    fn bold_headers_use_sgr() {
        let mut printer = BasicHelpPrinter::from_config(&HelpConfig {
            width: Some(80),
            indent_step: 2,
            bold_headers: true,
        });
        printer.enter_flag(&flag("x").properties(false, false));
        printer.leave_flag();
        assert_eq!(printer.into_string(), "\x1B[1m--x\x1B[0m\n\n");
    }
}
