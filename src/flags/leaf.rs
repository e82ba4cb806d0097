//! Leaf nodes: single-value flags and switches.

use crate::args::{ArgReader, FlagName};
use crate::flags::{Declare, FlagDecl, FlagNode, ParseError, Scalar};
use crate::help::HelpPrinter;

fn render_leaf(decl: &FlagDecl, printer: &mut dyn HelpPrinter) {
    printer.enter_flag(&decl.properties(false, false));
    if let Some(description) = decl.description_text() {
        printer.write_block(description);
    }
    printer.leave_flag();
}

/// A flag holding zero or one typed value.
#[derive(Debug, Clone)]
pub struct Flag<T> {
    decl: FlagDecl,
    value: Option<T>,
}

impl<T> Flag<T> {
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T: Scalar> Declare for Flag<T> {
    fn declare(decl: FlagDecl) -> Self {
        Self { decl, value: None }
    }
}

impl<T: Scalar> FlagNode for Flag<T> {
    fn decl(&self) -> &FlagDecl {
        &self.decl
    }

    fn at_capacity(&self) -> bool {
        self.value.is_some()
    }

    fn has_flag(&self, name: FlagName<'_>) -> bool {
        self.decl.is_named(name)
    }

    fn consume(&mut self, reader: &mut ArgReader) -> Result<(), ParseError> {
        let attached = reader.value().map(str::to_string);
        let raw = match attached {
            Some(value) => value,
            None => reader
                .next_raw_argument()
                .ok_or_else(|| ParseError::MissingValue {
                    flag: self.decl.display_name(),
                })?,
        };

        let value = T::parse_scalar(&raw).map_err(|source| ParseError::MalformedValue {
            flag: self.decl.display_name(),
            raw: raw.clone(),
            source,
        })?;

        tracing::trace!(flag = %self.decl.display_name(), raw = %raw, "value assigned");
        self.value = Some(value);
        reader.parse_next_arg();
        Ok(())
    }

    fn render_help(&self, printer: &mut dyn HelpPrinter) {
        render_leaf(&self.decl, printer);
    }

    fn collect_missing(&self, missing: &mut Vec<String>) {
        if self.decl.is_required() && self.value.is_none() {
            missing.push(self.decl.display_name());
        }
    }
}

/// A value-less presence flag.
#[derive(Debug, Clone)]
pub struct Switch {
    decl: FlagDecl,
    present: bool,
}

impl Switch {
    pub fn is_present(&self) -> bool {
        self.present
    }
}

impl Declare for Switch {
    fn declare(decl: FlagDecl) -> Self {
        Self {
            decl,
            present: false,
        }
    }
}

impl FlagNode for Switch {
    fn decl(&self) -> &FlagDecl {
        &self.decl
    }

    fn at_capacity(&self) -> bool {
        self.present
    }

    fn has_flag(&self, name: FlagName<'_>) -> bool {
        self.decl.is_named(name)
    }

    fn consume(&mut self, reader: &mut ArgReader) -> Result<(), ParseError> {
        if reader.has_value() {
            return Err(ParseError::SwitchWithValue {
                flag: self.decl.display_name(),
            });
        }
        self.present = true;
        reader.parse_next_arg();
        Ok(())
    }

    fn render_help(&self, printer: &mut dyn HelpPrinter) {
        render_leaf(&self.decl, printer);
    }

    fn collect_missing(&self, missing: &mut Vec<String>) {
        if self.decl.is_required() && !self.present {
            missing.push(self.decl.display_name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{flag, short_flag};

    fn reader_at(args: &[&str]) -> ArgReader {
        let mut argv = vec!["prog"];
        argv.extend_from_slice(args);
        let mut reader = ArgReader::new(argv);
        reader.parse_next_arg();
        reader
    }

    #[test]
    fn takes_attached_value() {
        let mut param = Flag::<i64>::declare(flag("param"));
        let mut reader = reader_at(&["--param=20"]);
        param.consume(&mut reader).unwrap();
        assert_eq!(param.value(), Some(&20));
        assert!(param.at_capacity());
        assert!(reader.at_end());
    }

    #[test]
    fn takes_following_argument() {
        let mut param = Flag::<i64>::declare(flag("param"));
        let mut reader = reader_at(&["--param", "20", "--next"]);
        param.consume(&mut reader).unwrap();
        assert_eq!(param.value(), Some(&20));
        assert_eq!(reader.long_flag(), Some("next"));
    }

    #[test]
    fn missing_value_at_end() {
        let mut param = Flag::<i64>::declare(flag("param"));
        let mut reader = reader_at(&["--param"]);
        assert_eq!(
            param.consume(&mut reader),
            Err(ParseError::MissingValue {
                flag: "--param".into()
            })
        );
        assert!(!param.is_present());
    }

    #[test]
    fn malformed_value_leaves_flag_unset() {
        let mut param = Flag::<i64>::declare(flag("param"));
        let mut reader = reader_at(&["--param", "twenty"]);
        let err = param.consume(&mut reader).unwrap_err();
        assert!(matches!(err, ParseError::MalformedValue { ref raw, .. } if raw == "twenty"));
        assert!(!param.is_present());
    }

    #[test]
    fn switch_sets_presence() {
        let mut toggle = Switch::declare(flag("toggle"));
        assert!(!toggle.at_capacity());
        let mut reader = reader_at(&["--toggle"]);
        toggle.consume(&mut reader).unwrap();
        assert!(toggle.is_present());
        assert!(toggle.at_capacity());
    }

    #[test]
    fn switch_rejects_attached_value() {
        let mut toggle = Switch::declare(flag("toggle"));
        let mut reader = reader_at(&["--toggle=yes"]);
        assert_eq!(
            toggle.consume(&mut reader),
            Err(ParseError::SwitchWithValue {
                flag: "--toggle".into()
            })
        );
    }

    #[test]
    fn required_leaves_report_themselves() {
        let id = Flag::<i64>::declare(flag("id").required());
        let p = Switch::declare(short_flag('p').required());
        let optional = Flag::<i64>::declare(flag("x"));
        let mut missing = Vec::new();
        id.collect_missing(&mut missing);
        p.collect_missing(&mut missing);
        optional.collect_missing(&mut missing);
        assert_eq!(missing, vec!["--id".to_string(), "-p".to_string()]);
    }
}
