//! Value parsers: string → typed value, one `Scalar` impl per primitive.

use crate::flags::error::ValueError;
use crate::flags::leaf::Flag;
use crate::flags::vector::Element;

/// A primitive a flag can hold.
pub trait Scalar: Sized {
    /// Name used in diagnostics.
    const TYPE_NAME: &'static str;

    fn parse_scalar(raw: &str) -> Result<Self, ValueError>;
}

/// Split `0x`/`0X` (hex) and leading-zero (octal) prefixes off a digit string.
fn split_radix(digits: &str) -> (u32, &str) {
    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    }
}

fn parse_integer(raw: &str, expected: &'static str, signed: bool) -> Result<i128, ValueError> {
    let malformed = ValueError::Malformed { expected };
    let out_of_range = ValueError::OutOfRange { expected };

    let text = raw.trim();
    let (negative, unsigned_text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if negative && !signed {
        return Err(malformed);
    }

    let (radix, digits) = split_radix(unsigned_text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(malformed);
    }

    // Digits are validated above, so the only failure left is overflow.
    let magnitude = u128::from_str_radix(digits, radix).map_err(|_| out_of_range.clone())?;
    let magnitude = i128::try_from(magnitude).map_err(|_| out_of_range)?;
    Ok(if negative { -magnitude } else { magnitude })
}

macro_rules! integer_scalar {
    ($($t:ty => $signed:expr),* $(,)?) => {
        $(
            impl Scalar for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn parse_scalar(raw: &str) -> Result<Self, ValueError> {
                    let wide = parse_integer(raw, Self::TYPE_NAME, $signed)?;
                    <$t>::try_from(wide).map_err(|_| ValueError::OutOfRange {
                        expected: Self::TYPE_NAME,
                    })
                }
            }
        )*
    };
}

integer_scalar! {
    i8 => true,
    i16 => true,
    i32 => true,
    i64 => true,
    u8 => false,
    u16 => false,
    u32 => false,
    u64 => false,
}

macro_rules! float_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn parse_scalar(raw: &str) -> Result<Self, ValueError> {
                    let text = raw.trim();
                    let value: $t = text.parse().map_err(|_| ValueError::Malformed {
                        expected: Self::TYPE_NAME,
                    })?;
                    // Overflowing literals parse to infinity; only an explicit
                    // "inf"/"infinity" may do that.
                    if value.is_infinite() && !text.to_ascii_lowercase().contains("inf") {
                        return Err(ValueError::OutOfRange {
                            expected: Self::TYPE_NAME,
                        });
                    }
                    Ok(value)
                }
            }
        )*
    };
}

float_scalar!(f32, f64);

impl Scalar for bool {
    const TYPE_NAME: &'static str = "bool";

    fn parse_scalar(raw: &str) -> Result<Self, ValueError> {
        match raw.to_ascii_lowercase().as_str() {
            "1" | "on" | "yes" | "true" => Ok(true),
            "0" | "no" | "off" | "false" => Ok(false),
            _ => Err(ValueError::Malformed {
                expected: "one of 1/on/yes/true or 0/no/off/false",
            }),
        }
    }
}

impl Scalar for char {
    const TYPE_NAME: &'static str = "char";

    fn parse_scalar(raw: &str) -> Result<Self, ValueError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ValueError::Malformed {
                expected: "a single character",
            }),
        }
    }
}

impl Scalar for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_scalar(raw: &str) -> Result<Self, ValueError> {
        Ok(raw.to_string())
    }
}

macro_rules! scalar_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                type Node = Flag<$t>;

                fn from_node(node: Flag<$t>) -> Option<Self> {
                    node.into_value()
                }
            }
        )*
    };
}

scalar_element!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, char, String);
