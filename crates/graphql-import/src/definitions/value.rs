use std::fmt::{self, Display, Write as _};

/// A constant GraphQL value, as found in default values and directive arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Int(i64),
    Float(f64),
    Boolean(bool),
    Enum(String),
    List(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::String(s) => write_quoted(f, s),
            Value::Int(i) => Display::fmt(i, f),
            Value::Float(val) => Display::fmt(val, f),
            Value::Boolean(true) => f.write_str("true"),
            Value::Boolean(false) => f.write_str("false"),
            Value::Enum(val) => f.write_str(val),
            Value::List(values) => {
                let mut values = values.iter().peekable();

                f.write_char('[')?;
                while let Some(value) = values.next() {
                    Display::fmt(value, f)?;
                    if values.peek().is_some() {
                        f.write_str(", ")?;
                    }
                }
                f.write_char(']')
            }
            Value::Object(key_values) => {
                let mut key_values = key_values.iter().peekable();

                f.write_char('{')?;
                while let Some((key, value)) = key_values.next() {
                    f.write_str(key)?;
                    f.write_str(": ")?;
                    Display::fmt(value, f)?;
                    if key_values.peek().is_some() {
                        f.write_str(", ")?;
                    }
                }
                f.write_char('}')
            }
        }
    }
}

pub(crate) fn write_quoted(sdl: &mut impl fmt::Write, s: &str) -> fmt::Result {
    sdl.write_char('"')?;
    for c in s.chars() {
        match c {
            '\r' => sdl.write_str("\\r"),
            '\n' => sdl.write_str("\\n"),
            '\t' => sdl.write_str("\\t"),
            '\\' => sdl.write_str("\\\\"),
            '"' => sdl.write_str("\\\""),
            c if c.is_control() => write!(sdl, "\\u{:04x}", c as u32),
            c => sdl.write_char(c),
        }?
    }
    sdl.write_char('"')
}
