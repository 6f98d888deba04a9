use crate::definitions::{Directive, InputValueDefinition, write_quoted};
use std::fmt::{self, Display, Write};

pub(super) const INDENT: &str = "    ";

pub(super) fn write_block(
    f: &mut fmt::Formatter<'_>,
    inner: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    write_delimited(f, "{\n", '}', inner)
}

fn write_delimited(
    f: &mut fmt::Formatter<'_>,
    start: &str,
    end: char,
    inner: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    f.write_str(start)?;
    inner(f)?;
    f.write_char(end)
}

/// A block string description, at the given indentation.
pub(super) struct Description<'a>(pub &'a str, pub &'a str);

impl Display for Description<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Description(description, indentation) = self;

        writeln!(f, r#"{indentation}""""#)?;

        // The value is already dedented. Relative indentation is kept, and `"""` is the only
        // sequence a block string has to escape.
        for line in description.trim_matches('\n').lines() {
            if line.trim().is_empty() {
                writeln!(f)?;
            } else {
                writeln!(f, "{indentation}{}", line.trim_end().replace(r#"""""#, r#"\""""#))?;
            }
        }

        writeln!(f, r#"{indentation}""""#)
    }
}

pub(super) fn write_description(f: &mut fmt::Formatter<'_>, description: Option<&str>, indentation: &str) -> fmt::Result {
    match description {
        Some(description) => Description(description, indentation).fmt(f),
        None => Ok(()),
    }
}

/// ` @a @b(arg: 1)`, with a leading space when not empty.
pub(super) struct DirectivesDisplay<'a>(pub &'a [Directive]);

impl Display for DirectivesDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for directive in self.0 {
            f.write_str(" @")?;
            f.write_str(&directive.name)?;

            if directive.arguments.is_empty() {
                continue;
            }

            f.write_char('(')?;

            let mut arguments = directive.arguments.iter().peekable();

            while let Some((name, value)) = arguments.next() {
                write!(f, "{name}: {value}")?;

                if arguments.peek().is_some() {
                    f.write_str(", ")?;
                }
            }

            f.write_char(')')?;
        }

        Ok(())
    }
}

/// `name: Type = default @directives`
pub(super) struct InputValueDisplay<'a>(pub &'a InputValueDefinition);

impl Display for InputValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let InputValueDisplay(input_value) = self;

        write!(f, "{}: {}", input_value.name, input_value.ty)?;

        if let Some(default_value) = &input_value.default_value {
            write!(f, " = {default_value}")?;
        }

        DirectivesDisplay(&input_value.directives).fmt(f)
    }
}

/// `(a: Int, "described" b: String)`, or nothing without arguments.
pub(super) struct ArgumentsDisplay<'a>(pub &'a [InputValueDefinition]);

impl Display for ArgumentsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }

        f.write_char('(')?;

        let mut arguments = self.0.iter().peekable();

        while let Some(argument) = arguments.next() {
            if let Some(description) = &argument.description {
                write_quoted(f, description)?;
                f.write_char(' ')?;
            }

            InputValueDisplay(argument).fmt(f)?;

            if arguments.peek().is_some() {
                f.write_str(", ")?;
            }
        }

        f.write_char(')')
    }
}
