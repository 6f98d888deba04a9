mod display_utils;

use self::display_utils::*;
use crate::definitions::*;
use itertools::Itertools as _;
use std::fmt::{self, Display, Write as _};

/// Render definitions as GraphQL SDL, in the given order, separated by blank lines.
pub fn render_sdl(definitions: &[Definition]) -> String {
    Renderer { definitions }.to_string()
}

/// `directive @name(arguments) repeatable on LOCATIONS`, without its description.
pub(crate) fn render_directive_definition(directive: &DirectiveDefinition) -> String {
    DirectiveDefinitionDisplay(directive).to_string()
}

struct Renderer<'a> {
    definitions: &'a [Definition],
}

impl Display for Renderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut write_leading_whitespace = {
            let mut first_block = true;
            move |f: &mut fmt::Formatter<'_>| {
                if first_block {
                    first_block = false;
                    Ok(())
                } else {
                    f.write_char('\n')
                }
            }
        };

        for definition in self.definitions {
            write_leading_whitespace(f)?;
            write_definition(f, definition)?;
            f.write_char('\n')?;
        }

        Ok(())
    }
}

fn write_definition(f: &mut fmt::Formatter<'_>, definition: &Definition) -> fmt::Result {
    match definition {
        Definition::Object(object) => {
            write_description(f, object.description.as_deref(), "")?;
            write_keyword(f, "type", object.extension)?;
            f.write_str(&object.name)?;
            write_implements(f, &object.interfaces)?;
            DirectivesDisplay(&object.directives).fmt(f)?;
            write_fields(f, &object.fields)
        }
        Definition::Interface(interface) => {
            write_description(f, interface.description.as_deref(), "")?;
            write_keyword(f, "interface", interface.extension)?;
            f.write_str(&interface.name)?;
            write_implements(f, &interface.interfaces)?;
            DirectivesDisplay(&interface.directives).fmt(f)?;
            write_fields(f, &interface.fields)
        }
        Definition::Union(union) => {
            write_description(f, union.description.as_deref(), "")?;
            write_keyword(f, "union", union.extension)?;
            f.write_str(&union.name)?;
            DirectivesDisplay(&union.directives).fmt(f)?;

            if !union.members.is_empty() {
                write!(f, " = {}", union.members.iter().format(" | "))?;
            }

            Ok(())
        }
        Definition::Enum(r#enum) => {
            write_description(f, r#enum.description.as_deref(), "")?;
            write_keyword(f, "enum", r#enum.extension)?;
            f.write_str(&r#enum.name)?;
            DirectivesDisplay(&r#enum.directives).fmt(f)?;

            if r#enum.values.is_empty() {
                return Ok(());
            }

            f.write_char(' ')?;

            write_block(f, |f| {
                for value in &r#enum.values {
                    write_description(f, value.description.as_deref(), INDENT)?;
                    writeln!(f, "{INDENT}{}{}", value.name, DirectivesDisplay(&value.directives))?;
                }

                Ok(())
            })
        }
        Definition::Scalar(scalar) => {
            write_description(f, scalar.description.as_deref(), "")?;
            write_keyword(f, "scalar", scalar.extension)?;
            f.write_str(&scalar.name)?;
            DirectivesDisplay(&scalar.directives).fmt(f)
        }
        Definition::InputObject(input_object) => {
            write_description(f, input_object.description.as_deref(), "")?;
            write_keyword(f, "input", input_object.extension)?;
            f.write_str(&input_object.name)?;
            DirectivesDisplay(&input_object.directives).fmt(f)?;

            if input_object.fields.is_empty() {
                return Ok(());
            }

            f.write_char(' ')?;

            write_block(f, |f| {
                for field in &input_object.fields {
                    write_description(f, field.description.as_deref(), INDENT)?;
                    writeln!(f, "{INDENT}{}", InputValueDisplay(field))?;
                }

                Ok(())
            })
        }
        Definition::Directive(directive) => {
            write_description(f, directive.description.as_deref(), "")?;
            DirectiveDefinitionDisplay(directive).fmt(f)
        }
        Definition::Schema(schema) => {
            write_description(f, schema.description.as_deref(), "")?;
            f.write_str(if schema.extension { "extend schema" } else { "schema" })?;
            DirectivesDisplay(&schema.directives).fmt(f)?;

            if schema.operation_types.is_empty() {
                return Ok(());
            }

            f.write_char(' ')?;

            write_block(f, |f| {
                for (operation, type_name) in schema.operation_types.iter() {
                    writeln!(f, "{INDENT}{operation}: {type_name}")?;
                }

                Ok(())
            })
        }
    }
}

fn write_keyword(f: &mut fmt::Formatter<'_>, keyword: &str, extension: bool) -> fmt::Result {
    if extension {
        f.write_str("extend ")?;
    }

    f.write_str(keyword)?;
    f.write_char(' ')
}

fn write_implements(f: &mut fmt::Formatter<'_>, interfaces: &[String]) -> fmt::Result {
    if interfaces.is_empty() {
        return Ok(());
    }

    write!(f, " implements {}", interfaces.iter().format(" & "))
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[FieldDefinition]) -> fmt::Result {
    if fields.is_empty() {
        return Ok(());
    }

    f.write_char(' ')?;

    write_block(f, |f| {
        for field in fields {
            write_description(f, field.description.as_deref(), INDENT)?;
            writeln!(
                f,
                "{INDENT}{}{}: {}{}",
                field.name,
                ArgumentsDisplay(&field.arguments),
                field.ty,
                DirectivesDisplay(&field.directives)
            )?;
        }

        Ok(())
    })
}

struct DirectiveDefinitionDisplay<'a>(&'a DirectiveDefinition);

impl Display for DirectiveDefinitionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let DirectiveDefinitionDisplay(directive) = self;

        write!(f, "directive @{}{}", directive.name, ArgumentsDisplay(&directive.arguments))?;

        if directive.repeatable {
            f.write_str(" repeatable")?;
        }

        write!(f, " on {}", directive.locations.iter().format(" | "))
    }
}
