//! Structural merge of definitions that share a name.
//!
//! Definitions are grouped by name in first-seen order, and every later occurrence is folded into
//! the first one. Extensions fold into their base definition like any other occurrence.

mod directive_definitions;
mod directives;
mod enums;
mod fields;
mod named_types;
mod schema_definition;

use self::{
    directive_definitions::merge_directive_definitions,
    directives::merge_directives,
    enums::merge_enum_values,
    fields::{merge_fields, merge_input_fields},
    named_types::merge_named_types,
    schema_definition::{merge_schema_definitions, synthesize_schema_definition},
};
use crate::{config::MergeConfig, definitions::*, document::Document, error::MergeError};
use indexmap::{IndexMap, map::Entry};
use std::mem;

/// Merge definitions by name into a flat, deduplicated list.
///
/// The output holds one definition per name, in first-seen order unless sorting is enabled. When
/// schema definitions are enabled and a root operation type was found, a `schema` block closes the
/// list.
pub fn merge_definitions(
    definitions: impl IntoIterator<Item = Definition>,
    config: &MergeConfig,
) -> Result<Vec<Definition>, MergeError> {
    let mut merged: IndexMap<(Namespace, String), Definition> = IndexMap::new();
    let mut schema: Option<SchemaDefinition> = None;
    let mut input_count = 0;

    for definition in definitions {
        input_count += 1;

        if config.is_excluded(definition.name()) {
            tracing::trace!(name = definition.name(), "Excluded from the merge");
            continue;
        }

        let definition = match definition {
            Definition::Schema(incoming) => {
                merge_schema_definitions(&mut schema, incoming);
                continue;
            }
            definition => definition,
        };

        match merged.entry((Namespace::of(&definition), definition.name().to_owned())) {
            Entry::Vacant(entry) => {
                entry.insert(definition);
            }
            Entry::Occupied(mut entry) => merge_definition(entry.get_mut(), definition, config)?,
        }
    }

    let mut definitions = merged.into_values().collect::<Vec<_>>();

    for definition in &mut definitions {
        finalize_definition(definition, config);
    }

    config.sort.apply(&mut definitions, Definition::name);

    if let Some(schema) = synthesize_schema_definition(schema, &definitions, config) {
        definitions.push(Definition::Schema(schema));
    }

    tracing::debug!(input_count, output_count = definitions.len(), "Merged definitions");

    Ok(definitions)
}

/// Merge the definitions of several documents, in document order.
pub fn merge_documents<'a>(
    documents: impl IntoIterator<Item = &'a Document>,
    config: &MergeConfig,
) -> Result<Vec<Definition>, MergeError> {
    merge_definitions(
        documents
            .into_iter()
            .flat_map(|document| document.definitions.iter().cloned()),
        config,
    )
}

/// Types and directives can share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Namespace {
    Type,
    Directive,
}

impl Namespace {
    fn of(definition: &Definition) -> Self {
        match definition {
            Definition::Directive(_) => Namespace::Directive,
            _ => Namespace::Type,
        }
    }
}

fn merge_definition(existing: &mut Definition, incoming: Definition, config: &MergeConfig) -> Result<(), MergeError> {
    match (existing, incoming) {
        (Definition::Object(existing), Definition::Object(incoming)) => {
            merge_description(&mut existing.description, incoming.description);
            existing.interfaces = merge_named_types(mem::take(&mut existing.interfaces), incoming.interfaces);
            existing.directives = merge_directives(mem::take(&mut existing.directives), incoming.directives);
            existing.extension &= incoming.extension;

            merge_fields(&existing.name, &mut existing.fields, incoming.fields, config)
        }
        (Definition::Interface(existing), Definition::Interface(incoming)) => {
            merge_description(&mut existing.description, incoming.description);
            existing.interfaces = merge_named_types(mem::take(&mut existing.interfaces), incoming.interfaces);
            existing.directives = merge_directives(mem::take(&mut existing.directives), incoming.directives);
            existing.extension &= incoming.extension;

            merge_fields(&existing.name, &mut existing.fields, incoming.fields, config)
        }
        (Definition::Union(existing), Definition::Union(incoming)) => {
            merge_description(&mut existing.description, incoming.description);
            existing.members = merge_named_types(mem::take(&mut existing.members), incoming.members);
            existing.directives = merge_directives(mem::take(&mut existing.directives), incoming.directives);
            existing.extension &= incoming.extension;

            Ok(())
        }
        (Definition::Enum(existing), Definition::Enum(incoming)) => {
            merge_description(&mut existing.description, incoming.description);
            merge_enum_values(&mut existing.values, incoming.values);
            existing.directives = merge_directives(mem::take(&mut existing.directives), incoming.directives);
            existing.extension &= incoming.extension;

            Ok(())
        }
        (Definition::Scalar(existing), Definition::Scalar(incoming)) => {
            merge_description(&mut existing.description, incoming.description);
            existing.directives = merge_directives(mem::take(&mut existing.directives), incoming.directives);
            existing.extension &= incoming.extension;

            Ok(())
        }
        (Definition::InputObject(existing), Definition::InputObject(incoming)) => {
            merge_description(&mut existing.description, incoming.description);
            existing.directives = merge_directives(mem::take(&mut existing.directives), incoming.directives);
            existing.extension &= incoming.extension;

            merge_input_fields(&existing.name, &mut existing.fields, incoming.fields, config)
        }
        (Definition::Directive(existing), Definition::Directive(incoming)) => {
            merge_directive_definitions(existing, incoming, config)
        }
        (Definition::Schema(existing), Definition::Schema(incoming)) => {
            let mut schema = Some(mem::take(existing));
            merge_schema_definitions(&mut schema, incoming);
            *existing = schema.unwrap_or_default();

            Ok(())
        }
        (existing, incoming) => {
            if config.throw_on_conflict {
                return Err(MergeError::KindConflict {
                    name: existing.name().to_owned(),
                    existing: existing.kind(),
                    incoming: incoming.kind(),
                });
            }

            tracing::debug!(
                name = existing.name(),
                existing = %existing.kind(),
                incoming = %incoming.kind(),
                "Ignoring a redefinition with a different kind"
            );

            Ok(())
        }
    }
}

/// The first description wins, unless it is missing.
fn merge_description(existing: &mut Option<String>, incoming: Option<String>) {
    if existing.is_none() {
        *existing = incoming;
    }
}

/// Apply the extension and ordering settings to a fully merged definition.
fn finalize_definition(definition: &mut Definition, config: &MergeConfig) {
    if config.convert_extensions {
        definition.set_extension(false);
    }

    let sort = &config.sort;

    if !sort.is_enabled() {
        return;
    }

    match definition {
        Definition::Object(ObjectType { fields, interfaces, .. })
        | Definition::Interface(InterfaceType { fields, interfaces, .. }) => {
            sort.apply(interfaces, String::as_str);
            sort.apply(fields, |field| field.name.as_str());

            for field in fields {
                sort.apply(&mut field.arguments, |argument| argument.name.as_str());
            }
        }
        Definition::InputObject(input_object) => sort.apply(&mut input_object.fields, |field| field.name.as_str()),
        Definition::Union(union) => sort.apply(&mut union.members, String::as_str),
        Definition::Enum(r#enum) => sort.apply(&mut r#enum.values, |value| value.name.as_str()),
        Definition::Directive(directive) => sort.apply(&mut directive.arguments, |argument| argument.name.as_str()),
        Definition::Scalar(_) | Definition::Schema(_) => (),
    }
}
