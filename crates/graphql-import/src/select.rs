//! Which definitions of a visited document an import asks for.

use crate::{
    definitions::{Definition, InterfaceType, ObjectType, is_root_type_name},
    error::UnresolvedReference,
    import_directives::Selector,
    walk::Visit,
};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;

/// The outcome of applying every visit's selectors, in walk order.
#[derive(Debug, Default)]
pub(crate) struct Selection {
    /// Every definition of every visited document.
    pub(crate) all_definitions: Vec<Definition>,
    /// The selected definitions of each visit, with the depth of that visit.
    pub(crate) selected: Vec<(usize, Vec<Definition>)>,
}

impl Selection {
    pub(crate) fn from_visits(visits: &[Visit]) -> Result<Self, UnresolvedReference> {
        let mut selection = Selection::default();

        for visit in visits {
            let candidates = &visit.document.definitions;

            let first_document = selection.selected.is_empty();
            let previous_names = selection
                .all_definitions
                .iter()
                .map(Definition::name)
                .filter(|name| !is_root_type_name(name))
                .collect::<HashSet<_>>();

            let selected = select_definitions(&visit.selectors, candidates, &previous_names, first_document)?;

            tracing::trace!(
                location = %visit.document.location,
                selected = selected.len(),
                "Applied import selectors"
            );

            selection.all_definitions.extend(candidates.iter().cloned());
            selection.selected.push((visit.depth(), selected));
        }

        Ok(selection)
    }

    /// Every selected definition, across all visits.
    pub(crate) fn selected_definitions(&self) -> impl Iterator<Item = &Definition> {
        self.selected.iter().flat_map(|(_, definitions)| definitions)
    }

    /// The definitions the completion starts from: the merged root operation types, the other
    /// definitions selected from the root document, and those selected from its direct imports.
    pub(crate) fn initial_pool(&self) -> Vec<Definition> {
        let mut pool = merge_root_types(self.selected_definitions())
            .into_values()
            .map(Definition::Object)
            .collect::<Vec<_>>();

        pool.extend(
            self.selected
                .iter()
                .filter(|(depth, _)| *depth <= 1)
                .flat_map(|(_, definitions)| definitions)
                .filter(|definition| !is_root_operation_type(definition))
                .cloned(),
        );

        pool
    }
}

/// Filter the definitions of one document by the selectors of the import that reached it.
///
/// * A wildcard on the first document selects everything.
/// * A wildcard on any other document selects its object types that share a name with a
///   definition of a previously visited document.
/// * Otherwise the definitions named by the selectors are selected, and `Type.field` selectors
///   prune the fields of their type.
pub(crate) fn select_definitions(
    selectors: &[Selector],
    candidates: &[Definition],
    previous_names: &HashSet<&str>,
    first_document: bool,
) -> Result<Vec<Definition>, UnresolvedReference> {
    if selectors.contains(&Selector::Wildcard) {
        if first_document {
            return Ok(candidates.to_vec());
        }

        return Ok(candidates
            .iter()
            .filter(|definition| {
                matches!(definition, Definition::Object(object) if previous_names.contains(object.name.as_str()))
            })
            .cloned()
            .collect());
    }

    let type_names = selectors.iter().filter_map(Selector::type_name).collect::<IndexSet<_>>();

    if let Some(missing) = type_names
        .iter()
        .copied()
        .find(|type_name| !candidates.iter().any(|definition| definition.name() == *type_name))
    {
        return Err(UnresolvedReference::Type {
            type_name: missing.to_owned(),
        });
    }

    Ok(candidates
        .iter()
        .filter(|definition| type_names.contains(definition.name()))
        .map(|definition| match selected_fields(selectors, definition.name()) {
            Some(fields) => prune_fields(definition, &fields),
            None => definition.clone(),
        })
        .collect())
}

/// The field names to keep for a type, or `None` to keep all of them.
fn selected_fields<'a>(selectors: &'a [Selector], type_name: &str) -> Option<Vec<&'a str>> {
    let mut fields = Vec::new();

    for selector in selectors {
        match selector {
            Selector::AllFields(name) if name == type_name => return None,
            Selector::Field { type_name: name, field } if name == type_name => fields.push(field.as_str()),
            _ => (),
        }
    }

    (!fields.is_empty()).then_some(fields)
}

/// A copy of `definition` that only keeps the named fields. Definitions without fields are
/// returned unchanged.
fn prune_fields(definition: &Definition, keep: &[&str]) -> Definition {
    let mut pruned = definition.clone();

    match &mut pruned {
        Definition::Object(ObjectType { fields, .. }) | Definition::Interface(InterfaceType { fields, .. }) => {
            fields.retain(|field| keep.contains(&field.name.as_str()));
        }
        Definition::InputObject(input_object) => {
            input_object.fields.retain(|field| keep.contains(&field.name.as_str()));
        }
        Definition::Union(_)
        | Definition::Enum(_)
        | Definition::Scalar(_)
        | Definition::Directive(_)
        | Definition::Schema(_) => (),
    }

    pruned
}

fn is_root_operation_type(definition: &Definition) -> bool {
    matches!(definition, Definition::Object(object) if is_root_type_name(&object.name))
}

/// Merge every selected `Query`, `Mutation` and `Subscription` object by name. Fields are
/// concatenated, and the first field with a given name wins.
fn merge_root_types<'a>(definitions: impl Iterator<Item = &'a Definition>) -> IndexMap<String, ObjectType> {
    let mut merged: IndexMap<String, ObjectType> = IndexMap::new();

    for object in definitions
        .filter(|definition| is_root_operation_type(definition))
        .filter_map(Definition::as_object)
    {
        let Some(existing) = merged.get_mut(&object.name) else {
            merged.insert(object.name.clone(), object.clone());
            continue;
        };

        for field in &object.fields {
            if !existing.fields.iter().any(|known| known.name == field.name) {
                existing.fields.push(field.clone());
            }
        }

        for interface in &object.interfaces {
            if !existing.implements(interface) {
                existing.interfaces.push(interface.clone());
            }
        }

        existing.extension &= object.extension;
    }

    merged
}
