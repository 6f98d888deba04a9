//! Transitive closure of the definition pool over type references.
//!
//! Starting from the selected definitions, every named type, interface, union member, operation
//! type and custom directive they reference is pulled in from the visited documents, until nothing
//! is left to pull.

use crate::{definitions::*, error::UnresolvedReference};
use std::collections::{HashMap, HashSet, VecDeque};

/// Directives every GraphQL server knows about. Their usages never require a definition.
pub const BUILTIN_DIRECTIVES: &[&str] = &[
    "deprecated",
    "skip",
    "include",
    "specifiedBy",
    "key",
    "external",
    "requires",
    "provides",
];

/// Definitions by name, across every visited document. Directive definitions live in their own
/// namespace, and type extensions are kept apart from the types they extend.
#[derive(Debug, Default)]
pub(crate) struct SchemaLookup<'a> {
    types: HashMap<&'a str, &'a Definition>,
    directives: HashMap<&'a str, &'a Definition>,
    extensions: HashMap<&'a str, Vec<&'a Definition>>,
}

impl<'a> SchemaLookup<'a> {
    /// Insert definitions in order. A later definition with the same name replaces an earlier one,
    /// while extensions accumulate.
    pub(crate) fn extend(&mut self, definitions: impl IntoIterator<Item = &'a Definition>) {
        for definition in definitions {
            self.insert(definition);
        }
    }

    pub(crate) fn insert(&mut self, definition: &'a Definition) {
        let namespace = match definition {
            Definition::Directive(_) => &mut self.directives,
            definition if definition.is_extension() => {
                let extensions = self.extensions.entry(definition.name()).or_default();

                if !extensions.contains(&definition) {
                    extensions.push(definition);
                }

                return;
            }
            _ => &mut self.types,
        };

        namespace.insert(definition.name(), definition);
    }

    /// Replace the types and directives of the same name. Extensions are left alone, since a
    /// pruned extension cannot be told apart from an unrelated one.
    pub(crate) fn shadow(&mut self, definitions: impl IntoIterator<Item = &'a Definition>) {
        for definition in definitions.into_iter().filter(|definition| !definition.is_extension()) {
            self.insert(definition);
        }
    }

    fn get_type(&self, name: &str) -> Option<&'a Definition> {
        self.types.get(name).copied()
    }

    fn get_directive(&self, name: &str) -> Option<&'a Definition> {
        self.directives.get(name).copied()
    }

    fn extensions_of(&self, name: &str) -> &[&'a Definition] {
        self.extensions.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Grow `initial_pool` with everything it references, looking definitions up in
/// `all_definitions`. Later definitions shadow earlier ones with the same name.
///
/// The references of the initial definitions are followed first, then those of `frontier`. A
/// frontier definition is checked but only joins the pool when something references it.
///
/// The result is deduplicated by name, keeping the first occurrence, and preserves pool order:
/// the initial definitions first, then the pulled ones in discovery order. Type extensions are
/// kept next to their base type, for the merge to fold them.
pub fn complete_pool(
    all_definitions: &[Definition],
    initial_pool: Vec<Definition>,
    frontier: Vec<Definition>,
) -> Result<Vec<Definition>, UnresolvedReference> {
    let mut lookup = SchemaLookup::default();
    lookup.extend(all_definitions);

    complete_pool_with_lookup(all_definitions, &lookup, initial_pool, frontier)
}

pub(crate) fn complete_pool_with_lookup(
    all_definitions: &[Definition],
    lookup: &SchemaLookup<'_>,
    initial_pool: Vec<Definition>,
    frontier: Vec<Definition>,
) -> Result<Vec<Definition>, UnresolvedReference> {
    tracing::debug!(
        initial = initial_pool.len(),
        frontier = frontier.len(),
        "Completing definition pool"
    );

    let mut pool = DefinitionPool::default();
    let mut worklist = Worklist::default();

    for definition in initial_pool {
        if pool.push(definition.clone()) {
            worklist.push(definition);
        }
    }

    for definition in frontier {
        worklist.push(definition);
    }

    while let Some(definition) = worklist.pop() {
        let collected = {
            let mut collector = Collector {
                pool: &pool,
                lookup,
                all_definitions,
                collected: Vec::new(),
            };

            collector.collect_definition(&definition)?;
            collector.collected
        };

        for collected in collected {
            tracing::trace!(name = collected.name(), kind = %collected.kind(), "Pulled definition into the pool");

            if pool.push(collected.clone()) {
                worklist.push(collected);
            }
        }
    }

    Ok(pool.into_definitions())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PoolKey {
    Type(String),
    Extension(String),
    Directive(String),
}

impl PoolKey {
    fn of(definition: &Definition) -> Self {
        match definition {
            Definition::Directive(directive) => PoolKey::Directive(directive.name.clone()),
            definition if definition.is_extension() => PoolKey::Extension(definition.name().to_owned()),
            definition => PoolKey::Type(definition.name().to_owned()),
        }
    }
}

/// Append-only list of definitions. Types and directives are unique by name, extensions by
/// content.
#[derive(Debug, Default)]
struct DefinitionPool {
    definitions: Vec<Definition>,
    names: HashSet<PoolKey>,
}

impl DefinitionPool {
    /// Returns `false` when the definition was already in the pool.
    fn push(&mut self, definition: Definition) -> bool {
        if self.contains(&definition) {
            return false;
        }

        self.names.insert(PoolKey::of(&definition));
        self.definitions.push(definition);

        true
    }

    fn contains(&self, definition: &Definition) -> bool {
        if definition.is_extension() {
            self.definitions.contains(definition)
        } else {
            self.names.contains(&PoolKey::of(definition))
        }
    }

    fn contains_key(&self, key: &PoolKey) -> bool {
        self.names.contains(key)
    }

    fn into_definitions(self) -> Vec<Definition> {
        self.definitions
    }
}

/// Definitions whose references are still to be followed. Each one is processed once.
#[derive(Debug, Default)]
struct Worklist {
    queue: VecDeque<Definition>,
    processed: HashSet<PoolKey>,
    processed_extensions: Vec<Definition>,
}

impl Worklist {
    fn push(&mut self, definition: Definition) {
        self.queue.push_back(definition);
    }

    fn pop(&mut self) -> Option<Definition> {
        while let Some(definition) = self.queue.pop_front() {
            let first_time = if definition.is_extension() {
                !self.processed_extensions.contains(&definition)
            } else {
                self.processed.insert(PoolKey::of(&definition))
            };

            if !first_time {
                continue;
            }

            if definition.is_extension() {
                self.processed_extensions.push(definition.clone());
            }

            return Some(definition);
        }

        None
    }
}

/// Collects the definitions referenced by one definition that are not in the pool yet.
struct Collector<'c, 'a> {
    pool: &'c DefinitionPool,
    lookup: &'c SchemaLookup<'a>,
    all_definitions: &'a [Definition],
    collected: Vec<Definition>,
}

impl Collector<'_, '_> {
    fn collect_definition(&mut self, definition: &Definition) -> Result<(), UnresolvedReference> {
        self.collect_directives(definition.directives())?;

        match definition {
            Definition::Object(object) => {
                self.collect_interfaces(&object.interfaces)?;
                self.collect_fields(&object.fields)
            }
            Definition::Interface(interface) => {
                self.collect_interfaces(&interface.interfaces)?;
                self.collect_fields(&interface.fields)?;
                self.collect_implementations(&interface.name);
                Ok(())
            }
            Definition::InputObject(input_object) => self.collect_input_values(&input_object.fields),
            Definition::Union(union) => {
                for member in &union.members {
                    self.require_type(member, || UnresolvedReference::Type {
                        type_name: member.clone(),
                    })?;
                }
                Ok(())
            }
            Definition::Enum(r#enum) => {
                for value in &r#enum.values {
                    self.collect_directives(&value.directives)?;
                }
                Ok(())
            }
            Definition::Scalar(_) => Ok(()),
            Definition::Schema(schema) => {
                for (_, type_name) in schema.operation_types.iter() {
                    self.require_type(type_name, || UnresolvedReference::OperationType {
                        type_name: type_name.to_owned(),
                    })?;
                }
                Ok(())
            }
            Definition::Directive(directive) => {
                for argument in &directive.arguments {
                    let type_name = argument.ty.named_type();

                    self.require_type(type_name, || UnresolvedReference::Directive {
                        directive: directive.name.clone(),
                        type_name: type_name.to_owned(),
                    })?;
                }
                Ok(())
            }
        }
    }

    fn collect_interfaces(&mut self, interfaces: &[String]) -> Result<(), UnresolvedReference> {
        for interface in interfaces {
            self.require_type(interface, || UnresolvedReference::Interface {
                interface: interface.clone(),
            })?;
        }

        Ok(())
    }

    fn collect_fields(&mut self, fields: &[FieldDefinition]) -> Result<(), UnresolvedReference> {
        for field in fields {
            let type_name = field.ty.named_type();

            self.require_type(type_name, || UnresolvedReference::FieldType {
                field: field.name.clone(),
                type_name: type_name.to_owned(),
            })?;

            self.collect_directives(&field.directives)?;
            self.collect_input_values(&field.arguments)?;
        }

        Ok(())
    }

    fn collect_input_values(&mut self, input_values: &[InputValueDefinition]) -> Result<(), UnresolvedReference> {
        for input_value in input_values {
            let type_name = input_value.ty.named_type();

            self.require_type(type_name, || UnresolvedReference::FieldType {
                field: input_value.name.clone(),
                type_name: type_name.to_owned(),
            })?;

            self.collect_directives(&input_value.directives)?;
        }

        Ok(())
    }

    /// Every object type implementing `interface` comes along with it, including types that only
    /// implement it through an extension.
    fn collect_implementations(&mut self, interface: &str) {
        let all_definitions = self.all_definitions;

        for object in all_definitions.iter().filter_map(Definition::as_object) {
            if object.implements(interface) {
                self.pull_type(&object.name);
            }
        }
    }

    fn collect_directives(&mut self, directives: &[Directive]) -> Result<(), UnresolvedReference> {
        for directive in directives {
            if BUILTIN_DIRECTIVES.contains(&directive.name.as_str()) {
                continue;
            }

            let key = PoolKey::Directive(directive.name.clone());

            if self.is_known(&key) {
                continue;
            }

            let definition = self
                .lookup
                .get_directive(&directive.name)
                .ok_or_else(|| UnresolvedReference::Directive {
                    directive: directive.name.clone(),
                    type_name: directive.name.clone(),
                })?;

            self.collected.push(definition.clone());
        }

        Ok(())
    }

    fn require_type(
        &mut self,
        name: &str,
        unresolved: impl FnOnce() -> UnresolvedReference,
    ) -> Result<(), UnresolvedReference> {
        if BUILTIN_SCALARS.contains(&name) || self.pull_type(name) {
            Ok(())
        } else {
            Err(unresolved())
        }
    }

    /// Pull the definition of a type, and the extensions of it found in any visited document.
    /// Returns `false` when no document defines the type. Extensions alone do not count.
    fn pull_type(&mut self, name: &str) -> bool {
        if self.is_known(&PoolKey::Type(name.to_owned())) {
            return true;
        }

        let Some(definition) = self.lookup.get_type(name) else {
            return false;
        };

        self.collected.push(definition.clone());

        for &extension in self.lookup.extensions_of(name) {
            if !self.pool.contains(extension) && !self.collected.contains(extension) {
                self.collected.push(extension.clone());
            }
        }

        true
    }

    fn is_known(&self, key: &PoolKey) -> bool {
        self.pool.contains_key(key)
            || self
                .collected
                .iter()
                .any(|collected| PoolKey::of(collected) == *key)
    }
}
