//! Owned representation of the top-level constructs of an SDL document.
//!
//! Every construct is a case of [Definition]. The reference completion and the merge engine match
//! on it exhaustively, so a new kind of definition cannot slip through either of them unnoticed.

mod field_type;
mod value;

pub use self::{
    field_type::{BUILTIN_SCALARS, Type},
    value::Value,
};

pub(crate) use self::value::write_quoted;

use std::fmt;

/// The root operation type names, in the order they appear in a synthesized `schema` block.
pub const ROOT_TYPE_NAMES: [&str; 3] = ["Query", "Mutation", "Subscription"];

/// The key under which a schema definition is stored in name-keyed collections.
pub const SCHEMA_KEY: &str = "schema";

pub(crate) fn is_root_type_name(name: &str) -> bool {
    ROOT_TYPE_NAMES.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Object,
    Interface,
    Union,
    Enum,
    Scalar,
    InputObject,
    Directive,
    Schema,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DefinitionKind::Object => "type",
            DefinitionKind::Interface => "interface",
            DefinitionKind::Union => "union",
            DefinitionKind::Enum => "enum",
            DefinitionKind::Scalar => "scalar",
            DefinitionKind::InputObject => "input",
            DefinitionKind::Directive => "directive",
            DefinitionKind::Schema => "schema",
        })
    }
}

/// A named top-level SDL construct, or the `schema` block.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    Scalar(ScalarType),
    InputObject(InputObjectType),
    Directive(DirectiveDefinition),
    Schema(SchemaDefinition),
}

impl Definition {
    /// The definition name. Schema definitions are keyed by [SCHEMA_KEY].
    pub fn name(&self) -> &str {
        match self {
            Definition::Object(object) => &object.name,
            Definition::Interface(interface) => &interface.name,
            Definition::Union(union) => &union.name,
            Definition::Enum(r#enum) => &r#enum.name,
            Definition::Scalar(scalar) => &scalar.name,
            Definition::InputObject(input_object) => &input_object.name,
            Definition::Directive(directive) => &directive.name,
            Definition::Schema(_) => SCHEMA_KEY,
        }
    }

    pub fn kind(&self) -> DefinitionKind {
        match self {
            Definition::Object(_) => DefinitionKind::Object,
            Definition::Interface(_) => DefinitionKind::Interface,
            Definition::Union(_) => DefinitionKind::Union,
            Definition::Enum(_) => DefinitionKind::Enum,
            Definition::Scalar(_) => DefinitionKind::Scalar,
            Definition::InputObject(_) => DefinitionKind::InputObject,
            Definition::Directive(_) => DefinitionKind::Directive,
            Definition::Schema(_) => DefinitionKind::Schema,
        }
    }

    /// Directives applied to the definition itself. Directive definitions carry none.
    pub fn directives(&self) -> &[Directive] {
        match self {
            Definition::Object(object) => &object.directives,
            Definition::Interface(interface) => &interface.directives,
            Definition::Union(union) => &union.directives,
            Definition::Enum(r#enum) => &r#enum.directives,
            Definition::Scalar(scalar) => &scalar.directives,
            Definition::InputObject(input_object) => &input_object.directives,
            Definition::Schema(schema) => &schema.directives,
            Definition::Directive(_) => &[],
        }
    }

    /// Was this definition written as `extend ...`?
    pub fn is_extension(&self) -> bool {
        match self {
            Definition::Object(object) => object.extension,
            Definition::Interface(interface) => interface.extension,
            Definition::Union(union) => union.extension,
            Definition::Enum(r#enum) => r#enum.extension,
            Definition::Scalar(scalar) => scalar.extension,
            Definition::InputObject(input_object) => input_object.extension,
            Definition::Schema(schema) => schema.extension,
            Definition::Directive(_) => false,
        }
    }

    pub(crate) fn set_extension(&mut self, extension: bool) {
        match self {
            Definition::Object(object) => object.extension = extension,
            Definition::Interface(interface) => interface.extension = extension,
            Definition::Union(union) => union.extension = extension,
            Definition::Enum(r#enum) => r#enum.extension = extension,
            Definition::Scalar(scalar) => scalar.extension = extension,
            Definition::InputObject(input_object) => input_object.extension = extension,
            Definition::Schema(schema) => schema.extension = extension,
            Definition::Directive(_) => (),
        }
    }

    /// Names of the fields, for the kinds that have fields.
    pub fn field_names(&self) -> Option<Vec<&str>> {
        match self {
            Definition::Object(ObjectType { fields, .. }) | Definition::Interface(InterfaceType { fields, .. }) => {
                Some(fields.iter().map(|field| field.name.as_str()).collect())
            }
            Definition::InputObject(input_object) => {
                Some(input_object.fields.iter().map(|field| field.name.as_str()).collect())
            }
            Definition::Union(_)
            | Definition::Enum(_)
            | Definition::Scalar(_)
            | Definition::Directive(_)
            | Definition::Schema(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Definition::Object(object) => Some(object),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub interfaces: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
    pub extension: bool,
}

impl ObjectType {
    pub fn implements(&self, interface_name: &str) -> bool {
        self.interfaces.iter().any(|name| name == interface_name)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    /// Interfaces implemented by this interface.
    pub interfaces: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
    pub extension: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub members: Vec<String>,
    pub extension: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub values: Vec<EnumValueDefinition>,
    pub extension: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub extension: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<InputValueDefinition>,
    pub extension: bool,
}

/// `directive @name(...) repeatable on LOCATION | ...`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectiveDefinition {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    /// Location names as written in SDL, e.g. `FIELD_DEFINITION`.
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaDefinition {
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub operation_types: RootOperationTypes,
    pub extension: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub const ALL: [OperationType; 3] = [OperationType::Query, OperationType::Mutation, OperationType::Subscription];

    /// The conventional type name for this operation: `Query`, `Mutation` or `Subscription`.
    pub fn default_type_name(self) -> &'static str {
        match self {
            OperationType::Query => "Query",
            OperationType::Mutation => "Mutation",
            OperationType::Subscription => "Subscription",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        })
    }
}

/// The operation type map of a `schema { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RootOperationTypes {
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

impl RootOperationTypes {
    pub fn get(&self, operation: OperationType) -> Option<&str> {
        match operation {
            OperationType::Query => self.query.as_deref(),
            OperationType::Mutation => self.mutation.as_deref(),
            OperationType::Subscription => self.subscription.as_deref(),
        }
    }

    pub fn get_mut(&mut self, operation: OperationType) -> &mut Option<String> {
        match operation {
            OperationType::Query => &mut self.query,
            OperationType::Mutation => &mut self.mutation,
            OperationType::Subscription => &mut self.subscription,
        }
    }

    /// Declared operations with their type names, in `query`, `mutation`, `subscription` order.
    pub fn iter(&self) -> impl Iterator<Item = (OperationType, &str)> + '_ {
        OperationType::ALL
            .into_iter()
            .filter_map(|operation| Some((operation, self.get(operation)?)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValueDefinition>,
    pub ty: Type,
    pub directives: Vec<Directive>,
}

/// An argument definition or an input object field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub name: String,
    pub description: Option<String>,
    pub ty: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
}

/// A directive applied to a definition, field, argument or enum value.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<(String, Value)>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Directive {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments
            .iter()
            .find(|(argument_name, _)| argument_name == name)
            .map(|(_, value)| value)
    }
}
