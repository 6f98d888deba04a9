use crate::definitions::{DefinitionKind, Type};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure of the resolve-and-merge pipeline. There is no partial success: the first error
/// aborts the whole operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    ImportSyntax(#[from] ImportSyntaxError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Failed to parse the document at {location}: {message}")]
    Parse { location: String, message: String },
    #[error(transparent)]
    UnresolvedReference(#[from] UnresolvedReference),
    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// A `# import` line that does not follow `import <selectors> from "<path>"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid import directive `{line}`: {reason}")]
pub struct ImportSyntaxError {
    pub line: String,
    pub reason: &'static str,
}

/// Failure reported by a [DocumentProvider](crate::DocumentProvider).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Document not found: {location}")]
    NotFound { location: String },
    #[error("Failed to fetch {location}: {message}")]
    Other { location: String, message: String },
}

impl FetchError {
    pub fn not_found(location: impl Into<String>) -> Self {
        FetchError::NotFound {
            location: location.into(),
        }
    }

    pub fn other(location: impl Into<String>, error: impl ToString) -> Self {
        FetchError::Other {
            location: location.into(),
            message: error.to_string(),
        }
    }
}

/// A name referenced from the definition pool that no visited document defines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnresolvedReference {
    #[error("Field {field}: Couldn't find type {type_name} in any of the schemas.")]
    FieldType { field: String, type_name: String },
    #[error("Couldn't find type {type_name} in any of the schemas.")]
    Type { type_name: String },
    #[error("Couldn't find interface {interface} in any of the schemas.")]
    Interface { interface: String },
    #[error("Couldn't find type {type_name} in any of the schemas.")]
    OperationType { type_name: String },
    #[error("Directive {directive}: Couldn't find type {type_name} in any of the schemas.")]
    Directive { directive: String, type_name: String },
}

impl UnresolvedReference {
    /// The name that could not be found.
    pub fn missing_name(&self) -> &str {
        match self {
            UnresolvedReference::FieldType { type_name, .. }
            | UnresolvedReference::Type { type_name }
            | UnresolvedReference::OperationType { type_name }
            | UnresolvedReference::Directive { type_name, .. } => type_name,
            UnresolvedReference::Interface { interface } => interface,
        }
    }
}

/// Fatal merge conflicts. These are only raised with `throw_on_conflict`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error(
        "Field \"{type_name}.{field}\" already defined with a different type. Declared as \"{existing}\", but you tried to override with \"{incoming}\""
    )]
    FieldTypeConflict {
        type_name: String,
        field: String,
        existing: Type,
        incoming: Type,
    },
    #[error("Unable to merge GraphQL directive \"{name}\".\nExisting directive:\n  {existing}\nReceived directive:\n  {incoming}")]
    DirectiveRedefinitionConflict {
        name: String,
        existing: String,
        incoming: String,
    },
    #[error("\"{name}\" is defined as both `{existing}` and `{incoming}`")]
    KindConflict {
        name: String,
        existing: DefinitionKind,
        incoming: DefinitionKind,
    },
}
