use std::fmt;

pub const BUILTIN_SCALARS: &[&str] = &["ID", "String", "Int", "Float", "Boolean"];

/// The type of a field, argument or input field, with its list and non-null wrappers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Named(String),
    List(Box<Type>),
    NonNull(Box<Type>),
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    pub fn list(self) -> Self {
        Type::List(Box::new(self))
    }

    pub fn non_null(self) -> Self {
        Type::NonNull(Box::new(self))
    }

    /// The innermost named type.
    ///
    /// ```ignore,graphql
    /// type MyObject {
    ///   nested: [Nested!]!
    ///            ^^^^^^
    /// }
    /// ```
    pub fn named_type(&self) -> &str {
        match self {
            Type::Named(name) => name,
            Type::List(inner) | Type::NonNull(inner) => inner.named_type(),
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Type::NonNull(_))
    }

    pub fn is_builtin_scalar(&self) -> bool {
        BUILTIN_SCALARS.contains(&self.named_type())
    }

    /// Can a field declared as `self` be redeclared as `other` without breaking anything?
    ///
    /// Identical types are compatible. Going from nullable to non-null is, recursively through
    /// list wrappers. Anything else (different named type, different list nesting, dropping a
    /// non-null wrapper) is not.
    pub fn is_safe_change_to(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Named(a), Type::Named(b)) => a == b,
            (Type::NonNull(a), Type::NonNull(b)) | (Type::List(a), Type::List(b)) => a.is_safe_change_to(b),
            (a, Type::NonNull(b)) => a.is_safe_change_to(b),
            (Type::NonNull(_), _) | (Type::List(_), Type::Named(_)) | (Type::Named(_), Type::List(_)) => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named(name) => f.write_str(name),
            Type::List(inner) => write!(f, "[{inner}]"),
            Type::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}
