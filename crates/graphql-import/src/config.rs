use std::{cmp::Ordering, fmt, sync::Arc};

/// Settings for the structural merge of definitions.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Synthesize a `schema { ... }` block from the discovered root types.
    pub use_schema_definition: bool,
    /// Emit `schema { query: Query }` even when no root type was discovered.
    pub force_schema_definition: bool,
    /// Fail on incompatible redefinitions instead of keeping the first occurrence.
    pub throw_on_conflict: bool,
    /// Order of merged type names, fields, arguments and enum values.
    pub sort: Sort,
    /// Definition names that are dropped before merging.
    pub exclusions: Vec<String>,
    /// Emit extensions that have no base definition as plain definitions.
    pub convert_extensions: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            use_schema_definition: true,
            force_schema_definition: false,
            throw_on_conflict: false,
            sort: Sort::Disabled,
            exclusions: Vec::new(),
            convert_extensions: false,
        }
    }
}

impl MergeConfig {
    /// Sort with a caller-supplied comparator over names.
    pub fn with_sort_by(mut self, compare: impl Fn(&str, &str) -> Ordering + Send + Sync + 'static) -> Self {
        self.sort = Sort::Custom(Arc::new(compare));
        self
    }

    pub(crate) fn is_excluded(&self, name: &str) -> bool {
        self.exclusions.iter().any(|excluded| excluded == name)
    }
}

/// Deserializes from a boolean: `true` sorts lexicographically.
#[derive(Clone, Default)]
pub enum Sort {
    #[default]
    Disabled,
    Lexicographic,
    Custom(Arc<dyn Fn(&str, &str) -> Ordering + Send + Sync>),
}

impl Sort {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Sort::Disabled)
    }

    /// Stable sort of `items` by the name returned by `key`. A no-op when sorting is disabled.
    pub(crate) fn apply<T>(&self, items: &mut [T], key: impl Fn(&T) -> &str) {
        match self {
            Sort::Disabled => (),
            Sort::Lexicographic => items.sort_by(|a, b| key(a).cmp(key(b))),
            Sort::Custom(compare) => items.sort_by(|a, b| compare(key(a), key(b))),
        }
    }
}

impl fmt::Debug for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Disabled => f.write_str("Disabled"),
            Sort::Lexicographic => f.write_str("Lexicographic"),
            Sort::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Sort {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let enabled = bool::deserialize(deserializer)?;

        Ok(if enabled { Sort::Lexicographic } else { Sort::Disabled })
    }
}

/// Settings for the import walk.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// Maximum number of documents fetched at the same time.
    pub concurrency_limit: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig { concurrency_limit: 64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn merge_config_defaults() {
        let config: MergeConfig = toml::from_str("").unwrap();

        assert!(config.use_schema_definition);
        assert!(!config.force_schema_definition);
        assert!(!config.throw_on_conflict);
        assert!(!config.sort.is_enabled());
        assert!(config.exclusions.is_empty());
    }

    #[test]
    fn merge_config_from_toml() {
        let input = indoc! {r#"
            use_schema_definition = false
            throw_on_conflict = true
            sort = true
            exclusions = ["Internal"]
        "#};

        let config: MergeConfig = toml::from_str(input).unwrap();

        assert!(!config.use_schema_definition);
        assert!(config.throw_on_conflict);
        assert!(matches!(config.sort, Sort::Lexicographic));
        assert!(config.is_excluded("Internal"));
    }

    #[test]
    fn unknown_merge_option_is_rejected() {
        let result = toml::from_str::<MergeConfig>("sort_fields = true");

        assert!(result.is_err());
    }

    #[test]
    fn import_config_defaults() {
        let config: ImportConfig = toml::from_str("").unwrap();

        assert_eq!(config.concurrency_limit, 64);
    }

    #[test]
    fn custom_sort() {
        let config = MergeConfig::default().with_sort_by(|a, b| b.cmp(a));
        let mut names = vec!["a", "c", "b"];

        config.sort.apply(&mut names, |name| *name);

        assert_eq!(names, ["c", "b", "a"]);
    }
}
