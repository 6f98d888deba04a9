//! `# import A, B.field from "other.graphql"` lines.

use crate::error::ImportSyntaxError;
use regex::Regex;
use std::{fmt, sync::LazyLock};

static IMPORT_LINE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r#"^import\s+(\*|.*?)\s+from\s+("([^"]*)"|'([^']*)')\s*;?$"#));

static SELECTOR: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^([_A-Za-z][_0-9A-Za-z]*)(?:\.([_A-Za-z][_0-9A-Za-z]*|\*))?$"));

/// One import target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `*`: everything the document defines.
    Wildcard,
    /// `TypeName`
    Type(String),
    /// `TypeName.fieldName`
    Field { type_name: String, field: String },
    /// `TypeName.*`
    AllFields(String),
}

impl Selector {
    /// The type name this selector points into. `None` for the wildcard.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Selector::Wildcard => None,
            Selector::Type(type_name) | Selector::AllFields(type_name) | Selector::Field { type_name, .. } => {
                Some(type_name)
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Wildcard => f.write_str("*"),
            Selector::Type(type_name) => f.write_str(type_name),
            Selector::Field { type_name, field } => write!(f, "{type_name}.{field}"),
            Selector::AllFields(type_name) => write!(f, "{type_name}.*"),
        }
    }
}

/// `import <selectors> from "<from>"`. A wildcard selector is always alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportStatement {
    pub selectors: Vec<Selector>,
    pub from: String,
}

impl ImportStatement {
    pub fn is_wildcard(&self) -> bool {
        self.selectors == [Selector::Wildcard]
    }
}

/// Parse a single import line, without its leading `#`.
pub fn parse_import_line(line: &str) -> Result<ImportStatement, ImportSyntaxError> {
    let error = |reason| ImportSyntaxError {
        line: line.to_owned(),
        reason,
    };

    let (Ok(import_line), Ok(selector_pattern)) = (&*IMPORT_LINE, &*SELECTOR) else {
        return Err(error("the import grammar failed to compile"));
    };

    let captures = import_line
        .captures(line.trim())
        .ok_or_else(|| error("expected `import <selectors> from \"<path>\"`"))?;

    let from = captures
        .get(3)
        .or_else(|| captures.get(4))
        .map(|from| from.as_str())
        .unwrap_or_default();

    if from.is_empty() {
        return Err(error("the import path is empty"));
    }

    let selector_list = captures.get(1).map(|selectors| selectors.as_str()).unwrap_or_default();
    let mut selectors = Vec::new();

    for raw in selector_list.split(',').map(str::trim) {
        if raw == "*" {
            selectors.push(Selector::Wildcard);
            continue;
        }

        let selector = selector_pattern
            .captures(raw)
            .ok_or_else(|| error("selectors must be `*`, `Type`, `Type.field` or `Type.*`"))?;

        let type_name = selector[1].to_owned();

        selectors.push(match selector.get(2).map(|field| field.as_str()) {
            None => Selector::Type(type_name),
            Some("*") => Selector::AllFields(type_name),
            Some(field) => Selector::Field {
                type_name,
                field: field.to_owned(),
            },
        });
    }

    if selectors.len() > 1 && selectors.contains(&Selector::Wildcard) {
        return Err(error("a wildcard import cannot be combined with other selectors"));
    }

    Ok(ImportStatement {
        selectors,
        from: from.to_owned(),
    })
}

/// Collect the import statements of a document, in order of appearance.
///
/// Only comment lines starting with `# import ` or `#import ` are considered. Other comments are
/// ignored, but a line that starts like an import and does not parse is an error.
pub fn scan_import_directives(text: &str) -> Result<Vec<ImportStatement>, ImportSyntaxError> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("# import ") || line.starts_with("#import "))
        .map(|line| parse_import_line(line.trim_start_matches('#').trim()))
        .collect()
}
