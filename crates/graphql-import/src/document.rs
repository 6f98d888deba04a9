use crate::{
    definitions::Definition,
    error::{Error, Result},
    import_directives::{ImportStatement, scan_import_directives},
    ingest::ingest_document,
};

/// A parsed SDL document. Immutable once parsed.
#[derive(Debug, Clone)]
pub struct Document {
    /// Where the document was loaded from. Relative imports are resolved against it.
    pub location: String,
    pub raw_text: String,
    pub import_statements: Vec<ImportStatement>,
    pub definitions: Vec<Definition>,
}

impl Document {
    /// Parse the import directives and the definitions of an SDL document.
    pub fn parse(location: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        let location = location.into();
        let raw_text = text.into();
        let import_statements = scan_import_directives(&raw_text)?;

        // A document can consist of import directives only, which the parser rejects as empty.
        let definitions = if has_definitions(&raw_text) {
            let parsed = cynic_parser::parse_type_system_document(&raw_text).map_err(|err| Error::Parse {
                location: location.clone(),
                message: err.to_string(),
            })?;

            ingest_document(&parsed)
        } else {
            Vec::new()
        };

        Ok(Document {
            location,
            raw_text,
            import_statements,
            definitions,
        })
    }

    /// Find a definition by name. Schema definitions are found under `"schema"`.
    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.iter().find(|definition| definition.name() == name)
    }
}

fn has_definitions(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .any(|line| !line.is_empty() && !line.starts_with('#'))
}
