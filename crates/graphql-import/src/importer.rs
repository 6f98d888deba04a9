use crate::{
    complete::{SchemaLookup, complete_pool_with_lookup},
    config::{ImportConfig, MergeConfig},
    definitions::Definition,
    document::Document,
    error::Result,
    merge::merge_definitions,
    provider::DocumentProvider,
    render_sdl::render_sdl,
    select::Selection,
    walk::walk,
};

/// Resolves the import directives of a root document into a self-contained definition pool.
///
/// ```no_run
/// # async fn run() -> graphql_import::Result<()> {
/// use graphql_import::{Importer, MemoryProvider, MergeConfig};
///
/// let provider = MemoryProvider::new()
///     .with_document("schema.graphql", "# import User from \"user.graphql\"\ntype Query { me: User }")
///     .with_document("user.graphql", "type User { id: ID! }");
///
/// let sdl = Importer::new(provider)
///     .import_and_merge("schema.graphql", &MergeConfig::default())
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Importer<P> {
    provider: P,
    config: ImportConfig,
}

impl<P> Importer<P>
where
    P: DocumentProvider,
{
    pub fn new(provider: P) -> Self {
        Importer {
            provider,
            config: ImportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    /// Fetch the root document from the provider and import from it.
    pub async fn import(&self, location: &str) -> Result<Vec<Definition>> {
        let sdl = self.provider.fetch(location, location).await?;
        let root = Document::parse(location, sdl)?;

        self.import_document(root).await
    }

    /// Walk the imports of an already parsed root document and complete the pool of selected
    /// definitions with everything they reference.
    ///
    /// The result is deduplicated by name but not merged: the root operation types are combined,
    /// and every other name keeps its first occurrence.
    pub async fn import_document(&self, root: Document) -> Result<Vec<Definition>> {
        let visits = walk(root, &self.provider, &self.config).await?;
        let selection = Selection::from_visits(&visits)?;

        // Selected definitions win over the raw ones, which carry fields a selector may have pruned.
        let mut lookup = SchemaLookup::default();
        lookup.extend(&selection.all_definitions);
        lookup.shadow(selection.selected_definitions());

        // Everything selected is checked, including what deeper imports selected.
        let frontier = selection.selected_definitions().cloned().collect();

        let definitions = complete_pool_with_lookup(
            &selection.all_definitions,
            &lookup,
            selection.initial_pool(),
            frontier,
        )?;

        tracing::debug!(
            documents = visits.len(),
            definitions = definitions.len(),
            "Imported definitions"
        );

        Ok(definitions)
    }

    /// Import from the root document, merge the result and render it as SDL.
    pub async fn import_and_merge(&self, location: &str, config: &MergeConfig) -> Result<String> {
        let definitions = self.import(location).await?;
        let merged = merge_definitions(definitions, config)?;

        Ok(render_sdl(&merged))
    }
}
