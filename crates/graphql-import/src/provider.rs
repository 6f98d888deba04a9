use crate::error::FetchError;
use std::collections::HashMap;

/// Source of SDL documents: filesystem, network, VCS or a module registry.
///
/// `location` is already resolved against the importing document when both look like SDL files.
/// Otherwise it is the raw module reference from the import directive and `importer` is the
/// location of the document containing that directive.
#[async_trait::async_trait]
pub trait DocumentProvider: Send + Sync {
    async fn fetch(&self, location: &str, importer: &str) -> Result<String, FetchError>;
}

#[async_trait::async_trait]
impl<T> DocumentProvider for &T
where
    T: DocumentProvider + ?Sized,
{
    async fn fetch(&self, location: &str, importer: &str) -> Result<String, FetchError> {
        (**self).fetch(location, importer).await
    }
}

/// Documents held in memory, keyed by location.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    documents: HashMap<String, String>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, location: impl Into<String>, sdl: impl Into<String>) -> Self {
        self.insert(location, sdl);
        self
    }

    pub fn insert(&mut self, location: impl Into<String>, sdl: impl Into<String>) {
        self.documents.insert(location.into(), sdl.into());
    }
}

impl<L, S> FromIterator<(L, S)> for MemoryProvider
where
    L: Into<String>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (L, S)>>(iter: I) -> Self {
        MemoryProvider {
            documents: iter
                .into_iter()
                .map(|(location, sdl)| (location.into(), sdl.into()))
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl DocumentProvider for MemoryProvider {
    async fn fetch(&self, location: &str, _importer: &str) -> Result<String, FetchError> {
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::not_found(location))
    }
}
