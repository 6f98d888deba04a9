//! Traversal of the documents reachable through import directives.
//!
//! The walk runs in two phases. Every reachable document is first fetched concurrently, once per
//! location, bounded by a global limit on in-flight fetches. The import tree is then replayed
//! depth-first over the fetched documents, so the visits and their order do not depend on which
//! fetch finished first.

use crate::{
    config::ImportConfig,
    document::Document,
    error::{FetchError, Result},
    import_directives::Selector,
    provider::DocumentProvider,
};
use futures::future::BoxFuture;
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, PoisonError},
};
use tokio::sync::Semaphore;

const SDL_EXTENSIONS: &[&str] = &["graphql", "graphqls", "gql"];

/// One processed `(document, selectors)` pair.
#[derive(Debug, Clone)]
pub(crate) struct Visit {
    /// Index path of the import statements leading from the root document to this one.
    pub(crate) position: Vec<usize>,
    pub(crate) selectors: Vec<Selector>,
    pub(crate) document: Arc<Document>,
}

impl Visit {
    /// 0 for the root document, 1 for the documents it imports directly, and so on.
    pub(crate) fn depth(&self) -> usize {
        self.position.len()
    }
}

/// Walk every document reachable from `root`. The root is visited with a wildcard selector.
///
/// Fails fast: the first fetch or parse error aborts the walk and drops the in-flight fetches.
pub(crate) async fn walk<P>(root: Document, provider: &P, config: &ImportConfig) -> Result<Vec<Visit>>
where
    P: DocumentProvider + ?Sized,
{
    tracing::debug!(root = %root.location, "Walking imports");

    let root = Arc::new(root);

    let fetcher = Fetcher {
        provider,
        fetch_permits: Semaphore::new(config.concurrency_limit.max(1)),
        claimed: Mutex::new(HashSet::from([root.location.clone()])),
        documents: Mutex::new(HashMap::new()),
    };

    fetcher.fetch_imports(Arc::clone(&root)).await?;

    let mut documents = fetcher.documents.into_inner().unwrap_or_else(PoisonError::into_inner);
    documents.insert(root.location.clone(), Arc::clone(&root));

    let mut replay = Replay {
        documents: &documents,
        visited: HashSet::from([(root.location.clone(), vec![Selector::Wildcard])]),
        visits: Vec::new(),
    };

    replay.visit(Vec::new(), vec![Selector::Wildcard], root)?;

    tracing::debug!(
        documents = documents.len(),
        visits = replay.visits.len(),
        "Finished walking imports"
    );

    Ok(replay.visits)
}

/// Resolve the `from` part of an import directive against the location of the importing document.
///
/// When both look like SDL files, `from` is a path relative to the importer's directory and is
/// normalized lexically. Anything else is a module reference and is returned untouched, for the
/// provider to interpret.
pub(crate) fn resolve_location(importer: &str, from: &str) -> String {
    if !(looks_like_sdl_file(importer) && looks_like_sdl_file(from)) {
        return from.to_owned();
    }

    if from.starts_with('/') {
        return normalize_path(from);
    }

    match importer.rfind('/') {
        Some(idx) => normalize_path(&format!("{}/{from}", &importer[..idx])),
        None => normalize_path(from),
    }
}

fn looks_like_sdl_file(location: &str) -> bool {
    location
        .rsplit_once('.')
        .is_some_and(|(_, extension)| SDL_EXTENSIONS.contains(&extension))
}

fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "." => (),
            ".." => match segments.last() {
                Some(&last) if !last.is_empty() && last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            segment => segments.push(segment),
        }
    }

    segments.join("/")
}

/// Fetches every document reachable from the root, each location once.
struct Fetcher<'p, P: ?Sized> {
    provider: &'p P,
    fetch_permits: Semaphore,
    /// Locations already fetched or being fetched by some branch.
    claimed: Mutex<HashSet<String>>,
    documents: Mutex<HashMap<String, Arc<Document>>>,
}

impl<P> Fetcher<'_, P>
where
    P: DocumentProvider + ?Sized,
{
    fn fetch_imports<'f>(&'f self, document: Arc<Document>) -> BoxFuture<'f, Result<()>> {
        Box::pin(async move {
            let children = document
                .import_statements
                .iter()
                .filter_map(|statement| {
                    let target = resolve_location(&document.location, &statement.from);

                    if !self.claim(&target) {
                        return None;
                    }

                    let importer = document.location.clone();

                    Some(async move {
                        let child = self.fetch(&target, &importer).await?;
                        self.fetch_imports(child).await
                    })
                })
                .collect::<Vec<_>>();

            futures::future::try_join_all(children).await?;

            Ok(())
        })
    }

    /// Atomically check and mark a location as claimed. Returns `false` when it already was.
    fn claim(&self, location: &str) -> bool {
        self.claimed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.to_owned())
    }

    async fn fetch(&self, location: &str, importer: &str) -> Result<Arc<Document>> {
        let sdl = {
            let _permit = self.fetch_permits.acquire().await;
            self.provider.fetch(location, importer).await?
        };

        let document = Arc::new(Document::parse(location, sdl)?);

        tracing::trace!(%location, %importer, "Fetched document");

        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.to_owned(), Arc::clone(&document));

        Ok(document)
    }
}

/// Depth-first walk of the import tree over already fetched documents.
struct Replay<'d> {
    documents: &'d HashMap<String, Arc<Document>>,
    /// `(resolved location, selectors)` pairs already visited.
    visited: HashSet<(String, Vec<Selector>)>,
    visits: Vec<Visit>,
}

impl Replay<'_> {
    fn visit(&mut self, position: Vec<usize>, selectors: Vec<Selector>, document: Arc<Document>) -> Result<()> {
        tracing::trace!(location = %document.location, depth = position.len(), "Visiting document");

        self.visits.push(Visit {
            position: position.clone(),
            selectors,
            document: Arc::clone(&document),
        });

        for (idx, statement) in document.import_statements.iter().enumerate() {
            let target = resolve_location(&document.location, &statement.from);

            if !self.visited.insert((target.clone(), statement.selectors.clone())) {
                tracing::trace!(%target, importer = %document.location, "Import already processed, skipping");
                continue;
            }

            let Some(child) = self.documents.get(&target).cloned() else {
                return Err(FetchError::not_found(target).into());
            };

            let mut child_position = position.clone();
            child_position.push(idx);

            self.visit(child_position, statement.selectors.clone(), child)?;
        }

        Ok(())
    }
}
