//! Resolution of `# import` directives across GraphQL SDL documents, and structural merging of the
//! resulting definitions into one schema.
//!
//! An [Importer] walks the import directives of a root document through a [DocumentProvider],
//! selects the requested definitions from every reached document and completes them with
//! everything they reference. [merge_definitions] then folds same-named definitions together, and
//! [render_sdl] prints the result.

mod complete;
mod config;
mod definitions;
mod document;
mod error;
mod import_directives;
mod importer;
mod ingest;
mod merge;
mod provider;
mod render_sdl;
mod select;
mod walk;

pub use self::{
    complete::{BUILTIN_DIRECTIVES, complete_pool},
    config::{ImportConfig, MergeConfig, Sort},
    definitions::*,
    document::Document,
    error::{Error, FetchError, ImportSyntaxError, MergeError, Result, UnresolvedReference},
    import_directives::{ImportStatement, Selector, parse_import_line, scan_import_directives},
    importer::Importer,
    merge::{merge_definitions, merge_documents},
    provider::{DocumentProvider, MemoryProvider},
    render_sdl::render_sdl,
};
