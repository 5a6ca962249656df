//! Error types emitted by the Homestay CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use homestay_core::CatalogItemError;
use thiserror::Error;

/// Errors emitted by the Homestay CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name of the offending path.
        field: &'static str,
        /// Path supplied by the caller.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name of the offending path.
        field: &'static str,
        /// Path supplied by the caller.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name of the offending path.
        field: &'static str,
        /// Path supplied by the caller.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Reading the catalog file failed.
    #[error("failed to read catalog at {path:?}: {source}")]
    ReadCatalog {
        /// Catalog path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The catalog is not a JSON array of listing records.
    #[error("failed to parse catalog JSON at {path:?}: {source}")]
    ParseCatalog {
        /// Catalog path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// A catalog record violates the listing invariants.
    #[error("catalog item {id} is invalid: {source}")]
    InvalidItem {
        /// Identifier of the rejected record.
        id: u64,
        /// Violated invariant.
        #[source]
        source: CatalogItemError,
    },
    /// Two catalog records share an identifier.
    #[error("catalog item {id} appears more than once")]
    DuplicateItem {
        /// Repeated identifier.
        id: u64,
    },
    /// A referenced identifier is not in the catalog.
    #[error("{field} refers to item {id}, which is not in the catalog")]
    UnknownItem {
        /// Flag naming the identifier.
        field: &'static str,
        /// Identifier that could not be found.
        id: u64,
    },
    /// Serialising the command response failed.
    #[error("failed to serialise response: {0}")]
    SerialiseResponse(#[source] serde_json::Error),
    /// Writing the command response failed.
    #[error("failed to write response to {target}: {source}")]
    WriteOutput {
        /// Output path, or `stdout`.
        target: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
