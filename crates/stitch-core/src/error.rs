use std::path::PathBuf;
use std::result;
use thiserror::Error;

/// Pipeline errors. All of them are recoverable from the wrapper's point of
/// view: the caller abandons instrumentation for the whole invocation and
/// forwards the original argument list.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },
    #[error("invalid probe statement template {template:?}: {source}")]
    Template {
        template: String,
        #[source]
        source: syn::Error,
    },
    #[error("failed to emit instrumented file {path}: {source}")]
    Emit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = result::Result<T, Error>;
