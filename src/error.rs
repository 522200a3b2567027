//! Diagnostic error types for kinlink.
//!
//! Matching itself never fails: absent fields are a valid state and the
//! similarity scorer is total. Errors come from the edges of a run: loading
//! and validating records, reading configuration, and writing exports.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error, Diagnostic)]
pub enum LinkError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),
}

// ---------------------------------------------------------------------------
// Record errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RecordError {
    #[error("record at position {index} has no id")]
    #[diagnostic(
        code(kinlink::record::missing_id),
        help(
            "Every record needs an `id` column or key. \
             Fix the upstream export so each row carries its identifier."
        )
    )]
    MissingId { index: usize },

    #[error("record at position {index} has an empty id")]
    #[diagnostic(
        code(kinlink::record::empty_id),
        help("Text ids must contain at least one character.")
    )]
    EmptyId { index: usize },

    #[error("duplicate record id {id} at positions {first} and {second}")]
    #[diagnostic(
        code(kinlink::record::duplicate_id),
        help(
            "Record ids must be unique across the input set. \
             Deduplicate the source rows before linking."
        )
    )]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },

    #[error("failed to read records from {path}")]
    #[diagnostic(
        code(kinlink::record::read),
        help("Check that the file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse records from {path}: {message}")]
    #[diagnostic(
        code(kinlink::record::parse),
        help(
            "JSON input must be an array of objects; CSV input needs a header row. \
             Field names follow the user record layout (id, first_name, last_name, \
             email, phone_number, national_id, date_of_birth, employment, gender)."
        )
    )]
    Parse { path: String, message: String },

    #[error("unsupported record file format: {path}")]
    #[diagnostic(
        code(kinlink::record::format),
        help("Use a `.json` or `.csv` file extension.")
    )]
    UnsupportedFormat { path: String },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    #[diagnostic(
        code(kinlink::config::read),
        help("Check that the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {path}")]
    #[diagnostic(
        code(kinlink::config::write),
        help("Check that the target directory is writable.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    #[diagnostic(
        code(kinlink::config::parse),
        help("The file must be valid TOML matching the linker config layout.")
    )]
    Parse { path: String, message: String },

    #[error("thread count must be greater than zero")]
    #[diagnostic(
        code(kinlink::config::threads),
        help("Omit `threads` to use the global rayon pool, or set it to 1 or more.")
    )]
    ZeroThreads,

    #[error("failed to build worker pool: {message}")]
    #[diagnostic(code(kinlink::config::thread_pool))]
    ThreadPool { message: String },
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("serialization error: {message}")]
    #[diagnostic(code(kinlink::export::serialize))]
    Serialize { message: String },

    #[error("failed to write export to {path}")]
    #[diagnostic(
        code(kinlink::export::write),
        help("Check that the output directory exists and is writable.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type RecordResult<T> = std::result::Result<T, RecordError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Convenience alias for functions returning kinlink results.
pub type LinkResult<T> = std::result::Result<T, LinkError>;
