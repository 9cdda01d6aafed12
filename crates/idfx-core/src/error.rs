//! Error types for the idfx-core library.
//!
//! Data-quality problems in a document are never errors: they are reported
//! per field in an [`ExtractionReport`](crate::ExtractionReport). The types
//! here cover misconfiguration and the I/O edges.

use thiserror::Error;

/// Main error type for the idfx library.
#[derive(Error, Debug)]
pub enum IdfxError {
    /// Field registry could not be built.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed or written.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Fatal configuration errors raised while building a field registry.
///
/// A registry that fails to build is never handed out, so an extractor can
/// not run against an inconsistent field set.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Two field specs share a key.
    #[error("duplicate field key: {0}")]
    DuplicateKey(String),

    /// A field spec declares no recognition patterns.
    #[error("field {0} has no patterns")]
    EmptyPatterns(String),

    /// A pattern failed to compile.
    #[error("invalid pattern for {key}: {source}")]
    InvalidPattern {
        key: String,
        #[source]
        source: regex::Error,
    },

    /// A pattern has no capture group to take the field value from.
    #[error("pattern {index} for {key} has no capture group")]
    MissingCaptureGroup { key: String, index: usize },

    /// A cross-field rule names a field the registry does not declare.
    #[error("rule references unknown field: {0}")]
    UnknownRuleField(String),

    /// A cross-field rule names a field of the wrong kind.
    #[error("rule requires {key} to be a date field")]
    RuleFieldNotDate { key: String },

    /// A configured required field is not declared.
    #[error("required field is not declared: {0}")]
    UnknownRequiredField(String),
}

/// Errors related to PDF text loading.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The PDF carries too little embedded text (likely a scan).
    #[error("PDF has no usable embedded text ({found} chars, need {required})")]
    NoText { found: usize, required: usize },
}

/// Result type for the idfx library.
pub type Result<T> = std::result::Result<T, IdfxError>;
