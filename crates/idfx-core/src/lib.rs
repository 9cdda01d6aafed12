//! Core library for identity-document field extraction.
//!
//! This crate provides:
//! - A field registry declaring passport fields, their patterns and rules
//! - Pattern matching that keeps every candidate, not just the first
//! - Normalization, validation and cross-field checks
//! - Deterministic conflict resolution and a per-field extraction report
//! - Embedded-text loading for PDFs (`native` feature)
//!
//! ```
//! use idfx_core::{DocumentParser, FieldStatus, PassportParser};
//!
//! let report = PassportParser::new().parse("Passport No: AB1234567\nSurname: DOE");
//! assert_eq!(report.value("passportNumber"), Some("AB1234567"));
//! assert_eq!(report.status("surname"), Some(FieldStatus::Matched));
//! ```

pub mod error;
pub mod models;
pub mod passport;
#[cfg(feature = "native")]
pub mod pdf;

pub use error::{IdfxError, PdfError, RegistryError, Result};
pub use models::config::IdfxConfig;
pub use models::report::{ExtractionReport, FieldOutcome, FieldStatus};
pub use passport::{
    join_pages, passport_registry, CrossFieldRule, DocumentParser, FieldKind, FieldRegistry,
    FieldSpec, PassportParser, PAGE_BREAK,
};
#[cfg(feature = "native")]
pub use pdf::{read_pdf_text, PdfSource, PdfTextExtractor};
