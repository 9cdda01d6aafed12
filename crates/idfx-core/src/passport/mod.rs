//! Passport field extraction module.

pub mod matcher;
mod parser;
pub mod registry;
pub mod resolver;
pub mod rules;

pub use matcher::{match_field, RawCapture};
pub use parser::PassportParser;
pub use registry::{passport_registry, CrossFieldRule, FieldRegistry, FieldSpec};
pub use rules::{FieldKind, ValidationContext};

use crate::models::report::ExtractionReport;

/// Separator placed between pages of a multi-page document.
pub const PAGE_BREAK: &str = "\n\n--- PAGE BREAK ---\n\n";

/// Join page texts into one document text.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(PAGE_BREAK)
}

/// Trait for document field parsers.
pub trait DocumentParser {
    /// Extract every declared field from document text.
    fn parse(&self, text: &str) -> ExtractionReport;

    /// Extract from a multi-page document.
    fn parse_pages(&self, pages: &[&str]) -> ExtractionReport {
        self.parse(&join_pages(pages))
    }
}
