//! Rule-based normalizers and validators for passport fields.

pub mod dates;
pub mod patterns;
pub mod text;

pub use dates::{normalize_date, parse_date, validate_date};
pub use text::{collapse_whitespace, validate_code, validate_name, validate_sex};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inputs to validation that do not come from the document itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// Date treated as "today" for not-in-the-future checks.
    pub today: NaiveDate,
}

impl ValidationContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

/// Shape of a field's value, which fixes how it is normalized and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Uppercase alphanumeric token (`[A-Z0-9]+`) of at least `min_len` chars.
    Code { min_len: usize },
    /// Alphabetic name run, uppercased.
    Name,
    /// Free text such as a place, uppercased.
    Text,
    /// Day-first `DD/MM/YYYY` date.
    Date {
        #[serde(default)]
        not_after_current_year: bool,
    },
    /// Sex marker, `M` or `F`.
    Sex,
}

impl FieldKind {
    /// Clean a raw capture: trim, collapse whitespace, then apply the
    /// kind-specific casing and cleanup.
    pub fn normalize(&self, raw: &str) -> String {
        match self {
            FieldKind::Code { .. } => text::normalize_code(raw),
            FieldKind::Name => text::normalize_name(raw),
            FieldKind::Text => text::normalize_text(raw),
            FieldKind::Date { .. } => normalize_date(&collapse_whitespace(raw)),
            FieldKind::Sex => text::normalize_sex(raw),
        }
    }

    /// Structural acceptance test for a normalized candidate.
    pub fn validate(&self, candidate: &str, ctx: &ValidationContext) -> bool {
        match *self {
            FieldKind::Code { min_len } => validate_code(candidate, min_len),
            FieldKind::Name => validate_name(candidate),
            FieldKind::Text => text::validate_text(candidate),
            FieldKind::Date {
                not_after_current_year,
            } => validate_date(candidate, not_after_current_year, ctx.today),
            FieldKind::Sex => validate_sex(candidate),
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, FieldKind::Date { .. })
    }

    /// Short label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Code { .. } => "code",
            FieldKind::Name => "name",
            FieldKind::Text => "text",
            FieldKind::Date { .. } => "date",
            FieldKind::Sex => "sex",
        }
    }
}
