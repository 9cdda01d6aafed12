//! Passport parser: matcher, validation, conflict resolution and report
//! assembly in one pass over the text.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::models::report::{ExtractionReport, FieldOutcome, FieldStatus};

use super::matcher::match_field;
use super::registry::{passport_registry, CrossFieldRule, FieldRegistry, FieldSpec};
use super::resolver::{resolve, Candidate};
use super::rules::{parse_date, ValidationContext};
use super::DocumentParser;

/// Field extractor driven by a [`FieldRegistry`].
///
/// Holds no per-document state: one parser can serve any number of
/// documents, from any number of threads.
#[derive(Debug, Clone)]
pub struct PassportParser {
    registry: Arc<FieldRegistry>,
    /// Fixed "today"; the local date is used when unset.
    reference_date: Option<NaiveDate>,
}

impl PassportParser {
    /// Create a parser over the shared default passport registry.
    pub fn new() -> Self {
        Self::with_registry(passport_registry())
    }

    /// Create a parser over a custom registry.
    pub fn with_registry(registry: Arc<FieldRegistry>) -> Self {
        Self {
            registry,
            reference_date: None,
        }
    }

    /// Pin the date used for not-in-the-future checks.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    fn context(&self) -> ValidationContext {
        ValidationContext::new(
            self.reference_date
                .unwrap_or_else(|| Local::now().date_naive()),
        )
    }

    fn extract_field(&self, field: &FieldSpec, text: &str, ctx: &ValidationContext) -> FieldOutcome {
        let captures = match_field(field, text);
        if captures.is_empty() {
            debug!("Field {}: no match", field.key);
            return FieldOutcome::no_match(field.required);
        }

        let mut valid = Vec::new();
        let mut rejected = Vec::new();

        for capture in &captures {
            let candidate = field.kind.normalize(capture.text);
            if field.kind.validate(&candidate, ctx) {
                valid.push(Candidate {
                    value: candidate,
                    pattern_index: capture.pattern_index,
                    offset: capture.offset,
                    confirming: field.is_confirming(capture.pattern_index),
                });
            } else {
                rejected.push(candidate);
            }
        }

        let Some(resolution) = resolve(&valid) else {
            debug!("Field {}: {} captures, none valid", field.key, rejected.len());
            return FieldOutcome::invalid(
                field.required,
                format!("rejected {}", quote_list(&rejected)),
            );
        };

        let (status, diagnostic) = if resolution.is_ambiguous() {
            let values: Vec<String> = resolution
                .competing
                .iter()
                .map(|c| c.value.clone())
                .collect();
            (
                FieldStatus::AmbiguousResolved,
                Some(format!(
                    "chose '{}' among {} candidates: {}",
                    resolution.chosen.value,
                    values.len(),
                    quote_list(&values)
                )),
            )
        } else if !rejected.is_empty() {
            (
                FieldStatus::Matched,
                Some(format!("ignored invalid {}", quote_list(&rejected))),
            )
        } else {
            (FieldStatus::Matched, None)
        };

        debug!(
            "Field {}: {} ({} valid, {} rejected)",
            field.key,
            status,
            valid.len(),
            rejected.len()
        );

        FieldOutcome {
            value: Some(resolution.chosen.value),
            status,
            required: field.required,
            diagnostic,
        }
    }

    fn apply_rules(&self, outcomes: &mut [(String, FieldOutcome)]) {
        for rule in self.registry.rules() {
            match rule {
                CrossFieldRule::NotBefore { field, reference } => {
                    let Some(i) = outcomes.iter().position(|(k, _)| k == field) else {
                        continue;
                    };
                    let Some(j) = outcomes.iter().position(|(k, _)| k == reference) else {
                        continue;
                    };

                    let later = outcomes[i].1.value.as_deref().and_then(parse_date);
                    let earlier = outcomes[j].1.value.as_deref().and_then(parse_date);

                    let (Some(later), Some(earlier)) = (later, earlier) else {
                        continue;
                    };
                    if later >= earlier {
                        continue;
                    }

                    let note = format!(
                        "{} {} is before {} {}",
                        field,
                        later.format("%d/%m/%Y"),
                        reference,
                        earlier.format("%d/%m/%Y")
                    );
                    warn!("Cross-field check failed: {}", note);

                    for index in [i, j] {
                        let required = outcomes[index].1.required;
                        outcomes[index].1 = FieldOutcome::invalid(required, note.clone());
                    }
                }
            }
        }
    }
}

impl Default for PassportParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for PassportParser {
    fn parse(&self, text: &str) -> ExtractionReport {
        info!(
            "Extracting {} fields from {} characters of text",
            self.registry.len(),
            text.len()
        );

        let ctx = self.context();
        let mut outcomes: Vec<(String, FieldOutcome)> = self
            .registry
            .fields()
            .iter()
            .map(|field| (field.key.clone(), self.extract_field(field, text, &ctx)))
            .collect();

        self.apply_rules(&mut outcomes);

        let report = ExtractionReport::new(outcomes);

        let missing = report.missing_required();
        if !missing.is_empty() {
            info!("Missing required fields: {}", missing.join(", "));
        }

        report
    }
}

fn quote_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(", ")
}
