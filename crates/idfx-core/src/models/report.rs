//! Extraction report data model.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Per-field extraction status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    /// One valid candidate was found (or only agreeing restatements of it).
    Matched,
    /// No pattern matched.
    NoMatch,
    /// Captures existed but none passed validation, or a cross-field rule failed.
    InvalidFormat,
    /// Several valid candidates were found; one was chosen deterministically.
    AmbiguousResolved,
}

impl FieldStatus {
    /// Whether the field carries a usable value.
    pub fn has_value(&self) -> bool {
        matches!(self, FieldStatus::Matched | FieldStatus::AmbiguousResolved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldStatus::Matched => "matched",
            FieldStatus::NoMatch => "no_match",
            FieldStatus::InvalidFormat => "invalid_format",
            FieldStatus::AmbiguousResolved => "ambiguous_resolved",
        }
    }
}

impl std::fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result for one declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOutcome {
    /// Normalized value, absent unless the status carries one.
    pub value: Option<String>,

    /// Extraction status.
    pub status: FieldStatus,

    /// Whether the registry declares the field as required.
    pub required: bool,

    /// Human-readable note on rejected or competing candidates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl FieldOutcome {
    pub fn no_match(required: bool) -> Self {
        Self {
            value: None,
            status: FieldStatus::NoMatch,
            required,
            diagnostic: None,
        }
    }

    pub fn invalid(required: bool, diagnostic: impl Into<String>) -> Self {
        Self {
            value: None,
            status: FieldStatus::InvalidFormat,
            required,
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// A required field without a usable value.
    pub fn is_missing_required(&self) -> bool {
        self.required && !self.status.has_value()
    }
}

/// Outcome for every registry field, in registry order.
///
/// Serializes as a JSON object keyed by field key, preserving that order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionReport {
    fields: Vec<(String, FieldOutcome)>,
}

impl ExtractionReport {
    pub fn new(fields: Vec<(String, FieldOutcome)>) -> Self {
        Self { fields }
    }

    /// Outcome for a field.
    pub fn get(&self, key: &str) -> Option<&FieldOutcome> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, o)| o)
    }

    /// Value for a field, if it has one.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|o| o.value.as_deref())
    }

    /// Status for a field.
    pub fn status(&self, key: &str) -> Option<FieldStatus> {
        self.get(key).map(|o| o.status)
    }

    /// Iterate over `(key, outcome)` in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldOutcome)> {
        self.fields.iter().map(|(k, o)| (k.as_str(), o))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Required fields that ended with `NoMatch` or `InvalidFormat`.
    pub fn missing_required(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, o)| o.is_missing_required())
            .map(|(k, _)| k)
            .collect()
    }

    /// True when every required field carries a value.
    pub fn is_complete(&self) -> bool {
        self.fields.iter().all(|(_, o)| !o.is_missing_required())
    }

    /// Number of fields with the given status.
    pub fn count(&self, status: FieldStatus) -> usize {
        self.fields.iter().filter(|(_, o)| o.status == status).count()
    }

    /// Flat `key -> value` view, absent values as `None`.
    pub fn values(&self) -> Vec<(&str, Option<&str>)> {
        self.iter().map(|(k, o)| (k, o.value.as_deref())).collect()
    }

    /// Copy without diagnostics, for consumers that only need values.
    pub fn without_diagnostics(&self) -> Self {
        let fields = self
            .fields
            .iter()
            .map(|(k, o)| {
                let mut outcome = o.clone();
                outcome.diagnostic = None;
                (k.clone(), outcome)
            })
            .collect();
        Self { fields }
    }
}

impl Serialize for ExtractionReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, outcome) in &self.fields {
            map.serialize_entry(key, outcome)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ExtractionReport {
        ExtractionReport::new(vec![
            (
                "passportNumber".to_string(),
                FieldOutcome {
                    value: Some("AB1234567".to_string()),
                    status: FieldStatus::Matched,
                    required: true,
                    diagnostic: None,
                },
            ),
            ("surname".to_string(), FieldOutcome::no_match(true)),
            ("fileNumber".to_string(), FieldOutcome::no_match(false)),
            (
                "sex".to_string(),
                FieldOutcome::invalid(false, "rejected candidate 'X'"),
            ),
        ])
    }

    #[test]
    fn test_missing_required() {
        let report = sample();
        assert_eq!(report.missing_required(), vec!["surname"]);
        assert!(!report.is_complete());
        assert_eq!(report.count(FieldStatus::NoMatch), 2);
    }

    #[test]
    fn test_accessors() {
        let report = sample();
        assert_eq!(report.value("passportNumber"), Some("AB1234567"));
        assert_eq!(report.value("surname"), None);
        assert_eq!(report.status("sex"), Some(FieldStatus::InvalidFormat));
        assert_eq!(report.status("visa"), None);
    }

    #[test]
    fn test_serializes_in_registry_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"passportNumber":{"value":"AB1234567","status":"matched","required":true},"#,
                r#""surname":{"value":null,"status":"no_match","required":true},"#,
                r#""fileNumber":{"value":null,"status":"no_match","required":false},"#,
                r#""sex":{"value":null,"status":"invalid_format","required":false,"diagnostic":"rejected candidate 'X'"}}"#
            )
        );
    }

    #[test]
    fn test_without_diagnostics() {
        let report = sample().without_diagnostics();
        assert!(report.iter().all(|(_, o)| o.diagnostic.is_none()));
    }
}
