//! Configuration structures for the extraction pipeline.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{IdfxError, RegistryError};
use crate::passport::{passport_registry, FieldKind, FieldRegistry, FieldSpec, PassportParser};

/// Main configuration for idfx.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdfxConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF text loading configuration.
    pub pdf: PdfConfig,

    /// Report output configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Replaces the default required set when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_fields: Option<Vec<String>>,

    /// Date used as "today" (defaults to the local date).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,

    /// Extra fields appended to the passport registry.
    pub custom_fields: Vec<CustomFieldConfig>,
}

/// A user-declared field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomFieldConfig {
    /// Field key, unique across the registry.
    pub key: String,

    /// Regex sources in priority order; group 1 or `(?P<value>...)` is the value.
    pub patterns: Vec<String>,

    /// Normalization and validation rules.
    pub kind: FieldKind,

    #[serde(default)]
    pub required: bool,
}

/// PDF text loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum embedded text length to treat a PDF as text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Keep per-field diagnostics in written reports.
    pub include_diagnostics: bool,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_diagnostics: true,
            pretty: false,
        }
    }
}

impl IdfxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, IdfxError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| IdfxError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), IdfxError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| IdfxError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the field registry this configuration describes.
    ///
    /// Without overrides this is the shared default registry.
    pub fn build_registry(&self) -> Result<Arc<FieldRegistry>, RegistryError> {
        let extraction = &self.extraction;
        if extraction.custom_fields.is_empty() && extraction.required_fields.is_none() {
            return Ok(passport_registry());
        }

        let custom = extraction
            .custom_fields
            .iter()
            .map(|c| {
                FieldSpec::from_sources(c.key.clone(), c.kind, c.patterns.as_slice())
                    .map(|spec| spec.with_required(c.required))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut registry = FieldRegistry::passport()?.extended(custom)?;
        if let Some(required) = &extraction.required_fields {
            registry = registry.with_required_fields(required.as_slice())?;
        }

        Ok(Arc::new(registry))
    }

    /// Build a parser for this configuration.
    pub fn build_parser(&self) -> Result<PassportParser, RegistryError> {
        let parser = PassportParser::with_registry(self.build_registry()?);
        Ok(match self.extraction.reference_date {
            Some(date) => parser.with_reference_date(date),
            None => parser,
        })
    }
}
