//! WASM bindings for passport field extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Text comes from the caller (OCR or PDF text extraction done on the JS side).

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use idfx_core::models::config::IdfxConfig;
use idfx_core::passport::rules::{normalize_date, parse_date};
use idfx_core::{DocumentParser, ExtractionReport, FieldRegistry, PassportParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract passport fields from text with the default field set.
///
/// Returns the report as an object keyed by field, in field order.
#[wasm_bindgen]
pub fn extract_passport_from_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&PassportParser::new().parse(text))
}

/// Normalize a day-first date (`1.2.1990`, `01-02-1990`, ...) to `DD/MM/YYYY`.
///
/// Returns `undefined` when the text is not a real calendar date.
#[wasm_bindgen]
pub fn validate_date(text: &str) -> Option<String> {
    let normalized = normalize_date(text);
    parse_date(&normalized).map(|_| normalized)
}

/// Passport extractor class for browser use.
#[wasm_bindgen]
pub struct PassportExtractor {
    parser: PassportParser,
}

#[wasm_bindgen]
impl PassportExtractor {
    /// Create an extractor, optionally from an `IdfxConfig` JSON document.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PassportExtractor, JsValue> {
        let parser = match config_json {
            Some(json) => {
                let config: IdfxConfig = serde_json::from_str(&json).map_err(to_js_error)?;
                config.build_parser().map_err(to_js_error)?
            }
            None => PassportParser::new(),
        };
        Ok(Self { parser })
    }

    /// Extract fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text))
    }

    /// Extract fields from page texts joined in order.
    #[wasm_bindgen]
    pub fn extract_pages(&self, pages: Vec<String>) -> Result<JsValue, JsValue> {
        let pages: Vec<&str> = pages.iter().map(String::as_str).collect();
        to_js(&self.parser.parse_pages(&pages))
    }

    /// Keys of the fields whose absence makes a report incomplete.
    #[wasm_bindgen]
    pub fn required_fields(&self) -> js_sys::Array {
        required_keys(self.parser.registry())
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    }

    /// Keys of every field, in report order.
    #[wasm_bindgen]
    pub fn field_keys(&self) -> js_sys::Array {
        self.parser
            .registry()
            .fields()
            .iter()
            .map(|f| JsValue::from_str(&f.key))
            .collect()
    }

    /// Fix the date used as "today" (ISO `YYYY-MM-DD`).
    #[wasm_bindgen]
    pub fn set_reference_date(&mut self, iso_date: &str) -> Result<(), JsValue> {
        let date: NaiveDate = iso_date.parse().map_err(to_js_error)?;
        self.parser = self.parser.clone().with_reference_date(date);
        Ok(())
    }
}

impl Default for PassportExtractor {
    fn default() -> Self {
        Self {
            parser: PassportParser::new(),
        }
    }
}

fn required_keys(registry: &FieldRegistry) -> Vec<&str> {
    registry
        .fields()
        .iter()
        .filter(|f| f.required)
        .map(|f| f.key.as_str())
        .collect()
}

fn to_js(report: &ExtractionReport) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    report.serialize(&serializer).map_err(to_js_error)
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_validate_date() {
        assert_eq!(validate_date("1.2.1990"), Some("01/02/1990".to_string()));
        assert_eq!(validate_date("31/02/2020"), None);
        assert_eq!(validate_date("not a date"), None);
    }

    #[wasm_bindgen_test]
    fn test_required_keys() {
        let extractor = PassportExtractor::default();
        assert_eq!(
            required_keys(extractor.parser.registry()),
            vec!["passportNumber", "surname"]
        );
    }

    #[wasm_bindgen_test]
    fn test_extract_returns_object() {
        let value = extract_passport_from_text("Passport No: X1234567\nSurname: Doe").unwrap();
        assert!(value.is_object());
    }
}
