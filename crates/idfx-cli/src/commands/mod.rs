//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod fields;

use std::fs;
use std::path::Path;

use idfx_core::models::config::IdfxConfig;
use idfx_core::read_pdf_text;

/// Extensions accepted as document input.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "text", "pdf"];

/// Read a document's text: plain text files as-is, PDFs via their text layer.
pub fn read_document(path: &Path, config: &IdfxConfig) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            read_pdf_text(&data, config.pdf.min_text_length)?
        }
        "txt" | "text" => fs::read_to_string(path)?,
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    Ok(text)
}
