//! Data models: configuration and extraction reports.

pub mod config;
pub mod report;
