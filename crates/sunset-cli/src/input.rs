//! Loading schema, request and settings files

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::path::Path;
use sunset_core::SunsetSettings;
use sunset_pipeline::Request;
use sunset_schema::{Schema, SchemaDocument};

/// Document syntax, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.json` is JSON, anything else YAML
    pub(crate) fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = match Format::of(path) {
        Format::Json => serde_json::from_str(&source)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
        Format::Yaml => serde_yaml::from_str(&source)
            .with_context(|| format!("invalid YAML in {}", path.display()))?,
    };
    Ok(value)
}

pub(crate) fn load_schema(path: &Path) -> Result<Schema> {
    let document: SchemaDocument = read_document(path)?;
    Schema::from_document(document).with_context(|| format!("invalid schema in {}", path.display()))
}

pub(crate) fn load_request(path: &Path) -> Result<Request> {
    read_document(path)
}

pub(crate) fn load_settings(path: Option<&Path>) -> Result<SunsetSettings> {
    match path {
        Some(path) => read_document(path),
        None => Ok(SunsetSettings::default()),
    }
}

pub(crate) fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    let instant = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("'{value}' is not an RFC 3339 timestamp"))?;
    Ok(instant.with_timezone(&Utc))
}
