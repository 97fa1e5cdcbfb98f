use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Yaml,
}

/// Render a structured value; `Human` falls back to pretty JSON.
pub fn render<T: Serialize>(value: &T, format: &OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Human | OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}
