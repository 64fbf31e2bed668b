//! Rendering command results for the terminal.

pub mod pretty;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a value as JSON: compact for `Json`, indented for `Pretty`.
pub fn format_output<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> String {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
    };
    rendered.unwrap_or_default()
}

/// Render a value, using `layout` instead of indented JSON for `Pretty`.
pub fn render<T, F>(value: &T, format: OutputFormat, layout: F) -> String
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => format_output(value, format),
        OutputFormat::Pretty => layout(value),
    }
}
