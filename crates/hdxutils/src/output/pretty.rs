//! Pretty output formatting.

use hdxutils_core::dynamodb::Record;
use hdxutils_core::frame::Frame;
use serde_json::Value;

use crate::dynamodb::Items;
use crate::s3::ObjectSummary;

fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format a record as `field: value` lines, sorted by field name.
pub fn format_record(record: &Record) -> String {
    let mut fields: Vec<(&String, &Value)> = record.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));
    fields
        .into_iter()
        .map(|(field, value)| format!("  {}: {}", field, format_cell(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format decoded items for display.
pub fn format_items(items: &Items) -> String {
    if items.items.is_empty() {
        return "No items found.".to_string();
    }
    let mut output = format!("ITEMS ({})\n", items.count);
    output.push_str(&"-".repeat(40));
    for record in &items.items {
        output.push_str(&format!("\n{}", format_record(record)));
        output.push('\n');
    }
    output
}

/// Format a listed object for display.
pub fn format_object(object: &ObjectSummary) -> String {
    let mut output = format!("{}\n  Size: {}", object.key, object.size);
    if let Some(modified) = &object.last_modified {
        output.push_str(&format!("\n  Last modified: {}", modified));
    }
    output
}

/// Format listed objects for display.
pub fn format_objects(objects: &[ObjectSummary]) -> String {
    if objects.is_empty() {
        return "No objects found.".to_string();
    }
    let mut output = format!("OBJECTS ({})\n", objects.len());
    output.push_str(&"-".repeat(40));
    for object in objects {
        output.push_str(&format!("\n{}", format_object(object)));
        output.push('\n');
    }
    output
}

/// Format a frame as an aligned text table.
pub fn format_frame(frame: &Frame) -> String {
    if frame.columns().is_empty() {
        return "No rows found.".to_string();
    }

    let widths: Vec<usize> = frame
        .columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            frame
                .rows()
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut output = line(frame.columns());
    output.push('\n');
    output.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    for row in frame.rows() {
        output.push('\n');
        output.push_str(&line(row));
    }
    output.push_str(&format!("\n({} rows)", frame.len()));
    output
}
