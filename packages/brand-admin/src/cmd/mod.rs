//! Command implementations

pub mod media;
pub mod relations;
pub mod resources;

use anyhow::{bail, Context, Result};
use brand_resources::{Record, ResourceItem};
use colored::Colorize;
use serde_json::Value;

/// Parse a `--data` argument. Only JSON objects are accepted.
pub fn parse_data(data: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(data).context("--data is not valid JSON")?;
    if !value.is_object() {
        bail!("--data must be a JSON object");
    }
    Ok(value)
}

/// First human-readable field a record carries.
fn label(record: &Record) -> String {
    ["title", "label", "platform", "url", "imageUrl"]
        .iter()
        .find_map(|name| record.field(name).and_then(Value::as_str))
        .unwrap_or("")
        .to_string()
}

pub fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("{}", "(no items)".dimmed());
        return;
    }

    let header = format!(
        "{:<26} {:>5}  {:<8} {:<12} {}",
        "ID", "ORDER", "ACTIVE", "TYPE", "LABEL"
    );
    println!("{}", header.bold());
    for record in records {
        let active = if record.is_active() {
            format!("{:<8}", "yes").green()
        } else {
            format!("{:<8}", "no").red()
        };
        println!(
            "{:<26} {:>5}  {} {:<12} {}",
            record.id(),
            record.order_index(),
            active,
            record.kind().unwrap_or("-"),
            label(record)
        );
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
