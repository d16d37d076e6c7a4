//! Writers for merged bundle output.
//!
//! The JSON writer emits a flat, order-preserving object (base file
//! order first, appended override keys last). The properties writer
//! emits UTF-8 `.properties` with comments carried over; only
//! structural characters are escaped, non-ASCII text is written as-is.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::core::resolve::ResolvedBundle;

pub fn write_merged_json(resolved: &ResolvedBundle, path: &Path) -> Result<()> {
    let mut data = Map::new();
    for entry in &resolved.entries {
        data.insert(entry.key.clone(), Value::String(entry.value.clone()));
    }

    let content =
        serde_json::to_string_pretty(&Value::Object(data)).context("Failed to serialize JSON")?;
    write_file(path, &format!("{}\n", content))
}

pub fn write_merged_properties(resolved: &ResolvedBundle, path: &Path) -> Result<()> {
    let mut content = String::new();
    for entry in &resolved.entries {
        if let Some(comment) = &entry.comment {
            for line in comment.lines() {
                content.push_str("# ");
                content.push_str(line);
                content.push('\n');
            }
        }
        content.push_str(&escape_key(&entry.key));
        content.push_str(" = ");
        content.push_str(&escape_value(&entry.value));
        content.push('\n');
    }
    write_file(path, &content)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Escape a key: separators and comment markers must not terminate it.
fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ' ' => out.push_str("\\ "),
            '=' => out.push_str("\\="),
            ':' => out.push_str("\\:"),
            '#' => out.push_str("\\#"),
            '!' => out.push_str("\\!"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value: backslashes, line breaks, and leading whitespace
/// (which the parser would otherwise strip).
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut leading = true;
    for c in value.chars() {
        if leading && c != ' ' && c != '\t' {
            leading = false;
        }
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '\t' => out.push_str("\\t"),
            ' ' if leading => out.push_str("\\ "),
            _ => out.push(c),
        }
    }
    out
}
