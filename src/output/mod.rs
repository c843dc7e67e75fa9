//
//  xbl-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Every `xbl` command prints its result as JSON on stdout, so output can be
//! piped straight into `jq` or a script. Diagnostics go to stderr.
//!
//! | Mode | Flag | Example |
//! |------|------|---------|
//! | Pretty | (default) | indented, one field per line |
//! | Compact | `--compact` | `{"xuid":"2533274812345678","state":"Online"}` |
//!
//! A `--field` path such as `.devices.0.titles` narrows the output to one
//! nested value before printing.

use std::io::{self, Write};

use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::Value;

/// Writes command results as JSON.
#[derive(Debug, Clone, Default)]
pub struct OutputWriter {
    compact: bool,
    field: Option<String>,
}

impl OutputWriter {
    /// Creates a writer.
    ///
    /// # Parameters
    ///
    /// * `compact` - Emit minified JSON instead of pretty-printed
    /// * `field` - Optional dot path selecting a nested value
    pub fn new(compact: bool, field: Option<String>) -> Self {
        Self { compact, field }
    }

    /// Writes `value` to stdout.
    pub fn write<T: Serialize>(&self, value: &T) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle, value)
    }

    /// Writes `value` to an arbitrary destination, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails, the `--field` path does not
    /// resolve, or writing fails.
    pub fn write_to<W: Write, T: Serialize>(&self, writer: &mut W, value: &T) -> Result<()> {
        let mut value = serde_json::to_value(value)?;
        if let Some(path) = &self.field {
            value = select_field(&value, path)?.clone();
        }

        if self.compact {
            serde_json::to_writer(&mut *writer, &value)?;
        } else {
            serde_json::to_writer_pretty(&mut *writer, &value)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    /// Writes a confirmation for operations that return nothing.
    pub fn write_success(&self, msg: &str) -> Result<()> {
        self.write(&serde_json::json!({ "ok": true, "message": msg }))
    }
}

/// Resolves a dot path (`.a.b.0.c`) inside a JSON value.
///
/// `.` alone selects the whole value. Numeric segments index arrays.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use xbl_client::output::select_field;
///
/// let value = json!({"devices": [{"type": "Scarlett"}]});
/// assert_eq!(select_field(&value, ".devices.0.type").unwrap(), "Scarlett");
/// ```
pub fn select_field<'v>(value: &'v Value, path: &str) -> Result<&'v Value> {
    let Some(rest) = path.strip_prefix('.') else {
        bail!("Field path must start with '.': {}", path);
    };

    let mut current = value;
    for segment in rest.split('.').filter(|s| !s.is_empty()) {
        let next = match current {
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Value::Object(map) => map.get(segment),
            _ => None,
        };
        current = match next {
            Some(next) => next,
            None => bail!("Field '{}' not found in output", path),
        };
    }
    Ok(current)
}
