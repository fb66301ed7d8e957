/*
 * Copyright 2019 Boyd Johnson
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use crate::crs::serialize_crs_member;
use crate::document::GeoJsonDocument;
use crate::error::{GeoJsonCrsError, Result};
use serde_json::Value;
use std::io::Write;
use std::str::FromStr;

/// How the FeatureCollection is laid out as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// A single line.
    Compact,
    /// Each top-level member and each feature on its own line, like GDAL writes GeoJSON.
    FeaturePerLine,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Compact
    }
}

impl FromStr for Layout {
    type Err = GeoJsonCrsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "compact" => Ok(Layout::Compact),
            "lines" => Ok(Layout::FeaturePerLine),
            other => Err(GeoJsonCrsError::InvalidArgument(format!(
                "layout must be one of 'compact', 'lines', not: {}",
                other
            ))),
        }
    }
}

/// Writes `document` as a compact FeatureCollection.
pub fn write(document: &GeoJsonDocument) -> Vec<u8> {
    write_with_layout(document, Layout::Compact)
}

/// Writes `type`, `name`, `crs` and `features`, in that order. The `crs` member is
/// left out only when the document's crs is absent.
pub fn write_with_layout(document: &GeoJsonDocument, layout: Layout) -> Vec<u8> {
    let mut members: Vec<(&str, String)> = vec![("type", quote("FeatureCollection"))];
    if let Some(name) = document.name() {
        members.push(("name", quote(name)));
    }
    if let Some(crs) = serialize_crs_member(document.crs()) {
        members.push(("crs", crs.to_string()));
    }

    let features: Vec<String> = document
        .features()
        .iter()
        .map(|f| f.to_json().to_string())
        .collect();

    let (separator, newline) = match layout {
        Layout::Compact => (",", ""),
        Layout::FeaturePerLine => (",\n", "\n"),
    };

    let mut out = String::new();
    out.push('{');
    out.push_str(newline);
    for (key, value) in &members {
        out.push_str(&quote(key));
        out.push(':');
        out.push_str(value);
        out.push_str(separator);
    }
    out.push_str(&quote("features"));
    out.push_str(":[");
    if !features.is_empty() {
        out.push_str(newline);
        out.push_str(&features.join(separator));
        out.push_str(newline);
    }
    out.push(']');
    out.push_str(newline);
    out.push('}');
    out.push_str(newline);

    log::debug!(
        "Wrote {} features with crs {}",
        document.len(),
        document.crs()
    );

    out.into_bytes()
}

/// Writes the document to `writer`.
pub fn write_to<W: Write>(document: &GeoJsonDocument, layout: Layout, mut writer: W) -> Result<()> {
    writer.write_all(&write_with_layout(document, layout))?;
    writer.flush()?;
    Ok(())
}

fn quote(s: &str) -> String {
    Value::from(s).to_string()
}
