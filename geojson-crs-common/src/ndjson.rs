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

use crate::crs::CrsSpec;
use crate::document::{collect_feature_errors, Feature, GeoJsonDocument};
use crate::error::{FeatureError, GeoJsonCrsError, Position, Result};
use serde_json::Value;
use std::io::{stdin, BufRead, BufReader, Stdin, Write};

/// Reads one GeoJSON feature per line from a `BufRead` source,
/// most usually `BufReader<Stdin>` which is provided by `NdJsonFeatureReader::default()`.
/// Blank lines are skipped and a trailing comma is ignored.
pub struct NdJsonFeatureReader<IN> {
    std_in: IN,
    line_number: usize,
}

impl<IN> NdJsonFeatureReader<IN>
where
    IN: BufRead,
{
    pub fn new(std_in: IN) -> Self {
        NdJsonFeatureReader {
            std_in,
            line_number: 0,
        }
    }
}

impl Default for NdJsonFeatureReader<BufReader<Stdin>> {
    fn default() -> Self {
        Self::new(BufReader::new(stdin()))
    }
}

impl<IN> Iterator for NdJsonFeatureReader<IN>
where
    IN: BufRead,
{
    /// The line number (0-based) and the feature, or the reason the line is not one.
    type Item = (usize, Result<Feature>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut line = String::new();
            let index = self.line_number;
            match self.std_in.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let indent = line.len() - line.trim_start().len();
                    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
                    return Some((index, parse_feature_line(index, indent, trimmed)));
                }
                Err(e) => {
                    self.line_number += 1;
                    return Some((index, Err(GeoJsonCrsError::Io(e))));
                }
            }
        }
    }
}

/// `indent` is the whitespace trimmed from the start of the line, added back to the
/// reported column.
fn parse_feature_line(index: usize, indent: usize, line: &str) -> Result<Feature> {
    let value: Value = serde_json::from_str(line).map_err(|e| GeoJsonCrsError::Parse {
        position: Some(Position {
            line: index + 1,
            column: e.column() + indent,
        }),
        reason: e.to_string(),
    })?;
    Feature::from_json(value)
        .map_err(|problem| GeoJsonCrsError::InvalidFeature(vec![FeatureError { index, problem }]))
}

/// Collects ndjson features into a document with `crs`. Every line is checked and all
/// feature problems are reported together, indexed by line.
pub fn read_ndjson<R: BufRead>(reader: R, crs: CrsSpec) -> Result<GeoJsonDocument> {
    let mut features = vec![];
    let mut errors = vec![];

    for (index, feature) in NdJsonFeatureReader::new(reader) {
        match feature {
            Ok(feature) => {
                errors.extend(collect_feature_errors(std::iter::once((index, &feature))));
                features.push(feature);
            }
            Err(GeoJsonCrsError::InvalidFeature(mut e)) => errors.append(&mut e),
            Err(e) => return Err(e),
        }
    }

    if !errors.is_empty() {
        return Err(GeoJsonCrsError::InvalidFeature(errors));
    }

    log::debug!("Read {} ndjson features", features.len());

    Ok(GeoJsonDocument::new(crs, features))
}

/// Writes each feature of `document` on its own line.
pub fn write_ndjson<W: Write>(document: &GeoJsonDocument, mut writer: W) -> Result<()> {
    for feature in document.features() {
        writeln!(writer, "{}", feature.to_json())?;
    }
    writer.flush()?;
    Ok(())
}
