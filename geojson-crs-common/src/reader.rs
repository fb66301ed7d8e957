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

use crate::crs::parse_crs_member;
use crate::document::{collect_feature_errors, Feature, GeoJsonDocument};
use crate::error::{FeatureError, GeoJsonCrsError, Result};
use serde_json::Value;
use std::io::Read;

/// Reads a GeoJSON FeatureCollection, keeping its `crs` member.
///
/// Fails on malformed JSON, on anything but a FeatureCollection, on a `crs` member that
/// is present but not understood, and on invalid features. Every feature is checked before
/// failing so the error lists all of them.
pub fn read(text: &[u8]) -> Result<GeoJsonDocument> {
    let value: Value = serde_json::from_slice(text)?;

    let mut collection = match value {
        Value::Object(object) => object,
        _ => return Err(GeoJsonCrsError::parse("geojson is not an object")),
    };

    match collection.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => (),
        Some(other) => {
            return Err(GeoJsonCrsError::parse(format!(
                "expected a FeatureCollection, found '{}'",
                other
            )))
        }
        None => return Err(GeoJsonCrsError::parse("geojson has no string 'type'")),
    }

    let crs = parse_crs_member(collection.get("crs"))?;

    let name = match collection.remove("name") {
        Some(Value::String(name)) => Some(name),
        _ => None,
    };

    let elements = match collection.remove("features") {
        Some(Value::Array(elements)) => elements,
        Some(_) => return Err(GeoJsonCrsError::parse("'features' is not an array")),
        None => return Err(GeoJsonCrsError::parse("FeatureCollection has no 'features'")),
    };

    if collection.contains_key("bbox") {
        log::warn!("Dropping the FeatureCollection bbox, it is not written back");
    }
    let feature_bboxes = elements
        .iter()
        .filter(|e| e.get("bbox").is_some())
        .count();
    if feature_bboxes > 0 {
        log::warn!(
            "Dropping the bbox of {} feature(s), it is not written back",
            feature_bboxes
        );
    }

    let mut features = Vec::with_capacity(elements.len());
    let mut errors = vec![];
    for (index, element) in elements.into_iter().enumerate() {
        match Feature::from_json(element) {
            Ok(feature) => {
                errors.extend(collect_feature_errors(std::iter::once((index, &feature))));
                features.push(feature);
            }
            Err(problem) => errors.push(FeatureError { index, problem }),
        }
    }

    if !errors.is_empty() {
        return Err(GeoJsonCrsError::InvalidFeature(errors));
    }

    log::debug!("Read {} features with crs {}", features.len(), crs);

    let document = GeoJsonDocument::new(crs, features);
    Ok(match name {
        Some(name) => document.with_name(name),
        None => document,
    })
}

/// Buffers all of `reader` and reads it with `read`.
pub fn read_from<R: Read>(mut reader: R) -> Result<GeoJsonDocument> {
    let mut buffer = vec![];
    reader.read_to_end(&mut buffer)?;
    read(&buffer)
}
