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

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoJsonCrsError>;

/// Line and column (both 1-based) of a JSON syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

#[derive(Debug, Error)]
pub enum GeoJsonCrsError {
    #[error("Error parsing geojson{}: {reason}", format_position(.position))]
    Parse {
        position: Option<Position>,
        reason: String,
    },
    #[error("Malformed crs member: {0}")]
    MalformedCrs(String),
    #[error("{}", format_feature_errors(.0))]
    InvalidFeature(Vec<FeatureError>),
    #[error("Error converting geometry: {0}")]
    Geometry(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GeoJsonCrsError {
    pub(crate) fn parse<S: Into<String>>(reason: S) -> Self {
        GeoJsonCrsError::Parse {
            position: None,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for GeoJsonCrsError {
    fn from(e: serde_json::Error) -> Self {
        GeoJsonCrsError::Parse {
            position: Some(Position {
                line: e.line(),
                column: e.column(),
            }),
            reason: e.to_string(),
        }
    }
}

fn format_position(position: &Option<Position>) -> String {
    match position {
        Some(p) => format!(" at {}", p),
        None => String::new(),
    }
}

fn format_feature_errors(errors: &[FeatureError]) -> String {
    let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    format!(
        "{} invalid feature(s): {}",
        errors.len(),
        details.join("; ")
    )
}

/// A single problem with a single feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureProblem {
    NotAFeature,
    MissingGeometry,
    UnknownGeometryType(String),
    MalformedGeometry(String),
    GeometryTypeMismatch { declared: String, found: String },
    MalformedProperties,
    NonScalarProperty(String),
    InvalidId,
}

impl fmt::Display for FeatureProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureProblem::NotAFeature => write!(f, "not an object of type 'Feature'"),
            FeatureProblem::MissingGeometry => write!(f, "geometry is missing or null"),
            FeatureProblem::UnknownGeometryType(t) => write!(f, "unknown geometry type '{}'", t),
            FeatureProblem::MalformedGeometry(reason) => {
                write!(f, "malformed geometry: {}", reason)
            }
            FeatureProblem::GeometryTypeMismatch { declared, found } => write!(
                f,
                "geometry type is {} but the geometry payload is a {}",
                declared, found
            ),
            FeatureProblem::MalformedProperties => {
                write!(f, "properties must be an object or null")
            }
            FeatureProblem::NonScalarProperty(key) => write!(
                f,
                "property '{}' is not a string, number, boolean or null",
                key
            ),
            FeatureProblem::InvalidId => write!(f, "id must be a string or a number"),
        }
    }
}

/// A problem tagged with the index of the feature in its collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureError {
    pub index: usize,
    pub problem: FeatureProblem,
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feature {}: {}", self.index, self.problem)
    }
}
