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
use crate::error::{FeatureError, FeatureProblem, GeoJsonCrsError, Result};
use geo::BoundingRect;
use geo_types::{coord, Rect};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

pub type Properties = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    pub const ALL: [GeometryType; 7] = [
        GeometryType::Point,
        GeometryType::LineString,
        GeometryType::Polygon,
        GeometryType::MultiPoint,
        GeometryType::MultiLineString,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    /// The tag as it appears in a GeoJSON geometry's `type` member.
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    fn of(value: &geojson::Value) -> Self {
        match value {
            geojson::Value::Point(_) => GeometryType::Point,
            geojson::Value::LineString(_) => GeometryType::LineString,
            geojson::Value::Polygon(_) => GeometryType::Polygon,
            geojson::Value::MultiPoint(_) => GeometryType::MultiPoint,
            geojson::Value::MultiLineString(_) => GeometryType::MultiLineString,
            geojson::Value::MultiPolygon(_) => GeometryType::MultiPolygon,
            geojson::Value::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the exact GeoJSON tag. Matching is case-insensitive so `polygon` works on the
/// command line too.
impl FromStr for GeometryType {
    type Err = GeoJsonCrsError;

    fn from_str(s: &str) -> Result<Self> {
        GeometryType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                GeoJsonCrsError::InvalidArgument(format!("unknown geometry type '{}'", s))
            })
    }
}

/// One GeoJSON feature. The geometry object is kept exactly as read.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    geometry_type: GeometryType,
    geometry: Map<String, Value>,
    properties: Properties,
    id: Option<Value>,
}

impl Feature {
    /// Builds a feature without validating it, see `validate_feature`.
    pub fn new(
        geometry_type: GeometryType,
        geometry: Map<String, Value>,
        properties: Properties,
    ) -> Self {
        Feature {
            geometry_type,
            geometry,
            properties,
            id: None,
        }
    }

    pub fn with_id(self, id: Value) -> Self {
        Feature {
            id: Some(id),
            ..self
        }
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    pub fn geometry(&self) -> &Map<String, Value> {
        &self.geometry
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    /// Extracts a feature from a parsed `Feature` object. Only the structure needed to
    /// find the geometry tag is checked here.
    pub fn from_json(value: Value) -> std::result::Result<Self, FeatureProblem> {
        let mut object = match value {
            Value::Object(object) => object,
            _ => return Err(FeatureProblem::NotAFeature),
        };

        if object.get("type").and_then(Value::as_str) != Some("Feature") {
            return Err(FeatureProblem::NotAFeature);
        }

        let geometry = match object.remove("geometry") {
            Some(Value::Object(geometry)) => geometry,
            Some(Value::Null) | None => return Err(FeatureProblem::MissingGeometry),
            Some(_) => {
                return Err(FeatureProblem::MalformedGeometry(
                    "geometry is not an object".to_string(),
                ))
            }
        };

        let geometry_type = match geometry.get("type") {
            Some(Value::String(tag)) => GeometryType::from_str(tag)
                .ok()
                .filter(|t| t.as_str() == tag.as_str())
                .ok_or_else(|| FeatureProblem::UnknownGeometryType(tag.clone()))?,
            _ => {
                return Err(FeatureProblem::MalformedGeometry(
                    "geometry has no string 'type'".to_string(),
                ))
            }
        };

        let properties = match object.remove("properties") {
            Some(Value::Object(properties)) => properties,
            Some(Value::Null) | None => Properties::new(),
            Some(_) => return Err(FeatureProblem::MalformedProperties),
        };

        Ok(Feature {
            geometry_type,
            geometry,
            properties,
            id: object.remove("id"),
        })
    }

    /// The feature as a GeoJSON object: `type`, `id`, `geometry`, `properties`.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::from("Feature"));
        if let Some(id) = &self.id {
            object.insert("id".to_string(), id.clone());
        }
        object.insert("geometry".to_string(), Value::Object(self.geometry.clone()));
        object.insert(
            "properties".to_string(),
            Value::Object(self.properties.clone()),
        );
        Value::Object(object)
    }

    /// The geometry as a `geo_types` geometry.
    pub fn to_geo(&self) -> Result<geo_types::Geometry<f64>> {
        let geometry = parse_payload(&self.geometry)
            .map_err(|e| GeoJsonCrsError::Geometry(e.to_string()))?;
        geo_types::Geometry::<f64>::try_from(geometry.value)
            .map_err(|e| GeoJsonCrsError::Geometry(e.to_string()))
    }
}

fn parse_payload(
    payload: &Map<String, Value>,
) -> std::result::Result<geojson::Geometry, geojson::Error> {
    geojson::Geometry::try_from(payload.clone())
}

/// A FeatureCollection with its crs. Documents are never modified in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoJsonDocument {
    name: Option<String>,
    crs: CrsSpec,
    features: Vec<Feature>,
}

impl GeoJsonDocument {
    pub fn new(crs: CrsSpec, features: Vec<Feature>) -> Self {
        GeoJsonDocument {
            name: None,
            crs,
            features,
        }
    }

    /// An empty document carrying `crs` and `name`.
    pub fn empty_like(&self) -> Self {
        GeoJsonDocument {
            name: self.name.clone(),
            crs: self.crs.clone(),
            features: vec![],
        }
    }

    pub fn with_name<S: Into<String>>(self, name: S) -> Self {
        GeoJsonDocument {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn with_crs(self, crs: CrsSpec) -> Self {
        GeoJsonDocument { crs, ..self }
    }

    pub(crate) fn with_features(&self, features: Vec<Feature>) -> Self {
        GeoJsonDocument {
            name: self.name.clone(),
            crs: self.crs.clone(),
            features,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn crs(&self) -> &CrsSpec {
        &self.crs
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn into_features(self) -> Vec<Feature> {
        self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature counts per geometry type, in the order the types first appear.
    pub fn geometry_type_counts(&self) -> IndexMap<GeometryType, usize> {
        let mut counts = IndexMap::new();
        for feature in &self.features {
            *counts.entry(feature.geometry_type()).or_insert(0) += 1;
        }
        counts
    }

    /// The bounding rectangle of every feature's geometry, in the document's crs.
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        let mut rect: Option<Rect<f64>> = None;
        for (index, feature) in self.features.iter().enumerate() {
            let bounds = match feature.to_geo() {
                Ok(geometry) => geometry.bounding_rect(),
                Err(e) => {
                    log::warn!("Skipping feature {} in bounding box: {}", index, e);
                    None
                }
            };
            if let Some(b) = bounds {
                rect = Some(match rect {
                    Some(r) => Rect::new(
                        coord! { x: r.min().x.min(b.min().x), y: r.min().y.min(b.min().y) },
                        coord! { x: r.max().x.max(b.max().x), y: r.max().y.max(b.max().y) },
                    ),
                    None => b,
                });
            }
        }
        rect
    }
}

/// Checks that the geometry payload is a GeoJSON geometry of the declared type, that every
/// property is a scalar or null and that the id, if any, is a string or number.
pub fn validate_feature(feature: &Feature) -> std::result::Result<(), Vec<FeatureProblem>> {
    let mut problems = vec![];

    match parse_payload(&feature.geometry) {
        Ok(geometry) => {
            let found = GeometryType::of(&geometry.value);
            if found != feature.geometry_type {
                problems.push(FeatureProblem::GeometryTypeMismatch {
                    declared: feature.geometry_type.to_string(),
                    found: found.to_string(),
                });
            }
        }
        Err(e) => problems.push(FeatureProblem::MalformedGeometry(e.to_string())),
    }

    for (key, value) in &feature.properties {
        if value.is_object() || value.is_array() {
            problems.push(FeatureProblem::NonScalarProperty(key.clone()));
        }
    }

    match &feature.id {
        None | Some(Value::String(_)) | Some(Value::Number(_)) => (),
        Some(_) => problems.push(FeatureProblem::InvalidId),
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

/// Validates every feature and reports all problems, tagged with the feature index.
pub fn validate_document(
    document: &GeoJsonDocument,
) -> std::result::Result<(), Vec<FeatureError>> {
    let errors = collect_feature_errors(document.features().iter().enumerate());
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub(crate) fn collect_feature_errors<'a, I>(features: I) -> Vec<FeatureError>
where
    I: Iterator<Item = (usize, &'a Feature)>,
{
    let mut errors = vec![];
    for (index, feature) in features {
        if let Err(problems) = validate_feature(feature) {
            errors.extend(
                problems
                    .into_iter()
                    .map(|problem| FeatureError { index, problem }),
            );
        }
    }
    errors
}
