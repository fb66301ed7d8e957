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

//! Reading, splitting and writing GeoJSON FeatureCollections so that the
//! `crs` member survives the trip.
//!
//! ```
//! use geojson_crs_common::{read, split_by_geometry_type, write, CrsSpec, GeometryType};
//!
//! let text = r#"{"type":"FeatureCollection","crs":{"type":"EPSG","properties":{"code":4283}},"features":[{"type":"Feature","geometry":{"type":"Point","coordinates":[145.0,-37.8]},"properties":{"name":"a"}}]}"#;
//!
//! let document = read(text.as_bytes()).unwrap();
//! assert_eq!(document.crs(), &CrsSpec::EpsgCode { code: 4283 });
//! assert_eq!(read(&write(&document)).unwrap(), document);
//!
//! let split = split_by_geometry_type(document);
//! assert_eq!(split.document(GeometryType::Polygon).crs(), &CrsSpec::EpsgCode { code: 4283 });
//! ```

pub mod crs;
pub mod crs_parser;
pub mod document;
pub mod error;
pub mod ndjson;
pub mod reader;
pub mod split;
pub mod writer;

pub use crs::{parse_crs_member, serialize_crs_member, CrsSpec, CRS84_URN, NAME_PREFIX};
pub use crs_parser::{epsg_code_from_urn, parse_crs_argument};
pub use document::{
    validate_document, validate_feature, Feature, GeoJsonDocument, GeometryType, Properties,
};
pub use error::{FeatureError, FeatureProblem, GeoJsonCrsError, Position, Result};
pub use reader::{read, read_from};
pub use split::{select_geometry_type, split_by_geometry_type, GeometrySplit};
pub use writer::{write, write_to, write_with_layout, Layout};
