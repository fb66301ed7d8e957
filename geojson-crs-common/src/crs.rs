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

//! The legacy GeoJSON `crs` member.
//!
//! Two shapes are understood:
//!
//! ```json
//! { "type": "name", "properties": { "name": "urn:ogc:def:crs:OGC:1.3:CRS84" } }
//! { "type": "EPSG", "properties": { "code": 4283 } }
//! ```
//!
//! A missing member means the GeoJSON default, CRS84, and is represented by
//! `CrsSpec::Absent`.

use crate::crs_parser::epsg_code_from_urn;
use crate::error::{GeoJsonCrsError, Result};
use serde_json::{json, Map, Value};
use std::fmt;

pub const CRS84_URN: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";

/// Marks a named crs that is not a urn when displayed, so `EPSG:4326` the name is not
/// confused with `EPSG:4326` the code.
pub const NAME_PREFIX: &str = "name:";

const NAMED_TYPE: &str = "name";
const EPSG_TYPE: &str = "EPSG";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CrsSpec {
    Named { name: String },
    EpsgCode { code: u32 },
    Absent,
}

impl Default for CrsSpec {
    fn default() -> Self {
        CrsSpec::Absent
    }
}

impl CrsSpec {
    pub fn named<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(GeoJsonCrsError::MalformedCrs(
                "crs name must not be empty".to_string(),
            ));
        }
        Ok(CrsSpec::Named { name })
    }

    pub fn epsg(code: u32) -> Result<Self> {
        if code == 0 {
            return Err(GeoJsonCrsError::MalformedCrs(
                "EPSG code must be positive".to_string(),
            ));
        }
        Ok(CrsSpec::EpsgCode { code })
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CrsSpec::Absent)
    }

    /// True when the crs is the GeoJSON default, either by omission or by naming CRS84.
    pub fn is_default(&self) -> bool {
        match self {
            CrsSpec::Absent => true,
            CrsSpec::Named { name } => name == CRS84_URN,
            CrsSpec::EpsgCode { .. } => false,
        }
    }

    /// The EPSG code, for the EPSG form and for named `urn:ogc:def:crs:EPSG::<code>` urns.
    pub fn epsg_code(&self) -> Option<u32> {
        match self {
            CrsSpec::EpsgCode { code } => Some(*code),
            CrsSpec::Named { name } => epsg_code_from_urn(name),
            CrsSpec::Absent => None,
        }
    }
}

/// Renders `EPSG:4283`, a urn as is, any other name as `name:<name>`, or `none`.
/// `parse_crs_argument` reads every rendering back to the same crs.
impl fmt::Display for CrsSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrsSpec::Named { name } if is_urn(name) => write!(f, "{}", name),
            CrsSpec::Named { name } => write!(f, "{}{}", NAME_PREFIX, name),
            CrsSpec::EpsgCode { code } => write!(f, "EPSG:{}", code),
            CrsSpec::Absent => write!(f, "none"),
        }
    }
}

fn is_urn(name: &str) -> bool {
    name.get(..4)
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case("urn:"))
}

/// Resolves the `crs` member of a FeatureCollection. `None` and JSON `null` are `Absent`.
pub fn parse_crs_member(member: Option<&Value>) -> Result<CrsSpec> {
    let object = match member {
        None | Some(Value::Null) => return Ok(CrsSpec::Absent),
        Some(Value::Object(object)) => object,
        Some(other) => {
            return Err(GeoJsonCrsError::MalformedCrs(format!(
                "expected an object, found {}",
                other
            )))
        }
    };

    let crs_type = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| GeoJsonCrsError::MalformedCrs("crs has no string 'type'".to_string()))?;

    let properties = object
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            GeoJsonCrsError::MalformedCrs("crs has no 'properties' object".to_string())
        })?;

    match crs_type {
        NAMED_TYPE => parse_named(properties),
        EPSG_TYPE => parse_epsg(properties),
        other => Err(GeoJsonCrsError::MalformedCrs(format!(
            "unsupported crs type '{}'",
            other
        ))),
    }
}

fn parse_named(properties: &Map<String, Value>) -> Result<CrsSpec> {
    match properties.get("name") {
        Some(Value::String(name)) => CrsSpec::named(name.as_str()),
        _ => Err(GeoJsonCrsError::MalformedCrs(
            "named crs has no string 'name' property".to_string(),
        )),
    }
}

fn parse_epsg(properties: &Map<String, Value>) -> Result<CrsSpec> {
    let code = properties.get("code").ok_or_else(|| {
        GeoJsonCrsError::MalformedCrs("EPSG crs has no 'code' property".to_string())
    })?;

    match code.as_u64() {
        Some(c) if c > 0 && c <= u64::from(u32::MAX) => CrsSpec::epsg(c as u32),
        _ => Err(GeoJsonCrsError::MalformedCrs(format!(
            "EPSG code must be a positive integer, found {}",
            code
        ))),
    }
}

/// The `crs` member for `crs`, or `None` when the member should be omitted.
pub fn serialize_crs_member(crs: &CrsSpec) -> Option<Value> {
    match crs {
        CrsSpec::Named { name } => Some(json!({
            "type": NAMED_TYPE,
            "properties": { "name": name }
        })),
        CrsSpec::EpsgCode { code } => Some(json!({
            "type": EPSG_TYPE,
            "properties": { "code": code }
        })),
        CrsSpec::Absent => None,
    }
}
