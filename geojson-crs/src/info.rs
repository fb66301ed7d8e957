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

use geojson_crs_common::{read, CrsSpec, GeoJsonCrsError};
use std::io::Write;

pub fn info<W: Write>(input: &[u8], mut out: W) -> Result<(), GeoJsonCrsError> {
    let document = read(input)?;

    if let Some(name) = document.name() {
        writeln!(out, "name: {}", name)?;
    }
    writeln!(out, "crs: {}", describe_crs(document.crs()))?;
    writeln!(out, "features: {}", document.len())?;
    for (geometry_type, count) in document.geometry_type_counts() {
        writeln!(out, "  {}: {}", geometry_type, count)?;
    }
    if let Some(rect) = document.bounding_rect() {
        writeln!(
            out,
            "bbox: [{}, {}, {}, {}]",
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y
        )?;
    }
    Ok(())
}

fn describe_crs(crs: &CrsSpec) -> String {
    match (crs, crs.epsg_code()) {
        (CrsSpec::Absent, _) => "none (GeoJSON default CRS84)".to_string(),
        (CrsSpec::Named { .. }, Some(code)) => format!("{} (EPSG:{})", crs, code),
        _ => crs.to_string(),
    }
}
