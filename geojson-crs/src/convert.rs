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

use crate::common::output_writer;
use geojson_crs_common::{read, write_to, CrsSpec, GeoJsonCrsError, GeoJsonDocument, Layout};

/// Re-writes a FeatureCollection to `output` (stdout if `None`), optionally declaring a
/// different crs. The output is only opened once the input has been read, so a failed
/// conversion leaves an existing output file as it was.
pub fn convert(
    input: &[u8],
    crs: Option<CrsSpec>,
    layout: Layout,
    output: Option<&str>,
) -> Result<(), GeoJsonCrsError> {
    let document = converted(input, crs)?;
    write_to(&document, layout, output_writer(output)?)
}

/// The document `convert` writes. Coordinates are never touched.
pub fn converted(input: &[u8], crs: Option<CrsSpec>) -> Result<GeoJsonDocument, GeoJsonCrsError> {
    let document = read(input)?;

    let document = match crs {
        Some(crs) => {
            log::info!("Declaring crs {} in place of {}", crs, document.crs());
            document.with_crs(crs)
        }
        None => document,
    };

    if document.crs().is_absent() {
        log::warn!("Writing without a crs member, readers will assume CRS84");
    }

    Ok(document)
}
