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

use geojson_crs_common::{ndjson::write_ndjson, read, GeoJsonCrsError};
use std::io::Write;

/// Writes the features of a FeatureCollection as ndjson. ndjson has nowhere to keep the
/// crs, so it is logged for the caller to pass back to `to-geojson`.
pub fn split<W: Write>(input: &[u8], out: W) -> Result<(), GeoJsonCrsError> {
    let document = read(input)?;

    if !document.crs().is_absent() {
        log::warn!(
            "The crs {} is not part of ndjson output, pass --crs '{}' to to-geojson to restore it",
            document.crs(),
            document.crs()
        );
    }

    write_ndjson(&document, out)
}
