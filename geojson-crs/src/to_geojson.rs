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
use geojson_crs_common::{
    ndjson::read_ndjson, write_to, CrsSpec, GeoJsonCrsError, GeoJsonDocument, Layout,
};
use std::io::BufRead;

/// Collects ndjson features into a FeatureCollection written to `output`, stdout if
/// `None`. Nothing is opened for writing unless every line is a valid feature.
pub fn to_geojson<R: BufRead>(
    reader: R,
    crs: CrsSpec,
    name: Option<&str>,
    layout: Layout,
    output: Option<&str>,
) -> Result<(), GeoJsonCrsError> {
    let document = collection(reader, crs, name)?;
    write_to(&document, layout, output_writer(output)?)
}

pub fn collection<R: BufRead>(
    reader: R,
    crs: CrsSpec,
    name: Option<&str>,
) -> Result<GeoJsonDocument, GeoJsonCrsError> {
    let document = read_ndjson(reader, crs)?;
    Ok(match name {
        Some(name) => document.with_name(name),
        None => document,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson_crs_common::{read, write, write_with_layout};
    use std::fs;

    const NDJSON: &str = "{\"type\":\"Feature\",\"geometry\":{\"type\":\"Point\",\"coordinates\":[1,2]},\"properties\":{\"a\":1}}\n{\"type\":\"Feature\",\"geometry\":{\"type\":\"LineString\",\"coordinates\":[[1,2],[3,4]]},\"properties\":{}}\n";

    #[test]
    fn test_to_geojson_with_crs() {
        let document = collection(
            NDJSON.as_bytes(),
            CrsSpec::EpsgCode { code: 4283 },
            Some("roads"),
        )
        .expect("Able to build collection");

        assert_eq!(
            String::from_utf8(write(&document)).unwrap(),
            "{\"type\":\"FeatureCollection\",\"name\":\"roads\",\"crs\":{\"type\":\"EPSG\",\"properties\":{\"code\":4283}},\"features\":[{\"type\":\"Feature\",\"geometry\":{\"type\":\"Point\",\"coordinates\":[1,2]},\"properties\":{\"a\":1}},{\"type\":\"Feature\",\"geometry\":{\"type\":\"LineString\",\"coordinates\":[[1,2],[3,4]]},\"properties\":{}}]}"
        );
    }

    #[test]
    fn test_to_geojson_without_crs() {
        let document = collection(NDJSON.as_bytes(), CrsSpec::Absent, None)
            .expect("Able to build collection");

        let document = read(&write_with_layout(&document, Layout::FeaturePerLine))
            .expect("output is a FeatureCollection");
        assert_eq!(document.crs(), &CrsSpec::Absent);
        assert_eq!(document.len(), 2);
    }

    #[test]
    fn test_to_geojson_rejects_non_features() {
        let result = collection(
            "{\"type\":\"Point\",\"coordinates\":[1,2]}\n".as_bytes(),
            CrsSpec::Absent,
            None,
        );

        assert!(matches!(result, Err(GeoJsonCrsError::InvalidFeature(_))));
    }

    #[test]
    fn test_failed_to_geojson_leaves_output_file_untouched() {
        let dir = tempfile::tempdir().expect("Able to create temp dir");
        let path = dir.path().join("roads.geojson");
        fs::write(&path, "previous good content").expect("Able to write output");

        let result = to_geojson(
            "{\"type\":\"Feature\",\"geometry\":{\"type\":\"Point\"\n".as_bytes(),
            CrsSpec::EpsgCode { code: 4283 },
            None,
            Layout::Compact,
            path.to_str(),
        );

        assert!(matches!(result, Err(GeoJsonCrsError::Parse { .. })));
        assert_eq!(
            fs::read_to_string(&path).expect("Able to read output"),
            "previous good content"
        );
    }

    #[test]
    fn test_to_geojson_writes_output_file() {
        let dir = tempfile::tempdir().expect("Able to create temp dir");
        let path = dir.path().join("roads.geojson");

        to_geojson(
            NDJSON.as_bytes(),
            CrsSpec::EpsgCode { code: 4283 },
            Some("roads"),
            Layout::FeaturePerLine,
            path.to_str(),
        )
        .expect("Able to build collection");

        let document = read(&fs::read(&path).expect("Able to read output"))
            .expect("output is a FeatureCollection");
        assert_eq!(document.crs(), &CrsSpec::EpsgCode { code: 4283 });
        assert_eq!(document.name(), Some("roads"));
        assert_eq!(document.len(), 2);
    }
}
