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

use geojson_crs_common::{
    read, select_geometry_type, split_by_geometry_type, write_to, GeoJsonCrsError,
    GeoJsonDocument, GeometryType, Layout,
};
use std::fs::{create_dir_all, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes one file per geometry type into `directory`, named `<stem>_<type>.geojson`.
/// With `only`, writes just that type's file, even if it has no features.
pub fn split_to_directory(
    input: &[u8],
    stem: &str,
    directory: &Path,
    only: Option<GeometryType>,
    layout: Layout,
) -> Result<Vec<PathBuf>, GeoJsonCrsError> {
    let document = read(input)?;
    create_dir_all(directory)?;

    let parts: Vec<(GeometryType, GeoJsonDocument)> = match only {
        Some(geometry_type) => vec![(
            geometry_type,
            select_geometry_type(&document, geometry_type),
        )],
        None => split_by_geometry_type(document).into_iter().collect(),
    };

    let mut written = Vec::with_capacity(parts.len());
    for (geometry_type, part) in parts {
        let path = directory.join(format!(
            "{}_{}.geojson",
            stem,
            geometry_type.as_str().to_lowercase()
        ));
        write_to(&part, layout, BufWriter::new(File::create(&path)?))?;
        log::info!("Wrote {} features to {}", part.len(), path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson_crs_common::{read_from, CrsSpec};
    use std::fs::File;

    const INPUT: &str = "{\"type\":\"FeatureCollection\",\"crs\":{\"type\":\"EPSG\",\"properties\":{\"code\":4283}},\"features\":[{\"type\":\"Feature\",\"geometry\":{\"type\":\"Point\",\"coordinates\":[1,2]},\"properties\":{\"id\":1}},{\"type\":\"Feature\",\"geometry\":{\"type\":\"Polygon\",\"coordinates\":[[[0,0],[1,0],[1,1],[0,0]]]},\"properties\":{\"id\":2}},{\"type\":\"Feature\",\"geometry\":{\"type\":\"Point\",\"coordinates\":[3,4]},\"properties\":{\"id\":3}}]}";

    #[test]
    fn test_split_writes_one_file_per_type() {
        let dir = tempfile::tempdir().expect("Able to create temp dir");

        let written = split_to_directory(
            INPUT.as_bytes(),
            "suburbs",
            dir.path(),
            None,
            Layout::FeaturePerLine,
        )
        .expect("Able to split");

        assert_eq!(
            written,
            vec![
                dir.path().join("suburbs_point.geojson"),
                dir.path().join("suburbs_polygon.geojson")
            ]
        );

        let points = read_from(File::open(&written[0]).unwrap()).expect("Able to read points");
        assert_eq!(points.len(), 2);
        assert_eq!(points.crs(), &CrsSpec::EpsgCode { code: 4283 });

        let polygons =
            read_from(File::open(&written[1]).unwrap()).expect("Able to read polygons");
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons.crs(), &CrsSpec::EpsgCode { code: 4283 });
    }

    #[test]
    fn test_split_single_missing_type_writes_empty_document() {
        let dir = tempfile::tempdir().expect("Able to create temp dir");
        let out_dir = dir.path().join("nested");

        let written = split_to_directory(
            INPUT.as_bytes(),
            "suburbs",
            &out_dir,
            Some(GeometryType::MultiLineString),
            Layout::Compact,
        )
        .expect("Able to split");

        assert_eq!(written, vec![out_dir.join("suburbs_multilinestring.geojson")]);
        let lines = read_from(File::open(&written[0]).unwrap()).expect("Able to read output");
        assert!(lines.is_empty());
        assert_eq!(lines.crs(), &CrsSpec::EpsgCode { code: 4283 });
    }
}
