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

use crate::document::{GeoJsonDocument, GeometryType};
use indexmap::IndexMap;

/// Homogeneous documents keyed by geometry type, in the order each type first appears.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometrySplit {
    template: GeoJsonDocument,
    parts: IndexMap<GeometryType, GeoJsonDocument>,
}

impl GeometrySplit {
    pub fn get(&self, geometry_type: GeometryType) -> Option<&GeoJsonDocument> {
        self.parts.get(&geometry_type)
    }

    /// The document for `geometry_type`; empty, with the original crs, if there were no
    /// features of that type.
    pub fn document(&self, geometry_type: GeometryType) -> GeoJsonDocument {
        self.get(geometry_type)
            .cloned()
            .unwrap_or_else(|| self.template.clone())
    }

    pub fn geometry_types(&self) -> impl Iterator<Item = GeometryType> + '_ {
        self.parts.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GeometryType, &GeoJsonDocument)> + '_ {
        self.parts.iter().map(|(t, d)| (*t, d))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl IntoIterator for GeometrySplit {
    type Item = (GeometryType, GeoJsonDocument);
    type IntoIter = indexmap::map::IntoIter<GeometryType, GeoJsonDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}

/// Partitions the features of `document` by geometry type. Each part keeps the original
/// relative order of its features and a copy of the document's crs and name.
pub fn split_by_geometry_type(document: GeoJsonDocument) -> GeometrySplit {
    let template = document.empty_like();

    let mut grouped: IndexMap<GeometryType, Vec<_>> = IndexMap::new();
    for feature in document.into_features() {
        grouped
            .entry(feature.geometry_type())
            .or_insert_with(Vec::new)
            .push(feature);
    }

    let parts: IndexMap<GeometryType, GeoJsonDocument> = grouped
        .into_iter()
        .map(|(geometry_type, features)| (geometry_type, template.with_features(features)))
        .collect();

    log::debug!(
        "Split into {} documents: {}",
        parts.len(),
        parts
            .iter()
            .map(|(t, d)| format!("{} {}", d.len(), t))
            .collect::<Vec<_>>()
            .join(", ")
    );

    GeometrySplit { template, parts }
}

/// The features of one geometry type, without splitting the rest.
pub fn select_geometry_type(
    document: &GeoJsonDocument,
    geometry_type: GeometryType,
) -> GeoJsonDocument {
    document.with_features(
        document
            .features()
            .iter()
            .filter(|f| f.geometry_type() == geometry_type)
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::{CrsSpec, CRS84_URN};
    use crate::document::Feature;
    use crate::reader::read;
    use serde_json::{json, Value};

    const EXAMPLE: &str = "{\"type\":\"FeatureCollection\",\"crs\":{\"type\":\"name\",\"properties\":{\"name\":\"urn:ogc:def:crs:OGC:1.3:CRS84\"}},\"features\":[{\"type\":\"Feature\",\"geometry\":{\"type\":\"Point\",\"coordinates\":[1,2]},\"properties\":{\"id\":1}},{\"type\":\"Feature\",\"geometry\":{\"type\":\"Polygon\",\"coordinates\":[[[0,0],[1,0],[1,1],[0,0]]]},\"properties\":{\"id\":2}}]}";

    fn ids(document: &GeoJsonDocument) -> Vec<Value> {
        document
            .features()
            .iter()
            .map(|f| f.properties()["id"].clone())
            .collect()
    }

    fn mixed() -> GeoJsonDocument {
        let text = json!({
            "type": "FeatureCollection",
            "name": "mixed",
            "crs": { "type": "EPSG", "properties": { "code": 4283 } },
            "features": [
                { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] }, "properties": { "id": 1 } },
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [0, 0] }, "properties": { "id": 2 } },
                { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[1, 1], [2, 2]] }, "properties": { "id": 3 } },
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [5, 5] }, "properties": { "id": 4 } },
                { "type": "Feature", "geometry": { "type": "MultiPoint", "coordinates": [[5, 5]] }, "properties": { "id": 5 } }
            ]
        })
        .to_string();
        read(text.as_bytes()).expect("Able to read mixed collection")
    }

    #[test]
    fn test_split_example() {
        let split = split_by_geometry_type(read(EXAMPLE.as_bytes()).expect("Able to read"));
        let crs = CrsSpec::Named {
            name: CRS84_URN.to_string(),
        };

        assert_eq!(split.len(), 2);
        let points = split.get(GeometryType::Point).expect("points exist");
        let polygons = split.get(GeometryType::Polygon).expect("polygons exist");
        assert_eq!(points.len(), 1);
        assert_eq!(polygons.len(), 1);
        assert_eq!(points.crs(), &crs);
        assert_eq!(polygons.crs(), &crs);
    }

    #[test]
    fn test_split_is_a_complete_ordered_partition() {
        let document = mixed();
        let total = document.len();
        let split = split_by_geometry_type(document);

        let types: Vec<GeometryType> = split.geometry_types().collect();
        assert_eq!(
            types,
            vec![
                GeometryType::LineString,
                GeometryType::Point,
                GeometryType::MultiPoint
            ]
        );

        assert_eq!(ids(&split.document(GeometryType::LineString)), vec![json!(1), json!(3)]);
        assert_eq!(ids(&split.document(GeometryType::Point)), vec![json!(2), json!(4)]);

        let concatenated: Vec<Value> = split.iter().flat_map(|(_, d)| ids(d)).collect();
        assert_eq!(
            concatenated,
            vec![json!(1), json!(3), json!(2), json!(4), json!(5)]
        );
        assert_eq!(split.iter().map(|(_, d)| d.len()).sum::<usize>(), total);

        for (_, part) in split {
            assert_eq!(part.crs(), &CrsSpec::EpsgCode { code: 4283 });
            assert_eq!(part.name(), Some("mixed"));
        }
    }

    #[test]
    fn test_missing_type_is_empty_document_with_crs() {
        let split = split_by_geometry_type(mixed());
        assert!(split.get(GeometryType::Polygon).is_none());

        let polygons = split.document(GeometryType::Polygon);
        assert!(polygons.is_empty());
        assert_eq!(polygons.crs(), &CrsSpec::EpsgCode { code: 4283 });

        let selected = select_geometry_type(&mixed(), GeometryType::Polygon);
        assert!(selected.is_empty());
        assert_eq!(selected.crs(), &CrsSpec::EpsgCode { code: 4283 });
    }

    #[test]
    fn test_select_geometry_type_matches_split() {
        let document = mixed();
        let split = split_by_geometry_type(document.clone());
        for geometry_type in GeometryType::ALL.iter().copied() {
            assert_eq!(
                select_geometry_type(&document, geometry_type),
                split.document(geometry_type)
            );
        }
    }

    #[test]
    fn test_split_empty_document() {
        let split = split_by_geometry_type(GeoJsonDocument::new(
            CrsSpec::Absent,
            Vec::<Feature>::new(),
        ));
        assert!(split.is_empty());
        assert_eq!(split.document(GeometryType::Point).crs(), &CrsSpec::Absent);
    }
}
