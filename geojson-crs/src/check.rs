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

use geojson_crs_common::{read, GeoJsonCrsError};
use std::io::Write;

pub fn check<W: Write>(input: &[u8], mut out: W) -> Result<(), GeoJsonCrsError> {
    let document = read(input)?;

    writeln!(out, "crs: {}", document.crs())?;
    writeln!(out, "features: {}", document.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_valid_collection() {
        let input = "{ \"type\": \"FeatureCollection\", \"crs\": { \"type\": \"EPSG\", \"properties\": { \"code\": 4283 } }, \"features\": [{ \"type\": \"Feature\", \"geometry\": { \"type\": \"Point\", \"coordinates\": [1, 2] }, \"properties\": {} }] }";
        let mut out = vec![];

        check(input.as_bytes(), &mut out).expect("Able to check collection");

        assert_eq!(out, "crs: EPSG:4283\nfeatures: 1\n".as_bytes().to_vec());
    }

    #[test]
    fn test_check_reports_invalid_features() {
        let input = "{ \"type\": \"FeatureCollection\", \"features\": [{ \"type\": \"Feature\", \"geometry\": null, \"properties\": {} }, { \"type\": \"Feature\", \"geometry\": null, \"properties\": {} }] }";
        let mut out = vec![];

        match check(input.as_bytes(), &mut out) {
            Err(GeoJsonCrsError::InvalidFeature(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected invalid features, got {:?}", other),
        }
        assert!(out.is_empty());
    }
}
