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

use clap::ArgMatches;
use geojson_crs_common::{parse_crs_argument, CrsSpec, GeoJsonCrsError, GeometryType, Layout};
use std::fs::File;
use std::io::{stdin, stdout, BufWriter, Read, Write};
use std::path::Path;

/// Reads the whole input file, or stdin when no path is given.
pub fn read_input(path: Option<&str>) -> Result<Vec<u8>, GeoJsonCrsError> {
    let mut buffer = vec![];
    match path {
        Some(p) => {
            log::debug!("Reading {}", p);
            File::open(p)?.read_to_end(&mut buffer)?;
        }
        None => {
            stdin().lock().read_to_end(&mut buffer)?;
        }
    }
    Ok(buffer)
}

/// A buffered writer to the output file, or to stdout when no path is given.
pub fn output_writer(path: Option<&str>) -> Result<Box<dyn Write>, GeoJsonCrsError> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(BufWriter::new(stdout())),
    })
}

pub fn crs_option(args: &ArgMatches) -> Result<Option<CrsSpec>, GeoJsonCrsError> {
    args.value_of("crs").map(parse_crs_argument).transpose()
}

pub fn layout_option(args: &ArgMatches) -> Result<Layout, GeoJsonCrsError> {
    args.value_of("layout")
        .map(|l| l.parse())
        .unwrap_or(Ok(Layout::Compact))
}

pub fn geometry_type_option(args: &ArgMatches) -> Result<Option<GeometryType>, GeoJsonCrsError> {
    args.value_of("type").map(|t| t.parse()).transpose()
}

/// The file stem of the input, used to name split outputs.
pub fn input_stem(path: Option<&str>) -> String {
    path.and_then(|p| Path::new(p).file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("features")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_stem() {
        assert_eq!(input_stem(Some("data/suburbs.geojson")), "suburbs");
        assert_eq!(input_stem(Some("plain")), "plain");
        assert_eq!(input_stem(None), "features");
    }
}
