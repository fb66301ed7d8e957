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

use crate::crs::{CrsSpec, CRS84_URN, NAME_PREFIX};
use crate::error::{GeoJsonCrsError, Result};
use nom::{digit, do_parse, map_res, named, tag, tag_no_case, take_while, types::CompleteStr};
use std::num::ParseIntError;

fn parse_u32(s: CompleteStr) -> std::result::Result<u32, ParseIntError> {
    s.parse::<u32>()
}

fn is_not_colon(c: char) -> bool {
    c != ':'
}

named!(
    parse_epsg_shorthand<CompleteStr, u32>,
    do_parse!(
        tag_no_case!("EPSG:") >>
        code: map_res!(digit, parse_u32) >>
        (code)
    )
);

named!(
    parse_epsg_urn<CompleteStr, u32>,
    do_parse!(
        tag_no_case!("urn:ogc:def:crs:EPSG:") >>
        take_while!(is_not_colon) >>
        tag!(":") >>
        code: map_res!(digit, parse_u32) >>
        (code)
    )
);

/// Reads the EPSG code out of `urn:ogc:def:crs:EPSG:<version>:<code>`.
/// The version may be empty, as in `urn:ogc:def:crs:EPSG::4283`.
pub fn epsg_code_from_urn(urn: &str) -> Option<u32> {
    match parse_epsg_urn(CompleteStr(urn.trim())) {
        Ok((rest, code)) if rest.0.is_empty() && code > 0 => Some(code),
        _ => None,
    }
}

/// Parses a crs given on the command line.
///
/// `EPSG:4283` yields an EPSG coded crs, `CRS84` or `OGC:CRS84` the OGC CRS84 urn,
/// `none` an absent crs and `name:<name>` the named crs `<name>` verbatim. Anything else
/// is kept verbatim as a named crs. This reads back every `CrsSpec` display.
pub fn parse_crs_argument(argument: &str) -> Result<CrsSpec> {
    let argument = argument.trim();

    if argument.is_empty() {
        return Err(GeoJsonCrsError::MalformedCrs(
            "crs argument is empty".to_string(),
        ));
    }

    if let Some(name) = argument.strip_prefix(NAME_PREFIX) {
        return CrsSpec::named(name);
    }

    if argument.eq_ignore_ascii_case("none") {
        return Ok(CrsSpec::Absent);
    }

    if argument.eq_ignore_ascii_case("CRS84") || argument.eq_ignore_ascii_case("OGC:CRS84") {
        return CrsSpec::named(CRS84_URN);
    }

    match parse_epsg_shorthand(CompleteStr(argument)) {
        Ok((rest, code)) if rest.0.is_empty() => CrsSpec::epsg(code),
        _ if argument
            .get(..5)
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case("EPSG:")) =>
        {
            Err(GeoJsonCrsError::MalformedCrs(format!(
                "'{}' is not a valid EPSG code",
                argument
            )))
        }
        _ => CrsSpec::named(argument),
    }
}
