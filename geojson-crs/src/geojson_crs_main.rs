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

use clap::{
    app_from_crate, crate_authors, crate_description, crate_name, crate_version, App, Arg,
    ArgMatches, SubCommand,
};
use common::{
    crs_option, geometry_type_option, input_stem, layout_option, output_writer, read_input,
};
use geojson_crs_common::{CrsSpec, GeoJsonCrsError};
use log::LevelFilter;
use std::io::{stdin, BufReader};
use std::path::Path;
use std::process::exit;

mod check;
mod common;
mod convert;
mod from_geojson;
mod info;
mod split;
mod to_geojson;

fn main() {
    let args = parse_args();

    env_logger::Builder::new()
        .filter_level(log_level(args.occurrences_of("verbose")))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(&args) {
        report(&e);
        exit(1);
    }
}

fn log_level(occurrences: u64) -> LevelFilter {
    match occurrences {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn report(error: &GeoJsonCrsError) {
    match error {
        GeoJsonCrsError::InvalidFeature(errors) => {
            log::error!("{} invalid feature(s)", errors.len());
            for e in errors {
                log::error!("{}", e);
            }
        }
        e => log::error!("{}", e),
    }
}

fn run(args: &ArgMatches) -> Result<(), GeoJsonCrsError> {
    match args.subcommand() {
        ("check", Some(args)) => {
            let input = read_input(args.value_of("input"))?;
            check::check(&input, output_writer(None)?)
        }
        ("info", Some(args)) => {
            let input = read_input(args.value_of("input"))?;
            info::info(&input, output_writer(None)?)
        }
        ("convert", Some(args)) => {
            let input = read_input(args.value_of("input"))?;
            convert::convert(
                &input,
                crs_option(args)?,
                layout_option(args)?,
                args.value_of("output"),
            )
        }
        ("split", Some(args)) => {
            let input_path = args.value_of("input");
            let input = read_input(input_path)?;
            let stem = args
                .value_of("stem")
                .map(String::from)
                .unwrap_or_else(|| input_stem(input_path));
            let directory = args
                .value_of("directory")
                .ok_or_else(|| GeoJsonCrsError::InvalidArgument("--dir is required".into()))?;

            split::split_to_directory(
                &input,
                &stem,
                Path::new(directory),
                geometry_type_option(args)?,
                layout_option(args)?,
            )
            .map(|_| ())
        }
        ("from-geojson", Some(args)) => {
            let input = read_input(args.value_of("input"))?;
            from_geojson::split(&input, output_writer(None)?)
        }
        ("to-geojson", Some(args)) => to_geojson::to_geojson(
            BufReader::new(stdin()),
            crs_option(args)?.unwrap_or(CrsSpec::Absent),
            args.value_of("name"),
            layout_option(args)?,
            args.value_of("output"),
        ),
        (name, _) => Err(GeoJsonCrsError::InvalidArgument(format!(
            "unknown subcommand '{}'",
            name
        ))),
    }
}

fn input_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("input")
        .index(1)
        .required(false)
        .help("The geojson file to read, stdin if not given")
}

fn output_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("output")
        .short("o")
        .long("output")
        .takes_value(true)
        .number_of_values(1)
        .help("The file to write, stdout if not given")
}

fn crs_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("crs")
        .long("crs")
        .takes_value(true)
        .number_of_values(1)
        .help("The crs to declare: EPSG:<code>, CRS84, none, a crs urn, or name:<name>")
}

fn layout_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("layout")
        .short("l")
        .long("layout")
        .takes_value(true)
        .possible_values(&["compact", "lines"])
        .default_value("compact")
        .help("'compact' writes one line, 'lines' writes one feature per line")
}

fn build_app<'a, 'b>() -> App<'a, 'b> {
    app_from_crate!()
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Log more, repeat for more detail"),
        )
        .subcommand(
            SubCommand::with_name("check")
                .about("Validates a FeatureCollection and its crs member")
                .arg(input_arg()),
        )
        .subcommand(
            SubCommand::with_name("info")
                .about("Describes the crs, geometry types and extent of a FeatureCollection")
                .arg(input_arg()),
        )
        .subcommand(
            SubCommand::with_name("convert")
                .about("Re-writes a FeatureCollection keeping, or replacing, its crs")
                .arg(input_arg())
                .arg(output_arg())
                .arg(crs_arg())
                .arg(layout_arg()),
        )
        .subcommand(
            SubCommand::with_name("split")
                .about("Writes one FeatureCollection per geometry type, each with the original crs")
                .arg(input_arg())
                .arg(
                    Arg::with_name("directory")
                        .short("d")
                        .long("dir")
                        .required(true)
                        .takes_value(true)
                        .number_of_values(1)
                        .help("The directory to write into"),
                )
                .arg(
                    Arg::with_name("type")
                        .short("t")
                        .long("type")
                        .takes_value(true)
                        .number_of_values(1)
                        .help("Only write this geometry type, e.g. Polygon"),
                )
                .arg(
                    Arg::with_name("stem")
                        .long("stem")
                        .takes_value(true)
                        .number_of_values(1)
                        .help("File name prefix, defaults to the input file's name"),
                )
                .arg(layout_arg()),
        )
        .subcommand(
            SubCommand::with_name("from-geojson")
                .about("Convert geojson to ndjson")
                .arg(input_arg()),
        )
        .subcommand(
            SubCommand::with_name("to-geojson")
                .about("Convert ndjson on stdin to geojson")
                .arg(output_arg())
                .arg(crs_arg())
                .arg(
                    Arg::with_name("name")
                        .long("name")
                        .takes_value(true)
                        .number_of_values(1)
                        .help("The FeatureCollection's name"),
                )
                .arg(layout_arg()),
        )
}

fn parse_args<'a>() -> ArgMatches<'a> {
    build_app().get_matches()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, LevelFilter::Warn)]
    #[case(1, LevelFilter::Info)]
    #[case(2, LevelFilter::Debug)]
    #[case(5, LevelFilter::Trace)]
    fn test_log_level(#[case] occurrences: u64, #[case] expected: LevelFilter) {
        assert_eq!(log_level(occurrences), expected);
    }

    #[test]
    fn test_parse_convert_args() {
        let matches = build_app()
            .get_matches_from_safe(vec![
                "geojson-crs",
                "-vv",
                "convert",
                "in.geojson",
                "-o",
                "out.geojson",
                "--crs",
                "EPSG:4283",
                "--layout",
                "lines",
            ])
            .expect("Able to parse arguments");

        assert_eq!(matches.occurrences_of("verbose"), 2);
        let convert = matches
            .subcommand_matches("convert")
            .expect("convert was given");
        assert_eq!(convert.value_of("input"), Some("in.geojson"));
        assert_eq!(convert.value_of("output"), Some("out.geojson"));
        assert_eq!(
            crs_option(convert).unwrap(),
            Some(CrsSpec::EpsgCode { code: 4283 })
        );
        assert_eq!(
            layout_option(convert).unwrap(),
            geojson_crs_common::Layout::FeaturePerLine
        );
    }

    #[test]
    fn test_split_requires_directory() {
        assert!(build_app()
            .get_matches_from_safe(vec!["geojson-crs", "split", "in.geojson"])
            .is_err());
    }

    #[test]
    fn test_bad_geometry_type_argument() {
        let matches = build_app()
            .get_matches_from_safe(vec![
                "geojson-crs",
                "split",
                "in.geojson",
                "--dir",
                "out",
                "--type",
                "Circle",
            ])
            .expect("Able to parse arguments");
        let split = matches.subcommand_matches("split").expect("split was given");

        assert!(matches!(
            geometry_type_option(split),
            Err(GeoJsonCrsError::InvalidArgument(_))
        ));
    }
}
