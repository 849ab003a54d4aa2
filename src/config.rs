// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::{App, Arg, ArgMatches};
use log::LevelFilter;

use crate::{NAME, VERSION};

pub const DEFAULT_OUTPUT: &str = "parametrized.png";

/// Parsed command-line options.
#[derive(Clone, Debug)]
pub struct Config {
    files: Vec<String>,
    log_x: bool,
    log_time: bool,
    titles: Option<Vec<String>>,
    output: String,
    logging: LevelFilter,
}

impl Config {
    /// parse command line options and return `Config`
    pub fn new() -> Config {
        let matches = App::new(NAME)
            .version(VERSION)
            .about("Shows parametrized benchmark results as an errorbar plot")
            .arg(
                Arg::with_name("file")
                    .value_name("FILE")
                    .help("JSON file with benchmark results")
                    .required(true)
                    .multiple(true),
            )
            .arg(
                Arg::with_name("parameter-name")
                    .long("parameter-name")
                    .value_name("NAME")
                    .help("Deprecated; parameter names are inferred from benchmark files")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("log-x")
                    .long("log-x")
                    .help("Use a logarithmic x (parameter) axis"),
            )
            .arg(
                Arg::with_name("log-time")
                    .long("log-time")
                    .help("Use a logarithmic time axis"),
            )
            .arg(
                Arg::with_name("titles")
                    .long("titles")
                    .value_name("LIST")
                    .help("Comma-separated list of titles for the plot legend")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("output")
                    .short("o")
                    .long("output")
                    .value_name("FILE")
                    .help("Render the plot to file, PNG unless the extension is .svg")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("verbose")
                    .short("v")
                    .long("verbose")
                    .help("Increase verbosity by one level. Can be used more than once")
                    .multiple(true),
            )
            .get_matches();

        Config::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Config {
        if matches.is_present("parameter-name") {
            eprintln!(
                "warning: --parameter-name is deprecated; names are inferred from benchmark results"
            );
        }

        let files = matches
            .values_of("file")
            .map(|v| v.map(|f| f.to_string()).collect())
            .unwrap_or_default();

        let titles = parse_titles(matches.value_of("titles"));

        let output = matches
            .value_of("output")
            .unwrap_or(DEFAULT_OUTPUT)
            .to_string();

        let logging = match matches.occurrences_of("verbose") {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        Config {
            files,
            log_x: matches.is_present("log-x"),
            log_time: matches.is_present("log-time"),
            titles,
            output,
            logging,
        }
    }

    #[cfg(test)]
    pub fn for_tests(output: &str) -> Config {
        Config {
            files: Vec::new(),
            log_x: false,
            log_time: false,
            titles: None,
            output: output.to_string(),
            logging: LevelFilter::Info,
        }
    }

    /// input files, in command-line order
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// render the x (parameter) axis logarithmically
    pub fn log_x(&self) -> bool {
        self.log_x
    }

    /// render the y (time) axis logarithmically
    pub fn log_time(&self) -> bool {
        self.log_time
    }

    /// legend labels, one per file; no legend is drawn when absent
    pub fn titles(&self) -> Option<&[String]> {
        self.titles.as_deref()
    }

    /// legend label for the series at `index`
    pub fn title(&self, index: usize) -> Option<&str> {
        self.titles
            .as_ref()
            .and_then(|titles| titles.get(index))
            .map(|title| title.as_str())
    }

    /// path of the rendered chart
    pub fn output(&self) -> &str {
        &self.output
    }

    /// get logging level
    pub fn logging(&self) -> LevelFilter {
        self.logging
    }
}

fn split_titles(titles: &str) -> Vec<String> {
    titles.split(',').map(|t| t.to_string()).collect()
}

// an empty titles value means no legend, same as omitting the flag
fn parse_titles(titles: Option<&str>) -> Option<Vec<String>> {
    match titles {
        None | Some("") => None,
        Some(titles) => Some(split_titles(titles)),
    }
}
