// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
mod macros;

mod config;
mod logger;
mod plot;
mod results;

use crate::config::Config;
use crate::results::Sweep;

use log::{debug, info};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

fn main() {
    let config = Config::new();

    logger::init(config.logging()).expect("Failed to initialize logger");

    debug!("{} {} initializing...", NAME, VERSION);

    let mut sweep = Sweep::new();

    // files are processed strictly in command-line order; the first file
    // establishes the parameter name that all later files must match
    for file in config.files() {
        debug!("loading: {}", file);
        let series = match results::load(file) {
            Ok(series) => series,
            Err(e) => fatal!("{}", e),
        };
        if let Err(e) = sweep.push(series) {
            fatal!("{}", e);
        }
    }

    if let Err(e) = plot::render(&sweep, &config) {
        fatal!("{}", e);
    }

    info!("rendered: {}", config.output());
}
