// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod general;
mod pairwise;
mod series;

pub use self::general::General;
pub use self::pairwise::Pairwise;
pub use self::series::Series;

use crate::{DuplicatePolicy, Error};

use clap::{App, Arg, ArgMatches};
use log::Level;
use serde_derive::*;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
    #[serde(default)]
    pairwise: Pairwise,
    #[serde(default)]
    series: Series,
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new(NAME)
        .version(VERSION)
        .author("Brian Martin <bmartin@twitter.com>")
        .about("Renders latency benchmark results")
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("TOML config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Directory holding the benchmark result files")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("figures-dir")
                .long("figures-dir")
                .value_name("DIR")
                .help("Directory the rendered images are written to")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("gap-fill")
                .long("gap-fill")
                .value_name("VALUE")
                .help("Fill heatmap cells with no measurement instead of failing")
                .allow_hyphen_values(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("reject-duplicates")
                .long("reject-duplicates")
                .help("Fail when a core pair is measured more than once"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Increase verbosity by one level. Can be used more than once")
                .multiple(true),
        )
}

impl Config {
    /// parse command line options and return `Config`
    pub fn new() -> Result<Config, Error> {
        let matches = app().get_matches();
        Self::from_matches(&matches)
    }

    /// parse the given arguments, the first being the program name
    pub fn from_args<I, T>(args: I) -> Result<Config, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app()
            .get_matches_from_safe(args)
            .map_err(|e| Error::Config(e.to_string()))?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Config, Error> {
        let mut config = if let Some(file) = matches.value_of("config") {
            Config::load_from_file(file)?
        } else {
            Default::default()
        };

        if let Some(dir) = matches.value_of("data-dir") {
            config.general.set_data_dir(dir);
        }

        if let Some(dir) = matches.value_of("figures-dir") {
            config.general.set_figures_dir(dir);
        }

        if let Some(fill) = parse_numeric_arg::<i64>(matches, "gap-fill")? {
            config.pairwise.set_gap_fill(Some(fill));
        }

        if matches.is_present("reject-duplicates") {
            config.pairwise.set_duplicates(DuplicatePolicy::Reject);
        }

        match matches.occurrences_of("verbose") {
            0 => {}
            1 => config.general.set_logging(Level::Debug),
            _ => config.general.set_logging(Level::Trace),
        }

        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(file: P) -> Result<Config, Error> {
        let path = file.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::MissingInput {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            Error::Config(reason) => Error::Config(format!("{}: {}", path.display(), reason)),
            e => e,
        })
    }

    pub fn from_toml(content: &str) -> Result<Config, Error> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn general_mut(&mut self) -> &mut General {
        &mut self.general
    }

    pub fn pairwise(&self) -> &Pairwise {
        &self.pairwise
    }

    pub fn pairwise_mut(&mut self) -> &mut Pairwise {
        &mut self.pairwise
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn series_mut(&mut self) -> &mut Series {
        &mut self.series
    }

    /// get logging level
    pub fn logging(&self) -> Level {
        self.general.logging()
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(self.general.data_dir())
    }

    pub fn figures_dir(&self) -> PathBuf {
        PathBuf::from(self.general.figures_dir())
    }

    pub fn print(&self) {
        info!("-----");
        info!(
            "Config: Data: {} Figures: {}",
            self.general.data_dir(),
            self.general.figures_dir()
        );
        info!(
            "Config: Pairwise: Operations: {} Required: {}",
            self.pairwise.operations().join(","),
            if self.pairwise.required().is_empty() {
                "None".to_string()
            } else {
                self.pairwise.required().join(",")
            }
        );
        info!(
            "Config: Pairwise: Duplicates: {:?} Gaps: {}",
            self.pairwise.duplicates(),
            self.pairwise
                .gap_fill()
                .map(|v| format!("Fill({})", v))
                .unwrap_or_else(|| "Reject".to_string()),
        );
        info!(
            "Config: Series: Enabled: {} Required: {} Input: {} Output: {}",
            self.series.enabled(),
            self.series.required(),
            self.series.input(),
            self.series.output(),
        );
    }
}

/// a helper function to parse a numeric argument by name from `ArgMatches`
fn parse_numeric_arg<T: FromStr>(matches: &ArgMatches, key: &str) -> Result<Option<T>, Error> {
    match matches.value_of(key) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("could not parse {}: {}", key, value))),
        None => Ok(None),
    }
}
