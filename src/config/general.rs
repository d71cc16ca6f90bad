// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use log::Level;
use serde_derive::*;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(default = "default_data_dir")]
    data_dir: String,
    #[serde(default = "default_figures_dir")]
    figures_dir: String,
    #[serde(with = "LevelDef")]
    #[serde(default = "default_logging_level")]
    logging: Level,
}

impl General {
    pub fn data_dir(&self) -> &str {
        &self.data_dir
    }

    pub fn set_data_dir(&mut self, dir: &str) {
        self.data_dir = dir.to_string();
    }

    pub fn figures_dir(&self) -> &str {
        &self.figures_dir
    }

    pub fn set_figures_dir(&mut self, dir: &str) {
        self.figures_dir = dir.to_string();
    }

    pub fn logging(&self) -> Level {
        self.logging
    }

    pub fn set_logging(&mut self, level: Level) {
        self.logging = level;
    }
}

impl Default for General {
    fn default() -> General {
        General {
            data_dir: default_data_dir(),
            figures_dir: default_figures_dir(),
            logging: default_logging_level(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_figures_dir() -> String {
    "figures".to_string()
}

#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
#[serde(remote = "Level")]
#[serde(deny_unknown_fields)]
enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn default_logging_level() -> Level {
    Level::Info
}
