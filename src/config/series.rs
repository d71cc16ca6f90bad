// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_derive::*;

/// Settings for the per-element TLB latency plot.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Series {
    #[serde(default = "yes")]
    enabled: bool,
    #[serde(default = "yes")]
    required: bool,
    #[serde(default = "default_input")]
    input: String,
    #[serde(default = "default_output")]
    output: String,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
}

impl Series {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for Series {
    fn default() -> Series {
        Series {
            enabled: yes(),
            required: yes(),
            input: default_input(),
            output: default_output(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn yes() -> bool {
    true
}

fn default_input() -> String {
    "tlb_results.csv".to_string()
}

fn default_output() -> String {
    "tlb_graph.png".to_string()
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    960
}
