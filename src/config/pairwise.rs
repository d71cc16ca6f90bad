// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{DuplicatePolicy, GapPolicy};

use serde_derive::*;

/// Settings for the core-to-core heatmaps, one per measured operation.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pairwise {
    #[serde(default = "default_operations")]
    operations: Vec<String>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    duplicates: DuplicatePolicy,
    gap_fill: Option<i64>,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
}

impl Pairwise {
    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    pub fn set_operations(&mut self, operations: Vec<String>) {
        self.operations = operations;
    }

    /// operations whose input must be present
    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn set_required(&mut self, required: Vec<String>) {
        self.required = required;
    }

    pub fn is_required(&self, operation: &str) -> bool {
        self.required.iter().any(|r| r == operation)
    }

    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    pub fn set_duplicates(&mut self, policy: DuplicatePolicy) {
        self.duplicates = policy;
    }

    pub fn gap_fill(&self) -> Option<i64> {
        self.gap_fill
    }

    pub fn set_gap_fill(&mut self, fill: Option<i64>) {
        self.gap_fill = fill;
    }

    pub fn gap_policy(&self) -> GapPolicy {
        GapPolicy::from(self.gap_fill)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn input_file(&self, operation: &str) -> String {
        format!("cco_{}_results.csv", operation)
    }

    pub fn output_file(&self, operation: &str) -> String {
        format!("cco_{}_table.png", operation)
    }
}

impl Default for Pairwise {
    fn default() -> Pairwise {
        Pairwise {
            operations: default_operations(),
            required: Vec::new(),
            duplicates: DuplicatePolicy::default(),
            gap_fill: None,
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_operations() -> Vec<String> {
    vec!["read".to_string(), "write".to_string()]
}

fn default_width() -> u32 {
    2500
}

fn default_height() -> u32 {
    1500
}
