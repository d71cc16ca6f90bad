// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

use perfgraph::*;

fn main() {
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cco-heatmap: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = Logger::new()
        .label("cco_heatmap")
        .level(config.logging())
        .init()
    {
        eprintln!("failed to initialize logger: {}", e);
        std::process::exit(1);
    }

    info!("cco-heatmap {} initializing...", VERSION);
    config.print();

    match perfgraph::run(&config, Suite::Pairwise) {
        Ok(report) => info!(
            "rendered {} heatmap(s), skipped {}",
            report.artifacts.len(),
            report.skipped.len()
        ),
        Err(e) => fatal!("{}", e),
    }
}
