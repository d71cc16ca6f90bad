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
            eprintln!("tlb-graph: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = Logger::new()
        .label("tlb_graph")
        .level(config.logging())
        .init()
    {
        eprintln!("failed to initialize logger: {}", e);
        std::process::exit(1);
    }

    info!("tlb-graph {} initializing...", VERSION);
    config.print();

    if let Err(e) = perfgraph::run(&config, Suite::Series) {
        fatal!("{}", e);
    }
}
