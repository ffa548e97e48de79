// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2024 Oxide Computer Company

use anyhow::Context;
use slog::error;
use structopt::StructOpt;

use ndtgen::Config;
use ndtgen::IbDiagNet;
use ndtgen::Opt;

fn run_ndtgen(opts: Opt) -> anyhow::Result<()> {
    let log = common::logging::init(
        "ndtgen",
        opts.log_file.as_deref(),
        opts.log_format,
    )?;

    let config = Config::from(&opts);
    let discovery = IbDiagNet::new(&opts.discovery_dir);
    let summary = ndtgen::run(&log, &config, &discovery)
        .map_err(|e| {
            error!(log, "{e}");
            e
        })
        .context("NDT file generation failed")?;

    println!(
        "NDT file generation completed. Could be found at {}",
        summary.output
    );
    Ok(())
}

fn main() {
    let opts = Opt::from_args();
    // The logger is dropped, and its queue drained, before we exit.
    if let Err(e) = run_ndtgen(opts) {
        eprintln!("failed: {e:#}");
        std::process::exit(1);
    }
}
