// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2024 Oxide Computer Company

use std::fs;
use std::io::BufWriter;

use camino::Utf8PathBuf;
use ndt::NdtError;
use ndt::NdtResult;
use ndt::ParseStats;
use slog::debug;
use slog::info;

pub mod config;
pub mod discovery;

pub use config::Config;
pub use config::Opt;
pub use discovery::Discovery;
pub use discovery::IbDiagNet;

/// What a completed run produced.
#[derive(Clone, Debug)]
pub struct Summary {
    pub output: Utf8PathBuf,
    pub links: usize,
    pub disconnected: usize,
    pub stats: ParseStats,
}

/// Work out which net dump to read, running discovery if no input directory
/// was given.  The dump must exist as a regular file.
pub fn locate_dump(
    log: &slog::Logger,
    config: &Config,
    discovery: &dyn Discovery,
) -> NdtResult<Utf8PathBuf> {
    let path = match &config.input_dir {
        Some(dir) => dir.join(ndt::NET_DUMP_FILE_NAME),
        None => discovery.run(log)?,
    };
    if !path.is_file() {
        return Err(NdtError::unavailable(
            path,
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "ibdiagnet output file does not exist",
            ),
        ));
    }
    Ok(path)
}

/// Generate an NDT file as described by `config`.
pub fn run(
    log: &slog::Logger,
    config: &Config,
    discovery: &dyn Discovery,
) -> NdtResult<Summary> {
    let dump_path = locate_dump(log, config, discovery)?;
    info!(log, "reading net dump {dump_path}");

    let dump = ndt::parse_file(log, &dump_path, &config.parse)?;
    let links = if config.collapse_mirrored {
        let collapsed = dump.links.collapse_mirrored();
        debug!(
            log,
            "collapsed {} mirrored links",
            dump.links.len() - collapsed.len()
        );
        collapsed
    } else {
        dump.links
    };

    if let Some(parent) = config.output.parent() {
        if !parent.as_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut out = BufWriter::new(fs::File::create(&config.output)?);
    ndt::write_ndt(&mut out, &links, &dump.disconnected)?;

    let summary = Summary {
        output: config.output.clone(),
        links: links.len(),
        disconnected: dump.disconnected.len(),
        stats: dump.stats,
    };
    info!(log, "wrote {}", summary.output;
        "links" => summary.links,
        "disconnected" => summary.disconnected);
    Ok(summary)
}
