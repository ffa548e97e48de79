// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2024 Oxide Computer Company

use std::fmt;

use camino::Utf8Path;
use slog::debug;
use slog::info;
use slog::trace;

use crate::classify::classify;
use crate::classify::Line;
use crate::errors::NdtError;
use crate::errors::NdtResult;
use crate::store::LinkSet;
use crate::types::DisconnectedPort;
use crate::types::Link;
use crate::types::SwitchContext;
use crate::AGGREGATION_NODE_MARKER;

/// Settings that steer the filtering policy of a parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Report down switch ports as disconnected rather than dropping them.
    pub include_down_ports: bool,
    /// Peers whose name contains this string are not cabling of interest.
    pub aggregation_marker: String,
    /// Keep the whole peer description, including anything after a ':' in
    /// it, rather than only its first segment.
    pub full_peer_names: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            include_down_ports: false,
            aggregation_marker: AGGREGATION_NODE_MARKER.to_string(),
            full_peer_names: false,
        }
    }
}

/// Counters describing what a single parse saw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub blanks: usize,
    pub comments: usize,
    pub switches: usize,
    pub port_lines: usize,
    /// Lines that could not be classified as anything useful.
    pub malformed: usize,
    /// Port lines that appeared before any switch header.
    pub orphaned: usize,
    pub down_skipped: usize,
    pub down_retained: usize,
    pub aggregation_skipped: usize,
    /// Links whose identity had already been recorded.
    pub duplicate_links: usize,
}

impl fmt::Display for ParseStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} lines, {} switches, {} port lines \
            ({} malformed, {} orphaned, {} down skipped, {} down retained, \
            {} aggregation skipped, {} duplicate links)",
            self.lines,
            self.switches,
            self.port_lines,
            self.malformed,
            self.orphaned,
            self.down_skipped,
            self.down_retained,
            self.aggregation_skipped,
            self.duplicate_links,
        )
    }
}

/// Everything extracted from one dump.
#[derive(Clone, Debug, Default)]
pub struct ParsedDump {
    pub links: LinkSet,
    /// Down ports, in the order they appear in the dump.
    pub disconnected: Vec<DisconnectedPort>,
    pub stats: ParseStats,
}

/// Parse the full text of a net dump.
pub fn parse(
    log: &slog::Logger,
    text: &str,
    opts: &ParseOptions,
) -> ParsedDump {
    let log = log.new(slog::o!("unit" => "parser"));
    let mut dump = ParsedDump::default();
    let mut switch: Option<SwitchContext> = None;

    for (idx, raw) in text.lines().enumerate() {
        let lineno = idx + 1;
        dump.stats.lines += 1;

        let fields = match classify(raw) {
            Line::Blank => {
                dump.stats.blanks += 1;
                continue;
            }
            Line::Comment => {
                dump.stats.comments += 1;
                continue;
            }
            Line::SwitchHeader(ctx) => {
                trace!(log, "switch {} ({})", ctx.name, ctx.guid);
                dump.stats.switches += 1;
                switch = Some(ctx);
                continue;
            }
            Line::Unparseable(reason) => {
                debug!(log, "skipping line {lineno}: {reason}");
                dump.stats.malformed += 1;
                continue;
            }
            Line::PortLine(fields) => fields,
        };

        dump.stats.port_lines += 1;
        let Some(ctx) = &switch else {
            debug!(log, "skipping line {lineno}: port line outside of a switch");
            dump.stats.orphaned += 1;
            continue;
        };

        let record = fields.record(opts.full_peer_names);
        if record.is_down() {
            if opts.include_down_ports {
                dump.stats.down_retained += 1;
                dump.disconnected.push(DisconnectedPort {
                    device: ctx.name.clone(),
                    port_number: record.port_number,
                });
            } else {
                dump.stats.down_skipped += 1;
            }
            continue;
        }

        if record.peer_name.contains(&opts.aggregation_marker) {
            trace!(
                log,
                "skipping aggregation node {} on {}/{}",
                record.peer_name,
                ctx.name,
                record.port_number
            );
            dump.stats.aggregation_skipped += 1;
            continue;
        }

        let link = Link::new(
            &ctx.name,
            &record.port_number,
            &record.peer_name,
            &record.peer_port_number,
        );
        trace!(log, "link {link}"; "peer_guid" => &record.peer_guid);
        if !dump.links.insert(link) {
            dump.stats.duplicate_links += 1;
        }
    }

    info!(log, "parsed net dump: {}", dump.stats);
    dump
}

/// Read a net dump from disk and parse it.
pub fn parse_file(
    log: &slog::Logger,
    path: &Utf8Path,
    opts: &ParseOptions,
) -> NdtResult<ParsedDump> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| NdtError::unavailable(path, e))?;
    debug!(log, "read {} bytes from {path}", text.len());
    Ok(parse(log, &text, opts))
}
