// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2024 Oxide Computer Company

//! Turn an `ibdiagnet` net dump into a Network Defined Topology (NDT) table.
//!
//! The dump is classified line by line, the accepted port-to-port links are
//! collected into a [`LinkSet`] that is deduplicated by a case-insensitive
//! identity, and the result is projected into the fixed NDT CSV layout.

pub mod classify;
pub mod errors;
pub mod parser;
pub mod projector;
pub mod store;
pub mod types;

pub use errors::NdtError;
pub use errors::NdtResult;
pub use parser::parse;
pub use parser::parse_file;
pub use parser::ParseOptions;
pub use parser::ParseStats;
pub use parser::ParsedDump;
pub use projector::render_ndt;
pub use projector::write_ndt;
pub use projector::NDT_HEADER;
pub use store::LinkSet;
pub use types::DisconnectedPort;
pub use types::Link;
pub use types::LinkKey;

/// Name of the net dump file `ibdiagnet` writes into its output directory.
pub const NET_DUMP_FILE_NAME: &str = "ibdiagnet2.net_dump";

/// Peers whose description contains this are aggregation (SHARP) nodes.
pub const AGGREGATION_NODE_MARKER: &str = "Aggregation Node";
