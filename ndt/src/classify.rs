// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2024 Oxide Computer Company

//! Classification of individual net dump lines.
//!
//! A net dump is a sequence of switch sections.  Each section opens with a
//! quoted header naming the switch and is followed by one colon-separated
//! line per port:
//!
//! ```text
//! "MF0;sw-a:MQM8700/U1", Mellanox, 0x1070fd03001adeb4, LID 24328
//!   1 : 1 : ACT : LINK UP : 5 : 4x : 50 : MLNX_RS_271_257_PLR : NO-RTR : 0xc42a10300dbfb92 : 40 : 25697 : "MF0;sw-b:MQM8700/U1"
//! ```

use crate::types::PortRecord;
use crate::types::SwitchContext;

/// Number of colon-separated fields an active port line must carry.
pub const MIN_PORT_FIELDS: usize = 13;
/// A down port line only has to reach its state column.
pub const MIN_DOWN_PORT_FIELDS: usize = STATE_FIELD + 1;
/// Number of comma-separated fields a switch header must carry.
pub const MIN_HEADER_FIELDS: usize = 3;

const PORT_NUMBER_FIELD: usize = 0;
const STATE_FIELD: usize = 2;
const PEER_GUID_FIELD: usize = 9;
const PEER_PORT_FIELD: usize = 10;
const PEER_NAME_FIELD: usize = 12;

const HEADER_NAME_FIELD: usize = 0;
const HEADER_GUID_FIELD: usize = 2;

#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    SwitchHeader(SwitchContext),
    PortLine(PortFields<'a>),
    Unparseable(&'static str),
}

/// The raw fields of a port line.
#[derive(Debug, PartialEq, Eq)]
pub struct PortFields<'a> {
    fields: Vec<&'a str>,
}

impl<'a> PortFields<'a> {
    pub fn port_number(&self) -> &'a str {
        self.fields[PORT_NUMBER_FIELD].trim()
    }

    pub fn state(&self) -> String {
        self.fields[STATE_FIELD].trim().to_lowercase()
    }

    // The peer description is the last column and may itself contain ':'.
    // Unless asked for the whole description, only the part up to the first
    // ':' is used.
    fn peer_name(&self, full: bool) -> String {
        let name = if full {
            self.fields[PEER_NAME_FIELD..].join(":")
        } else {
            self.fields[PEER_NAME_FIELD].to_string()
        };
        name.trim().trim_matches('"').to_string()
    }

    /// Build the port record.  The peer columns of a down port carry nothing
    /// useful and are left empty.
    pub fn record(&self, full_peer_names: bool) -> PortRecord {
        let state = self.state();
        let (peer_name, peer_guid, peer_port_number) = if state == "down" {
            (String::new(), String::new(), String::new())
        } else {
            (
                self.peer_name(full_peer_names),
                self.fields[PEER_GUID_FIELD].trim().to_string(),
                self.fields[PEER_PORT_FIELD].trim().to_string(),
            )
        };
        PortRecord {
            port_number: self.port_number().to_string(),
            state,
            peer_name,
            peer_guid,
            peer_port_number,
        }
    }
}

fn switch_header(line: &str) -> Line<'_> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < MIN_HEADER_FIELDS {
        return Line::Unparseable("switch header is missing its guid");
    }
    Line::SwitchHeader(SwitchContext {
        name: fields[HEADER_NAME_FIELD].trim_matches('"').to_string(),
        guid: fields[HEADER_GUID_FIELD].trim().to_string(),
    })
}

/// Classify a single line of the dump.
pub fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Line::Blank
    } else if trimmed.starts_with('#') {
        Line::Comment
    } else if line.starts_with('"') {
        switch_header(line)
    } else {
        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() < MIN_DOWN_PORT_FIELDS {
            return Line::Unparseable("port line has no state");
        }
        let port = PortFields { fields };
        if port.state() != "down" && port.fields.len() < MIN_PORT_FIELDS {
            Line::Unparseable("too few fields in port line")
        } else {
            Line::PortLine(port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UP_LINE: &str = "  1          : 1   : ACT  : LINK UP    : 5   : 4x      : 50      : MLNX_RS_271_257_PLR : NO-RTR : 0xc42a10300dbfb92  : 40         : 25697 : \"MF0;dsm09-0101-0602-01ib0:MQM8700/U1\"";
    const DOWN_LINE: &str = "  7          : 7   : DOWN : POLLING    :     :         :         :                     :        :                    :            :       : ";

    fn port(line: &str) -> PortFields<'_> {
        match classify(line) {
            Line::PortLine(p) => p,
            other => panic!("expected a port line, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_and_comment() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   \t"), Line::Blank);
        assert_eq!(classify("# Running timestamp : 2022"), Line::Comment);
        assert_eq!(
            classify("  #          : IB# : Sta  : PhysSta"),
            Line::Comment
        );
    }

    #[test]
    fn test_switch_header() {
        let line = "\"MF0;DSM09-0101-0603-40IB1:MQM8700/U1\", Mellanox, 0x1070fd03001adeb4, LID 24328";
        assert_eq!(
            classify(line),
            Line::SwitchHeader(SwitchContext {
                name: "MF0;DSM09-0101-0603-40IB1:MQM8700/U1".to_string(),
                guid: "0x1070fd03001adeb4".to_string(),
            })
        );
    }

    #[test]
    fn test_short_switch_header() {
        assert!(matches!(
            classify("\"sw1\", Mellanox"),
            Line::Unparseable(_)
        ));
    }

    #[test]
    fn test_indented_quote_is_not_a_header() {
        assert!(matches!(classify("  \"sw1\", Mellanox, 0x1"), Line::Unparseable(_)));
    }

    #[test]
    fn test_up_port() {
        let record = port(UP_LINE).record(false);
        assert_eq!(record.port_number, "1");
        assert_eq!(record.state, "act");
        assert_eq!(record.peer_guid, "0xc42a10300dbfb92");
        assert_eq!(record.peer_port_number, "40");
        assert_eq!(record.peer_name, "MF0;dsm09-0101-0602-01ib0");
    }

    #[test]
    fn test_full_peer_name() {
        let record = port(UP_LINE).record(true);
        assert_eq!(record.peer_name, "MF0;dsm09-0101-0602-01ib0:MQM8700/U1");
        assert_eq!(record.peer_guid, "0xc42a10300dbfb92");
    }

    #[test]
    fn test_down_port() {
        let record = port(DOWN_LINE).record(false);
        assert_eq!(record.port_number, "7");
        assert!(record.is_down());
        assert!(record.peer_name.is_empty());
        assert!(record.peer_guid.is_empty());
        assert!(record.peer_port_number.is_empty());
    }

    #[test]
    fn test_short_down_port() {
        let record = port("  7 : 7 : DOWN : POLLING").record(false);
        assert_eq!(record.port_number, "7");
        assert!(record.is_down());
        assert!(record.peer_name.is_empty());

        let record = port("  8 : 8 : Down").record(true);
        assert_eq!(record.port_number, "8");
        assert!(record.is_down());
    }

    #[test]
    fn test_malformed_port_line() {
        assert!(matches!(
            classify("  1 : 1 : ACT : LINK UP"),
            Line::Unparseable(_)
        ));
        assert!(matches!(classify("  4 : 4 : ACT"), Line::Unparseable(_)));
        assert!(matches!(classify("  7 : 7"), Line::Unparseable(_)));
        assert!(matches!(classify("garbage"), Line::Unparseable(_)));
    }
}
