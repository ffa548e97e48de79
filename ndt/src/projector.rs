// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2024 Oxide Computer Company

use std::io::Write;

use crate::errors::NdtResult;
use crate::store::LinkSet;
use crate::types::DisconnectedPort;
use crate::types::Link;

/// Column header of an NDT file.
pub const NDT_HEADER: &str = "rack #,U height,#Fields:StartDevice,StartPort,StartDeviceLocation,EndDevice,EndPort,EndDeviceLocation,U height_1,LinkType,Speed,_2,Cable Length,_3,_4,_5,_6,_7,State,Domain";

fn link_row(link: &Link) -> String {
    format!(
        ",,{},Port {},,{},Port {},,,,,,,,,,,,Active,In-Scope",
        link.start_device(),
        link.start_port(),
        link.end_device(),
        link.end_port()
    )
}

fn disconnected_row(port: &DisconnectedPort) -> String {
    format!(
        ",,{},Port {},,,,,,,,,,,,,,,Disabled,Disconnected",
        port.device, port.port_number
    )
}

/// Write an NDT table: the header, every link, then every disconnected port.
pub fn write_ndt<W: Write>(
    out: &mut W,
    links: &LinkSet,
    disconnected: &[DisconnectedPort],
) -> NdtResult<()> {
    writeln!(out, "{NDT_HEADER}")?;
    for link in links {
        writeln!(out, "{}", link_row(link))?;
    }
    for port in disconnected {
        writeln!(out, "{}", disconnected_row(port))?;
    }
    out.flush()?;
    Ok(())
}

/// Render an NDT table into a string.
pub fn render_ndt(links: &LinkSet, disconnected: &[DisconnectedPort]) -> String {
    let mut rval = String::from(NDT_HEADER);
    rval.push('\n');
    for link in links {
        rval.push_str(&link_row(link));
        rval.push('\n');
    }
    for port in disconnected {
        rval.push_str(&disconnected_row(port));
        rval.push('\n');
    }
    rval
}
