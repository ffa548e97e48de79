// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2024 Oxide Computer Company

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

/// The switch whose ports are currently being enumerated in the dump.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwitchContext {
    pub name: String,
    pub guid: String,
}

/// One port line, as read under the current switch context.  Peer fields are
/// only meaningful for ports that are not down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortRecord {
    pub port_number: String,
    /// Link state, lower-cased.
    pub state: String,
    pub peer_name: String,
    pub peer_guid: String,
    pub peer_port_number: String,
}

impl PortRecord {
    pub fn is_down(&self) -> bool {
        self.state == "down"
    }
}

/// Case-insensitive identity of a link.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct LinkKey(String);

impl LinkKey {
    /// Normalize the four endpoint fields into a single identity.  Each field
    /// is upper-cased and the results are concatenated in endpoint order.
    pub fn normalize(
        start_device: &str,
        start_port: &str,
        end_device: &str,
        end_port: &str,
    ) -> Self {
        let mut key = String::with_capacity(
            start_device.len()
                + start_port.len()
                + end_device.len()
                + end_port.len(),
        );
        for field in [start_device, start_port, end_device, end_port] {
            key.push_str(&field.to_uppercase());
        }
        LinkKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed cable between two device ports, as reported by the device that
/// owns the start port.
#[derive(Clone, Debug)]
pub struct Link {
    start_device: String,
    start_port: String,
    end_device: String,
    end_port: String,
    key: LinkKey,
}

impl Link {
    pub fn new(
        start_device: impl ToString,
        start_port: impl ToString,
        end_device: impl ToString,
        end_port: impl ToString,
    ) -> Self {
        let start_device = start_device.to_string();
        let start_port = start_port.to_string();
        let end_device = end_device.to_string();
        let end_port = end_port.to_string();
        let key =
            LinkKey::normalize(&start_device, &start_port, &end_device, &end_port);
        Link {
            start_device,
            start_port,
            end_device,
            end_port,
            key,
        }
    }

    pub fn start_device(&self) -> &str {
        &self.start_device
    }

    pub fn start_port(&self) -> &str {
        &self.start_port
    }

    pub fn end_device(&self) -> &str {
        &self.end_device
    }

    pub fn end_port(&self) -> &str {
        &self.end_port
    }

    pub fn key(&self) -> &LinkKey {
        &self.key
    }

    /// The same cable as the peer would report it.
    pub fn reversed(&self) -> Link {
        Link::new(
            &self.end_device,
            &self.end_port,
            &self.start_device,
            &self.start_port,
        )
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Link {}

impl Hash for Link {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state)
    }
}

impl PartialOrd for Link {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Link {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}/{} - {}/{}",
            self.start_device, self.start_port, self.end_device, self.end_port
        )
    }
}

/// A switch port with no active peer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisconnectedPort {
    pub device: String,
    pub port_number: String,
}
