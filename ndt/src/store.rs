// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2024 Oxide Computer Company

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::types::Link;
use crate::types::LinkKey;

/// The set of accepted links, keyed by their case-insensitive identity.  The
/// first spelling of a link to be inserted is the one that is kept.
#[derive(Clone, Debug, Default)]
pub struct LinkSet {
    links: BTreeMap<LinkKey, Link>,
}

impl LinkSet {
    pub fn new() -> Self {
        LinkSet::default()
    }

    /// Add a link.  Returns false if a link with the same identity was
    /// already present, in which case the set is unchanged.
    pub fn insert(&mut self, link: Link) -> bool {
        match self.links.entry(link.key().clone()) {
            Entry::Vacant(e) => {
                e.insert(link);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn contains(&self, link: &Link) -> bool {
        self.links.contains_key(link.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Drop the second report of every cable that both of its endpoints
    /// reported.  Of the two directions, the one whose identity sorts first is
    /// kept.
    pub fn collapse_mirrored(&self) -> LinkSet {
        let mut collapsed = LinkSet::new();
        for link in self.iter() {
            if !collapsed.contains(&link.reversed()) {
                collapsed.insert(link.clone());
            }
        }
        collapsed
    }
}

impl FromIterator<Link> for LinkSet {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        let mut set = LinkSet::new();
        for link in iter {
            set.insert(link);
        }
        set
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a Link;
    type IntoIter = std::collections::btree_map::Values<'a, LinkKey, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.values()
    }
}
