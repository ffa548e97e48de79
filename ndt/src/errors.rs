// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2024 Oxide Computer Company

use std::convert;

use camino::Utf8PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum NdtError {
    /// The net dump file is missing or could not be read.
    #[error("net dump {path} is unavailable: {source}")]
    InputUnavailable {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    /// The external discovery tool could not be run, or exited with a
    /// failure status.
    #[error("discovery failed: {0}")]
    DiscoveryFailure(String),
    #[error("I/O error: {0:?}")]
    Io(std::io::Error),
    #[error("error: {0}")]
    Other(String),
}

impl NdtError {
    pub fn unavailable(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        NdtError::InputUnavailable {
            path: path.into(),
            source,
        }
    }
}

impl convert::From<std::io::Error> for NdtError {
    fn from(err: std::io::Error) -> Self {
        NdtError::Io(err)
    }
}

impl convert::From<String> for NdtError {
    fn from(err: String) -> Self {
        NdtError::Other(err)
    }
}

impl convert::From<&str> for NdtError {
    fn from(err: &str) -> Self {
        NdtError::Other(err.to_string())
    }
}

impl convert::From<anyhow::Error> for NdtError {
    fn from(err: anyhow::Error) -> Self {
        NdtError::Other(err.to_string())
    }
}

pub type NdtResult<T> = Result<T, NdtError>;
