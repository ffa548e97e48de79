// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2024 Oxide Computer Company

use std::process::Command;

use camino::Utf8Path;
use camino::Utf8PathBuf;
use ndt::NdtError;
use ndt::NdtResult;
use slog::debug;
use slog::info;

use crate::config::DEFAULT_DISCOVERY_DIR;

/// Something that can produce a fresh net dump on demand.
pub trait Discovery {
    /// Run discovery to completion and return the path of the dump it wrote.
    fn run(&self, log: &slog::Logger) -> NdtResult<Utf8PathBuf>;
}

/// Fabric discovery with the `ibdiagnet` utility.
#[derive(Clone, Debug)]
pub struct IbDiagNet {
    pub command: String,
    pub out_dir: Utf8PathBuf,
}

impl Default for IbDiagNet {
    fn default() -> Self {
        IbDiagNet::new(DEFAULT_DISCOVERY_DIR)
    }
}

impl IbDiagNet {
    const COMMAND: &'static str = "ibdiagnet";

    pub fn new(out_dir: impl AsRef<Utf8Path>) -> Self {
        IbDiagNet {
            command: IbDiagNet::COMMAND.to_string(),
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    pub fn args(&self) -> Vec<String> {
        vec![
            "-o".to_string(),
            self.out_dir.to_string(),
            "--discovery_only".to_string(),
            "--enable_output".to_string(),
            "net_dump".to_string(),
        ]
    }

    fn command_line(&self) -> String {
        format!("{} {}", self.command, self.args().join(" "))
    }
}

impl Discovery for IbDiagNet {
    fn run(&self, log: &slog::Logger) -> NdtResult<Utf8PathBuf> {
        let cmd = self.command_line();
        info!(log, "executing command {cmd}"; "unit" => "discovery");

        let out = Command::new(&self.command)
            .args(self.args())
            .output()
            .map_err(|e| {
                NdtError::DiscoveryFailure(format!("failed to run {cmd}: {e}"))
            })?;
        if !out.status.success() {
            return Err(NdtError::DiscoveryFailure(format!(
                "{cmd} failed with {}: {}",
                out.status,
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        debug!(log, "{}", String::from_utf8_lossy(&out.stdout).trim();
            "unit" => "discovery");

        Ok(self.out_dir.join(ndt::NET_DUMP_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let d = IbDiagNet::default();
        assert_eq!(
            d.command_line(),
            "ibdiagnet -o /tmp/ibdiagnet_out --discovery_only --enable_output net_dump"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_success_returns_dump_path() {
        let d = IbDiagNet {
            command: "true".to_string(),
            out_dir: Utf8PathBuf::from("/var/tmp/ibdiag"),
        };
        let path = d.run(&common::null_logger()).unwrap();
        assert_eq!(path, Utf8PathBuf::from("/var/tmp/ibdiag/ibdiagnet2.net_dump"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let d = IbDiagNet {
            command: "false".to_string(),
            out_dir: Utf8PathBuf::from("/var/tmp/ibdiag"),
        };
        let err = d.run(&common::null_logger()).unwrap_err();
        assert!(matches!(err, NdtError::DiscoveryFailure(_)));
    }

    #[test]
    fn test_missing_binary_is_failure() {
        let d = IbDiagNet {
            command: "/nonexistent/ibdiagnet".to_string(),
            out_dir: Utf8PathBuf::from("/var/tmp/ibdiag"),
        };
        let err = d.run(&common::null_logger()).unwrap_err();
        assert!(matches!(err, NdtError::DiscoveryFailure(_)));
    }
}
