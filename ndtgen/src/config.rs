// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2024 Oxide Computer Company

use std::str::FromStr;

use camino::Utf8PathBuf;
use common::LogFormat;
use ndt::ParseOptions;
use structopt::StructOpt;

/// Directory `ibdiagnet` is told to write into when we run it ourselves.
pub const DEFAULT_DISCOVERY_DIR: &str = "/tmp/ibdiagnet_out";
/// Where the generated NDT file lands unless told otherwise.
pub const DEFAULT_OUTPUT: &str = "/tmp/ibdiagnet_out/generated_ndt.csv";

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum YesNo {
    No,
    Yes,
}

impl FromStr for YesNo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no" => Ok(YesNo::No),
            "yes" => Ok(YesNo::Yes),
            _ => Err(format!("expected 'yes' or 'no', found '{s}'")),
        }
    }
}

impl From<YesNo> for bool {
    fn from(x: YesNo) -> bool {
        x == YesNo::Yes
    }
}

#[derive(Clone, Debug, StructOpt)]
#[structopt(
    name = "ndtgen",
    about = "Generate an NDT cabling file from an ibdiagnet net dump",
    version_short = "v"
)]
pub struct Opt {
    #[structopt(
        short = "i",
        long = "input_path",
        alias = "input-path",
        help = "Path to directory with ibdiagnet output. If not set, ibdiagnet is run."
    )]
    pub input_path: Option<Utf8PathBuf>,

    #[structopt(
        short = "d",
        long = "include_down_ports",
        alias = "include-down-ports",
        default_value = "no",
        possible_values = &["no", "yes"],
        help = "Include currently disconnected switch ports in the NDT file"
    )]
    pub include_down_ports: YesNo,

    #[structopt(
        short = "o",
        long,
        default_value = DEFAULT_OUTPUT,
        help = "Where to write the generated NDT file"
    )]
    pub output: Utf8PathBuf,

    #[structopt(
        long,
        default_value = DEFAULT_DISCOVERY_DIR,
        help = "Output directory handed to ibdiagnet"
    )]
    pub discovery_dir: Utf8PathBuf,

    #[structopt(
        long,
        help = "Report a cable seen from both of its ends only once"
    )]
    pub collapse_mirrored: bool,

    #[structopt(
        long,
        help = "Keep the whole peer description, including any ':' suffix"
    )]
    pub full_peer_names: bool,

    #[structopt(long, help = "log file")]
    pub log_file: Option<Utf8PathBuf>,

    #[structopt(
        long,
        short = "l",
        default_value = "human",
        help = "format logs for 'human' or 'json' consumption"
    )]
    pub log_format: LogFormat,
}

/// Everything a single NDT generation run needs to know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Directory holding an existing net dump.  When None, discovery is run.
    pub input_dir: Option<Utf8PathBuf>,
    pub output: Utf8PathBuf,
    pub parse: ParseOptions,
    pub collapse_mirrored: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: None,
            output: Utf8PathBuf::from(DEFAULT_OUTPUT),
            parse: ParseOptions::default(),
            collapse_mirrored: false,
        }
    }
}

impl From<&Opt> for Config {
    fn from(opt: &Opt) -> Self {
        Config {
            input_dir: opt.input_path.clone(),
            output: opt.output.clone(),
            parse: ParseOptions {
                include_down_ports: opt.include_down_ports.into(),
                full_peer_names: opt.full_peer_names,
                ..Default::default()
            },
            collapse_mirrored: opt.collapse_mirrored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(args: &[&str]) -> Opt {
        let mut argv = vec!["ndtgen"];
        argv.extend_from_slice(args);
        Opt::from_iter_safe(argv).unwrap()
    }

    #[test]
    fn test_yes_no() {
        assert_eq!("yes".parse::<YesNo>(), Ok(YesNo::Yes));
        assert_eq!("NO".parse::<YesNo>(), Ok(YesNo::No));
        assert!("maybe".parse::<YesNo>().is_err());
        assert!(bool::from(YesNo::Yes));
        assert!(!bool::from(YesNo::No));
    }

    #[test]
    fn test_defaults() {
        let opt = opt(&[]);
        assert_eq!(opt.discovery_dir, Utf8PathBuf::from(DEFAULT_DISCOVERY_DIR));
        assert_eq!(opt.output, Utf8PathBuf::from(DEFAULT_OUTPUT));
        assert!(!opt.full_peer_names);
        assert_eq!(opt.log_format, LogFormat::Human);
        assert_eq!(Config::from(&opt), Config::default());
    }

    #[test]
    fn test_input_and_down_ports() {
        let opt = opt(&["-i", "/var/tmp/ibdiag", "-d", "yes"]);
        let config = Config::from(&opt);
        assert_eq!(config.input_dir, Some(Utf8PathBuf::from("/var/tmp/ibdiag")));
        assert!(config.parse.include_down_ports);
        assert_eq!(config.parse.aggregation_marker, ndt::AGGREGATION_NODE_MARKER);
    }

    #[test]
    fn test_long_names() {
        let opt = opt(&[
            "--input_path",
            "/a",
            "--include_down_ports",
            "no",
            "--output",
            "/b/ndt.csv",
            "--collapse-mirrored",
        ]);
        let config = Config::from(&opt);
        assert_eq!(config.input_dir, Some(Utf8PathBuf::from("/a")));
        assert!(!config.parse.include_down_ports);
        assert_eq!(config.output, Utf8PathBuf::from("/b/ndt.csv"));
        assert!(config.collapse_mirrored);
    }

    #[test]
    fn test_full_peer_names() {
        let config = Config::from(&opt(&["--full-peer-names"]));
        assert!(config.parse.full_peer_names);
        assert!(!config.parse.include_down_ports);
    }

    #[test]
    fn test_rejects_bad_flag_value() {
        let argv = vec!["ndtgen", "-d", "maybe"];
        assert!(Opt::from_iter_safe(argv).is_err());
    }
}
