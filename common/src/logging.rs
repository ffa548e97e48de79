use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;
use slog::{o, Drain};

/// How log records are rendered: plain text for people, bunyan JSON for
/// machines.
#[derive(Debug, Default, Eq, PartialEq, Clone, Copy)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "h" | "human" => Ok(LogFormat::Human),
            "j" | "json" => Ok(LogFormat::Json),
            _ => Err("invalid log format".to_string()),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogFormat::Human => write!(f, "human"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Build the root logger.  Without a log file, records go to stderr so that
/// they never interleave with anything the tool prints on stdout.
pub fn init(
    name: &'static str,
    log_file: Option<&Utf8Path>,
    log_format: LogFormat,
) -> anyhow::Result<slog::Logger> {
    let drain = match log_file {
        Some(log_file) => {
            let log_file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;
            match log_format {
                LogFormat::Json => {
                    let drain =
                        slog_bunyan::with_name(name, log_file).build().fuse();
                    slog_async::Async::new(drain).build().fuse()
                }
                LogFormat::Human => {
                    let decorator = slog_term::PlainDecorator::new(log_file);
                    let drain =
                        slog_term::FullFormat::new(decorator).build().fuse();
                    slog_async::Async::new(drain).build().fuse()
                }
            }
        }
        None => match log_format {
            LogFormat::Json => {
                let drain = slog_bunyan::with_name(name, std::io::stderr())
                    .build()
                    .fuse();
                slog_async::Async::new(drain)
                    .chan_size(32768)
                    .build()
                    .fuse()
            }
            LogFormat::Human => {
                let decorator = slog_term::TermDecorator::new().stderr().build();
                let drain =
                    slog_term::FullFormat::new(decorator).build().fuse();
                slog_async::Async::new(drain)
                    .chan_size(32768)
                    .build()
                    .fuse()
            }
        },
    };
    Ok(slog::Logger::root(drain, o!()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("h".parse::<LogFormat>(), Ok(LogFormat::Human));
        assert_eq!("Human".parse::<LogFormat>(), Ok(LogFormat::Human));
        assert_eq!("j".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_format_round_trip() {
        for f in [LogFormat::Human, LogFormat::Json] {
            assert_eq!(f.to_string().parse::<LogFormat>(), Ok(f));
        }
    }

    #[test]
    fn test_init_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(dir.path()).unwrap().join("ndt.log");
        {
            let log = init("test", Some(path.as_path()), LogFormat::Json).unwrap();
            slog::info!(log, "hello"; "unit" => "test");
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("hello"));
    }
}
