use clap::Parser;
use std::{path::PathBuf, time::Duration};

/// A terminal front end for lexsearch accounts and search history
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// The lexsearch site to talk to
    #[clap(long, env = "LEXSEARCH_SERVER", default_value = "http://127.0.0.1:5000")]
    pub server: String,

    /// Give up on a request after this many seconds
    #[clap(long, env = "LEXSEARCH_TIMEOUT", default_value = "10", value_parser = duration_parser)]
    pub timeout: Duration,

    /// Where should we write logs?
    #[clap(long)]
    data_dir: Option<PathBuf>,

    /// Which logs to keep, in `RUST_LOG` syntax
    #[clap(long, env = "LEXSEARCH_LOG", default_value = "info")]
    pub log_filter: String,
}

/// Parse a number of seconds.
fn duration_parser(s: &str) -> Result<Duration, std::num::ParseIntError> {
    s.parse().map(Duration::from_secs)
}

impl Config {
    /// Get either the configured or a default data directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("org", "lexsearch", "lexsearch")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::parse_from(["lexsearch"]);

        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn timeout_is_in_seconds() {
        let config = Config::parse_from(["lexsearch", "--timeout", "3"]);

        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn explicit_data_dir_wins() {
        let config = Config::parse_from(["lexsearch", "--data-dir", "/tmp/lexsearch"]);

        assert_eq!(config.data_dir(), PathBuf::from("/tmp/lexsearch"));
    }
}
