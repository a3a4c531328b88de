use std::time::Duration;

use chrono_tz::Tz;
use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::dazeus::Address;
use crate::fetch::DEFAULT_TIMEOUT;
use crate::supplier::SupplierKey;

/// DaZeus noms plugin: tells you what's for lunch on campus.
#[derive(Parser, Debug)]
#[command(name = "noms", version)]
pub struct Config {
    /// Address of the DaZeus instance to connect to. Use either `unix:/path/to/file` or `tcp:host:port`.
    #[arg(short, long, env = "DAZEUS_ADDRESS")]
    pub address: Address,

    /// Increase output verbosity, repeat for even more
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Timezone the opening hours are written in
    #[arg(long, env = "NOMS_TIMEZONE", default_value = "Europe/Amsterdam")]
    pub timezone: Tz,

    /// Seconds to wait for a menu page before giving up on it
    #[arg(
        long,
        env = "NOMS_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Suppliers that no longer serve food, e.g. `refter`
    #[arg(long, env = "NOMS_DECOMMISSIONED", value_delimiter = ',')]
    pub decommissioned: Vec<SupplierKey>,
}

impl Config {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `RUST_LOG` still wins; this only sets the default.
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["noms", "-a", "tcp:localhost:1234"]).unwrap();
        assert_eq!(config.address, Address::Tcp("localhost:1234".into()));
        assert_eq!(config.log_level(), LevelFilter::Info);
        assert_eq!(config.timezone, chrono_tz::Europe::Amsterdam);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.decommissioned.is_empty());
    }

    #[test]
    fn test_all_flags() {
        let config = Config::try_parse_from([
            "noms",
            "--address",
            "unix:/tmp/dazeus.sock",
            "-vv",
            "--timezone",
            "UTC",
            "--timeout-secs",
            "5",
            "--decommissioned",
            "refter,FNWI",
        ])
        .unwrap();
        assert_eq!(config.log_level(), LevelFilter::Trace);
        assert_eq!(config.timezone, chrono_tz::UTC);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(
            config.decommissioned,
            vec![SupplierKey::Refter, SupplierKey::Fnwi]
        );
    }

    #[test]
    fn test_rejects_unknown_supplier_and_bad_address() {
        assert!(Config::try_parse_from(["noms", "-a", "tcp:localhost:1", "--decommissioned", "mensa"]).is_err());
        assert!(Config::try_parse_from(["noms", "-a", "localhost"]).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(Config::try_parse_from(["noms", "-a", "tcp:localhost:1", "--timeout-secs", "0"]).is_err());
        let config =
            Config::try_parse_from(["noms", "-a", "tcp:localhost:1", "--timeout-secs", "1"]).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }
}
