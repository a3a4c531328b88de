use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Error;

/// Where the DaZeus core listens: `unix:/path/to/socket` or `tcp:host:port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Unix(PathBuf),
    Tcp(String),
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("unix", path)) if !path.is_empty() => Ok(Self::Unix(PathBuf::from(path))),
            Some(("tcp", host_port)) if host_port.rsplit_once(':').is_some_and(|(h, p)| {
                !h.is_empty() && p.parse::<u16>().is_ok()
            }) =>
            {
                Ok(Self::Tcp(host_port.to_owned()))
            }
            _ => Err(Error::Address(s.to_owned())),
        }
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix(path) => write!(f, "unix:{}", path.display()),
            Self::Tcp(host_port) => write!(f, "tcp:{host_port}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addresses() {
        assert_eq!(
            "unix:/var/run/dazeus.sock".parse::<Address>().unwrap(),
            Address::Unix("/var/run/dazeus.sock".into())
        );
        assert_eq!(
            "tcp:localhost:1234".parse::<Address>().unwrap(),
            Address::Tcp("localhost:1234".into())
        );
        assert_eq!(
            "tcp:localhost:1234".parse::<Address>().unwrap().to_string(),
            "tcp:localhost:1234"
        );
    }

    #[test]
    fn test_reject_bad_addresses() {
        for bad in ["", "unix:", "tcp:localhost", "tcp::80", "tcp:host:port", "udp:host:1", "/tmp/sock"] {
            assert!(matches!(bad.parse::<Address>(), Err(Error::Address(_))), "{bad}");
        }
    }
}
