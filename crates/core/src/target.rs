use std::fmt;
use std::str::FromStr;

/// Host and port a connection attempt is aimed at.
///
/// The hostname is kept exactly as given. An empty or bogus hostname is not
/// rejected here; it fails later when the resolver cannot map it to an
/// address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionTarget {
    hostname: String,
    port: u16,
}

impl ConnectionTarget {
    /// Create a target for `hostname` on `port`.
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self {
            hostname: hostname.into(),
            port,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hostname, self.port)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetParseError {
    #[error("missing ':' separator")]
    MissingSeparator,

    #[error("invalid port number")]
    InvalidPortNumber(#[source] std::num::ParseIntError),
}

/// Parses `host:port`. The split happens on the last `:`.
impl FromStr for ConnectionTarget {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or(TargetParseError::MissingSeparator)?;
        let port = port.parse().map_err(TargetParseError::InvalidPortNumber)?;
        Ok(Self::new(host, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_and_port() {
        let target: ConnectionTarget = "localhost:9090".parse().unwrap();
        assert_eq!(target.hostname(), "localhost");
        assert_eq!(target.port(), 9090);
    }

    #[test]
    fn keeps_empty_host() {
        let target: ConnectionTarget = ":9090".parse().unwrap();
        assert_eq!(target, ConnectionTarget::new("", 9090));
    }

    #[test]
    fn rejects_missing_separator() {
        assert_eq!(
            "localhost".parse::<ConnectionTarget>(),
            Err(TargetParseError::MissingSeparator)
        );
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(matches!(
            "localhost:65536".parse::<ConnectionTarget>(),
            Err(TargetParseError::InvalidPortNumber(_))
        ));
        assert!(matches!(
            "localhost:".parse::<ConnectionTarget>(),
            Err(TargetParseError::InvalidPortNumber(_))
        ));
    }

    #[test]
    fn displays_as_host_colon_port() {
        let target = ConnectionTarget::new("example.com", 80);
        assert_eq!(target.to_string(), "example.com:80");
        assert_eq!(target.to_string().parse::<ConnectionTarget>(), Ok(target));
    }
}
