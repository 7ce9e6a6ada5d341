use std::io;
use std::net::SocketAddrV4;

use crate::ConnectionTarget;

/// Result alias using `ConnectError`.
pub type Result<T> = std::result::Result<T, ConnectError>;

/// Why a connection attempt failed.
///
/// Every variant keeps the OS error that caused it. By the time one of these
/// reaches the caller, any socket allocated for the attempt has already been
/// closed.
#[derive(thiserror::Error, Debug)]
pub enum ConnectError {
    #[error("could not allocate a socket for {target}")]
    SocketAllocation {
        target: ConnectionTarget,
        #[source]
        source: io::Error,
    },

    #[error("could not resolve {target} to an IPv4 address")]
    Resolution {
        target: ConnectionTarget,
        #[source]
        source: io::Error,
    },

    #[error("connect to {target} ({addr}) failed")]
    ConnectFailure {
        target: ConnectionTarget,
        addr: SocketAddrV4,
        #[source]
        source: io::Error,
    },
}

/// Discriminant of [`ConnectError`], handy for matching and comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SocketAllocation,
    Resolution,
    ConnectFailure,
}

impl ConnectError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConnectError::SocketAllocation { .. } => ErrorKind::SocketAllocation,
            ConnectError::Resolution { .. } => ErrorKind::Resolution,
            ConnectError::ConnectFailure { .. } => ErrorKind::ConnectFailure,
        }
    }

    /// The target of the failed attempt.
    pub fn target(&self) -> &ConnectionTarget {
        match self {
            ConnectError::SocketAllocation { target, .. }
            | ConnectError::Resolution { target, .. }
            | ConnectError::ConnectFailure { target, .. } => target,
        }
    }

    /// The underlying I/O error.
    pub fn io_error(&self) -> &io::Error {
        match self {
            ConnectError::SocketAllocation { source, .. }
            | ConnectError::Resolution { source, .. }
            | ConnectError::ConnectFailure { source, .. } => source,
        }
    }

    /// Raw OS error code, when the failure came straight from a system call.
    pub fn raw_os_error(&self) -> Option<i32> {
        self.io_error().raw_os_error()
    }
}
