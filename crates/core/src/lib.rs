//! Blocking TCP/IPv4 connection establishment.

pub mod connector;
pub mod error;
pub mod handle;
pub mod subsystem;
pub mod target;

pub use connector::{Connector, connect};
pub use error::{ConnectError, ErrorKind, Result};
pub use handle::SocketHandle;
pub use subsystem::{NetworkSubsystem, SubsystemError};
pub use target::{ConnectionTarget, TargetParseError};
