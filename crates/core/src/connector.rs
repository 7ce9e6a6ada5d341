use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpStream, ToSocketAddrs};

use socket2::{Domain, Protocol, SockAddr, Socket, Type};

use crate::{ConnectError, ConnectionTarget, NetworkSubsystem, Result, SocketHandle};

/// Opens TCP/IPv4 connections while the network subsystem is up.
///
/// Each call is a single blocking attempt: allocate a socket, resolve the
/// host, connect to the first IPv4 address. There is no retry and no timeout
/// beyond whatever the OS applies to the handshake.
#[derive(Debug, Clone, Copy)]
pub struct Connector<'net> {
    _net: &'net NetworkSubsystem,
}

impl<'net> Connector<'net> {
    pub fn new(net: &'net NetworkSubsystem) -> Self {
        Self { _net: net }
    }

    /// Connect to `target`.
    ///
    /// On error the socket allocated for this attempt has been closed before
    /// the error is returned.
    pub fn connect(&self, target: ConnectionTarget) -> Result<SocketHandle> {
        let socket = match Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP)) {
            Ok(socket) => socket,
            Err(source) => {
                tracing::warn!(target_addr = %target, error = %source, "socket allocation failed");
                return Err(ConnectError::SocketAllocation { target, source });
            }
        };
        tracing::debug!(target_addr = %target, "socket allocated");

        let ip = match resolve_first_v4(target.hostname()) {
            Ok(ip) => ip,
            Err(source) => {
                drop(socket);
                tracing::warn!(target_addr = %target, error = %source, "resolution failed");
                return Err(ConnectError::Resolution { target, source });
            }
        };
        let addr = SocketAddrV4::new(ip, target.port());
        tracing::debug!(target_addr = %target, %addr, "resolved");

        if let Err(source) = socket.connect(&destination(addr)) {
            drop(socket);
            tracing::warn!(target_addr = %target, %addr, error = %source, "connect failed");
            return Err(ConnectError::ConnectFailure {
                target,
                addr,
                source,
            });
        }
        tracing::debug!(target_addr = %target, %addr, "connected");

        Ok(SocketHandle::new(TcpStream::from(socket), target))
    }
}

/// Connect to `target` within the scope of `net`.
pub fn connect(net: &NetworkSubsystem, target: ConnectionTarget) -> Result<SocketHandle> {
    net.connector().connect(target)
}

/// Resolve `hostname` and return the first IPv4 address in resolver order.
fn resolve_first_v4(hostname: &str) -> io::Result<Ipv4Addr> {
    first_v4((hostname, 0).to_socket_addrs()?).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no IPv4 address for {hostname:?}"),
        )
    })
}

/// First IPv4 entry of `addrs`. IPv6 entries are skipped.
fn first_v4(mut addrs: impl Iterator<Item = SocketAddr>) -> Option<Ipv4Addr> {
    addrs.find_map(|addr| match addr {
        SocketAddr::V4(v4) => Some(*v4.ip()),
        SocketAddr::V6(_) => None,
    })
}

/// `sockaddr_in` for `addr`. socket2 zero-fills the record and stores the
/// port in network byte order.
fn destination(addr: SocketAddrV4) -> SockAddr {
    SockAddr::from(addr)
}
