use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
#[cfg(unix)]
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, RawFd};
#[cfg(windows)]
use std::os::windows::io::{AsSocket, BorrowedSocket};

use crate::ConnectionTarget;

/// A connected TCP socket owned by the caller.
///
/// Only [`Connector::connect`](crate::Connector::connect) creates these, and
/// only after the handshake succeeded. The descriptor is released when the
/// handle is dropped or passed to [`SocketHandle::close`].
#[derive(Debug)]
pub struct SocketHandle {
    stream: TcpStream,
    target: ConnectionTarget,
}

impl SocketHandle {
    pub(crate) fn new(stream: TcpStream, target: ConnectionTarget) -> Self {
        Self { stream, target }
    }

    /// The target this handle was connected to.
    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        self.stream.peer_addr()
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.stream.local_addr()
    }

    /// Hand the connection over as a plain [`TcpStream`].
    pub fn into_std(self) -> TcpStream {
        self.stream
    }

    /// Shut the connection down in both directions and release the descriptor.
    pub fn close(self) {
        if let Err(error) = self.stream.shutdown(Shutdown::Both) {
            tracing::debug!(target_addr = %self.target, %error, "shutdown failed");
        }
        tracing::debug!(target_addr = %self.target, "socket released");
    }
}

impl Read for SocketHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Write for SocketHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

#[cfg(unix)]
impl AsFd for SocketHandle {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.stream.as_fd()
    }
}

#[cfg(unix)]
impl AsRawFd for SocketHandle {
    fn as_raw_fd(&self) -> RawFd {
        self.stream.as_raw_fd()
    }
}

#[cfg(windows)]
impl AsSocket for SocketHandle {
    fn as_socket(&self) -> BorrowedSocket<'_> {
        self.stream.as_socket()
    }
}
