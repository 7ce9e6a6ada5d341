#![cfg(target_os = "linux")]

use std::net::TcpListener;

use serial_test::serial;
use tcpdial_core::{ConnectionTarget, ErrorKind, NetworkSubsystem, connect};

fn open_descriptors() -> usize {
    std::fs::read_dir("/proc/self/fd").unwrap().count()
}

#[test]
#[serial]
fn resolution_failure_releases_socket() {
    let net = NetworkSubsystem::init().unwrap();
    let target = ConnectionTarget::new("", 9090);
    // Let the resolver open whatever it keeps around before counting.
    let _ = connect(&net, target.clone());

    let before = open_descriptors();
    for _ in 0..10 {
        let err = connect(&net, target.clone()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
    }
    assert_eq!(open_descriptors(), before);
}

#[test]
#[serial]
fn connect_failure_releases_socket() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let net = NetworkSubsystem::init().unwrap();
    let target = ConnectionTarget::new("127.0.0.1", port);

    let before = open_descriptors();
    for _ in 0..10 {
        let err = connect(&net, target.clone()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConnectFailure);
    }
    assert_eq!(open_descriptors(), before);
}

#[test]
#[serial]
fn success_hands_over_exactly_one_descriptor() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let net = NetworkSubsystem::init().unwrap();

    let before = open_descriptors();
    let handle = connect(&net, ConnectionTarget::new("127.0.0.1", port)).unwrap();
    assert_eq!(open_descriptors(), before + 1);

    handle.close();
    assert_eq!(open_descriptors(), before);
}
