//! # Device Client Tests
//!
//! Runs `DeviceClient` against the in-process loopback driver and against
//! plain files, checking the echo protocol end to end:
//!
//! - write-then-read yields `<msg>(<n> letters)`
//! - a second read yields nothing
//! - driver errnos come back as raw OS errors

use std::io::{self, Cursor, Read, Write};

use agent::comms::{CommsError, DeviceClient, Loopback};

#[test]
fn loopback_echo_annotates_length() {
    let driver = Loopback::load().unwrap();
    let mut client = DeviceClient::new(driver.open().unwrap(), 256);

    assert_eq!(client.echo("hello").unwrap(), "hello(5 letters)");
    assert_eq!(client.echo("").unwrap(), "(0 letters)");
}

#[test]
fn loopback_second_receive_is_empty() {
    let driver = Loopback::load().unwrap();
    let mut client = DeviceClient::new(driver.open().unwrap(), 256);

    assert_eq!(client.send(b"once").unwrap(), 4);
    assert_eq!(client.receive().unwrap(), b"once(4 letters)");
    assert!(client.receive().unwrap().is_empty());
}

#[test]
fn loopback_files_share_the_device() {
    let driver = Loopback::load().unwrap();
    let mut writer = DeviceClient::new(driver.open().unwrap(), 256);
    let mut reader = DeviceClient::new(driver.open().unwrap(), 256);

    writer.send("über".as_bytes()).unwrap();
    assert_eq!(reader.receive().unwrap(), "über(5 letters)".as_bytes());
}

#[test]
fn small_read_buffer_truncates_reply() {
    let driver = Loopback::load().unwrap();
    let mut client = DeviceClient::new(driver.open().unwrap(), 4);
    assert_eq!(client.echo("abcdef").unwrap(), "abcd");
    assert_eq!(client.echo("x").unwrap(), "x(1 ");
}

#[test]
fn separate_loopbacks_are_independent() {
    let a = Loopback::load().unwrap();
    let b = Loopback::load().unwrap();
    assert_eq!(a.major(), b.major());

    let mut ca = DeviceClient::new(a.open().unwrap(), 256);
    let mut cb = DeviceClient::new(b.open().unwrap(), 256);
    ca.send(b"a").unwrap();
    assert!(cb.receive().unwrap().is_empty());
}

/// Device whose reads fail like a driver returning -EFAULT.
struct Faulting;

impl Read for Faulting {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::from_raw_os_error(14))
    }
}

impl Write for Faulting {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len() / 2)
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn read_errors_keep_their_os_code() {
    let mut client = DeviceClient::new(Faulting, 16);
    match client.receive() {
        Err(CommsError::Read(e)) => assert_eq!(e.raw_os_error(), Some(14)),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn short_write_is_reported() {
    let mut client = DeviceClient::new(Faulting, 16);
    assert!(matches!(
        client.send(b"four"),
        Err(CommsError::ShortWrite { expected: 4, written: 2 })
    ));
}

#[test]
fn plain_stream_round_trip() {
    // A file-like stream that is not the driver just hands back what it holds.
    let mut client = DeviceClient::new(Cursor::new(Vec::new()), 32);
    client.send(b"raw").unwrap();
    let inner = client.into_inner();
    assert_eq!(inner.into_inner(), b"raw");
}

#[test]
fn opening_missing_node_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("echodev");
    match DeviceClient::open(&path, 256) {
        Err(CommsError::Open { path: p, .. }) => assert_eq!(p, path),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("missing node opened"),
    }
}
