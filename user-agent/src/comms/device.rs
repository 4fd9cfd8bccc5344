//! Communication interface with the echo driver.
//!
//! Wraps the device node in a small client that speaks the driver's
//! protocol: one `write(2)` stores a message, one `read(2)` fetches it back
//! annotated with its length, after which the device is empty again.
//!
//! Key responsibilities:
//! - Open a read/write handle to the device node.
//! - Issue single write/read calls and check what the driver reports.
//! - Map I/O failures (including driver errnos) onto `CommsError`.

use log::{debug, info};
use shared::Errno;
use std::{
    fs::{File, OpenOptions},
    io::{self, ErrorKind, Read, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommsError {
    #[error("cannot open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write to device failed: {0}")]
    Write(#[source] io::Error),

    #[error("read from device failed: {0}")]
    Read(#[source] io::Error),

    #[error("device accepted {written} of {expected} bytes")]
    ShortWrite { expected: usize, written: usize },

    #[error("driver load failed: {0}")]
    Load(#[from] Errno),
}

/// Client over anything that behaves like the device node.
pub struct DeviceClient<D> {
    dev: D,
    read_buffer: usize,
}

impl DeviceClient<File> {
    /// Open the device node for reading and writing.
    pub fn open(path: &Path, read_buffer: usize) -> Result<Self, CommsError> {
        let dev = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| CommsError::Open { path: path.to_path_buf(), source })?;
        info!("Opened {}", path.display());
        Ok(Self::new(dev, read_buffer))
    }
}

impl<D: Read + Write> DeviceClient<D> {
    pub fn new(dev: D, read_buffer: usize) -> Self {
        Self { dev, read_buffer }
    }

    /// Store `msg` in the device with a single write.
    ///
    /// The driver always consumes the whole buffer; anything less is
    /// reported as `ShortWrite`.
    pub fn send(&mut self, msg: &[u8]) -> Result<usize, CommsError> {
        let written = loop {
            match self.dev.write(msg) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(CommsError::Write(e)),
            }
        };
        if written != msg.len() {
            return Err(CommsError::ShortWrite { expected: msg.len(), written });
        }
        debug!("Sent {} bytes", written);
        Ok(written)
    }

    /// Fetch the pending message with a single read. Empty when nothing
    /// was written since the last read.
    pub fn receive(&mut self) -> Result<Vec<u8>, CommsError> {
        let mut buf = vec![0u8; self.read_buffer];
        let n = loop {
            match self.dev.read(&mut buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(CommsError::Read(e)),
            }
        };
        buf.truncate(n);
        debug!("Received {} bytes", n);
        Ok(buf)
    }

    /// Write `msg` and read back its annotated echo.
    pub fn echo(&mut self, msg: &str) -> Result<String, CommsError> {
        self.send(msg.as_bytes())?;
        let reply = self.receive()?;
        Ok(String::from_utf8_lossy(&reply).into_owned())
    }

    pub fn into_inner(self) -> D {
        self.dev
    }
}
