//! In-process echo driver.
//!
//! Loads the driver into a private `ChrdevTable` and exposes an open file as
//! `Read + Write`, so `DeviceClient` works without `/dev/echodev`.

use echodev_driver::{ChrdevTable, EchoModule, OpenFile, SliceReader, SliceWriter};
use log::info;
use shared::constants::DEVICE_PATH;
use std::{
    io::{self, Read, Write},
    path::PathBuf,
    sync::Arc,
};

use super::device::{CommsError, DeviceClient};

pub struct Loopback {
    table: Arc<ChrdevTable>,
    module: EchoModule<Arc<ChrdevTable>>,
}

impl Loopback {
    /// Run the driver's load hook against a fresh table.
    pub fn load() -> Result<Self, CommsError> {
        let table = Arc::new(ChrdevTable::new());
        let module = EchoModule::init(table.clone())?;
        info!("Loopback driver loaded with major {}", module.major());
        Ok(Self { table, module })
    }

    /// Load the driver, hand `f` a client on one open file, then close the
    /// file and unload the driver, in that order.
    pub fn session<T, E: From<CommsError>>(
        read_buffer: usize,
        f: impl FnOnce(&mut DeviceClient<LoopbackFile>) -> Result<T, E>,
    ) -> Result<T, E> {
        let out = {
            let driver = Loopback::load()?;
            let mut client = DeviceClient::new(driver.open()?, read_buffer);
            f(&mut client)
        };
        info!("Loopback driver unloaded");
        out
    }

    pub fn major(&self) -> u32 {
        self.module.major()
    }

    pub fn open(&self) -> Result<LoopbackFile, CommsError> {
        let file = self
            .table
            .open(self.major(), 0)
            .map_err(|e| CommsError::Open { path: PathBuf::from(DEVICE_PATH), source: e.into() })?;
        Ok(LoopbackFile { file })
    }
}

/// An open file on the loopback driver. Driver errnos surface as raw OS
/// errors.
pub struct LoopbackFile {
    file: OpenFile,
}

impl Read for LoopbackFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.file.read(&mut SliceWriter::new(buf))?)
    }
}

impl Write for LoopbackFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.file.write(&mut SliceReader::new(buf))?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
