//! dispatch.rs
//! File-operation table and the host-kernel seam.

use alloc::sync::Arc;

use shared::{Errno, KResult};

use crate::uaccess::{UserSliceReader, UserSliceWriter};

/// Identity of one open file description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct File {
    pub id: u64,
    pub major: u32,
    pub minor: u32,
}

/// Callbacks a character device exposes (`struct file_operations`).
///
/// Slots a driver leaves alone fall back to the defaults below: `open` and
/// `release` succeed, `read` and `write` fail with `EINVAL`.
pub trait FileOperations: Send + Sync {
    fn open(&self, _file: &File) -> KResult<()> {
        Ok(())
    }

    fn read(
        &self,
        _file: &File,
        _buf: &mut dyn UserSliceWriter,
        _offset: &mut u64,
    ) -> KResult<usize> {
        Err(Errno::EINVAL)
    }

    fn write(
        &self,
        _file: &File,
        _buf: &mut dyn UserSliceReader,
        _offset: &mut u64,
    ) -> KResult<usize> {
        Err(Errno::EINVAL)
    }

    fn release(&self, _file: &File) -> KResult<()> {
        Ok(())
    }
}

/// Character-device registration as offered by the host kernel.
pub trait HostKernel {
    /// Register `fops` under `name`. `major == 0` asks for a dynamic major.
    ///
    /// Returns the major actually assigned.
    fn register_chrdev(
        &self,
        major: u32,
        name: &str,
        fops: Arc<dyn FileOperations>,
    ) -> KResult<u32>;

    fn unregister_chrdev(&self, major: u32, name: &str);
}

impl<T: HostKernel + ?Sized> HostKernel for Arc<T> {
    fn register_chrdev(
        &self,
        major: u32,
        name: &str,
        fops: Arc<dyn FileOperations>,
    ) -> KResult<u32> {
        (**self).register_chrdev(major, name, fops)
    }

    fn unregister_chrdev(&self, major: u32, name: &str) {
        (**self).unregister_chrdev(major, name)
    }
}
