//! Echo character device.
//!
//! `/dev/echodev` keeps the last string written to it, annotated with the
//! number of bytes written, and hands it back exactly once on the next read.
//!
//! The crate is `no_std` + `alloc`. The host kernel is reached through the
//! [`HostKernel`] trait; [`ChrdevTable`] is an in-crate implementation that
//! models the kernel's character-device major table.

#![no_std]

extern crate alloc;

pub mod chrdev;
pub mod device;
pub mod dispatch;
pub mod module;
pub mod uaccess;

pub use chrdev::{ChrdevTable, OpenFile};
pub use device::{EchoDevice, Message};
pub use dispatch::{File, FileOperations, HostKernel};
pub use module::{EchoModule, ModuleInfo, Registration, MODULE_INFO};
pub use shared::{Errno, KResult};
pub use uaccess::{SliceReader, SliceWriter, UserSliceReader, UserSliceWriter};
