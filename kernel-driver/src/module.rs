//! Module load / unload.
//!
//! [`EchoModule::init`] is the load hook: it registers the echo device under
//! [`DEVICE_NAME`] with a dynamic major. Dropping the module (or calling
//! [`EchoModule::exit`]) is the unload hook and frees the major again.

use alloc::sync::Arc;

use log::{error, info};
use shared::constants::DEVICE_NAME;
use shared::KResult;

use crate::device::EchoDevice;
use crate::dispatch::{FileOperations, HostKernel};

/// Static module metadata (`MODULE_LICENSE`, `MODULE_AUTHOR`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleInfo {
    pub name: &'static str,
    pub license: &'static str,
    pub author: &'static str,
    pub description: &'static str,
    pub version: &'static str,
}

pub const MODULE_INFO: ModuleInfo = ModuleInfo {
    name: DEVICE_NAME,
    license: "GPL",
    author: "Anon",
    description: "Simple echo character device",
    version: "0.1",
};

/*──────────────────────────── registration ──────────────────────────────*/

/// A registered major. Unregisters on drop.
pub struct Registration<H: HostKernel> {
    host: H,
    major: u32,
    name: &'static str,
}

impl<H: HostKernel> Registration<H> {
    /// Register `fops` under `name`, asking for a dynamic major.
    pub fn new(host: H, name: &'static str, fops: Arc<dyn FileOperations>) -> KResult<Self> {
        let major = host.register_chrdev(0, name, fops)?;
        Ok(Self { host, major, name })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<H: HostKernel> Drop for Registration<H> {
    fn drop(&mut self) {
        self.host.unregister_chrdev(self.major, self.name);
    }
}

/*──────────────────────────── module ────────────────────────────────────*/

/// The loaded driver: the device plus its registration.
pub struct EchoModule<H: HostKernel> {
    device: Arc<EchoDevice>,
    registration: Registration<H>,
}

impl<H: HostKernel> EchoModule<H> {
    /// Load hook.
    pub fn init(host: H) -> KResult<Self> {
        info!("registering character device {}", DEVICE_NAME);

        let device = Arc::new(EchoDevice::new());
        let registration = match Registration::new(host, DEVICE_NAME, device.clone()) {
            Ok(r) => r,
            Err(e) => {
                error!("{} failed to register a major number: {}", DEVICE_NAME, e);
                return Err(e);
            }
        };

        info!("{} registered with major number {}", DEVICE_NAME, registration.major());
        Ok(Self { device, registration })
    }

    pub fn major(&self) -> u32 {
        self.registration.major()
    }

    pub fn device(&self) -> &Arc<EchoDevice> {
        &self.device
    }

    pub fn info(&self) -> &'static ModuleInfo {
        &MODULE_INFO
    }

    /// Unload hook.
    pub fn exit(self) {
        drop(self);
    }
}

impl<H: HostKernel> Drop for EchoModule<H> {
    fn drop(&mut self) {
        info!("removing module {} (major {})", DEVICE_NAME, self.major());
    }
}
