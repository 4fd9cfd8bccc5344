//! Talking to the echo device: through its device node, or through an
//! in-process copy of the driver.

pub mod device;
pub mod loopback;

pub use device::{CommsError, DeviceClient};
pub use loopback::{Loopback, LoopbackFile};
