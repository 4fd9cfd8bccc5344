/// Name the driver registers under; also the node name below `/dev`.
pub const DEVICE_NAME: &str = "echodev";
pub const DEVICE_PATH: &str = "/dev/echodev";

/// Capacity of the device's message buffer, annotation included.
pub const MSG_CAPACITY: usize = 256;

/// Text appended to every echoed message: `<data>(<count> letters)`.
pub const ANNOTATION_PREFIX: &str = "(";
pub const ANNOTATION_SUFFIX: &str = " letters)";

/// Highest major number a character device may use (exclusive).
pub const CHRDEV_MAJOR_MAX: u32 = 512;
