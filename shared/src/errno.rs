//! Kernel error numbers shared by the driver and the user-space agent.
//!
//! Driver entry points return `KResult<T>`; the classic C return value is the
//! negated errno, available through [`Errno::to_ret`].

use core::fmt;

/// Positive Linux error number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Errno(i32);

pub type KResult<T> = Result<T, Errno>;

impl Errno {
    pub const ENXIO: Errno = Errno(6);
    pub const EFAULT: Errno = Errno(14);
    pub const EBUSY: Errno = Errno(16);
    pub const EINVAL: Errno = Errno(22);

    /// Wrap a raw errno. Negative values (kernel-style returns) are accepted
    /// and normalised; `i32::MIN` saturates to `i32::MAX`.
    pub const fn from_raw(raw: i32) -> Self {
        let abs = raw.unsigned_abs();
        if abs > i32::MAX as u32 { Errno(i32::MAX) } else { Errno(abs as i32) }
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Value a C `ssize_t` handler would return for this error.
    pub const fn to_ret(self) -> isize {
        -(self.0 as isize)
    }

    pub const fn name(self) -> &'static str {
        match self.0 {
            6 => "ENXIO",
            14 => "EFAULT",
            16 => "EBUSY",
            22 => "EINVAL",
            _ => "EUNKNOWN",
        }
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Errno {}

#[cfg(feature = "std")]
impl From<Errno> for std::io::Error {
    fn from(e: Errno) -> Self {
        std::io::Error::from_raw_os_error(e.0)
    }
}
