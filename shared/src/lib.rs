#![cfg_attr(not(feature = "std"), no_std)]

pub mod constants;
pub mod errno;

pub use errno::{Errno, KResult};
