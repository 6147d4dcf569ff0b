#![cfg_attr(not(test), no_std)]

// Log through the `log` facade when the feature is on, compile to nothing otherwise.
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::trace!($($arg)*);
    };
}

macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::debug!($($arg)*);
    };
}

pub mod ring_buf;
pub mod shared;

pub use ring_buf::{Iter, RingBuf};
pub use shared::SharedRingBuf;
