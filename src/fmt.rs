//! Logging macros that forward to `defmt` or `log`, whichever is enabled.
//! With neither feature enabled they compile to nothing.

macro_rules! debug {
    ($($args:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::debug!($($args)*);
        #[cfg(feature = "log")]
        log::debug!($($args)*);
    }
}

macro_rules! warn {
    ($($args:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::warn!($($args)*);
        #[cfg(feature = "log")]
        log::warn!($($args)*);
    }
}
