//! `format!`-style logging macros.
//!
//! Without a target they write through the global logger. With
//! `on <expr>,` they write through a [`Logger`](crate::Logger) or
//! [`Entry`](crate::Entry).
//!
//! ```ignore
//! gelf_logger::infof!("listening on {}", addr);
//!
//! let request = logger.with_field("request_id", id);
//! gelf_logger::warnf!(on request, "slow upstream: {} ms", elapsed);
//! ```

#[macro_export]
macro_rules! debugf {
    (on $target:expr, $($arg:tt)+) => {
        $target.debugf(::core::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::debugf(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! infof {
    (on $target:expr, $($arg:tt)+) => {
        $target.infof(::core::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::infof(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warnf {
    (on $target:expr, $($arg:tt)+) => {
        $target.warnf(::core::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::warnf(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! errorf {
    (on $target:expr, $($arg:tt)+) => {
        $target.errorf(::core::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::errorf(::core::format_args!($($arg)+))
    };
}

/// Logs through `fatalf` and exits the process.
#[macro_export]
macro_rules! fatalf {
    (on $target:expr, $($arg:tt)+) => {
        $target.fatalf(::core::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::fatalf(::core::format_args!($($arg)+))
    };
}

/// Logs through `panicf` and panics.
#[macro_export]
macro_rules! panicf {
    (on $target:expr, $($arg:tt)+) => {
        $target.panicf(::core::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::panicf(::core::format_args!($($arg)+))
    };
}
