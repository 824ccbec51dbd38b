//! Logging macros
//!
//! Forward to defmt on the robot, print with a level prefix on hosted
//! builds (`std` feature or unit tests), and compile to nothing otherwise.
//! Format strings must stay within the subset both backends accept:
//! `{}` for primitives and `{:?}` for everything else.

#![allow(unused_macros)]

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);

        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        ::std::println!("[TRACE] {}", ::core::format_args!($($arg)*));

        #[cfg(not(any(feature = "defmt", test, feature = "std")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        ::std::println!("[DEBUG] {}", ::core::format_args!($($arg)*));

        #[cfg(not(any(feature = "defmt", test, feature = "std")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        ::std::println!("[INFO] {}", ::core::format_args!($($arg)*));

        #[cfg(not(any(feature = "defmt", test, feature = "std")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        ::std::println!("[WARN] {}", ::core::format_args!($($arg)*));

        #[cfg(not(any(feature = "defmt", test, feature = "std")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "defmt"), any(test, feature = "std")))]
        ::std::eprintln!("[ERROR] {}", ::core::format_args!($($arg)*));

        #[cfg(not(any(feature = "defmt", test, feature = "std")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}
