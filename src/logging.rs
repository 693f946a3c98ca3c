//! Logging macros shared by the library modules.
//!
//! - Bare-metal targets: forwarded to `defmt`
//! - Host unit tests: printed with a level prefix
//! - Host, non-test: compiled out (arguments are still type-checked)
//!
//! Only `{}` and `{:?}` placeholders may be used so the same format string is
//! valid for both `defmt` and `core::fmt`.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(target_os = "none"), test))]
        ::std::println!("[INFO] {}", ::core::format_args!($($arg)*));

        #[cfg(all(not(target_os = "none"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(target_os = "none"), test))]
        ::std::println!("[WARN] {}", ::core::format_args!($($arg)*));

        #[cfg(all(not(target_os = "none"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(target_os = "none"), test))]
        ::std::eprintln!("[ERROR] {}", ::core::format_args!($($arg)*));

        #[cfg(all(not(target_os = "none"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(target_os = "none"), test))]
        ::std::println!("[DEBUG] {}", ::core::format_args!($($arg)*));

        #[cfg(all(not(target_os = "none"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}
