use once_cell::sync::Lazy;

/// Global debug mode flag, initialized once at startup
pub static DEBUG_MODE: Lazy<bool> = Lazy::new(|| std::env::var("FLEETRATE_DEBUG").is_ok());

/// Conditional debug output macro
///
/// Only prints to stderr when DEBUG_MODE is enabled, avoiding the cost of
/// checking the environment on every call.
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        if *$crate::utils::debug::DEBUG_MODE {
            eprintln!($($arg)*);
        }
    };
}

/// Re-export for internal use
pub use debug_println;
