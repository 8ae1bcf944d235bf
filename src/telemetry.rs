//! Browser logging setup.
//!
//! Routes the `log` facade to the developer console and installs the panic
//! hook. Outside the browser this is a no-op and log lines go to whatever
//! logger the host installed (none in tests).

/// Install console logging at `level`. Safe to call more than once.
pub fn init(level: log::Level) {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(level);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = level;
    }
}
