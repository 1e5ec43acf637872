//! Logging setup for binaries and tests embedding the crate.
//!
//! The library itself only talks to the `log` facade; installing a backend is left
//! to the host unless it opts into this helper.

/// Install `env_logger` as the global logger, honouring `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init() {
    if env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .try_init()
        .is_ok()
    {
        log::debug!("logging initialised");
    }
}

/// No-op without the `debug` feature.
#[cfg(not(feature = "debug"))]
pub fn init() {}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_is_idempotent() {
        super::init();
        super::init();
        log::trace!("still logging after repeated init");
    }
}
