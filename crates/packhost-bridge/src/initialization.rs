//! Process setup for the boundary layer
//!
//! Reads the environment once, configures the console/file logger and
//! installs the `tracing` subscriber. Hosts that embed the layer call
//! [`initialize_from_env`] before the first boundary crossing; every other
//! entry point works without it.

use crate::errors::BridgeError;
use packhost_config::HostConfig;
use packhost_logger as logger;

/// Apply an already loaded configuration
pub fn initialize(config: &HostConfig) -> Result<(), BridgeError> {
    logger::init_with_verbosity(config.verbosity, config.log_file.as_deref())
        .map_err(BridgeError::Logging)?;

    // Not fatal: the host may own the global subscriber.
    if let Err(e) = logger::init_tracing() {
        logger::warn(&e);
    }

    logger::debug(&format!(
        "packhost initialized (verbosity: {}, deprecation warnings: {})",
        config.verbosity, config.dep_warnings
    ));
    Ok(())
}

/// Load configuration from the process environment and apply it
pub fn initialize_from_env() -> Result<HostConfig, BridgeError> {
    let config = HostConfig::from_env()?;
    initialize(&config)?;
    Ok(config)
}
