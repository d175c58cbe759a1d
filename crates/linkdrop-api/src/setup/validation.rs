//! Configuration validation
//!
//! Rejects settings that would fail at runtime before any connection is made.

use anyhow::Result;
use linkdrop_core::Config;

pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.db_max_connections() == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.max_upload_size_bytes() == 0 {
        return Err(anyhow::anyhow!("Max upload size cannot be 0"));
    }

    if config.cleanup_interval_secs() > 0 && config.cleanup_interval_secs() < 10 {
        tracing::warn!(
            interval_secs = config.cleanup_interval_secs(),
            "Cleanup interval is very short - expect frequent database scans"
        );
    }

    Ok(())
}
