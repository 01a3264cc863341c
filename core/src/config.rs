//! Loading suppression settings
//!
//! Settings are TOML. Missing keys fall back to the defaults in
//! `swipeguard_types`; present keys are validated before use.

use swipeguard_types::SuppressionConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse suppression config")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Parse and validate a TOML settings table.
pub fn from_toml_str(text: &str) -> Result<SuppressionConfig, ConfigError> {
    let config: SuppressionConfig = toml::from_str(text)?;
    validate(&config)?;
    Ok(config)
}

/// Every duration must be a positive, finite number of seconds.
pub fn validate(config: &SuppressionConfig) -> Result<(), ConfigError> {
    for (field, secs) in config.durations() {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(ConfigError::Invalid {
                field,
                reason: format!("expected positive seconds, got {secs}"),
            });
        }
    }
    Ok(())
}

/// Replace every duration that fails [`validate`] with its default.
///
/// For settings built in code rather than parsed, where there is no caller to
/// hand an error back to.
pub fn sanitize(mut config: SuppressionConfig) -> SuppressionConfig {
    let defaults = SuppressionConfig::default();
    let fields = [
        ("gcd_threshold_secs", &mut config.gcd_threshold_secs, defaults.gcd_threshold_secs),
        ("restricted_poll_secs", &mut config.restricted_poll_secs, defaults.restricted_poll_secs),
        ("scan_settle_secs", &mut config.scan_settle_secs, defaults.scan_settle_secs),
        ("prescan_delay_secs", &mut config.prescan_delay_secs, defaults.prescan_delay_secs),
    ];
    for (field, secs, default) in fields {
        if !secs.is_finite() || *secs <= 0.0 {
            tracing::warn!(field, value = *secs, default, "invalid duration, using default");
            *secs = default;
        }
    }
    config
}
