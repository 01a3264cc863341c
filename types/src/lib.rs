//! Shared configuration types for swipeguard
//!
//! This crate contains the serializable settings that shape how cooldown
//! sweeps are suppressed. The values are read once when a suppressor is built
//! and never change for its lifetime.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Remaining-time boundary (seconds) at or below which an opaque cooldown is
/// treated as a global cooldown.
pub const DEFAULT_GCD_THRESHOLD_SECS: f64 = 2.0;

/// Poll period (seconds) while the host is in its restricted interaction state.
pub const DEFAULT_RESTRICTED_POLL_SECS: f64 = 0.5;

/// Delay (seconds) that lets the host finish populating a viewer before a re-scan.
pub const DEFAULT_SCAN_SETTLE_SECS: f64 = 0.1;

/// Delay (seconds) before the charge pre-scan that follows a loadout change.
pub const DEFAULT_PRESCAN_DELAY_SECS: f64 = 0.5;

fn default_gcd_threshold_secs() -> f64 {
    DEFAULT_GCD_THRESHOLD_SECS
}

fn default_true() -> bool {
    true
}

fn default_restricted_poll_secs() -> f64 {
    DEFAULT_RESTRICTED_POLL_SECS
}

fn default_scan_settle_secs() -> f64 {
    DEFAULT_SCAN_SETTLE_SECS
}

fn default_prescan_delay_secs() -> f64 {
    DEFAULT_PRESCAN_DELAY_SECS
}

// ─────────────────────────────────────────────────────────────────────────────
// Suppression settings
// ─────────────────────────────────────────────────────────────────────────────

/// Settings for the cooldown sweep suppressor.
///
/// Every field has a serde default so a partial TOML table is valid.
///
/// # Examples
/// ```
/// use swipeguard_types::SuppressionConfig;
/// let config = SuppressionConfig::default();
/// assert_eq!(config.gcd_threshold_secs, 2.0);
/// assert!(config.suppress_edge);
/// assert!(!config.diagnostics);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppressionConfig {
    /// Step boundary of the opaque duration comparator
    #[serde(default = "default_gcd_threshold_secs")]
    pub gcd_threshold_secs: f64,

    /// Also hide the edge flash, not only the sweep
    #[serde(default = "default_true")]
    pub suppress_edge: bool,

    /// Backstop scan period while in the restricted state
    #[serde(default = "default_restricted_poll_secs")]
    pub restricted_poll_secs: f64,

    /// Debounce delay for viewer re-scans
    #[serde(default = "default_scan_settle_secs")]
    pub scan_settle_secs: f64,

    /// Delay before the charge pre-scan after a loadout change
    #[serde(default = "default_prescan_delay_secs")]
    pub prescan_delay_secs: f64,

    /// Install a log subscriber and emit diagnostic output
    #[serde(default)]
    pub diagnostics: bool,
}

impl Default for SuppressionConfig {
    fn default() -> Self {
        Self {
            gcd_threshold_secs: DEFAULT_GCD_THRESHOLD_SECS,
            suppress_edge: true,
            restricted_poll_secs: DEFAULT_RESTRICTED_POLL_SECS,
            scan_settle_secs: DEFAULT_SCAN_SETTLE_SECS,
            prescan_delay_secs: DEFAULT_PRESCAN_DELAY_SECS,
            diagnostics: false,
        }
    }
}

impl SuppressionConfig {
    /// All second-valued fields paired with their names, for validation.
    ///
    /// # Examples
    /// ```
    /// use swipeguard_types::SuppressionConfig;
    /// let names: Vec<_> = SuppressionConfig::default()
    ///     .durations()
    ///     .iter()
    ///     .map(|(name, _)| *name)
    ///     .collect();
    /// assert_eq!(names[0], "gcd_threshold_secs");
    /// assert_eq!(names.len(), 4);
    /// ```
    pub fn durations(&self) -> [(&'static str, f64); 4] {
        [
            ("gcd_threshold_secs", self.gcd_threshold_secs),
            ("restricted_poll_secs", self.restricted_poll_secs),
            ("scan_settle_secs", self.scan_settle_secs),
            ("prescan_delay_secs", self.prescan_delay_secs),
        ]
    }
}
