pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod event;
pub mod hooks;
pub mod host;
pub mod scanner;
pub mod secret;
pub mod signals;
pub mod suppressor;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use config::{ConfigError, from_toml_str};
pub use engine::{ChargeTracker, Classification, Classifier, Comparison, DecisionTier, OpaqueComparator};
pub use event::{CooldownEvent, Verdict};
pub use hooks::{DrawFlag, HookManager};
pub use host::{
    AbilityId, ChargeInfo, CooldownInfo, CurveApi, CurveHandle, CurvePoint, DurationHandle,
    ElementId, FrameHook, FrameId, Host, HostError, SpellApi, UiApi, ViewerId, guarded,
};
pub use scanner::{ScanReport, ViewerScanner};
pub use secret::{Redacted, Secret};
pub use signals::{HostSignal, ScheduledTask, SignalHandler};
pub use suppressor::{Suppressor, SuppressorStats};
pub use swipeguard_types::SuppressionConfig;
