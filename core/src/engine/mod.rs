//! GCD classification engine
//!
//! This module provides:
//! - **Comparator**: threshold tests on redacted durations via host step curves
//! - **Charges**: the ratchet cache of multi-charge abilities
//! - **Classifier**: the tiered decision procedure producing hide/show verdicts
//!
//! # Data flow
//!
//! ```text
//!   CooldownEvent ──► Classifier ──┬──► ChargeTracker (tier 1)
//!                        │         ├──► SpellApi queries (tiers 1-4)
//!                        │         └──► OpaqueComparator (tiers 1, 5)
//!                        ▼
//!                     Verdict
//! ```

mod charges;
mod classifier;
mod comparator;


pub use charges::ChargeTracker;
pub use classifier::{Classification, Classifier, DecisionTier};
pub use comparator::{Comparison, NEAR_ZERO_SECS, OpaqueComparator, STEP_EPSILON_SECS};
