//! Threshold comparison of redacted durations
//!
//! A redacted duration cannot be read, but it can be evaluated against a
//! step curve. The host returns a redacted scalar exactly when the duration
//! lands above the step, and `redact_if_nonzero` collapses the scalar into a
//! presence test. The answer is then one opacity check away.

use serde::Serialize;

use crate::host::{CurveApi, CurveHandle, CurvePoint, DurationHandle, guarded};

/// Width of the step between the "at or below" and "above" plateaus.
pub const STEP_EPSILON_SECS: f64 = 0.001;

/// Boundary of the "effectively zero" comparator.
pub const NEAR_ZERO_SECS: f64 = 0.1;

/// Outcome of comparing a redacted duration against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparison {
    Above,
    AtOrBelow,
    /// A primitive was missing, failed, or broke its contract
    Indeterminate,
}

#[derive(Debug, Clone, Copy)]
enum CurveSlot {
    Unbuilt,
    Built(CurveHandle),
    /// Construction failed once; never retried
    Failed,
}

/// Compares duration handles against one fixed threshold.
///
/// The step curve is built on first use and kept for the comparator's lifetime,
/// including a failed build.
#[derive(Debug, Clone)]
pub struct OpaqueComparator {
    threshold_secs: f64,
    slot: CurveSlot,
}

impl OpaqueComparator {
    pub fn new(threshold_secs: f64) -> Self {
        Self {
            threshold_secs,
            slot: CurveSlot::Unbuilt,
        }
    }

    /// Comparator answering "is this duration effectively zero?"
    pub fn near_zero() -> Self {
        Self::new(NEAR_ZERO_SECS)
    }

    pub fn threshold_secs(&self) -> f64 {
        self.threshold_secs
    }

    /// Maps `<= threshold` to 0 and `> threshold` to 1.
    pub fn control_points(&self) -> [CurvePoint; 3] {
        let t = self.threshold_secs;
        [
            CurvePoint::new(0.0, 0.0),
            CurvePoint::new(t, 0.0),
            CurvePoint::new(t + STEP_EPSILON_SECS, 1.0),
        ]
    }

    fn curve<A: CurveApi + ?Sized>(&mut self, api: &A) -> Option<CurveHandle> {
        if let CurveSlot::Unbuilt = self.slot {
            self.slot = match guarded(
                "create_step_curve",
                api.create_step_curve(&self.control_points()),
            ) {
                Some(handle) => CurveSlot::Built(handle),
                None => {
                    tracing::debug!(
                        threshold = self.threshold_secs,
                        "step curve unavailable, comparator disabled"
                    );
                    CurveSlot::Failed
                }
            };
        }

        match self.slot {
            CurveSlot::Built(handle) => Some(handle),
            CurveSlot::Unbuilt | CurveSlot::Failed => None,
        }
    }

    /// Compare `duration` against the threshold without reading it.
    pub fn compare<A: CurveApi + ?Sized>(
        &mut self,
        api: &A,
        duration: DurationHandle,
    ) -> Comparison {
        let Some(curve) = self.curve(api) else {
            return Comparison::Indeterminate;
        };
        let Some(scalar) = guarded("evaluate_curve", api.evaluate_curve(duration, curve)) else {
            return Comparison::Indeterminate;
        };
        let Some(marker) = guarded("redact_if_nonzero", api.redact_if_nonzero(scalar)) else {
            return Comparison::Indeterminate;
        };

        if marker.is_redacted() {
            return Comparison::Above;
        }
        match marker.plain() {
            Some(None) => Comparison::AtOrBelow,
            // A plain nonzero marker breaks the primitive's contract
            _ => Comparison::Indeterminate,
        }
    }

    /// True once the curve has been built successfully.
    pub fn is_ready(&self) -> bool {
        matches!(self.slot, CurveSlot::Built(_))
    }
}
