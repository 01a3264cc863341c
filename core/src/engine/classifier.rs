//! Global-cooldown classification
//!
//! Decides whether a cooldown update is only the global cooldown. The signals
//! are tried from most authoritative (and least often available) to least
//! authoritative (and always available); the first tier that can decide wins.
//!
//! | Tier | Signal                         | Needs                       |
//! |------|--------------------------------|-----------------------------|
//! | 1    | charge counts / charge cache   | plain ability id            |
//! | 2    | host "is on GCD" flag          | plain ability id, plain flag|
//! | 3    | queried cooldown duration      | plain ability id, plain secs|
//! | 4    | raw event duration             | plain raw duration          |
//! | 5    | step curve on duration handle  | curve primitives            |
//! | 6    | nothing usable                 | -                           |
//!
//! Whenever a tier cannot decide the result is `Show`: hiding a real cooldown
//! is worse than drawing a GCD sweep.

use serde::Serialize;

use crate::event::{CooldownEvent, Verdict};
use crate::host::{AbilityId, CurveApi, DurationHandle, SpellApi, guarded};
use crate::secret::{Secret, readable};

use super::charges::ChargeTracker;
use super::comparator::{Comparison, OpaqueComparator};

/// Queried cooldowns shorter than this are not real cooldowns.
const READABLE_FLOOR_SECS: f64 = 0.5;
/// Queried cooldowns in `[floor, ceiling]` are always the GCD.
const READABLE_GCD_CEILING_SECS: f64 = 1.0;
const READABLE_BASELINE_TOLERANCE_SECS: f64 = 0.01;

/// Raw durations up to this are the GCD; looser than the queried band to
/// absorb jitter at the moment the update fires.
const RAW_GCD_CEILING_SECS: f64 = 1.8;
const RAW_BASELINE_TOLERANCE_SECS: f64 = 0.05;

/// Which rule produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecisionTier {
    /// Plain charge counts on a multi-charge ability
    ChargeCounts,
    /// Counts withheld, but the ability is a cached charge ability
    KnownChargeAbility { recharge: Comparison },
    GcdFlag,
    ReadableDuration,
    RawDuration,
    DurationCurve,
    Unknown,
}

/// A verdict together with the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub verdict: Verdict,
    pub tier: DecisionTier,
}

impl Classification {
    fn new(verdict: Verdict, tier: DecisionTier) -> Self {
        Self { verdict, tier }
    }
}

/// The classification engine.
///
/// Owns the only state that outlives a single call: the charge cache and the
/// two lazily-built comparators.
#[derive(Debug, Clone)]
pub struct Classifier {
    charges: ChargeTracker,
    gcd_curve: OpaqueComparator,
    near_zero: OpaqueComparator,
}

impl Classifier {
    pub fn new(gcd_threshold_secs: f64) -> Self {
        Self {
            charges: ChargeTracker::new(),
            gcd_curve: OpaqueComparator::new(gcd_threshold_secs),
            near_zero: OpaqueComparator::near_zero(),
        }
    }

    pub fn charges(&self) -> &ChargeTracker {
        &self.charges
    }

    pub fn charges_mut(&mut self) -> &mut ChargeTracker {
        &mut self.charges
    }

    pub fn classify<A: SpellApi + CurveApi + ?Sized>(
        &mut self,
        api: &A,
        event: &CooldownEvent,
    ) -> Verdict {
        self.evaluate(api, event).verdict
    }

    /// Classify and report the deciding tier.
    pub fn evaluate<A: SpellApi + CurveApi + ?Sized>(
        &mut self,
        api: &A,
        event: &CooldownEvent,
    ) -> Classification {
        let classification = self.decide(api, event);
        tracing::trace!(
            ability = ?event.plain_ability(),
            verdict = ?classification.verdict,
            tier = ?classification.tier,
            "classified cooldown"
        );
        classification
    }

    fn decide<A: SpellApi + CurveApi + ?Sized>(
        &mut self,
        api: &A,
        event: &CooldownEvent,
    ) -> Classification {
        let ability = event.plain_ability();

        if let Some(id) = ability {
            if let Some(decided) = self.charge_tier(api, id) {
                return decided;
            }
            if let Some(decided) = cooldown_info_tier(api, id) {
                return decided;
            }
        }

        if let Some(verdict) = event.raw_duration.and_then(|raw| raw_duration_verdict(api, raw)) {
            return Classification::new(verdict, DecisionTier::RawDuration);
        }

        if let Some(handle) = duration_handle(api, event, ability) {
            match self.gcd_curve.compare(api, handle) {
                Comparison::Above => {
                    return Classification::new(Verdict::Show, DecisionTier::DurationCurve);
                }
                Comparison::AtOrBelow => {
                    return Classification::new(Verdict::Hide, DecisionTier::DurationCurve);
                }
                Comparison::Indeterminate => {}
            }
        }

        Classification::new(Verdict::Show, DecisionTier::Unknown)
    }

    /// Tier 1. A ticking recharge must never look like a GCD.
    fn charge_tier<A: SpellApi + CurveApi + ?Sized>(
        &mut self,
        api: &A,
        ability: AbilityId,
    ) -> Option<Classification> {
        if let Some((current, maximum)) = self.charges.observe(api, ability) {
            if maximum <= 1 {
                return None;
            }
            // Fully charged: whatever sweep is showing is the GCD
            let verdict = Verdict::hide_if(current >= maximum);
            return Some(Classification::new(verdict, DecisionTier::ChargeCounts));
        }

        if !self.charges.is_known(ability) {
            return None;
        }

        // Counts are withheld. Probe the recharge for diagnostics, but the
        // answer is Show either way: a near-zero recharge may still be the last
        // moment of a real one.
        let recharge = match guarded("recharge_duration", api.recharge_duration(ability)).flatten() {
            Some(handle) => self.near_zero.compare(api, handle),
            None => Comparison::Indeterminate,
        };
        Some(Classification::new(
            Verdict::Show,
            DecisionTier::KnownChargeAbility { recharge },
        ))
    }
}

/// Tiers 2 and 3, which share one cooldown query.
fn cooldown_info_tier<A: SpellApi + ?Sized>(api: &A, ability: AbilityId) -> Option<Classification> {
    let info = guarded("cooldown_info", api.cooldown_info(ability))?;

    if let Some(on_gcd) = readable(info.is_on_gcd) {
        return Some(Classification::new(
            Verdict::hide_if(on_gcd),
            DecisionTier::GcdFlag,
        ));
    }

    let secs = finite(readable(info.duration))?;
    let verdict = if secs < READABLE_FLOOR_SECS {
        Verdict::Show
    } else if secs <= READABLE_GCD_CEILING_SECS {
        Verdict::Hide
    } else {
        let baseline = gcd_baseline(api)?;
        Verdict::hide_if((secs - baseline).abs() <= READABLE_BASELINE_TOLERANCE_SECS)
    };
    Some(Classification::new(verdict, DecisionTier::ReadableDuration))
}

/// Tier 4.
fn raw_duration_verdict<A: SpellApi + ?Sized>(api: &A, raw: Secret<f64>) -> Option<Verdict> {
    let secs = finite(raw.get())?;
    if secs <= 0.0 {
        return Some(Verdict::Show);
    }
    if secs <= RAW_GCD_CEILING_SECS {
        return Some(Verdict::Hide);
    }
    let baseline = gcd_baseline(api)?;
    Some(Verdict::hide_if(
        (secs - baseline).abs() <= RAW_BASELINE_TOLERANCE_SECS,
    ))
}

/// Handle for tier 5: the event's own, else the ability's cooldown handle.
fn duration_handle<A: SpellApi + ?Sized>(
    api: &A,
    event: &CooldownEvent,
    ability: Option<AbilityId>,
) -> Option<DurationHandle> {
    event.duration_handle.or_else(|| {
        let id = ability?;
        guarded("cooldown_duration", api.cooldown_duration(id)).flatten()
    })
}

/// Live GCD length, trusted only when plain.
fn gcd_baseline<A: SpellApi + ?Sized>(api: &A) -> Option<f64> {
    finite(guarded("gcd_baseline", api.gcd_baseline())?.get())
}

fn finite(secs: Option<f64>) -> Option<f64> {
    secs.filter(|s| s.is_finite())
}
