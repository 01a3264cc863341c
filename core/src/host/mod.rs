//! Host capability boundary
//!
//! Everything the suppressor consumes from the game client is expressed as
//! three traits:
//! - **SpellApi**: ability cooldown, charge and duration-handle queries
//! - **CurveApi**: the step-curve primitives used to compare redacted durations
//! - **UiApi**: frame instrumentation, draw flags, viewer enumeration and timers
//!
//! Any of these may be missing in a given host version. Every default method
//! body reports [`HostError::Unsupported`], so an adapter implements only what
//! its host offers and the rest degrades to "unknown".

mod error;

use std::time::Duration;

pub use error::HostError;

use crate::event::CooldownEvent;
use crate::secret::Secret;
use crate::signals::ScheduledTask;

/// Plain ability identifier. Redacted identifiers travel as `Secret<AbilityId>`.
pub type AbilityId = u32;

/// Host identity of a cooldown-capable visual frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

/// Host identity of a tracked-ability display container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewerId(pub u64);

/// Host identity of a child element inside a viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Opaque duration object. Only meaningful when handed back to [`CurveApi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DurationHandle(pub u64);

/// Host-side evaluator built by [`CurveApi::create_step_curve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurveHandle(pub u64);

/// Control point of a step curve: `x` seconds remaining maps to `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

impl CurvePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Cooldown state of an ability as reported by the host
#[derive(Debug, Clone, Copy, Default)]
pub struct CooldownInfo {
    /// "This cooldown is merely the global cooldown". Older hosts omit it.
    pub is_on_gcd: Option<Secret<bool>>,
    /// Cooldown duration in seconds
    pub duration: Option<Secret<f64>>,
}

/// Charge counts of an ability
#[derive(Debug, Clone, Copy)]
pub struct ChargeInfo {
    pub current: Secret<u32>,
    pub maximum: Secret<u32>,
}

impl ChargeInfo {
    /// `(current, maximum)` when both counts are plainly readable.
    pub fn readable(&self) -> Option<(u32, u32)> {
        Some((self.current.get()?, self.maximum.get()?))
    }
}

/// Frame operations the hook manager can observe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameHook {
    /// "Set cooldown by start + duration"
    SetCooldown,
    /// "Set cooldown by duration handle" (newer hosts only)
    SetCooldownFromDuration,
    SetDrawSwipe,
    SetDrawEdge,
}

impl FrameHook {
    pub const ALL: [FrameHook; 4] = [
        FrameHook::SetCooldown,
        FrameHook::SetCooldownFromDuration,
        FrameHook::SetDrawSwipe,
        FrameHook::SetDrawEdge,
    ];
}

/// Ability and spell-book queries
pub trait SpellApi {
    fn cooldown_info(&self, _ability: AbilityId) -> Result<CooldownInfo, HostError> {
        Err(HostError::unsupported("cooldown_info"))
    }

    fn charge_info(&self, _ability: AbilityId) -> Result<Option<ChargeInfo>, HostError> {
        Err(HostError::unsupported("charge_info"))
    }

    /// Duration handle of the charge recharge timer
    fn recharge_duration(&self, _ability: AbilityId) -> Result<Option<DurationHandle>, HostError> {
        Err(HostError::unsupported("recharge_duration"))
    }

    /// Duration handle of the ability's own cooldown
    fn cooldown_duration(&self, _ability: AbilityId) -> Result<Option<DurationHandle>, HostError> {
        Err(HostError::unsupported("cooldown_duration"))
    }

    /// Current length of the global cooldown, in seconds
    fn gcd_baseline(&self) -> Result<Secret<f64>, HostError> {
        Err(HostError::unsupported("gcd_baseline"))
    }

    /// Every ability in the player's current loadout
    fn known_abilities(&self) -> Result<Vec<AbilityId>, HostError> {
        Err(HostError::unsupported("known_abilities"))
    }
}

/// Relational primitives that operate on redacted durations without reading them
pub trait CurveApi {
    fn create_step_curve(&self, _points: &[CurvePoint]) -> Result<CurveHandle, HostError> {
        Err(HostError::unsupported("create_step_curve"))
    }

    /// Redacted iff the duration maps above the step.
    fn evaluate_curve(
        &self,
        _duration: DurationHandle,
        _curve: CurveHandle,
    ) -> Result<Secret<f64>, HostError> {
        Err(HostError::unsupported("evaluate_curve"))
    }

    /// Plain empty for a plain zero, redacted for anything redacted or nonzero.
    fn redact_if_nonzero(&self, _value: Secret<f64>) -> Result<Secret<Option<f64>>, HostError> {
        Err(HostError::unsupported("redact_if_nonzero"))
    }
}

/// Widget layer: frames, viewers and deferred callbacks
pub trait UiApi {
    fn supports_hook(&self, frame: FrameId, hook: FrameHook) -> bool;

    fn subscribe(&mut self, _frame: FrameId, _hook: FrameHook) -> Result<(), HostError> {
        Err(HostError::unsupported("subscribe"))
    }

    fn set_draw_swipe(&mut self, _frame: FrameId, _shown: bool) -> Result<(), HostError> {
        Err(HostError::unsupported("set_draw_swipe"))
    }

    fn set_draw_edge(&mut self, _frame: FrameId, _shown: bool) -> Result<(), HostError> {
        Err(HostError::unsupported("set_draw_edge"))
    }

    /// The cooldown currently shown on a frame
    fn frame_cooldown(&self, _frame: FrameId) -> Result<Option<CooldownEvent>, HostError> {
        Err(HostError::unsupported("frame_cooldown"))
    }

    fn tracked_viewers(&self) -> Result<Vec<ViewerId>, HostError> {
        Err(HostError::unsupported("tracked_viewers"))
    }

    fn viewer_children(&self, _viewer: ViewerId) -> Result<Vec<ElementId>, HostError> {
        Err(HostError::unsupported("viewer_children"))
    }

    fn element_children(&self, _element: ElementId) -> Result<Vec<ElementId>, HostError> {
        Err(HostError::unsupported("element_children"))
    }

    /// The cooldown sub-element of an icon, if it has one
    fn element_cooldown_frame(&self, _element: ElementId) -> Result<Option<FrameId>, HostError> {
        Err(HostError::unsupported("element_cooldown_frame"))
    }

    fn element_ability(&self, _element: ElementId) -> Result<Option<Secret<AbilityId>>, HostError> {
        Err(HostError::unsupported("element_ability"))
    }

    /// Deliver `HostSignal::ViewerShown` whenever the viewer becomes visible
    fn watch_viewer_shown(&mut self, _viewer: ViewerId) -> Result<(), HostError> {
        Err(HostError::unsupported("watch_viewer_shown"))
    }

    /// Deliver `HostSignal::TimerFired(task)` once, after `delay`
    fn schedule(&mut self, _delay: Duration, _task: ScheduledTask) -> Result<(), HostError> {
        Err(HostError::unsupported("schedule"))
    }
}

/// Everything the suppressor needs from the host
pub trait Host: SpellApi + CurveApi + UiApi {}

impl<T: SpellApi + CurveApi + UiApi + ?Sized> Host for T {}

/// Run the result of a host call through the single failure funnel.
///
/// Both capability-absent and call-failure collapse to `None`; the error is
/// only visible in diagnostic output.
pub fn guarded<T>(call: &'static str, result: Result<T, HostError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::debug!(call, %error, "host call unavailable");
            None
        }
    }
}
