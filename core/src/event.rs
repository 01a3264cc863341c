//! Cooldown updates and the verdicts produced for them

use serde::Serialize;

use crate::host::{AbilityId, DurationHandle};
use crate::secret::Secret;

/// One host-triggered cooldown update.
///
/// Every field may be absent, and the ability id and raw duration may be
/// redacted. Consumed synchronously; the engine never keeps it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CooldownEvent {
    pub ability: Option<Secret<AbilityId>>,
    /// Duration in seconds as passed to "set cooldown"
    pub raw_duration: Option<Secret<f64>>,
    pub duration_handle: Option<DurationHandle>,
}

impl CooldownEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ability(mut self, ability: impl Into<Secret<AbilityId>>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    pub fn with_raw_duration(mut self, secs: impl Into<Secret<f64>>) -> Self {
        self.raw_duration = Some(secs.into());
        self
    }

    pub fn with_handle(mut self, handle: DurationHandle) -> Self {
        self.duration_handle = Some(handle);
        self
    }

    /// Ability id if it is present and plainly readable
    pub fn plain_ability(&self) -> Option<AbilityId> {
        self.ability.and_then(|id| id.get())
    }
}

/// Whether the sweep for a cooldown should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Verdict {
    /// Trivial global cooldown: suppress the sweep
    Hide,
    /// Player-relevant cooldown, or not enough information to tell
    #[default]
    Show,
}

impl Verdict {
    pub fn is_hide(self) -> bool {
        self == Verdict::Hide
    }

    /// `Hide` when the condition holds, `Show` otherwise
    pub fn hide_if(condition: bool) -> Self {
        if condition { Verdict::Hide } else { Verdict::Show }
    }
}
