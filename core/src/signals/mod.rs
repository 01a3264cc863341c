//! Host notifications
//!
//! Everything the host pushes at the suppressor arrives as a `HostSignal`:
//! game-state transitions, viewer visibility, fired timers and the frame
//! operations the hook manager subscribed to.

use crate::event::CooldownEvent;
use crate::host::{FrameId, Host, ViewerId};

/// Deferred work requested through `UiApi::schedule`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduledTask {
    /// Re-scan viewers once the host has settled
    Scan,
    /// Backstop scan during the restricted state; reschedules itself
    Poll,
    /// Front-load the charge cache from the loadout
    ChargePrescan,
}

#[derive(Debug, Clone)]
pub enum HostSignal {
    // Game-state transitions
    WorldEntered,
    LoadoutChanged,
    RestrictedEntered,
    RestrictedLeft,
    AbilityDataRefreshed,

    // Viewer visibility
    ViewerShown(ViewerId),

    // Deferred callbacks
    TimerFired(ScheduledTask),

    // Subscribed frame operations
    CooldownSet {
        frame: FrameId,
        event: CooldownEvent,
    },
    CooldownSetFromDuration {
        frame: FrameId,
        event: CooldownEvent,
    },
    SwipeSet {
        frame: FrameId,
        shown: bool,
    },
    EdgeSet {
        frame: FrameId,
        shown: bool,
    },
}

/// Receives host notifications.
///
/// Implementations must never panic or block: they run on the host's UI
/// thread, possibly every frame.
pub trait SignalHandler {
    fn handle_signal(&mut self, host: &mut dyn Host, signal: &HostSignal);
}
