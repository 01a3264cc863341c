use hashbrown::HashMap;

use crate::engine::Classifier;
use crate::event::{CooldownEvent, Verdict};
use crate::host::{FrameHook, FrameId, Host, UiApi, guarded};

/// The two draw flags the suppressor controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawFlag {
    Swipe,
    Edge,
}

impl DrawFlag {
    fn write<U: UiApi + ?Sized>(self, ui: &mut U, frame: FrameId, shown: bool) {
        match self {
            DrawFlag::Swipe => {
                guarded("set_draw_swipe", ui.set_draw_swipe(frame, shown));
            }
            DrawFlag::Edge => {
                guarded("set_draw_edge", ui.set_draw_edge(frame, shown));
            }
        }
    }
}

#[derive(Debug, Default)]
struct FrameState {
    /// Observers the host accepted
    installed: Vec<FrameHook>,
}

/// Owns the set of instrumented frames.
///
/// A frame counts as hooked once at least one observer is installed, and
/// membership is then permanent: the host never destroys frames. Observers
/// the host refused are retried by later calls to [`HookManager::instrument`].
#[derive(Debug)]
pub struct HookManager {
    frames: HashMap<FrameId, FrameState>,
    suppress_edge: bool,
}

impl HookManager {
    pub fn new(suppress_edge: bool) -> Self {
        Self {
            frames: HashMap::new(),
            suppress_edge,
        }
    }

    pub fn is_hooked(&self, frame: FrameId) -> bool {
        self.frames.contains_key(&frame)
    }

    pub fn hooked_count(&self) -> usize {
        self.frames.len()
    }

    /// Subscribe to every supported frame operation not yet installed.
    /// Returns true when the frame became hooked by this call.
    pub fn instrument<U: UiApi + ?Sized>(&mut self, ui: &mut U, frame: FrameId) -> bool {
        let was_hooked = self.is_hooked(frame);
        let mut installed = self
            .frames
            .get(&frame)
            .map(|state| state.installed.clone())
            .unwrap_or_default();
        let before = installed.len();

        for hook in FrameHook::ALL {
            if installed.contains(&hook) || !ui.supports_hook(frame, hook) {
                continue;
            }
            if guarded("subscribe", ui.subscribe(frame, hook)).is_some() {
                installed.push(hook);
            }
        }

        if installed.len() == before {
            return false;
        }
        tracing::debug!(
            frame = frame.0,
            installed = installed.len(),
            "instrumented cooldown frame"
        );
        self.frames.entry(frame).or_default().installed = installed;
        !was_hooked
    }

    /// Observer for "set cooldown" and "set cooldown from duration".
    ///
    /// Returns `None` for frames that were never instrumented.
    pub fn on_cooldown_set<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        classifier: &mut Classifier,
        frame: FrameId,
        event: &CooldownEvent,
    ) -> Option<Verdict> {
        if !self.is_hooked(frame) {
            return None;
        }
        let verdict = classifier.classify(&*host, event);
        if verdict.is_hide() {
            self.apply_suppression(host, frame);
        }
        Some(verdict)
    }

    /// Force the sweep (and edge, if configured) off. Safe to repeat.
    pub fn apply_suppression<U: UiApi + ?Sized>(&mut self, ui: &mut U, frame: FrameId) -> bool {
        if !self.is_hooked(frame) {
            return false;
        }
        DrawFlag::Swipe.write(ui, frame, false);
        if self.suppress_edge {
            DrawFlag::Edge.write(ui, frame, false);
        }
        true
    }

    /// Observer for "set draw swipe" / "set draw edge".
    ///
    /// Only "shown" writes are looked at, which also skips the echoes of our
    /// own forced writes. Returns the verdict when the frame's cooldown was
    /// re-classified; a `Hide` verdict means the write was reverted.
    pub fn on_flag_set<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        classifier: &mut Classifier,
        frame: FrameId,
        flag: DrawFlag,
        shown: bool,
    ) -> Option<Verdict> {
        if !shown || !self.is_hooked(frame) {
            return None;
        }
        if flag == DrawFlag::Edge && !self.suppress_edge {
            return None;
        }

        let event = guarded("frame_cooldown", host.frame_cooldown(frame)).flatten()?;
        let verdict = classifier.classify(&*host, &event);
        if verdict.is_hide() {
            tracing::trace!(frame = frame.0, ?flag, "reverting host re-enable");
            flag.write(host, frame, false);
        }
        Some(verdict)
    }
}
