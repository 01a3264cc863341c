//! Scripted host for unit tests
//!
//! Every query answers from a table the test fills in. Evaluating a duration
//! handle against a step curve yields a redacted scalar above the step and a
//! plain zero otherwise, like the live client during restricted play. Writes,
//! subscriptions and timers are recorded for assertions.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

use crate::event::CooldownEvent;
use crate::host::{
    AbilityId, ChargeInfo, CooldownInfo, CurveApi, CurveHandle, CurvePoint, DurationHandle,
    ElementId, FrameHook, FrameId, HostError, SpellApi, UiApi, ViewerId,
};
use crate::secret::Secret;
use crate::signals::ScheduledTask;

/// Which draw flag a recorded write touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Swipe,
    Edge,
}

#[derive(Debug)]
pub struct FakeHost {
    // Spell queries
    pub cooldowns: HashMap<AbilityId, CooldownInfo>,
    pub charges: HashMap<AbilityId, ChargeInfo>,
    pub recharge_handles: HashMap<AbilityId, DurationHandle>,
    pub cooldown_handles: HashMap<AbilityId, DurationHandle>,
    pub baseline: Option<Secret<f64>>,
    pub known_abilities: Option<Vec<AbilityId>>,

    // Curve primitives
    pub durations: HashMap<DurationHandle, f64>,
    pub curve_build_fails: bool,
    pub curve_evaluation: bool,
    curves: RefCell<Vec<Vec<CurvePoint>>>,
    builds: Cell<usize>,
    next_handle: u64,

    // Widgets
    pub duration_hook_supported: bool,
    pub subscribe_fails: bool,
    pub subscriptions: Vec<(FrameId, FrameHook)>,
    pub frame_cooldowns: HashMap<FrameId, CooldownEvent>,
    pub swipe: HashMap<FrameId, bool>,
    pub edge: HashMap<FrameId, bool>,
    pub writes: Vec<(FrameId, Flag, bool)>,
    pub viewers: Vec<ViewerId>,
    pub viewer_children: HashMap<ViewerId, Vec<ElementId>>,
    pub element_children: HashMap<ElementId, Vec<ElementId>>,
    pub element_frames: HashMap<ElementId, FrameId>,
    pub element_abilities: HashMap<ElementId, Secret<AbilityId>>,
    pub watch_supported: bool,
    pub watched: Vec<ViewerId>,
    pub timers_supported: bool,
    pub scheduled: Vec<(Duration, ScheduledTask)>,
}

impl FakeHost {
    /// Host with working curve primitives, timers and watches, and no data.
    pub fn new() -> Self {
        Self {
            cooldowns: HashMap::new(),
            charges: HashMap::new(),
            recharge_handles: HashMap::new(),
            cooldown_handles: HashMap::new(),
            baseline: None,
            known_abilities: None,
            durations: HashMap::new(),
            curve_build_fails: false,
            curve_evaluation: true,
            curves: RefCell::new(Vec::new()),
            builds: Cell::new(0),
            next_handle: 1,
            duration_hook_supported: false,
            subscribe_fails: false,
            subscriptions: Vec::new(),
            frame_cooldowns: HashMap::new(),
            swipe: HashMap::new(),
            edge: HashMap::new(),
            writes: Vec::new(),
            viewers: Vec::new(),
            viewer_children: HashMap::new(),
            element_children: HashMap::new(),
            element_frames: HashMap::new(),
            element_abilities: HashMap::new(),
            watch_supported: true,
            watched: Vec::new(),
            timers_supported: true,
            scheduled: Vec::new(),
        }
    }

    /// Register a redacted duration and return its handle.
    pub fn add_duration(&mut self, secs: f64) -> DurationHandle {
        let handle = DurationHandle(self.next_handle);
        self.next_handle += 1;
        self.durations.insert(handle, secs);
        handle
    }

    pub fn set_charges(&mut self, ability: AbilityId, current: Secret<u32>, maximum: Secret<u32>) {
        self.charges.insert(ability, ChargeInfo { current, maximum });
    }

    pub fn set_cooldown(
        &mut self,
        ability: AbilityId,
        is_on_gcd: Option<Secret<bool>>,
        duration: Option<Secret<f64>>,
    ) {
        self.cooldowns.insert(ability, CooldownInfo { is_on_gcd, duration });
    }

    pub fn curve_builds(&self) -> usize {
        self.builds.get()
    }

    /// Add an icon element with a cooldown frame under `viewer`.
    pub fn add_icon(
        &mut self,
        viewer: ViewerId,
        element: ElementId,
        frame: FrameId,
        ability: Option<Secret<AbilityId>>,
    ) {
        if !self.viewers.contains(&viewer) {
            self.viewers.push(viewer);
        }
        self.viewer_children.entry(viewer).or_default().push(element);
        self.element_frames.insert(element, frame);
        if let Some(ability) = ability {
            self.element_abilities.insert(element, ability);
        }
    }

    pub fn take_scheduled(&mut self) -> Vec<(Duration, ScheduledTask)> {
        std::mem::take(&mut self.scheduled)
    }

    pub fn swipe_shown(&self, frame: FrameId) -> Option<bool> {
        self.swipe.get(&frame).copied()
    }

    pub fn edge_shown(&self, frame: FrameId) -> Option<bool> {
        self.edge.get(&frame).copied()
    }

    pub fn hooks_for(&self, frame: FrameId) -> Vec<FrameHook> {
        self.subscriptions
            .iter()
            .filter(|(f, _)| *f == frame)
            .map(|(_, hook)| *hook)
            .collect()
    }
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

fn step_value(points: &[CurvePoint], x: f64) -> f64 {
    points
        .iter()
        .filter(|p| p.x <= x)
        .last()
        .map(|p| p.y)
        .unwrap_or(0.0)
}

impl SpellApi for FakeHost {
    fn cooldown_info(&self, ability: AbilityId) -> Result<CooldownInfo, HostError> {
        Ok(self.cooldowns.get(&ability).copied().unwrap_or_default())
    }

    fn charge_info(&self, ability: AbilityId) -> Result<Option<ChargeInfo>, HostError> {
        Ok(self.charges.get(&ability).copied())
    }

    fn recharge_duration(&self, ability: AbilityId) -> Result<Option<DurationHandle>, HostError> {
        Ok(self.recharge_handles.get(&ability).copied())
    }

    fn cooldown_duration(&self, ability: AbilityId) -> Result<Option<DurationHandle>, HostError> {
        Ok(self.cooldown_handles.get(&ability).copied())
    }

    fn gcd_baseline(&self) -> Result<Secret<f64>, HostError> {
        self.baseline
            .ok_or_else(|| HostError::unsupported("gcd_baseline"))
    }

    fn known_abilities(&self) -> Result<Vec<AbilityId>, HostError> {
        self.known_abilities
            .clone()
            .ok_or_else(|| HostError::unsupported("known_abilities"))
    }
}

impl CurveApi for FakeHost {
    fn create_step_curve(&self, points: &[CurvePoint]) -> Result<CurveHandle, HostError> {
        self.builds.set(self.builds.get() + 1);
        if self.curve_build_fails {
            return Err(HostError::failed("create_step_curve", "curve rejected"));
        }
        let mut curves = self.curves.borrow_mut();
        curves.push(points.to_vec());
        Ok(CurveHandle(curves.len() as u64 - 1))
    }

    fn evaluate_curve(
        &self,
        duration: DurationHandle,
        curve: CurveHandle,
    ) -> Result<Secret<f64>, HostError> {
        if !self.curve_evaluation {
            return Err(HostError::unsupported("evaluate_curve"));
        }
        let secs = *self
            .durations
            .get(&duration)
            .ok_or_else(|| HostError::failed("evaluate_curve", "stale duration handle"))?;
        let curves = self.curves.borrow();
        let points = curves
            .get(curve.0 as usize)
            .ok_or_else(|| HostError::failed("evaluate_curve", "unknown curve"))?;
        if step_value(points, secs) > 0.0 {
            Ok(Secret::redacted())
        } else {
            Ok(Secret::Plain(0.0))
        }
    }

    fn redact_if_nonzero(&self, value: Secret<f64>) -> Result<Secret<Option<f64>>, HostError> {
        Ok(match value.get() {
            Some(v) if v == 0.0 => Secret::Plain(None),
            _ => Secret::redacted(),
        })
    }
}

impl UiApi for FakeHost {
    fn supports_hook(&self, _frame: FrameId, hook: FrameHook) -> bool {
        hook != FrameHook::SetCooldownFromDuration || self.duration_hook_supported
    }

    fn subscribe(&mut self, frame: FrameId, hook: FrameHook) -> Result<(), HostError> {
        if self.subscribe_fails {
            return Err(HostError::failed("subscribe", "frame not ready"));
        }
        self.subscriptions.push((frame, hook));
        Ok(())
    }

    fn set_draw_swipe(&mut self, frame: FrameId, shown: bool) -> Result<(), HostError> {
        self.swipe.insert(frame, shown);
        self.writes.push((frame, Flag::Swipe, shown));
        Ok(())
    }

    fn set_draw_edge(&mut self, frame: FrameId, shown: bool) -> Result<(), HostError> {
        self.edge.insert(frame, shown);
        self.writes.push((frame, Flag::Edge, shown));
        Ok(())
    }

    fn frame_cooldown(&self, frame: FrameId) -> Result<Option<CooldownEvent>, HostError> {
        Ok(self.frame_cooldowns.get(&frame).copied())
    }

    fn tracked_viewers(&self) -> Result<Vec<ViewerId>, HostError> {
        Ok(self.viewers.clone())
    }

    fn viewer_children(&self, viewer: ViewerId) -> Result<Vec<ElementId>, HostError> {
        Ok(self.viewer_children.get(&viewer).cloned().unwrap_or_default())
    }

    fn element_children(&self, element: ElementId) -> Result<Vec<ElementId>, HostError> {
        Ok(self.element_children.get(&element).cloned().unwrap_or_default())
    }

    fn element_cooldown_frame(&self, element: ElementId) -> Result<Option<FrameId>, HostError> {
        Ok(self.element_frames.get(&element).copied())
    }

    fn element_ability(&self, element: ElementId) -> Result<Option<Secret<AbilityId>>, HostError> {
        Ok(self.element_abilities.get(&element).copied())
    }

    fn watch_viewer_shown(&mut self, viewer: ViewerId) -> Result<(), HostError> {
        if !self.watch_supported {
            return Err(HostError::unsupported("watch_viewer_shown"));
        }
        self.watched.push(viewer);
        Ok(())
    }

    fn schedule(&mut self, delay: Duration, task: ScheduledTask) -> Result<(), HostError> {
        if !self.timers_supported {
            return Err(HostError::unsupported("schedule"));
        }
        self.scheduled.push((delay, task));
        Ok(())
    }
}
