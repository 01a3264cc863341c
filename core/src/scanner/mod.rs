//! Viewer discovery
//!
//! Walks the host's tracked-ability viewers, finds cooldown-capable icons
//! (one level of nested grouping deep) and hands each to the hook manager and
//! the charge tracker. Viewers are also subscribed for "became visible" so a
//! re-scan can be requested when the host repopulates them.

use hashbrown::HashSet;
use serde::Serialize;

use crate::engine::ChargeTracker;
use crate::hooks::HookManager;
use crate::host::{ElementId, Host, ViewerId, guarded};

/// Totals of one scan pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub viewers: usize,
    pub icons: usize,
    pub newly_hooked: usize,
    pub viewers_watched: usize,
}

#[derive(Debug, Default)]
pub struct ViewerScanner {
    /// Viewers whose visibility watch is wired up
    monitored: HashSet<ViewerId>,
}

impl ViewerScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_monitored(&self, viewer: ViewerId) -> bool {
        self.monitored.contains(&viewer)
    }

    pub fn scan<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        hooks: &mut HookManager,
        charges: &mut ChargeTracker,
    ) -> ScanReport {
        let mut report = ScanReport::default();
        let viewers = guarded("tracked_viewers", host.tracked_viewers()).unwrap_or_default();

        for viewer in viewers {
            report.viewers += 1;
            if self.monitor(host, viewer) {
                report.viewers_watched += 1;
            }

            let children = guarded("viewer_children", host.viewer_children(viewer)).unwrap_or_default();
            for element in children {
                if visit_icon(host, hooks, charges, element, &mut report) {
                    continue;
                }
                // Grouping element: look one level further
                let nested =
                    guarded("element_children", host.element_children(element)).unwrap_or_default();
                for child in nested {
                    visit_icon(host, hooks, charges, child, &mut report);
                }
            }
        }

        tracing::debug!(
            viewers = report.viewers,
            icons = report.icons,
            newly_hooked = report.newly_hooked,
            "viewer scan finished"
        );
        report
    }

    fn monitor<H: Host + ?Sized>(&mut self, host: &mut H, viewer: ViewerId) -> bool {
        if self.monitored.contains(&viewer) {
            return false;
        }
        if guarded("watch_viewer_shown", host.watch_viewer_shown(viewer)).is_none() {
            return false;
        }
        self.monitored.insert(viewer)
    }
}

/// Returns true if the element is a cooldown icon.
fn visit_icon<H: Host + ?Sized>(
    host: &mut H,
    hooks: &mut HookManager,
    charges: &mut ChargeTracker,
    element: ElementId,
    report: &mut ScanReport,
) -> bool {
    let Some(frame) = guarded("element_cooldown_frame", host.element_cooldown_frame(element)).flatten()
    else {
        return false;
    };

    report.icons += 1;
    if hooks.instrument(host, frame) {
        report.newly_hooked += 1;
    }

    let ability = guarded("element_ability", host.element_ability(element))
        .flatten()
        .and_then(|id| id.get());
    if let Some(ability) = ability {
        charges.observe(&*host, ability);
    }
    true
}
