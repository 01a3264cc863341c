//! Suppressor: routes host signals to the scanner, hook manager and engine
//!
//! Owns all long-lived state (charge cache, hooked frames, watched viewers,
//! comparators), so a fresh `Suppressor` is a fresh process as far as the
//! suppression logic is concerned.
//!
//! Scans run on world entry, on restricted-state transitions and, debounced,
//! whenever the host reports new ability data or a viewer becoming visible.
//! While restricted, a fixed-period poll backs these up because the host may
//! create frames there without telling anyone.

use std::time::Duration;

use serde::Serialize;
use swipeguard_types::SuppressionConfig;

use crate::config;
use crate::diagnostics;
use crate::engine::Classifier;
use crate::event::{CooldownEvent, Verdict};
use crate::hooks::{DrawFlag, HookManager};
use crate::host::{FrameId, Host, guarded};
use crate::scanner::{ScanReport, ViewerScanner};
use crate::signals::{HostSignal, ScheduledTask, SignalHandler};

/// Running counters, for diagnostic dumps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuppressorStats {
    pub classified: u64,
    pub hidden: u64,
    /// Host re-enables that were switched back off
    pub reverted: u64,
    pub scans: u64,
}

#[derive(Debug)]
pub struct Suppressor {
    config: SuppressionConfig,
    classifier: Classifier,
    hooks: HookManager,
    scanner: ViewerScanner,
    restricted: bool,
    /// A settled scan timer is outstanding
    scan_pending: bool,
    /// A poll timer is outstanding
    polling: bool,
    stats: SuppressorStats,
}

impl Suppressor {
    /// Invalid durations in `config` fall back to their defaults.
    pub fn new(config: SuppressionConfig) -> Self {
        if config.diagnostics {
            diagnostics::init();
        }
        let config = config::sanitize(config);
        Self {
            classifier: Classifier::new(config.gcd_threshold_secs),
            hooks: HookManager::new(config.suppress_edge),
            scanner: ViewerScanner::new(),
            restricted: false,
            scan_pending: false,
            polling: false,
            stats: SuppressorStats::default(),
            config,
        }
    }

    pub fn config(&self) -> &SuppressionConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn hooks(&self) -> &HookManager {
        &self.hooks
    }

    pub fn scanner(&self) -> &ViewerScanner {
        &self.scanner
    }

    pub fn stats(&self) -> SuppressorStats {
        self.stats
    }

    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    pub fn is_polling(&self) -> bool {
        self.polling
    }

    pub fn is_scan_pending(&self) -> bool {
        self.scan_pending
    }

    /// Scan all viewers immediately.
    pub fn scan_now(&mut self, host: &mut dyn Host) -> ScanReport {
        self.stats.scans += 1;
        self.scanner
            .scan(host, &mut self.hooks, self.classifier.charges_mut())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Deferred work
    // ─────────────────────────────────────────────────────────────────────────

    /// Ask the host for a fire-once timer. False if it has none.
    fn defer(&self, host: &mut dyn Host, secs: f64, task: ScheduledTask) -> bool {
        let delay = Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO);
        guarded("schedule", host.schedule(delay, task)).is_some()
    }

    /// Bursts coalesce into the one outstanding settled scan.
    fn request_scan(&mut self, host: &mut dyn Host) {
        if self.scan_pending {
            return;
        }
        self.scan_pending = self.defer(host, self.config.scan_settle_secs, ScheduledTask::Scan);
        if !self.scan_pending {
            self.scan_now(host);
        }
    }

    fn request_prescan(&mut self, host: &mut dyn Host) {
        if !self.defer(host, self.config.prescan_delay_secs, ScheduledTask::ChargePrescan) {
            self.classifier.charges_mut().prescan(&*host);
        }
    }

    fn start_polling(&mut self, host: &mut dyn Host) {
        if self.polling {
            return;
        }
        self.polling = self.defer(host, self.config.restricted_poll_secs, ScheduledTask::Poll);
    }

    fn run_task(&mut self, host: &mut dyn Host, task: ScheduledTask) {
        match task {
            ScheduledTask::Scan => {
                self.scan_pending = false;
                self.scan_now(host);
            }
            ScheduledTask::ChargePrescan => {
                self.classifier.charges_mut().prescan(&*host);
            }
            ScheduledTask::Poll => {
                if !self.restricted {
                    // Chain ends at the first tick after leaving
                    self.polling = false;
                    return;
                }
                self.scan_now(host);
                self.polling =
                    self.defer(host, self.config.restricted_poll_secs, ScheduledTask::Poll);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame observers
    // ─────────────────────────────────────────────────────────────────────────

    fn count(&mut self, verdict: Verdict) {
        self.stats.classified += 1;
        if verdict.is_hide() {
            self.stats.hidden += 1;
        }
    }

    fn on_cooldown(&mut self, host: &mut dyn Host, frame: FrameId, event: &CooldownEvent) {
        if let Some(verdict) = self
            .hooks
            .on_cooldown_set(host, &mut self.classifier, frame, event)
        {
            self.count(verdict);
        }
    }

    fn on_flag(&mut self, host: &mut dyn Host, frame: FrameId, flag: DrawFlag, shown: bool) {
        let Some(verdict) = self
            .hooks
            .on_flag_set(host, &mut self.classifier, frame, flag, shown)
        else {
            return;
        };
        self.count(verdict);
        if verdict.is_hide() {
            self.stats.reverted += 1;
        }
    }
}

impl SignalHandler for Suppressor {
    fn handle_signal(&mut self, host: &mut dyn Host, signal: &HostSignal) {
        match signal {
            HostSignal::WorldEntered => {
                self.scan_now(host);
                self.request_prescan(host);
            }
            HostSignal::LoadoutChanged => {
                // A new loadout may put different abilities behind the same slots
                self.classifier.charges_mut().clear();
                self.request_prescan(host);
                self.request_scan(host);
            }
            HostSignal::RestrictedEntered => {
                self.restricted = true;
                self.scan_now(host);
                self.start_polling(host);
            }
            HostSignal::RestrictedLeft => {
                self.restricted = false;
                self.scan_now(host);
            }
            HostSignal::AbilityDataRefreshed | HostSignal::ViewerShown(_) => {
                self.request_scan(host);
            }
            HostSignal::TimerFired(task) => self.run_task(host, *task),
            HostSignal::CooldownSet { frame, event }
            | HostSignal::CooldownSetFromDuration { frame, event } => {
                self.on_cooldown(host, *frame, event);
            }
            HostSignal::SwipeSet { frame, shown } => {
                self.on_flag(host, *frame, DrawFlag::Swipe, *shown);
            }
            HostSignal::EdgeSet { frame, shown } => {
                self.on_flag(host, *frame, DrawFlag::Edge, *shown);
            }
        }
    }
}
