//! Navigation state machine: guided tour, free exploration, manual
//! destination overrides and the dwell between tour stops.
//!
//! [`reduce`] is the whole transition table and stays pure. [`Navigator`]
//! owns the state, applies the reducer's [`DwellCommand`]s to the
//! [`DwellTimer`] and logs what happened.

mod dwell;
mod state;

pub use dwell::DwellTimer;
pub use state::{reduce, DwellCommand, Locale, NavAction, NavMode, NavigationState, Transition};

use log::{debug, info, warn};

use crate::islands::{IslandId, IslandRegistry};
use crate::params::NavigationParams;
use crate::vessel::{AutopilotTarget, MotionSignal};

/// Single writer of [`NavigationState`]
pub struct Navigator {
    registry: IslandRegistry,
    state: NavigationState,
    dwell: DwellTimer,
}

impl Navigator {
    pub fn new(registry: IslandRegistry, params: &NavigationParams) -> Self {
        Self {
            registry,
            state: NavigationState::default(),
            dwell: DwellTimer::new(params.dwell_delay_s),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn registry(&self) -> &IslandRegistry {
        &self.registry
    }

    pub fn dwell(&self) -> &DwellTimer {
        &self.dwell
    }

    /// Current autopilot destination with its position resolved
    pub fn autopilot_target(&self) -> Option<AutopilotTarget> {
        let id = self.state.autopilot_target?;
        let island = self.registry.get(id)?;
        Some(AutopilotTarget {
            id,
            position_xz: island.position_xz(),
        })
    }

    /// Apply an action at simulation time `now_s`
    pub fn dispatch(&mut self, action: NavAction, now_s: f64) {
        if let Some(id) = unknown_island(&self.registry, action) {
            warn!("Ignoring {action:?}: no island named '{id}'");
            return;
        }

        let Transition { state, dwell } = reduce(&self.state, action, &self.registry);
        self.log_transition(action, &state);
        self.state = state;

        match dwell {
            DwellCommand::Keep => {}
            DwellCommand::Arm => {
                self.dwell.arm(now_s);
                debug!(
                    "Dwell armed until t={:.2}s (epoch {})",
                    now_s + f64::from(self.dwell.delay_s()),
                    self.dwell.epoch()
                );
            }
            DwellCommand::Cancel => {
                if self.dwell.is_pending() {
                    debug!("Dwell cancelled");
                }
                self.dwell.cancel();
            }
        }
    }

    /// Translate a motion controller signal into navigation
    pub fn react(&mut self, signal: MotionSignal, now_s: f64) {
        let action = match signal {
            MotionSignal::Arrived(id) => NavAction::Arrived(id),
            MotionSignal::Interrupted => NavAction::Interrupted,
        };
        self.dispatch(action, now_s);
    }

    /// Fire the tour advance if its dwell has elapsed. Returns true if it did.
    pub fn poll(&mut self, now_s: f64) -> bool {
        if !self.dwell.poll(now_s) {
            return false;
        }
        self.dispatch(NavAction::AdvanceTour, now_s);
        true
    }

    fn log_transition(&self, action: NavAction, next: &NavigationState) {
        let prev = &self.state;
        if prev.mode != next.mode {
            info!("Navigation mode {:?} -> {:?}", prev.mode, next.mode);
        }
        if prev.autopilot_target != next.autopilot_target {
            match next.autopilot_target {
                Some(id) => info!("Autopilot heading for '{id}'"),
                None => debug!("Autopilot released"),
            }
        }
        match action {
            NavAction::Arrived(id) => info!("Arrived at '{id}'"),
            NavAction::Interrupted if prev.autopilot_target.is_some() => {
                info!("Manual input took the helm")
            }
            NavAction::AdvanceTour if next.mode == NavMode::Free && prev.mode == NavMode::Guided => {
                info!("Guided tour complete ({} islands)", self.registry.len())
            }
            _ => debug!("{action:?}"),
        }
    }
}

fn unknown_island(registry: &IslandRegistry, action: NavAction) -> Option<IslandId> {
    state::action_island(action).filter(|&id| !registry.contains(id))
}
