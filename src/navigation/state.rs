//! Navigation state and its pure reducer.

use std::collections::BTreeSet;

use crate::islands::{IslandId, IslandRegistry};

/// Who is steering the session, broadly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavMode {
    /// Welcome screen, nothing chosen yet
    #[default]
    Idle,
    /// Free exploration; the autopilot only runs on explicit requests
    Free,
    /// Guided tour through the islands in registry order
    Guided,
}

/// UI language. Only the flag lives here; strings are the UI's business.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub fn toggled(self) -> Self {
        match self {
            Self::Es => Self::En,
            Self::En => Self::Es,
        }
    }
}

/// Session navigation state.
///
/// Invariants held by [`reduce`]:
/// - `autopilot_target.is_some()` implies `mode != Idle`
/// - `tour_paused` implies `mode == Guided`
/// - every id in here is registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub mode: NavMode,
    pub show_welcome: bool,
    pub visited: BTreeSet<IslandId>,
    pub tour_index: usize,
    pub tour_paused: bool,
    pub active_island: Option<IslandId>,
    pub autopilot_target: Option<IslandId>,
    pub locale: Locale,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            mode: NavMode::Idle,
            show_welcome: true,
            visited: BTreeSet::new(),
            tour_index: 0,
            tour_paused: false,
            active_island: None,
            autopilot_target: None,
            locale: Locale::Es,
        }
    }
}

impl NavigationState {
    pub fn is_visited(&self, id: IslandId) -> bool {
        self.visited.contains(&id)
    }

    pub fn autopilot_active(&self) -> bool {
        self.autopilot_target.is_some()
    }
}

/// Inputs to the navigation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    StartGuidedTour,
    StartFreeExploration,
    /// Manual destination override, any mode
    NavigateTo(IslandId),
    MarkVisited(IslandId),
    /// Open (`Some`) or close (`None`) the island detail view
    SetActiveIsland(Option<IslandId>),
    /// From the motion controller
    Arrived(IslandId),
    /// Fired by the dwell timer
    AdvanceTour,
    /// From the motion controller
    Interrupted,
    SetTourPaused(bool),
    ToggleLocale,
}

/// What the dwell timer should do after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellCommand {
    /// Leave any pending advance alone
    Keep,
    /// Start (or restart) the dwell before the next tour stop
    Arm,
    /// Drop any pending advance
    Cancel,
}

/// Result of [`reduce`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: NavigationState,
    pub dwell: DwellCommand,
}

impl Transition {
    fn keep(state: NavigationState) -> Self {
        Self {
            state,
            dwell: DwellCommand::Keep,
        }
    }

    fn with(state: NavigationState, dwell: DwellCommand) -> Self {
        Self { state, dwell }
    }
}

/// Apply `action` to `state`.
///
/// Pure: no clock, no timer, no logging. Actions naming an island the
/// registry does not know are rejected as no-ops, so the state can never
/// point at a destination that does not exist.
pub fn reduce(state: &NavigationState, action: NavAction, registry: &IslandRegistry) -> Transition {
    let mut next = state.clone();

    if let Some(id) = action_island(action) {
        if !registry.contains(id) {
            return Transition::keep(next);
        }
    }

    match action {
        NavAction::StartGuidedTour => {
            next.mode = NavMode::Guided;
            next.show_welcome = false;
            next.tour_index = 0;
            next.tour_paused = false;
            next.autopilot_target = registry.tour_stop(0);
            next.active_island = None;
            Transition::with(next, DwellCommand::Cancel)
        }
        NavAction::StartFreeExploration => {
            next.mode = NavMode::Free;
            next.show_welcome = false;
            next.tour_paused = false;
            next.autopilot_target = None;
            next.active_island = None;
            Transition::with(next, DwellCommand::Cancel)
        }
        NavAction::NavigateTo(id) => {
            if next.mode == NavMode::Idle {
                next.mode = NavMode::Free;
                next.show_welcome = false;
            }
            next.autopilot_target = Some(id);
            next.active_island = None;
            next.tour_paused = false;
            Transition::with(next, DwellCommand::Cancel)
        }
        NavAction::MarkVisited(id) => {
            next.visited.insert(id);
            Transition::keep(next)
        }
        NavAction::SetActiveIsland(id) => {
            next.active_island = id;
            Transition::keep(next)
        }
        NavAction::Arrived(id) => {
            next.visited.insert(id);
            next.active_island = Some(id);
            next.autopilot_target = None;
            if next.mode == NavMode::Guided {
                next.tour_paused = true;
                Transition::with(next, DwellCommand::Arm)
            } else {
                Transition::with(next, DwellCommand::Cancel)
            }
        }
        NavAction::AdvanceTour => {
            if next.mode != NavMode::Guided {
                return Transition::keep(next);
            }
            next.tour_index += 1;
            next.tour_paused = false;
            next.active_island = None;
            match registry.tour_stop(next.tour_index) {
                Some(stop) => next.autopilot_target = Some(stop),
                None => {
                    next.mode = NavMode::Free;
                    next.autopilot_target = None;
                }
            }
            Transition::with(next, DwellCommand::Cancel)
        }
        NavAction::Interrupted => {
            next.autopilot_target = None;
            if next.mode == NavMode::Guided {
                next.mode = NavMode::Free;
            }
            next.tour_paused = false;
            Transition::with(next, DwellCommand::Cancel)
        }
        NavAction::SetTourPaused(paused) => {
            next.tour_paused = paused && next.mode == NavMode::Guided;
            Transition::keep(next)
        }
        NavAction::ToggleLocale => {
            next.locale = next.locale.toggled();
            Transition::keep(next)
        }
    }
}

/// The island an action refers to, if any
pub(crate) fn action_island(action: NavAction) -> Option<IslandId> {
    match action {
        NavAction::NavigateTo(id)
        | NavAction::MarkVisited(id)
        | NavAction::SetActiveIsland(Some(id))
        | NavAction::Arrived(id) => Some(id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn registry() -> IslandRegistry {
        IslandRegistry::default()
    }

    fn apply(state: &NavigationState, action: NavAction) -> NavigationState {
        reduce(state, action, &registry()).state
    }

    fn guided() -> NavigationState {
        apply(&NavigationState::default(), NavAction::StartGuidedTour)
    }

    const ABOUT: IslandId = IslandId("about");
    const SKILLS: IslandId = IslandId("skills");

    #[test]
    fn test_initial_state() {
        let state = NavigationState::default();
        assert_eq!(state.mode, NavMode::Idle);
        assert!(state.visited.is_empty());
        assert!(state.show_welcome);
        assert_eq!(state.autopilot_target, None);
    }

    #[test]
    fn test_guided_tour_targets_first_island() {
        let state = guided();
        assert_eq!(state.mode, NavMode::Guided);
        assert_eq!(state.tour_index, 0);
        assert_eq!(state.autopilot_target, Some(ABOUT));
        assert!(!state.show_welcome);
    }

    #[test]
    fn test_free_exploration_clears_target() {
        let state = apply(&guided(), NavAction::StartFreeExploration);
        assert_eq!(state.mode, NavMode::Free);
        assert_eq!(state.autopilot_target, None);
        assert!(!state.tour_paused);
    }

    #[test]
    fn test_arrival_in_guided_pauses_and_arms() {
        let t = reduce(&guided(), NavAction::Arrived(ABOUT), &registry());
        assert_eq!(t.dwell, DwellCommand::Arm);
        assert!(t.state.tour_paused);
        assert!(t.state.is_visited(ABOUT));
        assert_eq!(t.state.active_island, Some(ABOUT));
        assert_eq!(t.state.autopilot_target, None);
    }

    #[test]
    fn test_arrival_in_free_does_not_arm() {
        let free = apply(&NavigationState::default(), NavAction::StartFreeExploration);
        let free = apply(&free, NavAction::NavigateTo(SKILLS));
        let t = reduce(&free, NavAction::Arrived(SKILLS), &registry());
        assert_eq!(t.dwell, DwellCommand::Cancel);
        assert!(!t.state.tour_paused);
        assert_eq!(t.state.active_island, Some(SKILLS));
    }

    #[test]
    fn test_advance_moves_to_next_stop() {
        let paused = apply(&guided(), NavAction::Arrived(ABOUT));
        let state = apply(&paused, NavAction::AdvanceTour);
        assert_eq!(state.tour_index, 1);
        assert_eq!(state.autopilot_target, Some(SKILLS));
        assert!(!state.tour_paused);
        assert_eq!(state.active_island, None);
    }

    #[test]
    fn test_advance_past_last_stop_frees() {
        let mut state = guided();
        for stop in registry().iter().map(|i| i.id).collect::<Vec<_>>() {
            state = apply(&state, NavAction::Arrived(stop));
            state = apply(&state, NavAction::AdvanceTour);
        }
        assert_eq!(state.mode, NavMode::Free);
        assert_eq!(state.autopilot_target, None);
        assert_eq!(state.tour_index, registry().len());
        assert_eq!(state.visited.len(), registry().len());
    }

    #[test]
    fn test_advance_outside_guided_is_ignored() {
        let free = apply(&NavigationState::default(), NavAction::StartFreeExploration);
        let t = reduce(&free, NavAction::AdvanceTour, &registry());
        assert_eq!(t.state, free);
        assert_eq!(t.dwell, DwellCommand::Keep);
    }

    #[test]
    fn test_interrupt_degrades_guided_to_free() {
        let t = reduce(&guided(), NavAction::Interrupted, &registry());
        assert_eq!(t.state.mode, NavMode::Free);
        assert_eq!(t.state.autopilot_target, None);
        assert_eq!(t.dwell, DwellCommand::Cancel);
    }

    #[test]
    fn test_navigate_from_idle_promotes_to_free() {
        let state = apply(&NavigationState::default(), NavAction::NavigateTo(SKILLS));
        assert_eq!(state.mode, NavMode::Free);
        assert_eq!(state.autopilot_target, Some(SKILLS));
    }

    #[test]
    fn test_navigate_keeps_guided_mode() {
        let state = apply(&guided(), NavAction::NavigateTo(SKILLS));
        assert_eq!(state.mode, NavMode::Guided);
        assert_eq!(state.autopilot_target, Some(SKILLS));
    }

    #[rstest]
    #[case::navigate(NavAction::NavigateTo(IslandId("atlantis")))]
    #[case::visit(NavAction::MarkVisited(IslandId("atlantis")))]
    #[case::activate(NavAction::SetActiveIsland(Some(IslandId("atlantis"))))]
    #[case::arrive(NavAction::Arrived(IslandId("atlantis")))]
    fn unknown_islands_are_rejected(#[case] action: NavAction) {
        let before = guided();
        let t = reduce(&before, action, &registry());
        assert_eq!(t.state, before);
        assert_eq!(t.dwell, DwellCommand::Keep);
    }

    #[test]
    fn test_mark_visited_is_idempotent() {
        let once = apply(&NavigationState::default(), NavAction::MarkVisited(ABOUT));
        let twice = apply(&once, NavAction::MarkVisited(ABOUT));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_active_island_open_close() {
        let open = apply(&NavigationState::default(), NavAction::SetActiveIsland(Some(ABOUT)));
        assert_eq!(open.active_island, Some(ABOUT));
        let closed = apply(&open, NavAction::SetActiveIsland(None));
        assert_eq!(closed.active_island, None);
    }

    #[test]
    fn test_pause_only_in_guided() {
        let idle = apply(&NavigationState::default(), NavAction::SetTourPaused(true));
        assert!(!idle.tour_paused);
        let paused = apply(&guided(), NavAction::SetTourPaused(true));
        assert!(paused.tour_paused);
    }

    #[test]
    fn test_locale_toggles() {
        let state = apply(&NavigationState::default(), NavAction::ToggleLocale);
        assert_eq!(state.locale, Locale::En);
        assert_eq!(apply(&state, NavAction::ToggleLocale).locale, Locale::Es);
    }

    fn any_island() -> impl Strategy<Value = IslandId> {
        prop_oneof![
            Just(IslandId("about")),
            Just(IslandId("skills")),
            Just(IslandId("projects")),
            Just(IslandId("experience")),
            Just(IslandId("contact")),
            Just(IslandId("atlantis")),
        ]
    }

    fn any_action() -> impl Strategy<Value = NavAction> {
        prop_oneof![
            Just(NavAction::StartGuidedTour),
            Just(NavAction::StartFreeExploration),
            any_island().prop_map(NavAction::NavigateTo),
            any_island().prop_map(NavAction::MarkVisited),
            proptest::option::of(any_island()).prop_map(NavAction::SetActiveIsland),
            any_island().prop_map(NavAction::Arrived),
            Just(NavAction::AdvanceTour),
            Just(NavAction::Interrupted),
            any::<bool>().prop_map(NavAction::SetTourPaused),
            Just(NavAction::ToggleLocale),
        ]
    }

    proptest! {
        #[test]
        fn invariants_hold_for_any_action_sequence(
            actions in prop::collection::vec(any_action(), 0..64),
        ) {
            let registry = registry();
            let mut state = NavigationState::default();

            for action in actions {
                let Transition { state: next, dwell } = reduce(&state, action, &registry);

                if next.autopilot_target.is_some() {
                    prop_assert_ne!(next.mode, NavMode::Idle, "target while idle after {:?}", action);
                }
                if next.tour_paused {
                    prop_assert_eq!(next.mode, NavMode::Guided, "paused outside tour after {:?}", action);
                }
                if dwell == DwellCommand::Arm {
                    prop_assert_eq!(next.mode, NavMode::Guided);
                }
                let ids = next
                    .visited
                    .iter()
                    .copied()
                    .chain(next.active_island)
                    .chain(next.autopilot_target);
                for id in ids {
                    prop_assert!(registry.contains(id), "unregistered {} after {:?}", id, action);
                }
                prop_assert!(next.visited.is_superset(&state.visited), "visited shrank after {:?}", action);
                if state.mode != NavMode::Idle {
                    prop_assert_ne!(next.mode, NavMode::Idle);
                }

                state = next;
            }
        }
    }
}
