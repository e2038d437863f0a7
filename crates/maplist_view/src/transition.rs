//! Height transition controller
//!
//! Drives the map between its default height and full screen. Triggers can
//! come from a pull-gesture release, the close affordance, or the public
//! API - the pipeline is the same: fire the will-hook synchronously, run
//! the height animation (or jump, if not animated), then fire the did-hook
//! when the value lands. Re-entrant triggers while a transition is in
//! flight are dropped so no two height animations ever overlap.
//!
//! The elastic settle-back after an under-threshold pull release is a
//! separate spring-driven path: it returns to the state the widget already
//! occupies, so it runs without hooks and without touching the state
//! machine.

use std::sync::{Arc, Mutex, Weak};

use maplist_animation::{
    AnimationScheduler, Easing, Spring, SpringConfig, SpringId, Tween, TweenId,
};
use maplist_core::events::event_types::{COLLAPSE, EXPAND, SETTLED};
use maplist_core::fsm::{StateMachine, StateTransitions};

use crate::callbacks::CallbackSet;
use crate::config::PickerConfig;
use crate::parallax::ParallaxPhysics;
use crate::surfaces::Surfaces;

/// Interaction state of the picker
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PickerState {
    /// Map at its default height, list scrollable
    #[default]
    Default,
    /// Height animation toward full screen in flight
    Expanding,
    /// Map fills the container
    FullScreen,
    /// Height animation back toward the default in flight
    Collapsing,
}

impl StateTransitions for PickerState {
    fn on_event(&self, event: u32) -> Option<Self> {
        match (self, event) {
            (PickerState::Default, EXPAND) => Some(PickerState::Expanding),
            (PickerState::Expanding, SETTLED) => Some(PickerState::FullScreen),
            (PickerState::FullScreen, COLLAPSE) => Some(PickerState::Collapsing),
            (PickerState::Collapsing, SETTLED) => Some(PickerState::Default),
            _ => None,
        }
    }
}

/// Which terminal state a transition is headed for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Expand,
    Collapse,
}

/// Runs the expand/collapse pipeline and the elastic settle-back
pub struct TransitionController {
    machine: StateMachine<PickerState>,
    scheduler: Weak<Mutex<AnimationScheduler>>,
    tween: Option<TweenId>,
    settle: Option<SpringId>,
    duration_ms: u32,
    easing: Easing,
    settle_spring: SpringConfig,
}

impl TransitionController {
    pub fn new(scheduler: &Arc<Mutex<AnimationScheduler>>, config: &PickerConfig) -> Self {
        Self {
            machine: StateMachine::new(PickerState::Default),
            scheduler: Arc::downgrade(scheduler),
            tween: None,
            settle: None,
            duration_ms: config.transition_duration_ms,
            easing: config.transition_easing,
            settle_spring: config.settle_spring,
        }
    }

    pub fn state(&self) -> PickerState {
        self.machine.current()
    }

    /// A height animation toward a terminal state is in flight
    pub fn is_transitioning(&self) -> bool {
        matches!(
            self.machine.current(),
            PickerState::Expanding | PickerState::Collapsing
        )
    }

    /// The elastic snap-back spring is running
    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Scroll events may drive the map height right now. While an animation
    /// owns the height (transition or settle), or the map sits full screen,
    /// parallax updates are coalesced instead of applied.
    pub fn allows_parallax(&self) -> bool {
        self.machine.is_in(PickerState::Default) && self.settle.is_none()
    }

    /// Eased progress toward full screen (0.0 at default, 1.0 full screen).
    /// The close affordance's opacity reads this, so it fades in lockstep
    /// with the height animation.
    pub fn progress(&self) -> f32 {
        match self.machine.current() {
            PickerState::Default => 0.0,
            PickerState::FullScreen => 1.0,
            PickerState::Expanding => self.tween_progress().unwrap_or(1.0),
            PickerState::Collapsing => 1.0 - self.tween_progress().unwrap_or(1.0),
        }
    }

    fn tween_progress(&self) -> Option<f32> {
        let id = self.tween?;
        let scheduler = self.scheduler.upgrade()?;
        let scheduler = scheduler.lock().unwrap();
        let tween = scheduler.get_tween(id)?;
        Some(self.easing.apply(tween.progress()))
    }

    /// Trigger a transition. Returns false when the trigger is dropped:
    /// wrong state for it, or another transition already in flight.
    ///
    /// The will-hook fires synchronously before any animation frame. With
    /// `animated == false` the height jumps and both hooks fire
    /// back-to-back - callers must not assume a time gap between them.
    pub fn request(
        &mut self,
        trigger: Trigger,
        animated: bool,
        physics: &mut ParallaxPhysics,
        callbacks: &CallbackSet,
        surfaces: &mut Surfaces,
    ) -> bool {
        let event = match trigger {
            Trigger::Expand => EXPAND,
            Trigger::Collapse => COLLAPSE,
        };
        let before = self.machine.current();
        if self.machine.send(event) == before {
            tracing::debug!("transition {:?} dropped in state {:?}", trigger, before);
            return false;
        }

        // An explicit transition overrides the elastic return
        self.cancel_settle();

        match trigger {
            Trigger::Expand => callbacks.fire_will_expand(&surfaces.map),
            Trigger::Collapse => callbacks.fire_will_collapse(&surfaces.map),
        }

        let target = match trigger {
            Trigger::Expand => physics.container_height(),
            Trigger::Collapse => physics.default_height(),
        };

        if animated {
            if let Some(scheduler) = self.scheduler.upgrade() {
                let mut tween = Tween::new(physics.map_height(), target, self.duration_ms, self.easing);
                tween.start();
                if !tween.is_finished() {
                    self.tween = Some(scheduler.lock().unwrap().add_tween(tween));
                    tracing::debug!(
                        "transition {:?} started: {:.1} -> {:.1} over {}ms",
                        trigger,
                        physics.map_height(),
                        target,
                        self.duration_ms
                    );
                    return true;
                }
                // A zero-duration tween completes immediately; fall through
            }
        }

        physics.set_height(target);
        surfaces.apply(physics);
        self.finish(trigger, callbacks, surfaces);
        true
    }

    /// Start the elastic snap-back toward the default height after an
    /// under-threshold pull release. No hooks, no state change: the widget
    /// is already in its Default state, only the stretch returns.
    pub fn settle_to_default(&mut self, physics: &mut ParallaxPhysics, surfaces: &mut Surfaces) {
        if !self.machine.is_in(PickerState::Default) {
            return;
        }
        let target = physics.default_height();
        if physics.map_height() <= target {
            return;
        }
        // Don't restart an in-flight snap-back; resetting the spring causes
        // visible jitter
        if self.settle.is_some() {
            return;
        }

        if let Some(scheduler) = self.scheduler.upgrade() {
            let mut spring = Spring::new(self.settle_spring, physics.map_height());
            spring.set_target(target);
            self.settle = Some(scheduler.lock().unwrap().add_spring(spring));
            tracing::debug!("settle {:.1} -> {:.1}", physics.map_height(), target);
        } else {
            physics.set_height(target);
            surfaces.apply(physics);
        }
    }

    /// Pull the current animation values into the physics and layout.
    /// Call once per frame, after the scheduler tick. Returns true while
    /// an animation is still running.
    pub fn tick(
        &mut self,
        physics: &mut ParallaxPhysics,
        callbacks: &CallbackSet,
        surfaces: &mut Surfaces,
    ) -> bool {
        let mut active = false;

        if let Some(id) = self.tween {
            let trigger = if self.machine.is_in(PickerState::Expanding) {
                Trigger::Expand
            } else {
                Trigger::Collapse
            };

            let mut value = None;
            let mut done = false;
            if let Some(scheduler) = self.scheduler.upgrade() {
                let mut scheduler = scheduler.lock().unwrap();
                if let Some(tween) = scheduler.get_tween(id) {
                    value = Some(tween.value());
                    done = tween.is_finished();
                }
                if done {
                    scheduler.remove_tween(id);
                }
            }

            match value {
                Some(height) => {
                    physics.set_height(height);
                    surfaces.apply(physics);
                    if done {
                        self.tween = None;
                        self.finish(trigger, callbacks, surfaces);
                    } else {
                        active = true;
                    }
                }
                None => {
                    // The animation vanished (scheduler dropped); land on
                    // the terminal state instead of sticking mid-flight
                    self.tween = None;
                    let target = match trigger {
                        Trigger::Expand => physics.container_height(),
                        Trigger::Collapse => physics.default_height(),
                    };
                    physics.set_height(target);
                    surfaces.apply(physics);
                    self.finish(trigger, callbacks, surfaces);
                }
            }
        }

        if let Some(id) = self.settle {
            let mut value = None;
            let mut done = false;
            if let Some(scheduler) = self.scheduler.upgrade() {
                let mut scheduler = scheduler.lock().unwrap();
                if let Some(spring) = scheduler.get_spring(id) {
                    value = Some(spring.value());
                    done = spring.is_settled();
                }
                if done {
                    scheduler.remove_spring(id);
                }
            }

            match value {
                Some(height) => {
                    physics.set_height(height);
                    surfaces.apply(physics);
                    if done {
                        self.settle = None;
                    } else {
                        active = true;
                    }
                }
                None => self.settle = None,
            }
        }

        active
    }

    /// Land the state machine on the terminal state and fire the did-hook
    fn finish(&mut self, trigger: Trigger, callbacks: &CallbackSet, surfaces: &Surfaces) {
        let state = self.machine.send(SETTLED);
        tracing::debug!("transition {:?} finished in state {:?}", trigger, state);
        match trigger {
            Trigger::Expand => callbacks.fire_did_expand(&surfaces.map),
            Trigger::Collapse => callbacks.fire_did_collapse(&surfaces.map),
        }
    }

    fn cancel_settle(&mut self) {
        if let Some(id) = self.settle.take() {
            if let Some(scheduler) = self.scheduler.upgrade() {
                scheduler.lock().unwrap().remove_spring(id);
            }
        }
    }
}
