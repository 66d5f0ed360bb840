//! Selection controller - owns the selection, its layers and the pour state.
//!
//! Every change to the selection recomputes the whole layer stack right away.
//! The pour animation is a timed flag on top of that; it never delays or
//! alters the layout.

use std::time::Duration;

use bevy::prelude::{Resource, Timer, TimerMode};

use crate::error::{DensityError, Result};
use crate::resources::{Layer, Liquid};
use crate::simulation::layout::compute_layers;
use crate::simulation::notification::{CompletionNotice, NotificationSink};
use crate::simulation::ContainerConfig;

/// Most liquids the container accepts at once.
pub const MAX_SELECTION: usize = 7;

/// How long the pour animation runs after an add.
pub const POUR_DURATION: Duration = Duration::from_millis(1000);

/// Animation speed limits and slider step.
pub mod speed {
    pub const MIN: f32 = 0.1;
    pub const MAX: f32 = 3.0;
    pub const STEP: f32 = 0.1;
    pub const DEFAULT: f32 = 1.0;
}

/// Whether a pour animation is running.
#[derive(Clone, Debug, Default)]
enum PourState {
    #[default]
    Idle,
    Pouring(Timer),
}

/// Wave animation speed multiplier, kept inside [`speed::MIN`]..=[`speed::MAX`]
/// on a [`speed::STEP`] grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpeed(f32);

impl AnimationSpeed {
    pub fn new(value: f32) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        let snapped = (value.clamp(speed::MIN, speed::MAX) / speed::STEP).round() * speed::STEP;
        Self(snapped.clamp(speed::MIN, speed::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for AnimationSpeed {
    fn default() -> Self {
        Self(speed::DEFAULT)
    }
}

/// Session state behind the explorer.
#[derive(Resource)]
pub struct SelectionController {
    container: ContainerConfig,
    selection: Vec<Liquid>,
    layers: Vec<Layer>,
    pour: PourState,
    animation_speed: AnimationSpeed,
    /// Bumped on every layer recompute so views can tell when to rebuild.
    generation: u64,
    sink: Box<dyn NotificationSink>,
}

impl SelectionController {
    pub fn new(container: ContainerConfig, sink: Box<dyn NotificationSink>) -> Self {
        Self {
            container,
            selection: Vec::with_capacity(MAX_SELECTION),
            layers: Vec::new(),
            pour: PourState::Idle,
            animation_speed: AnimationSpeed::default(),
            generation: 0,
            sink,
        }
    }

    /// Pour a liquid into the container.
    ///
    /// Fails without touching any state when the liquid is already in the
    /// container or the container is full. An add during a running pour
    /// restarts the pour window.
    pub fn add_liquid(&mut self, liquid: &Liquid) -> Result<()> {
        if self.selection.iter().any(|held| held.same_as(liquid)) {
            return Err(DensityError::DuplicateSelection(liquid.name));
        }
        if self.is_full() {
            return Err(DensityError::CapacityExceeded { max: MAX_SELECTION });
        }

        self.selection.push(*liquid);
        self.recompute();
        self.pour = PourState::Pouring(Timer::new(POUR_DURATION, TimerMode::Once));
        self.announce();
        Ok(())
    }

    /// Remove the liquid with this name. Returns `false` if it was not there.
    pub fn remove_liquid(&mut self, name: &str) -> bool {
        let before = self.selection.len();
        self.selection.retain(|liquid| liquid.name != name);
        if self.selection.len() == before {
            return false;
        }

        self.recompute();
        self.announce();
        true
    }

    /// Empty the container and stop any pour.
    pub fn clear(&mut self) {
        self.selection.clear();
        self.pour = PourState::Idle;
        self.recompute();
    }

    /// Advance the pour timer. Returns `true` on the tick that ends the pour.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let PourState::Pouring(timer) = &mut self.pour else {
            return false;
        };
        if timer.tick(delta).finished() {
            self.pour = PourState::Idle;
            return true;
        }
        false
    }

    pub fn set_animation_speed(&mut self, value: f32) {
        self.animation_speed = AnimationSpeed::new(value);
    }

    pub fn nudge_animation_speed(&mut self, delta: f32) {
        self.set_animation_speed(self.animation_speed.get() + delta);
    }

    pub fn selection(&self) -> &[Liquid] {
        &self.selection
    }

    /// Layers bottom to top.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn container(&self) -> &ContainerConfig {
        &self.container
    }

    pub fn is_pouring(&self) -> bool {
        matches!(self.pour, PourState::Pouring(_))
    }

    pub fn animation_speed(&self) -> f32 {
        self.animation_speed.get()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn contains(&self, name: &str) -> bool {
        self.selection.iter().any(|liquid| liquid.name == name)
    }

    pub fn is_full(&self) -> bool {
        self.selection.len() >= MAX_SELECTION
    }

    fn recompute(&mut self) {
        self.layers = compute_layers(&self.selection, &self.container);
        self.generation += 1;
    }

    // Fires on every change that leaves liquid in the container, not just the first.
    fn announce(&self) {
        if !self.selection.is_empty() {
            self.sink.notify(&CompletionNotice::simulation_started());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::catalogue;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn controller() -> (SelectionController, Arc<AtomicUsize>) {
        let notices = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notices);
        let sink = move |_: &CompletionNotice| {
            counter.fetch_add(1, Ordering::SeqCst);
        };
        (
            SelectionController::new(ContainerConfig::default(), Box::new(sink)),
            notices,
        )
    }

    fn liquid(name: &str) -> &'static Liquid {
        catalogue::find(name).expect("catalogue liquid")
    }

    #[test]
    fn add_recomputes_and_starts_pour() {
        let (mut controller, notices) = controller();
        controller.add_liquid(liquid("Water")).unwrap();

        assert_eq!(controller.selection().len(), 1);
        assert_eq!(controller.layers().len(), 1);
        assert!(controller.is_pouring());
        assert_eq!(notices.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn duplicate_add_is_rejected_without_side_effects() {
        let (mut controller, notices) = controller();
        controller.add_liquid(liquid("Water")).unwrap();
        let generation = controller.generation();

        let err = controller.add_liquid(liquid("Water")).unwrap_err();
        assert_eq!(err, DensityError::DuplicateSelection("Water"));
        assert_eq!(controller.selection().len(), 1);
        assert_eq!(controller.generation(), generation);
        assert_eq!(notices.load(Ordering::SeqCst), 1);

        // Identity is the name, not the properties
        let relabelled = Liquid {
            density: 1025.0,
            ..*liquid("Water")
        };
        assert!(controller.add_liquid(&relabelled).is_err());
        assert_eq!(controller.generation(), generation);
    }

    #[test]
    fn capacity_caps_at_seven() {
        let (mut controller, _) = controller();
        for liquid in catalogue::all() {
            controller.add_liquid(liquid).unwrap();
        }
        assert!(controller.is_full());

        let extra = Liquid {
            name: "Seawater",
            density: 1025.0,
            ..*liquid("Water")
        };
        assert_eq!(
            controller.add_liquid(&extra),
            Err(DensityError::CapacityExceeded { max: MAX_SELECTION })
        );
        assert_eq!(controller.selection().len(), MAX_SELECTION);
    }

    #[test]
    fn removing_absent_liquid_changes_nothing() {
        let (mut controller, notices) = controller();
        controller.add_liquid(liquid("Honey")).unwrap();
        let layers = controller.layers().to_vec();
        let generation = controller.generation();

        assert!(!controller.remove_liquid("Mercury"));
        assert_eq!(controller.layers(), layers.as_slice());
        assert_eq!(controller.generation(), generation);
        assert_eq!(controller.selection().len(), 1);
        assert_eq!(notices.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn remove_restacks_without_pouring() {
        let (mut controller, notices) = controller();
        controller.add_liquid(liquid("Water")).unwrap();
        controller.add_liquid(liquid("Ethanol")).unwrap();
        controller.tick(POUR_DURATION);
        assert!(!controller.is_pouring());

        assert!(controller.remove_liquid("Water"));
        assert!(!controller.is_pouring());
        assert_eq!(controller.layers().len(), 1);
        assert_eq!(controller.layers()[0].liquid.name, "Ethanol");
        assert_eq!(notices.load(Ordering::SeqCst), 3);

        // Emptying the container is not announced
        assert!(controller.remove_liquid("Ethanol"));
        assert_eq!(notices.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn clear_empties_everything() {
        let (mut controller, notices) = controller();
        controller.add_liquid(liquid("Water")).unwrap();
        controller.add_liquid(liquid("Mercury")).unwrap();
        controller.clear();

        assert!(controller.selection().is_empty());
        assert!(controller.layers().is_empty());
        assert!(!controller.is_pouring());
        assert_eq!(notices.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn pour_ends_after_duration() {
        let (mut controller, _) = controller();
        controller.add_liquid(liquid("Water")).unwrap();

        assert!(!controller.tick(Duration::from_millis(600)));
        assert!(controller.is_pouring());
        assert!(controller.tick(Duration::from_millis(400)));
        assert!(!controller.is_pouring());
        assert!(!controller.tick(Duration::from_millis(400)));
    }

    #[test]
    fn add_during_pour_restarts_window() {
        let (mut controller, _) = controller();
        controller.add_liquid(liquid("Water")).unwrap();
        controller.tick(Duration::from_millis(800));
        controller.add_liquid(liquid("Honey")).unwrap();

        controller.tick(Duration::from_millis(800));
        assert!(controller.is_pouring());
        controller.tick(Duration::from_millis(200));
        assert!(!controller.is_pouring());
    }

    #[test]
    fn animation_speed_is_clamped_and_snapped() {
        let (mut controller, _) = controller();
        assert_eq!(controller.animation_speed(), 1.0);

        controller.set_animation_speed(5.0);
        assert_eq!(controller.animation_speed(), 3.0);
        controller.set_animation_speed(0.0);
        assert!((controller.animation_speed() - 0.1).abs() < 1e-6);
        controller.set_animation_speed(1.26);
        assert!((controller.animation_speed() - 1.3).abs() < 1e-6);
        controller.set_animation_speed(f32::NAN);
        assert_eq!(controller.animation_speed(), 1.0);

        controller.nudge_animation_speed(-0.1);
        assert!((controller.animation_speed() - 0.9).abs() < 1e-6);
    }
}
