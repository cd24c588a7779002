//! Session controller
//!
//! Owns the session state and its collaborators: a seeded RNG, a timer
//! scheduler, the celebration effect and (optionally) a viewport
//! subscription. Every public mutator funnels one event through
//! `transition::step` and then carries out the returned effects.

use std::cell::Cell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::scheduler::{ManualScheduler, Scheduler};
use super::state::{Guess, GuessField, Phase, SessionState, SessionStats, TimerId};
use super::transition::{Effect, SessionEvent, step};
use crate::celebration::Celebration;
use crate::fraction::FractionSpec;
use crate::layout::{LayoutResult, compute_layout};
use crate::settings::Settings;
use crate::shape::Shape;
use crate::viewport::{DEFAULT_VIEWPORT_WIDTH, ScalePolicy, Subscription, ViewportSizeProvider};

pub struct SessionController<S: Scheduler, C: Celebration> {
    state: SessionState,
    settings: Settings,
    rng: Pcg32,
    scheduler: S,
    celebration: C,
    /// Width to scale mapping; starts from the settings' breakpoints
    scale_policy: Box<dyn ScalePolicy>,
    /// Last width reported by the viewport provider
    viewport_width: Rc<Cell<f32>>,
    viewport_subscription: Option<Subscription>,
}

impl<S: Scheduler, C: Celebration> SessionController<S, C> {
    /// Start a session: shuffled shapes, first fraction rolled, prompt shown
    pub fn new(settings: Settings, scheduler: S, celebration: C, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = SessionState::new(&mut rng);
        log::info!(
            "Session started (seed {}): {} showing {}",
            seed,
            state.active_shape(),
            state.active_fraction
        );
        let scale_policy: Box<dyn ScalePolicy> = Box::new(settings.scale_policy.clone());
        Self {
            state,
            scale_policy,
            settings,
            rng,
            scheduler,
            celebration,
            viewport_width: Rc::new(Cell::new(DEFAULT_VIEWPORT_WIDTH)),
            viewport_subscription: None,
        }
    }

    /// Follow `provider`'s width until teardown; replaces any earlier provider
    pub fn attach_viewport(&mut self, provider: &dyn ViewportSizeProvider) {
        self.viewport_width.set(provider.current_width());
        let sink = Rc::clone(&self.viewport_width);
        self.viewport_subscription = Some(provider.subscribe(Box::new(move |width| {
            log::debug!("Viewport width now {}", width);
            sink.set(width);
        })));
    }

    /// Swap in a different width to scale mapping
    pub fn set_scale_policy(&mut self, policy: impl ScalePolicy + 'static) {
        self.scale_policy = Box::new(policy);
    }

    /// Toggle divider lines; takes effect on the next `layout`
    pub fn set_show_slice_lines(&mut self, show: bool) {
        self.settings.show_slice_lines = show;
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn active_shape(&self) -> Shape {
        self.state.active_shape()
    }

    pub fn active_fraction(&self) -> FractionSpec {
        self.state.active_fraction
    }

    pub fn user_guess(&self) -> Guess {
        self.state.user_guess
    }

    pub fn stats(&self) -> SessionStats {
        self.state.stats
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width.get()
    }

    pub fn is_torn_down(&self) -> bool {
        self.state.torn_down
    }

    /// Layout scale for the active shape at the current viewport width
    pub fn scale_factor(&self) -> f32 {
        self.scale_policy
            .scale_for(self.active_shape().family(), self.viewport_width.get())
    }

    /// Geometry for the active shape and target fraction
    pub fn layout(&self) -> LayoutResult {
        let shape = self.active_shape();
        let layout = compute_layout(
            shape,
            self.state.active_fraction,
            self.settings.shape_size,
            self.scale_factor(),
            &shape.default_colors(),
        );
        if self.settings.show_slice_lines {
            layout
        } else {
            layout.without_dividers()
        }
    }

    /// Question shown above the shape
    pub fn prompt(&self) -> String {
        let shape = self.active_shape();
        format!("What fraction of the {} has {}?", shape, shape.topping_name())
    }

    pub fn submit(&mut self, guess: Guess) {
        self.dispatch(SessionEvent::Submit(guess));
    }

    /// Submit whatever the guess inputs currently hold
    pub fn submit_current_guess(&mut self) {
        self.submit(self.state.user_guess);
    }

    pub fn adjust_guess(&mut self, field: GuessField, delta: i32) {
        self.dispatch(SessionEvent::AdjustGuess { field, delta });
    }

    /// Deliver a timer firing; stale or post-teardown timers are absorbed
    pub fn fire(&mut self, id: TimerId) {
        self.dispatch(SessionEvent::TimerFired(id));
    }

    /// Cancel the pending timer and release the viewport subscription
    pub fn teardown(&mut self) {
        if self.state.torn_down {
            return;
        }
        self.dispatch(SessionEvent::Teardown);
        self.viewport_subscription = None;
    }

    fn dispatch(&mut self, event: SessionEvent) {
        let effects = step(&mut self.state, event, &self.settings, &mut self.rng);
        for effect in effects {
            match effect {
                Effect::Schedule { id, delay_ms } => self.scheduler.schedule(id, delay_ms),
                Effect::Cancel(id) => self.scheduler.cancel(id),
                Effect::Celebrate(burst) => self.celebration.celebrate(&burst),
            }
        }
    }
}

impl<C: Celebration> SessionController<ManualScheduler, C> {
    /// Advance the virtual clock and fire every timer that came due
    pub fn advance_clock(&mut self, ms: u64) {
        for id in self.scheduler.advance(ms) {
            self.fire(id);
        }
    }
}

impl<S: Scheduler, C: Celebration> Drop for SessionController<S, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celebration::{ConfettiBurst, NoCelebration};
    use crate::shape::PlacementFamily;
    use crate::viewport::SharedViewport;
    use std::collections::BTreeSet;

    type TestController = SessionController<ManualScheduler, NoCelebration>;

    fn controller(seed: u64) -> TestController {
        SessionController::new(Settings::default(), ManualScheduler::new(), NoCelebration, seed)
    }

    fn wrong_guess(c: &TestController) -> Guess {
        let target = c.active_fraction();
        FractionSpec::new(target.numerator, target.denominator + 1)
    }

    fn win_round(c: &mut TestController) {
        c.submit(c.active_fraction());
        c.advance_clock(c.settings().celebrate_delay_ms as u64);
    }

    #[test]
    fn test_correct_answer_flow() {
        let mut c = controller(12345);
        let first_shape = c.active_shape();
        c.submit(c.active_fraction());
        assert_eq!(c.phase(), Phase::Celebrate);

        c.advance_clock(2999);
        assert_eq!(c.phase(), Phase::Celebrate);
        assert_eq!(c.state().sequence_index, 0);

        c.advance_clock(1);
        assert_eq!(c.phase(), Phase::Prompt);
        assert_eq!(c.state().sequence_index, 1);
        assert_eq!(c.user_guess(), FractionSpec::new(1, 1));
        assert_eq!(c.state().shape_sequence[0], first_shape);
        assert!(c.active_shape().denominator_domain().admits(c.active_fraction()));
    }

    #[test]
    fn test_wrong_answer_flow() {
        let mut c = controller(42);
        let target = c.active_fraction();
        c.submit(wrong_guess(&c));
        assert_eq!(c.phase(), Phase::ShakeFeedback);

        c.advance_clock(500);
        assert_eq!(c.phase(), Phase::Prompt);
        assert_eq!(c.active_fraction(), target);
        assert_eq!(c.state().sequence_index, 0);
        assert_eq!(c.stats().wrong_attempts, 1);
    }

    #[test]
    fn test_shake_then_quick_correct_answer() {
        let mut c = controller(9);
        c.submit(wrong_guess(&c));
        c.advance_clock(200);
        c.submit(c.active_fraction());
        assert_eq!(c.scheduler().pending_count(), 1);

        // The cancelled shake timer would have fired here
        c.advance_clock(300);
        assert_eq!(c.phase(), Phase::Celebrate);

        c.advance_clock(2700);
        assert_eq!(c.phase(), Phase::Prompt);
        assert_eq!(c.stats().rounds_completed, 1);
    }

    #[test]
    fn test_adjust_then_submit_current_guess() {
        let mut c = controller(77);
        let target = c.active_fraction();
        for _ in 1..target.numerator {
            c.adjust_guess(GuessField::Numerator, 1);
        }
        for _ in 1..target.denominator {
            c.adjust_guess(GuessField::Denominator, 1);
        }
        assert_eq!(c.user_guess(), target);
        c.submit_current_guess();
        assert_eq!(c.phase(), Phase::Celebrate);
    }

    #[test]
    fn test_shuffle_coverage_across_sequences() {
        let mut c = controller(2024);
        let n = Shape::ALL.len();
        for pass in 0..3 {
            let mut seen = BTreeSet::new();
            for i in 0..n {
                assert_eq!(c.state().sequence_index, i);
                seen.insert(c.active_shape());
                win_round(&mut c);
            }
            assert_eq!(seen.len(), n, "pass {pass} skipped a shape");
            assert_eq!(c.state().sequence_index, 0);
        }
        assert_eq!(c.stats().sequences_completed, 3);
    }

    #[test]
    fn test_celebration_collaborator_is_called() {
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let mut c = SessionController::new(
            Settings::default(),
            ManualScheduler::new(),
            move |burst: &ConfettiBurst| {
                assert_eq!(burst.particle_count, 100);
                counter.set(counter.get() + 1);
            },
            5,
        );
        let wrong = {
            let t = c.active_fraction();
            FractionSpec::new(t.numerator, t.denominator + 1)
        };
        c.submit(wrong);
        assert_eq!(fired.get(), 0);
        c.submit(c.active_fraction());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_viewport_drives_scale() {
        let viewport = SharedViewport::new(1200.0);
        let mut c = controller(31);
        c.attach_viewport(&viewport);
        assert_eq!(c.scale_factor(), 1.0);

        viewport.set_width(340.0);
        let expected = match c.active_shape().family() {
            PlacementFamily::Radial => 0.75,
            PlacementFamily::Grid => 0.5,
        };
        assert_eq!(c.scale_factor(), expected);
        let layout = c.layout();
        assert!((layout.width - 180.0 * expected).abs() < 1e-4);
    }

    struct FixedScale(f32);

    impl ScalePolicy for FixedScale {
        fn scale_for(&self, _family: PlacementFamily, _width: f32) -> f32 {
            self.0
        }
    }

    #[test]
    fn test_custom_scale_policy() {
        let viewport = SharedViewport::new(1200.0);
        let mut c = controller(31);
        c.attach_viewport(&viewport);
        c.set_scale_policy(FixedScale(0.6));
        assert_eq!(c.scale_factor(), 0.6);

        viewport.set_width(300.0);
        assert_eq!(c.scale_factor(), 0.6);
        assert!((c.layout().width - 180.0 * 0.6).abs() < 1e-4);
    }

    #[test]
    fn test_toggle_slice_lines_at_runtime() {
        let mut c = controller(64);
        assert!(!c.layout().dividers.is_empty());
        c.set_show_slice_lines(false);
        assert!(c.layout().dividers.is_empty());
        assert!(!c.settings().show_slice_lines);
    }

    #[test]
    fn test_teardown_releases_everything() {
        let viewport = SharedViewport::new(800.0);
        let mut c = controller(3);
        c.attach_viewport(&viewport);
        assert_eq!(viewport.listener_count(), 1);

        c.submit(c.active_fraction());
        assert_eq!(c.scheduler().pending_count(), 1);
        c.teardown();
        assert_eq!(c.scheduler().pending_count(), 0);
        assert_eq!(viewport.listener_count(), 0);

        // Late firings and input after teardown are absorbed
        let snapshot = c.state().clone();
        c.fire(TimerId(1));
        c.submit(snapshot.active_fraction);
        c.advance_clock(10_000);
        assert_eq!(c.state(), &snapshot);
    }

    #[test]
    fn test_drop_releases_viewport() {
        let viewport = SharedViewport::new(800.0);
        {
            let mut c = controller(3);
            c.attach_viewport(&viewport);
        }
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn test_layout_matches_target() {
        let c = controller(64);
        let layout = c.layout();
        assert_eq!(layout.shape, c.active_shape());
        assert_eq!(layout.fraction, c.active_fraction());
        let per_part = c.active_shape().decorations_per_unit() as usize;
        assert_eq!(layout.decorations.len(), c.active_fraction().numerator as usize * per_part);
    }

    #[test]
    fn test_slice_lines_toggle() {
        let settings = Settings {
            show_slice_lines: false,
            ..Settings::default()
        };
        let c = SessionController::new(settings, ManualScheduler::new(), NoCelebration, 64);
        assert!(c.layout().dividers.is_empty());
    }

    #[test]
    fn test_prompt_names_shape_and_topping() {
        let c = controller(1);
        let prompt = c.prompt();
        assert!(prompt.contains(c.active_shape().as_str()));
        assert!(prompt.contains(c.active_shape().topping_name()));
    }
}
