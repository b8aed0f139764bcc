//! Phased animation timelines.
//!
//! A [`Timeline`] is an ordered list of [`Phase`] descriptors over a shared
//! tick axis. Each tick, every phase whose `[start, end]` interval contains
//! the position receives its normalized progress; phases that have already
//! ended may register an exit effect that snaps their target to the final
//! state. Phases are plain data, so a timeline can be inspected and tested
//! without running it.
//!
//! ```ignore
//! let timeline = Timeline::<Scene>::new(34.0 * speed)
//!     .eased_phase(0.0, 9.0 * speed, easing.clone(), |scene, t| scene.recolor(t))
//!     .phase(18.0 * speed, 32.0 * speed, |scene, t| scene.bubbles(t))
//!     .on_exit(|scene| scene.bubbles_done());
//! ```

use super::interpolate::{is_between, normalize};
use super::timing::TimingFunction;
use crate::Millis;

type Effect<S> = Box<dyn Fn(&mut S, f32)>;
type ExitEffect<S> = Box<dyn Fn(&mut S)>;

/// A tick sub-interval with its own progress-driven effect.
pub struct Phase<S> {
    start: f32,
    end: f32,
    timing: TimingFunction,
    on_progress: Effect<S>,
    on_exit: Option<ExitEffect<S>>,
}

impl<S> Phase<S> {
    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    /// Whether the phase is live at `position` (inclusive on both ends).
    pub fn contains(&self, position: f32) -> bool {
        is_between(position, self.start, self.end)
    }

    /// Eased progress at `position`, clamped to `0..=1`.
    pub fn progress(&self, position: f32) -> f32 {
        self.timing
            .evaluate(normalize(position, self.start, self.end))
    }
}

/// Ordered phase descriptors sharing one tick axis.
pub struct Timeline<S> {
    duration: f32,
    phases: Vec<Phase<S>>,
}

impl<S> Timeline<S> {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            phases: Vec::new(),
        }
    }

    /// Register a phase that sees linear progress.
    pub fn phase<F>(self, start: f32, end: f32, on_progress: F) -> Self
    where
        F: Fn(&mut S, f32) + 'static,
    {
        self.eased_phase(start, end, TimingFunction::Linear, on_progress)
    }

    /// Register a phase whose progress is passed through `timing` first.
    pub fn eased_phase<F>(mut self, start: f32, end: f32, timing: TimingFunction, on_progress: F) -> Self
    where
        F: Fn(&mut S, f32) + 'static,
    {
        debug_assert!(start <= end, "phase start {} after end {}", start, end);
        self.phases.push(Phase {
            start,
            end,
            timing,
            on_progress: Box::new(on_progress),
            on_exit: None,
        });
        self
    }

    /// Attach an exit effect to the most recently registered phase. It runs on
    /// every tick whose position is past that phase's end.
    pub fn on_exit<F>(mut self, on_exit: F) -> Self
    where
        F: Fn(&mut S) + 'static,
    {
        match self.phases.last_mut() {
            Some(phase) => phase.on_exit = Some(Box::new(on_exit)),
            None => log::warn!("on_exit registered before any phase"),
        }
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn phases(&self) -> &[Phase<S>] {
        &self.phases
    }

    /// Progress of every phase at `position`, in registration order.
    pub fn progress_at(&self, position: f32) -> Vec<f32> {
        self.phases.iter().map(|p| p.progress(position)).collect()
    }

    /// Evaluate all phases at `position` against `state`.
    pub fn tick(&self, position: f32, state: &mut S) {
        for phase in &self.phases {
            if phase.contains(position) {
                (phase.on_progress)(state, phase.progress(position));
            } else if position > phase.end {
                if let Some(on_exit) = &phase.on_exit {
                    on_exit(state);
                }
            }
        }
    }

    /// Advance `run` to `now` and evaluate the phases at the new position.
    pub fn drive(&self, run: &mut AnimationRun, now: Millis, state: &mut S) -> RunStep {
        let step = run.advance(now);
        match step {
            RunStep::Running(position) | RunStep::Finished(position) => self.tick(position, state),
            RunStep::Idle => {}
        }
        step
    }
}

/// Outcome of advancing an [`AnimationRun`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunStep {
    /// The run is not active
    Idle,
    /// Still running at this tick position
    Running(f32),
    /// Reached its final tick on this step
    Finished(f32),
}

impl RunStep {
    pub fn is_finished(&self) -> bool {
        matches!(self, RunStep::Finished(_))
    }
}

/// One playback of a timeline, advanced by the external frame clock.
///
/// Ticks are milliseconds elapsed since [`AnimationRun::start`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRun {
    started_at: Millis,
    duration: f32,
    position: f32,
    running: bool,
}

impl AnimationRun {
    pub fn start(now: Millis, duration: f32) -> Self {
        Self {
            started_at: now,
            duration,
            position: 0.0,
            running: true,
        }
    }

    pub fn advance(&mut self, now: Millis) -> RunStep {
        if !self.running {
            return RunStep::Idle;
        }
        let elapsed = now.saturating_sub(self.started_at) as f32;
        self.position = elapsed.min(self.duration);
        if self.position >= self.duration {
            self.running = false;
            RunStep::Finished(self.position)
        } else {
            RunStep::Running(self.position)
        }
    }

    /// Stop the run and return the tick its visuals should snap to.
    pub fn cancel(&mut self) -> f32 {
        self.running = false;
        self.position = self.duration;
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        calls: Vec<(usize, f32)>,
        exits: Vec<usize>,
    }

    fn probe_timeline() -> Timeline<Probe> {
        Timeline::<Probe>::new(30.0)
            .phase(0.0, 10.0, |p: &mut Probe, t| p.calls.push((0, t)))
            .phase(5.0, 20.0, |p: &mut Probe, t| p.calls.push((1, t)))
            .on_exit(|p| p.exits.push(1))
            .phase(20.0, 30.0, |p: &mut Probe, t| p.calls.push((2, t)))
    }

    #[test]
    fn test_only_live_phases_are_invoked() {
        let timeline = probe_timeline();
        let mut probe = Probe::default();
        timeline.tick(7.5, &mut probe);
        assert_eq!(probe.calls, vec![(0, 0.75), (1, 2.5 / 15.0)]);
        assert!(probe.exits.is_empty());
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let timeline = probe_timeline();
        let mut probe = Probe::default();
        timeline.tick(20.0, &mut probe);
        assert_eq!(probe.calls, vec![(1, 1.0), (2, 0.0)]);
    }

    #[test]
    fn test_exit_runs_past_phase_end() {
        let timeline = probe_timeline();
        let mut probe = Probe::default();
        timeline.tick(25.0, &mut probe);
        assert_eq!(probe.exits, vec![1]);
        assert_eq!(probe.calls, vec![(2, 0.5)]);
    }

    #[test]
    fn test_progress_clamps_outside_all_phases() {
        let timeline = probe_timeline();
        assert!(timeline.progress_at(-1.0).iter().all(|&t| t == 0.0));
        assert!(timeline.progress_at(31.0).iter().all(|&t| t == 1.0));
    }

    #[test]
    fn test_progress_is_monotonic() {
        let timeline = probe_timeline();
        let mut previous = timeline.progress_at(0.0);
        for step in 1..=30 {
            let current = timeline.progress_at(step as f32);
            for (before, after) in previous.iter().zip(&current) {
                assert!(after >= before);
            }
            previous = current;
        }
    }

    #[test]
    fn test_eased_phase_transforms_progress() {
        let timeline = Timeline::<Probe>::new(10.0)
            .eased_phase(0.0, 10.0, TimingFunction::EaseIn, |p, t| p.calls.push((0, t)));
        let mut probe = Probe::default();
        timeline.tick(5.0, &mut probe);
        assert_eq!(probe.calls, vec![(0, 0.25)]);
    }

    #[test]
    fn test_run_finishes_once() {
        let mut run = AnimationRun::start(100, 50.0);
        assert_eq!(run.advance(120), RunStep::Running(20.0));
        assert_eq!(run.advance(160), RunStep::Finished(50.0));
        assert!(!run.is_running());
        assert_eq!(run.advance(170), RunStep::Idle);
    }

    #[test]
    fn test_cancel_snaps_to_end() {
        let mut run = AnimationRun::start(0, 50.0);
        run.advance(10);
        assert_eq!(run.cancel(), 50.0);
        assert_eq!(run.position(), 50.0);
        assert_eq!(run.advance(20), RunStep::Idle);
    }

    #[test]
    fn test_drive_ticks_state() {
        let timeline = probe_timeline();
        let mut probe = Probe::default();
        let mut run = AnimationRun::start(0, timeline.duration());
        let step = timeline.drive(&mut run, 40, &mut probe);
        assert!(step.is_finished());
        assert_eq!(probe.calls, vec![(2, 1.0)]);
        assert_eq!(probe.exits, vec![1]);
    }
}
