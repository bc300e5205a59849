use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BOUNDARY_EPSILON_DEG, FULL_ROTATIONS_BASE, SPIN_DURATION_FAST_MS, SPIN_DURATION_NORMAL_MS,
    SPIN_DURATION_SLOW_MS,
};
use crate::outcome::{select_winning_index, SpinMode};
use crate::segment::{segment_midpoint_deg, Segment};
use crate::theme::Easing;

/// Spin animation speed presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinSpeed {
    Slow,
    Normal,
    Fast,
}

impl SpinSpeed {
    pub fn duration_ms(self) -> f64 {
        match self {
            SpinSpeed::Slow => SPIN_DURATION_SLOW_MS,
            SpinSpeed::Normal => SPIN_DURATION_NORMAL_MS,
            SpinSpeed::Fast => SPIN_DURATION_FAST_MS,
        }
    }
}

/// Rotation state owned by the animator and read by the renderer.
/// `rotation` is in degrees and only ever grows while the instance lives;
/// `reset` is the one idle-only exception.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WheelState {
    pub is_spinning: bool,
    pub rotation: f64,
    pub target_rotation: f64,
    pub current_segment: Option<Segment>,
}

/// Everything a spin request needs besides the rng.
#[derive(Debug)]
pub struct SpinRequest<'a> {
    pub segments: &'a [Segment],
    pub mode: SpinMode,
    pub win_probability: f64,
    pub duration_ms: f64,
    pub now_ms: f64,
}

/// Returned when a spin is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinStart {
    pub run_id: u64,
    pub winning_index: usize,
    pub duration_ms: f64,
}

/// Per-frame animation outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// The run id belongs to a superseded spin; the caller must drop its
    /// loop without touching anything.
    Stale,
    Animating { rotation: f64 },
    /// The spin just settled; carries the winning segment exactly once.
    Settled(Segment),
}

/// Owns the idle → spinning → idle state machine. All timestamps are
/// absolute milliseconds supplied by the caller, so the whole machine
/// runs under plain unit tests.
#[derive(Debug)]
pub struct SpinAnimator {
    state: WheelState,
    easing: Easing,
    disabled: bool,
    run_id: u64,
    start_time_ms: f64,
    start_rotation: f64,
    duration_ms: f64,
    pending: Option<Segment>,
}

impl Default for SpinAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinAnimator {
    pub fn new() -> Self {
        Self {
            state: WheelState::default(),
            easing: Easing::EaseOutCubic,
            disabled: false,
            run_id: 0,
            start_time_ms: 0.0,
            start_rotation: 0.0,
            duration_ms: SPIN_DURATION_NORMAL_MS,
            pending: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning
    }

    pub fn current_run_id(&self) -> u64 {
        self.run_id
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Starts a spin. Returns `None` — with no state change at all —
    /// while already spinning, while disabled, or for an empty segment
    /// list.
    pub fn spin<R: Rng + ?Sized>(
        &mut self,
        request: &SpinRequest<'_>,
        rng: &mut R,
    ) -> Option<SpinStart> {
        if self.state.is_spinning || self.disabled || request.segments.is_empty() {
            log::debug!(
                "spin rejected (spinning={}, disabled={}, segments={})",
                self.state.is_spinning,
                self.disabled,
                request.segments.len()
            );
            return None;
        }

        let winning_index =
            select_winning_index(request.segments, request.mode, request.win_probability, rng)?;
        let target = self.target_for(winning_index, request.segments.len());

        self.run_id += 1;
        self.start_time_ms = request.now_ms;
        self.start_rotation = self.state.rotation;
        self.duration_ms = request.duration_ms.max(1.0);
        self.pending = Some(request.segments[winning_index].clone());
        self.state.target_rotation = target;
        self.state.is_spinning = true;

        log::debug!(
            "spin accepted: run {} -> segment {} ({:.1}deg over {:.0}ms)",
            self.run_id,
            winning_index,
            target,
            self.duration_ms
        );
        Some(SpinStart {
            run_id: self.run_id,
            winning_index,
            duration_ms: self.duration_ms,
        })
    }

    /// Absolute rotation that parks the midpoint of `index` under the
    /// pointer: the current rotation, plus the base full turns, plus the
    /// smallest non-negative clockwise delta, minus the boundary epsilon.
    fn target_for(&self, index: usize, count: usize) -> f64 {
        let midpoint = segment_midpoint_deg(index, count);
        let aligned = (360.0 - midpoint).rem_euclid(360.0);
        let delta = (aligned - self.state.rotation.rem_euclid(360.0)).rem_euclid(360.0);
        self.state.rotation + FULL_ROTATIONS_BASE + delta - BOUNDARY_EPSILON_DEG
    }

    /// Advances the animation for `run_id` to `now_ms`. A frame callback
    /// from a superseded spin gets `Frame::Stale` and must stop.
    pub fn advance(&mut self, run_id: u64, now_ms: f64) -> Frame {
        if run_id != self.run_id || !self.state.is_spinning {
            return Frame::Stale;
        }
        let progress = ((now_ms - self.start_time_ms) / self.duration_ms).clamp(0.0, 1.0);
        let eased = self.easing.apply(progress);
        self.state.rotation =
            self.start_rotation + (self.state.target_rotation - self.start_rotation) * eased;
        if progress >= 1.0 {
            self.settle()
        } else {
            Frame::Animating {
                rotation: self.state.rotation,
            }
        }
    }

    /// Fallback-timer path: settles the spin if — and only if — it is
    /// still the active one. Safe to call after normal completion.
    pub fn force_settle(&mut self, run_id: u64) -> Option<Segment> {
        if run_id != self.run_id || !self.state.is_spinning {
            return None;
        }
        log::warn!("spin run {} settled by fallback timer", run_id);
        match self.settle() {
            Frame::Settled(segment) => Some(segment),
            _ => None,
        }
    }

    fn settle(&mut self) -> Frame {
        self.state.rotation = self.state.target_rotation;
        self.state.is_spinning = false;
        match self.pending.take() {
            Some(segment) => {
                self.state.current_segment = Some(segment.clone());
                Frame::Settled(segment)
            }
            None => Frame::Stale,
        }
    }

    /// Zeroes rotation and bookkeeping. No-op while spinning.
    pub fn reset(&mut self) {
        if self.state.is_spinning {
            return;
        }
        self.state = WheelState::default();
        self.start_time_ms = 0.0;
        self.start_rotation = 0.0;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BOUNDARY_EPSILON_DEG;
    use crate::segment::segment_midpoint_deg;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn segments(labels: &[&str]) -> Vec<Segment> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let mut seg = Segment::new(format!("seg-{i}"), *label);
                seg.probability = 25.0;
                seg
            })
            .collect()
    }

    fn request<'a>(segs: &'a [Segment], now_ms: f64) -> SpinRequest<'a> {
        SpinRequest {
            segments: segs,
            mode: SpinMode::Random,
            win_probability: 50.0,
            duration_ms: 6000.0,
            now_ms,
        }
    }

    /// Runs a spin to completion with regular frames, returning the
    /// settled segment and how many times `Settled` was produced.
    fn drive_to_completion(animator: &mut SpinAnimator, start: SpinStart, t0: f64) -> (Segment, usize) {
        let mut settled = None;
        let mut settled_count = 0;
        let mut t = t0;
        while t < t0 + start.duration_ms + 100.0 {
            t += 16.0;
            match animator.advance(start.run_id, t) {
                Frame::Settled(segment) => {
                    settled_count += 1;
                    settled = Some(segment);
                }
                Frame::Stale => break,
                Frame::Animating { .. } => {}
            }
        }
        (settled.expect("spin settled"), settled_count)
    }

    #[test]
    fn spin_settles_exactly_once_with_a_member_segment() {
        let segs = segments(&["A", "B", "C", "D"]);
        let mut rng = StdRng::seed_from_u64(11);
        let mut animator = SpinAnimator::new();
        let start = animator.spin(&request(&segs, 1000.0), &mut rng).unwrap();
        let (winner, settled_count) = drive_to_completion(&mut animator, start.clone(), 1000.0);
        assert_eq!(settled_count, 1);
        assert!(segs.iter().any(|s| s.id == winner.id));
        assert!(!animator.is_spinning());
        assert_eq!(animator.state().current_segment.as_ref().unwrap().id, winner.id);
        // Later frames for the finished run are stale.
        assert_eq!(animator.advance(start.run_id, 60_000.0), Frame::Stale);
    }

    #[test]
    fn settled_rotation_parks_the_winner_under_the_pointer() {
        let segs = segments(&["A", "B", "C", "D", "E"]);
        let mut rng = StdRng::seed_from_u64(12);
        let mut animator = SpinAnimator::new();
        for spin_round in 0..5 {
            let t0 = spin_round as f64 * 10_000.0;
            let start = animator.spin(&request(&segs, t0), &mut rng).unwrap();
            let before = animator.state().rotation;
            let (_, _) = drive_to_completion(&mut animator, start.clone(), t0);
            let after = animator.state().rotation;
            assert!(after > before);
            let midpoint = segment_midpoint_deg(start.winning_index, segs.len());
            let landed = (after.rem_euclid(360.0) + midpoint).rem_euclid(360.0);
            // landed is the screen angle of the winner midpoint; it must
            // sit at the pointer (0) give or take the boundary epsilon.
            let distance = landed.min(360.0 - landed);
            assert!(
                distance <= BOUNDARY_EPSILON_DEG + 1e-9,
                "midpoint off pointer by {distance}deg"
            );
        }
    }

    #[test]
    fn second_spin_while_spinning_is_a_guaranteed_no_op() {
        let segs = segments(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(13);
        let mut animator = SpinAnimator::new();
        let start = animator.spin(&request(&segs, 0.0), &mut rng).unwrap();
        animator.advance(start.run_id, 1000.0);
        let target_before = animator.state().target_rotation;
        assert!(animator.spin(&request(&segs, 1500.0), &mut rng).is_none());
        assert_eq!(animator.state().target_rotation, target_before);
        assert_eq!(animator.current_run_id(), start.run_id);
        let (_, settled_count) = drive_to_completion(&mut animator, start, 0.0);
        assert_eq!(settled_count, 1);
    }

    #[test]
    fn disabled_and_empty_requests_are_rejected() {
        let segs = segments(&["A"]);
        let mut rng = StdRng::seed_from_u64(14);
        let mut animator = SpinAnimator::new();
        assert!(animator.spin(&request(&[], 0.0), &mut rng).is_none());
        animator.set_disabled(true);
        assert!(animator.spin(&request(&segs, 0.0), &mut rng).is_none());
        animator.set_disabled(false);
        assert!(animator.spin(&request(&segs, 0.0), &mut rng).is_some());
    }

    #[test]
    fn single_segment_still_gets_a_full_visual_spin() {
        let segs = segments(&["OnlyPrize"]);
        let mut rng = StdRng::seed_from_u64(15);
        let mut animator = SpinAnimator::new();
        let start = animator.spin(&request(&segs, 0.0), &mut rng).unwrap();
        assert_eq!(start.winning_index, 0);
        let advance_by = animator.state().target_rotation - 0.0;
        assert!(advance_by >= FULL_ROTATIONS_BASE - BOUNDARY_EPSILON_DEG);
        let (winner, _) = drive_to_completion(&mut animator, start, 0.0);
        assert_eq!(winner.label, "OnlyPrize");
    }

    #[test]
    fn rotation_is_monotonic_during_a_spin() {
        let segs = segments(&["A", "B", "C"]);
        let mut rng = StdRng::seed_from_u64(16);
        let mut animator = SpinAnimator::new();
        let start = animator.spin(&request(&segs, 0.0), &mut rng).unwrap();
        let mut last = animator.state().rotation;
        let mut t = 0.0;
        while animator.is_spinning() {
            t += 16.0;
            animator.advance(start.run_id, t);
            let rotation = animator.state().rotation;
            assert!(rotation >= last);
            last = rotation;
        }
    }

    #[test]
    fn stale_run_ids_never_touch_state() {
        let segs = segments(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(17);
        let mut animator = SpinAnimator::new();
        let first = animator.spin(&request(&segs, 0.0), &mut rng).unwrap();
        let (_, _) = drive_to_completion(&mut animator, first.clone(), 0.0);
        let second = animator.spin(&request(&segs, 20_000.0), &mut rng).unwrap();
        assert_ne!(first.run_id, second.run_id);
        let rotation = animator.state().rotation;
        // A leftover frame callback from the first run must be discarded.
        assert_eq!(animator.advance(first.run_id, 21_000.0), Frame::Stale);
        assert_eq!(animator.state().rotation, rotation);
        assert!(animator.is_spinning());
    }

    #[test]
    fn force_settle_is_a_fallback_not_a_second_result() {
        let segs = segments(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(18);
        let mut animator = SpinAnimator::new();

        // Preempted frame loop: the fallback timer completes the spin.
        let start = animator.spin(&request(&segs, 0.0), &mut rng).unwrap();
        let winner = animator.force_settle(start.run_id).expect("fallback settles");
        assert!(segs.iter().any(|s| s.id == winner.id));
        assert!(!animator.is_spinning());
        assert_eq!(animator.state().rotation, animator.state().target_rotation);
        // Firing again after completion does nothing.
        assert!(animator.force_settle(start.run_id).is_none());

        // Normal completion first: the later timer is a no-op.
        let start = animator.spin(&request(&segs, 30_000.0), &mut rng).unwrap();
        let (_, settled_count) = drive_to_completion(&mut animator, start.clone(), 30_000.0);
        assert_eq!(settled_count, 1);
        assert!(animator.force_settle(start.run_id).is_none());
    }

    #[test]
    fn reset_zeroes_state_only_while_idle() {
        let segs = segments(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(19);
        let mut animator = SpinAnimator::new();
        let start = animator.spin(&request(&segs, 0.0), &mut rng).unwrap();
        animator.advance(start.run_id, 1000.0);

        // Spinning: reset is a no-op.
        let rotation = animator.state().rotation;
        animator.reset();
        assert!(animator.is_spinning());
        assert_eq!(animator.state().rotation, rotation);

        let (_, _) = drive_to_completion(&mut animator, start, 0.0);
        animator.reset();
        assert_eq!(animator.state().rotation, 0.0);
        assert_eq!(animator.state().target_rotation, 0.0);
        assert!(animator.state().current_segment.is_none());
    }

    #[test]
    fn speed_presets_map_to_fixed_durations() {
        assert_eq!(SpinSpeed::Slow.duration_ms(), SPIN_DURATION_SLOW_MS);
        assert_eq!(SpinSpeed::Normal.duration_ms(), SPIN_DURATION_NORMAL_MS);
        assert_eq!(SpinSpeed::Fast.duration_ms(), SPIN_DURATION_FAST_MS);
        assert!(SpinSpeed::Fast.duration_ms() < SpinSpeed::Normal.duration_ms());
    }
}
