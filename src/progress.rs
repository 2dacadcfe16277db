//! Simulated wait-progress state machine.
//!
//! Three fields move: remaining minutes, a progress percentage and a queue
//! position. Two periodic callbacks in the view layer drive them through
//! `minute_tick` / `progress_tick`; the struct itself never touches a timer,
//! so every property here runs under native `cargo test`.
//!
//! The two displayed values are deliberately not kept consistent: the percent
//! creeps up on its own fast tick and is reassigned from the minute formula on
//! the slow one, which can move it backward. The whole page is theater.

use crate::params::RoomParams;
use crate::rng::Rng;

/// Minute tick period.
pub const MINUTE_TICK_MS: u32 = 60_000;
/// Progress creep period.
pub const PROGRESS_TICK_MS: u32 = 3_000;

/// Once this few minutes remain, the queue position starts jumping down.
const LATE_STAGE_MINUTES: u32 = 3;
/// Inclusive bounds of one late-stage queue jump.
const QUEUE_JUMP_MIN: u64 = 10;
const QUEUE_JUMP_MAX: u64 = 59;

pub struct ProgressEngine {
    initial_minutes: u32,
    remaining_minutes: u32,
    progress_percent: f64,
    queue_position: u64,
}

impl ProgressEngine {
    pub fn new(params: &RoomParams) -> Self {
        Self {
            initial_minutes: params.wait_minutes,
            remaining_minutes: params.wait_minutes,
            progress_percent: 0.0,
            queue_position: params.queue_count,
        }
    }

    pub fn remaining_minutes(&self) -> u32 {
        self.remaining_minutes
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    pub fn queue_position(&self) -> u64 {
        self.queue_position
    }

    /// Slow tick: count a minute down (never below zero), reassign the
    /// percentage from the elapsed fraction, and in the late stage jump the
    /// queue position down by a random amount, floored at 1.
    pub fn minute_tick(&mut self, rng: &mut Rng) {
        if self.remaining_minutes == 0 {
            return;
        }
        self.remaining_minutes -= 1;
        let done = self.initial_minutes - self.remaining_minutes;
        self.progress_percent = f64::from(done) / f64::from(self.initial_minutes) * 100.0;
        if self.remaining_minutes <= LATE_STAGE_MINUTES {
            let jump = rng.range_u64(QUEUE_JUMP_MIN, QUEUE_JUMP_MAX);
            self.queue_position = self.queue_position.saturating_sub(jump).max(1);
        }
    }

    /// Fast tick: creep the percentage up by a random sliver, capped at 100.
    pub fn progress_tick(&mut self, rng: &mut Rng) {
        self.progress_percent = (self.progress_percent + rng.uniform() * 2.0).min(100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(minutes: u32, count: u64) -> ProgressEngine {
        ProgressEngine::new(&RoomParams {
            wait_minutes: minutes,
            queue_count: count,
            supplied: false,
        })
    }

    #[test]
    fn seeds_from_params() {
        let e = engine(5, 1247);
        assert_eq!(e.remaining_minutes(), 5);
        assert_eq!(e.queue_position(), 1247);
        assert_eq!(e.progress_percent(), 0.0);
    }

    #[test]
    fn one_minute_tick_sets_formula_percent() {
        let mut rng = Rng::new(11);
        let mut e = engine(5, 1247);
        e.minute_tick(&mut rng);
        assert_eq!(e.remaining_minutes(), 4);
        assert!((e.progress_percent() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn minutes_never_go_below_zero() {
        let mut rng = Rng::new(11);
        let mut e = engine(1, 500);
        for _ in 0..10 {
            e.minute_tick(&mut rng);
        }
        assert_eq!(e.remaining_minutes(), 0);
        assert!((e.progress_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn late_stage_jump_is_bounded() {
        let mut rng = Rng::new(23);
        // 4 -> 3 remaining enters the late stage on the first tick.
        for _ in 0..200 {
            let mut e = engine(4, 10_000);
            e.minute_tick(&mut rng);
            let dropped = 10_000 - e.queue_position();
            assert!(
                (QUEUE_JUMP_MIN..=QUEUE_JUMP_MAX).contains(&dropped),
                "queue jump {dropped} out of bounds"
            );
        }
    }

    #[test]
    fn no_jump_before_late_stage() {
        let mut rng = Rng::new(23);
        let mut e = engine(10, 1000);
        e.minute_tick(&mut rng); // 9 remaining, still early
        assert_eq!(e.queue_position(), 1000);
    }

    #[test]
    fn queue_position_floors_at_one() {
        let mut rng = Rng::new(31);
        let mut e = engine(3, 15);
        for _ in 0..3 {
            e.minute_tick(&mut rng);
        }
        assert_eq!(e.queue_position(), 1);
        // Further ticks are no-ops at zero minutes and must not disturb it.
        e.minute_tick(&mut rng);
        assert_eq!(e.queue_position(), 1);
    }

    #[test]
    fn progress_tick_caps_at_hundred() {
        let mut rng = Rng::new(47);
        let mut e = engine(5, 100);
        for _ in 0..500 {
            e.progress_tick(&mut rng);
            assert!(e.progress_percent() <= 100.0);
        }
        assert!((e.progress_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn progress_tick_increment_is_under_two() {
        let mut rng = Rng::new(53);
        let mut e = engine(5, 100);
        let mut prev = 0.0;
        for _ in 0..100 {
            e.progress_tick(&mut rng);
            let delta = e.progress_percent() - prev;
            assert!((0.0..2.0).contains(&delta), "increment {delta} out of range");
            prev = e.progress_percent();
        }
    }

    #[test]
    fn minute_tick_may_pull_percent_back() {
        let mut rng = Rng::new(61);
        let mut e = engine(10, 1000);
        // Enough fast ticks to creep well past the 10% formula value.
        for _ in 0..200 {
            e.progress_tick(&mut rng);
        }
        let crept = e.progress_percent();
        assert!(crept > 10.0);
        e.minute_tick(&mut rng);
        // Formula value after one of ten minutes is 10%, under the creep.
        assert!(e.progress_percent() < crept);
        assert!((e.progress_percent() - 10.0).abs() < 1e-9);
    }
}
