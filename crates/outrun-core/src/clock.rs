//! Fixed-step accumulator
//!
//! Wall-clock frame deltas are banked and drained in constant `step` slices
//! so the simulation is independent of the display rate.

/// Longest frame delta accepted before clamping, in seconds
pub const MAX_FRAME: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(step: f32) -> Self {
        Self { step, accumulator: 0.0 }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time banked but not yet simulated
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Bank `dt` seconds and run `tick` once per whole step available.
    /// Returns the number of ticks run.
    pub fn advance<F: FnMut()>(&mut self, dt: f32, mut tick: F) -> u32 {
        if dt > MAX_FRAME {
            tracing::trace!("Frame delta {}s clamped to {}s", dt, MAX_FRAME);
        }
        let dt = dt.clamp(0.0, MAX_FRAME);
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            tick();
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_whole_steps() {
        let mut clock = FixedStep::new(0.25);
        let mut count = 0;
        assert_eq!(clock.advance(0.6, || count += 1), 2);
        assert_eq!(count, 2);
        assert!((clock.pending() - 0.1).abs() < 1e-6);
        assert_eq!(clock.advance(0.15, || count += 1), 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn clamps_long_stalls() {
        let mut clock = FixedStep::new(1.0 / 60.0);
        let ticks = clock.advance(30.0, || {});
        assert!((59..=60).contains(&ticks), "ran {} ticks", ticks);
    }

    #[test]
    fn full_second_runs_unclamped() {
        let mut clock = FixedStep::new(0.25);
        assert_eq!(clock.advance(MAX_FRAME, || {}), 4);
        assert_eq!(clock.pending(), 0.0);
    }

    #[test]
    fn ignores_negative_deltas() {
        let mut clock = FixedStep::new(0.1);
        assert_eq!(clock.advance(-5.0, || {}), 0);
        assert_eq!(clock.pending(), 0.0);
    }
}
