//! Lap timing and the best-lap record
//!
//! The core only decides when a lap completes and whether it beats the
//! record. Where the record lives is up to a [`LapRecordStore`].

/// Persistence for the single best-lap value, in seconds
pub trait LapRecordStore {
    fn load(&self) -> Option<f32>;
    fn store(&mut self, seconds: f32);
}

/// Keeps the record in memory; counts writes so callers can observe them.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    pub best: Option<f32>,
    pub writes: usize,
}

impl MemoryRecordStore {
    pub fn with_best(best: f32) -> Self {
        Self { best: Some(best), writes: 0 }
    }
}

impl LapRecordStore for MemoryRecordStore {
    fn load(&self) -> Option<f32> {
        self.best
    }

    fn store(&mut self, seconds: f32) {
        self.best = Some(seconds);
        self.writes += 1;
    }
}

/// A lap that just finished
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapCompleted {
    pub time: f32,
    pub new_best: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LapTimer {
    pub current: f32,
    pub last: Option<f32>,
    pub fastest: Option<f32>,
}

impl LapTimer {
    pub fn new(fastest: Option<f32>) -> Self {
        Self {
            current: 0.0,
            last: None,
            fastest,
        }
    }

    /// Update timing after the player moved from `start` to `position`.
    ///
    /// A lap completes on the first tick past `player_z` that began before
    /// it with time on the clock.
    pub fn update(
        &mut self,
        start: f32,
        position: f32,
        player_z: f32,
        step: f32,
        records: &mut dyn LapRecordStore,
    ) -> Option<LapCompleted> {
        if position <= player_z {
            return None;
        }

        if self.current > 0.0 && start < player_z {
            let time = self.current;
            self.last = Some(time);
            self.current = 0.0;

            let new_best = self.fastest.map_or(true, |best| time <= best);
            if new_best {
                self.fastest = Some(time);
                records.store(time);
                tracing::info!("New fastest lap: {}", crate::util::format_time(time));
            } else {
                tracing::debug!("Lap completed in {}", crate::util::format_time(time));
            }
            return Some(LapCompleted { time, new_best });
        }

        self.current += step;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER_Z: f32 = 839.1;
    const STEP: f32 = 1.0 / 60.0;

    #[test]
    fn new_best_is_persisted_once() {
        let mut store = MemoryRecordStore::with_best(50.0);
        let mut timer = LapTimer::new(store.load());
        timer.current = 45.3;

        let done = timer.update(800.0, 1000.0, PLAYER_Z, STEP, &mut store);
        assert_eq!(done, Some(LapCompleted { time: 45.3, new_best: true }));
        assert_eq!(timer.fastest, Some(45.3));
        assert_eq!(timer.last, Some(45.3));
        assert_eq!(timer.current, 0.0);
        assert_eq!(store.writes, 1);
        assert_eq!(store.best, Some(45.3));

        // the following tick just accumulates
        assert_eq!(timer.update(1000.0, 1200.0, PLAYER_Z, STEP, &mut store), None);
        assert_eq!(store.writes, 1);
        assert!((timer.current - STEP).abs() < 1e-7);
    }

    #[test]
    fn slower_lap_keeps_record() {
        let mut store = MemoryRecordStore::with_best(40.0);
        let mut timer = LapTimer::new(store.load());
        timer.current = 45.3;
        let done = timer.update(800.0, 1000.0, PLAYER_Z, STEP, &mut store);
        assert_eq!(done, Some(LapCompleted { time: 45.3, new_best: false }));
        assert_eq!(timer.fastest, Some(40.0));
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn first_lap_sets_record() {
        let mut store = MemoryRecordStore::default();
        let mut timer = LapTimer::new(None);
        timer.current = 61.0;
        timer.update(800.0, 900.0, PLAYER_Z, STEP, &mut store);
        assert_eq!(timer.fastest, Some(61.0));
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn clock_idles_before_the_line() {
        let mut store = MemoryRecordStore::default();
        let mut timer = LapTimer::new(None);
        assert_eq!(timer.update(0.0, 500.0, PLAYER_Z, STEP, &mut store), None);
        assert_eq!(timer.current, 0.0);
        // first crossing with an empty clock only starts timing
        assert_eq!(timer.update(800.0, 900.0, PLAYER_Z, STEP, &mut store), None);
        assert!(timer.current > 0.0);
        assert_eq!(timer.last, None);
    }
}
