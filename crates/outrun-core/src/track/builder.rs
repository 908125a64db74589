//! Procedural road builder
//!
//! Every shape is a composition of [`Track::add_road`]: the curve eases in,
//! holds and eases out, while the elevation eases across the whole span.
//! Shapes consume no randomness, so the geometry of a course is fixed.

use super::Track;
use crate::util;

/// Section lengths in segments
pub mod length {
    pub const NONE: usize = 0;
    pub const SHORT: usize = 25;
    pub const MEDIUM: usize = 50;
    pub const LONG: usize = 100;
}

/// Elevation changes in segment lengths
pub mod hill {
    pub const NONE: f32 = 0.0;
    pub const LOW: f32 = 20.0;
    pub const MEDIUM: f32 = 40.0;
    pub const HIGH: f32 = 60.0;
}

/// Curve strengths
pub mod curve {
    pub const NONE: f32 = 0.0;
    pub const EASY: f32 = 2.0;
    pub const MEDIUM: f32 = 4.0;
    pub const HARD: f32 = 6.0;
}

/// Segments in the closing downhill section
pub const DOWNHILL_TO_END_LENGTH: usize = 200;

impl Track {
    /// Emit `enter + hold + leave` segments.
    ///
    /// `y` is the elevation change over the whole section, in segment
    /// lengths. Elevation progress is sampled at each segment's far end, so
    /// the section's last segment lands exactly on the target height.
    pub fn add_road(&mut self, enter: usize, hold: usize, leave: usize, curve: f32, y: f32) {
        let start_y = self.last_y();
        let end_y = start_y + y * self.segment_length();
        let total = (enter + hold + leave) as f32;

        for n in 0..enter {
            let c = util::ease_in(0.0, curve, n as f32 / enter as f32);
            let h = util::ease_in_out(start_y, end_y, (n + 1) as f32 / total);
            self.add_segment(c, h);
        }
        for n in 0..hold {
            let h = util::ease_in_out(start_y, end_y, (enter + n + 1) as f32 / total);
            self.add_segment(curve, h);
        }
        for n in 0..leave {
            let c = util::ease_in_out(curve, 0.0, n as f32 / leave as f32);
            let h = util::ease_in_out(start_y, end_y, (enter + hold + n + 1) as f32 / total);
            self.add_segment(c, h);
        }
    }

    pub fn add_straight(&mut self, num: usize) {
        self.add_road(num, num, num, curve::NONE, hill::NONE);
    }

    pub fn add_hill(&mut self, num: usize, height: f32) {
        self.add_road(num, num, num, curve::NONE, height);
    }

    pub fn add_curve(&mut self, num: usize, curve: f32, height: f32) {
        self.add_road(num, num, num, curve, height);
    }

    pub fn add_low_rolling_hills(&mut self, num: usize, height: f32) {
        self.add_road(num, num, num, 0.0, height / 2.0);
        self.add_road(num, num, num, 0.0, -height);
        self.add_road(num, num, num, curve::EASY, height);
        self.add_road(num, num, num, 0.0, 0.0);
        self.add_road(num, num, num, -curve::EASY, height / 2.0);
        self.add_road(num, num, num, 0.0, 0.0);
    }

    pub fn add_s_curves(&mut self) {
        let m = length::MEDIUM;
        self.add_road(m, m, m, -curve::EASY, hill::NONE);
        self.add_road(m, m, m, curve::MEDIUM, hill::MEDIUM);
        self.add_road(m, m, m, curve::EASY, -hill::LOW);
        self.add_road(m, m, m, -curve::EASY, hill::MEDIUM);
        self.add_road(m, m, m, -curve::MEDIUM, -hill::MEDIUM);
    }

    pub fn add_bumps(&mut self) {
        for y in [5.0, -2.0, -5.0, 8.0, 5.0, -7.0, 5.0, -2.0] {
            self.add_road(10, 10, 10, 0.0, y);
        }
    }

    /// Close the loop: descend from the current height back to zero.
    pub fn add_downhill_to_end(&mut self, num: usize) {
        let y = -self.last_y() / self.segment_length();
        self.add_road(num, num, num, -curve::EASY, y);
    }

    /// Lay out the standard course. Scenery, traffic and banners are added
    /// separately.
    pub fn build_course(&mut self) {
        self.add_straight(length::SHORT);
        self.add_low_rolling_hills(length::SHORT, hill::LOW);
        self.add_s_curves();
        self.add_curve(length::MEDIUM, curve::MEDIUM, hill::LOW);
        self.add_bumps();
        self.add_low_rolling_hills(length::SHORT, hill::LOW);
        self.add_curve(length::LONG * 2, curve::MEDIUM, hill::MEDIUM);
        self.add_straight(length::MEDIUM);
        self.add_hill(length::MEDIUM, hill::HIGH);
        self.add_s_curves();
        self.add_curve(length::LONG, -curve::MEDIUM, hill::NONE);
        self.add_hill(length::LONG, hill::HIGH);
        self.add_curve(length::LONG, curve::MEDIUM, -hill::LOW);
        self.add_bumps();
        self.add_hill(length::LONG, -hill::MEDIUM);
        self.add_straight(length::MEDIUM);
        self.add_s_curves();
        self.add_downhill_to_end(DOWNHILL_TO_END_LENGTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Track {
        let mut track = Track::new(200.0, 3);
        track.build_course();
        track
    }

    #[test]
    fn add_road_emits_all_phases() {
        let mut track = Track::new(200.0, 3);
        track.add_road(4, 5, 6, 3.0, 2.0);
        assert_eq!(track.len(), 15);
        // curve starts at zero, holds, then eases back
        assert_eq!(track.segment(0).curve, 0.0);
        assert!(track.segment(3).curve > 0.0 && track.segment(3).curve < 3.0);
        for i in 4..9 {
            assert_eq!(track.segment(i).curve, 3.0);
        }
        assert_eq!(track.segment(9).curve, 3.0);
        assert!(track.segment(14).curve < 3.0);
        // elevation spans the whole section
        assert!((track.last_y() - 400.0).abs() < 1e-3);
    }

    #[test]
    fn elevation_is_continuous() {
        let track = course();
        for pair in track.segments().windows(2) {
            assert_eq!(pair[1].p1.world.y, pair[0].p2.world.y);
        }
    }

    #[test]
    fn course_closes_at_zero_height() {
        let track = course();
        assert!(track.last_y().abs() < 0.1, "last y = {}", track.last_y());
        assert_eq!(track.segment(0).p1.world.y, 0.0);
    }

    #[test]
    fn course_is_deterministic() {
        let a = course();
        let b = course();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.segments().iter().zip(b.segments()) {
            assert_eq!(x.curve, y.curve);
            assert_eq!(x.p2.world.y, y.p2.world.y);
        }
    }

    #[test]
    fn straight_has_no_curve_or_height() {
        let mut track = Track::new(200.0, 3);
        track.add_straight(length::SHORT);
        assert_eq!(track.len(), 75);
        assert!(track.segments().iter().all(|s| s.curve == 0.0 && s.p2.world.y == 0.0));
    }
}
