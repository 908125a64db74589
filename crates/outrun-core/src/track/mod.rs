//! Track model: a circular sequence of fixed-length road segments
//!
//! Every segment owns its world-space endpoints, its decorative sprites and
//! a membership list of the traffic vehicles currently on it. Vehicles
//! themselves live in the traffic arena; segments only hold their ids.
//!
//! Camera/screen coordinates, fog and clip values on a segment are transient
//! and rewritten by the projector every frame.

pub mod builder;
pub mod scenery;

use crate::palette::Palette;
use crate::sprites::{SpriteId, SpriteRect};
use crate::traffic::VehicleId;

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Post-perspective screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Projected road half-width in pixels
    pub w: f32,
    pub scale: f32,
}

/// A segment endpoint in world, camera and screen space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SegmentPoint {
    pub world: Vec3,
    pub camera: Vec3,
    pub screen: ScreenPoint,
}

/// Decorative sprite fixed to a segment at build time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedSprite {
    pub sprite: SpriteId,
    pub source: SpriteRect,
    /// Lateral offset in road half-widths (negative = left)
    pub offset: f32,
}

#[derive(Debug, Clone)]
pub struct Segment {
    /// Position in the track; always equal to the segment's slot
    pub index: usize,
    pub curve: f32,
    /// Near endpoint
    pub p1: SegmentPoint,
    /// Far endpoint
    pub p2: SegmentPoint,
    pub color: Palette,
    pub sprites: Vec<PlacedSprite>,
    /// Ids of the vehicles whose Z falls inside this segment
    pub vehicles: Vec<VehicleId>,
    /// Projected from behind the track's wrap point this frame
    pub looped: bool,
    pub fog: f32,
    /// Screen Y of the nearest hill crest drawn before this segment
    pub clip: f32,
}

impl Segment {
    pub fn remove_vehicle(&mut self, id: VehicleId) {
        if let Some(pos) = self.vehicles.iter().position(|&v| v == id) {
            self.vehicles.remove(pos);
        }
    }
}

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Track {
    segments: Vec<Segment>,
    segment_length: f32,
    rumble_length: usize,
}

impl Track {
    pub fn new(segment_length: f32, rumble_length: usize) -> Self {
        Self {
            segments: Vec::new(),
            segment_length,
            rumble_length: rumble_length.max(1),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    pub fn rumble_length(&self) -> usize {
        self.rumble_length
    }

    /// Total length: segment count × segment length
    pub fn length(&self) -> f32 {
        self.segments.len() as f32 * self.segment_length
    }

    pub fn segment(&self, index: usize) -> &Segment {
        &self.segments[index]
    }

    pub fn segment_mut(&mut self, index: usize) -> &mut Segment {
        &mut self.segments[index]
    }

    /// Segment `n` places after `base`, wrapping round the loop
    pub fn offset_index(&self, base: usize, n: usize) -> usize {
        (base + n) % self.segments.len()
    }

    /// Height at the far end of the last segment (0.0 on an empty track)
    pub fn last_y(&self) -> f32 {
        self.segments.last().map_or(0.0, |s| s.p2.world.y)
    }

    /// Index of the segment containing world position `z`.
    ///
    /// Uses a floored modulo, so negative and past-the-end positions map
    /// back onto the loop. The track must not be empty.
    pub fn find_segment_index(&self, z: f32) -> usize {
        debug_assert!(!self.segments.is_empty(), "segment lookup on an empty track");
        let slot = (z / self.segment_length).floor() as i64;
        slot.rem_euclid(self.segments.len() as i64) as usize
    }

    pub fn find_segment(&self, z: f32) -> &Segment {
        &self.segments[self.find_segment_index(z)]
    }

    pub fn try_find_segment(&self, z: f32) -> Option<&Segment> {
        if self.segments.is_empty() {
            None
        } else {
            Some(self.find_segment(z))
        }
    }

    /// Append one segment continuing from the previous segment's height.
    pub fn add_segment(&mut self, curve: f32, y: f32) {
        let n = self.segments.len();
        let mut p1 = SegmentPoint::default();
        p1.world.y = self.last_y();
        p1.world.z = n as f32 * self.segment_length;
        let mut p2 = SegmentPoint::default();
        p2.world.y = y;
        p2.world.z = (n + 1) as f32 * self.segment_length;

        self.segments.push(Segment {
            index: n,
            curve,
            p1,
            p2,
            color: Palette::rumble_band(n, self.rumble_length),
            sprites: Vec::new(),
            vehicles: Vec::new(),
            looped: false,
            fog: 1.0,
            clip: 0.0,
        });
    }

    /// Attach a decorative sprite to segment `n`; out-of-range indices are ignored.
    pub fn add_sprite(&mut self, n: usize, sprite: SpriteId, offset: f32) {
        if let Some(segment) = self.segments.get_mut(n) {
            segment.sprites.push(PlacedSprite {
                sprite,
                source: sprite.rect(),
                offset,
            });
        }
    }

    /// Paint the start banner ahead of `player_z` and the finish banner over
    /// the last rumble band.
    pub fn mark_start_and_finish(&mut self, player_z: f32) {
        if self.segments.is_empty() {
            return;
        }
        let start = self.find_segment_index(player_z);
        for k in [2, 3] {
            let i = self.offset_index(start, k);
            self.segments[i].color = Palette::Start;
        }
        let len = self.segments.len();
        for n in 0..self.rumble_length.min(len) {
            self.segments[len - 1 - n].color = Palette::Finish;
        }
    }

    pub fn clear_vehicles(&mut self) {
        for segment in &mut self.segments {
            segment.vehicles.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_track(n: usize) -> Track {
        let mut track = Track::new(200.0, 3);
        for _ in 0..n {
            track.add_segment(0.0, 0.0);
        }
        track
    }

    #[test]
    fn indices_match_positions() {
        let track = flat_track(20);
        for (i, s) in track.segments().iter().enumerate() {
            assert_eq!(s.index, i);
            assert!((s.p1.world.z - i as f32 * 200.0).abs() < 1e-3);
        }
        assert!((track.length() - 4000.0).abs() < 1e-3);
    }

    #[test]
    fn lookup_is_periodic() {
        let track = flat_track(50);
        let len = track.length();
        for &z in &[0.0f32, 199.9, 200.0, 5230.5, 9999.0] {
            let base = track.find_segment(z).index;
            for k in [-3i32, -1, 1, 2, 7] {
                assert_eq!(track.find_segment(z + k as f32 * len).index, base, "z={} k={}", z, k);
            }
        }
    }

    #[test]
    fn lookup_handles_negative_positions() {
        let track = flat_track(10);
        assert_eq!(track.find_segment(-1.0).index, 9);
        assert_eq!(track.find_segment(-200.0).index, 9);
        assert_eq!(track.find_segment(-201.0).index, 8);
        assert!(Track::new(200.0, 3).try_find_segment(0.0).is_none());
    }

    #[test]
    fn segments_continue_previous_height() {
        let mut track = Track::new(200.0, 3);
        track.add_segment(0.0, 10.0);
        track.add_segment(0.0, 25.0);
        assert_eq!(track.segment(1).p1.world.y, 10.0);
        assert_eq!(track.last_y(), 25.0);
    }

    #[test]
    fn colour_bands_follow_rumble_length() {
        let track = flat_track(12);
        for s in track.segments() {
            let expected = if (s.index / 3) % 2 == 0 { Palette::Dark } else { Palette::Light };
            assert_eq!(s.color, expected);
        }
    }

    #[test]
    fn sprites_out_of_range_are_ignored() {
        let mut track = flat_track(5);
        track.add_sprite(4, SpriteId::Column, 1.1);
        track.add_sprite(5, SpriteId::Column, 1.1);
        assert_eq!(track.segment(4).sprites.len(), 1);
        assert_eq!(track.segment(4).sprites[0].source, SpriteId::Column.rect());
    }

    #[test]
    fn banners() {
        let mut track = flat_track(30);
        track.mark_start_and_finish(839.0);
        // 839 falls in segment 4
        assert_eq!(track.segment(6).color, Palette::Start);
        assert_eq!(track.segment(7).color, Palette::Start);
        for i in 27..30 {
            assert_eq!(track.segment(i).color, Palette::Finish);
        }
    }
}
