//! World → camera → screen projection and per-frame visibility
//!
//! Segments are walked near-to-far from the one under the camera. A running
//! horizontal offset accumulates each segment's curve so bends compound
//! across the draw window, and a shrinking `max_y` hides segments that sit
//! behind a nearer hill crest.

use crate::settings::Settings;
use crate::track::{SegmentPoint, Track, Vec3};
use crate::util;

/// Screen dimensions plus the road half-width used for width projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub road_width: f32,
}

impl Viewport {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            road_width: settings.road_width,
        }
    }
}

/// Project one point through a camera at `camera` with the given depth.
///
/// The result is only meaningful when the point lies in front of the
/// camera (`camera.z > 0`); callers cull everything else.
pub fn project(point: &mut SegmentPoint, camera: Vec3, camera_depth: f32, view: Viewport) {
    point.camera.x = point.world.x - camera.x;
    point.camera.y = point.world.y - camera.y;
    point.camera.z = point.world.z - camera.z;
    point.screen.scale = camera_depth / point.camera.z;
    point.screen.x = (view.width / 2.0 + point.screen.scale * point.camera.x * view.width / 2.0).round();
    point.screen.y = (view.height / 2.0 - point.screen.scale * point.camera.y * view.height / 2.0).round();
    point.screen.w = (point.screen.scale * view.road_width * view.width / 2.0).round();
}

/// Result of projecting the draw window for one frame
#[derive(Debug, Clone)]
pub struct ProjectedWindow {
    /// Segment under the camera
    pub base: usize,
    /// Segment under the player car
    pub player_segment: usize,
    /// Player's progress through `player_segment`
    pub player_percent: f32,
    /// Interpolated road height under the player
    pub player_y: f32,
    /// Number of segments projected
    pub count: usize,
    /// Segments that survived culling, near to far
    pub visible: Vec<usize>,
}

/// Recompute camera and screen coordinates, fog and clip for the draw window.
pub fn project_window(track: &mut Track, settings: &Settings, position: f32, player_x: f32) -> ProjectedWindow {
    let segment_length = track.segment_length();
    let track_length = track.length();
    let view = Viewport::from_settings(settings);

    let base = track.find_segment_index(position);
    let base_percent = util::percent_remaining(position, segment_length);
    let player_segment = track.find_segment_index(position + settings.player_z);
    let player_percent = util::percent_remaining(position + settings.player_z, segment_length);
    let player_y = {
        let s = track.segment(player_segment);
        util::interpolate(s.p1.world.y, s.p2.world.y, player_percent)
    };

    let count = settings.draw_distance.min(track.len());
    let mut visible = Vec::with_capacity(count);
    let mut max_y = settings.height;
    let mut x = 0.0;
    let mut dx = -(track.segment(base).curve * base_percent);

    for n in 0..count {
        let index = track.offset_index(base, n);
        let segment = track.segment_mut(index);

        segment.looped = segment.index < base;
        segment.fog = util::exponential_fog(n as f32 / settings.draw_distance as f32, settings.fog_density);
        segment.clip = max_y;

        let camera_y = player_y + settings.camera_height;
        let camera_z = position - if segment.looped { track_length } else { 0.0 };
        let near = Vec3 { x: player_x * settings.road_width - x, y: camera_y, z: camera_z };
        let far = Vec3 { x: player_x * settings.road_width - x - dx, y: camera_y, z: camera_z };
        project(&mut segment.p1, near, settings.camera_depth, view);
        project(&mut segment.p2, far, settings.camera_depth, view);

        x += dx;
        dx += segment.curve;

        let behind = segment.p1.camera.z <= settings.camera_depth;
        let back_face = segment.p2.screen.y >= segment.p1.screen.y;
        let hidden = segment.p2.screen.y >= max_y;
        if behind || back_face || hidden {
            continue;
        }

        visible.push(index);
        max_y = segment.p1.screen.y;
    }

    ProjectedWindow {
        base,
        player_segment,
        player_percent,
        player_y,
        count,
        visible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> Viewport {
        Viewport { width: 1024.0, height: 768.0, road_width: 2000.0 }
    }

    #[test]
    fn project_centre_point() {
        let mut p = SegmentPoint::default();
        p.world = Vec3 { x: 0.0, y: 0.0, z: 1000.0 };
        project(&mut p, Vec3 { x: 0.0, y: 1000.0, z: 0.0 }, 1.0, view());
        assert_eq!(p.camera.z, 1000.0);
        assert_eq!(p.screen.scale, 0.001);
        assert_eq!(p.screen.x, 512.0);
        // one unit below the camera at depth ratio 1 -> bottom edge
        assert_eq!(p.screen.y, 768.0);
        assert_eq!(p.screen.w, 1024.0);
    }

    #[test]
    fn project_offsets_follow_camera() {
        let mut p = SegmentPoint::default();
        p.world = Vec3 { x: 500.0, y: 0.0, z: 2000.0 };
        project(&mut p, Vec3 { x: 0.0, y: 0.0, z: 0.0 }, 1.0, view());
        assert!(p.screen.x > 512.0);
        assert_eq!(p.screen.y, 384.0);
    }

    fn straight_track(n: usize) -> Track {
        let mut track = Track::new(200.0, 3);
        track.add_straight(n);
        track
    }

    #[test]
    fn flat_window_recedes_upwards() {
        let mut track = straight_track(200);
        let settings = Settings::default();
        let window = project_window(&mut track, &settings, 0.0, 0.0);
        assert_eq!(window.base, 0);
        assert_eq!(window.count, 300);
        assert!(!window.visible.is_empty());
        // base segment sits at the camera and is culled
        assert_ne!(window.visible[0], 0);
        for pair in window.visible.windows(2) {
            let near = track.segment(pair[0]);
            let far = track.segment(pair[1]);
            assert!(far.p1.screen.y < near.p1.screen.y);
        }
    }

    #[test]
    fn fog_thickens_with_distance() {
        let mut track = straight_track(200);
        let settings = Settings::default();
        project_window(&mut track, &settings, 0.0, 0.0);
        assert!((track.segment(0).fog - 1.0).abs() < 1e-6);
        assert!(track.segment(100).fog < track.segment(10).fog);
        assert!(track.segment(299).fog < track.segment(100).fog);
    }

    #[test]
    fn looped_segments_project_ahead() {
        let mut track = straight_track(50);
        let settings = Settings::default();
        let position = track.length() - 400.0;
        let window = project_window(&mut track, &settings, position, 0.0);
        assert_eq!(window.base, 148);
        assert!(track.segment(5).looped);
        assert!(track.segment(5).p1.camera.z > 0.0);
        assert!(!track.segment(149).looped);
    }

    #[test]
    fn curve_shifts_far_points() {
        let mut track = Track::new(200.0, 3);
        track.add_curve(50, 4.0, 0.0);
        let settings = Settings::default();
        project_window(&mut track, &settings, 0.0, 0.0);
        let near = track.segment(10).p1.camera.x;
        let far = track.segment(60).p1.camera.x;
        assert!(far > near, "curve should bend the road: near {} far {}", near, far);
    }

    #[test]
    fn hill_crest_hides_the_road_beyond() {
        let mut track = Track::new(200.0, 3);
        track.add_straight(10);
        track.add_hill(20, 10.0);
        track.add_hill(20, -10.0);
        track.add_straight(200);
        let settings = Settings::default();
        let window = project_window(&mut track, &settings, 0.0, 0.0);

        let crest = *window.visible.last().unwrap();
        assert!(crest > 30 && crest < 150, "crest at {}", crest);
        let crest_y = track.segment(crest).p1.screen.y;

        // flat road past the valley faces the camera but sits below the crest
        for index in 150..window.count {
            assert!(!window.visible.contains(&index), "segment {} drawn", index);
            let seg = track.segment(index);
            assert_eq!(seg.clip, crest_y);
            assert!(seg.p2.screen.y < seg.p1.screen.y);
            assert!(seg.p2.screen.y >= seg.clip);
        }
    }

    #[test]
    fn player_segment_is_ahead_of_camera() {
        let mut track = straight_track(50);
        let settings = Settings::default();
        let window = project_window(&mut track, &settings, 0.0, 0.0);
        assert_eq!(window.player_segment, 4);
        assert_eq!(window.player_y, 0.0);
    }
}
