//! Player car integration
//!
//! One call to [`PlayerState::integrate`] covers forward motion, steering,
//! centrifugal drift, throttle and brake, the off-road penalty and both
//! kinds of collision. Parallax and lap timing are handled by the
//! simulation since they depend on how far the car moved.

use crate::settings::{Settings, CENTRIFUGAL};
use crate::sprites::SpriteId;
use crate::traffic::{PlayerView, Traffic, VehicleId};
use crate::track::Track;
use crate::util;

/// Lateral offset beyond which the car is off the tarmac
pub const ROAD_EDGE: f32 = 1.0;
/// Hard limit on lateral offset
pub const MAX_OFFSET: f32 = 3.0;

/// Footprint of the player car in road half-widths
pub fn player_width() -> f32 {
    SpriteId::PlayerStraight.road_width()
}

/// Driver intents sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub faster: bool,
    pub slower: bool,
}

impl PlayerInput {
    /// -1 steering left, 1 steering right, 0 otherwise
    pub fn steer(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}

/// What the player ran into this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collision {
    Scenery(SpriteId),
    Vehicle(VehicleId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    /// Camera Z; the car itself sits `player_z` further on
    pub position: f32,
    /// Lateral offset in road half-widths
    pub x: f32,
    pub speed: f32,
}

impl PlayerState {
    pub fn view(&self, segment: usize) -> PlayerView {
        PlayerView {
            segment,
            x: self.x,
            width: player_width(),
            speed: self.speed,
        }
    }

    /// Advance one tick on `segment`, the segment under the car at the
    /// start of the tick.
    pub fn integrate(
        &mut self,
        track: &Track,
        traffic: &Traffic,
        settings: &Settings,
        input: PlayerInput,
        segment: usize,
    ) -> Option<Collision> {
        let seg = track.segment(segment);
        let track_length = track.length();
        let step = settings.step;
        let width = player_width();

        let speed_percent = self.speed / settings.max_speed;
        let dx = step * 2.0 * speed_percent;

        self.position = util::increase(self.position, step * self.speed, track_length);

        self.x += dx * input.steer();
        self.x -= dx * speed_percent * seg.curve * CENTRIFUGAL;

        let rate = if input.faster {
            settings.accel
        } else if input.slower {
            settings.breaking
        } else {
            settings.decel
        };
        self.speed = util::limit(util::accelerate(self.speed, rate, step), 0.0, settings.max_speed);

        let mut collision = None;

        if self.x.abs() > ROAD_EDGE {
            if self.speed > settings.off_road_limit {
                self.speed = util::accelerate(self.speed, settings.off_road_decel, step);
            }

            for sprite in &seg.sprites {
                let sprite_width = sprite.sprite.road_width();
                let side = if sprite.offset > 0.0 { 1.0 } else { -1.0 };
                let centre = sprite.offset + sprite_width / 2.0 * side;
                if util::overlap(self.x, width, centre, sprite_width, 1.0) {
                    self.speed = settings.max_speed / 5.0;
                    self.position = util::increase(seg.p1.world.z, -settings.player_z, track_length);
                    collision = Some(Collision::Scenery(sprite.sprite));
                    break;
                }
            }
        }

        for &id in &seg.vehicles {
            let car = traffic.vehicle(id);
            if self.speed > car.speed && util::overlap(self.x, width, car.offset, car.width(), 0.8) {
                self.speed = car.speed * (car.speed / self.speed);
                self.position = util::increase(car.z, -settings.player_z, track_length);
                collision = Some(Collision::Vehicle(id));
                break;
            }
        }

        self.x = util::limit(self.x, -MAX_OFFSET, MAX_OFFSET);
        self.speed = util::limit(self.speed, 0.0, settings.max_speed);

        if let Some(hit) = collision {
            tracing::trace!("Player collision {:?} on segment {}", hit, segment);
        }
        collision
    }
}

/// Pick the player sprite from steering and the local road slope.
pub fn sprite_variant(steer: f32, updown: f32) -> SpriteId {
    let uphill = updown > 0.0;
    match (steer < 0.0, steer > 0.0, uphill) {
        (true, _, true) => SpriteId::PlayerUphillLeft,
        (true, _, false) => SpriteId::PlayerLeft,
        (_, true, true) => SpriteId::PlayerUphillRight,
        (_, true, false) => SpriteId::PlayerRight,
        (_, _, true) => SpriteId::PlayerUphillStraight,
        _ => SpriteId::PlayerStraight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(n: usize) -> Track {
        let mut track = Track::new(200.0, 3);
        track.add_straight(n);
        track
    }

    fn throttle() -> PlayerInput {
        PlayerInput { faster: true, ..Default::default() }
    }

    #[test]
    fn no_drift_on_straight_road() {
        let track = straight(50);
        let traffic = Traffic::new();
        let settings = Settings::default();
        let mut player = PlayerState { x: 0.25, ..Default::default() };
        for _ in 0..2000 {
            let seg = track.find_segment_index(player.position + settings.player_z);
            player.integrate(&track, &traffic, &settings, throttle(), seg);
        }
        assert!((player.x - 0.25).abs() < 1e-6);
        assert!((player.speed - settings.max_speed).abs() < 1e-3);
    }

    #[test]
    fn off_road_penalty() {
        let track = straight(10);
        let traffic = Traffic::new();
        let settings = Settings::default();
        assert!(settings.max_speed > settings.off_road_limit);
        let mut player = PlayerState { position: 0.0, x: 1.5, speed: settings.max_speed };
        let hit = player.integrate(&track, &traffic, &settings, throttle(), 4);
        assert_eq!(hit, None);
        let expected = util::accelerate(settings.max_speed, settings.off_road_decel, settings.step);
        assert!((player.speed - expected).abs() < 1e-3);
        assert_eq!(player.x, 1.5);
    }

    #[test]
    fn steering_scales_with_speed() {
        let track = straight(10);
        let traffic = Traffic::new();
        let settings = Settings::default();
        let mut still = PlayerState::default();
        let left = PlayerInput { left: true, ..Default::default() };
        still.integrate(&track, &traffic, &settings, left, 4);
        assert_eq!(still.x, 0.0);

        let mut moving = PlayerState { speed: settings.max_speed, ..Default::default() };
        moving.integrate(&track, &traffic, &settings, left, 4);
        assert!((moving.x + settings.step * 2.0).abs() < 1e-6);
    }

    #[test]
    fn centrifugal_pushes_outwards() {
        let mut track = Track::new(200.0, 3);
        track.add_curve(10, 4.0, 0.0);
        let traffic = Traffic::new();
        let settings = Settings::default();
        let mut player = PlayerState { speed: settings.max_speed, ..Default::default() };
        player.integrate(&track, &traffic, &settings, throttle(), 15);
        let expected = -(settings.step * 2.0) * 4.0 * CENTRIFUGAL;
        assert!((player.x - expected).abs() < 1e-6);
    }

    #[test]
    fn brake_beats_decay() {
        let track = straight(10);
        let traffic = Traffic::new();
        let settings = Settings::default();
        let mut coasting = PlayerState { speed: 6000.0, ..Default::default() };
        let mut braking = coasting.clone();
        coasting.integrate(&track, &traffic, &settings, PlayerInput::default(), 4);
        braking.integrate(&track, &traffic, &settings, PlayerInput { slower: true, ..Default::default() }, 4);
        assert!(braking.speed < coasting.speed);
        assert!(coasting.speed < 6000.0);
    }

    #[test]
    fn hitting_scenery_snaps_back() {
        let mut track = straight(10);
        track.add_sprite(5, SpriteId::Column, 1.5);
        let traffic = Traffic::new();
        let settings = Settings::default();
        let mut player = PlayerState { position: 200.0, x: 1.6, speed: settings.max_speed };
        let hit = player.integrate(&track, &traffic, &settings, throttle(), 5);
        assert_eq!(hit, Some(Collision::Scenery(SpriteId::Column)));
        assert_eq!(player.speed, settings.max_speed / 5.0);
        let expected = util::increase(1000.0, -settings.player_z, track.length());
        assert!((player.position - expected).abs() < 1e-3);
    }

    #[test]
    fn scenery_on_the_other_side_is_missed() {
        let mut track = straight(10);
        track.add_sprite(5, SpriteId::Column, -1.5);
        let traffic = Traffic::new();
        let settings = Settings::default();
        let mut player = PlayerState { position: 200.0, x: 1.6, speed: settings.max_speed };
        assert_eq!(player.integrate(&track, &traffic, &settings, throttle(), 5), None);
    }

    #[test]
    fn rear_ending_traffic_slows_player() {
        let mut track = straight(10);
        let mut traffic = Traffic::new();
        let settings = Settings::default();
        let id = traffic.spawn(&mut track, SpriteId::Car03, 0.1, 5.0 * 200.0 + 50.0, 3000.0);
        let mut player = PlayerState { position: 200.0, x: 0.0, speed: 6000.0 };
        let hit = player.integrate(&track, &traffic, &settings, PlayerInput::default(), 5);
        assert_eq!(hit, Some(Collision::Vehicle(id)));

        let before = util::accelerate(6000.0, settings.decel, settings.step);
        let expected = 3000.0 * (3000.0 / before);
        assert!((player.speed - expected).abs() < 1e-2);
        let snapped = util::increase(1050.0, -settings.player_z, track.length());
        assert!((player.position - snapped).abs() < 1e-3);
    }

    #[test]
    fn slower_player_passes_through_traffic() {
        let mut track = straight(10);
        let mut traffic = Traffic::new();
        let settings = Settings::default();
        traffic.spawn(&mut track, SpriteId::Car03, 0.0, 1000.0, 3000.0);
        let mut player = PlayerState { position: 200.0, x: 0.0, speed: 1000.0 };
        assert_eq!(player.integrate(&track, &traffic, &settings, throttle(), 5), None);
    }

    #[test]
    fn clamps_offset_and_speed() {
        let track = straight(10);
        let traffic = Traffic::new();
        let settings = Settings::default();
        let mut player = PlayerState { position: 0.0, x: -3.5, speed: 10.0 };
        player.integrate(&track, &traffic, &settings, PlayerInput { slower: true, ..Default::default() }, 4);
        assert_eq!(player.x, -MAX_OFFSET);
        assert_eq!(player.speed, 0.0);
    }

    #[test]
    fn sprite_variants() {
        assert_eq!(sprite_variant(0.0, 0.0), SpriteId::PlayerStraight);
        assert_eq!(sprite_variant(-5.0, 0.0), SpriteId::PlayerLeft);
        assert_eq!(sprite_variant(5.0, -1.0), SpriteId::PlayerRight);
        assert_eq!(sprite_variant(0.0, 2.0), SpriteId::PlayerUphillStraight);
        assert_eq!(sprite_variant(-1.0, 2.0), SpriteId::PlayerUphillLeft);
        assert_eq!(sprite_variant(1.0, 2.0), SpriteId::PlayerUphillRight);
    }
}
