//! Traffic AI
//!
//! Vehicles live in a flat arena indexed by [`VehicleId`]. Each segment keeps
//! the ids of the vehicles whose Z it contains, and [`Traffic::update`] moves
//! ids between segments as cars advance so that invariant holds after every
//! tick.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::settings::Settings;
use crate::sprites::{SpriteId, CARS};
use crate::track::Track;
use crate::util;

/// Stable index of a vehicle in the traffic arena
pub type VehicleId = usize;

/// Segments scanned ahead when looking for something to steer around
pub const LOOKAHEAD: usize = 20;

/// Overlap tolerance used by the avoidance scan
const AVOID_TOLERANCE: f32 = 1.2;

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Lateral offset in road half-widths
    pub offset: f32,
    pub z: f32,
    pub sprite: SpriteId,
    pub speed: f32,
    /// Progress through the current segment, `[0, 1)`
    pub percent: f32,
}

impl Vehicle {
    /// Footprint width in road half-widths
    pub fn width(&self) -> f32 {
        self.sprite.road_width()
    }
}

/// What the traffic model needs to know about the player this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub segment: usize,
    pub x: f32,
    pub width: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Traffic {
    vehicles: Vec<Vehicle>,
}

impl Traffic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: VehicleId) -> &Vehicle {
        &self.vehicles[id]
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Add a vehicle and register it with the segment containing `z`.
    pub fn spawn(&mut self, track: &mut Track, sprite: SpriteId, offset: f32, z: f32, speed: f32) -> VehicleId {
        let id = self.vehicles.len();
        let segment = track.find_segment_index(z);
        self.vehicles.push(Vehicle {
            id,
            offset,
            z,
            sprite,
            speed,
            percent: util::percent_remaining(z, track.segment_length()),
        });
        track.segment_mut(segment).vehicles.push(id);
        id
    }

    /// Drop every vehicle and spawn a fresh field of `settings.total_cars`.
    pub fn reset<R: Rng + ?Sized>(&mut self, track: &mut Track, settings: &Settings, rng: &mut R) {
        self.vehicles.clear();
        track.clear_vehicles();
        if track.is_empty() {
            return;
        }

        let segment_count = track.len() as f32;
        let segment_length = track.segment_length();
        for _ in 0..settings.total_cars {
            let side = [-0.8f32, 0.8].choose(rng).copied().unwrap_or(0.8);
            let offset = rng.gen::<f32>() * side;
            let z = (rng.gen::<f32>() * segment_count).floor() * segment_length;
            let sprite = CARS.choose(rng).copied().unwrap_or(SpriteId::Car01);
            // Semis are slower on average
            let spread = if sprite == SpriteId::Semi { 4.0 } else { 2.0 };
            let speed = settings.max_speed / 4.0 + rng.gen::<f32>() * settings.max_speed / spread;
            self.spawn(track, sprite, offset, z, speed);
        }

        tracing::debug!("Spawned {} traffic vehicles", self.vehicles.len());
    }

    /// Advance every vehicle by `dt` seconds, steering around the player
    /// and slower traffic ahead.
    pub fn update(&mut self, track: &mut Track, settings: &Settings, player: &PlayerView, dt: f32) {
        let track_length = track.length();
        let segment_length = track.segment_length();

        for id in 0..self.vehicles.len() {
            let old = track.find_segment_index(self.vehicles[id].z);
            let delta = steer_delta(&self.vehicles, id, old, track, settings, player);

            let car = &mut self.vehicles[id];
            car.offset += delta;
            car.z = util::increase(car.z, dt * car.speed, track_length);
            car.percent = util::percent_remaining(car.z, segment_length);

            let new = track.find_segment_index(car.z);
            if new != old {
                track.segment_mut(old).remove_vehicle(id);
                track.segment_mut(new).vehicles.push(id);
            }
        }
    }
}

/// Which way to swerve around something at `other`.
///
/// Obstacles well off centre push the car back towards the middle; near the
/// centre the car keeps to whichever side it is already on, going left on a
/// dead tie.
fn swerve_direction(offset: f32, other: f32) -> f32 {
    if other > 0.5 {
        -1.0
    } else if other < -0.5 {
        1.0
    } else if offset > other {
        1.0
    } else {
        -1.0
    }
}

/// Lateral offset change for vehicle `id` this tick.
fn steer_delta(
    vehicles: &[Vehicle],
    id: VehicleId,
    car_segment: usize,
    track: &Track,
    settings: &Settings,
    player: &PlayerView,
) -> f32 {
    let car = &vehicles[id];

    // Not worth steering for something far off-screen
    if car_segment as i64 - player.segment as i64 > settings.draw_distance as i64 {
        return 0.0;
    }

    let car_width = car.width();
    for i in 1..LOOKAHEAD {
        let index = track.offset_index(car_segment, i);
        let falloff = 1.0 / i as f32;

        if index == player.segment
            && car.speed > player.speed
            && util::overlap(player.x, player.width, car.offset, car_width, AVOID_TOLERANCE)
        {
            let dir = swerve_direction(car.offset, player.x);
            return dir * falloff * (car.speed - player.speed) / settings.max_speed;
        }

        for &other_id in &track.segment(index).vehicles {
            if other_id == id {
                continue;
            }
            let other = &vehicles[other_id];
            if car.speed > other.speed && util::overlap(car.offset, car_width, other.offset, other.width(), AVOID_TOLERANCE) {
                let dir = swerve_direction(car.offset, other.offset);
                return dir * falloff * (car.speed - other.speed) / settings.max_speed;
            }
        }
    }

    if car.offset < -0.9 {
        0.1
    } else if car.offset > 0.9 {
        -0.1
    } else {
        0.0
    }
}
