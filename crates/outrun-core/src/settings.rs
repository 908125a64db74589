//! Derived simulation tuning
//!
//! Everything here is computed from [`RaceOptions`]; nothing is mutated
//! during a session except by reconfiguration.

use outrun_common::RaceOptions;

/// Simulation ticks per second
pub const FPS: u32 = 60;
/// Traffic vehicles spawned per track build
pub const TOTAL_CARS: usize = 200;
/// Centrifugal drift multiplier
pub const CENTRIFUGAL: f32 = 0.3;
/// Background scroll speeds per layer
pub const SKY_SPEED: f32 = 0.001;
pub const HILL_SPEED: f32 = 0.002;
pub const TREE_SPEED: f32 = 0.003;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub width: f32,
    pub height: f32,
    pub lanes: u32,
    pub road_width: f32,
    pub camera_height: f32,
    pub draw_distance: usize,
    pub fog_density: f32,
    pub field_of_view: f32,
    pub segment_length: f32,
    pub rumble_length: usize,

    /// Seconds per tick
    pub step: f32,
    /// Z distance from the camera to the projection plane
    pub camera_depth: f32,
    /// Fixed forward offset of the player car from the camera
    pub player_z: f32,
    /// Vertical scale relative to a 480-line display
    pub resolution: f32,
    /// One segment per tick
    pub max_speed: f32,
    pub accel: f32,
    pub breaking: f32,
    pub decel: f32,
    pub off_road_decel: f32,
    /// Off-road deceleration only applies above this speed
    pub off_road_limit: f32,
    pub total_cars: usize,
}

impl Settings {
    pub fn from_options(options: &RaceOptions) -> Self {
        let step = 1.0 / FPS as f32;
        let camera_depth = 1.0 / (options.field_of_view / 2.0).to_radians().tan();
        let max_speed = options.segment_length / step;

        Self {
            width: options.width as f32,
            height: options.height as f32,
            lanes: options.lanes.max(1),
            road_width: options.road_width,
            camera_height: options.camera_height,
            draw_distance: options.draw_distance as usize,
            fog_density: options.fog_density,
            field_of_view: options.field_of_view,
            segment_length: options.segment_length,
            rumble_length: options.rumble_length.max(1) as usize,
            step,
            camera_depth,
            player_z: options.camera_height * camera_depth,
            resolution: options.height as f32 / 480.0,
            max_speed,
            accel: max_speed / 5.0,
            breaking: -max_speed,
            decel: -max_speed / 5.0,
            off_road_decel: -max_speed / 2.0,
            off_road_limit: max_speed / 4.0,
            total_cars: TOTAL_CARS,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_options(&RaceOptions::default())
    }
}
