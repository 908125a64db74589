//! Simulation context
//!
//! [`Simulation`] owns the track, the traffic arena, the player and the lap
//! timer. A driver calls [`Simulation::tick`] from a [`FixedStep`] loop and
//! builds one render frame per display frame once the ticks are done.
//!
//! [`FixedStep`]: crate::clock::FixedStep

use outrun_common::LoadedOptions;
use rand::Rng;

use crate::lap::{LapCompleted, LapRecordStore, LapTimer};
use crate::player::{Collision, PlayerInput, PlayerState};
use crate::settings::{Settings, HILL_SPEED, SKY_SPEED, TREE_SPEED};
use crate::track::{scenery, Track};
use crate::traffic::Traffic;
use crate::util;

/// Horizontal scroll of each background layer, in `[0, 1)`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Parallax {
    pub sky: f32,
    pub hill: f32,
    pub tree: f32,
}

impl Parallax {
    /// Scroll by `curve` over `segments` travelled.
    pub fn advance(&mut self, curve: f32, segments: f32) {
        let drift = curve * segments;
        self.sky = util::increase(self.sky, SKY_SPEED * drift, 1.0);
        self.hill = util::increase(self.hill, HILL_SPEED * drift, 1.0);
        self.tree = util::increase(self.tree, TREE_SPEED * drift, 1.0);
    }
}

/// Notable things that happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickEvents {
    pub collision: Option<Collision>,
    pub lap: Option<LapCompleted>,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    settings: Settings,
    track: Track,
    traffic: Traffic,
    pub player: PlayerState,
    pub parallax: Parallax,
    pub laps: LapTimer,
}

impl Simulation {
    /// Build a fresh session from `loaded`, resuming the best lap `best`.
    pub fn new<R: Rng + ?Sized>(loaded: &LoadedOptions, best: Option<f32>, rng: &mut R) -> Self {
        let settings = Settings::from_options(&loaded.options);
        let mut sim = Self {
            track: Track::new(settings.segment_length, settings.rumble_length),
            settings,
            traffic: Traffic::new(),
            player: PlayerState::default(),
            parallax: Parallax::default(),
            laps: LapTimer::new(best),
        };
        sim.rebuild(rng);
        sim
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn traffic(&self) -> &Traffic {
        &self.traffic
    }

    /// Split borrow for the projector, which rewrites per-frame segment state
    pub(crate) fn frame_parts(&mut self) -> (&mut Track, &Traffic, &Settings, &PlayerState, &Parallax) {
        (&mut self.track, &self.traffic, &self.settings, &self.player, &self.parallax)
    }

    /// Re-derive settings. The track is rebuilt when geometry was overridden,
    /// when it no longer matches the segment or rumble length, or when empty.
    pub fn apply_options<R: Rng + ?Sized>(&mut self, loaded: &LoadedOptions, rng: &mut R) {
        self.settings = Settings::from_options(&loaded.options);
        let stale = self.settings.segment_length != self.track.segment_length()
            || self.settings.rumble_length != self.track.rumble_length();
        if loaded.geometry_overridden || stale || self.track.is_empty() {
            self.rebuild(rng);
        } else {
            tracing::debug!("Options applied without rebuilding the track");
        }
    }

    /// Lay out the course, scatter scenery, respawn traffic and paint the
    /// start and finish banners.
    pub fn rebuild<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut track = Track::new(self.settings.segment_length, self.settings.rumble_length);
        track.build_course();
        scenery::scatter(&mut track, rng);
        self.traffic.reset(&mut track, &self.settings, rng);
        track.mark_start_and_finish(self.settings.player_z);
        self.track = track;

        self.player.position = util::increase(self.player.position, 0.0, self.track.length());

        tracing::info!(
            "Track built: {} segments, {:.0} units long, {} vehicles",
            self.track.len(),
            self.track.length(),
            self.traffic.len()
        );
    }

    /// Advance the world by one fixed step.
    pub fn tick(&mut self, input: PlayerInput, records: &mut dyn LapRecordStore) -> TickEvents {
        let settings = &self.settings;
        let player_segment = self.track.find_segment_index(self.player.position + settings.player_z);
        let start = self.player.position;

        let view = self.player.view(player_segment);
        self.traffic.update(&mut self.track, settings, &view, settings.step);

        let collision = self
            .player
            .integrate(&self.track, &self.traffic, settings, input, player_segment);

        let curve = self.track.segment(player_segment).curve;
        self.parallax
            .advance(curve, (self.player.position - start) / settings.segment_length);

        let lap = self
            .laps
            .update(start, self.player.position, settings.player_z, settings.step, records);

        TickEvents { collision, lap }
    }
}
