//! Render feed
//!
//! [`build_frame`] projects the draw window and turns the result into an
//! ordered list of [`DrawCommand`]s: background layers first, then road
//! segments far to near, then cars and scenery far to near with the player
//! car dropped in on its own segment. A backend only has to blit rects and
//! fill quads in order.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::camera::{self, ProjectedWindow};
use crate::palette::{Color, Palette, FOG};
use crate::player::{self, PlayerInput};
use crate::settings::{Settings, HILL_SPEED, SKY_SPEED, TREE_SPEED};
use crate::sim::Simulation;
use crate::sprites::{BackgroundLayer, SpriteId, SpriteRect, SPRITE_SCALE};
use crate::track::Track;
use crate::traffic::Traffic;
use crate::util;

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Filled convex quad in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon {
    pub points: [(f32, f32); 4],
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundDraw {
    pub layer: BackgroundLayer,
    /// Horizontal scroll in `[0, 1)`
    pub rotation: f32,
    /// Vertical shift in pixels
    pub offset: f32,
}

impl BackgroundDraw {
    /// Source and destination rects covering the screen width.
    ///
    /// Half the layer image is visible at a time; when the window runs off
    /// the right edge of the image a second blit wraps in from the left.
    pub fn blits(&self, width: f32, height: f32) -> Vec<(SpriteRect, Rect)> {
        let layer = self.layer.rect();
        let image_w = layer.w / 2;
        let source_x = layer.x + (layer.w as f32 * self.rotation).floor() as i32;
        let source_w = image_w.min(layer.x + layer.w - source_x);
        let dest_w = (width * source_w as f32 / image_w as f32).floor();

        let mut out = vec![(
            SpriteRect::new(source_x, layer.y, source_w, layer.h),
            Rect::new(0.0, self.offset, dest_w, height),
        )];
        if source_w < image_w {
            out.push((
                SpriteRect::new(layer.x, layer.y, image_w - source_w, layer.h),
                Rect::new(dest_w - 1.0, self.offset, width - dest_w, height),
            ));
        }
        out
    }
}

/// One road trapezoid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentDraw {
    pub x1: f32,
    pub y1: f32,
    pub w1: f32,
    pub x2: f32,
    pub y2: f32,
    pub w2: f32,
    pub fog: f32,
    pub palette: Palette,
}

fn rumble_width(projected_road_width: f32, lanes: u32) -> f32 {
    projected_road_width / 6.0f32.max(2.0 * lanes as f32)
}

fn lane_marker_width(projected_road_width: f32, lanes: u32) -> f32 {
    projected_road_width / 32.0f32.max(8.0 * lanes as f32)
}

impl SegmentDraw {
    /// Grass band, rumble strips, road surface and lane markers, already
    /// blended towards the fog colour.
    pub fn polygons(&self, width: f32, lanes: u32) -> Vec<Polygon> {
        let colors = self.palette.colors();
        let fogged = |c: Color| c.mix(FOG, 1.0 - self.fog);
        let quad = |points: [(f32, f32); 4], color: Color| Polygon { points, color: fogged(color) };

        let (x1, y1, w1, x2, y2, w2) = (self.x1, self.y1, self.w1, self.x2, self.y2, self.w2);
        let r1 = rumble_width(w1, lanes);
        let r2 = rumble_width(w2, lanes);

        let mut out = vec![
            quad([(0.0, y2), (width, y2), (width, y1), (0.0, y1)], colors.grass),
            quad([(x1 - w1 - r1, y1), (x1 - w1, y1), (x2 - w2, y2), (x2 - w2 - r2, y2)], colors.rumble),
            quad([(x1 + w1 + r1, y1), (x1 + w1, y1), (x2 + w2, y2), (x2 + w2 + r2, y2)], colors.rumble),
            quad([(x1 - w1, y1), (x1 + w1, y1), (x2 + w2, y2), (x2 - w2, y2)], colors.road),
        ];

        if let Some(lane) = colors.lane {
            let l1 = lane_marker_width(w1, lanes);
            let l2 = lane_marker_width(w2, lanes);
            let lane_w1 = w1 * 2.0 / lanes as f32;
            let lane_w2 = w2 * 2.0 / lanes as f32;
            let mut lane_x1 = x1 - w1 + lane_w1;
            let mut lane_x2 = x2 - w2 + lane_w2;
            for _ in 1..lanes {
                out.push(quad(
                    [
                        (lane_x1 - l1 / 2.0, y1),
                        (lane_x1 + l1 / 2.0, y1),
                        (lane_x2 + l2 / 2.0, y2),
                        (lane_x2 - l2 / 2.0, y2),
                    ],
                    lane,
                ));
                lane_x1 += lane_w1;
                lane_x2 += lane_w2;
            }
        }
        out
    }
}

/// A sprite-sheet blit, already scaled and clipped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub sprite: SpriteId,
    pub source: SpriteRect,
    pub dest: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background(BackgroundDraw),
    Segment(SegmentDraw),
    Sprite(SpriteDraw),
    Player(SpriteDraw),
}

/// Everything to draw for one display frame, in painter's order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

/// Scale a sprite to `scale`, anchor it at `(x, y)` shifted by fractions of
/// its own size, and clip it against the hill line `clip_y` (0 = none).
#[allow(clippy::too_many_arguments)]
fn place_sprite(
    settings: &Settings,
    sprite: SpriteId,
    scale: f32,
    x: f32,
    y: f32,
    offset_x: f32,
    offset_y: f32,
    clip_y: f32,
) -> Option<SpriteDraw> {
    if !(scale.is_finite() && scale > 0.0) {
        return None;
    }

    let source = sprite.rect();
    let factor = scale * settings.width / 2.0 * (SPRITE_SCALE * settings.road_width);
    let dest_w = source.w as f32 * factor;
    let dest_h = source.h as f32 * factor;
    let dest_x = x + dest_w * offset_x;
    let dest_y = y + dest_h * offset_y;

    let clip_h = if clip_y > 0.0 {
        (dest_y + dest_h - clip_y).max(0.0)
    } else {
        0.0
    };
    if clip_h >= dest_h {
        return None;
    }

    let source_h = source.h as f32 - source.h as f32 * clip_h / dest_h;
    Some(SpriteDraw {
        sprite,
        source: SpriteRect::new(source.x, source.y, source.w, source_h.round() as i32),
        dest: Rect::new(dest_x, dest_y, dest_w, dest_h - clip_h),
    })
}

/// Project the current state and emit the draw list for one frame.
///
/// `rng` only drives the engine bounce of the player car, which is frozen
/// while `paused`.
pub fn build_frame<R: Rng + ?Sized>(sim: &mut Simulation, input: PlayerInput, paused: bool, rng: &mut R) -> Frame {
    let (track, traffic, settings, player, parallax) = sim.frame_parts();
    if track.is_empty() {
        return Frame::default();
    }

    let window = camera::project_window(track, settings, player.position, player.x);
    let mut commands = Vec::with_capacity(window.visible.len() * 2 + 4);

    for (layer, rotation, speed) in [
        (BackgroundLayer::Sky, parallax.sky, SKY_SPEED),
        (BackgroundLayer::Hills, parallax.hill, HILL_SPEED),
        (BackgroundLayer::Trees, parallax.tree, TREE_SPEED),
    ] {
        commands.push(DrawCommand::Background(BackgroundDraw {
            layer,
            rotation,
            offset: settings.resolution * speed * window.player_y,
        }));
    }

    for &index in window.visible.iter().rev() {
        let seg = track.segment(index);
        commands.push(DrawCommand::Segment(SegmentDraw {
            x1: seg.p1.screen.x,
            y1: seg.p1.screen.y,
            w1: seg.p1.screen.w,
            x2: seg.p2.screen.x,
            y2: seg.p2.screen.y,
            w2: seg.p2.screen.w,
            fog: seg.fog,
            palette: seg.color,
        }));
    }

    let bounce = if paused {
        0.0
    } else {
        let sign = [-1.0f32, 1.0].choose(rng).copied().unwrap_or(1.0);
        1.5 * rng.gen::<f32>() * (player.speed / settings.max_speed) * settings.resolution * sign
    };

    emit_sprites(&mut commands, track, traffic, settings, &window, player.speed * input.steer(), bounce);

    Frame { commands }
}

/// Cars, scenery and the player car, far to near.
fn emit_sprites(
    commands: &mut Vec<DrawCommand>,
    track: &Track,
    traffic: &Traffic,
    settings: &Settings,
    window: &ProjectedWindow,
    steer: f32,
    bounce: f32,
) {
    let half_road = settings.road_width * settings.width / 2.0;

    // n = 0 is the segment under the camera; it carries the player car and
    // whatever traffic shares it. Anything behind the camera projects to a
    // non-positive scale and place_sprite drops it.
    for n in (0..window.count).rev() {
        let index = track.offset_index(window.base, n);
        let seg = track.segment(index);
        let (p1, p2) = (&seg.p1.screen, &seg.p2.screen);

        for &id in &seg.vehicles {
            let car = traffic.vehicle(id);
            let scale = util::interpolate(p1.scale, p2.scale, car.percent);
            let x = util::interpolate(p1.x, p2.x, car.percent) + scale * car.offset * half_road;
            let y = util::interpolate(p1.y, p2.y, car.percent);
            if let Some(draw) = place_sprite(settings, car.sprite, scale, x, y, -0.5, -1.0, seg.clip) {
                commands.push(DrawCommand::Sprite(draw));
            }
        }

        for placed in &seg.sprites {
            let scale = p1.scale;
            let x = p1.x + scale * placed.offset * half_road;
            let anchor = if placed.offset < 0.0 { -1.0 } else { 0.0 };
            if let Some(draw) = place_sprite(settings, placed.sprite, scale, x, p1.y, anchor, -1.0, seg.clip) {
                commands.push(DrawCommand::Sprite(draw));
            }
        }

        if index == window.player_segment {
            let camera_y = util::interpolate(seg.p1.camera.y, seg.p2.camera.y, window.player_percent);
            let scale = settings.camera_depth / settings.player_z;
            let y = settings.height / 2.0 - scale * camera_y * settings.height / 2.0;
            let updown = seg.p2.world.y - seg.p1.world.y;
            let variant = player::sprite_variant(steer, updown);
            if let Some(draw) = place_sprite(settings, variant, scale, settings.width / 2.0, y + bounce, -0.5, -1.0, 0.0) {
                commands.push(DrawCommand::Player(draw));
            }
        }
    }
}
