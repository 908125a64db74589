//! Software rasterizer for the core's draw commands
//!
//! Writes 32-bit ARGB pixels into a `width × height` framebuffer. There is
//! no sprite sheet: scenery and cars are drawn as solid blocks coloured by
//! sprite kind, and the background layers are procedural silhouettes
//! sampled through the same source/destination rects a sheet blit would use.

use std::f32::consts::TAU;

use outrun_core::palette::{Color, SKY, TREE};
use outrun_core::render::{BackgroundDraw, DrawCommand, Frame, Rect, SpriteDraw};
use outrun_core::sprites::{BackgroundLayer, SpriteKind};

const HILLS: Color = Color::rgb(0x3C, 0x8C, 0x5A);

/// Borrowed framebuffer with its dimensions
pub struct Canvas<'a> {
    pub pixels: &'a mut [u32],
    pub width: usize,
    pub height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(pixels: &'a mut [u32], width: usize, height: usize) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self { pixels, width, height }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }

    /// Fill a horizontal span on row `y`, clipped to the canvas
    fn span(&mut self, y: i32, x0: f32, x1: f32, argb: u32) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let start = x0.round().max(0.0) as usize;
        let end = (x1.round().max(0.0) as usize).min(self.width);
        if start >= end {
            return;
        }
        let row = y as usize * self.width;
        self.pixels[row + start..row + end].fill(argb);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let argb = color.to_argb();
        let top = rect.y.round() as i32;
        let bottom = (rect.y + rect.h).round() as i32;
        for y in top.max(0)..bottom.min(self.height as i32) {
            self.span(y, rect.x, rect.x + rect.w, argb);
        }
    }

    /// Scanline fill of a convex quad
    pub fn fill_quad(&mut self, points: &[(f32, f32); 4], color: Color) {
        let argb = color.to_argb();
        let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);
        let top = min_y.round().max(0.0) as i32;
        let bottom = (max_y.round() as i32).min(self.height as i32);

        for y in top..bottom {
            let sample = y as f32 + 0.5;
            let mut left = f32::INFINITY;
            let mut right = f32::NEG_INFINITY;
            for i in 0..4 {
                let (ax, ay) = points[i];
                let (bx, by) = points[(i + 1) % 4];
                if (ay <= sample && by > sample) || (by <= sample && ay > sample) {
                    let x = ax + (sample - ay) / (by - ay) * (bx - ax);
                    left = left.min(x);
                    right = right.max(x);
                }
            }
            if left < right {
                self.span(y, left, right, argb);
            }
        }
    }
}

/// Silhouette height of a background layer at sheet column `x`, in `[0, 1]`
fn skyline(layer: BackgroundLayer, x: f32, sheet_x: i32, sheet_w: i32) -> f32 {
    let phase = (x - sheet_x as f32) / sheet_w as f32 * TAU;
    match layer {
        BackgroundLayer::Sky => 1.0,
        BackgroundLayer::Hills => 0.22 + 0.08 * (3.0 * phase).sin() + 0.04 * (7.0 * phase).sin(),
        BackgroundLayer::Trees => 0.12 + 0.03 * (23.0 * phase).sin().abs() + 0.02 * (41.0 * phase).sin(),
    }
}

fn draw_background(canvas: &mut Canvas, bg: &BackgroundDraw) {
    let sheet = bg.layer.rect();
    let color = match bg.layer {
        BackgroundLayer::Sky => SKY,
        BackgroundLayer::Hills => HILLS,
        BackgroundLayer::Trees => TREE,
    };
    let horizon = canvas.height as f32 / 2.0;

    for (source, dest) in bg.blits(canvas.width as f32, canvas.height as f32) {
        if dest.w <= 0.0 {
            continue;
        }
        let first = dest.x.round().max(0.0) as i32;
        let last = ((dest.x + dest.w).round() as i32).min(canvas.width as i32);
        for column in first..last {
            let u = (column as f32 - dest.x) / dest.w;
            let sheet_col = source.x as f32 + u * source.w as f32;
            let height = skyline(bg.layer, sheet_col, sheet.x, sheet.w);
            let top = if bg.layer == BackgroundLayer::Sky {
                dest.y
            } else {
                dest.y + horizon - height * dest.h
            };
            let bottom = if bg.layer == BackgroundLayer::Sky { dest.y + horizon } else { dest.y + dest.h };
            canvas.fill_rect(Rect::new(column as f32, top, 1.0, bottom - top), color);
        }
    }
}

fn sprite_color(draw: &SpriteDraw) -> Color {
    match draw.sprite.kind() {
        SpriteKind::Billboard => Color::rgb(0xE8, 0xC8, 0x3A),
        SpriteKind::Plant => Color::rgb(0x1E, 0x6B, 0x1E),
        SpriteKind::Rock => Color::rgb(0x8A, 0x7F, 0x70),
        SpriteKind::Column => Color::rgb(0xD8, 0xD8, 0xD0),
        SpriteKind::Vehicle => Color::rgb(0x2A, 0x4D, 0xC8),
        SpriteKind::Player => Color::rgb(0xD0, 0x20, 0x20),
    }
}

/// Rasterize one frame. `lanes` controls the lane-marker layout.
pub fn draw_frame(canvas: &mut Canvas, frame: &Frame, lanes: u32) {
    canvas.clear(SKY);
    for command in &frame.commands {
        match command {
            DrawCommand::Background(bg) => draw_background(canvas, bg),
            DrawCommand::Segment(seg) => {
                for poly in seg.polygons(canvas.width as f32, lanes) {
                    canvas.fill_quad(&poly.points, poly.color);
                }
            }
            DrawCommand::Sprite(draw) | DrawCommand::Player(draw) => {
                canvas.fill_rect(draw.dest, sprite_color(draw));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(0xFF, 0, 0);

    #[test]
    fn rect_is_clipped_to_canvas() {
        let mut buf = vec![0u32; 10 * 10];
        let mut canvas = Canvas::new(&mut buf, 10, 10);
        canvas.fill_rect(Rect::new(-5.0, 8.0, 8.0, 10.0), RED);
        let filled = buf.iter().filter(|&&p| p == RED.to_argb()).count();
        // columns 0..3, rows 8..10
        assert_eq!(filled, 6);
    }

    #[test]
    fn quad_fills_its_interior() {
        let mut buf = vec![0u32; 20 * 20];
        let mut canvas = Canvas::new(&mut buf, 20, 20);
        canvas.fill_quad(&[(2.0, 2.0), (12.0, 2.0), (12.0, 12.0), (2.0, 12.0)], RED);
        assert_eq!(buf[5 * 20 + 5], RED.to_argb());
        assert_eq!(buf[15 * 20 + 15], 0);
        assert_eq!(buf.iter().filter(|&&p| p != 0).count(), 100);
    }

    #[test]
    fn trapezoid_narrows_towards_top() {
        let mut buf = vec![0u32; 40 * 20];
        let mut canvas = Canvas::new(&mut buf, 40, 20);
        canvas.fill_quad(&[(0.0, 19.0), (40.0, 19.0), (30.0, 0.0), (10.0, 0.0)], RED);
        let row = |y: usize| buf[y * 40..(y + 1) * 40].iter().filter(|&&p| p != 0).count();
        assert!(row(1) < row(18));
    }

    #[test]
    fn sky_layer_covers_upper_half() {
        let mut buf = vec![0u32; 64 * 48];
        let mut canvas = Canvas::new(&mut buf, 64, 48);
        let bg = BackgroundDraw { layer: BackgroundLayer::Sky, rotation: 0.3, offset: 0.0 };
        draw_background(&mut canvas, &bg);
        assert!(buf[..64 * 24].iter().all(|&p| p == SKY.to_argb()));
    }
}
