//! Roadside scenery scatter
//!
//! Fixed billboards near the start, then randomised palms, columns, trees,
//! plants and billboard clusters that thicken further along the course.

use rand::seq::SliceRandom;
use rand::Rng;

use super::Track;
use crate::sprites::{SpriteId, BILLBOARDS, PLANTS};

const SIDES: [f32; 2] = [1.0, -1.0];

fn pick<R: Rng + ?Sized>(rng: &mut R, options: &[SpriteId]) -> SpriteId {
    options.choose(rng).copied().unwrap_or(SpriteId::Tree1)
}

fn side<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    SIDES.choose(rng).copied().unwrap_or(1.0)
}

/// Scatter decorative sprites over an already laid-out track.
pub fn scatter<R: Rng + ?Sized>(track: &mut Track, rng: &mut R) {
    let len = track.len();

    let fixed = [
        SpriteId::Billboard07,
        SpriteId::Billboard06,
        SpriteId::Billboard08,
        SpriteId::Billboard09,
        SpriteId::Billboard01,
        SpriteId::Billboard02,
        SpriteId::Billboard03,
        SpriteId::Billboard04,
        SpriteId::Billboard05,
    ];
    for (i, sprite) in fixed.into_iter().enumerate() {
        track.add_sprite(20 * (i + 1), sprite, -1.0);
    }

    track.add_sprite(240, SpriteId::Billboard07, -1.2);
    track.add_sprite(240, SpriteId::Billboard06, 1.2);
    if let Some(n) = len.checked_sub(25) {
        track.add_sprite(n, SpriteId::Billboard07, -1.2);
        track.add_sprite(n, SpriteId::Billboard06, 1.2);
    }

    // Palm avenue, spacing widens with distance
    let mut n = 10;
    while n < 200 {
        track.add_sprite(n, SpriteId::PalmTree, 0.5 + rng.gen::<f32>() * 0.5);
        track.add_sprite(n, SpriteId::PalmTree, 1.0 + rng.gen::<f32>() * 2.0);
        n += 4 + n / 100;
    }

    for n in (250..1000).step_by(5) {
        track.add_sprite(n, SpriteId::Column, 1.1);
        track.add_sprite(n + rng.gen_range(0..=5), SpriteId::Tree1, -1.0 - rng.gen::<f32>() * 2.0);
        track.add_sprite(n + rng.gen_range(0..=5), SpriteId::Tree2, -1.0 - rng.gen::<f32>() * 2.0);
    }

    for n in (200..len).step_by(3) {
        let sprite = pick(rng, &PLANTS);
        let offset = side(rng) * (2.0 + rng.gen::<f32>() * 5.0);
        track.add_sprite(n, sprite, offset);
    }

    // Billboard clusters with a grove on one side
    let mut n = 1000;
    while n + 50 < len {
        let s = side(rng);
        let billboard = pick(rng, &BILLBOARDS);
        track.add_sprite(n + rng.gen_range(0..=50), billboard, -s);
        for _ in 0..20 {
            let plant = pick(rng, &PLANTS);
            let offset = s * (1.5 + rng.gen::<f32>());
            track.add_sprite(n + rng.gen_range(0..=50), plant, offset);
        }
        n += 100;
    }

    let total: usize = track.segments().iter().map(|s| s.sprites.len()).sum();
    tracing::debug!("Scattered {} roadside sprites over {} segments", total, len);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn course() -> Track {
        let mut track = Track::new(200.0, 3);
        track.build_course();
        track
    }

    fn layout(track: &Track) -> Vec<(usize, SpriteId, f32)> {
        track
            .segments()
            .iter()
            .flat_map(|s| s.sprites.iter().map(move |p| (s.index, p.sprite, p.offset)))
            .collect()
    }

    #[test]
    fn fixed_billboards_on_left() {
        let mut track = course();
        scatter(&mut track, &mut StdRng::seed_from_u64(1));
        let first = &track.segment(20).sprites[0];
        assert_eq!(first.sprite, SpriteId::Billboard07);
        assert_eq!(first.offset, -1.0);
        assert!(track.segment(180).sprites.iter().any(|p| p.sprite == SpriteId::Billboard05));
    }

    #[test]
    fn same_seed_same_scenery() {
        let mut a = course();
        let mut b = course();
        scatter(&mut a, &mut StdRng::seed_from_u64(42));
        scatter(&mut b, &mut StdRng::seed_from_u64(42));
        assert_eq!(layout(&a), layout(&b));
    }

    #[test]
    fn columns_line_the_right_side() {
        let mut track = course();
        scatter(&mut track, &mut StdRng::seed_from_u64(3));
        for n in (250..1000).step_by(5) {
            assert!(track
                .segment(n)
                .sprites
                .iter()
                .any(|p| p.sprite == SpriteId::Column && p.offset == 1.1));
        }
    }

    #[test]
    fn short_track_does_not_panic() {
        let mut track = Track::new(200.0, 3);
        track.add_straight(5);
        scatter(&mut track, &mut StdRng::seed_from_u64(7));
        assert_eq!(track.len(), 15);
    }
}
