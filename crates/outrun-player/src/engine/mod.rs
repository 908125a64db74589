//! Game engine: minifb window, keyboard polling, fixed-step loop.
//!
//! The framebuffer matches the configured viewport; minifb stretches it to
//! whatever size the window currently has.

pub mod raster;
pub mod sound_engine;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;

use outrun_common::LoadedOptions;
use outrun_core::util::format_time;
use outrun_core::{build_frame, FixedStep, LapRecordStore, PlayerInput, Simulation};

use crate::score::ScoreStore;
use raster::Canvas;
use sound_engine::{MusicPlayer, Playlist};

const TITLE_EVERY: u64 = 10;

/// Everything the engine needs from the command line
pub struct EngineConfig {
    pub options_path: PathBuf,
    pub options: LoadedOptions,
    pub seed: u64,
    pub score_dir: PathBuf,
    pub music: Vec<PathBuf>,
}

fn poll_input(window: &Window) -> PlayerInput {
    PlayerInput {
        left: window.is_key_down(Key::Left) || window.is_key_down(Key::A),
        right: window.is_key_down(Key::Right) || window.is_key_down(Key::D),
        faster: window.is_key_down(Key::Up) || window.is_key_down(Key::W),
        slower: window.is_key_down(Key::Down) || window.is_key_down(Key::S),
    }
}

/// Window title doubling as the HUD
fn hud_title(sim: &Simulation, paused: bool) -> String {
    let mph = 5.0 * (sim.player.speed / 500.0).round();
    let last = sim.laps.last.map_or_else(|| "-".to_string(), format_time);
    let best = sim.laps.fastest.map_or_else(|| "-".to_string(), format_time);
    format!(
        "OutRun | {:.0} mph | lap {} | last {} | best {}{}",
        mph,
        format_time(sim.laps.current),
        last,
        best,
        if paused { " | PAUSED" } else { "" },
    )
}

/// Run the game until the window closes or Escape is pressed
pub fn run(config: EngineConfig) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut scores = ScoreStore::open(&config.score_dir);
    let mut sim = Simulation::new(&config.options, scores.load(), &mut rng);

    let (mut fb_w, mut fb_h) = (sim.settings().width as usize, sim.settings().height as usize);
    let mut framebuffer = vec![0u32; fb_w * fb_h];

    let options = WindowOptions {
        resize: true,
        scale_mode: minifb::ScaleMode::AspectRatioStretch,
        ..Default::default()
    };
    let mut window = Window::new("OutRun", fb_w, fb_h, options)
        .map_err(|e| anyhow::anyhow!("Window creation failed: {}", e))?;
    window.set_target_fps(outrun_core::settings::FPS as usize);

    let mut music = MusicPlayer::new(Playlist::new(config.music));
    if let Some(m) = music.as_mut() {
        m.play_current();
    }

    let mut clock = FixedStep::new(sim.settings().step);
    let mut paused = false;
    let mut last_frame = Instant::now();
    let mut frame_count: u64 = 0;

    tracing::info!("Engine initialized, entering game loop");
    tracing::info!("Controls: arrows/WASD drive | Space pause | M mute | 1 next track | F5 reload options | Esc quit");

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        if window.is_key_pressed(Key::Space, KeyRepeat::No) {
            paused = !paused;
            if let Some(m) = music.as_ref() {
                m.set_paused(paused);
            }
            tracing::info!("Paused → {}", paused);
        }
        if window.is_key_pressed(Key::M, KeyRepeat::No) {
            if let Some(m) = music.as_mut() {
                m.toggle_mute();
            }
        }
        if window.is_key_pressed(Key::Key1, KeyRepeat::No) {
            if let Some(m) = music.as_mut() {
                m.next_track();
            }
        }
        if window.is_key_pressed(Key::F5, KeyRepeat::No) {
            match LoadedOptions::from_file(&config.options_path) {
                Ok(loaded) => {
                    sim.apply_options(&loaded, &mut rng);
                    clock = FixedStep::new(sim.settings().step);
                    fb_w = sim.settings().width as usize;
                    fb_h = sim.settings().height as usize;
                    framebuffer.resize(fb_w * fb_h, 0);
                }
                Err(e) => tracing::warn!("Options reload failed: {}", e),
            }
        }

        let input = poll_input(&window);

        if !paused {
            clock.advance(dt, || {
                let events = sim.tick(input, &mut scores);
                if let Some(lap) = events.lap {
                    tracing::info!(
                        "Lap {}{}",
                        format_time(lap.time),
                        if lap.new_best { " (new best)" } else { "" }
                    );
                }
            });
        }

        let frame = build_frame(&mut sim, input, paused, &mut rng);
        let mut canvas = Canvas::new(&mut framebuffer, fb_w, fb_h);
        raster::draw_frame(&mut canvas, &frame, sim.settings().lanes);

        frame_count += 1;
        if frame_count % TITLE_EVERY == 0 {
            window.set_title(&hud_title(&sim, paused));
        }

        window
            .update_with_buffer(&framebuffer, fb_w, fb_h)
            .map_err(|e| anyhow::anyhow!("Display error: {}", e))?;
    }

    if let Some(m) = music.as_mut() {
        m.stop();
    }
    tracing::info!("Engine shutdown");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_shows_lap_clock() {
        let mut sim = Simulation::new(&LoadedOptions::default(), Some(62.5), &mut StdRng::seed_from_u64(1));
        sim.player.speed = 12000.0;
        sim.laps.current = 12.34;
        let title = hud_title(&sim, true);
        assert!(title.contains("120 mph"), "{}", title);
        assert!(title.contains("lap 12.3"), "{}", title);
        assert!(title.contains("best 1.02.5"), "{}", title);
        assert!(title.ends_with("PAUSED"));
    }
}
