//! Background music via rodio
//!
//! One looping track at a time. The playlist cycles on request, mute keeps
//! the track running at zero volume, and pause follows the game's pause.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

/// Ordered list of music files with a wrapping cursor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    tracks: Vec<PathBuf>,
    current: usize,
}

impl Playlist {
    pub fn new(tracks: Vec<PathBuf>) -> Self {
        Self { tracks, current: 0 }
    }

    pub fn current(&self) -> Option<&Path> {
        self.tracks.get(self.current).map(PathBuf::as_path)
    }

    /// Move to the next track, wrapping to the first
    pub fn advance(&mut self) -> Option<&Path> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.tracks.len();
        self.current()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Music output: owns the rodio stream and the sink of the current track
pub struct MusicPlayer {
    /// rodio output stream (must be kept alive)
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    playlist: Playlist,
    muted: bool,
    /// Master volume (0.0 – 1.0)
    volume: f32,
}

impl MusicPlayer {
    /// Open the default audio device. Returns None if it is unavailable.
    pub fn new(playlist: Playlist) -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                tracing::info!("Audio output initialized ({} music track(s))", playlist.tracks.len());
                Some(Self {
                    _stream: stream,
                    handle,
                    sink: None,
                    playlist,
                    muted: false,
                    volume: 1.0,
                })
            }
            Err(e) => {
                tracing::warn!("Failed to initialize audio: {}", e);
                None
            }
        }
    }

    /// Start looping the playlist's current track, replacing any playing one.
    pub fn play_current(&mut self) {
        self.stop();
        let Some(path) = self.playlist.current().map(Path::to_path_buf) else {
            return;
        };

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Failed to open music '{}': {}", path.display(), e);
                return;
            }
        };
        let source = match Decoder::new(BufReader::new(file)) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Failed to decode music '{}': {}", path.display(), e);
                return;
            }
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(self.effective_volume());
                sink.append(source.repeat_infinite());
                self.sink = Some(sink);
                tracing::debug!("Music loop: {}", path.display());
            }
            Err(e) => tracing::warn!("Failed to create music sink: {}", e),
        }
    }

    /// Switch to the next track in the playlist
    pub fn next_track(&mut self) {
        if self.playlist.advance().is_some() {
            self.play_current();
        }
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if let Some(sink) = &self.sink {
            sink.set_volume(self.effective_volume());
        }
        tracing::info!("Music {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    pub fn set_paused(&self, paused: bool) {
        if let Some(sink) = &self.sink {
            if paused {
                sink.pause();
            } else {
                sink.play();
            }
        }
    }

    /// Stop the current track
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }
}
