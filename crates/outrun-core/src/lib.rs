//! Simulation and projection core for a sprite-scaling road racer
//!
//! The world is a loop of fixed-length road segments. Each tick moves the
//! traffic and the player along it; each display frame projects the segments
//! in front of the camera and emits a flat list of draw commands.
//!
//! ```text
//!   options ──► Settings ──► Simulation::rebuild ──► Track + Traffic
//!                                   │
//!   FixedStep ──► Simulation::tick ─┤  (traffic, player, parallax, laps)
//!                                   │
//!   display ───► render::build_frame ──► Frame { DrawCommand* }
//! ```

pub mod camera;
pub mod clock;
pub mod lap;
pub mod palette;
pub mod player;
pub mod render;
pub mod settings;
pub mod sim;
pub mod sprites;
pub mod track;
pub mod traffic;
pub mod util;

pub use clock::FixedStep;
pub use lap::{LapCompleted, LapRecordStore, MemoryRecordStore};
pub use player::{Collision, PlayerInput, PlayerState};
pub use render::{build_frame, DrawCommand, Frame};
pub use settings::Settings;
pub use sim::{Simulation, TickEvents};
pub use track::Track;
