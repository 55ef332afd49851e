//! Simulation module
//!
//! All gameplay logic lives here. Given the same seed, screen size, frame
//! times and input edges, a run plays out identically:
//! - Seeded RNG only
//! - No platform dependencies; drawing goes through the `Surface` trait

pub mod collision;
pub mod physics;
pub mod scoring;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{GateGeometry, HitboxSampler, ReadBack, detect_collision};
pub use state::{Avatar, GameEvent, GamePhase, GameState, Gate, Gravity, RunState, WorldScroll};
pub use tick::{TickInput, tick};
pub use world::generate_gate;
