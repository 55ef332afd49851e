//! Gate Runner - A scrolling gate-dodging arcade game for the terminal
//!
//! Core modules:
//! - `sim`: Simulation (physics, gate stream, collision, scoring)
//! - `renderer`: Cell-buffer surface abstraction and paint commands
//! - `settings`: Host configuration loaded from JSON

pub mod renderer;
pub mod settings;
pub mod sim;

pub use renderer::{Cell, CellBuffer, Color, Surface};
pub use settings::{Settings, SettingsError};
pub use sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Gravitational acceleration (cells/s²)
    pub const GRAVITY: f32 = 100.0;
    /// Velocity set by a flap, against gravity
    pub const FLAP_VELOCITY: f32 = -GRAVITY / 4.0;
    /// Minimum falling speed before another flap is accepted
    pub const FLAP_MIN_FALL_SPEED: f32 = GRAVITY / 10.0;

    /// World scroll speed (cells/s)
    pub const SCROLL_SPEED: f32 = 14.0;

    /// Gate slots in the stream; one is always staged off-screen
    pub const GATE_SLOTS: usize = 4;
    /// Horizontal inset of a gate's left edge within its section
    pub const GATE_INSET: f32 = 10.0;
    /// Wall thickness (cells)
    pub const WALL_WIDTH: f32 = 5.0;
    /// Passable opening between the upper and lower wall
    pub const GAP_SIZE: i32 = 15;
    /// Gap heights are sampled from `[0, screen_height - GAP_RANGE_MARGIN)`
    pub const GAP_RANGE_MARGIN: i32 = 20;
    /// Sampled gap heights at or below this become placeholders
    pub const MIN_GAP_HEIGHT: i32 = 10;
    /// Inverting gates widen their opening by this much on each side
    pub const INVERT_WALL_SHIFT: i32 = 2;
    /// One gate in this many is an inverting gate
    pub const INVERT_ODDS: u32 = 5;

    /// Rows kept clear at the top and bottom of the screen
    pub const BOUNDARY_MARGIN: f32 = 2.0;
    /// Column offset of the right-hand hitbox probe from the avatar column
    pub const HITBOX_SPAN: i32 = 5;

    /// Default screen size (cells)
    pub const DEFAULT_SCREEN_WIDTH: i32 = 80;
    pub const DEFAULT_SCREEN_HEIGHT: i32 = 48;
}

/// Screen dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: consts::DEFAULT_SCREEN_WIDTH,
            height: consts::DEFAULT_SCREEN_HEIGHT,
        }
    }
}

impl ScreenSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Fixed column of the avatar (a third of the way across)
    #[inline]
    pub fn avatar_column(&self) -> i32 {
        (self.width as f32 / 3.0) as i32
    }

    /// Width of one gate section
    #[inline]
    pub fn section_width(&self) -> f32 {
        self.width as f32 / (consts::GATE_SLOTS - 1) as f32
    }
}
