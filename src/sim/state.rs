//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`], including the RNG, so a
//! serialized snapshot resumes exactly where it left off.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::ScreenSize;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended on a collision; frozen until restart
    Collided,
}

/// Direction gravity currently pulls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gravity {
    /// Pulls toward the bottom of the screen
    #[default]
    Normal,
    /// Pulls toward the top of the screen
    Inverted,
}

impl Gravity {
    /// Multiplier applied to every accelerative and velocity term (+1 or -1)
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Gravity::Normal => 1.0,
            Gravity::Inverted => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Gravity::Normal => Gravity::Inverted,
            Gravity::Inverted => Gravity::Normal,
        }
    }
}

/// An obstacle in the gate stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Gate {
    /// Height of the lower wall; 0 marks a placeholder with no walls
    pub gap_height: i32,
    /// Passing this gate flips gravity
    pub inverts: bool,
}

impl Gate {
    pub const PLACEHOLDER: Gate = Gate {
        gap_height: 0,
        inverts: false,
    };

    /// Construct a gate with no walls yet. The inversion flag is rolled here,
    /// before any gap height exists.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            gap_height: 0,
            inverts: rng.random_range(0..INVERT_ODDS) == 0,
        }
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.gap_height == 0
    }

    /// Only gates with walls can flip gravity
    #[inline]
    pub fn flips_gravity(&self) -> bool {
        self.inverts && !self.is_placeholder()
    }
}

/// The player's avatar. Horizontal position is fixed; the world scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub position: f32,
    pub velocity: f32,
    pub acceleration: f32,
    pub has_collided: bool,
}

impl Avatar {
    /// Avatar at rest at the vertical center of the screen
    pub fn centered(screen: ScreenSize) -> Self {
        Self {
            position: screen.height as f32 / 2.0,
            velocity: 0.0,
            acceleration: 0.0,
            has_collided: false,
        }
    }

    /// Row the top half of the glyph occupies
    #[inline]
    pub fn row(&self) -> i32 {
        self.position as i32
    }
}

/// Horizontal scroll progress through the current section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldScroll {
    /// Always within `[0, section_width)`
    pub offset: f32,
    pub section_width: f32,
}

/// Score keeping that spans a single run (and a few counters that span all runs)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub attempt_count: u32,
    pub score: u32,
    pub high_score: u32,
    pub gravity: Gravity,
    /// Set once the gate at the avatar column has been scored
    pub gate_already_scored: bool,
}

/// Events produced by a tick, for the host to log or react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted { attempt: u32 },
    Flapped,
    GateSpawned { gate: Gate },
    Scored { score: u32, high_score: u32 },
    GravityInverted { gravity: Gravity },
    Collided { score: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub screen: ScreenSize,
    pub avatar: Avatar,
    pub world: WorldScroll,
    /// Gates in left-to-right order; always `GATE_SLOTS` long
    pub gates: VecDeque<Gate>,
    pub run: RunState,
    /// Gate generator
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state and start the first run
    pub fn new(seed: u64, screen: ScreenSize) -> Self {
        let mut state = Self {
            seed,
            screen,
            avatar: Avatar::centered(screen),
            world: WorldScroll {
                offset: 0.0,
                section_width: screen.section_width(),
            },
            gates: VecDeque::with_capacity(GATE_SLOTS),
            run: RunState {
                attempt_count: 0,
                score: 0,
                high_score: 0,
                gravity: Gravity::Normal,
                gate_already_scored: false,
            },
            rng: Pcg32::seed_from_u64(seed),
        };
        state.start_run();
        state
    }

    /// Reset everything that belongs to a single run and count the attempt.
    /// `high_score` and `attempt_count` carry over.
    pub fn start_run(&mut self) {
        self.avatar = Avatar::centered(self.screen);
        self.world.offset = 0.0;
        self.gates.clear();
        for _ in 0..GATE_SLOTS {
            let gate = Gate::new(&mut self.rng);
            self.gates.push_back(gate);
        }
        self.run.score = 0;
        self.run.attempt_count += 1;
        self.run.gravity = Gravity::Normal;
        self.run.gate_already_scored = false;

        log::info!("Run {} started", self.run.attempt_count);
    }

    pub fn phase(&self) -> GamePhase {
        if self.avatar.has_collided {
            GamePhase::Collided
        } else {
            GamePhase::Playing
        }
    }

    /// Fixed column of the avatar glyph's left edge
    #[inline]
    pub fn avatar_column(&self) -> i32 {
        self.screen.avatar_column()
    }

    /// Left edge of the gate at `index`, in screen space (fractional)
    #[inline]
    pub fn gate_left(&self, index: usize) -> f32 {
        index as f32 * self.world.section_width + GATE_INSET - self.world.offset
    }

    /// Right edge of the gate at `index`, in screen space (fractional)
    #[inline]
    pub fn gate_right(&self, index: usize) -> f32 {
        self.gate_left(index) + WALL_WIDTH
    }
}
