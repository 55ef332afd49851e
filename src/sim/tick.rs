//! Per-frame simulation step
//!
//! Order within a playing frame: physics, scroll/spawn, paint walls, collision
//! read-back, scoring, then the avatar glyph and HUD.

use super::collision::{ReadBack, detect_collision};
use super::physics;
use super::scoring::score_gates;
use super::state::{GameEvent, GamePhase, GameState};
use super::world;
use crate::consts::*;
use crate::renderer::Surface;
use crate::renderer::paint::{paint_avatar, paint_gates, paint_hud};

/// Input edges for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Action key went down this frame (flap)
    pub action_pressed: bool,
    /// Action key came up this frame (restart after a collision)
    pub action_released: bool,
}

/// Host frame times can be garbage; never step backwards
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Clamping invalid frame time {dt} to 0");
        0.0
    }
}

/// Advance the game by one frame of `dt` seconds, painting into `surface`
pub fn tick<S: Surface + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    surface: &mut S,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase() == GamePhase::Collided {
        if input.action_released {
            state.start_run();
            events.push(GameEvent::RunStarted {
                attempt: state.run.attempt_count,
            });
            surface.clear();
            surface.apply_all(&paint_gates(state));
            surface.apply_all(&paint_avatar(state));
            surface.apply(&paint_hud(&state.run));
        }
        return events;
    }

    let dt = sanitize_dt(dt);

    if physics::integrate(
        &mut state.avatar,
        state.run.gravity,
        input.action_pressed,
        dt,
    ) {
        events.push(GameEvent::Flapped);
    }

    let spawned = world::advance(
        &mut state.world,
        &mut state.gates,
        &mut state.rng,
        state.screen.height,
        SCROLL_SPEED * dt,
    );
    events.extend(spawned.into_iter().map(|gate| GameEvent::GateSpawned { gate }));

    surface.clear();
    surface.apply_all(&paint_gates(state));

    let collided = detect_collision(
        &state.avatar,
        state.avatar_column(),
        state.screen.height,
        &ReadBack(&*surface),
    );
    if collided {
        state.avatar.has_collided = true;
        log::info!(
            "Collision on attempt {} at score {}",
            state.run.attempt_count,
            state.run.score
        );
        events.push(GameEvent::Collided {
            score: state.run.score,
        });
    } else {
        score_gates(state, &mut events);
    }

    surface.apply_all(&paint_avatar(state));
    surface.apply(&paint_hud(&state.run));

    events
}
