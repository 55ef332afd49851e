//! Collision detection against the painted frame
//!
//! The hitbox is four probe cells around the avatar glyph. In play, the probes
//! read back whatever the renderer just painted, so the wall footprint on
//! screen is exactly what the avatar can hit. [`GateGeometry`] answers the
//! same question from gate shapes alone, without a surface.

use super::state::{Avatar, GameState};
use crate::consts::*;
use crate::renderer::Surface;
use crate::renderer::paint::gate_walls;

/// Answers whether a cell is occupied by something the avatar can hit
pub trait HitboxSampler {
    fn is_solid(&self, x: i32, y: i32) -> bool;
}

/// Samples the just-painted surface: any non-blank cell is solid
pub struct ReadBack<'a, S: Surface + ?Sized>(pub &'a S);

impl<S: Surface + ?Sized> HitboxSampler for ReadBack<'_, S> {
    fn is_solid(&self, x: i32, y: i32) -> bool {
        self.0.read_cell(x, y).is_some_and(|cell| !cell.is_blank())
    }
}

/// Samples wall rectangles computed from the gate stream
pub struct GateGeometry<'a> {
    pub state: &'a GameState,
}

impl HitboxSampler for GateGeometry<'_> {
    fn is_solid(&self, x: i32, y: i32) -> bool {
        let screen = self.state.screen;
        if x < 0 || y < 0 || x >= screen.width || y >= screen.height {
            return false;
        }
        self.state
            .gates
            .iter()
            .enumerate()
            .filter_map(|(i, gate)| gate_walls(self.state, i, gate))
            .flatten()
            .any(|wall| wall.contains(x, y))
    }
}

/// The four probe cells: two rows at the glyph's left column and at `HITBOX_SPAN` to its right
pub fn hitbox_probes(avatar: &Avatar, column: i32) -> [(i32, i32); 4] {
    let top = avatar.row();
    let bottom = (avatar.position + 1.0) as i32;
    [
        (column, top),
        (column, bottom),
        (column + HITBOX_SPAN, top),
        (column + HITBOX_SPAN, bottom),
    ]
}

/// True if the avatar is outside the playfield or any probe cell is solid
pub fn detect_collision<H: HitboxSampler + ?Sized>(
    avatar: &Avatar,
    column: i32,
    screen_height: i32,
    sampler: &H,
) -> bool {
    if avatar.position < BOUNDARY_MARGIN
        || avatar.position > screen_height as f32 - BOUNDARY_MARGIN
    {
        return true;
    }
    hitbox_probes(avatar, column)
        .iter()
        .any(|&(x, y)| sampler.is_solid(x, y))
}
