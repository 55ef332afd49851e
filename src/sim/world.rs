//! World scrolling and gate generation

use std::collections::VecDeque;

use rand::Rng;

use super::state::{Gate, WorldScroll};
use crate::consts::*;

/// Generate a fresh gate for the end of the stream.
///
/// Sampling order matters for reproducibility: the inversion flag is rolled
/// when the gate is constructed, then the gap height, then gaps that are too
/// small are turned into placeholders (which also clears the inversion flag).
pub fn generate_gate<R: Rng + ?Sized>(rng: &mut R, screen_height: i32) -> Gate {
    let mut gate = Gate::new(rng);
    let range = (screen_height - GAP_RANGE_MARGIN).max(1);
    gate.gap_height = rng.random_range(0..range);
    if gate.gap_height <= MIN_GAP_HEIGHT {
        gate = Gate::PLACEHOLDER;
    }
    gate
}

/// Scroll the world by `distance` cells, recycling gates as whole sections
/// pass. Returns the newly appended gates, oldest first.
///
/// Passing more than `GATE_SLOTS` sections in one step replaces the whole
/// stream once; gates that would have scrolled past unseen are not generated.
pub fn advance<R: Rng + ?Sized>(
    world: &mut WorldScroll,
    gates: &mut VecDeque<Gate>,
    rng: &mut R,
    screen_height: i32,
    distance: f32,
) -> Vec<Gate> {
    let mut spawned = Vec::new();
    if world.section_width <= 0.0 {
        return spawned;
    }

    world.offset += distance;
    if world.offset < world.section_width {
        return spawned;
    }

    let sections = (world.offset / world.section_width).floor();
    world.offset = world.offset.rem_euclid(world.section_width);
    // rem_euclid may round up to the divisor; an infinite offset gives NaN
    if !(0.0..world.section_width).contains(&world.offset) {
        world.offset = 0.0;
    }

    let recycled = (sections as usize).min(GATE_SLOTS);
    for _ in 0..recycled {
        gates.pop_front();
        let gate = generate_gate(rng, screen_height);
        log::debug!(
            "Spawned gate gap={} inverts={}",
            gate.gap_height,
            gate.inverts
        );
        gates.push_back(gate);
        spawned.push(gate);
    }
    spawned
}
