//! Gate scoring and gravity inversion

use super::state::{GameEvent, GameState};

/// Score any gate whose right edge has reached the avatar column.
///
/// A gate scores on the frame its truncated right edge lands on the avatar
/// column. The latch holds while that edge stays on the column and is
/// released on the first frame no edge is there, however far the frame
/// scrolled, so the next gate can score.
pub fn score_gates(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let column = state.avatar_column();
    let mut any_aligned = false;

    for index in 0..state.gates.len() {
        let gate = state.gates[index];
        if state.gate_right(index) as i32 != column {
            continue;
        }
        any_aligned = true;
        if state.run.gate_already_scored {
            continue;
        }

        state.run.gate_already_scored = true;
        state.run.score += 1;
        state.run.high_score = state.run.high_score.max(state.run.score);
        log::debug!("Scored gate {} (score {})", index, state.run.score);
        events.push(GameEvent::Scored {
            score: state.run.score,
            high_score: state.run.high_score,
        });

        if gate.flips_gravity() {
            state.run.gravity = state.run.gravity.flipped();
            state.avatar.acceleration = 0.0;
            state.avatar.velocity = 0.0;
            log::info!("Gravity inverted: {:?}", state.run.gravity);
            events.push(GameEvent::GravityInverted {
                gravity: state.run.gravity,
            });
        }
    }

    if !any_aligned {
        state.run.gate_already_scored = false;
    }
}
