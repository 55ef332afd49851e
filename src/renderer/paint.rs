//! Paint command emission
//!
//! Turns the game state into rectangle and text commands for a [`Surface`].
//! Wall geometry is shared with the collision module so both agree on where
//! the walls are.
//!
//! [`Surface`]: super::Surface

use super::surface::{Cell, Color};
use crate::consts::*;
use crate::sim::state::{GameState, Gate, Gravity, RunState};

/// A single drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Fill `[x0, x1) × [y0, y1)` with `cell`
    Rect {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        cell: Cell,
    },
    /// Draw text starting at `(x, y)`
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Color,
    },
}

/// One solid wall segment of a gate, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    pub color: Color,
}

impl WallRect {
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    pub fn to_command(self) -> PaintCommand {
        PaintCommand::Rect {
            x0: self.x0,
            y0: self.y0,
            x1: self.x1,
            y1: self.y1,
            cell: Cell::solid(self.color),
        }
    }
}

/// Lower and upper wall of the gate at stream position `index`.
/// Placeholders have no walls.
pub fn gate_walls(state: &GameState, index: usize, gate: &Gate) -> Option<[WallRect; 2]> {
    if gate.is_placeholder() {
        return None;
    }

    let height = state.screen.height;
    let left = state.gate_left(index) as i32;
    let right = state.gate_right(index) as i32;

    // Inverting gates open a little wider on both sides
    let (color, shift) = if gate.inverts {
        (Color::Red, INVERT_WALL_SHIFT)
    } else {
        (Color::Green, 0)
    };

    let lower = WallRect {
        x0: left,
        y0: height - (gate.gap_height - shift),
        x1: right,
        y1: height,
        color,
    };
    let upper = WallRect {
        x0: left,
        y0: 0,
        x1: right,
        y1: height - (gate.gap_height + shift) - GAP_SIZE,
        color,
    };
    Some([lower, upper])
}

/// Wall commands for every gate in the stream
pub fn paint_gates(state: &GameState) -> Vec<PaintCommand> {
    state
        .gates
        .iter()
        .enumerate()
        .filter_map(|(i, gate)| gate_walls(state, i, gate))
        .flatten()
        .map(WallRect::to_command)
        .collect()
}

/// Two-row avatar glyph. Wings point with the direction of travel; the eye
/// changes when gravity is inverted.
pub fn paint_avatar(state: &GameState) -> Vec<PaintCommand> {
    let x = state.avatar_column();
    let avatar = &state.avatar;
    let top = avatar.row();
    let bottom = (avatar.position + 1.0) as i32;
    let descending = avatar.velocity > 0.0;

    let rows: [(i32, i32, &str); 2] = match (state.run.gravity, descending) {
        (Gravity::Normal, true) => [(x - 1, top, "\\\\\\"), (x, bottom, "<\\\\'>")],
        (Gravity::Normal, false) => [(x, top, "<//'>"), (x - 1, bottom, "///")],
        (Gravity::Inverted, true) => [(x, top, "<//.>"), (x - 1, bottom, "///")],
        (Gravity::Inverted, false) => [(x - 1, top, "\\\\\\"), (x, bottom, "<\\\\.>")],
    };

    rows.iter()
        .map(|&(x, y, text)| PaintCommand::Text {
            x,
            y,
            text: text.to_string(),
            color: Color::Yellow,
        })
        .collect()
}

/// Heads-up display line at the top left
pub fn paint_hud(run: &RunState) -> PaintCommand {
    PaintCommand::Text {
        x: 1,
        y: 1,
        text: format!(
            "Attempt: {} Score: {} High Score: {}",
            run.attempt_count, run.score, run.high_score
        ),
        color: Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScreenSize;
    use crate::renderer::{CellBuffer, Surface};

    fn state_with(gates: [Gate; GATE_SLOTS]) -> GameState {
        let mut state = GameState::new(1, ScreenSize::default());
        state.gates = gates.into_iter().collect();
        state
    }

    #[test]
    fn test_green_gate_walls() {
        let state = state_with([
            Gate { gap_height: 20, inverts: false },
            Gate::PLACEHOLDER,
            Gate::PLACEHOLDER,
            Gate::PLACEHOLDER,
        ]);
        let [lower, upper] = gate_walls(&state, 0, &state.gates[0]).unwrap();

        assert_eq!((lower.x0, lower.x1), (10, 15));
        assert_eq!((lower.y0, lower.y1), (28, 48));
        assert_eq!((upper.y0, upper.y1), (0, 13));
        assert_eq!(lower.color, Color::Green);
        // Opening between the walls is GAP_SIZE rows
        assert_eq!(lower.y0 - upper.y1, GAP_SIZE);
    }

    #[test]
    fn test_red_gate_walls_are_wider_apart() {
        let state = state_with([
            Gate::PLACEHOLDER,
            Gate { gap_height: 20, inverts: true },
            Gate::PLACEHOLDER,
            Gate::PLACEHOLDER,
        ]);
        let [lower, upper] = gate_walls(&state, 1, &state.gates[1]).unwrap();

        assert_eq!(lower.color, Color::Red);
        assert_eq!(lower.y0, 48 - 18);
        assert_eq!(upper.y1, 48 - 22 - 15);
        assert_eq!(lower.y0 - upper.y1, GAP_SIZE + 2 * INVERT_WALL_SHIFT);
    }

    #[test]
    fn test_walls_scroll_left_with_offset() {
        let mut state = state_with([
            Gate::PLACEHOLDER,
            Gate { gap_height: 15, inverts: false },
            Gate::PLACEHOLDER,
            Gate::PLACEHOLDER,
        ]);
        state.world.offset = 3.5;
        let [lower, _] = gate_walls(&state, 1, &state.gates[1]).unwrap();

        // 80 / 3 + 10 - 3.5 = 33.1667, right edge 38.1667
        assert_eq!((lower.x0, lower.x1), (33, 38));
    }

    #[test]
    fn test_placeholders_paint_nothing() {
        let state = state_with([Gate::PLACEHOLDER; GATE_SLOTS]);
        assert!(paint_gates(&state).is_empty());
    }

    #[test]
    fn test_avatar_glyph_poses() {
        let mut state = GameState::new(1, ScreenSize::default());
        state.avatar.position = 20.0;
        state.avatar.velocity = 5.0;

        let mut buf = CellBuffer::new(state.screen);
        buf.apply_all(&paint_avatar(&state));
        assert_eq!(buf.row_text(20).trim(), "\\\\\\");
        assert_eq!(buf.row_text(21).trim(), "<\\\\'>");
        assert!(buf.read_cell(25, 20).is_some_and(|c| c.glyph == '\\'));

        state.run.gravity = Gravity::Inverted;
        state.avatar.velocity = -5.0;
        let mut buf = CellBuffer::new(state.screen);
        buf.apply_all(&paint_avatar(&state));
        assert_eq!(buf.row_text(21).trim(), "<\\\\.>");
    }

    #[test]
    fn test_hud_text() {
        let state = GameState::new(1, ScreenSize::default());
        let mut buf = CellBuffer::new(state.screen);
        buf.apply(&paint_hud(&state.run));
        assert_eq!(buf.row_text(1).trim_end(), " Attempt: 1 Score: 0 High Score: 0");
    }
}
