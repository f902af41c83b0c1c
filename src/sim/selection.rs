//! Answer slots and aim selection

use glam::Vec2;
use serde::Serialize;

use super::question::Question;
use crate::consts::*;

/// Play-field size in layout units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Rocket rest position (glyph center)
    pub fn launch_pad(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - LAUNCH_PAD_OFFSET)
    }
}

/// Axis-aligned box, origin at top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// One answer box on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerSlot {
    pub text: String,
    pub bounds: Rect,
}

impl AnswerSlot {
    /// Where the rocket flies to: horizontal center of the bottom edge
    pub fn target(&self) -> Vec2 {
        Vec2::new(self.bounds.center_x(), self.bounds.bottom())
    }
}

/// Lay out the answers of `question` in equal columns
pub fn layout_slots(question: &Question, viewport: Viewport) -> [AnswerSlot; SLOT_COUNT] {
    let spacing = viewport.width / SLOT_COUNT as f32;
    let top = viewport.height * SLOT_ROW_FRACTION;
    std::array::from_fn(|i| AnswerSlot {
        text: question.answers[i].clone(),
        bounds: Rect {
            x: spacing * i as f32 + spacing / 2.0 - SLOT_WIDTH / 2.0,
            y: top,
            w: SLOT_WIDTH,
            h: SLOT_HEIGHT,
        },
    })
}

/// Which slot the rocket is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionController {
    selected: usize,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self {
            selected: CENTER_SLOT,
        }
    }
}

impl SelectionController {
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Back to the center slot (new question)
    pub fn reset(&mut self) {
        self.selected = CENTER_SLOT;
    }

    /// Shift aim by `direction` (sign only), clamped to the slot range.
    /// Returns the new index.
    pub fn shift(&mut self, direction: i32) -> usize {
        let step = direction.signum();
        let next = (self.selected as i32 + step).clamp(0, SLOT_COUNT as i32 - 1);
        self.selected = next as usize;
        self.selected
    }

    /// The currently aimed slot
    pub fn target<'a>(&self, slots: &'a [AnswerSlot]) -> Option<&'a AnswerSlot> {
        slots.get(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn question() -> Question {
        Question::new("2+2?", ["3", "4", "5"], 1, "")
    }

    #[test]
    fn test_layout_columns() {
        let slots = layout_slots(&question(), Viewport::new(900.0, 1000.0));
        assert_eq!(slots[0].bounds.x, 150.0 - 65.0);
        assert_eq!(slots[1].bounds.x, 450.0 - 65.0);
        assert_eq!(slots[2].bounds.x, 750.0 - 65.0);
        for slot in &slots {
            assert_eq!(slot.bounds.y, 350.0);
        }
        assert_eq!(slots[1].text, "4");
        assert_eq!(slots[2].target(), Vec2::new(750.0, 400.0));
    }

    #[test]
    fn test_starts_centered() {
        let mut sel = SelectionController::default();
        assert_eq!(sel.selected(), CENTER_SLOT);
        sel.shift(-1);
        sel.reset();
        assert_eq!(sel.selected(), 1);
    }

    #[test]
    fn test_clamps_at_edges() {
        let mut sel = SelectionController::default();
        assert_eq!(sel.shift(-1), 0);
        assert_eq!(sel.shift(-1), 0);
        assert_eq!(sel.shift(1), 1);
        assert_eq!(sel.shift(1), 2);
        assert_eq!(sel.shift(1), 2);
    }

    proptest! {
        #[test]
        fn prop_shift_is_clamped(start in 0usize..3, dir in prop_oneof![Just(-1i32), Just(1i32)]) {
            let mut sel = SelectionController::default();
            sel.selected = start;
            let expected = (start as i32 + dir).clamp(0, 2) as usize;
            prop_assert_eq!(sel.shift(dir), expected);
        }
    }
}
