//! Floating bubble mini-player: state machine and position bookkeeping
//!
//! The bubble is a small box drawn above everything else. Tapping it toggles
//! between COLLAPSED (bubble only) and EXPANDED (bubble plus a control strip
//! next to it). Dragging moves the bubble; the strip follows.
//!
//! Positions are absolute terminal cells. The bubble is always clamped inside
//! the screen. The strip sits to the right of the bubble, or to the left when
//! the right side has no room.

use ratatui::layout::{Position, Rect};

pub const BUBBLE_WIDTH: u16 = 7;
pub const BUBBLE_HEIGHT: u16 = 3;
pub const STRIP_WIDTH: u16 = 32;
pub const STRIP_HEIGHT: u16 = 4;

const STRIP_BUTTONS: [StripButton; 5] = [
    StripButton::Shuffle,
    StripButton::Previous,
    StripButton::PlayPause,
    StripButton::Next,
    StripButton::Repeat,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BubbleState {
    #[default]
    Collapsed,
    Expanded,
}

/// Buttons on the expanded control strip, left to right
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StripButton {
    Shuffle,
    Previous,
    PlayPause,
    Next,
    Repeat,
}

impl StripButton {
    pub fn all() -> &'static [StripButton] {
        &STRIP_BUTTONS
    }
}

/// How a press on the bubble ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    Drag,
}

#[derive(Clone, Copy, Debug)]
struct DragAnchor {
    origin: Position,
    press: Position,
    moved: bool,
}

#[derive(Clone, Debug)]
pub struct Overlay {
    state: BubbleState,
    bubble: Position,
    screen: (u16, u16),
    drag: Option<DragAnchor>,
}

impl Overlay {
    pub fn new(origin: Position, screen: (u16, u16)) -> Self {
        let mut overlay = Self {
            state: BubbleState::Collapsed,
            bubble: origin,
            screen,
            drag: None,
        };
        overlay.bubble = overlay.clamp(origin.x as i32, origin.y as i32);
        overlay
    }

    pub fn state(&self) -> BubbleState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state == BubbleState::Expanded
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some_and(|d| d.moved)
    }

    pub fn position(&self) -> Position {
        self.bubble
    }

    /// COLLAPSED ⇄ EXPANDED
    pub fn tap(&mut self) {
        self.state = match self.state {
            BubbleState::Collapsed => BubbleState::Expanded,
            BubbleState::Expanded => BubbleState::Collapsed,
        };
        tracing::debug!(state = ?self.state, "Bubble toggled");
    }

    pub fn bubble_rect(&self) -> Rect {
        Rect::new(self.bubble.x, self.bubble.y, BUBBLE_WIDTH, BUBBLE_HEIGHT)
            .intersection(self.screen_rect())
    }

    /// Where the control strip is drawn, if expanded
    pub fn strip_rect(&self) -> Option<Rect> {
        self.is_expanded().then(|| self.strip_placement())
    }

    fn strip_placement(&self) -> Rect {
        let (width, height) = self.screen;
        let right = self.bubble.x.saturating_add(BUBBLE_WIDTH);
        let x = if right.saturating_add(STRIP_WIDTH) <= width || self.bubble.x < STRIP_WIDTH {
            right
        } else {
            self.bubble.x - STRIP_WIDTH
        };
        let y = self.bubble.y.min(height.saturating_sub(STRIP_HEIGHT));
        Rect::new(x, y, STRIP_WIDTH, STRIP_HEIGHT).intersection(self.screen_rect())
    }

    /// Screen rect of one strip button, in strip order
    pub fn button_rect(&self, button: StripButton) -> Option<Rect> {
        let strip = self.strip_rect()?;
        let index = STRIP_BUTTONS.iter().position(|b| *b == button)? as u16;
        let slot = STRIP_WIDTH.saturating_sub(2) / STRIP_BUTTONS.len() as u16;
        let rect = Rect::new(strip.x + 1 + index * slot, strip.y + 2, slot, 1);
        let visible = rect.intersection(strip);
        (!visible.is_empty()).then_some(visible)
    }

    pub fn button_at(&self, column: u16, row: u16) -> Option<StripButton> {
        let point = Position::new(column, row);
        StripButton::all()
            .iter()
            .copied()
            .find(|&button| self.button_rect(button).is_some_and(|r| r.contains(point)))
    }

    /// Whether a point is covered by the bubble or the strip
    pub fn hit(&self, column: u16, row: u16) -> bool {
        let point = Position::new(column, row);
        self.bubble_rect().contains(point) || self.strip_rect().is_some_and(|r| r.contains(point))
    }

    /// Start tracking a press. Returns false when the press is not on the bubble.
    pub fn press(&mut self, column: u16, row: u16) -> bool {
        if !self.bubble_rect().contains(Position::new(column, row)) {
            return false;
        }
        self.drag = Some(DragAnchor {
            origin: self.bubble,
            press: Position::new(column, row),
            moved: false,
        });
        true
    }

    /// Move the bubble with the pointer. Returns false when no press is active.
    pub fn drag_to(&mut self, column: u16, row: u16) -> bool {
        let Some(anchor) = self.drag.as_mut() else {
            return false;
        };
        let dx = column as i32 - anchor.press.x as i32;
        let dy = row as i32 - anchor.press.y as i32;
        if dx != 0 || dy != 0 {
            anchor.moved = true;
        }
        let (origin_x, origin_y) = (anchor.origin.x as i32, anchor.origin.y as i32);
        self.bubble = self.clamp(origin_x + dx, origin_y + dy);
        true
    }

    /// Finish a press. A press that never moved is a tap.
    pub fn release(&mut self, column: u16, row: u16) -> Option<Gesture> {
        self.drag_to(column, row);
        let anchor = self.drag.take()?;
        if anchor.moved {
            tracing::trace!(x = self.bubble.x, y = self.bubble.y, "Bubble dropped");
            Some(Gesture::Drag)
        } else {
            self.tap();
            Some(Gesture::Tap)
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = (width, height);
        self.bubble = self.clamp(self.bubble.x as i32, self.bubble.y as i32);
    }

    fn screen_rect(&self) -> Rect {
        Rect::new(0, 0, self.screen.0, self.screen.1)
    }

    fn clamp(&self, x: i32, y: i32) -> Position {
        let max_x = self.screen.0.saturating_sub(BUBBLE_WIDTH) as i32;
        let max_y = self.screen.1.saturating_sub(BUBBLE_HEIGHT) as i32;
        Position::new(x.clamp(0, max_x) as u16, y.clamp(0, max_y) as u16)
    }
}
