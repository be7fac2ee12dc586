use super::direction::Direction;
use ratatui::layout::{Position, Positions, Rect, Size};

/// The dimensions of a level, with all positions relative to its top-left
/// corner
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Bounds {
    pub(super) width: u16,
    pub(super) height: u16,

    /// Whether moving off one edge of the level brings a snake in on the
    /// opposite edge
    pub(super) wrap: bool,
}

impl Bounds {
    pub(super) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub(super) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub(super) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }

    /// Where the player's snake starts: the center of the level, facing up
    pub(super) fn player_start(self) -> (Position, Direction) {
        (
            Position::new(self.width / 2, self.height / 2),
            Direction::Up,
        )
    }

    /// Where the rival snake starts: the middle of the upper-left quadrant,
    /// facing right
    pub(super) fn rival_start(self) -> (Position, Direction) {
        (
            Position::new(self.width / 4, self.height / 4),
            Direction::Right,
        )
    }
}

impl From<(Size, bool)> for Bounds {
    fn from((size, wrap): (Size, bool)) -> Bounds {
        Bounds {
            width: size.width,
            height: size.height,
            wrap,
        }
    }
}
