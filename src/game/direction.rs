use super::grid::Bounds;
use crate::consts;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order the rival considers them when it has to
    /// leave its greedy route
    pub(super) const PREFERENCE: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Return the cell one step from `pos` in this direction, or `None` if
    /// that would leave a non-wraparound level.
    pub(super) fn advance(self, pos: Position, bounds: Bounds) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => {
                y = decrement_in_bounds(y, bounds.height, bounds.wrap)?;
            }
            Direction::Down => {
                y = increment_in_bounds(y, bounds.height, bounds.wrap)?;
            }
            Direction::Left => {
                x = decrement_in_bounds(x, bounds.width, bounds.wrap)?;
            }
            Direction::Right => {
                x = increment_in_bounds(x, bounds.width, bounds.wrap)?;
            }
        }
        Some(Position { x, y })
    }

    /// Return the direction in which `to` is a single step away from `from`,
    /// or `None` if `to` is not an orthogonal neighbor of `from`
    pub(super) fn between(from: Position, to: Position, bounds: Bounds) -> Option<Direction> {
        if from == to {
            return None;
        }
        Direction::PREFERENCE
            .into_iter()
            .find(|d| d.advance(from, bounds) == Some(to))
    }

    pub(super) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Return the glyph to use for drawing a snake's head facing this way
    pub(super) fn head_symbol(self) -> char {
        match self {
            Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
            Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
            Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        }
    }
}

fn decrement_in_bounds(x: u16, max: u16, wrap: bool) -> Option<u16> {
    if let Some(x2) = x.checked_sub(1) {
        Some(x2)
    } else if wrap {
        Some(max - 1)
    } else {
        None
    }
}

fn increment_in_bounds(x: u16, max: u16, wrap: bool) -> Option<u16> {
    if let Some(x2) = x.checked_add(1).filter(|&xx| xx < max) {
        Some(x2)
    } else if wrap {
        Some(0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Size;
    use rstest::rstest;

    #[rstest]
    #[case(
        Direction::Up,
        Position::new(2, 7),
        Bounds::from((Size::new(10, 15), false)),
        Some(Position::new(2, 6))
    )]
    #[case(
        Direction::Down,
        Position::new(2, 7),
        Bounds::from((Size::new(10, 15), false)),
        Some(Position::new(2, 8))
    )]
    #[case(
        Direction::Right,
        Position::new(2, 7),
        Bounds::from((Size::new(10, 15), false)),
        Some(Position::new(3, 7))
    )]
    #[case(
        Direction::Left,
        Position::new(2, 7),
        Bounds::from((Size::new(10, 15), false)),
        Some(Position::new(1, 7))
    )]
    #[case(
        Direction::Up,
        Position::new(2, 0),
        Bounds::from((Size::new(10, 15), false)),
        None
    )]
    #[case(
        Direction::Up,
        Position::new(2, 0),
        Bounds::from((Size::new(10, 15), true)),
        Some(Position::new(2, 14))
    )]
    #[case(
        Direction::Down,
        Position::new(2, 14),
        Bounds::from((Size::new(10, 15), false)),
        None
    )]
    #[case(
        Direction::Down,
        Position::new(2, 14),
        Bounds::from((Size::new(10, 15), true)),
        Some(Position::new(2, 0))
    )]
    #[case(
        Direction::Right,
        Position::new(9, 7),
        Bounds::from((Size::new(10, 15), false)),
        None
    )]
    #[case(
        Direction::Right,
        Position::new(9, 7),
        Bounds::from((Size::new(10, 15), true)),
        Some(Position::new(0, 7))
    )]
    #[case(
        Direction::Left,
        Position::new(0, 7),
        Bounds::from((Size::new(10, 15), false)),
        None
    )]
    #[case(
        Direction::Left,
        Position::new(0, 7),
        Bounds::from((Size::new(10, 15), true)),
        Some(Position::new(9, 7))
    )]
    fn test_direction_advance(
        #[case] d: Direction,
        #[case] pos: Position,
        #[case] bounds: Bounds,
        #[case] r: Option<Position>,
    ) {
        assert_eq!(d.advance(pos, bounds), r);
    }

    #[rstest]
    #[case(1, 1, false)]
    #[case(1, 1, true)]
    #[case(10, 10, false)]
    #[case(7, 3, true)]
    #[case(38, 8, false)]
    fn advance_stays_in_bounds(#[case] width: u16, #[case] height: u16, #[case] wrap: bool) {
        let bounds = Bounds::from((Size::new(width, height), wrap));
        for pos in bounds.positions() {
            for d in Direction::PREFERENCE {
                if let Some(next) = d.advance(pos, bounds) {
                    assert!(bounds.contains(next), "{d:?} from {pos} left {bounds:?}");
                } else {
                    assert!(!wrap, "{d:?} from {pos} failed to wrap");
                }
            }
        }
    }

    #[rstest]
    #[case(Position::new(4, 4), Position::new(5, 4), false, Some(Direction::Right))]
    #[case(Position::new(4, 4), Position::new(4, 5), false, Some(Direction::Down))]
    #[case(Position::new(4, 4), Position::new(3, 4), false, Some(Direction::Left))]
    #[case(Position::new(4, 4), Position::new(4, 3), false, Some(Direction::Up))]
    #[case(Position::new(4, 4), Position::new(4, 4), false, None)]
    #[case(Position::new(4, 4), Position::new(5, 5), false, None)]
    #[case(Position::new(4, 4), Position::new(6, 4), false, None)]
    #[case(Position::new(0, 4), Position::new(9, 4), false, None)]
    #[case(Position::new(0, 4), Position::new(9, 4), true, Some(Direction::Left))]
    fn test_between(
        #[case] from: Position,
        #[case] to: Position,
        #[case] wrap: bool,
        #[case] r: Option<Direction>,
    ) {
        let bounds = Bounds::from((Size::new(10, 10), wrap));
        assert_eq!(Direction::between(from, to, bounds), r);
    }

    #[test]
    fn reverse_is_involution() {
        for d in Direction::PREFERENCE {
            assert_ne!(d.reverse(), d);
            assert_eq!(d.reverse().reverse(), d);
        }
    }
}
