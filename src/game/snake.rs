use super::direction::Direction;
use super::grid::Bounds;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// A snake on the level, steered either by the player or by [`super::ai`]
///
/// All positions are relative to the top-left corner of the level the snake is
/// on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The positions of all of the cells in the snake's body, with the most
    /// recent at the end.
    pub(super) body: VecDeque<Position>,

    /// The maximum length of the body
    pub(super) max_len: usize,

    /// The direction in which the snake will next move
    pub(super) direction: Direction,

    /// The direction in which the snake last moved.  Turning to face the
    /// reverse of this would put the head straight into the neck, so such
    /// turns are ignored.
    pub(super) facing: Direction,

    pub(super) alive: bool,
}

impl Snake {
    /// Create a new snake with its head at `head` and facing in `direction`.
    /// The body will be empty, and `max_len` will be set to
    /// [`INITIAL_SNAKE_LENGTH`][consts::INITIAL_SNAKE_LENGTH].
    pub(super) fn new(head: Position, direction: Direction) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            max_len: consts::INITIAL_SNAKE_LENGTH,
            direction,
            facing: direction,
            alive: true,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.head
    }

    /// Return the positions of the cells in the snake's body
    pub(super) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub(super) fn direction(&self) -> Direction {
        self.direction
    }

    pub(super) fn alive(&self) -> bool {
        self.alive
    }

    /// Return the glyph to use for drawing the snake's head
    pub(super) fn head_symbol(&self) -> char {
        self.facing.head_symbol()
    }

    /// Change the snake's direction to `direction`, unless that would make it
    /// double back on itself
    pub(super) fn turn(&mut self, direction: Direction) {
        if direction != self.facing.reverse() {
            self.direction = direction;
        }
    }

    /// Move the snake forwards one cell in the current direction within
    /// `bounds`.  If the snake hits a non-wraparound edge (in which case the
    /// head stays where it is) or runs into its own body, it dies.  Dead
    /// snakes do not move.
    pub(super) fn advance(&mut self, bounds: Bounds) {
        if !self.alive {
            return;
        }
        let Some(pos) = self.direction.advance(self.head, bounds) else {
            self.alive = false;
            return;
        };
        self.body.push_back(self.head);
        self.head = pos;
        self.facing = self.direction;
        while self.body.len() > self.max_len {
            let _ = self.body.pop_front();
        }
        if self.body.contains(&self.head) {
            self.alive = false;
        }
    }

    /// If the snake's head is on `food`, extend the snake's maximum length so
    /// that its tail stays put on the next move, and return `true`.
    pub(super) fn grow_on_eat(&mut self, food: Position) -> bool {
        if self.head == food {
            self.max_len += consts::SNAKE_GROWTH;
            true
        } else {
            false
        }
    }

    /// Does the snake's head or body occupy `pos`?
    pub(super) fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Iterate over every cell the snake occupies, head first
    pub(super) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().rev().copied())
    }

    pub(super) fn kill(&mut self) {
        self.alive = false;
    }
}
