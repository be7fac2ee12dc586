//! The AI-controlled rival snake
//!
//! Each time the rival moves it plans a straight-line route to the food,
//! horizontal leg first, and follows the first step of that route if the
//! destination cell is free and not recently visited.  Otherwise it takes the
//! first free non-reversing direction, trying its current heading before the
//! rest in [`Direction::PREFERENCE`] order and preferring cells it has not
//! visited recently.  A free but recently-visited greedy step is still taken
//! when every other free direction is also stale.  If nothing is free it
//! carries on straight ahead and dies.
use super::direction::Direction;
use super::grid::Bounds;
use super::snake::Snake;
use crate::config::{AiConfig, AiSpeed, HistoryCapacity};
use ratatui::layout::Position;
use ringbuffer::{AllocRingBuffer, RingBuffer};
use std::cmp::Ordering;
use tracing::debug;

#[derive(Debug)]
pub(super) struct AiSnake {
    snake: Snake,
    bounds: Bounds,

    /// Fraction of game ticks on which the rival moves
    speed: AiSpeed,

    /// Accumulated fractional movement; the rival moves whenever this reaches
    /// one
    progress: f32,

    /// Route to the food computed during the most recent decision
    path: Vec<Position>,

    history: PositionHistory,
    state: AiState,
}

impl AiSnake {
    /// Create a rival at the level's rival starting position
    pub(super) fn new(bounds: Bounds, config: AiConfig) -> AiSnake {
        let (head, direction) = bounds.rival_start();
        AiSnake::with_snake(Snake::new(head, direction), bounds, config)
    }

    pub(super) fn with_snake(snake: Snake, bounds: Bounds, config: AiConfig) -> AiSnake {
        let state = if snake.alive() {
            AiState::Deciding
        } else {
            AiState::Dead
        };
        AiSnake {
            snake,
            bounds,
            speed: config.speed,
            progress: 0.0,
            path: Vec::new(),
            history: PositionHistory::new(config.history_capacity),
            state,
        }
    }

    pub(super) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(super) fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub(super) fn state(&self) -> AiState {
        if self.snake.alive() {
            self.state
        } else {
            AiState::Dead
        }
    }

    /// Advance the rival's movement clock by one game tick, deciding and
    /// moving if a move is due.  Returns the decision made, if any.
    pub(super) fn tick(&mut self, food: Position, player: &Snake) -> Option<Choice> {
        if self.state() == AiState::Dead {
            return None;
        }
        self.progress += self.speed.get();
        if self.progress < 1.0 {
            return None;
        }
        self.progress -= 1.0;
        self.update_ai(food, player)
    }

    /// Choose a direction toward `food` that avoids the level edges, the
    /// rival's own body, and `player`, then move in it.  Returns `None`
    /// without doing anything if the rival is dead.
    pub(super) fn update_ai(&mut self, food: Position, player: &Snake) -> Option<Choice> {
        if self.state() == AiState::Dead {
            return None;
        }
        self.state = AiState::Deciding;
        let choice = self.choose(food, player);
        self.snake.turn(choice.direction());
        self.state = AiState::Moving;
        self.snake.advance(self.bounds);
        if self.snake.alive() {
            self.history.record(self.snake.head());
        } else {
            self.state = AiState::Dead;
        }
        debug!(
            ?choice,
            head = %self.snake.head(),
            alive = self.snake.alive(),
            "rival moved"
        );
        Some(choice)
    }

    fn choose(&mut self, food: Position, player: &Snake) -> Choice {
        match self
            .greedy_direction(food)
            .filter(|&d| self.is_safe_direction(d, player))
        {
            Some(d) if self.is_fresh(d) => Choice::Greedy(d),
            Some(d) => self
                .fresh_alternative(player)
                .map_or(Choice::Greedy(d), Choice::Alternative),
            None => self
                .find_alternative_direction(player)
                .map_or(Choice::Fallback(self.snake.direction()), Choice::Alternative),
        }
    }

    /// Return the direction of the first step of the planned route to `food`,
    /// or the current direction if the rival is already on the food.  A step
    /// that would reverse the rival is never returned.
    fn greedy_direction(&mut self, food: Position) -> Option<Direction> {
        self.plan_path(food);
        let direction = match self.path.first() {
            Some(&step) => self.determine_direction(step)?,
            None => self.snake.direction(),
        };
        (direction != self.snake.direction().reverse()).then_some(direction)
    }

    /// Fill `path` with an L-shaped route from the head to `food`.  The
    /// horizontal leg comes first unless its first step would reverse the
    /// rival.
    fn plan_path(&mut self, food: Position) {
        self.path.clear();
        if !self.bounds.contains(food) {
            return;
        }
        let head = self.snake.head();
        let horizontal = match food.x.cmp(&head.x) {
            Ordering::Less => Some(Direction::Left),
            Ordering::Equal => None,
            Ordering::Greater => Some(Direction::Right),
        };
        let vertical = match food.y.cmp(&head.y) {
            Ordering::Less => Some(Direction::Up),
            Ordering::Equal => None,
            Ordering::Greater => Some(Direction::Down),
        };
        let legs = if horizontal == Some(self.snake.direction().reverse()) {
            [vertical, horizontal]
        } else {
            [horizontal, vertical]
        };
        let mut pos = head;
        for d in legs.into_iter().flatten() {
            while !aligned(pos, food, d) {
                let Some(next) = d.advance(pos, self.bounds) else {
                    break;
                };
                self.path.push(next);
                pos = next;
            }
        }
    }

    /// Return the direction that moves the head onto `next_step`, or `None`
    /// if `next_step` is not orthogonally adjacent to the head.
    pub(super) fn determine_direction(&self, next_step: Position) -> Option<Direction> {
        Direction::between(self.snake.head(), next_step, self.bounds)
    }

    /// Would moving in `dir` put the head on a cell that is inside the level
    /// and not occupied by either snake?
    pub(super) fn is_safe_direction(&self, dir: Direction, player: &Snake) -> bool {
        self.next_head_position(dir)
            .is_some_and(|pos| !self.snake.occupies(pos) && !player.occupies(pos))
    }

    pub(super) fn next_head_position(&self, dir: Direction) -> Option<Position> {
        dir.advance(self.snake.head(), self.bounds)
    }

    /// Return the first safe direction other than backwards, trying the
    /// current heading and then the other directions in
    /// [`Direction::PREFERENCE`] order.  Directions leading to
    /// recently-visited cells are only returned if no other direction is
    /// safe.  Returns `None` if there is no safe direction at all.
    pub(super) fn find_alternative_direction(&self, player: &Snake) -> Option<Direction> {
        self.fresh_alternative(player)
            .or_else(|| self.candidates().find(|&d| self.is_safe_direction(d, player)))
    }

    fn fresh_alternative(&self, player: &Snake) -> Option<Direction> {
        self.candidates()
            .find(|&d| self.is_safe_direction(d, player) && self.is_fresh(d))
    }

    /// Every direction but backwards, current heading first
    fn candidates(&self) -> impl Iterator<Item = Direction> {
        let heading = self.snake.direction();
        std::iter::once(heading).chain(
            Direction::PREFERENCE
                .into_iter()
                .filter(move |&d| d != heading && d != heading.reverse()),
        )
    }

    /// Does moving in `dir` lead to a cell that is not in the history?
    fn is_fresh(&self, dir: Direction) -> bool {
        self.next_head_position(dir)
            .is_some_and(|pos| !self.history.contains(pos))
    }
}

fn aligned(pos: Position, target: Position, d: Direction) -> bool {
    match d {
        Direction::Left | Direction::Right => pos.x == target.x,
        Direction::Up | Direction::Down => pos.y == target.y,
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum AiState {
    /// Alive and choosing the next direction
    Deciding,

    /// Alive and has committed to a direction this tick
    Moving,

    Dead,
}

/// How the rival arrived at the direction it moved in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Choice {
    /// The first step toward the food was safe, and either not recently
    /// visited or no better than the alternatives
    Greedy(Direction),

    /// The first step toward the food was unsafe or recently visited, and
    /// another direction was safe
    Alternative(Direction),

    /// Nothing was safe, so the rival kept going the way it was going
    Fallback(Direction),
}

impl Choice {
    pub(super) fn direction(self) -> Direction {
        match self {
            Choice::Greedy(d) | Choice::Alternative(d) | Choice::Fallback(d) => d,
        }
    }
}

/// The rival's most recent head positions, oldest evicted first.  A capacity
/// of zero remembers nothing.
#[derive(Debug)]
pub(super) struct PositionHistory(Option<AllocRingBuffer<Position>>);

impl PositionHistory {
    pub(super) fn new(capacity: HistoryCapacity) -> PositionHistory {
        let capacity = capacity.get();
        PositionHistory((capacity > 0).then(|| AllocRingBuffer::new(capacity)))
    }

    pub(super) fn record(&mut self, pos: Position) {
        if let Some(buf) = self.0.as_mut() {
            buf.enqueue(pos);
        }
    }

    pub(super) fn contains(&self, pos: Position) -> bool {
        self.0
            .as_ref()
            .is_some_and(|buf| buf.iter().any(|&p| p == pos))
    }
}
