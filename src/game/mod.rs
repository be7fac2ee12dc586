mod ai;
mod direction;
mod grid;
mod paused;
mod snake;
use self::ai::{AiSnake, Choice};
use self::direction::Direction;
use self::grid::Bounds;
use self::paused::{PauseOpt, Paused};
use self::snake::Snake;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::menu::MainMenu;
use crate::util::{center_rect, get_display_area, Globals};
use crossterm::event::{poll, read, Event};
use rand::{seq::IteratorRandom, Rng};
use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::collections::HashSet;
use std::time::Instant;
use tracing::info;

/// A round of the game: the player's snake, the optional rival, and the
/// fruits they compete for
#[derive(Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    score: u32,
    rival_score: u32,
    player: Snake,
    rival: Option<AiSnake>,
    fruits: HashSet<Position>,
    state: GameState,
    bounds: Bounds,
    globals: Globals,
    next_tick: Option<Instant>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, rng: R) -> Game<R> {
        let bounds = Bounds::from((
            globals.options.level_size.as_size(),
            globals.options.wraparound,
        ));
        let (head, direction) = bounds.player_start();
        let player = Snake::new(head, direction);
        let rival = globals
            .options
            .rival
            .then(|| AiSnake::new(bounds, globals.ai));
        let fruit_qty = globals.options.fruits.get();
        info!(
            width = bounds.width,
            height = bounds.height,
            wrap = bounds.wrap,
            rival = rival.is_some(),
            fruits = fruit_qty,
            "starting new round"
        );
        let mut game = Game {
            rng,
            score: 0,
            rival_score: 0,
            player,
            rival,
            fruits: HashSet::new(),
            state: GameState::Running,
            bounds,
            globals,
            next_tick: None,
        };
        for _ in 0..fruit_qty {
            game.place_fruit();
        }
        game
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.running() {
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + consts::TICK_PERIOD);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance();
                self.next_tick = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    /// Run one game tick: move the player, move the rival toward the nearest
    /// fruit, then settle collisions and eating
    fn advance(&mut self) {
        if !self.running() {
            return;
        }
        self.player.advance(self.bounds);
        if !self.player.alive() {
            self.end_round();
            return;
        }
        let rival_was_alive = self.rival_alive();
        if let Some(rival) = self.rival.as_mut() {
            if let Some(food) = nearest_fruit(rival.snake().head(), &self.fruits) {
                if let Some(Choice::Fallback(direction)) = rival.tick(food, &self.player) {
                    info!(?direction, "rival has no safe move");
                }
            }
        }
        self.resolve_collisions();
        if eat(&mut self.player, &mut self.fruits) {
            self.score += 1;
            self.place_fruit();
        }
        if let Some(rival) = self.rival.as_mut() {
            if eat(rival.snake_mut(), &mut self.fruits) {
                self.rival_score += 1;
                self.place_fruit();
            }
        }
        if rival_was_alive && !self.rival_alive() {
            info!(rival_score = self.rival_score, "rival died");
        }
        if !self.player.alive() {
            self.end_round();
        } else if self.fruits.is_empty() {
            info!(score = self.score, "no room left for fruit");
            self.state = GameState::Exhausted;
        }
    }

    /// Kill whichever snakes ran into the other.  A dead rival remains on the
    /// level, so the player can still run into it.
    fn resolve_collisions(&mut self) {
        let Some(rival) = self.rival.as_mut() else {
            return;
        };
        let player_hit = rival.snake().occupies(self.player.head());
        let rival_hit = rival.snake().alive() && self.player.occupies(rival.snake().head());
        if player_hit {
            self.player.kill();
        }
        if rival_hit {
            rival.snake_mut().kill();
        }
    }

    fn place_fruit(&mut self) {
        let mut occupied = self.fruits.clone();
        occupied.extend(self.player.cells());
        if let Some(rival) = self.rival.as_ref() {
            occupied.extend(rival.snake().cells());
        }
        self.fruits.extend(
            self.bounds
                .positions()
                .filter(move |p| !occupied.contains(p))
                .choose(&mut self.rng),
        );
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// The player's current score
    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match self.state {
            GameState::Running => {
                if event == Event::FocusLost {
                    self.pause();
                } else {
                    match Command::from_key_event(event.as_key_press_event()?)? {
                        Command::Quit => return Some(Screen::Quit),
                        Command::Up => self.player.turn(Direction::Up),
                        Command::Left => self.player.turn(Direction::Left),
                        Command::Down => self.player.turn(Direction::Down),
                        Command::Right => self.player.turn(Direction::Right),
                        Command::Esc | Command::P => self.pause(),
                        _ => (),
                    }
                }
            }
            GameState::Paused(ref mut paused) => match paused.handle_event(event)? {
                PauseOpt::Resume => self.state = GameState::Running,
                PauseOpt::Restart => return Some(self.restart()),
                PauseOpt::MainMenu => return Some(self.main_menu()),
                PauseOpt::Quit => return Some(Screen::Quit),
            },
            GameState::Dead | GameState::Exhausted => {
                match Command::from_key_event(event.as_key_press_event()?)? {
                    Command::R => return Some(self.restart()),
                    Command::M => return Some(self.main_menu()),
                    Command::Quit | Command::Q => return Some(Screen::Quit),
                    _ => (),
                }
            }
        }
        None
    }

    fn restart(&self) -> Screen {
        Screen::Game(Box::new(Game::new(self.globals.clone())))
    }

    fn main_menu(&self) -> Screen {
        Screen::Main(MainMenu::new(self.globals.clone()))
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }

    fn pause(&mut self) {
        self.state = GameState::Paused(Paused::new());
    }

    fn end_round(&mut self) {
        info!(
            score = self.score,
            rival_score = self.rival_score,
            "player died"
        );
        self.state = GameState::Dead;
    }

    fn rival_alive(&self) -> bool {
        self.rival.as_ref().is_some_and(|r| r.snake().alive())
    }

    fn status_line(&self) -> String {
        match self.rival.as_ref() {
            None => format!(" Score: {}", self.score),
            Some(rival) => format!(
                " Score: {}   Rival: {}{}",
                self.score,
                self.rival_score,
                if rival.snake().alive() { "" } else { " (dead)" }
            ),
        }
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(self.status_line(), consts::SCORE_BAR_STYLE).render(score_area, buf);

        let mut block_size = self.bounds.size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(block_area, block_size);
        if self.bounds.wrap {
            DottedBorder.render(block_area, buf);
        } else {
            Block::bordered().render(block_area, buf);
        }

        let styles = self.globals.styles;
        let mut level = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for &pos in &self.fruits {
            level.draw_cell(pos, consts::FRUIT_SYMBOL, styles.fruit);
        }
        level.draw_body(&self.player, styles.player);
        if let Some(rival) = self.rival.as_ref() {
            level.draw_body(rival.snake(), styles.rival);
            level.draw_head(rival.snake(), styles.rival);
        }
        // Draw the player's head last so that, if it's a collision, we
        // overwrite whatever it's colliding with
        level.draw_head(&self.player, styles.player);

        match self.state {
            GameState::Running => (),
            GameState::Paused(paused) => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                paused.render(pause_area, buf);
            }
            GameState::Dead | GameState::Exhausted => {
                Span::from(" — GAME OVER —").render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Choose One: Restart ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Main Menu ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
        }
    }
}

/// Return the fruit nearest to `from` by Manhattan distance, breaking ties by
/// row and then by column
fn nearest_fruit(from: Position, fruits: &HashSet<Position>) -> Option<Position> {
    fruits
        .iter()
        .copied()
        .min_by_key(|&p| (from.x.abs_diff(p.x) + from.y.abs_diff(p.y), p.y, p.x))
}

/// If `snake` is alive and its head is on a fruit, remove the fruit, grow the
/// snake, and return `true`
fn eat(snake: &mut Snake, fruits: &mut HashSet<Position>) -> bool {
    let head = snake.head();
    snake.alive() && fruits.remove(&head) && snake.grow_on_eat(head)
}

/// A view of the part of a buffer that the level is drawn in, addressed in
/// level coordinates
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_char(&mut self, pos: Position, symbol: char) {
        if let Some(cell) = self.cell(pos) {
            cell.set_char(symbol);
        }
    }

    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if let Some(cell) = self.cell(pos) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }

    fn draw_body(&mut self, snake: &Snake, style: Style) {
        for &pos in snake.body() {
            self.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, style);
        }
    }

    fn draw_head(&mut self, snake: &Snake, style: Style) {
        if snake.alive() {
            self.draw_cell(snake.head(), snake.head_symbol(), style);
        } else {
            self.draw_cell(
                snake.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        }
    }

    fn cell(&mut self, pos: Position) -> Option<&mut Cell> {
        let x = self.area.x.checked_add(pos.x)?;
        let y = self.area.y.checked_add(pos.y)?;
        self.buf.cell_mut((x, y))
    }
}

/// The border drawn around wraparound levels
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        for corner in [
            Position::ORIGIN,
            Position::new(max_x, 0),
            Position::new(max_x, max_y),
            Position::new(0, max_y),
        ] {
            canvas.draw_char(corner, '·');
        }
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused(Paused),
    /// The player's snake has died
    Dead,
    /// The level has filled up and there are no more spaces to place fruits
    /// in
    Exhausted,
}
