//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between movements of the player's snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(200);

/// How often the terminal title's frames-per-second figure is refreshed
pub(crate) const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// The maximum number of fruits that can be present on a level at one time
pub(crate) const MAX_FRUITS: usize = 10;

/// Maximum snake length before any fruits have been eaten
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// How many cells a snake's length increases by upon eating a fruit
pub(crate) const SNAKE_GROWTH: usize = 1;

/// Default number of recently-visited cells the rival remembers
pub(crate) const DEFAULT_HISTORY_CAPACITY: usize = 8;

/// Largest number of recently-visited cells the rival can be configured to
/// remember
pub(crate) const MAX_HISTORY_CAPACITY: usize = 256;

/// Glyph for a snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for a snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for a snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for a snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of a snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for a fruit
pub(crate) const FRUIT_SYMBOL: char = '●';

/// Glyph for a snake's head when it's collided with a wall or a snake
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Default style for the player's snake
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Default style for the rival snake
pub(crate) const RIVAL_STYLE: Style = Style::new()
    .fg(Color::Magenta)
    .add_modifier(Modifier::BOLD);

/// Default style for fruits
pub(crate) const FRUIT_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Base text of the terminal title
pub(crate) const TITLE: &str = "Rival Snake";
